//! Compact Position Reporting
//!
//! Latitude and longitude information is reported using two alternating
//! formats (called even and odd). The original position can be recovered using
//! two methods:
//!
//! - global: needs one message of each format, but fails if the two messages
//!   are from different longitude zones.
//! - local: needs one message and a reference position.
//!   - airborne: reference position needs to be within 180 NM of the actual
//!     position.
//!   - surface: reference position needs to be within 45 NM of the actual
//!     position.
//!
//! None of the functions here check these preconditions. Tracking which
//! messages belong together is up to the caller.
//!
//! <https://mode-s.org/1090mhz/content/ads-b/3-airborne-position.html>

use std::{
    f64::consts::{
        FRAC_PI_2,
        PI,
        TAU,
    },
    ops::Not,
};

const N_Z: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CprFormat {
    Even,
    Odd,
}

impl CprFormat {
    /// Returns the CPR format from the value of the format bit.
    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::Odd } else { Self::Even }
    }

    pub fn is_odd(&self) -> bool {
        matches!(self, Self::Odd)
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// If this is even, returns odd. If this is odd, returns even.
    pub fn other(&self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }

    #[inline(always)]
    fn i(&self) -> f64 {
        match self {
            Self::Even => 0.0,
            Self::Odd => 1.0,
        }
    }
}

impl Not for CprFormat {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.other()
    }
}

/// The CPR encodings in use, named by their nominal number of bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CprResolution {
    /// 12 bits, coarse TIS-B airborne position
    TisbCoarse,
    /// 14 bits, intent messages
    Intent,
    /// 17 bits, airborne position
    Airborne,
    /// 19 bits, surface position. Only the low 17 bits are transmitted.
    Surface,
}

impl CprResolution {
    pub fn from_number_of_bits(number_of_bits: u8) -> Option<Self> {
        match number_of_bits {
            12 => Some(Self::TisbCoarse),
            14 => Some(Self::Intent),
            17 => Some(Self::Airborne),
            19 => Some(Self::Surface),
            _ => None,
        }
    }

    pub fn number_of_bits(&self) -> u8 {
        match self {
            Self::TisbCoarse => 12,
            Self::Intent => 14,
            Self::Airborne => 17,
            Self::Surface => 19,
        }
    }

    /// Number of bits actually carried in a message.
    pub fn transmitted_bits(&self) -> u8 {
        match self {
            Self::Surface => 17,
            _ => self.number_of_bits(),
        }
    }

    /// `D_lat`/`D_lon` factor. Surface positions cover a quarter of the zone
    /// size with the same number of transmitted bits.
    #[inline(always)]
    fn d_factor(&self) -> f64 {
        match self {
            Self::Surface => 0.25,
            _ => 1.0,
        }
    }

    #[inline(always)]
    fn scale(&self) -> f64 {
        2.0f64.powi(self.transmitted_bits().into())
    }

    fn d_lat(&self, format: CprFormat) -> f64 {
        self.d_factor() * 360.0 / (4.0 * N_Z - format.i())
    }

    fn d_lon(&self, n_l: u32, format: CprFormat) -> f64 {
        let n = (f64::from(n_l) - format.i()).max(1.0);
        self.d_factor() * 360.0 / n
    }
}

/// An encoded CPR position as found in a position message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CprCoordinate {
    lat_cpr: u32,
    lon_cpr: u32,
    format: CprFormat,
    resolution: CprResolution,
}

impl CprCoordinate {
    pub const fn from_parts_unchecked(
        lat_cpr: u32,
        lon_cpr: u32,
        format: CprFormat,
        resolution: CprResolution,
    ) -> Self {
        Self {
            lat_cpr,
            lon_cpr,
            format,
            resolution,
        }
    }

    /// Returns `None` if `number_of_bits` is not one of 12, 14, 17 or 19, or if
    /// the encoded values don't fit into the transmitted bits.
    pub fn new(lat_cpr: u32, lon_cpr: u32, format: CprFormat, number_of_bits: u8) -> Option<Self> {
        let resolution = CprResolution::from_number_of_bits(number_of_bits)?;
        let limit = 1u32 << resolution.transmitted_bits();
        (lat_cpr < limit && lon_cpr < limit)
            .then(|| Self::from_parts_unchecked(lat_cpr, lon_cpr, format, resolution))
    }

    pub fn lat_cpr(&self) -> u32 {
        self.lat_cpr
    }

    pub fn lon_cpr(&self) -> u32 {
        self.lon_cpr
    }

    pub fn format(&self) -> CprFormat {
        self.format
    }

    pub fn odd_format(&self) -> bool {
        self.format.is_odd()
    }

    pub fn resolution(&self) -> CprResolution {
        self.resolution
    }

    /// Nominal number of bits. This is 19 for surface positions, even though
    /// only 17 are transmitted.
    pub fn number_of_bits(&self) -> u8 {
        self.resolution.number_of_bits()
    }

    #[inline(always)]
    fn yz_xz_scaled(&self) -> [f64; 2] {
        let scale = self.resolution.scale();
        [f64::from(self.lat_cpr) / scale, f64::from(self.lon_cpr) / scale]
    }
}

/// Latitude and longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GlobalCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Number of longitude zones at a latitude.
pub fn n_l(lat: f64) -> u32 {
    let lat = lat.abs();
    if lat == 0.0 {
        59
    }
    else if lat == 87.0 {
        2
    }
    else if lat > 87.0 {
        1
    }
    else {
        let a = 1.0 - (FRAC_PI_2 / N_Z).cos();
        let b = (PI * lat / 180.0).cos().powi(2);
        (TAU / (1.0 - a / b).acos()).floor() as u32
    }
}

#[inline(always)]
fn fix_lat(mut lat: f64) -> f64 {
    if lat >= 270.0 {
        lat -= 360.0;
    }
    lat
}

/// Folds a latitude that went past a pole back into `[-90, 90]`.
#[inline(always)]
fn wrap_lat(lat: f64) -> f64 {
    if lat > 90.0 {
        180.0 - lat
    }
    else if lat < -90.0 {
        -180.0 - lat
    }
    else {
        lat
    }
}

/// Wraps a longitude into `[-180, 180)`.
#[inline(always)]
fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Angular distance between two longitudes.
#[inline(always)]
fn lon_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Encodes a position.
///
/// Positions exactly at a pole have no longitude and encode it as 0.
pub fn encode(
    position: GlobalCoordinate,
    format: CprFormat,
    resolution: CprResolution,
) -> CprCoordinate {
    let lat = position.latitude;
    let lon = position.longitude;
    let scale = resolution.scale();

    let d_lat = resolution.d_lat(format);
    let zone_lat = (lat / d_lat).floor();
    let yz = (scale * (lat / d_lat - zone_lat) + 0.5).floor();
    let r_lat = d_lat * (yz / scale + zone_lat);

    let xz = if r_lat.abs() >= 90.0 {
        0.0
    }
    else {
        let d_lon = resolution.d_lon(n_l(r_lat), format);
        (scale * (lon / d_lon - (lon / d_lon).floor()) + 0.5).floor()
    };

    CprCoordinate {
        lat_cpr: yz.rem_euclid(scale) as u32,
        lon_cpr: xz.rem_euclid(scale) as u32,
        format,
        resolution,
    }
}

/// Decodes a single CPR using a reference position.
///
/// The result is only correct if the reference position is close to the
/// actual position (see module documentation). A latitude zone that reaches
/// past a pole is folded back, so the result is always within `[-90, 90]`.
pub fn local_decode(cpr: CprCoordinate, reference: GlobalCoordinate) -> GlobalCoordinate {
    let resolution = cpr.resolution;
    let [yz, xz] = cpr.yz_xz_scaled();

    let d_lat = resolution.d_lat(cpr.format);
    // latitude zone index
    let j = (0.5 + reference.latitude / d_lat - yz).floor();
    let r_lat = wrap_lat(d_lat * (j + yz));

    let d_lon = resolution.d_lon(n_l(r_lat), cpr.format);
    // longitude zone index
    let m = (0.5 + reference.longitude / d_lon - xz).floor();
    let r_lon = wrap_lon(d_lon * (m + xz));

    GlobalCoordinate {
        latitude: r_lat,
        longitude: r_lon,
    }
}

/// Decodes a pair of CPRs with opposite formats.
///
/// The returned position is the one reported by `later`. Returns `None` if
/// both have the same format, if their resolutions differ, if the two
/// messages are from different longitude zones, or if surface positions are
/// decoded without a receiver position. The receiver position is only used to
/// resolve surface positions.
pub fn global_decode(
    early: CprCoordinate,
    later: CprCoordinate,
    receiver: Option<GlobalCoordinate>,
) -> Option<GlobalCoordinate> {
    if early.format == later.format || early.resolution != later.resolution {
        tracing::trace!(?early, ?later, "cpr pair can't be decoded globally");
        return None;
    }

    let resolution = later.resolution;
    let receiver = match resolution {
        CprResolution::Surface => Some(receiver?),
        _ => None,
    };

    let (even, odd) = match later.format {
        CprFormat::Even => (later, early),
        CprFormat::Odd => (early, later),
    };

    let [yz_even, xz_even] = even.yz_xz_scaled();
    let [yz_odd, xz_odd] = odd.yz_xz_scaled();

    let d_lat_even = resolution.d_lat(CprFormat::Even);
    let d_lat_odd = resolution.d_lat(CprFormat::Odd);

    // latitude zone index
    let j = (59.0 * yz_even - 60.0 * yz_odd + 0.5).floor();

    let mut r_lat_even = d_lat_even * (j.rem_euclid(60.0) + yz_even);
    let mut r_lat_odd = d_lat_odd * (j.rem_euclid(59.0) + yz_odd);

    if let Some(receiver) = receiver {
        // surface positions decode to the northern hemisphere. the southern
        // solution is 90 degrees further south.
        let pick = |lat: f64| {
            let south = lat - 90.0;
            if (lat - receiver.latitude).abs() <= (south - receiver.latitude).abs() {
                lat
            }
            else {
                south
            }
        };
        r_lat_even = pick(r_lat_even);
        r_lat_odd = pick(r_lat_odd);
    }
    else {
        r_lat_even = fix_lat(r_lat_even);
        r_lat_odd = fix_lat(r_lat_odd);
    }

    let nl_even = n_l(r_lat_even);
    let nl_odd = n_l(r_lat_odd);
    if nl_even != nl_odd {
        tracing::trace!(
            r_lat_even,
            r_lat_odd,
            nl_even,
            nl_odd,
            "cpr pair straddles a longitude zone boundary"
        );
        return None;
    }

    let (r_lat, xz) = match later.format {
        CprFormat::Even => (r_lat_even, xz_even),
        CprFormat::Odd => (r_lat_odd, xz_odd),
    };
    if !(-90.0..=90.0).contains(&r_lat) {
        return None;
    }

    let nl = f64::from(nl_even);
    let n = (nl - later.format.i()).max(1.0);
    let d_lon = resolution.d_lon(nl_even, later.format);

    // longitude zone index
    let m = (xz_even * (nl - 1.0) - xz_odd * nl + 0.5).floor();
    let r_lon = d_lon * (m.rem_euclid(n) + xz);

    let r_lon = if let Some(receiver) = receiver {
        // surface positions have 4 solutions, 90 degrees apart
        (0..4)
            .map(|k| wrap_lon(r_lon + f64::from(k) * 90.0))
            .min_by(|a, b| {
                lon_distance(*a, receiver.longitude).total_cmp(&lon_distance(*b, receiver.longitude))
            })
            .unwrap_or(r_lon)
    }
    else {
        wrap_lon(r_lon)
    };

    Some(GlobalCoordinate {
        latitude: r_lat,
        longitude: r_lon,
    })
}
