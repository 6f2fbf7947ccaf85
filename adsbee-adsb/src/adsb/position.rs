//! Airborne and surface position
//!
//! The CPR coordinates are kept encoded. Resolving them needs either a second
//! message or a reference position, see [`cpr`](crate::cpr).

use std::fmt::Debug;

use crate::{
    adsb::{
        Altitude,
        AltitudeType,
        SurveillanceStatus,
    },
    bits::Payload,
    cpr::{
        CprCoordinate,
        CprFormat,
        CprResolution,
    },
    gillham::{
        AltitudeEncoding,
        altitude_code_from_ac12,
        decode_altitude,
    },
};

/// Decodes the 12-bit altitude field at bits 8 to 19.
fn decode_altitude_field(payload: &Payload, altitude_type: AltitudeType) -> Option<Altitude> {
    let (code, encoding) = altitude_code_from_ac12(payload.bits(8, 12) as u16);
    match altitude_type {
        AltitudeType::Barometric => decode_altitude(code, encoding).map(Altitude::Barometric),
        // GNSS height is always in 25 ft increments
        AltitudeType::Gnss => decode_altitude(code, AltitudeEncoding::Q1).map(Altitude::Gnss),
    }
}

/// 17-bit latitude and longitude at bits 22 to 55.
fn decode_cpr(payload: &Payload, resolution: CprResolution) -> CprCoordinate {
    CprCoordinate::from_parts_unchecked(
        payload.bits(22, 17),
        payload.bits(39, 17),
        CprFormat::from_bit(payload.bit(21)),
        resolution,
    )
}

/// Airborne position (type codes 9 to 18 and 20 to 22)
///
/// 2.2.3.2.3
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AirbornePosition {
    pub surveillance_status: SurveillanceStatus,
    /// NIC supplement B. For TIS-B this bit is the IMF flag instead.
    pub nic_supplement_b: bool,
    pub altitude: Option<Altitude>,
    /// Position time is synchronized to UTC
    pub time: bool,
    pub cpr: CprCoordinate,
}

impl AirbornePosition {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0    5 7 8           20
        // field ttttt ssb aaaaaaaaaaaa t f llllllllllllllllll...
        //
        // altitude: 12 bits, Q bit at 15
        // cpr: f at 21, latitude 22..39, longitude 39..56

        let altitude_type = match payload.type_code() {
            20..=22 => AltitudeType::Gnss,
            _ => AltitudeType::Barometric,
        };

        Self {
            surveillance_status: SurveillanceStatus::from_bits(payload.bits(5, 2)),
            nic_supplement_b: payload.bit(7),
            altitude: decode_altitude_field(payload, altitude_type),
            time: payload.bit(20),
            cpr: decode_cpr(payload, CprResolution::Airborne),
        }
    }
}

/// Airborne position message without a position (type code 0).
///
/// Only the barometric altitude is available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoPosition {
    pub surveillance_status: SurveillanceStatus,
    pub altitude: Option<Altitude>,
}

impl NoPosition {
    pub fn decode(payload: &Payload) -> Self {
        Self {
            surveillance_status: SurveillanceStatus::from_bits(payload.bits(5, 2)),
            altitude: decode_altitude_field(payload, AltitudeType::Barometric),
        }
    }
}

/// Surface position (type codes 5 to 8)
///
/// 2.2.3.2.4
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePosition {
    pub movement: Option<Movement>,
    pub ground_track: Option<GroundTrack>,
    /// Position time is synchronized to UTC
    pub time: bool,
    pub cpr: CprCoordinate,
}

impl SurfacePosition {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0    5      12 13     20
        // field ttttt mmmmmmm s ggggggg t f llllllllllllllllll...

        Self {
            movement: Movement::decode(payload.bits(5, 7) as u8),
            ground_track: payload
                .bit(12)
                .then(|| GroundTrack::from_u8_unchecked(payload.bits(13, 7) as u8)),
            time: payload.bit(20),
            cpr: decode_cpr(payload, CprResolution::Surface),
        }
    }

    /// Surface positions don't carry a surveillance status.
    pub fn surveillance_status(&self) -> SurveillanceStatus {
        SurveillanceStatus::NoInformation
    }
}

/// Ground speed of a surface position
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Movement {
    /// Ground speed in knots
    Knots(f64),
    /// Ground speed is 175 kt or more
    Exceeding175Kt,
    /// The aircraft is reversing
    Reversing,
    Reserved(u8),
}

impl Movement {
    /// Decodes the 7-bit movement field. 0 means no information.
    pub fn decode(encoded: u8) -> Option<Self> {
        let movement = match MovementQuantization::from_encoded_value(encoded) {
            MovementQuantization::NotAvailable => return None,
            MovementQuantization::Quantized {
                encoded_base,
                decoded_base,
                decoded_step,
            } => Self::Knots(decoded_base + f64::from(encoded - encoded_base) * decoded_step),
            MovementQuantization::Exceeding175Kt => Self::Exceeding175Kt,
            MovementQuantization::Reversing => Self::Reversing,
            MovementQuantization::Reserved => Self::Reserved(encoded),
        };
        Some(movement)
    }

    pub fn knots(&self) -> Option<f64> {
        match self {
            Self::Knots(knots) => Some(*knots),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum MovementQuantization {
    NotAvailable,
    /// The speed in kt is `(encoded - encoded_base) * decoded_step +
    /// decoded_base`
    Quantized {
        encoded_base: u8,
        decoded_base: f64,
        decoded_step: f64,
    },
    Exceeding175Kt,
    Reversing,
    Reserved,
}

impl MovementQuantization {
    fn from_encoded_value(encoded: u8) -> Self {
        let quantized = |encoded_base, decoded_base, decoded_step| {
            Self::Quantized {
                encoded_base,
                decoded_base,
                decoded_step,
            }
        };

        match encoded {
            0 => Self::NotAvailable,
            1 => quantized(1, 0.0, 0.0),
            2 => quantized(2, 0.125, 0.0),
            3..=8 => quantized(2, 0.125, 0.875 / 6.0),
            9..=12 => quantized(8, 1.0, 0.25),
            13..=38 => quantized(12, 2.0, 0.5),
            39..=93 => quantized(38, 15.0, 1.0),
            94..=108 => quantized(93, 70.0, 2.0),
            109..=123 => quantized(108, 100.0, 5.0),
            124 => Self::Exceeding175Kt,
            127 => Self::Reversing,
            _ => Self::Reserved,
        }
    }
}

/// 7-bit ground track in units of 360/128 degrees, clockwise from true north.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroundTrack(u8);

impl GroundTrack {
    pub const fn from_u8_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn from_u8(byte: u8) -> Option<Self> {
        if byte & 0b10000000 == 0 {
            Some(Self(byte))
        }
        else {
            None
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn as_radians(&self) -> f64 {
        std::f64::consts::TAU * f64::from(self.0) / 128.0
    }

    pub fn as_degrees(&self) -> f64 {
        360.0 * f64::from(self.0) / 128.0
    }
}

impl Debug for GroundTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GroundTrack({:.1}°)", self.as_degrees())
    }
}
