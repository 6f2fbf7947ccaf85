//! Aircraft operational status (type code 31)
//!
//! 2.2.3.2.7.2
//!
//! The layout depends on the MOPS version (bits 40 to 42), which is decoded
//! before anything else. Version 0 only defines a few capability bits for
//! airborne participants. Versions 1 and 2 differ in the capability class
//! bits, the operational mode and some accuracy fields at the end.

use crate::{
    adsb::{
        NacP,
        NacV,
        Sil,
        SilSupplement,
    },
    bits::Payload,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AircraftOperationalStatus {
    Version0(OperationalStatusV0),
    Version1(OperationalStatusV1),
    Version2(OperationalStatusV2),
    /// Sub types other than airborne (0) and surface (1)
    Reserved { version: u8, sub_type: u8 },
    /// Versions 3 to 7
    Unknown { version: u8, sub_type: u8 },
}

impl AircraftOperationalStatus {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0    5   8                24               40  43
        // field ttttt sss cccccccccccccccc oooooooooooooooo vvv ...
        //
        // c: capability class, o: operational mode, v: version

        let version = payload.bits(40, 3) as u8;
        let sub_type = payload.bits(5, 3) as u8;

        match (version, sub_type) {
            (0, 0) => Self::Version0(OperationalStatusV0::decode(payload)),
            (1, 0) => {
                Self::Version1(OperationalStatusV1::Airborne(AirborneStatusV1::decode(
                    payload,
                )))
            }
            (1, 1) => {
                Self::Version1(OperationalStatusV1::Surface(SurfaceStatusV1::decode(payload)))
            }
            (2, 0) => {
                Self::Version2(OperationalStatusV2::Airborne(AirborneStatusV2::decode(
                    payload,
                )))
            }
            (2, 1) => {
                Self::Version2(OperationalStatusV2::Surface(SurfaceStatusV2::decode(payload)))
            }
            (0..=2, _) => Self::Reserved { version, sub_type },
            _ => Self::Unknown { version, sub_type },
        }
    }

    pub fn version(&self) -> u8 {
        match self {
            Self::Version0(_) => 0,
            Self::Version1(_) => 1,
            Self::Version2(_) => 2,
            Self::Reserved { version, .. } => *version,
            Self::Unknown { version, .. } => *version,
        }
    }
}

/// DO-260, airborne participants only
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationalStatusV0 {
    pub not_tcas: bool,
    pub cdti: bool,
}

impl OperationalStatusV0 {
    pub fn decode(payload: &Payload) -> Self {
        Self {
            not_tcas: payload.bit(10),
            cdti: payload.bit(11),
        }
    }
}

/// DO-260A
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationalStatusV1 {
    Airborne(AirborneStatusV1),
    Surface(SurfaceStatusV1),
}

/// DO-260B
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationalStatusV2 {
    Airborne(AirborneStatusV2),
    Surface(SurfaceStatusV2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AirborneStatusV1 {
    pub capability_class: AirborneCapabilityClassV1,
    /// `None` if the operational mode format isn't 0
    pub operational_mode: Option<OperationalModeV1>,
    pub nic_supplement_a: bool,
    pub nac_p: NacP,
    pub barometric_altitude_quality: u8,
    pub sil: Sil,
    pub nic_baro: bool,
    pub horizontal_reference_direction: HorizontalReferenceDirection,
}

impl AirborneStatusV1 {
    pub fn decode(payload: &Payload) -> Self {
        Self {
            capability_class: AirborneCapabilityClassV1 {
                tcas_operational: payload.bit(10),
                cdti: payload.bit(11),
                air_referenced_velocity: payload.bit(14),
                target_state: payload.bit(15),
                trajectory_change: TrajectoryChangeCapability::from_bits(payload.bits(16, 2)),
            },
            operational_mode: OperationalModeV1::decode(payload),
            nic_supplement_a: payload.bit(43),
            nac_p: decode_nac_p(payload),
            barometric_altitude_quality: payload.bits(48, 2) as u8,
            sil: decode_sil(payload),
            nic_baro: payload.bit(52),
            horizontal_reference_direction: HorizontalReferenceDirection::from_bit(
                payload.bit(53),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceStatusV1 {
    pub capability_class: SurfaceCapabilityClassV1,
    pub length_width: Option<LengthWidth>,
    pub operational_mode: Option<OperationalModeV1>,
    pub nic_supplement_a: bool,
    pub nac_p: NacP,
    pub sil: Sil,
    pub track_angle_heading: TrackAngleHeading,
    pub horizontal_reference_direction: HorizontalReferenceDirection,
}

impl SurfaceStatusV1 {
    pub fn decode(payload: &Payload) -> Self {
        Self {
            capability_class: SurfaceCapabilityClassV1 {
                position_offset_applied: payload.bit(10),
                cdti: payload.bit(11),
                b2_low: payload.bit(14),
            },
            length_width: LengthWidth::from_u8(payload.bits(20, 4) as u8),
            operational_mode: OperationalModeV1::decode(payload),
            nic_supplement_a: payload.bit(43),
            nac_p: decode_nac_p(payload),
            sil: decode_sil(payload),
            track_angle_heading: TrackAngleHeading::from_bit(payload.bit(52)),
            horizontal_reference_direction: HorizontalReferenceDirection::from_bit(
                payload.bit(53),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AirborneStatusV2 {
    pub capability_class: AirborneCapabilityClassV2,
    pub operational_mode: Option<OperationalModeV2>,
    pub nic_supplement_a: bool,
    pub nac_p: NacP,
    pub geometric_vertical_accuracy: GeometricVerticalAccuracy,
    pub sil: Sil,
    pub nic_baro: bool,
    pub horizontal_reference_direction: HorizontalReferenceDirection,
    pub sil_supplement: SilSupplement,
}

impl AirborneStatusV2 {
    pub fn decode(payload: &Payload) -> Self {
        Self {
            capability_class: AirborneCapabilityClassV2 {
                tcas_operational: payload.bit(10),
                es1090_in: payload.bit(11),
                air_referenced_velocity: payload.bit(14),
                target_state: payload.bit(15),
                trajectory_change: TrajectoryChangeCapability::from_bits(payload.bits(16, 2)),
                uat_in: payload.bit(18),
            },
            operational_mode: OperationalModeV2::decode(payload),
            nic_supplement_a: payload.bit(43),
            nac_p: decode_nac_p(payload),
            geometric_vertical_accuracy: GeometricVerticalAccuracy(payload.bits(48, 2) as u8),
            sil: decode_sil(payload),
            nic_baro: payload.bit(52),
            horizontal_reference_direction: HorizontalReferenceDirection::from_bit(
                payload.bit(53),
            ),
            sil_supplement: SilSupplement::from_bit(payload.bit(54)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceStatusV2 {
    pub capability_class: SurfaceCapabilityClassV2,
    pub length_width: Option<LengthWidth>,
    pub operational_mode: Option<OperationalModeV2>,
    /// `None` if the operational mode format isn't 0
    pub gps_antenna_offset: Option<GpsAntennaOffset>,
    pub nic_supplement_a: bool,
    pub nac_p: NacP,
    pub sil: Sil,
    pub track_angle_heading: TrackAngleHeading,
    pub horizontal_reference_direction: HorizontalReferenceDirection,
    pub sil_supplement: SilSupplement,
}

impl SurfaceStatusV2 {
    pub fn decode(payload: &Payload) -> Self {
        let operational_mode = OperationalModeV2::decode(payload);

        Self {
            capability_class: SurfaceCapabilityClassV2 {
                position_offset_applied: payload.bit(10),
                es1090_in: payload.bit(11),
                b2_low: payload.bit(14),
                uat_in: payload.bit(15),
                nac_v: NacV::from_u8_unchecked(payload.bits(16, 3) as u8),
                nic_supplement_c: payload.bit(19),
            },
            length_width: LengthWidth::from_u8(payload.bits(20, 4) as u8),
            operational_mode,
            gps_antenna_offset: operational_mode
                .map(|_| GpsAntennaOffset::from_u8(payload.bits(32, 8) as u8)),
            nic_supplement_a: payload.bit(43),
            nac_p: decode_nac_p(payload),
            sil: decode_sil(payload),
            track_angle_heading: TrackAngleHeading::from_bit(payload.bit(52)),
            horizontal_reference_direction: HorizontalReferenceDirection::from_bit(
                payload.bit(53),
            ),
            sil_supplement: SilSupplement::from_bit(payload.bit(54)),
        }
    }
}

fn decode_nac_p(payload: &Payload) -> NacP {
    NacP::from_u8_unchecked(payload.bits(44, 4) as u8)
}

fn decode_sil(payload: &Payload) -> Sil {
    Sil::from_u8_unchecked(payload.bits(50, 2) as u8)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AirborneCapabilityClassV1 {
    pub tcas_operational: bool,
    pub cdti: bool,
    pub air_referenced_velocity: bool,
    pub target_state: bool,
    pub trajectory_change: TrajectoryChangeCapability,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AirborneCapabilityClassV2 {
    pub tcas_operational: bool,
    pub es1090_in: bool,
    pub air_referenced_velocity: bool,
    pub target_state: bool,
    pub trajectory_change: TrajectoryChangeCapability,
    pub uat_in: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceCapabilityClassV1 {
    pub position_offset_applied: bool,
    pub cdti: bool,
    /// Class B2 ground vehicle transmitting with less than 70 watts
    pub b2_low: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceCapabilityClassV2 {
    pub position_offset_applied: bool,
    pub es1090_in: bool,
    /// Class B2 ground vehicle transmitting with less than 70 watts
    pub b2_low: bool,
    pub uat_in: bool,
    pub nac_v: NacV,
    pub nic_supplement_c: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrajectoryChangeCapability {
    NoCapability,
    SingleReport,
    MultipleReports,
    Reserved,
}

impl TrajectoryChangeCapability {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::NoCapability,
            1 => Self::SingleReport,
            2 => Self::MultipleReports,
            _ => Self::Reserved,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationalModeV1 {
    pub tcas_ra_active: bool,
    pub ident_switch_active: bool,
    pub receiving_atc_services: bool,
}

impl OperationalModeV1 {
    pub fn decode(payload: &Payload) -> Option<Self> {
        // bit   24 26 27 28
        // field 00 a  b  c  rest reserved

        (payload.bits(24, 2) == 0).then(|| {
            Self {
                tcas_ra_active: payload.bit(26),
                ident_switch_active: payload.bit(27),
                receiving_atc_services: payload.bit(28),
            }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationalModeV2 {
    pub tcas_ra_active: bool,
    pub ident_switch_active: bool,
    pub reserved_atc: bool,
    pub single_antenna_flag: bool,
    pub system_design_assurance: SystemDesignAssurance,
}

impl OperationalModeV2 {
    pub fn decode(payload: &Payload) -> Option<Self> {
        // bit   24 26 27 28 29 30
        // field 00 a  b  c  d  ee gggggggg
        //
        // g: GPS antenna offset (surface), reserved (airborne)

        (payload.bits(24, 2) == 0).then(|| {
            Self {
                tcas_ra_active: payload.bit(26),
                ident_switch_active: payload.bit(27),
                reserved_atc: payload.bit(28),
                single_antenna_flag: payload.bit(29),
                system_design_assurance: SystemDesignAssurance(payload.bits(30, 2) as u8),
            }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SystemDesignAssurance(u8);

impl SystemDesignAssurance {
    pub const NONE: Self = Self(0);
    pub const D: Self = Self(1);
    pub const C: Self = Self(2);
    pub const B: Self = Self(3);

    pub const fn from_u8_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn from_u8(byte: u8) -> Option<Self> {
        if byte & 0b11111100 == 0 {
            Some(Self(byte))
        }
        else {
            None
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

/// Geometric vertical accuracy
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeometricVerticalAccuracy(u8);

impl GeometricVerticalAccuracy {
    pub const fn from_u8_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// 95% vertical accuracy bound in meters. `None` if unknown or more than
    /// 150 m, and for the reserved code.
    pub fn vertical_accuracy(&self) -> Option<f64> {
        match self.0 {
            1 => Some(150.0),
            2 => Some(45.0),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HorizontalReferenceDirection {
    TrueNorth,
    MagneticNorth,
}

impl HorizontalReferenceDirection {
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Self::MagneticNorth
        }
        else {
            Self::TrueNorth
        }
    }
}

/// What the ground track field of surface position messages reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackAngleHeading {
    TrackAngle,
    Heading,
}

impl TrackAngleHeading {
    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::Heading } else { Self::TrackAngle }
    }
}

/// Aircraft/vehicle length and width code
///
/// 2.2.3.2.7.2.11
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LengthWidth(u8);

impl LengthWidth {
    /// Returns `None` for 0 (no data) and values wider than 4 bits.
    pub const fn from_u8(byte: u8) -> Option<Self> {
        if byte == 0 || byte & 0b11110000 != 0 {
            None
        }
        else {
            Some(Self(byte))
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Upper bounds of length and width in meters.
    pub fn dimensions(&self) -> Dimensions {
        let (length, width) = match self.0 {
            1 => (15.0, 23.0),
            2 => (25.0, 28.5),
            3 => (25.0, 34.0),
            4 => (35.0, 33.0),
            5 => (35.0, 38.0),
            6 => (45.0, 39.5),
            7 => (45.0, 45.0),
            8 => (55.0, 45.0),
            9 => (55.0, 52.0),
            10 => (65.0, 59.5),
            11 => (65.0, 67.0),
            12 => (75.0, 72.5),
            13 => (75.0, 80.0),
            14 => (85.0, 80.0),
            _ => (85.0, 90.0),
        };
        Dimensions { length, width }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Length in meters
    pub length: f64,
    /// Width in meters
    pub width: f64,
}

/// 2.2.3.2.7.2.4.7
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GpsAntennaOffset(u8);

impl GpsAntennaOffset {
    pub const fn from_u8(byte: u8) -> Self {
        Self(byte)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Lateral distance of the antenna from the longitudinal axis of the
    /// aircraft in meters. Negative values are left of the axis.
    pub fn lateral(&self) -> Option<i8> {
        // bit   0 12
        // field a bb   a: direction (right when set), b: distance / 2
        let encoded = (self.0 >> 5) as i8;
        match encoded {
            0 => None,
            1..=3 => Some(-encoded * 2),
            _ => Some((encoded - 4) * 2),
        }
    }

    /// Longitudinal distance of the antenna from the nose of the aircraft.
    pub fn longitudinal(&self) -> Option<LongitudinalOffset> {
        match self.0 & 0b11111 {
            0 => None,
            1 => Some(LongitudinalOffset::AppliedBySensor),
            encoded => Some(LongitudinalOffset::Meters((encoded - 1) * 2)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LongitudinalOffset {
    AppliedBySensor,
    Meters(u8),
}
