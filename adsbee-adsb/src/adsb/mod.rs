//! ADS-B message bodies
//!
//! One module per message family. Each decoder is a pure function from the
//! 56-bit [`Payload`](crate::bits::Payload) to its message type. Bit offsets in
//! the layout diagrams are payload bits, the type code occupying bits 0 to 4.
//!
//! Reference: RTCA DO-260B, section 2.2.3.2

pub mod aircraft_status;
pub mod identification;
pub mod operational_status;
pub mod position;
pub mod target_state;
pub mod tisb;
pub mod velocity;

use std::fmt::Debug;

/// 5-bit ADS-B type code
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeCode(u8);

impl TypeCode {
    pub const NO_POSITION: Self = Self(0);
    pub const AIRBORNE_VELOCITY: Self = Self(19);
    pub const AIRCRAFT_STATUS: Self = Self(28);
    pub const TARGET_STATE_AND_STATUS: Self = Self(29);
    pub const AIRCRAFT_OPERATIONAL_STATUS: Self = Self(31);

    pub const fn from_u8_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn from_u8(byte: u8) -> Option<Self> {
        if byte & 0b11100000 == 0 {
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

impl Debug for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeCode({})", self.0)
    }
}

/// Classification of a message by its type code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageFormat {
    NoPosition,
    IdentificationAndCategory,
    SurfacePosition,
    AirbornePositionBarometric,
    AirborneVelocity,
    AirbornePositionGnss,
    TestMessage,
    SurfaceSystemStatus,
    Reserved,
    AircraftStatus,
    TargetStateAndStatus,
    AircraftOperationalCoordination,
    AircraftOperationalStatus,
    /// DF18 with control field 6 and type code 20
    CoarseTisbAirbornePosition,
}

impl MessageFormat {
    pub const ALL: [Self; 14] = [
        Self::NoPosition,
        Self::IdentificationAndCategory,
        Self::SurfacePosition,
        Self::AirbornePositionBarometric,
        Self::AirborneVelocity,
        Self::AirbornePositionGnss,
        Self::TestMessage,
        Self::SurfaceSystemStatus,
        Self::Reserved,
        Self::AircraftStatus,
        Self::TargetStateAndStatus,
        Self::AircraftOperationalCoordination,
        Self::AircraftOperationalStatus,
        Self::CoarseTisbAirbornePosition,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_type_code(type_code: TypeCode) -> Self {
        match type_code.0 {
            0 => Self::NoPosition,
            1..=4 => Self::IdentificationAndCategory,
            5..=8 => Self::SurfacePosition,
            9..=18 => Self::AirbornePositionBarometric,
            19 => Self::AirborneVelocity,
            20..=22 => Self::AirbornePositionGnss,
            23 => Self::TestMessage,
            24 => Self::SurfaceSystemStatus,
            28 => Self::AircraftStatus,
            29 => Self::TargetStateAndStatus,
            30 => Self::AircraftOperationalCoordination,
            31 => Self::AircraftOperationalStatus,
            _ => Self::Reserved,
        }
    }

    /// Position of this format in [`MessageFormat::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SurveillanceStatus {
    NoInformation,
    PermanentAlert,
    TemporaryAlert,
    SpecialPositionIdentification,
}

impl SurveillanceStatus {
    /// Only the lower 2 bits are used.
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::NoInformation,
            1 => Self::PermanentAlert,
            2 => Self::TemporaryAlert,
            _ => Self::SpecialPositionIdentification,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AltitudeType {
    Barometric,
    Gnss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Altitude {
    /// Barometric altitude in feet
    Barometric(i32),
    /// GNSS altitude in feet
    Gnss(i32),
}

impl Altitude {
    pub fn ty(&self) -> AltitudeType {
        match self {
            Altitude::Barometric(_) => AltitudeType::Barometric,
            Altitude::Gnss(_) => AltitudeType::Gnss,
        }
    }

    pub fn barometric(&self) -> Option<i32> {
        match self {
            Altitude::Barometric(altitude) => Some(*altitude),
            Altitude::Gnss(_) => None,
        }
    }

    pub fn gnss(&self) -> Option<i32> {
        match self {
            Altitude::Barometric(_) => None,
            Altitude::Gnss(altitude) => Some(*altitude),
        }
    }

    pub fn feet(&self) -> i32 {
        match self {
            Altitude::Barometric(altitude) => *altitude,
            Altitude::Gnss(altitude) => *altitude,
        }
    }
}

/// Navigation Accuracy Category for Position
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NacP(u8);

impl NacP {
    pub const UNKNOWN: Self = Self(0);
    pub const RNP_10: Self = Self(1);
    pub const RNP_4: Self = Self(2);
    pub const RNP_2: Self = Self(3);
    pub const RNP_1: Self = Self(4);
    pub const RNP_0_5: Self = Self(5);
    pub const RNP_0_3: Self = Self(6);
    pub const RNP_0_1: Self = Self(7);
    pub const GPS_SA_ON: Self = Self(8);
    pub const GPS_SA_OFF: Self = Self(9);
    pub const GPS_WAAS: Self = Self(10);
    pub const GPS_LAAS: Self = Self(11);

    pub const fn from_u8_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn from_u8(byte: u8) -> Option<Self> {
        if byte & 0b11110000 == 0 {
            Some(Self(byte))
        }
        else {
            None
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Estimated position uncertainty (95% bound) in meters, or `None` if
    /// unknown or reserved.
    pub fn estimated_position_uncertainty(&self) -> Option<f64> {
        match self.0 {
            1 => Some(18520.0),
            2 => Some(7408.0),
            3 => Some(3704.0),
            4 => Some(1852.0),
            5 => Some(926.0),
            6 => Some(555.6),
            7 => Some(185.2),
            8 => Some(92.6),
            9 => Some(30.0),
            10 => Some(10.0),
            11 => Some(3.0),
            _ => None,
        }
    }
}

impl Debug for NacP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::UNKNOWN => write!(f, "NacP::UNKNOWN"),
            Self::RNP_10 => write!(f, "NacP::RNP_10"),
            Self::RNP_4 => write!(f, "NacP::RNP_4"),
            Self::RNP_2 => write!(f, "NacP::RNP_2"),
            Self::RNP_1 => write!(f, "NacP::RNP_1"),
            Self::RNP_0_5 => write!(f, "NacP::RNP_0_5"),
            Self::RNP_0_3 => write!(f, "NacP::RNP_0_3"),
            Self::RNP_0_1 => write!(f, "NacP::RNP_0_1"),
            Self::GPS_SA_ON => write!(f, "NacP::GPS_SA_ON"),
            Self::GPS_SA_OFF => write!(f, "NacP::GPS_SA_OFF"),
            Self::GPS_WAAS => write!(f, "NacP::GPS_WAAS"),
            Self::GPS_LAAS => write!(f, "NacP::GPS_LAAS"),
            _ => write!(f, "NacP({})", self.0),
        }
    }
}

/// Navigation Accuracy Category for Velocity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NacV(u8);

impl NacV {
    pub const fn from_u8_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn from_u8(byte: u8) -> Option<Self> {
        if byte & 0b11111000 == 0 {
            Some(Self(byte))
        }
        else {
            None
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Horizontal velocity error in m/s.
    ///
    /// `10.0` means the error is unknown or at least 10 m/s. Negative values
    /// are upper bounds, e.g. `-3.0` means less than 3 m/s. Reserved codes
    /// return `None`.
    pub fn horizontal_error(&self) -> Option<f64> {
        match self.0 {
            0 => Some(10.0),
            1 => Some(-10.0),
            2 => Some(-3.0),
            3 => Some(-1.0),
            4 => Some(-0.3),
            _ => None,
        }
    }
}

/// Source Integrity Level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sil(u8);

impl Sil {
    pub const UNKNOWN: Self = Self(0);

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

/// Probability of exceeding the NIC radius of containment is based on
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SilSupplement {
    PerHour,
    PerSample,
}

impl SilSupplement {
    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::PerSample } else { Self::PerHour }
    }
}

/// 3-bit emergency/priority status, shared by aircraft status and target
/// state (version 1) messages.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmergencyPriorityStatus(u8);

impl EmergencyPriorityStatus {
    pub const NO_EMERGENCY: Self = Self(0);
    pub const GENERAL_EMERGENCY: Self = Self(1);
    pub const LIFEGUARD_MEDICAL_EMERGENCY: Self = Self(2);
    pub const MINIMUM_FUEL: Self = Self(3);
    pub const NO_COMMUNICATIONS: Self = Self(4);
    pub const UNLAWFUL_INTERFERENCE: Self = Self(5);
    pub const DOWNED_AIRCRAFT: Self = Self(6);
    pub const RESERVED: Self = Self(7);

    pub const fn from_u8_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn from_u8(byte: u8) -> Option<Self> {
        if byte & 0b11111000 == 0 {
            Some(Self(byte))
        }
        else {
            None
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn is_emergency(&self) -> bool {
        *self != Self::NO_EMERGENCY && *self != Self::RESERVED
    }
}

impl Debug for EmergencyPriorityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::NO_EMERGENCY => write!(f, "EmergencyPriorityStatus::NO_EMERGENCY"),
            Self::GENERAL_EMERGENCY => write!(f, "EmergencyPriorityStatus::GENERAL_EMERGENCY"),
            Self::LIFEGUARD_MEDICAL_EMERGENCY => {
                write!(f, "EmergencyPriorityStatus::LIFEGUARD_MEDICAL_EMERGENCY")
            }
            Self::MINIMUM_FUEL => write!(f, "EmergencyPriorityStatus::MINIMUM_FUEL"),
            Self::NO_COMMUNICATIONS => write!(f, "EmergencyPriorityStatus::NO_COMMUNICATIONS"),
            Self::UNLAWFUL_INTERFERENCE => {
                write!(f, "EmergencyPriorityStatus::UNLAWFUL_INTERFERENCE")
            }
            Self::DOWNED_AIRCRAFT => write!(f, "EmergencyPriorityStatus::DOWNED_AIRCRAFT"),
            _ => write!(f, "EmergencyPriorityStatus({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::adsb::{
        MessageFormat,
        NacV,
        SurveillanceStatus,
        TypeCode,
    };

    #[test]
    fn it_classifies_type_codes() {
        let format = |tc| MessageFormat::from_type_code(TypeCode::from_u8_unchecked(tc));
        assert_eq!(format(0), MessageFormat::NoPosition);
        assert_eq!(format(4), MessageFormat::IdentificationAndCategory);
        assert_eq!(format(5), MessageFormat::SurfacePosition);
        assert_eq!(format(18), MessageFormat::AirbornePositionBarometric);
        assert_eq!(format(19), MessageFormat::AirborneVelocity);
        assert_eq!(format(22), MessageFormat::AirbornePositionGnss);
        assert_eq!(format(26), MessageFormat::Reserved);
        assert_eq!(format(31), MessageFormat::AircraftOperationalStatus);
    }

    #[test]
    fn it_indexes_all_formats() {
        for (i, format) in MessageFormat::ALL.iter().enumerate() {
            assert_eq!(format.index(), i);
        }
    }

    #[test]
    fn it_rejects_wide_type_codes() {
        assert!(TypeCode::from_u8(31).is_some());
        assert!(TypeCode::from_u8(32).is_none());
    }

    #[test]
    fn it_decodes_surveillance_status() {
        assert_eq!(
            SurveillanceStatus::from_bits(0),
            SurveillanceStatus::NoInformation
        );
        assert_eq!(
            SurveillanceStatus::from_bits(3),
            SurveillanceStatus::SpecialPositionIdentification
        );
    }

    #[test]
    fn it_looks_up_nac_v() {
        let error = |v| NacV::from_u8_unchecked(v).horizontal_error();
        assert_eq!(error(0), Some(10.0));
        assert_eq!(error(1), Some(-10.0));
        assert_eq!(error(2), Some(-3.0));
        assert_eq!(error(3), Some(-1.0));
        assert_eq!(error(4), Some(-0.3));
        assert_eq!(error(5), None);
        assert_eq!(error(7), None);
    }
}
