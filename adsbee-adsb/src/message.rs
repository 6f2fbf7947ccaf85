//! Input and output of the [`Translator`](crate::translator::Translator).

use std::fmt::Debug;

use adsbee_types::IcaoAddress;
use bytes::Bytes;

use crate::{
    adsb::{
        MessageFormat,
        SurveillanceStatus,
        TypeCode,
        aircraft_status::AircraftStatus,
        identification::IdentificationAndCategory,
        operational_status::AircraftOperationalStatus,
        position::{
            AirbornePosition,
            NoPosition,
            SurfacePosition,
        },
        target_state::TargetStateAndStatus,
        tisb::CoarseTisbAirbornePosition,
        velocity::AirborneVelocity,
    },
    cpr::CprCoordinate,
};

/// Downlink format
///
/// First 5 bits of a Mode S frame determine the kind of frame.
///
/// # Exception
///
/// [`CommD`][Self::CommD] is determined only by the first 2 bits, which must
/// both be 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DownlinkFormat {
    ShortAirAirSurveillance,
    SurveillanceAltitudeReply,
    SurveillanceIdentityReply,
    AllCallReply,
    LongAirAirSurveillance,
    ExtendedSquitter,
    ExtendedSquitterNonTransponder,
    MilitaryExtendedSquitter,
    CommBAltitudeReply,
    CommBIdentityReply,
    MilitaryUse,
    CommD,
}

impl DownlinkFormat {
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::ShortAirAirSurveillance),
            4 => Some(Self::SurveillanceAltitudeReply),
            5 => Some(Self::SurveillanceIdentityReply),
            11 => Some(Self::AllCallReply),
            16 => Some(Self::LongAirAirSurveillance),
            17 => Some(Self::ExtendedSquitter),
            18 => Some(Self::ExtendedSquitterNonTransponder),
            19 => Some(Self::MilitaryExtendedSquitter),
            20 => Some(Self::CommBAltitudeReply),
            21 => Some(Self::CommBIdentityReply),
            22 => Some(Self::MilitaryUse),
            24..=31 => Some(Self::CommD),
            _ => None,
        }
    }

    /// Whether this downlink format can carry an ADS-B payload.
    pub fn is_extended_squitter(&self) -> bool {
        matches!(
            self,
            Self::ExtendedSquitter
                | Self::ExtendedSquitterNonTransponder
                | Self::MilitaryExtendedSquitter
        )
    }
}

/// 3-bit control field of DF18
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlField(u8);

impl ControlField {
    pub const ADSB_WITH_ICAO_ADDRESS: Self = Self(0);
    pub const ADSB_WITH_NON_ICAO_ADDRESS: Self = Self(1);
    pub const FINE_TISB_WITH_ICAO_ADDRESS: Self = Self(2);
    pub const COARSE_TISB_WITH_ICAO_ADDRESS: Self = Self(3);
    pub const TISB_AND_ADSR_MANAGEMENT: Self = Self(4);
    pub const FINE_TISB_WITH_NON_ICAO_ADDRESS: Self = Self(5);
    pub const REBROADCAST: Self = Self(6);
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

    /// Fine TIS-B messages carry the IMF bit in some of the ADS-B messages.
    pub fn is_fine_tisb(&self) -> bool {
        *self == Self::FINE_TISB_WITH_ICAO_ADDRESS || *self == Self::FINE_TISB_WITH_NON_ICAO_ADDRESS
    }
}

impl Debug for ControlField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::ADSB_WITH_ICAO_ADDRESS => write!(f, "ControlField::ADSB_WITH_ICAO_ADDRESS"),
            Self::ADSB_WITH_NON_ICAO_ADDRESS => {
                write!(f, "ControlField::ADSB_WITH_NON_ICAO_ADDRESS")
            }
            Self::FINE_TISB_WITH_ICAO_ADDRESS => {
                write!(f, "ControlField::FINE_TISB_WITH_ICAO_ADDRESS")
            }
            Self::COARSE_TISB_WITH_ICAO_ADDRESS => {
                write!(f, "ControlField::COARSE_TISB_WITH_ICAO_ADDRESS")
            }
            Self::TISB_AND_ADSR_MANAGEMENT => write!(f, "ControlField::TISB_AND_ADSR_MANAGEMENT"),
            Self::FINE_TISB_WITH_NON_ICAO_ADDRESS => {
                write!(f, "ControlField::FINE_TISB_WITH_NON_ICAO_ADDRESS")
            }
            Self::REBROADCAST => write!(f, "ControlField::REBROADCAST"),
            _ => write!(f, "ControlField({})", self.0),
        }
    }
}

/// 3-bit application field of DF19
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApplicationField(u8);

impl ApplicationField {
    pub const ADSB: Self = Self(0);

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
}

/// A message as received, with the ADS-B payload still encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMessage {
    pub downlink_format: DownlinkFormat,
    /// Only used with DF18
    pub control_field: Option<ControlField>,
    /// Only used with DF19
    pub application_field: Option<ApplicationField>,
    pub address_announced: Option<IcaoAddress>,
    /// The 7-byte ME field
    pub payload: Option<Bytes>,
}

impl RawMessage {
    /// Creates a DF17 message.
    pub fn extended_squitter(address_announced: IcaoAddress, payload: impl Into<Bytes>) -> Self {
        Self {
            downlink_format: DownlinkFormat::ExtendedSquitter,
            control_field: None,
            application_field: None,
            address_announced: Some(address_announced),
            payload: Some(payload.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecodedMessage {
    pub raw: RawMessage,
    pub type_code: TypeCode,
    pub message_format: MessageFormat,
    /// Only present for TIS-B messages.
    pub icao_mode_a_flag: Option<bool>,
    pub body: MessageBody,
}

impl DecodedMessage {
    pub fn surveillance_status(&self) -> Option<SurveillanceStatus> {
        match &self.body {
            MessageBody::NoPosition(body) => Some(body.surveillance_status),
            MessageBody::AirbornePosition(body) => Some(body.surveillance_status),
            MessageBody::SurfacePosition(body) => Some(body.surveillance_status()),
            MessageBody::CoarseTisbAirbornePosition(body) => Some(body.surveillance_status),
            _ => None,
        }
    }

    /// The still encoded position, if this is a position message.
    pub fn cpr(&self) -> Option<CprCoordinate> {
        match &self.body {
            MessageBody::AirbornePosition(body) => Some(body.cpr),
            MessageBody::SurfacePosition(body) => Some(body.cpr),
            MessageBody::CoarseTisbAirbornePosition(body) => Some(body.cpr),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MessageBody {
    NoPosition(NoPosition),
    IdentificationAndCategory(IdentificationAndCategory),
    SurfacePosition(SurfacePosition),
    AirbornePosition(AirbornePosition),
    AirborneVelocity(AirborneVelocity),
    AircraftStatus(AircraftStatus),
    TargetStateAndStatus(TargetStateAndStatus),
    AircraftOperationalStatus(AircraftOperationalStatus),
    CoarseTisbAirbornePosition(CoarseTisbAirbornePosition),
}

#[cfg(test)]
mod tests {
    use crate::message::{
        ControlField,
        DownlinkFormat,
    };

    #[test]
    fn it_maps_downlink_formats() {
        assert_eq!(
            DownlinkFormat::from_u8(17),
            Some(DownlinkFormat::ExtendedSquitter)
        );
        assert_eq!(DownlinkFormat::from_u8(27), Some(DownlinkFormat::CommD));
        assert_eq!(DownlinkFormat::from_u8(1), None);
        assert!(DownlinkFormat::MilitaryExtendedSquitter.is_extended_squitter());
        assert!(!DownlinkFormat::CommBAltitudeReply.is_extended_squitter());
    }

    #[test]
    fn it_identifies_fine_tisb() {
        assert!(ControlField::from_u8_unchecked(2).is_fine_tisb());
        assert!(ControlField::from_u8_unchecked(5).is_fine_tisb());
        assert!(!ControlField::REBROADCAST.is_fine_tisb());
        assert_eq!(ControlField::from_u8(8), None);
    }
}
