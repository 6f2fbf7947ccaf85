//! Aircraft status (type code 28)
//!
//! 2.2.3.2.7.8

use adsbee_types::{
    IcaoAddress,
    Squawk,
};
use bitflags::bitflags;

use crate::{
    adsb::EmergencyPriorityStatus,
    bits::Payload,
    gillham::{
        AltitudeEncoding,
        altitude_code_from_ac13,
        decode_altitude,
        squawk_from_id13,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AircraftStatus {
    EmergencyPriorityStatusAndModeACode(EmergencyPriorityStatusAndModeACode),
    TcasResolutionAdvisory(TcasResolutionAdvisory),
    Reserved { sub_type: u8 },
}

impl AircraftStatus {
    pub fn decode(payload: &Payload) -> Self {
        let sub_type = payload.bits(5, 3) as u8;

        match sub_type {
            1 => {
                Self::EmergencyPriorityStatusAndModeACode(
                    EmergencyPriorityStatusAndModeACode::decode(payload),
                )
            }
            2 => Self::TcasResolutionAdvisory(TcasResolutionAdvisory::decode(payload)),
            _ => Self::Reserved { sub_type },
        }
    }
}

/// 2.2.3.2.7.8.1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EmergencyPriorityStatusAndModeACode {
    pub emergency_priority_status: EmergencyPriorityStatus,
    /// `None` if the identity code is all zeros
    pub mode_a_code: Option<Squawk>,
}

impl EmergencyPriorityStatusAndModeACode {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0    5  8  11            24
        // field ttttt sss aaa bbbbbbbbbbbbb
        // rest is reserved

        let code = payload.bits(11, 13) as u16;

        Self {
            emergency_priority_status: EmergencyPriorityStatus::from_u8_unchecked(
                payload.bits(8, 3) as u8,
            ),
            mode_a_code: (code != 0).then(|| squawk_from_id13(code)),
        }
    }
}

/// 2.2.3.2.7.8.2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TcasResolutionAdvisory {
    pub active_resolution_advisories: ActiveResolutionAdvisories,
    pub racs_record: RacsRecord,
    pub ra_terminated: bool,
    pub multiple_threat_encounter: bool,
    pub threat_type_indicator: ThreatTypeIndicator,
    pub threat_identity: Option<ThreatIdentity>,
}

impl TcasResolutionAdvisory {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0    5  8 9            22   26 27 28 30
        // field ttttt sss a bbbbbbbbbbbbb cccc d  e  ff gggggggggggggggggggggggggg
        //
        // g: threat identity data, depends on f

        let a = payload.bit(8);
        let b = payload.bits(9, 13) as u16;
        let threat_type_indicator = ThreatTypeIndicator(payload.bits(28, 2) as u8);

        let threat_identity = match threat_type_indicator {
            ThreatTypeIndicator::ICAO_ADDRESS => {
                Some(ThreatIdentity::Address(IcaoAddress::from_u32_unchecked(
                    payload.bits(30, 24),
                )))
            }
            ThreatTypeIndicator::ALTITUDE_RANGE_BEARING => {
                let altitude = altitude_code_from_ac13(payload.bits(30, 13) as u16);
                let range = payload.bits(43, 7) as u8;
                let bearing = payload.bits(50, 6) as u8;

                Some(ThreatIdentity::Position {
                    altitude: decode_altitude(altitude, AltitudeEncoding::Gillham),
                    range: ThreatRange::from_u8(range),
                    bearing: ThreatBearing::from_u8(bearing),
                })
            }
            _ => None,
        };

        Self {
            active_resolution_advisories: if a {
                ActiveResolutionAdvisories::SingleThreat(b)
            }
            else {
                ActiveResolutionAdvisories::MultipleThreats(b)
            },
            racs_record: RacsRecord::from_bits_retain(payload.bits(22, 4) as u8),
            ra_terminated: payload.bit(26),
            multiple_threat_encounter: payload.bit(27),
            threat_type_indicator,
            threat_identity,
        }
    }
}

/// The 13 ARA bits following the first one, which tells how to read them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActiveResolutionAdvisories {
    SingleThreat(u16),
    MultipleThreats(u16),
}

impl ActiveResolutionAdvisories {
    pub fn bits(&self) -> u16 {
        match self {
            Self::SingleThreat(bits) => *bits,
            Self::MultipleThreats(bits) => *bits,
        }
    }
}

bitflags! {
    /// Resolution advisory complements record
    ///
    /// 4 bits, each one a restriction on the manoeuvres of the threat.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct RacsRecord: u8 {
        const DO_NOT_PASS_BELOW = 0b1000;
        const DO_NOT_PASS_ABOVE = 0b0100;
        const DO_NOT_TURN_LEFT = 0b0010;
        const DO_NOT_TURN_RIGHT = 0b0001;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreatTypeIndicator(u8);

impl ThreatTypeIndicator {
    pub const NO_IDENTITY_DATA: Self = Self(0);
    pub const ICAO_ADDRESS: Self = Self(1);
    pub const ALTITUDE_RANGE_BEARING: Self = Self(2);
    pub const NOT_ASSIGNED: Self = Self(3);

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

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThreatIdentity {
    Address(IcaoAddress),
    Position {
        /// Barometric altitude of the threat in feet
        altitude: Option<i32>,
        range: Option<ThreatRange>,
        bearing: Option<ThreatBearing>,
    },
}

/// 7-bit range to the threat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreatRange(u8);

impl ThreatRange {
    /// Returns `None` for 0 (no range estimate).
    pub const fn from_u8(byte: u8) -> Option<Self> {
        if byte == 0 || byte & 0b10000000 != 0 {
            None
        }
        else {
            Some(Self(byte))
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Range is more than 12.55 nmi
    pub fn is_exceeded(&self) -> bool {
        self.0 == 127
    }

    /// Range in nautical miles, or `None` if exceeded.
    pub fn as_nautical_miles(&self) -> Option<f64> {
        (!self.is_exceeded()).then(|| f64::from(self.0 - 1) / 10.0 + 0.05)
    }
}

/// 6-bit bearing to the threat, relative to the own aircraft's heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreatBearing(u8);

impl ThreatBearing {
    /// Returns `None` for 0 (no bearing estimate) and the unused codes 61 to
    /// 63.
    pub const fn from_u8(byte: u8) -> Option<Self> {
        if byte == 0 || byte > 60 {
            None
        }
        else {
            Some(Self(byte))
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Lower bound of the 6 degree bearing interval.
    pub fn as_degrees(&self) -> u16 {
        u16::from(self.0 - 1) * 6
    }
}

#[cfg(test)]
mod tests {
    use adsbee_types::{
        IcaoAddress,
        Squawk,
    };
    use approx::assert_abs_diff_eq;

    use crate::{
        adsb::{
            EmergencyPriorityStatus,
            aircraft_status::{
                ActiveResolutionAdvisories,
                AircraftStatus,
                RacsRecord,
                ThreatIdentity,
                ThreatTypeIndicator,
            },
        },
        bits::{
            Payload,
            insert_uint,
        },
    };

    fn tcas_payload(threat_type_indicator: u32, threat_identity: u32) -> Payload {
        let mut bytes = [0u8; 7];
        insert_uint(&mut bytes, 0, 5, 28);
        insert_uint(&mut bytes, 5, 3, 2);
        insert_uint(&mut bytes, 8, 1, 1);
        insert_uint(&mut bytes, 9, 13, 0b1_0000_0000_0001);
        insert_uint(&mut bytes, 22, 4, 0b0100);
        insert_uint(&mut bytes, 26, 1, 1);
        insert_uint(&mut bytes, 28, 2, threat_type_indicator);
        insert_uint(&mut bytes, 30, 26, threat_identity);
        Payload::new(bytes)
    }

    #[test]
    fn it_decodes_emergency_status() {
        // 8da2c1bde1028b000000000bb2c4 (ME only)
        let payload = Payload::new([0xe1, 0x02, 0x8b, 0x00, 0x00, 0x00, 0x00]);
        match AircraftStatus::decode(&payload) {
            AircraftStatus::EmergencyPriorityStatusAndModeACode(status) => {
                assert_eq!(
                    status.emergency_priority_status,
                    EmergencyPriorityStatus::NO_EMERGENCY
                );
                assert_eq!(status.mode_a_code, Some(Squawk::from_u16_unchecked(0o6604)));
            }
            status => panic!("unexpected aircraft status: {status:?}"),
        }

        let payload = Payload::new([0xe1, 0x65, 0xe5, 0xc1, 0x82, 0x51, 0x96]);
        match AircraftStatus::decode(&payload) {
            AircraftStatus::EmergencyPriorityStatusAndModeACode(status) => {
                assert_eq!(
                    status.emergency_priority_status,
                    EmergencyPriorityStatus::MINIMUM_FUEL
                );
                assert_eq!(status.mode_a_code, Some(Squawk::from_u16_unchecked(0o4166)));
            }
            status => panic!("unexpected aircraft status: {status:?}"),
        }
    }

    #[test]
    fn it_decodes_absent_mode_a_code() {
        let payload = Payload::new([0xe1, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00]);
        match AircraftStatus::decode(&payload) {
            AircraftStatus::EmergencyPriorityStatusAndModeACode(status) => {
                assert_eq!(
                    status.emergency_priority_status,
                    EmergencyPriorityStatus::GENERAL_EMERGENCY
                );
                assert_eq!(status.mode_a_code, None);
            }
            status => panic!("unexpected aircraft status: {status:?}"),
        }
    }

    #[test]
    fn it_decodes_tcas_threat_address() {
        let payload = tcas_payload(1, 0x4840d6 << 2);
        let AircraftStatus::TcasResolutionAdvisory(advisory) = AircraftStatus::decode(&payload)
        else {
            panic!("expected TCAS RA");
        };

        assert_eq!(
            advisory.active_resolution_advisories,
            ActiveResolutionAdvisories::SingleThreat(0b1_0000_0000_0001)
        );
        assert!(advisory.racs_record.contains(RacsRecord::DO_NOT_PASS_ABOVE));
        assert!(!advisory.racs_record.contains(RacsRecord::DO_NOT_PASS_BELOW));
        assert_eq!(advisory.racs_record, RacsRecord::DO_NOT_PASS_ABOVE);
        assert!(advisory.ra_terminated);
        assert!(!advisory.multiple_threat_encounter);
        assert_eq!(
            advisory.threat_type_indicator,
            ThreatTypeIndicator::ICAO_ADDRESS
        );
        assert_eq!(
            advisory.threat_identity,
            Some(ThreatIdentity::Address(IcaoAddress::from_u32_unchecked(
                0x4840d6
            )))
        );
    }

    #[test]
    fn it_decodes_tcas_threat_position() {
        // altitude 5800 (9100 ft), range 21, bearing 16
        let payload = tcas_payload(2, (5800 << 13) | (21 << 6) | 16);
        let AircraftStatus::TcasResolutionAdvisory(advisory) = AircraftStatus::decode(&payload)
        else {
            panic!("expected TCAS RA");
        };

        let Some(ThreatIdentity::Position {
            altitude,
            range,
            bearing,
        }) = advisory.threat_identity
        else {
            panic!("expected threat position");
        };
        assert_eq!(altitude, Some(9100));
        let range = range.expect("no range");
        assert!(!range.is_exceeded());
        assert_abs_diff_eq!(range.as_nautical_miles().unwrap(), 2.05, epsilon = 1e-9);
        assert_eq!(bearing.expect("no bearing").as_degrees(), 90);
    }

    #[test]
    fn it_handles_tcas_sentinels() {
        let payload = tcas_payload(2, (127 << 6) | 61);
        let AircraftStatus::TcasResolutionAdvisory(advisory) = AircraftStatus::decode(&payload)
        else {
            panic!("expected TCAS RA");
        };
        let Some(ThreatIdentity::Position {
            altitude,
            range,
            bearing,
        }) = advisory.threat_identity
        else {
            panic!("expected threat position");
        };
        assert_eq!(altitude, None);
        let range = range.expect("no range");
        assert!(range.is_exceeded());
        assert_eq!(range.as_nautical_miles(), None);
        assert_eq!(bearing, None);

        // no threat identity data
        for tti in [0, 3] {
            let payload = tcas_payload(tti, 0x3ffffff);
            let AircraftStatus::TcasResolutionAdvisory(advisory) =
                AircraftStatus::decode(&payload)
            else {
                panic!("expected TCAS RA");
            };
            assert_eq!(advisory.threat_identity, None);
        }
    }

    #[test]
    fn it_keeps_reserved_sub_types() {
        let payload = Payload::new([0xe3, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(
            AircraftStatus::decode(&payload),
            AircraftStatus::Reserved { sub_type: 3 }
        );
    }
}
