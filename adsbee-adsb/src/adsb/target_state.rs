//! Target state and status (type code 29)
//!
//! The sub type selects between the DO-260A layout (version 1) and the
//! DO-260B layout (version 2). Both share the NACp, NIC baro and SIL fields at
//! the end of the message, everything else moves around.

use crate::{
    adsb::{
        EmergencyPriorityStatus,
        NacP,
        Sil,
        SilSupplement,
    },
    bits::Payload,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetStateAndStatus {
    /// Sub type 0
    Version1(TargetStateAndStatusV1),
    /// Sub type 1
    Version2(TargetStateAndStatusV2),
    Unknown { sub_type: u8 },
}

impl TargetStateAndStatus {
    pub fn decode(payload: &Payload) -> Self {
        let sub_type = payload.bits(5, 2) as u8;
        match sub_type {
            0 => Self::Version1(TargetStateAndStatusV1::decode(payload)),
            1 => Self::Version2(TargetStateAndStatusV2::decode(payload)),
            _ => Self::Unknown { sub_type },
        }
    }

    pub fn nac_p(&self) -> Option<NacP> {
        match self {
            Self::Version1(v1) => Some(v1.nac_p),
            Self::Version2(v2) => Some(v2.nac_p),
            Self::Unknown { .. } => None,
        }
    }
}

/// DO-260B 2.2.3.2.7.1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetStateAndStatusV2 {
    pub sil_supplement: SilSupplement,
    pub selected_altitude_type: SelectedAltitudeType,
    /// Selected altitude in feet
    pub selected_altitude: Option<i32>,
    pub barometric_pressure_setting: Option<BarometricPressureSetting>,
    pub selected_heading: Option<SelectedHeading>,
    pub nac_p: NacP,
    pub nic_baro: bool,
    pub sil: Sil,
    /// `None` if the mode bits aren't valid
    pub autopilot_modes: Option<AutopilotModes>,
    pub icao_mode_a_flag: bool,
    pub tcas_operational: bool,
}

impl TargetStateAndStatusV2 {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0    5  7 8 9          20       29 30       39   43 44 46 47 48 49 50 51 52 53
        // field ttttt ss a b ccccccccccc ddddddddd e fffffffff gggg h  ii j  k  l  m  n  o  p  q

        let selected_altitude = payload.bits(9, 11) as i32;
        let barometric_pressure_setting = payload.bits(20, 9) as u16;

        Self {
            sil_supplement: SilSupplement::from_bit(payload.bit(7)),
            selected_altitude_type: if payload.bit(8) {
                SelectedAltitudeType::Fms
            }
            else {
                SelectedAltitudeType::McpFcu
            },
            selected_altitude: (selected_altitude != 0).then(|| (selected_altitude - 1) * 32),
            barometric_pressure_setting: BarometricPressureSetting::from_u16(
                barometric_pressure_setting,
            ),
            selected_heading: payload
                .bit(29)
                .then(|| SelectedHeading(payload.bits(30, 9) as u16)),
            nac_p: NacP::from_u8_unchecked(payload.bits(39, 4) as u8),
            nic_baro: payload.bit(43),
            sil: Sil::from_u8_unchecked(payload.bits(44, 2) as u8),
            autopilot_modes: payload.bit(46).then(|| {
                AutopilotModes {
                    autopilot_engaged: payload.bit(47),
                    vnav_mode_engaged: payload.bit(48),
                    altitude_hold_mode: payload.bit(49),
                    approach_mode: payload.bit(51),
                    lnav_mode_engaged: payload.bit(53),
                }
            }),
            icao_mode_a_flag: payload.bit(50),
            tcas_operational: payload.bit(52),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectedAltitudeType {
    McpFcu,
    Fms,
}

/// 9-bit barometric pressure setting (minus 800 millibars).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BarometricPressureSetting(u16);

impl BarometricPressureSetting {
    /// Returns `None` for 0 (no data) or if the value is wider than 9 bits.
    pub const fn from_u16(word: u16) -> Option<Self> {
        if word == 0 || word & 0b1111111000000000 != 0 {
            None
        }
        else {
            Some(Self(word))
        }
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn as_millibars(&self) -> f64 {
        800.0 + f64::from(self.0 - 1) * 0.8
    }
}

/// 9-bit selected heading in units of 180/256 degrees
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectedHeading(u16);

impl SelectedHeading {
    pub const fn from_u16_unchecked(word: u16) -> Self {
        Self(word)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn as_degrees(&self) -> f64 {
        f64::from(self.0) * 180.0 / 256.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AutopilotModes {
    pub autopilot_engaged: bool,
    pub vnav_mode_engaged: bool,
    pub altitude_hold_mode: bool,
    pub approach_mode: bool,
    pub lnav_mode_engaged: bool,
}

/// DO-260A 2.2.3.2.7.1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetStateAndStatusV1 {
    pub vertical_data_source: TargetDataSource,
    pub target_altitude_type: TargetAltitudeType,
    pub backward_compatibility_flag: bool,
    pub target_altitude_capability: TargetAltitudeCapability,
    pub vertical_mode: ModeIndicator,
    /// Target altitude in feet
    pub target_altitude: Option<i32>,
    pub horizontal_data_source: TargetDataSource,
    /// Target heading or track angle in degrees
    pub target_heading: Option<u16>,
    pub heading_type: HeadingType,
    pub horizontal_mode: ModeIndicator,
    pub nac_p: NacP,
    pub nic_baro: bool,
    pub sil: Sil,
    pub tcas_operational: bool,
    pub tcas_ra_active: bool,
    pub emergency_priority_status: EmergencyPriorityStatus,
}

impl TargetStateAndStatusV1 {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0    5  7  9 10 11 13 15         25 27        36 37 39   43 44 46    51 52 53
        // field ttttt ss aa b c  dd ee ffffffffff gg hhhhhhhhh i  jj kkkk l  mm rrrrr n  o  ppp

        let target_altitude = payload.bits(15, 10) as i32;
        let target_heading = payload.bits(27, 9) as u16;

        Self {
            vertical_data_source: TargetDataSource::from_bits(payload.bits(7, 2)),
            target_altitude_type: if payload.bit(9) {
                TargetAltitudeType::MeanSeaLevel
            }
            else {
                TargetAltitudeType::FlightLevel
            },
            backward_compatibility_flag: payload.bit(10),
            target_altitude_capability: TargetAltitudeCapability::from_bits(payload.bits(11, 2)),
            vertical_mode: ModeIndicator::from_bits(payload.bits(13, 2)),
            // -1000 to 100000 ft, the remaining codes are invalid
            target_altitude: (target_altitude <= 1010).then(|| target_altitude * 100 - 1000),
            horizontal_data_source: TargetDataSource::from_bits(payload.bits(25, 2)),
            target_heading: (target_heading <= 359).then_some(target_heading),
            heading_type: if payload.bit(36) {
                HeadingType::Track
            }
            else {
                HeadingType::Heading
            },
            horizontal_mode: ModeIndicator::from_bits(payload.bits(37, 2)),
            nac_p: NacP::from_u8_unchecked(payload.bits(39, 4) as u8),
            nic_baro: payload.bit(43),
            sil: Sil::from_u8_unchecked(payload.bits(44, 2) as u8),
            tcas_operational: payload.bit(51),
            tcas_ra_active: payload.bit(52),
            emergency_priority_status: EmergencyPriorityStatus::from_u8_unchecked(
                payload.bits(53, 3) as u8,
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetDataSource {
    NoValidData,
    /// Autopilot control panel selected value
    McpFcu,
    /// Holding altitude, or maintaining current heading/track
    Holding,
    FmsRnav,
}

impl TargetDataSource {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::NoValidData,
            1 => Self::McpFcu,
            2 => Self::Holding,
            _ => Self::FmsRnav,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetAltitudeType {
    /// Referenced to pressure altitude
    FlightLevel,
    /// Referenced to barometric corrected altitude
    MeanSeaLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetAltitudeCapability {
    HoldingAltitudeOnly,
    HoldingOrAutopilot,
    HoldingOrAutopilotOrFms,
    Reserved,
}

impl TargetAltitudeCapability {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::HoldingAltitudeOnly,
            1 => Self::HoldingOrAutopilot,
            2 => Self::HoldingOrAutopilotOrFms,
            _ => Self::Reserved,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModeIndicator {
    NotAvailable,
    Acquiring,
    CapturingOrMaintaining,
    Reserved,
}

impl ModeIndicator {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::NotAvailable,
            1 => Self::Acquiring,
            2 => Self::CapturingOrMaintaining,
            _ => Self::Reserved,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingType {
    Heading,
    Track,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::{
        adsb::{
            EmergencyPriorityStatus,
            NacP,
            Sil,
            SilSupplement,
            target_state::{
                AutopilotModes,
                HeadingType,
                ModeIndicator,
                SelectedAltitudeType,
                TargetAltitudeCapability,
                TargetAltitudeType,
                TargetDataSource,
                TargetStateAndStatus,
            },
        },
        bits::{
            Payload,
            insert_uint,
        },
    };

    fn v1_payload(target_altitude: u32, target_heading: u32) -> Payload {
        let mut bytes = [0u8; 7];
        insert_uint(&mut bytes, 0, 5, 29);
        insert_uint(&mut bytes, 5, 2, 0);
        insert_uint(&mut bytes, 7, 2, 3);
        insert_uint(&mut bytes, 9, 1, 1);
        insert_uint(&mut bytes, 11, 2, 2);
        insert_uint(&mut bytes, 13, 2, 1);
        insert_uint(&mut bytes, 15, 10, target_altitude);
        insert_uint(&mut bytes, 25, 2, 1);
        insert_uint(&mut bytes, 27, 9, target_heading);
        insert_uint(&mut bytes, 36, 1, 1);
        insert_uint(&mut bytes, 37, 2, 2);
        insert_uint(&mut bytes, 39, 4, 8);
        insert_uint(&mut bytes, 43, 1, 1);
        insert_uint(&mut bytes, 44, 2, 2);
        insert_uint(&mut bytes, 51, 1, 1);
        insert_uint(&mut bytes, 52, 1, 0);
        insert_uint(&mut bytes, 53, 3, 1);
        Payload::new(bytes)
    }

    #[test]
    fn it_decodes_version_2() {
        // 8DA05629EA21485CBF3F8CADAEEB
        let payload = Payload::new([0xea, 0x21, 0x48, 0x5c, 0xbf, 0x3f, 0x8c]);
        let TargetStateAndStatus::Version2(target_state) = TargetStateAndStatus::decode(&payload)
        else {
            panic!("expected version 2");
        };

        assert_eq!(target_state.sil_supplement, SilSupplement::PerHour);
        assert_eq!(
            target_state.selected_altitude_type,
            SelectedAltitudeType::McpFcu
        );
        assert_eq!(target_state.selected_altitude, Some(16992));
        assert_abs_diff_eq!(
            target_state
                .barometric_pressure_setting
                .expect("no pressure setting")
                .as_millibars(),
            1012.8,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            target_state
                .selected_heading
                .expect("no heading")
                .as_degrees(),
            66.796875
        );
        assert_eq!(target_state.nac_p, NacP::GPS_SA_OFF);
        assert!(target_state.nic_baro);
        assert_eq!(target_state.sil, Sil::from_u8_unchecked(3));
        assert_eq!(
            target_state.autopilot_modes,
            Some(AutopilotModes {
                autopilot_engaged: true,
                vnav_mode_engaged: true,
                altitude_hold_mode: false,
                approach_mode: false,
                lnav_mode_engaged: true,
            })
        );
        assert!(!target_state.icao_mode_a_flag);
        assert!(target_state.tcas_operational);
    }

    #[test]
    fn it_decodes_version_2_sentinels() {
        let mut bytes = [0u8; 7];
        insert_uint(&mut bytes, 0, 5, 29);
        insert_uint(&mut bytes, 5, 2, 1);
        insert_uint(&mut bytes, 8, 1, 1);
        insert_uint(&mut bytes, 30, 9, 0x1ff);
        insert_uint(&mut bytes, 47, 3, 0b111);
        let TargetStateAndStatus::Version2(target_state) =
            TargetStateAndStatus::decode(&Payload::new(bytes))
        else {
            panic!("expected version 2");
        };

        assert_eq!(target_state.selected_altitude_type, SelectedAltitudeType::Fms);
        assert_eq!(target_state.selected_altitude, None);
        assert_eq!(target_state.barometric_pressure_setting, None);
        // heading status not set
        assert_eq!(target_state.selected_heading, None);
        // mode status not set
        assert_eq!(target_state.autopilot_modes, None);
    }

    #[test]
    fn it_decodes_version_1() {
        let payload = v1_payload(360, 270);
        let TargetStateAndStatus::Version1(target_state) = TargetStateAndStatus::decode(&payload)
        else {
            panic!("expected version 1");
        };

        assert_eq!(target_state.vertical_data_source, TargetDataSource::FmsRnav);
        assert_eq!(
            target_state.target_altitude_type,
            TargetAltitudeType::MeanSeaLevel
        );
        assert!(!target_state.backward_compatibility_flag);
        assert_eq!(
            target_state.target_altitude_capability,
            TargetAltitudeCapability::HoldingOrAutopilotOrFms
        );
        assert_eq!(target_state.vertical_mode, ModeIndicator::Acquiring);
        assert_eq!(target_state.target_altitude, Some(35000));
        assert_eq!(target_state.horizontal_data_source, TargetDataSource::McpFcu);
        assert_eq!(target_state.target_heading, Some(270));
        assert_eq!(target_state.heading_type, HeadingType::Track);
        assert_eq!(
            target_state.horizontal_mode,
            ModeIndicator::CapturingOrMaintaining
        );
        assert_eq!(target_state.nac_p, NacP::GPS_SA_ON);
        assert!(target_state.nic_baro);
        assert_eq!(target_state.sil, Sil::from_u8_unchecked(2));
        assert!(target_state.tcas_operational);
        assert!(!target_state.tcas_ra_active);
        assert_eq!(
            target_state.emergency_priority_status,
            EmergencyPriorityStatus::GENERAL_EMERGENCY
        );
    }

    #[test]
    fn it_decodes_version_1_target_altitude_range() {
        let target_altitude = |code| {
            match TargetStateAndStatus::decode(&v1_payload(code, 0)) {
                TargetStateAndStatus::Version1(target_state) => target_state.target_altitude,
                _ => panic!("expected version 1"),
            }
        };

        assert_eq!(target_altitude(0), Some(-1000));
        assert_eq!(target_altitude(10), Some(0));
        assert_eq!(target_altitude(11), Some(100));
        assert_eq!(target_altitude(1010), Some(100000));
        assert_eq!(target_altitude(1011), None);
        assert_eq!(target_altitude(1023), None);
    }

    #[test]
    fn it_rejects_invalid_version_1_headings() {
        let target_heading = |code| {
            match TargetStateAndStatus::decode(&v1_payload(0, code)) {
                TargetStateAndStatus::Version1(target_state) => target_state.target_heading,
                _ => panic!("expected version 1"),
            }
        };

        assert_eq!(target_heading(0), Some(0));
        assert_eq!(target_heading(359), Some(359));
        assert_eq!(target_heading(360), None);
        assert_eq!(target_heading(511), None);
    }

    #[test]
    fn it_keeps_unknown_sub_types() {
        let mut bytes = [0xffu8; 7];
        insert_uint(&mut bytes, 0, 5, 29);
        insert_uint(&mut bytes, 5, 2, 2);
        let target_state = TargetStateAndStatus::decode(&Payload::new(bytes));
        assert_eq!(target_state, TargetStateAndStatus::Unknown { sub_type: 2 });
        assert_eq!(target_state.nac_p(), None);
    }
}
