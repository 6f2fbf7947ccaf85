//! Coarse TIS-B airborne position (DF18, control field 6)
//!
//! Rebroadcast by ground stations with a reduced position resolution.

use std::fmt::Debug;

use crate::{
    adsb::{
        Altitude,
        SurveillanceStatus,
    },
    bits::Payload,
    cpr::{
        CprCoordinate,
        CprFormat,
        CprResolution,
    },
    gillham::{
        altitude_code_from_ac12,
        decode_altitude,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoarseTisbAirbornePosition {
    pub icao_mode_a_flag: bool,
    pub service_volume_id: u8,
    pub surveillance_status: SurveillanceStatus,
    pub altitude: Option<Altitude>,
    pub ground_track: Option<CoarseGroundTrack>,
    /// Ground speed in knots
    pub ground_speed: Option<u16>,
    pub cpr: CprCoordinate,
}

impl CoarseTisbAirbornePosition {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0 1   5  7           19 20   25     31 32          44
        // field a bbbb cc dddddddddddd e fffff gggggg h iiiiiiiiiiii jjjjjjjjjjjj
        //
        // d: altitude, Q bit at 14
        // i, j: 12-bit CPR latitude and longitude

        let (code, encoding) = altitude_code_from_ac12(payload.bits(7, 12) as u16);
        let ground_speed = payload.bits(25, 6) as u16;

        Self {
            icao_mode_a_flag: payload.bit(0),
            service_volume_id: payload.bits(1, 4) as u8,
            surveillance_status: SurveillanceStatus::from_bits(payload.bits(5, 2)),
            altitude: decode_altitude(code, encoding).map(Altitude::Barometric),
            ground_track: payload
                .bit(19)
                .then(|| CoarseGroundTrack(payload.bits(20, 5) as u8)),
            ground_speed: (ground_speed != 0).then(|| (ground_speed - 1) * 16),
            cpr: CprCoordinate::from_parts_unchecked(
                payload.bits(32, 12),
                payload.bits(44, 12),
                CprFormat::from_bit(payload.bit(31)),
                CprResolution::TisbCoarse,
            ),
        }
    }
}

/// 5-bit ground track in units of 11.25 degrees
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoarseGroundTrack(u8);

impl CoarseGroundTrack {
    pub const fn from_u8_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn as_degrees(&self) -> f64 {
        f64::from(self.0) * 11.25
    }
}

impl Debug for CoarseGroundTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CoarseGroundTrack({}°)", self.as_degrees())
    }
}
