//! Airborne velocity (type code 19)
//!
//! 2.2.3.2.6

use std::f64::consts::TAU;

use crate::{
    adsb::NacV,
    bits::Payload,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AirborneVelocity {
    pub sub_type: VelocitySubType,
    /// `None` for unknown sub types
    pub details: Option<VelocityDetails>,
}

impl AirborneVelocity {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0    5  8 9 10  13 14         24 25         35 36 37         46 48 49
        // field ttttt sss a b ccc d eeeeeeeeee f gggggggggg h i jjjjjjjjj kk l mmmmmmm
        //
        // sub type specific: d e f g

        let sub_type = VelocitySubType::from_u8(payload.bits(5, 3) as u8);
        let supersonic = sub_type.is_supersonic();

        let d = payload.bit(13);
        let e = payload.bits(14, 10) as u16;
        let f = payload.bit(24);
        let g = payload.bits(25, 10) as u16;

        let velocity = match sub_type {
            VelocitySubType::GroundSpeedSubsonic | VelocitySubType::GroundSpeedSupersonic => {
                VelocityType::GroundSpeed(VectorVelocity {
                    direction_east_west: if d {
                        DirectionEastWest::EastToWest
                    }
                    else {
                        DirectionEastWest::WestToEast
                    },
                    east_west: Speed::decode(e, supersonic),
                    direction_north_south: if f {
                        DirectionNorthSouth::NorthToSouth
                    }
                    else {
                        DirectionNorthSouth::SouthToNorth
                    },
                    north_south: Speed::decode(g, supersonic),
                })
            }
            VelocitySubType::AirspeedSubsonic | VelocitySubType::AirspeedSupersonic => {
                VelocityType::Airspeed(Airspeed {
                    magnetic_heading: d.then(|| MagneticHeading(e)),
                    airspeed_type: if f {
                        AirspeedType::True
                    }
                    else {
                        AirspeedType::Indicated
                    },
                    airspeed: Speed::decode(g, supersonic),
                })
            }
            VelocitySubType::Unknown(_) => {
                return Self {
                    sub_type,
                    details: None,
                };
            }
        };

        let vertical_rate = VerticalRate {
            source: if payload.bit(35) {
                VerticalRateSource::Barometric
            }
            else {
                VerticalRateSource::Gnss
            },
            ft_per_min: signed_magnitude(payload.bit(36), payload.bits(37, 9), 64),
        };

        Self {
            sub_type,
            details: Some(VelocityDetails {
                intent_change_flag: payload.bit(8),
                ifr_capability_flag: payload.bit(9),
                nac_v: NacV::from_u8_unchecked(payload.bits(10, 3) as u8),
                velocity,
                vertical_rate,
                altitude_difference: signed_magnitude(payload.bit(48), payload.bits(49, 7), 25),
            }),
        }
    }
}

/// `(magnitude - 1) * step`, negated if `sign` is set. 0 means no information.
fn signed_magnitude(sign: bool, magnitude: u32, step: i32) -> Option<i32> {
    (magnitude != 0).then(|| {
        let value = (magnitude as i32 - 1) * step;
        if sign { -value } else { value }
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VelocitySubType {
    GroundSpeedSubsonic,
    GroundSpeedSupersonic,
    AirspeedSubsonic,
    AirspeedSupersonic,
    Unknown(u8),
}

impl VelocitySubType {
    pub fn from_u8(sub_type: u8) -> Self {
        match sub_type {
            1 => Self::GroundSpeedSubsonic,
            2 => Self::GroundSpeedSupersonic,
            3 => Self::AirspeedSubsonic,
            4 => Self::AirspeedSupersonic,
            _ => Self::Unknown(sub_type),
        }
    }

    pub fn is_supersonic(&self) -> bool {
        matches!(
            self,
            Self::GroundSpeedSupersonic | Self::AirspeedSupersonic
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VelocityDetails {
    pub intent_change_flag: bool,
    /// deprecated
    pub ifr_capability_flag: bool,
    pub nac_v: NacV,
    pub velocity: VelocityType,
    pub vertical_rate: VerticalRate,
    /// GNSS altitude minus barometric altitude in feet
    pub altitude_difference: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VelocityType {
    GroundSpeed(VectorVelocity),
    Airspeed(Airspeed),
}

/// A 10-bit speed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Speed {
    Knots(u16),
    /// More than 1021.5 kt (subsonic) or 4086 kt (supersonic)
    Exceeded,
}

impl Speed {
    /// Decodes a 10-bit speed. 0 means no information.
    pub fn decode(value: u16, supersonic: bool) -> Option<Self> {
        match value {
            0 => None,
            1023 => Some(Self::Exceeded),
            _ => {
                let knots = value - 1;
                Some(Self::Knots(if supersonic { knots * 4 } else { knots }))
            }
        }
    }

    pub fn knots(&self) -> Option<u16> {
        match self {
            Self::Knots(knots) => Some(*knots),
            Self::Exceeded => None,
        }
    }
}

/// Ground speed as east-west and north-south components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VectorVelocity {
    pub direction_east_west: DirectionEastWest,
    pub east_west: Option<Speed>,
    pub direction_north_south: DirectionNorthSouth,
    pub north_south: Option<Speed>,
}

impl VectorVelocity {
    /// Returns the velocity as x and y components in knots.
    ///
    /// X values go from west to east, Y values go from south to north.
    pub fn components(&self) -> Option<[f64; 2]> {
        let v_ew = f64::from(self.east_west?.knots()?);
        let v_ns = f64::from(self.north_south?.knots()?);
        let v_ew = match self.direction_east_west {
            DirectionEastWest::WestToEast => v_ew,
            DirectionEastWest::EastToWest => -v_ew,
        };
        let v_ns = match self.direction_north_south {
            DirectionNorthSouth::SouthToNorth => v_ns,
            DirectionNorthSouth::NorthToSouth => -v_ns,
        };
        Some([v_ew, v_ns])
    }

    /// Ground speed in knots.
    pub fn speed(&self) -> Option<f64> {
        let [x, y] = self.components()?;
        Some(x.hypot(y))
    }

    /// Track angle in degrees, clockwise from true north.
    pub fn bearing(&self) -> Option<f64> {
        let [x, y] = self.components()?;
        Some(x.atan2(y).to_degrees().rem_euclid(360.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectionNorthSouth {
    SouthToNorth,
    NorthToSouth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectionEastWest {
    WestToEast,
    EastToWest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Airspeed {
    pub magnetic_heading: Option<MagneticHeading>,
    pub airspeed_type: AirspeedType,
    pub airspeed: Option<Speed>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MagneticHeading(u16);

impl MagneticHeading {
    pub const fn from_u16_unchecked(word: u16) -> Self {
        Self(word)
    }

    pub const fn from_u16(word: u16) -> Option<Self> {
        if word & 0b1111110000000000 == 0 {
            Some(Self(word))
        }
        else {
            None
        }
    }

    /// Magnetic heading as 360/1024 of a degree
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Magnetic heading in degrees, clockwise from magnetic north.
    pub fn as_degrees(&self) -> f64 {
        f64::from(self.0) * 360.0 / 1024.0
    }

    pub fn as_radians(&self) -> f64 {
        f64::from(self.0) * TAU / 1024.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AirspeedType {
    Indicated,
    True,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerticalRate {
    pub source: VerticalRateSource,
    /// Positive is up
    pub ft_per_min: Option<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VerticalRateSource {
    Barometric,
    Gnss,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::{
        adsb::{
            NacV,
            velocity::{
                AirborneVelocity,
                AirspeedType,
                DirectionEastWest,
                DirectionNorthSouth,
                Speed,
                VelocitySubType,
                VelocityType,
                VerticalRateSource,
            },
        },
        bits::{
            Payload,
            insert_uint,
        },
    };

    fn payload(hex: &str) -> Payload {
        let bytes = hex::decode(hex).unwrap();
        Payload::try_from_slice(&bytes[4..11]).unwrap()
    }

    #[test]
    fn it_decodes_ground_speed() {
        // https://mode-s.org/1090mhz/content/ads-b/5-airborne-velocity.html
        let velocity = AirborneVelocity::decode(&payload("8D485020994409940838175B284F"));
        assert_eq!(velocity.sub_type, VelocitySubType::GroundSpeedSubsonic);

        let details = velocity.details.expect("no details");
        assert!(!details.intent_change_flag);
        assert!(details.ifr_capability_flag);
        assert_eq!(details.nac_v, NacV::from_u8_unchecked(0));

        let VelocityType::GroundSpeed(ground_speed) = details.velocity
        else {
            panic!("expected ground speed");
        };
        assert_eq!(ground_speed.direction_east_west, DirectionEastWest::EastToWest);
        assert_eq!(ground_speed.east_west, Some(Speed::Knots(8)));
        assert_eq!(
            ground_speed.direction_north_south,
            DirectionNorthSouth::NorthToSouth
        );
        assert_eq!(ground_speed.north_south, Some(Speed::Knots(159)));
        assert_abs_diff_eq!(ground_speed.speed().unwrap(), 159.2011, epsilon = 0.001);
        assert_abs_diff_eq!(ground_speed.bearing().unwrap(), 182.8804, epsilon = 0.001);

        assert_eq!(details.vertical_rate.source, VerticalRateSource::Gnss);
        assert_eq!(details.vertical_rate.ft_per_min, Some(-832));
        assert_eq!(details.altitude_difference, Some(550));
    }

    #[test]
    fn it_decodes_ground_speed_with_negative_altitude_difference() {
        // from adsb_deku, fixed east-west velocity
        let velocity = AirborneVelocity::decode(&payload("8da3d42599250129780484712c50"));
        let details = velocity.details.expect("no details");
        assert_eq!(details.nac_v, NacV::from_u8_unchecked(0b100));

        let VelocityType::GroundSpeed(ground_speed) = details.velocity
        else {
            panic!("expected ground speed");
        };
        assert_eq!(ground_speed.components(), Some([-256.0, 330.0]));
        assert_abs_diff_eq!(ground_speed.speed().unwrap(), 417.655, epsilon = 0.001);
        assert_abs_diff_eq!(ground_speed.bearing().unwrap(), 322.197, epsilon = 0.001);

        assert_eq!(
            details.vertical_rate.source,
            VerticalRateSource::Barometric
        );
        assert_eq!(details.vertical_rate.ft_per_min, Some(0));
        assert_eq!(details.altitude_difference, Some(-75));
    }

    #[test]
    fn it_decodes_airspeed() {
        // https://mode-s.org/1090mhz/content/ads-b/5-airborne-velocity.html
        let velocity = AirborneVelocity::decode(&payload("8DA05F219B06B6AF189400CBC33F"));
        assert_eq!(velocity.sub_type, VelocitySubType::AirspeedSubsonic);

        let details = velocity.details.expect("no details");
        let VelocityType::Airspeed(airspeed) = details.velocity
        else {
            panic!("expected airspeed");
        };
        assert_abs_diff_eq!(
            airspeed.magnetic_heading.expect("no heading").as_degrees(),
            243.984375
        );
        assert_eq!(airspeed.airspeed_type, AirspeedType::True);
        assert_eq!(airspeed.airspeed, Some(Speed::Knots(375)));

        assert_eq!(
            details.vertical_rate.source,
            VerticalRateSource::Barometric
        );
        assert_eq!(details.vertical_rate.ft_per_min, Some(-2304));
        assert_eq!(details.altitude_difference, None);
    }

    #[test]
    fn it_handles_sentinels() {
        let mut bytes = [0u8; 7];
        insert_uint(&mut bytes, 0, 5, 19);
        insert_uint(&mut bytes, 5, 3, 2);
        insert_uint(&mut bytes, 14, 10, 1023);
        insert_uint(&mut bytes, 25, 10, 11);
        let velocity = AirborneVelocity::decode(&Payload::new(bytes));

        let details = velocity.details.expect("no details");
        let VelocityType::GroundSpeed(ground_speed) = details.velocity
        else {
            panic!("expected ground speed");
        };
        assert_eq!(ground_speed.east_west, Some(Speed::Exceeded));
        assert_eq!(ground_speed.north_south, Some(Speed::Knots(40)));
        assert_eq!(ground_speed.speed(), None);
        assert_eq!(details.vertical_rate.ft_per_min, None);
        assert_eq!(details.altitude_difference, None);

        insert_uint(&mut bytes, 25, 10, 0);
        let velocity = AirborneVelocity::decode(&Payload::new(bytes));
        let VelocityType::GroundSpeed(ground_speed) = velocity.details.unwrap().velocity
        else {
            panic!("expected ground speed");
        };
        assert_eq!(ground_speed.north_south, None);
    }

    #[test]
    fn it_keeps_unknown_sub_types() {
        let mut bytes = [0xffu8; 7];
        insert_uint(&mut bytes, 0, 5, 19);
        insert_uint(&mut bytes, 5, 3, 5);
        let velocity = AirborneVelocity::decode(&Payload::new(bytes));
        assert_eq!(velocity.sub_type, VelocitySubType::Unknown(5));
        assert_eq!(velocity.details, None);
    }
}
