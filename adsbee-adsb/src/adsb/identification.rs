//! Aircraft identification and category (type codes 1 to 4)

use std::fmt::{
    Debug,
    Display,
};

use crate::bits::Payload;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdentificationAndCategory {
    pub emitter_category: EmitterCategory,
    pub encoded_callsign: EncodedCallsign,
    /// Permissively decoded callsign, see [`EncodedCallsign::decode_permissive`].
    pub callsign: Callsign,
}

impl IdentificationAndCategory {
    pub fn decode(payload: &Payload) -> Self {
        // bit   0    5  8     14    20    26    32    38    44    50
        // field ttttt ccc 000000 111111 222222 333333 444444 555555 666666 777777

        let type_code = payload.type_code();
        let category = payload.bits(5, 3) as u8;

        let bytes = payload.as_bytes();
        let encoded_callsign = EncodedCallsign([
            bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6],
        ]);

        Self {
            emitter_category: EmitterCategory::from_type_code_and_category_unchecked(
                type_code, category,
            ),
            encoded_callsign,
            callsign: encoded_callsign.decode_permissive(),
        }
    }
}

/// <https://mode-s.org/1090mhz/content/ads-b/2-identification.html>
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmitterCategory {
    Reserved { type_code: u8, category: u8 },
    NoCategoryInformation { type_code: u8 },
    SurfaceEmergencyVehicle,
    SurfaceServiceVehicle,
    GroundObstruction { category: u8 },
    GliderSailplane,
    LighterThanAir,
    ParachutistSkydiver,
    UltralightHangGliderParaGlider,
    UnmannedAerialVehicle,
    SpaceTransatmosphericVehicle,
    Light,
    Medium1,
    Medium2,
    HighVortexAircraft,
    Heavy,
    HighPerformance,
    Rotorcraft,
}

impl EmitterCategory {
    pub const fn from_type_code_and_category_unchecked(type_code: u8, category: u8) -> Self {
        match (type_code, category) {
            (1, _) => {
                Self::Reserved {
                    type_code,
                    category,
                }
            }
            (_, 0) => Self::NoCategoryInformation { type_code },
            (2, 1) => Self::SurfaceEmergencyVehicle,
            (2, 3) => Self::SurfaceServiceVehicle,
            (2, 4..=7) => Self::GroundObstruction { category },
            (3, 1) => Self::GliderSailplane,
            (3, 2) => Self::LighterThanAir,
            (3, 3) => Self::ParachutistSkydiver,
            (3, 4) => Self::UltralightHangGliderParaGlider,
            (3, 6) => Self::UnmannedAerialVehicle,
            (3, 7) => Self::SpaceTransatmosphericVehicle,
            (4, 1) => Self::Light,
            (4, 2) => Self::Medium1,
            (4, 3) => Self::Medium2,
            (4, 4) => Self::HighVortexAircraft,
            (4, 5) => Self::Heavy,
            (4, 6) => Self::HighPerformance,
            (4, 7) => Self::Rotorcraft,
            _ => {
                Self::Reserved {
                    type_code,
                    category,
                }
            }
        }
    }
}

/// The 48 bits of 6-bit characters as transmitted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedCallsign(pub [u8; 6]);

impl EncodedCallsign {
    /// Expands the encoded callsign to 8 bit per character.
    pub fn expand(&self) -> [u8; 8] {
        // byte 0        1        2        3        4        5
        // bit  01234567 01234567 01234567 01234567 01234567 01234567
        // char 00000011 11112222 22333333 44444455 55556666 66777777

        let bytes = &self.0;
        [
            bytes[0] >> 2,
            ((bytes[0] & 0b11) << 4) | (bytes[1] >> 4),
            ((bytes[1] & 0b1111) << 2) | (bytes[2] >> 6),
            bytes[2] & 0b111111,
            bytes[3] >> 2,
            ((bytes[3] & 0b11) << 4) | (bytes[4] >> 4),
            ((bytes[4] & 0b1111) << 2) | (bytes[5] >> 6),
            bytes[5] & 0b111111,
        ]
    }

    /// Decodes the callsign, failing on characters outside of the ICAO set.
    pub fn decode(&self) -> Result<Callsign, InvalidCallsign> {
        let expanded = self.expand();
        let mut characters = [0; Callsign::LENGTH];

        for (i, byte) in expanded.iter().enumerate() {
            characters[i] = CALLSIGN_ENCODING[usize::from(*byte)];

            if characters[i] == b'#' {
                return Err(InvalidCallsign {
                    expanded,
                    position: i,
                    character: *byte,
                });
            }
        }

        Ok(Callsign { characters })
    }

    /// Decodes the callsign, mapping characters outside of the ICAO set to
    /// their position in the AIS character set.
    pub fn decode_permissive(&self) -> Callsign {
        let mut characters = self.expand();
        for byte in &mut characters {
            *byte = CALLSIGN_ENCODING_PERMISSIVE[usize::from(*byte)];
        }
        Callsign { characters }
    }
}

impl Debug for EncodedCallsign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EncodedCallsign(\"{}\")",
            self.decode_permissive().as_str()
        )
    }
}

/// <https://mode-s.org/1090mhz/content/ads-b/2-identification.html>
const CALLSIGN_ENCODING: &[u8; 64] =
    b"#ABCDEFGHIJKLMNOPQRSTUVWXYZ##### ###############0123456789######";

const CALLSIGN_ENCODING_PERMISSIVE: &[u8; 64] =
    b"@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_ !\"#$%&'()*+,-./0123456789:;<=>?";

#[derive(Clone, Copy, Debug, thiserror::Error)]
#[error("Invalid character {character:02x} at position {position}")]
pub struct InvalidCallsign {
    pub expanded: [u8; 8],
    pub position: usize,
    pub character: u8,
}

/// A decoded callsign.
///
/// 8 ASCII characters, padded with spaces.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Callsign {
    // only ever filled from the character tables above
    characters: [u8; Self::LENGTH],
}

impl Callsign {
    const LENGTH: usize = 8;

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.characters).unwrap_or_default()
    }

    /// The callsign without padding.
    pub fn trimmed(&self) -> &str {
        self.as_str().trim_end()
    }
}

impl Debug for Callsign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Callsign(\"{}\")", self.as_str())
    }
}

impl Display for Callsign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for Callsign {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        adsb::identification::{
            EmitterCategory,
            EncodedCallsign,
            IdentificationAndCategory,
        },
        bits::Payload,
    };

    #[test]
    fn it_decodes_aircraft_identification() {
        // 8d4074b52315a676dd13a0662967
        let payload = Payload::new([0x23, 0x15, 0xa6, 0x76, 0xdd, 0x13, 0xa0]);
        let ident = IdentificationAndCategory::decode(&payload);
        assert_eq!(ident.emitter_category, EmitterCategory::Medium2);
        assert_eq!(
            ident.encoded_callsign.decode().expect("invalid callsign").as_str(),
            "EZY67QN "
        );
        assert_eq!(ident.callsign.trimmed(), "EZY67QN");
    }

    #[test]
    fn it_decodes_callsign_without_category() {
        // 8D4840D6202CC371C32CE0576098
        let payload = Payload::new([0x20, 0x2c, 0xc3, 0x71, 0xc3, 0x2c, 0xe0]);
        let ident = IdentificationAndCategory::decode(&payload);
        assert_eq!(
            ident.emitter_category,
            EmitterCategory::NoCategoryInformation { type_code: 4 }
        );
        assert_eq!(ident.callsign.as_str(), "KLM1023 ");
    }

    #[test]
    fn it_replaces_invalid_characters() {
        // all characters 0b111111
        let encoded = EncodedCallsign([0xff; 6]);
        assert!(encoded.decode().is_err());
        assert_eq!(encoded.decode_permissive().as_str(), "????????");
    }

    #[test]
    fn it_maps_emitter_categories() {
        assert_eq!(
            EmitterCategory::from_type_code_and_category_unchecked(2, 1),
            EmitterCategory::SurfaceEmergencyVehicle
        );
        assert_eq!(
            EmitterCategory::from_type_code_and_category_unchecked(3, 5),
            EmitterCategory::Reserved {
                type_code: 3,
                category: 5
            }
        );
        assert_eq!(
            EmitterCategory::from_type_code_and_category_unchecked(4, 7),
            EmitterCategory::Rotorcraft
        );
        assert_eq!(
            EmitterCategory::from_type_code_and_category_unchecked(1, 0),
            EmitterCategory::Reserved {
                type_code: 1,
                category: 0
            }
        );
    }
}
