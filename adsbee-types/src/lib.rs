use std::{
    fmt::{
        Debug,
        Display,
    },
    str::FromStr,
};

/// 24-bit aircraft address.
///
/// Addresses announced by DF18 with a non-ICAO control field carry the
/// `non_icao` flag. They're displayed with a `~` prefix.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr)
)]
pub struct IcaoAddress {
    address: u32,
    non_icao: bool,
}

impl IcaoAddress {
    pub const fn from_u32_unchecked(address: u32) -> Self {
        Self {
            address,
            non_icao: false,
        }
    }

    pub fn from_u32(address: u32) -> Option<Self> {
        (address < 0x1000000).then(|| Self::from_u32_unchecked(address))
    }

    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u32_unchecked(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    pub const fn with_non_icao_flag(self) -> Self {
        Self {
            address: self.address,
            non_icao: true,
        }
    }

    pub fn non_icao(&self) -> bool {
        self.non_icao
    }

    pub fn as_u32(&self) -> u32 {
        self.address
    }

    pub fn as_bytes(&self) -> [u8; 3] {
        let b = self.address.to_be_bytes();
        [b[1], b[2], b[3]]
    }
}

impl Display for IcaoAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.non_icao {
            write!(f, "~")?;
        }
        write!(f, "{:06x}", self.address)
    }
}

impl Debug for IcaoAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IcaoAddress({self})")
    }
}

impl FromStr for IcaoAddress {
    type Err = IcaoAddressFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || {
            IcaoAddressFromStrError {
                input: s.to_owned(),
            }
        };

        let (hex, non_icao) = match s.strip_prefix('~') {
            Some(hex) => (hex, true),
            None => (s, false),
        };

        let address = u32::from_str_radix(hex, 16).map_err(|_| err())?;
        let mut address = Self::from_u32(address).ok_or_else(err)?;
        address.non_icao = non_icao;
        Ok(address)
    }
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("Invalid ICAO address: {input}")]
pub struct IcaoAddressFromStrError {
    pub input: String,
}

impl From<IcaoAddress> for u32 {
    fn from(value: IcaoAddress) -> Self {
        value.address
    }
}

/// Mode-A identity code, four octal digits `ABCD`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr)
)]
pub struct Squawk {
    code: u16,
}

impl Squawk {
    pub const VFR_STANDARD: Self = Self::from_u16_unchecked(0o0700);
    pub const AIRCRAFT_HIJACKING: Self = Self::from_u16_unchecked(0o7500);
    pub const RADIO_FAILURE: Self = Self::from_u16_unchecked(0o7600);
    pub const EMERGENCY: Self = Self::from_u16_unchecked(0o7700);

    pub const fn from_u16_unchecked(code: u16) -> Self {
        Self { code }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        (code < 0o10000).then(|| Self::from_u16_unchecked(code))
    }

    pub fn as_u16(&self) -> u16 {
        self.code
    }

    /// Digits `[A, B, C, D]`, each in `0..=7`.
    pub fn digits(&self) -> [u8; 4] {
        [
            ((self.code >> 9) & 7) as u8,
            ((self.code >> 6) & 7) as u8,
            ((self.code >> 3) & 7) as u8,
            (self.code & 7) as u8,
        ]
    }

    pub fn is_emergency(&self) -> bool {
        matches!(
            *self,
            Self::AIRCRAFT_HIJACKING | Self::RADIO_FAILURE | Self::EMERGENCY
        )
    }
}

impl Display for Squawk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04o}", self.code)
    }
}

impl Debug for Squawk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Squawk({:04o})", self.code)
    }
}

impl FromStr for Squawk {
    type Err = SquawkFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || {
            SquawkFromStrError {
                input: s.to_owned(),
            }
        };
        let code = u16::from_str_radix(s, 8).map_err(|_| err())?;
        Self::from_u16(code).ok_or_else(err)
    }
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("Invalid squawk code: {input}")]
pub struct SquawkFromStrError {
    pub input: String,
}

impl From<Squawk> for u16 {
    fn from(value: Squawk) -> Self {
        value.code
    }
}
