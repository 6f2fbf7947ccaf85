//! Extended squitter frame decoder
//!
//! Takes the 112 bits of a DF17, DF18 or DF19 frame apart into a
//! [`RawMessage`] for the [`Translator`](crate::translator::Translator).
//!
//! ```plain
//! bit   0     5   8                       32                                                     88
//! field ddddd ccc aaaaaaaaaaaaaaaaaaaaaaaa mmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmm pppppppppppppppppppppppp
//! ```
//!
//! d: downlink format, c: capability, control field or application field,
//! a: address announced, m: ME field, p: parity

use adsbee_types::IcaoAddress;
use bytes::{
    Buf,
    Bytes,
};

use crate::{
    bits::PAYLOAD_LENGTH,
    message::{
        ApplicationField,
        ControlField,
        DownlinkFormat,
        RawMessage,
    },
};

/// Length of a long Mode S frame
pub const LENGTH_LONG: usize = 14;

/// CRC used for the parity field of Mode S frames.
///
/// Computing it over a whole frame, parity included, yields 0 for frames
/// received without errors.
pub const CRC_24_MODES: crc::Algorithm<u32> = crc::Algorithm {
    width: 24,
    poly: 0xfff409,
    init: 0,
    refin: false,
    refout: false,
    xorout: 0x000000,
    check: 0x54268,
    residue: 0x000000,
};

const CRC: crc::Crc<u32> = crc::Crc::<u32>::new(&CRC_24_MODES);

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("buffer with length 0 doesn't contain DF")]
    NoDf,
    #[error("invalid value for DF: {value}")]
    InvalidDf { value: u8 },
    #[error("not an extended squitter: {downlink_format:?}")]
    NotExtendedSquitter { downlink_format: DownlinkFormat },
    #[error(
        "expected {expected_length} bytes for the frame, but buffer is only {buffer_length} bytes long"
    )]
    Truncated {
        expected_length: usize,
        buffer_length: usize,
    },
    #[error("CRC check failed: residue {residue:06x}")]
    CrcCheckFailed { residue: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedSquitterFrame {
    pub downlink_format: DownlinkFormat,
    /// Capability (DF17), control field (DF18) or application field (DF19)
    pub bits_5_to_7: u8,
    pub address_announced: IcaoAddress,
    pub payload: Bytes,
    pub parity: u32,
}

impl ExtendedSquitterFrame {
    /// Decodes a frame from the buffer and verifies its parity.
    ///
    /// Exactly [`LENGTH_LONG`] bytes are consumed on success, anything after
    /// that is left in the buffer.
    pub fn decode<B: Buf>(buffer: &mut B) -> Result<Self, FrameError> {
        let buffer_length = buffer.remaining();
        let byte_0 = buffer.try_get_u8().map_err(|_| FrameError::NoDf)?;

        let value = byte_0 >> 3;
        let downlink_format =
            DownlinkFormat::from_u8(value).ok_or(FrameError::InvalidDf { value })?;
        if !downlink_format.is_extended_squitter() {
            return Err(FrameError::NotExtendedSquitter { downlink_format });
        }

        if buffer_length < LENGTH_LONG {
            return Err(FrameError::Truncated {
                expected_length: LENGTH_LONG,
                buffer_length,
            });
        }

        let mut frame = [0u8; LENGTH_LONG];
        frame[0] = byte_0;
        buffer.copy_to_slice(&mut frame[1..]);

        let residue = CRC.checksum(&frame);
        if residue != 0 {
            tracing::trace!(frame = ?frame, residue, "CRC check failed");
            return Err(FrameError::CrcCheckFailed { residue });
        }

        let mut rest = &frame[1..];
        let mut address = [0u8; 3];
        rest.copy_to_slice(&mut address);
        let payload = rest.copy_to_bytes(PAYLOAD_LENGTH);
        let parity = rest.get_uint(3) as u32;

        Ok(Self {
            downlink_format,
            bits_5_to_7: byte_0 & 0b111,
            address_announced: IcaoAddress::from_bytes(address),
            payload,
            parity,
        })
    }

    /// Decodes a frame from a hex string, as printed by most receivers.
    ///
    /// A leading `*` and a trailing `;` are accepted.
    pub fn from_hex(hex: &str) -> Result<Self, FrameFromHexError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('*').unwrap_or(hex);
        let hex = hex.strip_suffix(';').unwrap_or(hex);
        let bytes = hex::decode(hex)?;
        Ok(Self::decode(&mut bytes.as_slice())?)
    }

    pub fn control_field(&self) -> Option<ControlField> {
        (self.downlink_format == DownlinkFormat::ExtendedSquitterNonTransponder)
            .then(|| ControlField::from_u8_unchecked(self.bits_5_to_7))
    }

    pub fn application_field(&self) -> Option<ApplicationField> {
        (self.downlink_format == DownlinkFormat::MilitaryExtendedSquitter)
            .then(|| ApplicationField::from_u8_unchecked(self.bits_5_to_7))
    }
}

impl From<ExtendedSquitterFrame> for RawMessage {
    fn from(value: ExtendedSquitterFrame) -> Self {
        let control_field = value.control_field();
        let non_icao = control_field.is_some_and(|control_field| {
            control_field == ControlField::ADSB_WITH_NON_ICAO_ADDRESS
                || control_field == ControlField::FINE_TISB_WITH_NON_ICAO_ADDRESS
        });
        let address_announced = if non_icao {
            value.address_announced.with_non_icao_flag()
        }
        else {
            value.address_announced
        };

        Self {
            downlink_format: value.downlink_format,
            control_field,
            application_field: value.application_field(),
            address_announced: Some(address_announced),
            payload: Some(value.payload),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameFromHexError {
    #[error("invalid hex")]
    Hex(#[from] hex::FromHexError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}
