//! Classifies raw extended squitter messages and decodes their ADS-B payload.

use std::{
    fmt::Debug,
    sync::Arc,
};

use crate::{
    adsb::{
        MessageFormat,
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
    bits::Payload,
    message::{
        ApplicationField,
        ControlField,
        DecodedMessage,
        DownlinkFormat,
        MessageBody,
        RawMessage,
    },
    statistics::Statistics,
};

/// Control field values of DF18 that carry ADS-B messages.
const ACCEPTED_CONTROL_FIELDS: [ControlField; 5] = [
    ControlField::ADSB_WITH_ICAO_ADDRESS,
    ControlField::ADSB_WITH_NON_ICAO_ADDRESS,
    ControlField::FINE_TISB_WITH_ICAO_ADDRESS,
    ControlField::FINE_TISB_WITH_NON_ICAO_ADDRESS,
    ControlField::REBROADCAST,
];

const COARSE_TISB_TYPE_CODE: TypeCode = TypeCode::from_u8_unchecked(20);

#[derive(Debug, thiserror::Error)]
pub enum TranslatorBuildError {
    #[error("no statistics target configured")]
    MissingStatistics,
}

#[derive(Default)]
pub struct TranslatorBuilder {
    statistics: Option<Arc<dyn Statistics>>,
}

impl TranslatorBuilder {
    pub fn statistics(mut self, statistics: Arc<dyn Statistics>) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn build(self) -> Result<Translator, TranslatorBuildError> {
        Ok(Translator {
            statistics: self
                .statistics
                .ok_or(TranslatorBuildError::MissingStatistics)?,
        })
    }
}

impl Debug for TranslatorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorBuilder")
            .field("statistics", &self.statistics.is_some())
            .finish()
    }
}

/// Decodes the ADS-B payload of extended squitter messages.
///
/// This is cheap to clone and can be shared between threads.
#[derive(Clone)]
pub struct Translator {
    statistics: Arc<dyn Statistics>,
}

impl Translator {
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::default()
    }

    /// Decodes a message.
    ///
    /// Returns `None` if the message doesn't carry a 7-byte ADS-B payload, or
    /// if its type code doesn't define a message.
    pub fn translate(&self, raw: &RawMessage) -> Option<DecodedMessage> {
        if !accepts(raw) {
            tracing::trace!(
                downlink_format = ?raw.downlink_format,
                control_field = ?raw.control_field,
                application_field = ?raw.application_field,
                "not an ADS-B message"
            );
            return None;
        }

        let Some(bytes) = &raw.payload
        else {
            tracing::trace!(downlink_format = ?raw.downlink_format, "no payload");
            return None;
        };
        let Some(payload) = Payload::try_from_slice(bytes)
        else {
            tracing::debug!(length = bytes.len(), "payload is not 7 bytes long");
            return None;
        };

        let type_code = TypeCode::from_u8_unchecked(payload.type_code());
        let control_field = match raw.downlink_format {
            DownlinkFormat::ExtendedSquitterNonTransponder => raw.control_field,
            _ => None,
        };
        let fine_tisb = control_field.is_some_and(|control_field| control_field.is_fine_tisb());

        let (message_format, body, icao_mode_a_flag) = if control_field
            == Some(ControlField::REBROADCAST)
            && type_code == COARSE_TISB_TYPE_CODE
        {
            let body = CoarseTisbAirbornePosition::decode(&payload);
            (
                MessageFormat::CoarseTisbAirbornePosition,
                MessageBody::CoarseTisbAirbornePosition(body),
                Some(body.icao_mode_a_flag),
            )
        }
        else {
            let message_format = MessageFormat::from_type_code(type_code);

            // bit that carries the IMF flag in fine TIS-B messages
            let mut imf_bit = None;

            let body = match message_format {
                MessageFormat::NoPosition => MessageBody::NoPosition(NoPosition::decode(&payload)),
                MessageFormat::IdentificationAndCategory => {
                    MessageBody::IdentificationAndCategory(IdentificationAndCategory::decode(
                        &payload,
                    ))
                }
                MessageFormat::SurfacePosition => {
                    imf_bit = Some(20);
                    MessageBody::SurfacePosition(SurfacePosition::decode(&payload))
                }
                MessageFormat::AirbornePositionBarometric | MessageFormat::AirbornePositionGnss => {
                    imf_bit = Some(7);
                    MessageBody::AirbornePosition(AirbornePosition::decode(&payload))
                }
                MessageFormat::AirborneVelocity => {
                    imf_bit = Some(8);
                    MessageBody::AirborneVelocity(AirborneVelocity::decode(&payload))
                }
                MessageFormat::AircraftStatus => {
                    MessageBody::AircraftStatus(AircraftStatus::decode(&payload))
                }
                MessageFormat::TargetStateAndStatus => {
                    MessageBody::TargetStateAndStatus(TargetStateAndStatus::decode(&payload))
                }
                MessageFormat::AircraftOperationalStatus => {
                    MessageBody::AircraftOperationalStatus(AircraftOperationalStatus::decode(
                        &payload,
                    ))
                }
                MessageFormat::TestMessage
                | MessageFormat::SurfaceSystemStatus
                | MessageFormat::Reserved
                | MessageFormat::AircraftOperationalCoordination
                | MessageFormat::CoarseTisbAirbornePosition => {
                    tracing::debug!(?type_code, ?message_format, "no decoder for type code");
                    return None;
                }
            };

            let icao_mode_a_flag = imf_bit
                .filter(|_| fine_tisb)
                .map(|index| payload.bit(index));

            (message_format, body, icao_mode_a_flag)
        };

        self.statistics.record(message_format, type_code);

        Some(DecodedMessage {
            raw: raw.clone(),
            type_code,
            message_format,
            icao_mode_a_flag,
            body,
        })
    }
}

impl Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator").finish_non_exhaustive()
    }
}

/// Checks the downlink format and its control or application field.
fn accepts(raw: &RawMessage) -> bool {
    match raw.downlink_format {
        DownlinkFormat::ExtendedSquitter => true,
        DownlinkFormat::ExtendedSquitterNonTransponder => {
            raw.control_field
                .is_some_and(|control_field| ACCEPTED_CONTROL_FIELDS.contains(&control_field))
        }
        DownlinkFormat::MilitaryExtendedSquitter => {
            raw.application_field == Some(ApplicationField::ADSB)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use adsbee_types::IcaoAddress;
    use bytes::Bytes;

    use crate::{
        adsb::{
            MessageFormat,
            SurveillanceStatus,
            TypeCode,
        },
        message::{
            ApplicationField,
            ControlField,
            DownlinkFormat,
            MessageBody,
            RawMessage,
        },
        statistics::AtomicStatistics,
        translator::{
            Translator,
            TranslatorBuildError,
        },
    };

    fn translator() -> (Translator, Arc<AtomicStatistics>) {
        let statistics = Arc::new(AtomicStatistics::default());
        let translator = Translator::builder()
            .statistics(statistics.clone())
            .build()
            .unwrap();
        (translator, statistics)
    }

    fn raw(
        downlink_format: DownlinkFormat,
        control_field: Option<u8>,
        application_field: Option<u8>,
        payload: &[u8],
    ) -> RawMessage {
        RawMessage {
            downlink_format,
            control_field: control_field.map(ControlField::from_u8_unchecked),
            application_field: application_field.map(ApplicationField::from_u8_unchecked),
            address_announced: None,
            payload: Some(Bytes::copy_from_slice(payload)),
        }
    }

    fn df17(payload: &[u8]) -> RawMessage {
        raw(DownlinkFormat::ExtendedSquitter, None, None, payload)
    }

    /// A payload with the given type code and the rest of the bits set to a
    /// fixed pattern.
    fn payload_with_type_code(type_code: u8) -> [u8; 7] {
        let mut payload = [0x5a, 0xc3, 0x96, 0x0f, 0xf0, 0x69, 0xa5];
        payload[0] = (type_code << 3) | (payload[0] & 0b111);
        payload
    }

    #[test]
    fn it_requires_statistics() {
        assert!(matches!(
            Translator::builder().build(),
            Err(TranslatorBuildError::MissingStatistics)
        ));
    }

    #[test]
    fn it_translates_identification() {
        let (translator, statistics) = translator();
        let raw = RawMessage::extended_squitter(
            IcaoAddress::from_u32_unchecked(0x4840d6),
            vec![0x20, 0x2c, 0xc3, 0x71, 0xc3, 0x2c, 0xe0],
        );

        let message = translator
            .translate(&raw)
            .expect("message was not decoded");
        assert_eq!(message.raw, raw);
        assert_eq!(message.type_code, TypeCode::from_u8_unchecked(4));
        assert_eq!(
            message.message_format,
            MessageFormat::IdentificationAndCategory
        );
        assert_eq!(message.icao_mode_a_flag, None);
        let MessageBody::IdentificationAndCategory(identification) = message.body
        else {
            panic!("expected identification");
        };
        assert_eq!(identification.callsign.trimmed(), "KLM1023");

        let snapshot = statistics.snapshot();
        assert_eq!(snapshot.total, 1);
        assert_eq!(
            snapshot.message_format(MessageFormat::IdentificationAndCategory),
            1
        );
        assert_eq!(snapshot.type_code(TypeCode::from_u8_unchecked(4)), 1);
    }

    #[test]
    fn it_classifies_deterministically() {
        let (translator, statistics) = translator();
        let mut expected_total = 0;

        for type_code in 0..32 {
            let payload = payload_with_type_code(type_code);
            let has_body = !matches!(type_code, 23..=27 | 30);

            let mut accepted = vec![df17(&payload)];
            for control_field in [0, 1, 2, 5, 6] {
                accepted.push(raw(
                    DownlinkFormat::ExtendedSquitterNonTransponder,
                    Some(control_field),
                    None,
                    &payload,
                ));
            }
            accepted.push(raw(
                DownlinkFormat::MilitaryExtendedSquitter,
                None,
                Some(0),
                &payload,
            ));

            for message in &accepted {
                let first = translator.translate(message);
                let second = translator.translate(message);
                assert_eq!(first, second);
                assert_eq!(first.is_some(), has_body, "type code {type_code}");
                if has_body {
                    expected_total += 2;
                }
            }

            let mut rejected = vec![
                raw(DownlinkFormat::CommBAltitudeReply, None, None, &payload),
                raw(
                    DownlinkFormat::ExtendedSquitterNonTransponder,
                    None,
                    None,
                    &payload,
                ),
                raw(DownlinkFormat::MilitaryExtendedSquitter, None, None, &payload),
            ];
            for control_field in [3, 4, 7] {
                rejected.push(raw(
                    DownlinkFormat::ExtendedSquitterNonTransponder,
                    Some(control_field),
                    None,
                    &payload,
                ));
            }
            for application_field in 1..8 {
                rejected.push(raw(
                    DownlinkFormat::MilitaryExtendedSquitter,
                    None,
                    Some(application_field),
                    &payload,
                ));
            }

            for message in &rejected {
                assert_eq!(translator.translate(message), None);
            }
        }

        assert_eq!(statistics.snapshot().total, expected_total);
    }

    #[test]
    fn it_decodes_surveillance_status() {
        let (translator, _) = translator();
        let rest = "0111111111111001111111111111111101010101010101010";

        for type_code in (9..=22).filter(|type_code| *type_code != 19) {
            for (bits, surveillance_status) in [
                (0, SurveillanceStatus::NoInformation),
                (1, SurveillanceStatus::PermanentAlert),
                (2, SurveillanceStatus::TemporaryAlert),
                (3, SurveillanceStatus::SpecialPositionIdentification),
            ] {
                let word = u64::from_str_radix(&format!("{type_code:05b}{bits:02b}{rest}"), 2)
                    .unwrap();
                let payload = &word.to_be_bytes()[1..];

                let message = translator
                    .translate(&df17(payload))
                    .expect("message was not decoded");
                assert!(matches!(message.body, MessageBody::AirbornePosition(_)));
                assert_eq!(message.surveillance_status(), Some(surveillance_status));
                assert!(message.cpr().is_some());
            }
        }
    }

    #[test]
    fn it_decodes_coarse_tisb() {
        let (translator, statistics) = translator();
        let payload = payload_with_type_code(20);

        let message = translator
            .translate(&raw(
                DownlinkFormat::ExtendedSquitterNonTransponder,
                Some(6),
                None,
                &payload,
            ))
            .expect("message was not decoded");
        assert_eq!(
            message.message_format,
            MessageFormat::CoarseTisbAirbornePosition
        );
        assert!(matches!(
            message.body,
            MessageBody::CoarseTisbAirbornePosition(_)
        ));
        // first bit of the type code
        assert_eq!(message.icao_mode_a_flag, Some(true));
        assert_eq!(
            statistics
                .snapshot()
                .message_format(MessageFormat::CoarseTisbAirbornePosition),
            1
        );

        // not coarse TIS-B without the rebroadcast control field
        let message = translator
            .translate(&raw(
                DownlinkFormat::ExtendedSquitterNonTransponder,
                Some(0),
                None,
                &payload,
            ))
            .expect("message was not decoded");
        assert_eq!(message.message_format, MessageFormat::AirbornePositionGnss);
        assert_eq!(message.icao_mode_a_flag, None);
    }

    #[test]
    fn it_decodes_fine_tisb_imf() {
        let (translator, _) = translator();

        // airborne position, bit 7
        let mut payload = payload_with_type_code(11);
        payload[0] |= 0b1;
        for control_field in [2, 5] {
            let message = translator
                .translate(&raw(
                    DownlinkFormat::ExtendedSquitterNonTransponder,
                    Some(control_field),
                    None,
                    &payload,
                ))
                .unwrap();
            assert_eq!(message.icao_mode_a_flag, Some(true));
        }

        // surface position, bit 20
        let mut payload = payload_with_type_code(6);
        payload[2] &= !0b1000;
        let message = translator
            .translate(&raw(
                DownlinkFormat::ExtendedSquitterNonTransponder,
                Some(2),
                None,
                &payload,
            ))
            .unwrap();
        assert_eq!(message.icao_mode_a_flag, Some(false));

        // velocity, bit 8
        let payload = [0x99, 0x80, 0, 0, 0, 0, 0];
        let message = translator
            .translate(&raw(
                DownlinkFormat::ExtendedSquitterNonTransponder,
                Some(5),
                None,
                &payload,
            ))
            .unwrap();
        assert_eq!(message.icao_mode_a_flag, Some(true));

        // identification doesn't carry the flag
        let payload = payload_with_type_code(4);
        let message = translator
            .translate(&raw(
                DownlinkFormat::ExtendedSquitterNonTransponder,
                Some(2),
                None,
                &payload,
            ))
            .unwrap();
        assert_eq!(message.icao_mode_a_flag, None);

        // neither does ADS-B
        let message = translator.translate(&df17(&payload)).unwrap();
        assert_eq!(message.icao_mode_a_flag, None);
    }

    #[test]
    fn it_rejects_invalid_payloads() {
        let (translator, statistics) = translator();

        // short and long payloads are rejected the same way as missing ones
        for length in [0, 1, 6, 8, 14] {
            assert_eq!(translator.translate(&df17(&vec![0x58; length])), None);
        }

        // the same bytes are decoded once they have the right length
        assert!(translator.translate(&df17(&[0x58; 7])).is_some());
        assert_eq!(statistics.snapshot().total, 1);

        let mut message = df17(&[0x58; 7]);
        message.payload = None;
        assert_eq!(translator.translate(&message), None);

        assert_eq!(statistics.snapshot().total, 1);
    }

    #[test]
    fn it_ignores_type_codes_without_decoder() {
        let (translator, statistics) = translator();

        for type_code in [23, 24, 25, 26, 27, 30] {
            let payload = payload_with_type_code(type_code);
            assert_eq!(translator.translate(&df17(&payload)), None);
        }

        assert_eq!(statistics.snapshot().total, 0);
    }
}
