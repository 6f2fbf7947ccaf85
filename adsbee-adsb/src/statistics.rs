//! Counters for decoded messages.

use std::sync::atomic::{
    AtomicU64,
    Ordering,
};

use crate::adsb::{
    MessageFormat,
    TypeCode,
};

/// Number of distinct type codes.
pub const TYPE_CODE_COUNT: usize = 32;

/// Receives a record for every successfully decoded message.
pub trait Statistics: Send + Sync {
    fn record(&self, message_format: MessageFormat, type_code: TypeCode);
}

#[derive(Debug)]
pub struct AtomicStatistics {
    total: AtomicU64,
    by_message_format: [AtomicU64; MessageFormat::COUNT],
    by_type_code: [AtomicU64; TYPE_CODE_COUNT],
}

impl Default for AtomicStatistics {
    fn default() -> Self {
        Self {
            total: AtomicU64::new(0),
            by_message_format: std::array::from_fn(|_| AtomicU64::new(0)),
            by_type_code: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

impl AtomicStatistics {
    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            by_message_format: std::array::from_fn(|i| {
                self.by_message_format[i].load(Ordering::Relaxed)
            }),
            by_type_code: std::array::from_fn(|i| self.by_type_code[i].load(Ordering::Relaxed)),
        }
    }
}

impl Statistics for AtomicStatistics {
    fn record(&self, message_format: MessageFormat, type_code: TypeCode) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.by_message_format[message_format.index()].fetch_add(1, Ordering::Relaxed);
        if let Some(counter) = self.by_type_code.get(usize::from(type_code.as_u8())) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Counter values at some point in time.
///
/// The counters are read one after another, so under concurrent updates the
/// total may be slightly off from the sum of the other counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    pub total: u64,
    pub by_message_format: [u64; MessageFormat::COUNT],
    pub by_type_code: [u64; TYPE_CODE_COUNT],
}

impl StatisticsSnapshot {
    pub fn message_format(&self, message_format: MessageFormat) -> u64 {
        self.by_message_format[message_format.index()]
    }

    pub fn type_code(&self, type_code: TypeCode) -> u64 {
        self.by_type_code
            .get(usize::from(type_code.as_u8()))
            .copied()
            .unwrap_or_default()
    }

    /// Non-zero counters per message format.
    pub fn message_formats(&self) -> impl Iterator<Item = (MessageFormat, u64)> + '_ {
        MessageFormat::ALL
            .iter()
            .map(|format| (*format, self.message_format(*format)))
            .filter(|(_, count)| *count != 0)
    }
}
