//! # ADS-B message decoding
//!
//! Decodes the 56-bit ME field of extended squitter messages (DF17, DF18 and
//! DF19) into typed messages, and encodes and decodes CPR positions.
//!
//! - [References](https://mode-s.org/1090mhz/content/ads-b/1-basics.html)
//! - [DO-260B](http://www.anteni.net/adsb/Doc/1090-WP30-18-DRAFT_DO-260B-V42.pdf)

pub mod adsb;
pub mod bits;
pub mod cpr;
pub mod frame;
pub mod gillham;
pub mod message;
pub mod statistics;
pub mod translator;

pub use adsbee_types::{
    IcaoAddress,
    Squawk,
};

pub use crate::{
    frame::{
        ExtendedSquitterFrame,
        FrameError,
    },
    message::{
        DecodedMessage,
        MessageBody,
        RawMessage,
    },
    statistics::{
        AtomicStatistics,
        Statistics,
        StatisticsSnapshot,
    },
    translator::Translator,
};
