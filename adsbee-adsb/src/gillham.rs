//! Altitude and identity codes
//!
//! Mode-A/C style codes are transmitted with their pulse bits interleaved, and
//! each place that carries one jumbles the bits a little differently. Every
//! such field gets its own reassembly function here which produces one of two
//! canonical forms:
//!
//! - an 11-bit altitude code `C1 A1 C2 A2 C4 A4 B1 B2 D2 B4 D4` (MSB first, with
//!   M, Q and D1 removed), decoded by [`decode_altitude`].
//! - a Mode-A identity, returned as a [`Squawk`].
//!
//! <https://en.wikipedia.org/wiki/Gillham_code>

use adsbee_types::Squawk;

/// How an 11-bit altitude code is to be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AltitudeEncoding {
    /// Binary value in 25 ft increments (Q bit set).
    Q1,
    /// Gillham code in 100 ft increments (Q bit clear).
    Gillham,
}

impl AltitudeEncoding {
    pub fn from_q_bit(q: bool) -> Self {
        if q { Self::Q1 } else { Self::Gillham }
    }
}

/// Decodes an 11-bit altitude code into feet.
///
/// Returns `None` for the all-zero code and for Gillham codes that don't
/// correspond to an altitude. This never panics: any 11-bit input either
/// decodes or doesn't.
pub fn decode_altitude(code: u16, encoding: AltitudeEncoding) -> Option<i32> {
    let code = code & 0x7ff;
    match encoding {
        AltitudeEncoding::Q1 => (code != 0).then(|| i32::from(code) * 25 - 1000),
        AltitudeEncoding::Gillham => decode_gillham(code),
    }
}

fn decode_gillham(code: u16) -> Option<i32> {
    // bit   a 9 8 7 6 5 4 3 2 1 0
    // pulse C1A1C2A2C4A4B1B2D2B4D4
    let bit = |i: u16| u32::from((code >> i) & 1);
    let (c1, a1, c2, a2, c4, a4) = (bit(10), bit(9), bit(8), bit(7), bit(6), bit(5));
    let (b1, b2, d2, b4, d4) = (bit(4), bit(3), bit(2), bit(1), bit(0));

    // 500 ft increments, gray coded D2 D4 A1 A2 A4 B1 B2 B4
    let coarse = [d2, d4, a1, a2, a4, b1, b2, b4]
        .into_iter()
        .fold(0, |value, bit| (value << 1) | bit);
    let n_500 = gray_to_binary(coarse);

    // 100 ft increments. only 5 of the 8 gray codes are used: 001, 011, 010,
    // 110, 100
    let mut n_100 = match gray_to_binary((c1 << 2) | (c2 << 1) | c4) {
        0 | 5 | 6 => return None,
        7 => 5,
        n => n,
    };

    // the 100 ft code reflects in every other 500 ft cell
    if n_500 % 2 == 1 {
        n_100 = 6 - n_100;
    }

    Some(500 * n_500 as i32 + 100 * n_100 as i32 - 1300)
}

fn gray_to_binary(mut gray: u32) -> u32 {
    let mut binary = 0;
    while gray != 0 {
        binary ^= gray;
        gray >>= 1;
    }
    binary
}

/// Encodes an altitude into an 11-bit Gillham code.
///
/// Returns `None` if the altitude is not a multiple of 100 ft in the range
/// -1200 ft to 126700 ft.
pub fn encode_gillham(altitude: i32) -> Option<u16> {
    if !(-1200..=126700).contains(&altitude) || altitude % 100 != 0 {
        return None;
    }

    let t = (altitude + 1300) / 100;
    let n_500 = (t - 1) / 5;
    let mut n_100 = t - 5 * n_500;
    if n_500 % 2 == 1 {
        n_100 = 6 - n_100;
    }

    let coarse = (n_500 ^ (n_500 >> 1)) as u16;
    // C1 C2 C4
    let fine: u16 = match n_100 {
        1 => 0b001,
        2 => 0b011,
        3 => 0b010,
        4 => 0b110,
        5 => 0b100,
        _ => unreachable!("bug: 100 ft increment out of range: {n_100}"),
    };

    let bit = |value: u16, i: u16| (value >> i) & 1;
    let (d2, d4, a1, a2) = (bit(coarse, 7), bit(coarse, 6), bit(coarse, 5), bit(coarse, 4));
    let (a4, b1, b2, b4) = (bit(coarse, 3), bit(coarse, 2), bit(coarse, 1), bit(coarse, 0));
    let (c1, c2, c4) = (bit(fine, 2), bit(fine, 1), bit(fine, 0));

    Some(
        [c1, a1, c2, a2, c4, a4, b1, b2, d2, b4, d4]
            .into_iter()
            .fold(0, |value, bit| (value << 1) | bit),
    )
}

/// Strips the Q bit from the 12-bit altitude code of airborne position
/// messages.
///
/// ```plain
/// bit:     0  1  2  3  4  5  6  7  8  9 10 11
/// input:  C1 A1 C2 A2 C4 A4 B1  Q B2 D2 B4 D4
/// output: C1 A1 C2 A2 C4 A4 B1 B2 D2 B4 D4
/// ```
pub fn altitude_code_from_ac12(code: u16) -> (u16, AltitudeEncoding) {
    let q = code & 0b0000_0001_0000 != 0;
    let code = ((code & 0b1111_1110_0000) >> 1) | (code & 0b1111);
    (code, AltitudeEncoding::from_q_bit(q))
}

/// Strips M and D1 from a 13-bit altitude code, as used for the threat
/// altitude in TCAS resolution advisories. D1 is never set in the altitude
/// range that Mode-C covers, and its position is used by the Q bit elsewhere.
///
/// ```plain
/// bit:     0  1  2  3  4  5  6  7  8  9 10 11 12
/// input:  C1 A1 C2 A2 C4 A4  M B1 D1 B2 D2 B4 D4
/// output: C1 A1 C2 A2 C4 A4 B1 B2 D2 B4 D4
/// ```
pub fn altitude_code_from_ac13(code: u16) -> u16 {
    let high = (code & 0b1_1111_1000_0000) >> 2;
    let b1 = (code & 0b0_0000_0010_0000) >> 1;
    let low = code & 0b0_0000_0000_1111;
    high | b1 | low
}

/// Reassembles a 13-bit identity code into a squawk.
///
/// ```plain
/// input:  C1 A1 C2 A2 C4 A4 X  B1 D1 B2 D2 B4 D4
/// output: A4 A2 A1 B4 B2 B1 C4 C2 C1 D4 D2 D1
/// ```
///
/// The X bit is ignored.
pub fn squawk_from_id13(code: u16) -> Squawk {
    let value = ID13_OUTPUT_BITS
        .iter()
        .enumerate()
        .filter_map(|(index, output_bit)| {
            let output_bit = (*output_bit)?;
            (code & (1 << (12 - index)) != 0).then_some(1u16 << output_bit)
        })
        .fold(0, |value, bit| value | bit);

    Squawk::from_u16_unchecked(value)
}

/// Output bit for each input bit of [`squawk_from_id13`], MSB first.
const ID13_OUTPUT_BITS: [Option<u8>; 13] = [
    Some(3),  // C1
    Some(9),  // A1
    Some(4),  // C2
    Some(10), // A2
    Some(5),  // C4
    Some(11), // A4
    None,     // X
    Some(6),  // B1
    Some(0),  // D1
    Some(7),  // B2
    Some(1),  // D2
    Some(8),  // B4
    Some(2),  // D4
];
