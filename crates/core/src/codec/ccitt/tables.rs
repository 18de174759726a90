//! ITU-T T.4/T.6 code tables.
//!
//! Codes are kept as bit strings and matched against a bit window with
//! [`has_prefix`]. Each family of tables is a prefix code, so the first
//! matching entry is the only one.

use super::bitwindow::has_prefix;

/// Group 4 (and Group 3 2-D) mode tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Pass,
    Horizontal,
    /// Vertical mode with `a1 - b1` in `-3..=3`.
    Vertical(i8),
    /// Extension code; only uncompressed mode is defined and it is not supported.
    Extension,
    EndOfFacsimileBlock,
}

/// End-of-line marker: eleven zeros and a one.
pub const EOL: &str = "000000000001";

/// T.6 Table 1 - mode codes, plus the extension prefix and EOFB.
pub static MODE_CODES: [(&str, Mode); 11] = [
    ("1", Mode::Vertical(0)),
    ("011", Mode::Vertical(1)),
    ("010", Mode::Vertical(-1)),
    ("001", Mode::Horizontal),
    ("0001", Mode::Pass),
    ("000011", Mode::Vertical(2)),
    ("000010", Mode::Vertical(-2)),
    ("0000011", Mode::Vertical(3)),
    ("0000010", Mode::Vertical(-3)),
    ("0000001", Mode::Extension),
    ("000000000001000000000001", Mode::EndOfFacsimileBlock),
];

/// T.4 Table 2 - white terminating codes, run lengths 0 to 63.
pub static WHITE_TERMINATING_CODES: [(&str, u16); 64] = [
    ("00110101", 0),
    ("000111", 1),
    ("0111", 2),
    ("1000", 3),
    ("1011", 4),
    ("1100", 5),
    ("1110", 6),
    ("1111", 7),
    ("10011", 8),
    ("10100", 9),
    ("00111", 10),
    ("01000", 11),
    ("001000", 12),
    ("000011", 13),
    ("110100", 14),
    ("110101", 15),
    ("101010", 16),
    ("101011", 17),
    ("0100111", 18),
    ("0001100", 19),
    ("0001000", 20),
    ("0010111", 21),
    ("0000011", 22),
    ("0000100", 23),
    ("0101000", 24),
    ("0101011", 25),
    ("0010011", 26),
    ("0100100", 27),
    ("0011000", 28),
    ("00000010", 29),
    ("00000011", 30),
    ("00011010", 31),
    ("00011011", 32),
    ("00010010", 33),
    ("00010011", 34),
    ("00010100", 35),
    ("00010101", 36),
    ("00010110", 37),
    ("00010111", 38),
    ("00101000", 39),
    ("00101001", 40),
    ("00101010", 41),
    ("00101011", 42),
    ("00101100", 43),
    ("00101101", 44),
    ("00000100", 45),
    ("00000101", 46),
    ("00001010", 47),
    ("00001011", 48),
    ("01010010", 49),
    ("01010011", 50),
    ("01010100", 51),
    ("01010101", 52),
    ("00100100", 53),
    ("00100101", 54),
    ("01011000", 55),
    ("01011001", 56),
    ("01011010", 57),
    ("01011011", 58),
    ("01001010", 59),
    ("01001011", 60),
    ("00110010", 61),
    ("00110011", 62),
    ("00110100", 63),
];

/// T.4 Table 2 - black terminating codes, run lengths 0 to 63.
pub static BLACK_TERMINATING_CODES: [(&str, u16); 64] = [
    ("0000110111", 0),
    ("010", 1),
    ("11", 2),
    ("10", 3),
    ("011", 4),
    ("0011", 5),
    ("0010", 6),
    ("00011", 7),
    ("000101", 8),
    ("000100", 9),
    ("0000100", 10),
    ("0000101", 11),
    ("0000111", 12),
    ("00000100", 13),
    ("00000111", 14),
    ("000011000", 15),
    ("0000010111", 16),
    ("0000011000", 17),
    ("0000001000", 18),
    ("00001100111", 19),
    ("00001101000", 20),
    ("00001101100", 21),
    ("00000110111", 22),
    ("00000101000", 23),
    ("00000010111", 24),
    ("00000011000", 25),
    ("000011001010", 26),
    ("000011001011", 27),
    ("000011001100", 28),
    ("000011001101", 29),
    ("000001101000", 30),
    ("000001101001", 31),
    ("000001101010", 32),
    ("000001101011", 33),
    ("000011010010", 34),
    ("000011010011", 35),
    ("000011010100", 36),
    ("000011010101", 37),
    ("000011010110", 38),
    ("000011010111", 39),
    ("000001101100", 40),
    ("000001101101", 41),
    ("000011011010", 42),
    ("000011011011", 43),
    ("000001010100", 44),
    ("000001010101", 45),
    ("000001010110", 46),
    ("000001010111", 47),
    ("000001100100", 48),
    ("000001100101", 49),
    ("000001010010", 50),
    ("000001010011", 51),
    ("000000100100", 52),
    ("000000110111", 53),
    ("000000111000", 54),
    ("000000100111", 55),
    ("000000101000", 56),
    ("000001011000", 57),
    ("000001011001", 58),
    ("000000101011", 59),
    ("000000101100", 60),
    ("000001011010", 61),
    ("000001100110", 62),
    ("000001100111", 63),
];

/// T.4 Table 3 - white make-up codes, 64 to 1728.
pub static WHITE_MAKEUP_CODES: [(&str, u16); 27] = [
    ("11011", 64),
    ("10010", 128),
    ("010111", 192),
    ("0110111", 256),
    ("00110110", 320),
    ("00110111", 384),
    ("01100100", 448),
    ("01100101", 512),
    ("01101000", 576),
    ("01100111", 640),
    ("011001100", 704),
    ("011001101", 768),
    ("011010010", 832),
    ("011010011", 896),
    ("011010100", 960),
    ("011010101", 1024),
    ("011010110", 1088),
    ("011010111", 1152),
    ("011011000", 1216),
    ("011011001", 1280),
    ("011011010", 1344),
    ("011011011", 1408),
    ("010011000", 1472),
    ("010011001", 1536),
    ("010011010", 1600),
    ("011000", 1664),
    ("010011011", 1728),
];

/// T.4 Table 3 - black make-up codes, 64 to 1728.
pub static BLACK_MAKEUP_CODES: [(&str, u16); 27] = [
    ("0000001111", 64),
    ("000011001000", 128),
    ("000011001001", 192),
    ("000001011011", 256),
    ("000000110011", 320),
    ("000000110100", 384),
    ("000000110101", 448),
    ("0000001101100", 512),
    ("0000001101101", 576),
    ("0000001001010", 640),
    ("0000001001011", 704),
    ("0000001001100", 768),
    ("0000001001101", 832),
    ("0000001110010", 896),
    ("0000001110011", 960),
    ("0000001110100", 1024),
    ("0000001110101", 1088),
    ("0000001110110", 1152),
    ("0000001110111", 1216),
    ("0000001010010", 1280),
    ("0000001010011", 1344),
    ("0000001010100", 1408),
    ("0000001010101", 1472),
    ("0000001011010", 1536),
    ("0000001011011", 1600),
    ("0000001100100", 1664),
    ("0000001100101", 1728),
];

/// Extended make-up codes shared by both colours, 1792 to 2560.
pub static EXTENDED_MAKEUP_CODES: [(&str, u16); 13] = [
    ("00000001000", 1792),
    ("00000001100", 1856),
    ("00000001101", 1920),
    ("000000010010", 1984),
    ("000000010011", 2048),
    ("000000010100", 2112),
    ("000000010101", 2176),
    ("000000010110", 2240),
    ("000000010111", 2304),
    ("000000011100", 2368),
    ("000000011101", 2432),
    ("000000011110", 2496),
    ("000000011111", 2560),
];

/// Finds the entry of `table` whose code prefixes `window`.
///
/// Returns the entry's value and the code length in bits.
pub fn lookup<T: Copy>(table: &[(&'static str, T)], window: u32) -> Option<(T, usize)> {
    table
        .iter()
        .find(|(code, _)| has_prefix(window, code))
        .map(|&(code, value)| (value, code.len()))
}

pub fn terminating_codes(white: bool) -> &'static [(&'static str, u16)] {
    if white {
        &WHITE_TERMINATING_CODES
    } else {
        &BLACK_TERMINATING_CODES
    }
}

pub fn makeup_codes(white: bool) -> &'static [(&'static str, u16)] {
    if white {
        &WHITE_MAKEUP_CODES
    } else {
        &BLACK_MAKEUP_CODES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_prefix_free(codes: &[&str]) {
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{a} is a prefix of {b}");
                }
            }
        }
    }

    fn run_codes(white: bool) -> Vec<&'static str> {
        terminating_codes(white)
            .iter()
            .chain(makeup_codes(white))
            .chain(EXTENDED_MAKEUP_CODES.iter())
            .map(|(code, _)| *code)
            .collect()
    }

    #[test]
    fn test_mode_codes_prefix_free() {
        let codes: Vec<&str> = MODE_CODES.iter().map(|(code, _)| *code).collect();
        assert_prefix_free(&codes);
    }

    #[test]
    fn test_run_codes_prefix_free() {
        assert_prefix_free(&run_codes(true));
        assert_prefix_free(&run_codes(false));
    }

    #[test]
    fn test_run_values() {
        for white in [true, false] {
            for (i, (_, run)) in terminating_codes(white).iter().enumerate() {
                assert_eq!(*run as usize, i);
            }
            for (i, (_, run)) in makeup_codes(white).iter().enumerate() {
                assert_eq!(*run as usize, 64 * (i + 1));
            }
        }
        for (i, (_, run)) in EXTENDED_MAKEUP_CODES.iter().enumerate() {
            assert_eq!(*run as usize, 1792 + 64 * i);
        }
    }

    #[test]
    fn test_eol_matches_no_run_code() {
        let window = 0b0000_0000_0001u32 << 20;
        assert!(has_prefix(window, EOL));
        assert_eq!(lookup(&WHITE_TERMINATING_CODES, window), None);
        assert_eq!(lookup(&BLACK_TERMINATING_CODES, window), None);
        assert_eq!(lookup(&EXTENDED_MAKEUP_CODES, window), None);
        assert_eq!(lookup(&MODE_CODES, window), None);
    }

    #[test]
    fn test_lookup_reports_code_length() {
        // black 2 = "11"
        assert_eq!(lookup(&BLACK_TERMINATING_CODES, 0xC000_0000), Some((2, 2)));
        // white 1664 = "011000"
        assert_eq!(lookup(&WHITE_MAKEUP_CODES, 0x6000_0000), Some((1664, 6)));
        // pass = "0001"
        assert_eq!(lookup(&MODE_CODES, 0x1000_0000), Some((Mode::Pass, 4)));
    }
}
