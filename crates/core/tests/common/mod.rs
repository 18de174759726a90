//! Test-only Group 3/Group 4 bit writer.
//!
//! Builds encoded fixtures from small reference bitmaps so decoder tests do
//! not depend on binary files. Bitmaps are written as strings, `#` for black
//! and `.` for white.

#![allow(dead_code)]

use parchment_core::ccitt::tables::{
    BLACK_MAKEUP_CODES, BLACK_TERMINATING_CODES, EOL, EXTENDED_MAKEUP_CODES, MODE_CODES, Mode,
    WHITE_MAKEUP_CODES, WHITE_TERMINATING_CODES,
};

pub const EOFB: &str = "000000000001000000000001";

#[derive(Default)]
pub struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, code: &str) {
        for c in code.chars() {
            match c {
                '0' => self.bits.push(false),
                '1' => self.bits.push(true),
                _ => {}
            }
        }
    }

    /// Zero-pads to the next byte boundary.
    pub fn align(&mut self) {
        while self.bits.len() % 8 != 0 {
            self.bits.push(false);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn finish(self) -> Vec<u8> {
        let mut out = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, bit) in self.bits.iter().enumerate() {
            if *bit {
                out[i / 8] |= 0x80 >> (i % 8);
            }
        }
        out
    }
}

/// Packs a string of `0`/`1`, ignoring any other characters.
pub fn pack_bits(bits: &str) -> Vec<u8> {
    let mut writer = BitWriter::new();
    writer.push(bits);
    writer.finish()
}

/// `true` is white.
pub fn parse_bitmap(rows: &[&str]) -> Vec<Vec<bool>> {
    rows.iter()
        .map(|row| row.chars().map(|c| c != '#').collect())
        .collect()
}

/// Packs rows the way the decoder emits them with `BlackIs1 false`:
/// white pixels set, padding bits clear.
pub fn pack_rows(rows: &[Vec<bool>]) -> Vec<u8> {
    let mut out = Vec::new();
    for row in rows {
        let mut packed = vec![0u8; row.len().div_ceil(8)];
        for (x, white) in row.iter().enumerate() {
            if *white {
                packed[x / 8] |= 0x80 >> (x % 8);
            }
        }
        out.extend(packed);
    }
    out
}

/// Deterministic page with bars, diagonals and speckle.
pub fn synthetic_page(width: usize, height: usize, seed: u64) -> Vec<Vec<bool>> {
    let mut state = seed;
    let mut rows = Vec::with_capacity(height);
    for y in 0..height {
        let mut row = Vec::with_capacity(width);
        for x in 0..width {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            let speckle = (state >> 16) % 23 == 0;
            let bar = (y / 6) % 4 == 1 && (x / 9) % 5 != 3;
            let diagonal = (x + y) % 31 < 3;
            row.push(!(bar ^ diagonal ^ speckle));
        }
        rows.push(row);
    }
    rows
}

fn code_for<T: PartialEq + Copy>(table: &[(&'static str, T)], value: T) -> &'static str {
    table
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(code, _)| *code)
        .expect("value has a code")
}

pub fn mode_code(mode: Mode) -> &'static str {
    code_for(&MODE_CODES, mode)
}

pub fn write_run(writer: &mut BitWriter, mut length: usize, white: bool) {
    while length >= 1792 {
        let chunk = (length / 64 * 64).min(2560);
        writer.push(code_for(&EXTENDED_MAKEUP_CODES, chunk as u16));
        length -= chunk;
    }
    if length >= 64 {
        let makeup = if white {
            &WHITE_MAKEUP_CODES
        } else {
            &BLACK_MAKEUP_CODES
        };
        writer.push(code_for(makeup, (length / 64 * 64) as u16));
        length %= 64;
    }
    let terminating = if white {
        &WHITE_TERMINATING_CODES
    } else {
        &BLACK_TERMINATING_CODES
    };
    writer.push(code_for(terminating, length as u16));
}

fn next_change(line: &[bool], from: isize) -> usize {
    let width = line.len();
    let (mut x, color) = if from < 0 {
        (0, true)
    } else {
        let from = from as usize;
        if from >= width {
            return width;
        }
        (from + 1, line[from])
    };
    while x < width && line[x] == color {
        x += 1;
    }
    x
}

fn next_change_of_color(line: &[bool], from: isize, white: bool) -> usize {
    let x = next_change(line, from);
    if x < line.len() && line[x] != white {
        next_change(line, x as isize)
    } else {
        x
    }
}

#[derive(Clone, Copy, Default)]
pub struct G4Options {
    pub byte_align: bool,
    pub omit_eofb: bool,
}

pub fn encode_group4(rows: &[Vec<bool>], opts: G4Options) -> Vec<u8> {
    let mut writer = BitWriter::new();
    let width = rows.first().map_or(0, |row| row.len());
    let mut reference = vec![true; width];

    for row in rows {
        if opts.byte_align {
            writer.align();
        }
        let mut a0: isize = -1;
        let mut white = true;

        while a0 < width as isize {
            let a1 = next_change(row, a0);
            let b1 = next_change_of_color(&reference, a0, !white);
            let b2 = if b1 < width {
                next_change(&reference, b1 as isize)
            } else {
                width
            };
            let delta = a1 as isize - b1 as isize;

            if b2 < a1 {
                writer.push(mode_code(Mode::Pass));
                a0 = b2 as isize;
            } else if delta.abs() <= 3 && !(b1 == 0 && a1 != 0) {
                writer.push(mode_code(Mode::Vertical(delta as i8)));
                a0 = a1 as isize;
                white = !white;
            } else {
                let a2 = if a1 < width {
                    next_change(row, a1 as isize)
                } else {
                    width
                };
                writer.push(mode_code(Mode::Horizontal));
                write_run(&mut writer, a1 - a0.max(0) as usize, white);
                write_run(&mut writer, a2 - a1, !white);
                a0 = a2 as isize;
            }
        }
        reference = row.clone();
    }

    if !opts.omit_eofb {
        if opts.byte_align {
            writer.align();
        }
        writer.push(EOFB);
    }
    writer.finish()
}

#[derive(Clone, Copy)]
pub struct G3Options {
    pub byte_align: bool,
    pub rtc: bool,
    /// Leave out a zero-length black run closing a row that ends white.
    pub omit_final_black: bool,
}

impl Default for G3Options {
    fn default() -> Self {
        G3Options {
            byte_align: false,
            rtc: true,
            omit_final_black: false,
        }
    }
}

fn write_eol(writer: &mut BitWriter, byte_align: bool) {
    if byte_align {
        while (writer.len() + EOL.len()) % 8 != 0 {
            writer.push("0");
        }
    }
    writer.push(EOL);
}

pub fn run_lengths(row: &[bool]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut color = true;
    let mut length = 0;
    for &pixel in row {
        if pixel == color {
            length += 1;
        } else {
            runs.push(length);
            color = pixel;
            length = 1;
        }
    }
    runs.push(length);
    runs
}

pub fn encode_group3(rows: &[Vec<bool>], opts: G3Options) -> Vec<u8> {
    let mut writer = BitWriter::new();

    for row in rows {
        write_eol(&mut writer, opts.byte_align);
        let mut runs = run_lengths(row);
        if runs.len() % 2 == 1 && !opts.omit_final_black {
            runs.push(0);
        }
        for (i, run) in runs.iter().enumerate() {
            write_run(&mut writer, *run, i % 2 == 0);
        }
    }

    if opts.rtc {
        for _ in 0..6 {
            write_eol(&mut writer, opts.byte_align);
        }
    }
    writer.finish()
}
