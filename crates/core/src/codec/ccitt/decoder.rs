//! Group 3 one-dimensional and Group 4 two-dimensional decoding.
//!
//! ITU-T Recommendation T.4 - Group 3 facsimile
//! ITU-T Recommendation T.6 - Group 4 facsimile
//!
//! The whole decoder state besides the pixel buffer is a [`ScanState`].
//! Every coding step takes the state by value and hands back the next one,
//! so the row loops below are the entire transition table.

use tracing::{debug, trace, warn};

use super::bitwindow::{BitWindow, has_prefix};
use super::params::{CcittParams, EncodingMode};
use super::plane::PixelPlane;
use super::tables::{
    EOL, EXTENDED_MAKEUP_CODES, MODE_CODES, Mode, lookup, makeup_codes, terminating_codes,
};
use crate::error::{CcittError, CodeTable};

/// Scan position of the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanState {
    /// Current row, 0-based.
    pub row: usize,
    /// Reference position `a0` on the current row; -1 is before column 0.
    pub a0: isize,
    /// Colour of the run starting at `a0`.
    pub white: bool,
    /// Bit cursor into the encoded data.
    pub pos: usize,
}

impl ScanState {
    /// State at the start of `row`, with the bit cursor at 0.
    pub fn new(row: usize) -> Self {
        ScanState {
            row,
            a0: -1,
            white: true,
            pos: 0,
        }
    }

    fn next_row(self) -> Self {
        ScanState {
            row: self.row + 1,
            a0: -1,
            white: true,
            pos: self.pos,
        }
    }

    fn start(&self) -> usize {
        self.a0.max(0) as usize
    }
}

/// Result of a decode pass: the rows produced and the error that stopped
/// decoding early, if any.
#[derive(Debug)]
pub struct Decoded {
    pub plane: PixelPlane,
    pub error: Option<CcittError>,
    /// Bits consumed from the encoded data.
    pub bits_read: usize,
}

/// Single-use CCITT decoder over an in-memory buffer.
pub struct Decoder<'a> {
    window: BitWindow<'a>,
    plane: PixelPlane,
    params: &'a CcittParams,
}

impl<'a> Decoder<'a> {
    /// `data` must already be in most-significant-bit-first order.
    pub fn new(data: &'a [u8], params: &'a CcittParams) -> Self {
        Decoder {
            window: BitWindow::new(data),
            plane: PixelPlane::new(params.columns),
            params,
        }
    }

    pub fn plane(&self) -> &PixelPlane {
        &self.plane
    }

    /// Direct access to the rows, for driving the coding steps by hand.
    #[doc(hidden)]
    pub fn plane_mut(&mut self) -> &mut PixelPlane {
        &mut self.plane
    }

    fn width(&self) -> isize {
        self.params.columns as isize
    }

    /// Decodes until the terminator, the row limit or the first error.
    pub fn run(mut self) -> Decoded {
        debug!(
            mode = ?self.params.mode,
            columns = self.params.columns,
            bytes = self.window.len_bits() / 8,
            "ccitt decode start"
        );

        let (state, result) = if self.params.rows == Some(0) {
            (ScanState::new(0), Ok(()))
        } else {
            match self.params.mode {
                EncodingMode::Group4 => self.run_group4(),
                EncodingMode::Group3 => self.run_group3(),
            }
        };

        // An untouched row was opened for data that never came.
        let rows = if state.a0 < 0 {
            state.row
        } else {
            state.row + 1
        };
        self.plane.truncate_rows(rows);

        if self.params.black_is_1 {
            self.plane.invert();
        }

        match &result {
            Ok(()) => {
                if !self.window.at_padding_end(state.pos) {
                    debug!(
                        pos = state.pos,
                        "ccitt data continues past the end of the image"
                    );
                }
                debug!(rows, bits = state.pos, "ccitt decode done");
            }
            Err(err) => warn!(rows, error = %err, "ccitt decode stopped"),
        }

        Decoded {
            plane: self.plane,
            error: result.err(),
            bits_read: state.pos,
        }
    }

    fn rows_reached(&self, st: &ScanState) -> bool {
        self.params.rows.is_some_and(|rows| st.row >= rows)
    }

    fn close_row(&self, st: ScanState) -> ScanState {
        trace!(row = st.row, pos = st.pos, "ccitt row done");
        st.next_row()
    }

    fn align_row_start(&self, mut st: ScanState) -> ScanState {
        if self.params.encoded_byte_align && st.a0 < 0 {
            st.pos = st.pos.next_multiple_of(8);
        }
        st
    }

    fn run_group4(&mut self) -> (ScanState, Result<(), CcittError>) {
        let mut st = ScanState::new(0);
        self.plane.add_row();

        loop {
            if st.a0 >= self.width() {
                st = self.close_row(st);
                if self.rows_reached(&st) {
                    return (st, Ok(()));
                }
                self.plane.add_row();
            }

            match self.step_group4(st) {
                Ok(Some(next)) => st = next,
                Ok(None) => return (st, Ok(())),
                Err(err) => return (st, Err(err)),
            }
        }
    }

    /// Reads one mode code and applies it. `None` means EOFB.
    fn step_group4(&mut self, st: ScanState) -> Result<Option<ScanState>, CcittError> {
        let mut st = self.align_row_start(st);
        let window = self.window.peek(st.pos)?;
        let (mode, len) = lookup(&MODE_CODES, window).ok_or(CcittError::CorruptData {
            pos: st.pos,
            table: CodeTable::Mode,
        })?;

        match mode {
            Mode::EndOfFacsimileBlock => {
                st.pos += len;
                debug!(pos = st.pos, row = st.row, "ccitt EOFB");
                Ok(None)
            }
            Mode::Extension => Err(CcittError::UnsupportedMode { pos: st.pos }),
            Mode::Pass => {
                st.pos += len;
                Ok(Some(self.pass(st)))
            }
            Mode::Horizontal => {
                st.pos += len;
                self.read_horizontal(st).map(Some)
            }
            Mode::Vertical(offset) => {
                st.pos += len;
                Ok(Some(self.vertical(st, offset)))
            }
        }
    }

    /// `b1`: first changing element on the reference row right of `a0`
    /// with the colour opposite to the current one.
    fn b1(&self, st: &ScanState) -> usize {
        if st.row == 0 {
            return self.params.columns;
        }
        self.plane
            .next_changing_element_of_color(st.row - 1, st.a0, !st.white)
    }

    /// `b2`: next changing element on the reference row after `b1`.
    fn b2(&self, st: &ScanState, b1: usize) -> usize {
        if st.row == 0 || b1 >= self.params.columns {
            return self.params.columns;
        }
        self.plane.next_changing_element(st.row - 1, b1 as isize)
    }

    /// Pass mode: the current colour runs on to below `b2`.
    pub fn pass(&mut self, mut st: ScanState) -> ScanState {
        let b1 = self.b1(&st);
        let b2 = self.b2(&st, b1);
        let start = st.start();
        if b2 > start {
            self.plane.fill_run(st.row, start, b2 - start, st.white);
        }
        st.a0 = b2 as isize;
        st
    }

    /// Vertical mode: the current run ends at `a1 = b1 + offset`.
    pub fn vertical(&mut self, mut st: ScanState, offset: i8) -> ScanState {
        let b1 = self.b1(&st);
        let a1 = (b1 as isize + offset as isize).clamp(0, self.width());

        if b1 == 0 {
            // The reference row opens with black: take a1 as the first
            // changing element without painting the run before it.
            st.a0 = a1;
            st.white = false;
            return st;
        }

        let start = st.start();
        if a1 as usize > start {
            self.plane
                .fill_run(st.row, start, a1 as usize - start, st.white);
        }
        st.a0 = a1;
        st.white = !st.white;
        st
    }

    /// Paints a horizontal-mode pair: `first` pixels of the current colour
    /// then `second` of the other. The colour is unchanged afterwards.
    pub fn horizontal(&mut self, mut st: ScanState, first: usize, second: usize) -> ScanState {
        let start = st.start();
        self.plane.fill_run(st.row, start, first, st.white);
        self.plane
            .fill_run(st.row, start.saturating_add(first), second, !st.white);

        let end = start.saturating_add(first).saturating_add(second);
        if end > self.params.columns {
            warn!(
                row = st.row,
                end,
                columns = self.params.columns,
                "ccitt runs overrun the row, clipping"
            );
        }
        st.a0 = end.min(self.params.columns) as isize;
        st
    }

    fn read_horizontal(&mut self, mut st: ScanState) -> Result<ScanState, CcittError> {
        let (first, pos) = self.read_run(st.pos, st.white)?;
        st.pos = pos;

        let second = match self.read_run(st.pos, !st.white) {
            Ok((second, pos)) => {
                st.pos = pos;
                second
            }
            Err(err) if self.params.mode == EncodingMode::Group3 && is_missing_run(&err) => {
                // Scanners often drop the last run of a line.
                let rest = self.params.columns.saturating_sub(st.start() + first);
                trace!(row = st.row, rest, error = %err, "ccitt inferring final run");
                rest
            }
            Err(err) => return Err(err),
        };

        Ok(self.horizontal(st, first, second))
    }

    /// Reads one run length starting at `pos`: any extended make-up codes,
    /// at most one make-up code, then the terminating code.
    ///
    /// Returns the run length and the bit position after it.
    pub fn read_run(&self, pos: usize, white: bool) -> Result<(usize, usize), CcittError> {
        let start = pos;
        let mut pos = pos;
        let mut length = 0usize;
        let mut matched = false;

        while let Some((run, len)) = lookup(&EXTENDED_MAKEUP_CODES, self.window.peek(pos)?) {
            length += run as usize;
            pos += len;
            matched = true;
        }

        if let Some((run, len)) = lookup(makeup_codes(white), self.window.peek(pos)?) {
            length += run as usize;
            pos += len;
            matched = true;
        }

        match lookup(terminating_codes(white), self.window.peek(pos)?) {
            Some((run, len)) => Ok((length + run as usize, pos + len)),
            None if matched => Err(CcittError::MissingTerminatingCode { pos }),
            None => Err(CcittError::CorruptData {
                pos: start,
                table: if white {
                    CodeTable::WhiteRun
                } else {
                    CodeTable::BlackRun
                },
            }),
        }
    }

    fn run_group3(&mut self) -> (ScanState, Result<(), CcittError>) {
        let mut st = ScanState::new(0);

        match self.expect_eol(st).and_then(|next| self.read_rtc(next)) {
            Ok(Rtc::Found(next)) => return (next, Ok(())),
            Ok(Rtc::Absent(next)) => st = next,
            Err(err) => return (st, Err(err)),
        }
        self.plane.add_row();

        loop {
            if st.a0 >= self.width() {
                st = self.close_row(st);
                if self.rows_reached(&st) {
                    return (st, Ok(()));
                }

                match self.expect_eol(st) {
                    Ok(next) => st = next,
                    Err(err) => return (st, Err(err)),
                }
                match self.read_rtc(st) {
                    Ok(Rtc::Found(next)) => return (next, Ok(())),
                    Ok(Rtc::Absent(next)) => st = next,
                    Err(err) => return (st, Err(err)),
                }
                self.plane.add_row();
            }

            let next = self.align_row_start(st);
            match self.read_horizontal(next) {
                Ok(next) => st = next,
                Err(err) => return (st, Err(err)),
            }
        }
    }

    /// Position after an EOL at `pos`, if there is one.
    ///
    /// With byte alignment on, zero fill bits may precede the EOL.
    fn match_eol(&self, pos: usize) -> Result<Option<usize>, CcittError> {
        let window = self.window.peek(pos)?;
        if has_prefix(window, EOL) {
            return Ok(Some(pos + EOL.len()));
        }
        if !self.params.encoded_byte_align {
            return Ok(None);
        }

        let zeros = window.leading_zeros() as usize;
        if zeros < EOL.len() - 1 {
            return Ok(None);
        }
        if zeros < 32 {
            return Ok(Some(pos + zeros + 1));
        }

        // More fill than fits in one window.
        let mut pos = pos;
        loop {
            pos += 24;
            let window = match self.window.peek(pos) {
                Ok(window) => window,
                Err(_) => return Ok(None),
            };
            let zeros = window.leading_zeros() as usize;
            if zeros < 32 {
                return Ok(Some(pos + zeros + 1));
            }
        }
    }

    fn expect_eol(&self, mut st: ScanState) -> Result<ScanState, CcittError> {
        match self.match_eol(st.pos)? {
            Some(pos) => {
                st.pos = pos;
                Ok(st)
            }
            None => Err(CcittError::MissingEol {
                pos: st.pos,
                row: st.row,
            }),
        }
    }

    /// Called right after an EOL: a second EOL starts the return-to-control
    /// sequence, which must run to six EOLs in total.
    fn read_rtc(&self, mut st: ScanState) -> Result<Rtc, CcittError> {
        let Some(pos) = self.match_eol(st.pos)? else {
            return Ok(Rtc::Absent(st));
        };
        st.pos = pos;

        for found in 2..6 {
            match self.match_eol(st.pos) {
                Ok(Some(pos)) => st.pos = pos,
                Ok(None) | Err(_) => {
                    return Err(CcittError::CorruptRtc { pos: st.pos, found });
                }
            }
        }

        debug!(pos = st.pos, rows = st.row, "ccitt RTC");
        Ok(Rtc::Found(st))
    }
}

enum Rtc {
    Found(ScanState),
    Absent(ScanState),
}

fn is_missing_run(err: &CcittError) -> bool {
    matches!(
        err,
        CcittError::MissingTerminatingCode { .. } | CcittError::CorruptData { .. }
    )
}
