//! Packed 1-bit-per-pixel row buffer.
//!
//! Rows are `stride = ceil(width / 8)` bytes, most significant bit first.
//! A new row is all zero bits. The decoder only ever sets bits for white
//! runs, so a set bit reads as white and a clear bit as black; this is the
//! PDF `BlackIs1 false` polarity, and [`PixelPlane::invert`] produces the
//! `BlackIs1 true` one.

#[derive(Debug, Clone, Default)]
pub struct PixelPlane {
    width: usize,
    stride: usize,
    data: Vec<u8>,
}

impl PixelPlane {
    pub fn new(width: usize) -> Self {
        PixelPlane {
            width,
            stride: width.div_ceil(8),
            data: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn rows(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.data.len() / self.stride
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Appends a blank row.
    pub fn add_row(&mut self) {
        self.data.resize(self.data.len() + self.stride, 0);
    }

    /// Drops every row from `rows` on.
    pub fn truncate_rows(&mut self, rows: usize) {
        self.data.truncate(rows * self.stride);
    }

    pub fn pixel_is_white(&self, row: usize, x: usize) -> bool {
        let byte = self.data[row * self.stride + x / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    pub fn set_pixel(&mut self, row: usize, x: usize) {
        self.data[row * self.stride + x / 8] |= 0x80 >> (x % 8);
    }

    /// Paints `length` pixels from `start`. Black runs leave the row as is.
    ///
    /// The run is clipped to the row width.
    pub fn fill_run(&mut self, row: usize, start: usize, length: usize, white: bool) {
        if !white {
            return;
        }
        let end = start.saturating_add(length).min(self.width);
        let base = row * self.stride;
        let mut x = start;

        // Leading partial byte, whole bytes, then the tail.
        while x < end && x % 8 != 0 {
            self.data[base + x / 8] |= 0x80 >> (x % 8);
            x += 1;
        }
        while x + 8 <= end {
            self.data[base + x / 8] = 0xFF;
            x += 8;
        }
        while x < end {
            self.data[base + x / 8] |= 0x80 >> (x % 8);
            x += 1;
        }
    }

    /// First pixel right of `from` whose colour differs from the pixel at
    /// `from`, or `width` if there is none.
    ///
    /// A negative `from` stands for the imaginary white pixel before
    /// column 0.
    pub fn next_changing_element(&self, row: usize, from: isize) -> usize {
        let (mut x, color) = if from < 0 {
            (0, true)
        } else {
            let from = from as usize;
            if from >= self.width {
                return self.width;
            }
            (from + 1, self.pixel_is_white(row, from))
        };

        while x < self.width && self.pixel_is_white(row, x) == color {
            x += 1;
        }
        x
    }

    /// First changing element right of `from` that has colour `white`.
    ///
    /// Changing elements alternate in colour, so this is either the first
    /// changing element or the one after it.
    pub fn next_changing_element_of_color(&self, row: usize, from: isize, white: bool) -> usize {
        let x = self.next_changing_element(row, from);
        if x < self.width && self.pixel_is_white(row, x) != white {
            self.next_changing_element(row, x as isize)
        } else {
            x
        }
    }

    /// Flips every bit, switching between the two output polarities.
    pub fn invert(&mut self) {
        for byte in &mut self.data {
            *byte = !*byte;
        }
    }
}
