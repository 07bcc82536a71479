use crate::constants::{DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH};

/// The FrameBuffer is stored row-major: pixel (x, y) is at `y * DISPLAY_WIDTH + x`
pub type FrameBuffer = [u8; DISPLAY_SIZE];

/// # Display
///
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively.
///
/// Pixels only change through `clear` and `draw_sprite`, both of which raise the dirty flag.
/// Whoever renders the buffer clears the flag with `take_dirty`.
#[derive(Debug, Copy, Clone)]
pub struct Display {
    frame_buffer: FrameBuffer,
    dirty: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            frame_buffer: [0; DISPLAY_SIZE],
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [0; DISPLAY_SIZE];
        self.dirty = true;
    }

    /// XORs a sprite onto the frame buffer with its top-left corner at (x, y).
    ///
    /// Each byte of `rows` is one 8-pixel row, most significant bit leftmost.
    /// Pixels falling off an edge wrap around to the opposite one.
    /// Returns whether any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut collision = false;
        for (row, bits) in rows.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if bits & (0x80 >> bit) == 0 {
                    continue;
                }
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                let cell = &mut self.frame_buffer[py * DISPLAY_WIDTH + px];
                collision |= *cell == 1;
                *cell ^= 1;
            }
        }
        self.dirty = true;
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[(y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + x % DISPLAY_WIDTH] == 1
    }

    pub fn pixels(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the display should be redrawn and lowers the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_draws_rows_msb_first() {
        let mut display = Display::new();
        // 1 1 0 0 0 0 0 1
        let collision = display.draw_sprite(1, 1, &[0xC1]);
        assert!(!collision);
        assert_eq!(display.pixels()[DISPLAY_WIDTH + 1..DISPLAY_WIDTH + 9], [1, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_xors_existing_pixels() {
        let mut display = Display::new();
        display.draw_sprite(2, 0, &[0x50]);
        // 0 1 0 1 already set, draw 1 1 0 0
        let collision = display.draw_sprite(2, 0, &[0xC0]);
        assert!(collision);
        assert_eq!(display.pixels()[2..6], [1, 0, 0, 1]);
    }

    #[test]
    fn test_wraps_both_axes() {
        let mut display = Display::new();
        display.draw_sprite(62, 31, &[0xF0, 0xF0]);
        assert!(display.pixel(62, 31));
        assert!(display.pixel(63, 31));
        assert!(display.pixel(0, 31));
        assert!(display.pixel(1, 31));
        assert!(display.pixel(62, 0));
        assert!(display.pixel(1, 0));
        assert!(!display.pixel(2, 0));
    }

    #[test]
    fn test_clear_marks_dirty() {
        let mut display = Display::new();
        display.draw_sprite(0, 0, &[0xFF]);
        assert!(display.take_dirty());
        display.clear();
        assert!(display.pixels().iter().all(|&p| p == 0));
        assert!(display.is_dirty());
    }

    #[test]
    fn test_take_dirty_lowers_flag() {
        let mut display = Display::new();
        assert!(!display.take_dirty());
        display.clear();
        assert!(display.take_dirty());
        assert!(!display.take_dirty());
    }
}
