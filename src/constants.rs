/// Width of the display in pixels
pub const DISPLAY_WIDTH: usize = 64;

/// Height of the display in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of cells in the display buffer
pub const DISPLAY_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Size of the addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Mask applied to every memory access
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Address at which programs are loaded and execution starts
pub const PROGRAM_START: u16 = 0x200;

/// Largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of nested subroutine calls the stack can hold
pub const STACK_SIZE: usize = 16;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// Bytes per glyph of the built-in font
pub const GLYPH_SIZE: u16 = 5;

/// A ~540Hz CPU against a 60Hz timer runs 9 instructions per timer tick
pub const CYCLES_PER_FRAME: u32 = 9;

/// # Sprite sheet
/// Hexadecimal digits 0..F, 5 bytes each, stored at the start of memory.
/// Each row is the high nibble of a byte; `F0 90 90 90 F0` draws a `0`:
/// ```text
/// ####
/// #  #
/// #  #
/// #  #
/// ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
