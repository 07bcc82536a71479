use crate::constants::{ADDRESS_MASK, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x050` the built-in sprite sheet
/// - `0x200..` the loaded program
///
/// Every access is masked to 12 bits, so addresses past `0xFFF` wrap to the start.
#[derive(Debug, Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.load_font();
        memory
    }

    /// Copies the sprite sheet into `0x000..0x050`
    pub fn load_font(&mut self) {
        self.bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }

    /// Copies a program into memory starting at `0x200`.
    ///
    /// Memory past the end of the program is left as it was.
    ///
    /// # Errors
    /// `ProgramTooLarge` if the program doesn't fit; memory is left untouched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDRESS_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDRESS_MASK) as usize] = value;
    }

    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_font_is_loaded_at_zero() {
        let memory = Memory::new();
        assert_eq!(memory.as_slice()[0x000..0x050], SPRITE_SHEET[..]);
        // glyph `d` lives at 5 * d
        assert_eq!(memory.as_slice()[0x00A..0x00F], [0xF0, 0x10, 0xF0, 0x80, 0xF0]);
        assert!(memory.as_slice()[0x050..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_loads_program_at_0x200() {
        let mut memory = Memory::new();
        memory.load_program(&[0x60, 0x14, 0x70, 0x05]).unwrap();
        assert_eq!(memory.as_slice()[0x200..0x204], [0x60, 0x14, 0x70, 0x05]);
    }

    #[test]
    fn test_accepts_program_filling_memory() {
        let mut memory = Memory::new();
        let program = [0xAB; MAX_PROGRAM_SIZE];
        memory.load_program(&program).unwrap();
        assert_eq!(memory.read(0xFFF), 0xAB);
    }

    #[test]
    fn test_rejects_oversized_program() {
        let mut memory = Memory::new();
        let program = [0xAB; MAX_PROGRAM_SIZE + 1];
        let err = memory.load_program(&program).unwrap_err();
        assert!(matches!(
            err,
            Chip8Error::ProgramTooLarge {
                size: 3585,
                max: 3584
            }
        ));
        assert_eq!(memory.read(0x200), 0x00);
    }

    #[test]
    fn test_keeps_residual_bytes_past_program() {
        let mut memory = Memory::new();
        memory.load_program(&[0x11, 0x22, 0x33, 0x44]).unwrap();
        memory.load_program(&[0xAA, 0xBB]).unwrap();
        assert_eq!(memory.as_slice()[0x200..0x204], [0xAA, 0xBB, 0x33, 0x44]);
    }

    #[test]
    fn test_masks_addresses() {
        let mut memory = Memory::new();
        memory.write(0x1005, 0x42);
        assert_eq!(memory.read(0x005), 0x42);
        assert_eq!(memory.read(0xF005), 0x42);
    }

    #[test]
    fn test_reads_big_endian_words() {
        let mut memory = Memory::new();
        memory.write(0x200, 0xAA);
        memory.write(0x201, 0xBB);
        assert_eq!(memory.read_word(0x200), 0xAABB);
    }
}
