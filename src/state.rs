use crate::constants::{PROGRAM_START, STACK_SIZE};
use crate::display::Display;
use crate::error::{Chip8Error, Result};
use crate::memory::Memory;
use crate::timers::Timers;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register, overwritten by carries, borrows, shifts and collisions
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound)
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
/// - 64x32 display buffer
#[derive(Debug, Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub timers: Timers,
    pub memory: Memory,
    pub display: Display,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            timers: Timers::default(),
            memory: Memory::new(),
            display: Display::new(),
        }
    }

    /// Pushes a return address
    ///
    /// # Errors
    /// `StackOverflow` if all 16 entries are in use.
    pub fn push(&mut self, addr: u16) -> Result<()> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Chip8Error::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address
    ///
    /// # Errors
    /// `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
