use std::io::Read;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::Config;
use crate::display::{Display, FrameBuffer};
use crate::error::Result;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::logger::{Logger, TracingLogger};
use crate::opcode::Opcode;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `keypad` with public interfaces for manipulating it
///  - the random number generator behind `Cxkk`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - inspecting its display buffer for rendering by some display
///
/// The host decides the cadence: typically `config.cycles_per_frame` calls to `cycle` for every
/// call to `tick_timers`, 60 times a second. `run_frame` does exactly that once.
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    config: Config,
    rng: Box<dyn RngCore>,
    logger: Box<dyn Logger>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            keypad: Keypad::default(),
            config,
            rng: Box::new(rng),
            logger: Box::new(TracingLogger),
        }
    }

    /// Replaces the default `tracing` logger
    pub fn with_logger(mut self, logger: Box<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replaces the generator used by `Cxkk`
    pub fn with_rng(mut self, rng: Box<dyn RngCore>) -> Self {
        self.rng = rng;
        self
    }

    /// Installs a program at `0x200` and resets the CPU to run it.
    ///
    /// Registers, timers, the stack and the display are reset; the font and any memory past the
    /// end of the program are kept.
    ///
    /// # Errors
    /// `ProgramTooLarge` if the program doesn't fit, in which case nothing changes.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let mut state = State {
            memory: self.state.memory,
            ..State::new()
        };
        state.memory.load_program(program)?;
        state.display.clear();
        self.state = state;
        self.logger.info(&format!("loaded {} byte program", program.len()));
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it
    ///
    /// Unknown opcodes are logged and skipped.
    ///
    /// # Errors
    /// `StackOverflow` or `StackUnderflow` if a call or return faults. The CPU is left exactly
    /// as it was before the cycle, with the pc on the faulting instruction.
    pub fn cycle(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let op = self.get_op();
        let instruction = Instruction::decode(op);
        match instruction {
            Instruction::Unknown(_) => self
                .logger
                .warn(&format!("{:03X}: unknown opcode {}, skipping", pc, op)),
            _ => self.logger.debug(&format!(
                "{:03X}: {} {} v{:02X?} i{:04X}",
                pc, op, instruction, self.state.v, self.state.i
            )),
        }

        let fetched = State {
            pc: pc.wrapping_add(0x2),
            ..self.state
        };
        match instruction.execute(&fetched, &self.keypad, &mut *self.rng) {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(err) => {
                self.logger
                    .warn(&format!("{:03X}: {} faulted: {}", pc, instruction, err));
                Err(err)
            }
        }
    }

    /// Decrements both timers toward zero
    ///
    /// Returns true if a tone is due.
    pub fn tick_timers(&mut self) -> bool {
        let tone_due = self.state.timers.tick();
        if tone_due {
            self.logger.debug("tone due");
        }
        tone_due
    }

    /// Runs `config.cycles_per_frame` instructions then ticks the timers once
    ///
    /// Returns true if a tone is due.
    ///
    /// # Errors
    /// Stops at the first faulting instruction, without ticking the timers.
    pub fn run_frame(&mut self) -> Result<bool> {
        for _ in 0..self.config.cycles_per_frame {
            self.cycle()?;
        }
        Ok(self.tick_timers())
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index of the key on the keypad, 0x0..=0xF
    /// * `down` whether it is pressed
    pub fn set_key(&mut self, key: u8, down: bool) {
        if !self.keypad.set(key, down) {
            self.logger.warn(&format!("ignoring unknown key {:#04X}", key));
        }
    }

    pub fn display(&self) -> &Display {
        &self.state.display
    }

    pub fn display_buffer(&self) -> &FrameBuffer {
        self.state.display.pixels()
    }

    /// Returns whether the display should be redrawn and clears the flag
    pub fn take_dirty(&mut self) -> bool {
        self.state.display.take_dirty()
    }

    pub fn sound_timer_value(&self) -> u8 {
        self.state.timers.sound
    }

    pub fn delay_timer_value(&self) -> u8 {
        self.state.timers.delay
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the opcode currently pointed at by the pc.
    fn get_op(&self) -> Opcode {
        Opcode::from(self.state.memory.read_word(self.state.pc))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
