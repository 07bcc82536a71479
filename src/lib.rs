pub use chip8::Chip8;
pub use config::Config;
pub use display::{Display, FrameBuffer};
pub use error::Chip8Error;
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use logger::{Logger, TracingLogger};
pub use memory::Memory;
pub use opcode::Opcode;
pub use state::State;
pub use timers::Timers;

mod chip8;
mod config;
pub mod constants;
mod display;
mod error;
mod instruction;
mod keypad;
mod logger;
mod memory;
mod opcode;
mod operations;
mod state;
mod timers;
