use thiserror::Error;

#[derive(Error, Debug)]
pub enum Chip8Error {
    #[error("program of {size} bytes does not fit in the {max} bytes available")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("could not read ROM: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
