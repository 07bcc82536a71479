use std::fmt;

use rand::RngCore;

use crate::error::Result;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations as ops;
use crate::state::State;

/// A decoded Chip-8 instruction with its operands.
///
/// `x` and `y` are register indexes, `kk` an immediate byte, `addr` a 12-bit address and `n`
/// a sprite height.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Instruction {
    Clear,
    Return,
    Jump { addr: u16 },
    Call { addr: u16 },
    SkipEqual { x: u8, kk: u8 },
    SkipNotEqual { x: u8, kk: u8 },
    SkipRegEqual { x: u8, y: u8 },
    Load { x: u8, kk: u8 },
    Add { x: u8, kk: u8 },
    Move { x: u8, y: u8 },
    Or { x: u8, y: u8 },
    And { x: u8, y: u8 },
    Xor { x: u8, y: u8 },
    AddReg { x: u8, y: u8 },
    Sub { x: u8, y: u8 },
    ShiftRight { x: u8 },
    SubNeg { x: u8, y: u8 },
    ShiftLeft { x: u8 },
    SkipRegNotEqual { x: u8, y: u8 },
    LoadIndex { addr: u16 },
    JumpOffset { addr: u16 },
    Random { x: u8, kk: u8 },
    Draw { x: u8, y: u8, n: u8 },
    SkipPressed { x: u8 },
    SkipReleased { x: u8 },
    LoadDelay { x: u8 },
    WaitKey { x: u8 },
    SetDelay { x: u8 },
    SetSound { x: u8 },
    AddIndex { x: u8 },
    LoadGlyph { x: u8 },
    Bcd { x: u8 },
    Store { x: u8 },
    Read { x: u8 },
    /// Matches no known pattern; executes as a no-op
    Unknown(Opcode),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode.
    ///
    /// The family nibble picks the instruction directly, except for families `0`, `8`, `E`
    /// and `F` which share a family between several instructions and are cased again on
    /// their low nibble or low byte.
    pub fn decode(op: Opcode) -> Self {
        let (family, x, y, n) = op.nibbles();
        let (kk, addr) = (op.kk(), op.addr());
        match family {
            0x0 => match addr {
                0x0E0 => Instruction::Clear,
                0x0EE => Instruction::Return,
                _ => Instruction::Unknown(op),
            },
            0x1 => Instruction::Jump { addr },
            0x2 => Instruction::Call { addr },
            0x3 => Instruction::SkipEqual { x, kk },
            0x4 => Instruction::SkipNotEqual { x, kk },
            0x5 if n == 0x0 => Instruction::SkipRegEqual { x, y },
            0x6 => Instruction::Load { x, kk },
            0x7 => Instruction::Add { x, kk },
            0x8 => match n {
                0x0 => Instruction::Move { x, y },
                0x1 => Instruction::Or { x, y },
                0x2 => Instruction::And { x, y },
                0x3 => Instruction::Xor { x, y },
                0x4 => Instruction::AddReg { x, y },
                0x5 => Instruction::Sub { x, y },
                0x6 => Instruction::ShiftRight { x },
                0x7 => Instruction::SubNeg { x, y },
                0xE => Instruction::ShiftLeft { x },
                _ => Instruction::Unknown(op),
            },
            0x9 if n == 0x0 => Instruction::SkipRegNotEqual { x, y },
            0xA => Instruction::LoadIndex { addr },
            0xB => Instruction::JumpOffset { addr },
            0xC => Instruction::Random { x, kk },
            0xD => Instruction::Draw { x, y, n },
            0xE => match kk {
                0x9E => Instruction::SkipPressed { x },
                0xA1 => Instruction::SkipReleased { x },
                _ => Instruction::Unknown(op),
            },
            0xF => match kk {
                0x07 => Instruction::LoadDelay { x },
                0x0A => Instruction::WaitKey { x },
                0x15 => Instruction::SetDelay { x },
                0x18 => Instruction::SetSound { x },
                0x1E => Instruction::AddIndex { x },
                0x29 => Instruction::LoadGlyph { x },
                0x33 => Instruction::Bcd { x },
                0x55 => Instruction::Store { x },
                0x65 => Instruction::Read { x },
                _ => Instruction::Unknown(op),
            },
            _ => Instruction::Unknown(op),
        }
    }

    /// Runs the instruction against `state`, which must already have its pc advanced past it.
    ///
    /// Returns the next state, or an error if the instruction faults; `state` is never modified.
    pub fn execute(self, state: &State, keypad: &Keypad, rng: &mut dyn RngCore) -> Result<State> {
        let state = match self {
            Instruction::Clear => ops::clr(state),
            Instruction::Return => ops::rts(state)?,
            Instruction::Jump { addr } => ops::jump(state, addr),
            Instruction::Call { addr } => ops::call(state, addr)?,
            Instruction::SkipEqual { x, kk } => ops::ske(state, x, kk),
            Instruction::SkipNotEqual { x, kk } => ops::skne(state, x, kk),
            Instruction::SkipRegEqual { x, y } => ops::skre(state, x, y),
            Instruction::Load { x, kk } => ops::load(state, x, kk),
            Instruction::Add { x, kk } => ops::add(state, x, kk),
            Instruction::Move { x, y } => ops::mv(state, x, y),
            Instruction::Or { x, y } => ops::or(state, x, y),
            Instruction::And { x, y } => ops::and(state, x, y),
            Instruction::Xor { x, y } => ops::xor(state, x, y),
            Instruction::AddReg { x, y } => ops::addr(state, x, y),
            Instruction::Sub { x, y } => ops::sub(state, x, y),
            Instruction::ShiftRight { x } => ops::shr(state, x),
            Instruction::SubNeg { x, y } => ops::subn(state, x, y),
            Instruction::ShiftLeft { x } => ops::shl(state, x),
            Instruction::SkipRegNotEqual { x, y } => ops::skrne(state, x, y),
            Instruction::LoadIndex { addr } => ops::loadi(state, addr),
            Instruction::JumpOffset { addr } => ops::jumpi(state, addr),
            Instruction::Random { x, kk } => ops::rand(state, x, kk, rng),
            Instruction::Draw { x, y, n } => ops::draw(state, x, y, n),
            Instruction::SkipPressed { x } => ops::skpr(state, x, keypad),
            Instruction::SkipReleased { x } => ops::skup(state, x, keypad),
            Instruction::LoadDelay { x } => ops::moved(state, x),
            Instruction::WaitKey { x } => ops::keyd(state, x, keypad),
            Instruction::SetDelay { x } => ops::loads(state, x),
            Instruction::SetSound { x } => ops::ld(state, x),
            Instruction::AddIndex { x } => ops::addi(state, x),
            Instruction::LoadGlyph { x } => ops::ldspr(state, x),
            Instruction::Bcd { x } => ops::bcd(state, x),
            Instruction::Store { x } => ops::stor(state, x),
            Instruction::Read { x } => ops::read(state, x),
            Instruction::Unknown(_) => *state,
        };
        Ok(state)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Clear => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump { addr } => write!(f, "JP {:03X}", addr),
            Instruction::Call { addr } => write!(f, "CALL {:03X}", addr),
            Instruction::SkipEqual { x, kk } => write!(f, "SE V{:X}, {:02X}", x, kk),
            Instruction::SkipNotEqual { x, kk } => write!(f, "SNE V{:X}, {:02X}", x, kk),
            Instruction::SkipRegEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::Load { x, kk } => write!(f, "LD V{:X}, {:02X}", x, kk),
            Instruction::Add { x, kk } => write!(f, "ADD V{:X}, {:02X}", x, kk),
            Instruction::Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight { x } => write!(f, "SHR V{:X}", x),
            Instruction::SubNeg { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft { x } => write!(f, "SHL V{:X}", x),
            Instruction::SkipRegNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LoadIndex { addr } => write!(f, "LD I, {:03X}", addr),
            Instruction::JumpOffset { addr } => write!(f, "JP V0, {:03X}", addr),
            Instruction::Random { x, kk } => write!(f, "RND V{:X}, {:02X}", x, kk),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:X}", x, y, n),
            Instruction::SkipPressed { x } => write!(f, "SKP V{:X}", x),
            Instruction::SkipReleased { x } => write!(f, "SKNP V{:X}", x),
            Instruction::LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSound { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            Instruction::Bcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::Store { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::Read { x } => write!(f, "LD V{:X}, [I]", x),
            Instruction::Unknown(op) => write!(f, "??? {}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(word: u16) -> Instruction {
        Instruction::decode(Opcode(word))
    }

    #[test]
    fn test_decodes_family_0_on_low_byte() {
        assert_eq!(decode(0x00E0), Instruction::Clear);
        assert_eq!(decode(0x00EE), Instruction::Return);
        // legacy machine code call
        assert_eq!(decode(0x0123), Instruction::Unknown(Opcode(0x0123)));
    }

    #[test]
    fn test_decodes_address_families() {
        assert_eq!(decode(0x1ABC), Instruction::Jump { addr: 0xABC });
        assert_eq!(decode(0x2ABC), Instruction::Call { addr: 0xABC });
        assert_eq!(decode(0xAABC), Instruction::LoadIndex { addr: 0xABC });
        assert_eq!(decode(0xBABC), Instruction::JumpOffset { addr: 0xABC });
    }

    #[test]
    fn test_decodes_byte_families() {
        assert_eq!(decode(0x3122), Instruction::SkipEqual { x: 1, kk: 0x22 });
        assert_eq!(decode(0x4122), Instruction::SkipNotEqual { x: 1, kk: 0x22 });
        assert_eq!(decode(0x6122), Instruction::Load { x: 1, kk: 0x22 });
        assert_eq!(decode(0x7122), Instruction::Add { x: 1, kk: 0x22 });
        assert_eq!(decode(0xC10F), Instruction::Random { x: 1, kk: 0x0F });
    }

    #[test]
    fn test_decodes_register_pairs_only_with_zero_nibble() {
        assert_eq!(decode(0x5120), Instruction::SkipRegEqual { x: 1, y: 2 });
        assert_eq!(decode(0x5121), Instruction::Unknown(Opcode(0x5121)));
        assert_eq!(decode(0x9120), Instruction::SkipRegNotEqual { x: 1, y: 2 });
        assert_eq!(decode(0x912F), Instruction::Unknown(Opcode(0x912F)));
    }

    #[test]
    fn test_decodes_family_8_on_low_nibble() {
        assert_eq!(decode(0x8120), Instruction::Move { x: 1, y: 2 });
        assert_eq!(decode(0x8121), Instruction::Or { x: 1, y: 2 });
        assert_eq!(decode(0x8122), Instruction::And { x: 1, y: 2 });
        assert_eq!(decode(0x8123), Instruction::Xor { x: 1, y: 2 });
        assert_eq!(decode(0x8124), Instruction::AddReg { x: 1, y: 2 });
        assert_eq!(decode(0x8125), Instruction::Sub { x: 1, y: 2 });
        assert_eq!(decode(0x8126), Instruction::ShiftRight { x: 1 });
        assert_eq!(decode(0x8127), Instruction::SubNeg { x: 1, y: 2 });
        assert_eq!(decode(0x812E), Instruction::ShiftLeft { x: 1 });
        assert_eq!(decode(0x8128), Instruction::Unknown(Opcode(0x8128)));
    }

    #[test]
    fn test_decodes_draw() {
        assert_eq!(decode(0xD125), Instruction::Draw { x: 1, y: 2, n: 5 });
    }

    #[test]
    fn test_decodes_family_e_on_low_byte() {
        assert_eq!(decode(0xE19E), Instruction::SkipPressed { x: 1 });
        assert_eq!(decode(0xE1A1), Instruction::SkipReleased { x: 1 });
        assert_eq!(decode(0xE1A2), Instruction::Unknown(Opcode(0xE1A2)));
    }

    #[test]
    fn test_decodes_family_f_on_low_byte() {
        assert_eq!(decode(0xF107), Instruction::LoadDelay { x: 1 });
        assert_eq!(decode(0xF10A), Instruction::WaitKey { x: 1 });
        assert_eq!(decode(0xF115), Instruction::SetDelay { x: 1 });
        assert_eq!(decode(0xF118), Instruction::SetSound { x: 1 });
        assert_eq!(decode(0xF11E), Instruction::AddIndex { x: 1 });
        assert_eq!(decode(0xF129), Instruction::LoadGlyph { x: 1 });
        assert_eq!(decode(0xF133), Instruction::Bcd { x: 1 });
        assert_eq!(decode(0xF155), Instruction::Store { x: 1 });
        assert_eq!(decode(0xF165), Instruction::Read { x: 1 });
        assert_eq!(decode(0xF1FF), Instruction::Unknown(Opcode(0xF1FF)));
    }

    #[test]
    fn test_displays_mnemonics() {
        assert_eq!(decode(0x00E0).to_string(), "CLS");
        assert_eq!(decode(0x1ABC).to_string(), "JP ABC");
        assert_eq!(decode(0x8AB4).to_string(), "ADD VA, VB");
        assert_eq!(decode(0xD125).to_string(), "DRW V1, V2, 5");
        assert_eq!(decode(0xF355).to_string(), "LD [I], V3");
        assert_eq!(decode(0xFFFF).to_string(), "??? FFFF");
    }
}
