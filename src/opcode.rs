use std::fmt;

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, read big-endian from two consecutive bytes.
/// Their behavior is cased on some combination of:
/// - `(n, _, _, _)` the family; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within families `8`
/// - `(_, _, n, n)` specific behavior within families `0`, `E` and `F`
///
/// Nibbles not used to determine the operation carry operands.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` a byte that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` the register Vx or the range V0..=Vx
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` the height of a sprite
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// The Opcode's component nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    /// `[f___]`
    pub fn family(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// `[_x__]`
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// `[__y_]`
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// `[__kk]`
    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// `[_adr]`
    pub fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode(word)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OP: Opcode = Opcode(0xABCD);

    #[test]
    fn test_from_word() {
        assert_eq!(Opcode::from(0xABCD_u16), OP);
    }

    #[test]
    fn test_nibbles() {
        assert_eq!(OP.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_fields() {
        assert_eq!(OP.family(), 0xA);
        assert_eq!(OP.x(), 0xB);
        assert_eq!(OP.y(), 0xC);
        assert_eq!(OP.n(), 0xD);
        assert_eq!(OP.kk(), 0xCD);
        assert_eq!(OP.addr(), 0x0BCD);
    }

    #[test]
    fn test_displays_as_hex() {
        assert_eq!(Opcode(0x00E0).to_string(), "00E0");
    }
}
