use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad:
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// Written by the host between cycles, read by `Ex9E`, `ExA1` and `Fx0A`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    /// Sets the pressed status of `key`.
    ///
    /// Returns false, leaving the keypad unchanged, if `key` is not a keypad index.
    pub fn set(&mut self, key: u8, down: bool) -> bool {
        match self.keys.get_mut(key as usize) {
            Some(slot) => {
                *slot = down;
                true
            }
            None => false,
        }
    }

    /// Keys past `0xF` don't exist and are never down
    pub fn is_down(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest-numbered key currently down
    pub fn first_down(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }
}
