/// # Timers
/// Two 8-bit countdown timers decremented at 60Hz, independently of how many instructions run.
/// - `delay` is readable by programs
/// - `sound` beeps while it counts down
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrements both timers toward zero.
    ///
    /// Returns true when a tone is due, i.e. the sound timer was exactly 1 before this tick.
    pub fn tick(&mut self) -> bool {
        self.delay = self.delay.saturating_sub(1);
        let tone_due = self.sound == 1;
        self.sound = self.sound.saturating_sub(1);
        tone_due
    }
}
