/// Request counter of one hook instance.
///
/// Each issued request gets the next number; only the holder of the latest
/// number may write the slot's state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestSequence {
    current: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier one.
    pub fn issue(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Drop interest in the pending request without starting a new one.
    pub fn supersede(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.current
    }
}
