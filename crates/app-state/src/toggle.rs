//! Boolean state cell with a flip operation

use serde::{Deserialize, Serialize};

/// A boolean that is flipped rather than assigned
///
/// Components use it for two-state UI (expanded/collapsed, shown/hidden)
/// where the only transition is "the other one".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Toggle(bool);

impl Toggle {
    /// Create a toggle with the given initial value
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    /// Current value
    pub const fn get(&self) -> bool {
        self.0
    }

    /// Flip the value and return the new one
    pub fn toggle(&mut self) -> bool {
        self.0 = !self.0;
        self.0
    }

    /// Assign directly
    pub fn set(&mut self, value: bool) {
        self.0 = value;
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        toggle.0
    }
}
