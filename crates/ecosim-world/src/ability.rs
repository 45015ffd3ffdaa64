//! The human's Immortality ability.

use serde::{Deserialize, Serialize};

/// Turns the ability stays active once triggered
pub const IMMORTALITY_DURATION: u32 = 5;
/// Turns before the ability can be armed again after it wears off
pub const IMMORTALITY_COOLDOWN: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityStatus {
    Ready,
    /// Armed, activates on the owner's next action
    Armed,
    Active { turns_left: u32 },
    Cooldown { turns_left: u32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Immortality {
    armed: bool,
    active_left: u32,
    cooldown_left: u32,
}

impl Immortality {
    pub fn is_active(&self) -> bool {
        self.active_left > 0
    }

    pub fn is_ready(&self) -> bool {
        !self.is_active() && self.cooldown_left == 0
    }

    /// Request activation on the next action. Returns false when not ready.
    pub fn arm(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.armed = true;
        true
    }

    /// Runs at the start of the owner's action: count down, then activate if armed.
    pub fn begin_turn(&mut self) {
        if self.active_left > 0 {
            self.active_left -= 1;
            if self.active_left == 0 {
                self.cooldown_left = IMMORTALITY_COOLDOWN;
            }
        } else if self.cooldown_left > 0 {
            self.cooldown_left -= 1;
        }

        if self.armed && self.is_ready() {
            self.active_left = IMMORTALITY_DURATION;
        }
        self.armed = false;
    }

    pub fn status(&self) -> AbilityStatus {
        if self.active_left > 0 {
            AbilityStatus::Active {
                turns_left: self.active_left,
            }
        } else if self.cooldown_left > 0 {
            AbilityStatus::Cooldown {
                turns_left: self.cooldown_left,
            }
        } else if self.armed {
            AbilityStatus::Armed
        } else {
            AbilityStatus::Ready
        }
    }
}
