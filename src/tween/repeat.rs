//! Repeat policies shared by tweens and frame animations

use serde::{Deserialize, Serialize};

/// How a tween or frame animation behaves when it reaches the end of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatPolicy {
    /// Run one cycle, then complete
    #[default]
    PlayOnce,
    /// Restart from the beginning until the count runs out
    Repeat,
    /// Alternate direction at the end of every cycle
    Yoyo,
    /// Run one cycle from the end back to the beginning
    Reverse,
    /// Like `Repeat`, but every cycle runs backwards
    ReverseRepeat,
    /// Use whatever the frame animation was authored with.
    /// Tweens have no authored policy and treat this as `PlayOnce`.
    FromAnimation,
}

impl RepeatPolicy {
    /// True if the first cycle runs end to beginning.
    pub fn starts_reversed(self) -> bool {
        matches!(self, RepeatPolicy::Reverse | RepeatPolicy::ReverseRepeat)
    }

    /// True if the policy can run more than one cycle.
    pub fn repeats(self) -> bool {
        matches!(
            self,
            RepeatPolicy::Repeat | RepeatPolicy::Yoyo | RepeatPolicy::ReverseRepeat
        )
    }
}

/// Number of cycles a repeating policy runs in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatCount {
    /// Total cycles; 0 is treated as 1
    Times(u32),
    Infinite,
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::Times(1)
    }
}

impl RepeatCount {
    /// Consume one cycle. Returns false once no cycles are left to run.
    pub fn next_cycle(&mut self) -> bool {
        match self {
            RepeatCount::Infinite => true,
            RepeatCount::Times(n) => {
                if *n <= 1 {
                    *n = 0;
                    false
                } else {
                    *n -= 1;
                    true
                }
            }
        }
    }
}
