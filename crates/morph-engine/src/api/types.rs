use serde::{Deserialize, Serialize};

/// One of the two image/point-set roles in a single morph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Shown at progress 0.
    A,
    /// Shown at progress 1.
    B,
}

impl Slot {
    /// The opposite slot.
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// Direction of an animation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Progress runs 0 → 1.
    Forward,
    /// Progress runs 1 → 0.
    Backward,
}

impl Direction {
    /// Direction that moves away from the given resting progress.
    pub fn from_progress(progress: f32) -> Direction {
        if progress < 0.5 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Progress the pass ends on.
    pub fn target(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => 0.0,
        }
    }
}

/// When the sequencer swaps the next image into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdvanceMode {
    /// After every full forward + backward cycle. Odd indices replace slot A,
    /// even indices replace slot B.
    #[default]
    PerCycle,
    /// After every single pass, always replacing the slot that is hidden at
    /// the end of that pass. Even indices replace slot A, odd indices slot B.
    PerPass,
}

impl AdvanceMode {
    /// Slot that receives the image for sequence position `index`.
    pub fn slot_for_index(self, index: usize) -> Slot {
        let even = index % 2 == 0;
        match (self, even) {
            (AdvanceMode::PerCycle, true) | (AdvanceMode::PerPass, false) => Slot::B,
            (AdvanceMode::PerCycle, false) | (AdvanceMode::PerPass, true) => Slot::A,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_picks_away_from_rest() {
        assert_eq!(Direction::from_progress(0.0), Direction::Forward);
        assert_eq!(Direction::from_progress(0.49), Direction::Forward);
        assert_eq!(Direction::from_progress(0.5), Direction::Backward);
        assert_eq!(Direction::from_progress(1.0), Direction::Backward);
    }

    #[test]
    fn slot_parity() {
        assert_eq!(AdvanceMode::PerCycle.slot_for_index(2), Slot::B);
        assert_eq!(AdvanceMode::PerCycle.slot_for_index(3), Slot::A);
        assert_eq!(AdvanceMode::PerPass.slot_for_index(2), Slot::A);
        assert_eq!(AdvanceMode::PerPass.slot_for_index(3), Slot::B);
        assert_eq!(Slot::A.other(), Slot::B);
    }
}
