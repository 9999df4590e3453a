//! Time-driven sequencer: delay → animate → delay → advance, forever.
//!
//! The host owns the clock and calls `tick(dt)` once per frame. Each tick
//! consumes its `dt` across as many phases as it covers, so the result does
//! not depend on how the host slices time.

use crate::api::config::MorphConfig;
use crate::api::error::MorphError;
use crate::api::types::{AdvanceMode, Direction, Slot};
use crate::assets::sequence::ImageSequence;
use crate::core::morph::MorphEngine;

/// Phase transitions processed per tick at most. Time beyond that is dropped.
const MAX_PHASES_PER_TICK: u32 = 16;

/// Which wait the sequencer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayPhase {
    /// Holding before the next pass starts.
    BeforePass,
    /// Holding after a pass, before the sequence may advance.
    AfterPass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Delaying(DelayPhase),
    Animating(Direction),
}

/// What happened during one `tick`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Morph progress was pushed to the engine.
    pub progress_changed: bool,
    /// A pass finished, in this direction.
    pub pass_completed: Option<Direction>,
    /// The next image was swapped into this slot.
    pub slot_replaced: Option<Slot>,
}

/// Drives a [`MorphEngine`] through an [`ImageSequence`].
#[derive(Debug, Clone)]
pub struct Sequencer {
    config: MorphConfig,
    sequence: ImageSequence,
    engine: MorphEngine,
    state: SequencerState,
    /// Seconds spent in the current phase.
    elapsed: f32,
    current_index: usize,
    /// Sequence positions held by slots A and B.
    pairing: [usize; 2],
    last_pass: Option<Direction>,
    /// Pass cut short by `stop`, resumed by the next `start`.
    interrupted: Option<(Direction, f32)>,
    /// `stop` landed between a pass and its advance.
    resume_after_pass: bool,
    passes_completed: u64,
    cycles_completed: u64,
}

impl Sequencer {
    /// Validate `config` and pair the first two frames (A = 0, B = 1).
    pub fn new(config: MorphConfig, sequence: ImageSequence) -> Result<Self, MorphError> {
        config.validate()?;
        if sequence.len() < 2 {
            return Err(MorphError::SequenceTooShort { len: sequence.len() });
        }
        let first = sequence.frame(0);
        let second = sequence.frame(1);
        let engine = MorphEngine::new(
            first.image.clone(),
            first.points.clone(),
            second.image.clone(),
            second.points.clone(),
        )?;
        Ok(Self {
            config,
            sequence,
            engine,
            state: SequencerState::Idle,
            elapsed: 0.0,
            current_index: 1,
            pairing: [0, 1],
            last_pass: None,
            interrupted: None,
            resume_after_pass: false,
            passes_completed: 0,
            cycles_completed: 0,
        })
    }

    /// Begin (or resume) the loop. No-op unless idle.
    pub fn start(&mut self) {
        if self.state != SequencerState::Idle {
            return;
        }
        log::info!(
            "sequencer started: {} images, {}s passes, {:?}",
            self.sequence.len(),
            self.config.animation_duration,
            self.config.easing
        );
        let phase = if std::mem::take(&mut self.resume_after_pass) {
            DelayPhase::AfterPass
        } else {
            DelayPhase::BeforePass
        };
        self.enter(SequencerState::Delaying(phase));
    }

    /// Cancel the loop. The last committed geometry stays in place and an
    /// interrupted pass picks up where it left off on the next `start`.
    pub fn stop(&mut self) {
        if self.state == SequencerState::Idle {
            return;
        }
        match self.state {
            SequencerState::Animating(direction) => {
                self.interrupted = Some((direction, self.elapsed));
            }
            SequencerState::Delaying(DelayPhase::AfterPass) => self.resume_after_pass = true,
            _ => {}
        }
        log::info!("sequencer stopped at progress {}", self.engine.progress());
        self.enter(SequencerState::Idle);
    }

    pub fn is_running(&self) -> bool {
        self.state != SequencerState::Idle
    }

    /// Advance the state machine by `dt` seconds.
    ///
    /// Negative or non-finite `dt` counts as zero.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let mut remaining = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        for _ in 0..MAX_PHASES_PER_TICK {
            match self.state {
                SequencerState::Idle => return outcome,
                SequencerState::Delaying(phase) => {
                    let needed = (self.config.delay_between_animations - self.elapsed).max(0.0);
                    if remaining < needed {
                        self.elapsed += remaining;
                        return outcome;
                    }
                    remaining -= needed;
                    match phase {
                        DelayPhase::BeforePass => match self.interrupted.take() {
                            Some((direction, elapsed)) => {
                                self.enter(SequencerState::Animating(direction));
                                self.elapsed = elapsed;
                            }
                            None => {
                                let direction = Direction::from_progress(self.engine.progress());
                                self.enter(SequencerState::Animating(direction));
                            }
                        },
                        DelayPhase::AfterPass => {
                            if self.should_advance() {
                                outcome.slot_replaced = self.advance();
                            }
                            self.enter(SequencerState::Delaying(DelayPhase::BeforePass));
                        }
                    }
                }
                SequencerState::Animating(direction) => {
                    let duration = self.config.animation_duration;
                    let total = self.elapsed + remaining;
                    outcome.progress_changed = true;
                    if total < duration {
                        self.elapsed = total;
                        let raw = (self.elapsed / duration).clamp(0.0, 1.0);
                        let t = match direction {
                            Direction::Forward => raw,
                            Direction::Backward => 1.0 - raw,
                        };
                        // Back and elastic curves overshoot; geometry stays within the pair.
                        let eased = self.config.easing.apply(t).clamp(0.0, 1.0);
                        self.engine.set_progress(eased);
                        return outcome;
                    }
                    remaining = total - duration;
                    self.finish_pass(direction);
                    outcome.pass_completed = Some(direction);
                }
            }
        }

        log::warn!("tick of {}s spanned too many phases, dropping {}s", dt, remaining);
        outcome
    }

    fn enter(&mut self, state: SequencerState) {
        log::debug!("sequencer {:?} -> {:?}", self.state, state);
        self.state = state;
        self.elapsed = 0.0;
    }

    fn finish_pass(&mut self, direction: Direction) {
        self.engine.set_progress(direction.target());
        self.last_pass = Some(direction);
        self.passes_completed += 1;
        if direction == Direction::Backward {
            self.cycles_completed += 1;
        }
        self.enter(SequencerState::Delaying(DelayPhase::AfterPass));
    }

    fn should_advance(&self) -> bool {
        match self.config.advance {
            AdvanceMode::PerPass => true,
            AdvanceMode::PerCycle => self.last_pass == Some(Direction::Backward),
        }
    }

    /// Swap the next image into the slot chosen by index parity.
    fn advance(&mut self) -> Option<Slot> {
        let next = self.current_index + 1;
        let slot = self.config.advance.slot_for_index(next);
        let position = next % self.sequence.len();
        let frame = self.sequence.frame(next);

        // `ImageSequence::new` guarantees equal point counts across frames.
        debug_assert_eq!(frame.points.len(), self.engine.point_count());
        if let Err(e) = self
            .engine
            .replace_slot(slot, frame.image.clone(), frame.points.clone())
        {
            log::error!("cannot advance to '{}': {}", frame.name, e);
            return None;
        }
        log::info!("advanced to image {} '{}' in slot {:?}", position, frame.name, slot);

        self.current_index = next;
        self.pairing[slot_index(slot)] = position;
        self.engine.reinitialize();
        Some(slot)
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Current morph progress (eased).
    pub fn progress(&self) -> f32 {
        self.engine.progress()
    }

    /// Monotonic sequence counter; starts at 1.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Sequence positions currently in slots (A, B).
    pub fn pairing(&self) -> (usize, usize) {
        (self.pairing[0], self.pairing[1])
    }

    pub fn passes_completed(&self) -> u64 {
        self.passes_completed
    }

    /// Completed forward + backward pairs.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    pub fn engine(&self) -> &MorphEngine {
        &self.engine
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn sequence(&self) -> &ImageSequence {
        &self.sequence
    }
}

fn slot_index(slot: Slot) -> usize {
    match slot {
        Slot::A => 0,
        Slot::B => 1,
    }
}
