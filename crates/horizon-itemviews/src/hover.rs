//! Hover animation state machine.
//!
//! While the pointer rests on a cell, two things animate: a fade opacity
//! used to composite the hover effect over the cached base appearance, and a
//! discrete sequence index that advances on every tick, usable for
//! multi-stage hover effects (e.g. cycling preview frames).
//!
//! The machine is purely tick-driven. It owns no timer; the owning view
//! schedules a periodic callback at [`HoverPolicy::tick_interval`] while
//! [`HoverAnimation::is_running`] and calls `tick()`. State transitions:
//!
//! ```text
//! Idle --set_hovered(true)--> Active --set_hovered(false)--> FadingOut
//!  ^                            ^                                |
//!  |                            +------set_hovered(true)---------+
//!  +------------------- opacity reaches 0 on tick ---------------+
//! ```
//!
//! Re-hovering during the fade-out resumes `Active` without resetting the
//! sequence index - that is a hover refresh, not a new hover.

use std::time::Duration;

use crate::easing::{Easing, ease};

/// Timing policy for the hover animation.
///
/// The fade runs over a fixed number of ticks rather than wall-clock time,
/// which keeps the machine deterministic under a driven clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPolicy {
    /// Interval the owning view should schedule ticks at.
    pub tick_interval: Duration,
    /// Ticks for the opacity to go from 0 to 1.
    pub fade_in_ticks: u32,
    /// Ticks for the opacity to go from 1 back to 0.
    pub fade_out_ticks: u32,
    /// Curve applied to the fade progress. Must be monotonic; every variant
    /// of [`Easing`] is.
    pub easing: Easing,
}

impl Default for HoverPolicy {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            fade_in_ticks: 4,
            fade_out_ticks: 4,
            easing: Easing::EaseOutSine,
        }
    }
}

/// The hover machine's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    /// Not hovered, opacity 0, no ticks needed.
    #[default]
    Idle,
    /// Hovered; opacity rises, sequence index advances per tick.
    Active,
    /// Pointer left; opacity decays, ticks continue until it reaches 0.
    FadingOut,
}

/// Result of a hover-state transition triggered by `set_hovered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    /// Nothing changed.
    None,
    /// A new hover sequence began; the caller should start the tick timer.
    SequenceStarted,
    /// A fade-out was interrupted; the sequence continues, timer keeps running.
    Resumed,
    /// The pointer left; ticks must continue until the fade completes.
    FadeOutStarted,
    /// The sequence ended immediately (opacity was already 0); the caller
    /// should stop the tick timer.
    SequenceEnded,
}

/// Result of advancing the machine by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    /// The opacity moved this tick.
    pub opacity_changed: bool,
    /// New sequence index, if it advanced this tick.
    pub sequence_index: Option<u32>,
    /// The fade-out completed; the caller should stop the tick timer.
    pub ended: bool,
}

impl TickOutcome {
    /// Whether anything observable happened.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Tick-driven fade/sequence state machine.
///
/// Opacity is derived from a linear progress value through the policy's
/// easing curve, so it is monotonic within each phase and never overshoots
/// the 0.0-1.0 range.
#[derive(Debug, Clone)]
pub struct HoverAnimation {
    policy: HoverPolicy,
    state: HoverState,
    /// Linear fade progress in [0, 1]; opacity = ease(progress).
    progress: f32,
    sequence_index: u32,
}

impl HoverAnimation {
    /// Create an idle machine with the given policy.
    ///
    /// Fade tick counts of 0 are treated as 1 (an instant fade still takes
    /// one tick so started/ended ordering stays observable).
    pub fn new(mut policy: HoverPolicy) -> Self {
        policy.fade_in_ticks = policy.fade_in_ticks.max(1);
        policy.fade_out_ticks = policy.fade_out_ticks.max(1);
        Self {
            policy,
            state: HoverState::Idle,
            progress: 0.0,
            sequence_index: 0,
        }
    }

    /// The active policy.
    #[inline]
    pub fn policy(&self) -> &HoverPolicy {
        &self.policy
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Whether ticks are currently needed.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state != HoverState::Idle
    }

    /// Current fade opacity in [0, 1].
    #[inline]
    pub fn opacity(&self) -> f32 {
        ease(self.policy.easing, self.progress)
    }

    /// Current sequence index.
    #[inline]
    pub fn sequence_index(&self) -> u32 {
        self.sequence_index
    }

    /// React to the hovered flag changing.
    ///
    /// The caller is responsible for only invoking this on an actual change
    /// of the flag; calling it redundantly returns [`HoverTransition::None`]
    /// for a matching state.
    pub fn set_hovered(&mut self, hovered: bool) -> HoverTransition {
        let transition = match (self.state, hovered) {
            (HoverState::Idle, true) => {
                self.state = HoverState::Active;
                self.sequence_index = 0;
                HoverTransition::SequenceStarted
            }
            (HoverState::FadingOut, true) => {
                self.state = HoverState::Active;
                HoverTransition::Resumed
            }
            (HoverState::Active, false) => {
                if self.progress <= 0.0 {
                    // Nothing faded in yet; end synchronously.
                    self.state = HoverState::Idle;
                    HoverTransition::SequenceEnded
                } else {
                    self.state = HoverState::FadingOut;
                    HoverTransition::FadeOutStarted
                }
            }
            _ => HoverTransition::None,
        };

        if transition != HoverTransition::None {
            tracing::trace!(
                target: "horizon_itemviews::hover",
                state = ?self.state,
                ?transition,
                "hover transition"
            );
        }
        transition
    }

    /// Advance the machine by one timer tick.
    ///
    /// Ticks arriving while `Idle` are ignored; a stray callback after the
    /// sequence ended observes nothing.
    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            HoverState::Idle => TickOutcome::default(),
            HoverState::Active => {
                self.sequence_index += 1;
                let before = self.opacity();
                let step = 1.0 / self.policy.fade_in_ticks as f32;
                self.progress = (self.progress + step).min(1.0);
                TickOutcome {
                    opacity_changed: self.opacity() != before,
                    sequence_index: Some(self.sequence_index),
                    ended: false,
                }
            }
            HoverState::FadingOut => {
                let before = self.opacity();
                let step = 1.0 / self.policy.fade_out_ticks as f32;
                self.progress = (self.progress - step).max(0.0);
                let ended = self.progress <= 0.0;
                if ended {
                    self.state = HoverState::Idle;
                    tracing::trace!(
                        target: "horizon_itemviews::hover",
                        "fade-out complete"
                    );
                }
                TickOutcome {
                    opacity_changed: self.opacity() != before,
                    sequence_index: None,
                    ended,
                }
            }
        }
    }
}

impl Default for HoverAnimation {
    fn default() -> Self {
        Self::new(HoverPolicy::default())
    }
}
