//! Easing functions for the hover fade.
//!
//! Only monotonic curves are offered: the hover opacity contract requires a
//! strictly increasing fade-in and strictly decreasing fade-out, so bounce
//! and overshoot families are deliberately absent.

use std::f32::consts::PI;

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    EaseInOut,
    /// Sinusoidal ease-out.
    EaseOutSine,
}

/// Apply an easing function to a progress value.
///
/// `t` is clamped to the 0.0-1.0 range; the result stays within it.
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => t * (2.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::EaseOutSine => (t * PI / 2.0).sin(),
    }
}
