// extensions/easing.rs
//
// Pure easing curves for morph progress.
// Pure math, no dependencies on the engine or sequencer.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Easing curve tag.
///
/// Dispatch goes through a closed table indexed by the tag, so adding a
/// variant means adding exactly one table entry in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    #[serde(alias = "EaseInQuad")]
    QuadIn,
    #[serde(alias = "EaseOutQuad")]
    QuadOut,
    #[serde(alias = "EaseInOutQuad")]
    QuadInOut,
    #[serde(alias = "EaseInCubic")]
    CubicIn,
    #[serde(alias = "EaseOutCubic")]
    CubicOut,
    #[serde(alias = "EaseInOutCubic")]
    CubicInOut,
    #[serde(alias = "EaseInQuart")]
    QuartIn,
    #[serde(alias = "EaseOutQuart")]
    QuartOut,
    #[serde(alias = "EaseInOutQuart")]
    QuartInOut,
    #[serde(alias = "EaseInQuint")]
    QuintIn,
    #[serde(alias = "EaseOutQuint")]
    QuintOut,
    #[serde(alias = "EaseInOutQuint")]
    QuintInOut,
    /// Sine wave easing (smooth).
    #[serde(alias = "EaseInSine")]
    SineIn,
    #[serde(alias = "EaseOutSine")]
    SineOut,
    #[serde(alias = "EaseInOutSine")]
    SineInOut,
    /// Bouncy start (mirror of `BounceOut`).
    #[serde(alias = "EaseInBounce")]
    BounceIn,
    /// Bouncy finish.
    #[serde(alias = "EaseOutBounce")]
    BounceOut,
    #[serde(alias = "EaseInOutBounce")]
    BounceInOut,
    /// Pull back before moving (undershoots below 0).
    #[serde(alias = "EaseInBack")]
    BackIn,
    /// Overshoot then settle (exceeds 1).
    #[serde(alias = "EaseOutBack")]
    BackOut,
    #[serde(alias = "EaseInOutBack")]
    BackInOut,
    /// Elastic spring, oscillating around the endpoints.
    #[serde(alias = "EaseInElastic")]
    ElasticIn,
    #[serde(alias = "EaseOutElastic")]
    ElasticOut,
    #[serde(alias = "EaseInOutElastic")]
    ElasticInOut,
}

type EaseFn = fn(f32) -> f32;

/// Tag → curve. Order must match the `Easing` declaration order.
const EASING_TABLE: [EaseFn; Easing::COUNT] = [
    linear,
    quad_in,
    quad_out,
    quad_in_out,
    cubic_in,
    cubic_out,
    cubic_in_out,
    quart_in,
    quart_out,
    quart_in_out,
    quint_in,
    quint_out,
    quint_in_out,
    sine_in,
    sine_out,
    sine_in_out,
    bounce_in,
    bounce_out,
    bounce_in_out,
    back_in,
    back_out,
    back_in_out,
    elastic_in,
    elastic_out,
    elastic_in_out,
];

impl Easing {
    pub const COUNT: usize = 25;

    /// Every tag, in declaration order.
    pub const ALL: [Easing; Easing::COUNT] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartIn,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::QuintIn,
        Easing::QuintOut,
        Easing::QuintInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
    ];

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Input outside [0, 1] is clamped first. The result is in [0, 1] except
    /// for the families reported by [`Easing::overshoots`].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        EASING_TABLE[self as usize](t.clamp(0.0, 1.0))
    }

    /// Whether this curve may leave [0, 1] between the endpoints.
    pub fn overshoots(self) -> bool {
        matches!(
            self,
            Easing::BounceIn
                | Easing::BounceOut
                | Easing::BounceInOut
                | Easing::BackIn
                | Easing::BackOut
                | Easing::BackInOut
                | Easing::ElasticIn
                | Easing::ElasticOut
                | Easing::ElasticInOut
        )
    }
}

// ── Curves ───────────────────────────────────────────────────────────────

const BACK_S: f32 = 1.70158;
const BACK_S_IN_OUT: f32 = BACK_S * 1.525;
const ELASTIC_FREQ: f32 = 13.0 * PI / 2.0;

fn linear(t: f32) -> f32 {
    t
}

fn quad_in(t: f32) -> f32 {
    t * t
}

fn quad_out(t: f32) -> f32 {
    t * (2.0 - t)
}

fn quad_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

fn cubic_in(t: f32) -> f32 {
    t * t * t
}

fn cubic_out(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * t + 1.0
}

fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
    }
}

fn quart_in(t: f32) -> f32 {
    t * t * t * t
}

fn quart_out(t: f32) -> f32 {
    let t = t - 1.0;
    1.0 - t * t * t * t
}

fn quart_in_out(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let t = t - 1.0;
        1.0 - 8.0 * t * t * t * t
    }
}

fn quint_in(t: f32) -> f32 {
    t * t * t * t * t
}

fn quint_out(t: f32) -> f32 {
    let t = t - 1.0;
    1.0 + t * t * t * t * t
}

fn quint_in_out(t: f32) -> f32 {
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        let t = t - 1.0;
        1.0 + 16.0 * t * t * t * t * t
    }
}

fn sine_in(t: f32) -> f32 {
    1.0 - (t * PI / 2.0).cos()
}

fn sine_out(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

fn sine_in_out(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

fn bounce_in_out(t: f32) -> f32 {
    if t < 0.5 {
        bounce_in(t * 2.0) * 0.5
    } else {
        bounce_out(t * 2.0 - 1.0) * 0.5 + 0.5
    }
}

fn back_in(t: f32) -> f32 {
    t * t * ((BACK_S + 1.0) * t - BACK_S)
}

fn back_out(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * ((BACK_S + 1.0) * t + BACK_S) + 1.0
}

fn back_in_out(t: f32) -> f32 {
    const S: f32 = BACK_S_IN_OUT;
    if t < 0.5 {
        (t * 2.0) * (t * 2.0) * ((S + 1.0) * t * 2.0 - S) * 0.5
    } else {
        let u = t * 2.0 - 2.0;
        (u * u * ((S + 1.0) * u + S) + 2.0) * 0.5
    }
}

fn elastic_in(t: f32) -> f32 {
    (ELASTIC_FREQ * t).sin() * 2.0_f32.powf(10.0 * (t - 1.0))
}

fn elastic_out(t: f32) -> f32 {
    (-ELASTIC_FREQ * (t + 1.0)).sin() * 2.0_f32.powf(-10.0 * t) + 1.0
}

fn elastic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        0.5 * (ELASTIC_FREQ * (2.0 * t)).sin() * 2.0_f32.powf(10.0 * (2.0 * t - 1.0))
    } else {
        let u = 2.0 * t - 1.0;
        0.5 * ((-ELASTIC_FREQ * (u + 1.0)).sin() * 2.0_f32.powf(-10.0 * u) + 2.0)
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
///
/// Exact at both endpoints: `t == 0` yields `a` and `t == 1` yields `b`,
/// and `lerp(a, a, t) == a` for every `t`. `t` outside [0, 1] extrapolates.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t == 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// Linearly interpolate between two Vec2 values, component-wise [`lerp`].
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate Vec2 with easing.
#[inline]
pub fn ease_vec2(a: Vec2, b: Vec2, t: f32, easing: Easing) -> Vec2 {
    lerp_vec2(a, b, easing.apply(t))
}
