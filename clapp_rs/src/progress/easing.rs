//! Frame timing.
//!
//! A batch of frames shares the bar's configured duration. With [`Easing::Linear`]
//! every frame gets the same slice; the eased modes walk a quadratic curve and
//! sleep for the delta between consecutive cumulative values, so the batch
//! still adds up to the full duration.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start, fast finish.
    EaseIn,
    /// Fast start, slow finish.
    EaseOut,
}

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Easing::Linear),
            "ease-in" => Ok(Easing::EaseIn),
            "ease-out" => Ok(Easing::EaseOut),
            other => Err(ConfigError::UnknownEasing(other.to_string())),
        }
    }
}

/// Quadratic ease-in over `t / d`, as a fraction of the total.
fn ease_in_quad(t: f64, d: f64) -> f64 {
    let t = t / d;
    t * t
}

/// Quadratic ease-out over `t / d`, as a fraction of the total.
fn ease_out_quad(t: f64, d: f64) -> f64 {
    let t = t / d;
    -t * (t - 2.0)
}

/// `duration / frames` for any non-zero `frames`.
fn even_slice(duration: Duration, frames: usize) -> Duration {
    match u32::try_from(frames) {
        Ok(n) => duration / n,
        Err(_) => duration.div_f64(frames as f64),
    }
}

impl Easing {
    /// Sleep after each of `frames` frames so the batch spans `duration`.
    pub fn frame_delays(self, duration: Duration, frames: usize) -> Vec<Duration> {
        if frames == 0 {
            return Vec::new();
        }

        // The curves describe cumulative sleep, so a slow visual start needs
        // the long sleeps first: ease-in sleeps along the ease-out curve.
        let curve: fn(f64, f64) -> f64 = match self {
            Easing::Linear => return vec![even_slice(duration, frames); frames],
            Easing::EaseIn => ease_out_quad,
            Easing::EaseOut => ease_in_quad,
        };

        let total = frames as f64;
        (0..frames)
            .map(|i| {
                let delta = curve(i as f64 + 1.0, total) - curve(i as f64, total);
                duration.mul_f64(delta.max(0.0))
            })
            .collect()
    }
}
