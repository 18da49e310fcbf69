//! Easing curves mapping progress in [0, 1] to eased progress.
//!
//! Names follow the notation used in the site's motion design
//! (`power2.inOut`, `elastic.out(1, 0.5)`, `none`), so configuration
//! files can use the same vocabulary.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Easing curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EasingType {
    /// Constant speed (`none` / `linear`)
    Linear,
    /// Accelerating power curve; `power1` is quadratic
    PowerIn(u8),
    /// Decelerating power curve
    PowerOut(u8),
    /// Accelerate then decelerate
    PowerInOut(u8),
    /// Overshooting spring that settles on the target
    ElasticOut { amplitude: f64, period: f64 },
}

impl Default for EasingType {
    fn default() -> Self {
        EasingType::PowerOut(2)
    }
}

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// Input is clamped to [0, 1]. Output is exactly 0 at 0 and exactly 1
    /// at 1; elastic curves may leave [0, 1] in between.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            EasingType::Linear => t,
            EasingType::PowerIn(n) => power_in(t, n),
            EasingType::PowerOut(n) => 1.0 - power_in(1.0 - t, n),
            EasingType::PowerInOut(n) => {
                if t < 0.5 {
                    power_in(2.0 * t, n) / 2.0
                } else {
                    1.0 - power_in(2.0 * (1.0 - t), n) / 2.0
                }
            }
            EasingType::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

/// `powerN.in` is t^(N+1)
#[inline]
fn power_in(t: f64, n: u8) -> f64 {
    t.powi(i32::from(n) + 1)
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let a = amplitude.max(1.0);
    let period = if period > 0.0 { period } else { 0.3 };
    let p = period / amplitude.clamp(f64::EPSILON, 1.0);
    let shift = p / (2.0 * PI) * (1.0 / a).asin();
    let freq = 2.0 * PI / p;
    a * 2.0_f64.powf(-10.0 * t) * ((t - shift) * freq).sin() + 1.0
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EasingType::Linear => write!(f, "none"),
            EasingType::PowerIn(n) => write!(f, "power{}.in", n),
            EasingType::PowerOut(n) => write!(f, "power{}.out", n),
            EasingType::PowerInOut(n) => write!(f, "power{}.inOut", n),
            EasingType::ElasticOut { amplitude, period } => {
                write!(f, "elastic.out({}, {})", amplitude, period)
            }
        }
    }
}

impl FromStr for EasingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::InvalidEasing(s.to_string());

        if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("linear") {
            return Ok(EasingType::Linear);
        }

        if let Some(rest) = s.strip_prefix("elastic.out") {
            let args = rest.trim();
            if args.is_empty() {
                return Ok(EasingType::ElasticOut { amplitude: 1.0, period: 0.3 });
            }
            let inner = args
                .strip_prefix('(')
                .and_then(|a| a.strip_suffix(')'))
                .ok_or_else(invalid)?;
            let mut parts = inner.split(',').map(|p| p.trim().parse::<f64>());
            let amplitude = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
            let period = match parts.next() {
                Some(p) => p.map_err(|_| invalid())?,
                None => 0.3,
            };
            return Ok(EasingType::ElasticOut { amplitude, period });
        }

        let rest = s.strip_prefix("power").ok_or_else(invalid)?;
        let (level, kind) = rest.split_once('.').unwrap_or((rest, "out"));
        let level: u8 = level.parse().map_err(|_| invalid())?;
        if !(1..=4).contains(&level) {
            return Err(invalid());
        }
        match kind {
            "in" => Ok(EasingType::PowerIn(level)),
            "out" => Ok(EasingType::PowerOut(level)),
            "inOut" => Ok(EasingType::PowerInOut(level)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for EasingType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EasingType> for String {
    fn from(value: EasingType) -> Self {
        value.to_string()
    }
}
