use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::timing::lerp;
use crate::Error;

/// RGBA color with 8-bit channels and fractional alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn lerp(&self, to: &Rgba, t: f64) -> Rgba {
        let channel = |a: u8, b: u8| lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8;
        Rgba {
            r: channel(self.r, to.r),
            g: channel(self.g, to.g),
            b: channel(self.b, to.b),
            a: lerp(self.a, to.a, t).clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Rgba {
    type Err = Error;

    /// Accepts `#RRGGBB`, `rgb(r, g, b)` and `rgba(r, g, b, a)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Rgba::opaque(channel(0)?, channel(2)?, channel(4)?));
        }

        let (inner, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest.strip_suffix(')').ok_or_else(invalid)?, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest.strip_suffix(')').ok_or_else(invalid)?, false)
        } else {
            return Err(invalid());
        };

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != if has_alpha { 4 } else { 3 } {
            return Err(invalid());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
        let a = if has_alpha {
            parts[3].parse::<f64>().map_err(|_| invalid())?
        } else {
            1.0
        };
        if !(0.0..=1.0).contains(&a) {
            return Err(invalid());
        }
        Ok(Rgba::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

/// Animatable property value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Scalar(f64),
    Color(Rgba),
}

impl Value {
    /// Interpolate toward `to`. Mismatched kinds snap at the end.
    pub fn lerp(&self, to: &Value, t: f64) -> Value {
        match (self, to) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(lerp(*a, *b, t)),
            (Value::Color(a), Value::Color(b)) => Value::Color(a.lerp(b, t)),
            _ => {
                if t >= 1.0 {
                    *to
                } else {
                    *self
                }
            }
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Value::Color(c) => Some(*c),
            Value::Scalar(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<Rgba> for Value {
    fn from(value: Rgba) -> Self {
        Value::Color(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors() {
        assert_eq!("#4A4A5A".parse::<Rgba>().unwrap(), Rgba::opaque(0x4A, 0x4A, 0x5A));
        assert_eq!(
            "rgba(255, 255, 255, 0.8)".parse::<Rgba>().unwrap(),
            Rgba::new(255, 255, 255, 0.8)
        );
        assert_eq!("rgb(1,2,3)".parse::<Rgba>().unwrap(), Rgba::opaque(1, 2, 3));
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("rgba(1, 2, 3)".parse::<Rgba>().is_err());
        assert!("rgba(1, 2, 3, 2)".parse::<Rgba>().is_err());
        assert!("blue".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for color in [Rgba::opaque(167, 200, 64), Rgba::new(255, 255, 255, 0.0)] {
            assert_eq!(color.to_string().parse::<Rgba>().unwrap(), color);
        }
    }

    #[test]
    fn test_color_lerp() {
        let from = Rgba::new(255, 255, 255, 0.0);
        let to = Rgba::opaque(255, 255, 255);
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.r, 255);
        assert!((mid.a - 0.5).abs() < 1e-9);
        assert_eq!(from.lerp(&to, 1.0), to);
    }

    #[test]
    fn test_mismatched_values_snap() {
        let from = Value::Scalar(1.0);
        let to = Value::Color(Rgba::opaque(0, 0, 0));
        assert_eq!(from.lerp(&to, 0.5), from);
        assert_eq!(from.lerp(&to, 1.0), to);
    }
}
