//! Tween primitives for the site's motion design
//!
//! # Layers
//!
//! ## Atoms
//! - `easing` - Easing curves (`power2.inOut`, `elastic.out(1, 0.5)`, ...)
//! - `timing` - Progress and interpolation on the virtual clock
//! - `value` - Animatable values (scalars, colors)
//!
//! ## Molecules
//! - `tween` - Tween specs and the engine that runs them
//!
//! # Usage
//!
//! ```ignore
//! use qisports_core::anim::{TweenEngine, TweenSpec, EasingType};
//!
//! let mut engine = TweenEngine::new();
//! engine.add(&mut doc, now, TweenSpec::to(strip, Property::X, -1280.0)
//!     .duration(ms(800))
//!     .easing(EasingType::PowerInOut(2)));
//!
//! // every frame
//! engine.update(&mut doc, now);
//! ```

pub mod easing;
pub mod timing;
pub mod value;

pub mod tween;

pub use easing::EasingType;
pub use timing::{lerp, ms};
pub use tween::{choreography_length, TweenEngine, TweenId, TweenSpec};
pub use value::{Rgba, Value};
