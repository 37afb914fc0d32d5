//! Animation system for panelkit
//!
//! Values animate on the runtime frame clock. Every animation request reports
//! back through an [`AnimationResult`]; a newer request on the same value
//! supersedes the running one, whose callback then sees `finished: false`.

mod animatable;
mod easing;
mod interpolation;
mod parallel;
mod spec;

pub use animatable::Animatable;
pub use easing::Easing;
pub use interpolation::{Extrapolate, Interpolation};
pub use parallel::parallel;
pub use spec::{AnimationResult, AnimationSpec, AnimationType, OnAnimationEnd, SpringSpec};
