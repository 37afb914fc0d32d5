//! A single `f32` animated on the runtime frame clock.

use crate::spec::{AnimationResult, AnimationSpec, AnimationType, OnAnimationEnd, SpringSpec};
use panelkit_core::{FrameCallbackRegistration, MutableState, RuntimeHandle, State};
use std::cell::RefCell;
use std::rc::Rc;

/// Spring integration step. Frame-sized steps diverge for stiff springs.
const SPRING_STEP_SECONDS: f32 = 0.001;

fn lerp(from: f32, to: f32, fraction: f32) -> f32 {
    from + (to - from) * fraction
}

/// The move in flight, with whatever it needs to carry between frames.
enum Motion {
    Idle,
    Tween {
        spec: AnimationSpec,
        started_at: Option<u64>,
    },
    Spring {
        spec: SpringSpec,
        /// Progress units per second.
        velocity: f32,
        last_frame: Option<u64>,
    },
}

impl Motion {
    fn new(animation: AnimationType) -> Self {
        match animation {
            AnimationType::Tween(spec) => Motion::Tween {
                spec,
                started_at: None,
            },
            AnimationType::Spring(spec) => Motion::Spring {
                spec,
                velocity: 0.0,
                last_frame: None,
            },
        }
    }

    /// Value at frame time `now`, and whether the move is over.
    fn advance(&mut self, from: f32, to: f32, current: f32, now: u64) -> (f32, bool) {
        match self {
            Motion::Idle => (current, true),
            Motion::Tween { spec, started_at } => {
                let started = *started_at.get_or_insert(now);
                match spec.progress_at(now.saturating_sub(started)) {
                    Some((linear, eased)) => (lerp(from, to, eased), linear >= 1.0),
                    None => (current, false),
                }
            }
            Motion::Spring {
                spec,
                velocity,
                last_frame,
            } => {
                let span = to - from;
                if span.abs() < f32::EPSILON {
                    return (to, true);
                }
                let previous = last_frame.replace(now).unwrap_or(now);
                let mut remaining = now.saturating_sub(previous) as f32 / 1_000_000_000.0;
                let mut progress = (current - from) / span;
                let damping = spec.damping();
                while remaining > 0.0 {
                    let dt = remaining.min(SPRING_STEP_SECONDS);
                    let force = -spec.stiffness * (progress - 1.0) - damping * *velocity;
                    *velocity += force * dt;
                    progress = (progress + *velocity * dt).clamp(0.0, 2.0);
                    remaining -= dt;
                }
                let value = lerp(from, to, progress);
                let at_rest = velocity.abs() < spec.velocity_threshold;
                (value, at_rest && (value - to).abs() < spec.position_threshold)
            }
        }
    }
}

struct Inner {
    label: &'static str,
    runtime: RuntimeHandle,
    state: MutableState<f32>,
    current: f32,
    from: f32,
    target: f32,
    motion: Motion,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<OnAnimationEnd>,
}

impl Inner {
    /// Drop the running move and hand back its callback.
    fn interrupt(&mut self) -> Option<OnAnimationEnd> {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.motion = Motion::Idle;
        self.on_end.take()
    }

    fn set_current(&mut self, value: f32) {
        self.current = value;
        self.state.set_value(value);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(on_end) = self.on_end.take() {
            on_end(AnimationResult::INTERRUPTED);
        }
    }
}

/// Shared handle to an animated value. Clones drive the same value; the
/// running animation is interrupted once the last clone is dropped.
#[derive(Clone)]
pub struct Animatable {
    inner: Rc<RefCell<Inner>>,
}

impl Animatable {
    pub fn new(initial: f32, runtime: RuntimeHandle) -> Self {
        Self::with_label(initial, runtime, "animatable")
    }

    /// `label` names the value in trace logs.
    pub fn with_label(initial: f32, runtime: RuntimeHandle, label: &'static str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                label,
                runtime,
                state: MutableState::new(initial),
                current: initial,
                from: initial,
                target: initial,
                motion: Motion::Idle,
                registration: None,
                on_end: None,
            })),
        }
    }

    pub fn animate_to(&self, target: f32, animation: AnimationType) {
        self.animate_to_then(target, animation, |_| {});
    }

    /// Animate to `target` and report the outcome through `on_end`.
    ///
    /// A running animation is superseded first: its callback receives
    /// [`AnimationResult::INTERRUPTED`] before this call returns.
    pub fn animate_to_then(
        &self,
        target: f32,
        animation: AnimationType,
        on_end: impl FnOnce(AnimationResult) + 'static,
    ) {
        let superseded = {
            let mut inner = self.inner.borrow_mut();
            let superseded = inner.interrupt();
            inner.from = inner.current;
            inner.target = target;
            inner.motion = Motion::new(animation);
            inner.on_end = Some(Box::new(on_end));
            log::trace!(
                "{}: {} -> {} via {:?}",
                inner.label,
                inner.from,
                target,
                animation
            );
            superseded
        };
        if let Some(previous) = superseded {
            previous(AnimationResult::INTERRUPTED);
        }
        Self::request_frame(&self.inner);
    }

    /// Jump to `target`. A running animation reports interrupted.
    pub fn snap_to(&self, target: f32) {
        let superseded = {
            let mut inner = self.inner.borrow_mut();
            let superseded = inner.interrupt();
            inner.from = target;
            inner.target = target;
            inner.set_current(target);
            superseded
        };
        if let Some(previous) = superseded {
            previous(AnimationResult::INTERRUPTED);
        }
    }

    pub fn value(&self) -> f32 {
        self.inner.borrow().current
    }

    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    pub fn state(&self) -> State<f32> {
        self.inner.borrow().state.as_state()
    }

    fn request_frame(this: &Rc<RefCell<Inner>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.frame_clock()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |now| {
            if let Some(this) = weak.upgrade() {
                Self::on_frame(&this, now);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<Inner>>, now: u64) {
        let finished = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            let (from, target, current) = (inner.from, inner.target, inner.current);
            let (value, done) = inner.motion.advance(from, target, current, now);
            if done {
                inner.motion = Motion::Idle;
                inner.from = target;
                inner.set_current(target);
                log::trace!("{}: settled at {}", inner.label, target);
                Some(inner.on_end.take())
            } else {
                inner.set_current(value);
                None
            }
        };
        match finished {
            Some(on_end) => {
                if let Some(on_end) = on_end {
                    on_end(AnimationResult::FINISHED);
                }
            }
            None => Self::request_frame(this),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
