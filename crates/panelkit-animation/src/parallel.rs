//! Join of several animation callbacks into one.

use crate::{AnimationResult, OnAnimationEnd};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct ParallelState {
    remaining: Cell<usize>,
    all_finished: Cell<bool>,
    on_settled: RefCell<Option<OnAnimationEnd>>,
}

impl ParallelState {
    fn report(&self, result: AnimationResult) {
        if !result.finished {
            self.all_finished.set(false);
        }
        let remaining = self.remaining.get().saturating_sub(1);
        self.remaining.set(remaining);
        if remaining > 0 {
            return;
        }
        let on_settled = self.on_settled.borrow_mut().take();
        if let Some(on_settled) = on_settled {
            on_settled(AnimationResult {
                finished: self.all_finished.get(),
            });
        }
    }
}

/// Split `on_settled` into `N` branch callbacks.
///
/// `on_settled` runs exactly once, after every branch has reported, with
/// `finished` true only if every branch finished. A branch dropped without
/// being called counts as interrupted.
pub fn parallel<const N: usize>(
    on_settled: impl FnOnce(AnimationResult) + 'static,
) -> [OnAnimationEnd; N] {
    let state = Rc::new(ParallelState {
        remaining: Cell::new(N),
        all_finished: Cell::new(true),
        on_settled: RefCell::new(Some(Box::new(on_settled))),
    });
    std::array::from_fn(|_| {
        let branch = Branch {
            state: Some(Rc::clone(&state)),
        };
        Box::new(move |result: AnimationResult| branch.report(result)) as OnAnimationEnd
    })
}

struct Branch {
    state: Option<Rc<ParallelState>>,
}

impl Branch {
    fn report(mut self, result: AnimationResult) {
        if let Some(state) = self.state.take() {
            state.report(result);
        }
    }
}

impl Drop for Branch {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            state.report(AnimationResult::INTERRUPTED);
        }
    }
}
