//! Gesture-responder arbitration.
//!
//! Only one region may own an in-flight touch sequence. The platform decides
//! who; panels ask through [`GestureResponder`].

use std::cell::Cell;
use std::rc::Rc;

pub trait GestureResponder {
    /// Ask to own the current touch sequence.
    fn request_capture(&self) -> bool;

    /// Give the touch sequence back after release or cancel.
    fn release(&self);
}

/// Grants every request. For hosts without nested gesture regions.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysGrant;

impl GestureResponder for AlwaysGrant {
    fn request_capture(&self) -> bool {
        true
    }

    fn release(&self) {}
}

/// A single responder slot shared between several claimants.
///
/// Each claimant gets its own [`ResponderSlot`] handle from
/// [`ResponderSlot::claimant`]; while one holds the slot the others are
/// refused.
#[derive(Clone)]
pub struct ResponderSlot {
    owner: Rc<Cell<Option<u64>>>,
    next_id: Rc<Cell<u64>>,
    id: u64,
}

impl Default for ResponderSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponderSlot {
    pub fn new() -> Self {
        Self {
            owner: Rc::new(Cell::new(None)),
            next_id: Rc::new(Cell::new(1)),
            id: 0,
        }
    }

    /// A new handle competing for the same slot.
    pub fn claimant(&self) -> Self {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Self {
            owner: Rc::clone(&self.owner),
            next_id: Rc::clone(&self.next_id),
            id,
        }
    }

    pub fn is_held(&self) -> bool {
        self.owner.get().is_some()
    }

    pub fn is_owner(&self) -> bool {
        self.owner.get() == Some(self.id)
    }
}

impl GestureResponder for ResponderSlot {
    fn request_capture(&self) -> bool {
        match self.owner.get() {
            None => {
                self.owner.set(Some(self.id));
                true
            }
            Some(owner) => owner == self.id,
        }
    }

    fn release(&self) {
        if self.is_owner() {
            self.owner.set(None);
        }
    }
}
