use panelkit_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event with consumption tracking.
///
/// A panel that captures a drag consumes the events so nested content (a
/// button under the finger, a scroll view) does not also act on them.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    /// Monotonic timestamp in milliseconds.
    pub time_ms: i64,
    /// Shared via `Rc<Cell>` so consumption survives copies.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, time_ms: i64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            time_ms,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), time_ms)
    }

    pub fn cancel(time_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::ZERO, time_ms)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}
