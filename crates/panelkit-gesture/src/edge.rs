use serde::{Deserialize, Serialize};

/// Screen edge a panel is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Pick the component of `(x, y)` that lies on this axis.
    pub fn select(self, x: f32, y: f32) -> f32 {
        match self {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragDirection {
    Up,
    Down,
    Left,
    Right,
}

impl DragDirection {
    /// Direction of a signed primary-axis value; `None` for zero.
    ///
    /// Positive is down (vertical) or right (horizontal), matching screen
    /// coordinates.
    pub fn from_signed(axis: Axis, value: f32) -> Option<Self> {
        if value == 0.0 || value.is_nan() {
            return None;
        }
        Some(match (axis, value > 0.0) {
            (Axis::Vertical, true) => DragDirection::Down,
            (Axis::Vertical, false) => DragDirection::Up,
            (Axis::Horizontal, true) => DragDirection::Right,
            (Axis::Horizontal, false) => DragDirection::Left,
        })
    }

    pub fn sign(self) -> f32 {
        match self {
            DragDirection::Down | DragDirection::Right => 1.0,
            DragDirection::Up | DragDirection::Left => -1.0,
        }
    }
}

/// Everything pin-specific about a panel, decided once from its [`Pin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGeometry {
    pin: Pin,
    primary_axis: Axis,
    dismiss_direction: DragDirection,
}

impl EdgeGeometry {
    pub fn from_pin(pin: Pin) -> Self {
        let (primary_axis, dismiss_direction) = match pin {
            Pin::Bottom => (Axis::Vertical, DragDirection::Down),
            Pin::Top => (Axis::Vertical, DragDirection::Up),
            Pin::Left => (Axis::Horizontal, DragDirection::Left),
            Pin::Right => (Axis::Horizontal, DragDirection::Right),
        };
        Self {
            pin,
            primary_axis,
            dismiss_direction,
        }
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn primary_axis(&self) -> Axis {
        self.primary_axis
    }

    /// The direction that moves the panel off-screen.
    pub fn dismiss_direction(&self) -> DragDirection {
        self.dismiss_direction
    }

    /// +1 when dismissing increases the primary coordinate, -1 otherwise.
    pub fn dismiss_sign(&self) -> f32 {
        self.dismiss_direction.sign()
    }

    pub fn is_vertical(&self) -> bool {
        self.primary_axis == Axis::Vertical
    }

    /// Position-channel value with the panel fully off-screen.
    pub fn resting_offset(&self, extent: f32) -> f32 {
        self.dismiss_sign() * extent
    }

    pub fn is_trying_to_dismiss(&self, direction: DragDirection) -> bool {
        direction == self.dismiss_direction
    }

    /// Translation `(x, y)` for a position-channel value.
    pub fn translation(&self, offset: f32) -> (f32, f32) {
        match self.primary_axis {
            Axis::Horizontal => (offset, 0.0),
            Axis::Vertical => (0.0, offset),
        }
    }
}

impl From<Pin> for EdgeGeometry {
    fn from(pin: Pin) -> Self {
        Self::from_pin(pin)
    }
}
