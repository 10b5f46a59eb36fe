use glam::Vec2;

use crate::roster::EntityId;

/// Raw pointer input from the host, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved { x: f32, y: f32 },
    Pressed { x: f32, y: f32 },
    Released,
}

/// Drawable area, used to normalize device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Maps device pixels to `[-1, 1]²` with y pointing up.
    #[must_use]
    pub fn normalize(&self, x: f32, y: f32) -> Vec2 {
        let width = self.width.max(1.0);
        let height = self.height.max(1.0);
        Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Pointer bookkeeping for hover and drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Entity under the pointer. A lookup key only.
    pub hovered: Option<EntityId>,
    pub dragging: bool,
    /// Device-pixel x at the last drag step.
    pub last_pointer_x: f32,
    /// Latest pointer position in normalized device coordinates.
    pub ndc: Vec2,
}

/// Cursor shape the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Grab,
    Grabbing,
}

impl PointerState {
    #[must_use]
    pub fn cursor_icon(&self) -> CursorIcon {
        if self.dragging {
            CursorIcon::Grabbing
        } else if self.hovered.is_some() {
            CursorIcon::Grab
        } else {
            CursorIcon::Default
        }
    }
}
