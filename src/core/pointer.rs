//! Pointer state and its radial influence on dots

/// Radius (px) beyond which the pointer has no influence
pub const MOUSE_MAX_DISTANCE: f64 = 100.0;

/// Pointer position in surface-local coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub is_down: bool,
}

impl PointerState {
    /// Translate page coordinates into surface-local space, given the
    /// surface's bounding box origin
    pub fn move_to(&mut self, client_x: f64, client_y: f64, origin_left: f64, origin_top: f64) {
        self.x = client_x - origin_left;
        self.y = client_y - origin_top;
    }

    /// Linear falloff: 1.0 on the pointer, 0.0 at [`MOUSE_MAX_DISTANCE`] and beyond
    pub fn influence(&self, x: f64, y: f64) -> f64 {
        let distance = (x - self.x).hypot(y - self.y);
        (1.0 - distance / MOUSE_MAX_DISTANCE).max(0.0)
    }
}
