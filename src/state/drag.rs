// Pointer drag tracking for map panning.
#[derive(Default, Debug, Clone)]
pub struct Drag {
    pub active: bool,
    pub last_x: f64,
    pub last_y: f64,
}

impl Drag {
    pub fn start(&mut self, x: f64, y: f64) {
        self.active = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Delta since the previous pointer position, or `None` when not dragging.
    pub fn move_to(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.active {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}
