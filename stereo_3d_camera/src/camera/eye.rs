/// Which camera a matrix slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Mono,
    Left,
    Right,
}

impl Eye {
    pub const ALL: [Eye; 3] = [Eye::Mono, Eye::Left, Eye::Right];

    /// Slot index in per-eye storage.
    pub fn index(self) -> usize {
        match self {
            Eye::Mono => 0,
            Eye::Left => 1,
            Eye::Right => 2,
        }
    }

    /// +1 for the left eye, -1 for the right eye, 0 for the cyclopean camera.
    pub fn stereo_sign(self) -> f32 {
        match self {
            Eye::Mono => 0.0,
            Eye::Left => 1.0,
            Eye::Right => -1.0,
        }
    }

    /// Lateral camera-space shift applied after the view rotation.
    ///
    /// The left eye sits at -ipd/2 along the camera's right axis, so the
    /// world is shifted by +ipd/2 in its view space (and mirrored for the right eye).
    pub fn view_offset(self, ipd: f32) -> f32 {
        self.stereo_sign() * ipd / 2.0
    }
}
