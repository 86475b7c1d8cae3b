use crate::math::{wrap, Vec3};

pub const DEFAULT_YAW_DEG: f64 = 25.0;
pub const DEFAULT_PITCH_DEG: f64 = 15.0;
pub const DEFAULT_DISTANCE: f64 = 8.0;

pub const PITCH_LIMIT_DEG: f64 = 80.0;
pub const MIN_DISTANCE: f64 = 3.0;
pub const MAX_DISTANCE: f64 = 30.0;

/// Held-key pan rates, degrees per second
pub const YAW_RATE_DEG: f64 = 60.0;
pub const PITCH_RATE_DEG: f64 = 40.0;

/// Single key press pan steps, used when the terminal cannot report key releases
pub const YAW_STEP_DEG: f64 = 5.0;
pub const PITCH_STEP_DEG: f64 = 4.0;

/// Zoom steps in world units
pub const KEY_ZOOM_STEP: f64 = 1.0;
pub const SCROLL_ZOOM_STEP: f64 = 0.5;

/// Mouse drag sensitivity, degrees per terminal cell
pub const DRAG_YAW_PER_CELL: f64 = 4.0;
pub const DRAG_PITCH_PER_CELL: f64 = 4.8;

/// Height the eye is lifted above the orbit sphere
const EYE_LIFT: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

impl PanDirection {
    /// Unit (yaw, pitch) signs for this direction
    fn signs(self) -> (f64, f64) {
        match self {
            PanDirection::Left => (-1.0, 0.0),
            PanDirection::Right => (1.0, 0.0),
            PanDirection::Up => (0.0, -1.0),
            PanDirection::Down => (0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Rotation around the vertical axis, normalized into `[0, 360)`
    pub yaw_deg: f64,
    /// Elevation, clamped to `±PITCH_LIMIT_DEG`
    pub pitch_deg: f64,
    /// Orbit radius, clamped to `[MIN_DISTANCE, MAX_DISTANCE]`
    pub distance: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            yaw_deg: DEFAULT_YAW_DEG,
            pitch_deg: DEFAULT_PITCH_DEG,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl Camera {
    /// Pans while a direction key is held down
    pub fn pan(&mut self, direction: PanDirection, delta_seconds: f64) {
        let (yaw, pitch) = direction.signs();
        self.rotate(
            yaw * YAW_RATE_DEG * delta_seconds,
            pitch * PITCH_RATE_DEG * delta_seconds,
        );
    }

    /// Pans by a fixed step for a single key press
    pub fn step(&mut self, direction: PanDirection) {
        let (yaw, pitch) = direction.signs();
        self.rotate(yaw * YAW_STEP_DEG, pitch * PITCH_STEP_DEG);
    }

    /// Rotates by a mouse drag measured in terminal cells
    pub fn drag(&mut self, columns: f64, rows: f64) {
        self.rotate(columns * DRAG_YAW_PER_CELL, rows * DRAG_PITCH_PER_CELL);
    }

    /// Changes the orbit distance; positive values move the camera away
    pub fn zoom(&mut self, amount: f64) {
        if amount.is_finite() {
            self.distance = (self.distance + amount).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    pub fn reset(&mut self) {
        *self = Camera::default();
    }

    fn rotate(&mut self, yaw_deg: f64, pitch_deg: f64) {
        if !(yaw_deg.is_finite() && pitch_deg.is_finite()) {
            return;
        }
        self.yaw_deg = wrap(self.yaw_deg + yaw_deg, 360.0);
        self.pitch_deg = (self.pitch_deg + pitch_deg).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    /// Eye position in world space; the camera always looks at the origin
    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch_deg.to_radians().sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw_deg.to_radians().sin_cos();
        [
            self.distance * cos_pitch * sin_yaw,
            (self.distance * sin_pitch).abs() + EYE_LIFT,
            self.distance * cos_pitch * cos_yaw,
        ]
    }
}
