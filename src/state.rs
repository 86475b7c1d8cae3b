use crate::camera::Camera;
use crate::math::wrap;

/// Assumed car speed in track units per second
pub const CAR_SPEED: f64 = 15.0;
/// Wheel spin in degrees per second at `CAR_SPEED`
pub const WHEEL_ANGULAR_SPEED: f64 = CAR_SPEED * 50.0;
/// Track scroll repeat length
pub const TRACK_REPEAT: f64 = 100.0;
/// Exponential approach rate of the DRS flap, per second
pub const DRS_RELAXATION_RATE: f64 = 3.0;
pub const STEER_AMPLITUDE_DEG: f64 = 2.0;
/// Steering oscillation phase speed, radians per second
pub const STEER_PHASE_SPEED: f64 = 15.0;
pub const BOUNCE_AMPLITUDE: f64 = 0.012;
/// Suspension heave phase speed, radians per second
pub const BOUNCE_PHASE_SPEED: f64 = 23.0;
/// Longest frame step the animation will integrate at once
pub const MAX_FRAME_DELTA: f64 = 0.25;

/// Clamps a raw frame delta to `[0, MAX_FRAME_DELTA]`; non-finite input becomes zero
pub fn clamp_delta(delta_seconds: f64) -> f64 {
    if delta_seconds.is_finite() {
        delta_seconds.clamp(0.0, MAX_FRAME_DELTA)
    } else {
        0.0
    }
}

/// Animation state, advanced once per rendered frame
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    /// Whether the car is driving
    pub running: bool,
    /// Wheel spin angle in `[0, 360)`
    pub wheel_rotation_deg: f64,
    /// Front wheel steering angle
    pub steer_angle_deg: f64,
    /// DRS target: open when set
    pub drs_requested: bool,
    /// Rear flap opening in `[0, 1]`
    pub drs_open_fraction: f64,
    /// Chassis heave offset
    pub suspension_bounce: f64,
    /// Track scroll position in `(-TRACK_REPEAT, 0]`
    pub track_offset: f64,
    /// Accumulated driving time; steering and bounce are functions of it
    pub elapsed: f64,
    pub camera: Camera,
}

impl Default for AnimationState {
    fn default() -> Self {
        AnimationState {
            running: false,
            wheel_rotation_deg: 0.0,
            steer_angle_deg: 0.0,
            drs_requested: false,
            drs_open_fraction: 0.0,
            suspension_bounce: 0.0,
            track_offset: 0.0,
            elapsed: 0.0,
            camera: Camera::default(),
        }
    }
}

impl AnimationState {
    /// Advances all time-dependent fields by one frame
    pub fn update(&mut self, delta_seconds: f64) {
        let delta = clamp_delta(delta_seconds);
        if delta != delta_seconds {
            tracing::debug!(raw = delta_seconds, clamped = delta, "frame delta clamped");
        }
        if !self.running {
            return;
        }

        self.wheel_rotation_deg = wrap(
            self.wheel_rotation_deg - WHEEL_ANGULAR_SPEED * delta,
            360.0,
        );
        self.track_offset = wrap_track(self.track_offset - CAR_SPEED * delta);

        let target = if self.drs_requested { 1.0 } else { 0.0 };
        let gain = (DRS_RELAXATION_RATE * delta).min(1.0);
        self.drs_open_fraction =
            (self.drs_open_fraction + (target - self.drs_open_fraction) * gain).clamp(0.0, 1.0);

        self.elapsed += delta;
        self.steer_angle_deg = STEER_AMPLITUDE_DEG * (STEER_PHASE_SPEED * self.elapsed).sin();
        self.suspension_bounce = BOUNCE_AMPLITUDE * (BOUNCE_PHASE_SPEED * self.elapsed).sin();
    }

    /// Starts or stops the car.
    ///
    /// Starting requests DRS open. Stopping returns steering, bounce and DRS
    /// to neutral and restarts the oscillation phase.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        if self.running {
            self.drs_requested = true;
        } else {
            self.steer_angle_deg = 0.0;
            self.suspension_bounce = 0.0;
            self.drs_requested = false;
            self.drs_open_fraction = 0.0;
            self.elapsed = 0.0;
        }
        tracing::info!(running = self.running, "run state toggled");
    }

    /// Flips the DRS target, whether or not the car is running
    pub fn toggle_drs(&mut self) {
        self.drs_requested = !self.drs_requested;
        tracing::info!(requested = self.drs_requested, "DRS toggled");
    }

    /// Rear flap angle in degrees for the current opening
    pub fn drs_flap_deg(&self) -> f64 {
        self.drs_open_fraction * crate::model::DRS_MAX_FLAP_DEG
    }
}

/// Wraps a track offset into `(-TRACK_REPEAT, 0]`
fn wrap_track(offset: f64) -> f64 {
    let wrapped = wrap(-offset, TRACK_REPEAT);
    if wrapped == 0.0 {
        0.0
    } else {
        -wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> AnimationState {
        let mut state = AnimationState::default();
        state.toggle_running();
        state
    }

    #[test]
    fn stopped_state_does_not_advance() {
        let mut state = AnimationState::default();
        state.drs_requested = true;
        let before = state.clone();
        state.update(0.1);
        assert_eq!(state, before);
    }

    #[test]
    fn wheel_rotation_after_one_second() {
        let mut state = running_state();
        for _ in 0..10 {
            state.update(0.1);
        }
        assert!((state.wheel_rotation_deg - 330.0).abs() < 1e-9);
    }

    #[test]
    fn wheel_rotation_stays_in_range() {
        let mut state = running_state();
        let deltas = [0.0, 0.001, 0.016, 0.033, 0.1, 0.25, 1.0, 12.5, 1e-12];
        for _ in 0..200 {
            for &dt in &deltas {
                state.update(dt);
                assert!(
                    (0.0..360.0).contains(&state.wheel_rotation_deg),
                    "rotation {} out of range",
                    state.wheel_rotation_deg
                );
            }
        }
    }

    #[test]
    fn track_offset_stays_in_band() {
        let mut state = running_state();
        for i in 0..10_000 {
            state.update(0.004 + (i % 7) as f64 * 0.01);
            assert!(state.track_offset <= 0.0);
            assert!(state.track_offset > -TRACK_REPEAT);
        }
    }

    #[test]
    fn track_offset_wraps_past_repeat_length() {
        let mut state = running_state();
        state.track_offset = -99.0;
        state.update(0.1);
        assert!((state.track_offset - (-0.5)).abs() < 1e-9);
    }

    #[test]
    fn drs_opens_monotonically_and_stays_in_unit_range() {
        let mut state = running_state();
        let mut previous = state.drs_open_fraction;
        for _ in 0..300 {
            state.update(0.25);
            assert!(state.drs_open_fraction >= previous);
            assert!(state.drs_open_fraction <= 1.0);
            previous = state.drs_open_fraction;
        }
        assert!(state.drs_open_fraction > 0.99);
    }

    #[test]
    fn drs_closes_monotonically_when_toggled_off() {
        let mut state = running_state();
        for _ in 0..20 {
            state.update(0.1);
        }
        state.toggle_drs();
        let mut previous = state.drs_open_fraction;
        for _ in 0..100 {
            state.update(0.05);
            assert!(state.drs_open_fraction <= previous);
            assert!(state.drs_open_fraction >= 0.0);
            previous = state.drs_open_fraction;
        }
    }

    #[test]
    fn drs_toggle_works_while_stopped() {
        let mut state = AnimationState::default();
        state.toggle_drs();
        assert!(state.drs_requested);
        assert_eq!(state.drs_open_fraction, 0.0);
    }

    #[test]
    fn oversized_delta_cannot_overshoot_drs() {
        let mut state = running_state();
        state.update(1000.0);
        assert!(state.drs_open_fraction <= 1.0);
        assert!((state.elapsed - MAX_FRAME_DELTA).abs() < 1e-12);
    }

    #[test]
    fn negative_and_nan_deltas_are_ignored() {
        let mut state = running_state();
        let before = state.clone();
        state.update(-0.5);
        state.update(f64::NAN);
        assert_eq!(state.wheel_rotation_deg, before.wheel_rotation_deg);
        assert_eq!(state.track_offset, before.track_offset);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn steering_is_bounded_and_follows_elapsed_time() {
        let mut state = running_state();
        for _ in 0..500 {
            state.update(0.013);
            assert!(state.steer_angle_deg.abs() <= STEER_AMPLITUDE_DEG);
            assert!(state.suspension_bounce.abs() <= BOUNCE_AMPLITUDE);
        }
        let expected = STEER_AMPLITUDE_DEG * (STEER_PHASE_SPEED * state.elapsed).sin();
        assert!((state.steer_angle_deg - expected).abs() < 1e-9);
    }

    #[test]
    fn stopping_resets_transient_fields() {
        let mut state = running_state();
        for _ in 0..7 {
            state.update(0.03);
        }
        assert!(state.steer_angle_deg != 0.0);
        state.toggle_running();
        assert!(!state.running);
        assert_eq!(state.steer_angle_deg, 0.0);
        assert!(!state.drs_requested);
        assert_eq!(state.drs_open_fraction, 0.0);
        assert_eq!(state.suspension_bounce, 0.0);
    }

    #[test]
    fn restarting_resumes_phase_from_zero() {
        let mut state = running_state();
        for _ in 0..7 {
            state.update(0.03);
        }
        state.toggle_running();
        state.toggle_running();
        assert_eq!(state.elapsed, 0.0);
        state.update(0.02);
        let expected = STEER_AMPLITUDE_DEG * (STEER_PHASE_SPEED * 0.02).sin();
        assert!((state.steer_angle_deg - expected).abs() < 1e-12);
    }

    #[test]
    fn camera_moves_while_stopped() {
        let mut state = AnimationState::default();
        state.camera.zoom(2.0);
        state.update(0.1);
        assert!((state.camera.distance - 10.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_delta_bounds() {
        assert_eq!(clamp_delta(-1.0), 0.0);
        assert_eq!(clamp_delta(f64::INFINITY), 0.0);
        assert_eq!(clamp_delta(0.016), 0.016);
        assert_eq!(clamp_delta(3.0), MAX_FRAME_DELTA);
    }
}
