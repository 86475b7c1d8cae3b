use crate::graphics::Rgb;
use crate::model::Livery;
use crate::state::AnimationState;
use std::time::{Duration, Instant};

const GREEN: Rgb = Rgb::new(0, 255, 0);
const YELLOW: Rgb = Rgb::new(255, 255, 0);
const AMBER: Rgb = Rgb::new(255, 166, 0);
const GREY: Rgb = Rgb::new(153, 153, 153);
const LIGHT_GREY: Rgb = Rgb::new(200, 200, 200);

/// Key help, one entry per row under the status line
pub const HELP: [&str; 2] = [
    "SPACE run  D drs  arrows/drag camera",
    "+/- zoom  W wireframe  I info  R reset  Q quit",
];

/// First row of the debug panel
pub const PANEL_ROW: usize = 1 + HELP.len() + 1;
/// Lines in the debug panel
pub const PANEL_LINES: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Right,
}

/// One line of HUD text on a terminal row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudLine {
    pub row: usize,
    pub anchor: Anchor,
    pub text: String,
    pub color: Rgb,
}

impl HudLine {
    fn left(row: usize, text: impl Into<String>, color: Rgb) -> Self {
        HudLine {
            row,
            anchor: Anchor::Left,
            text: text.into(),
            color,
        }
    }
}

/// Everything the HUD shows for one frame
pub struct HudInfo<'a> {
    pub state: &'a AnimationState,
    pub livery: &'a Livery,
    pub fps: f64,
    pub triangles: usize,
    pub wireframe: bool,
    pub debug: bool,
}

pub fn status_line(state: &AnimationState) -> HudLine {
    if state.running {
        HudLine::left(0, "RACING! Press SPACE to stop", GREEN)
    } else {
        HudLine::left(0, "Press SPACE to start racing", YELLOW)
    }
}

/// DRS indicator, shown only while the car is driving
pub fn drs_line(state: &AnimationState) -> Option<HudLine> {
    if !state.running {
        return None;
    }
    let (text, color) = if state.drs_open_fraction > 0.5 {
        ("DRS: OPEN", GREEN)
    } else if state.drs_requested {
        ("DRS: OPENING...", AMBER)
    } else {
        ("DRS: CLOSED", GREY)
    };
    Some(HudLine {
        row: 0,
        anchor: Anchor::Right,
        text: text.to_string(),
        color,
    })
}

fn debug_panel(info: &HudInfo) -> Vec<HudLine> {
    let state = info.state;
    let camera = &state.camera;
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    let lines: [String; PANEL_LINES] = [
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        info.livery.title.to_string(),
        format!("Wheel: {:.1}°", state.wheel_rotation_deg),
        format!("Steer: {:+.2}°", state.steer_angle_deg),
        format!(
            "DRS: {:.2} ({})",
            state.drs_open_fraction,
            if state.drs_requested { "open" } else { "closed" }
        ),
        format!("Track: {:.2}", state.track_offset),
        format!(
            "Camera: yaw {:.1} pitch {:.1} dist {:.1}",
            camera.yaw_deg, camera.pitch_deg, camera.distance
        ),
        format!("FPS: {:.2}", info.fps),
        format!("Triangles: {}", info.triangles),
        format!("Wireframe: {}", on_off(info.wireframe)),
    ];
    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| HudLine::left(PANEL_ROW + i, text, Rgb::WHITE))
        .collect()
}

/// All HUD lines for the frame
pub fn hud_lines(info: &HudInfo) -> Vec<HudLine> {
    let mut lines = vec![status_line(info.state)];
    lines.extend(
        HELP.iter()
            .enumerate()
            .map(|(i, text)| HudLine::left(1 + i, *text, LIGHT_GREY)),
    );
    lines.extend(drs_line(info.state));
    if info.debug {
        lines.extend(debug_panel(info));
    }
    lines
}

/// Frames per second, averaged over windows of at least one second
pub struct FpsCounter {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        FpsCounter {
            frames_since_last_update: 0,
            last_fps_calculation: now,
            fps: 0.0,
        }
    }

    /// Counts one frame and returns the current estimate
    pub fn tick(&mut self, now: Instant) -> f64 {
        self.frames_since_last_update += 1;
        let duration = now.duration_since(self.last_fps_calculation);
        if duration >= Duration::from_secs(1) {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
        self.fps
    }
}
