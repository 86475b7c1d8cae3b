use crate::camera::PanDirection;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::graphics::Canvas;
use crate::hud::{hud_lines, FpsCounter, HudInfo, PANEL_LINES, PANEL_ROW};
use crate::input::{Command, InputState};
use crate::model::Livery;
use crate::scene;
use crate::state::{clamp_delta, AnimationState};
use crate::terminal::{Screen, TerminalSession};
use crossterm::event;
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Room for the status line and the DRS indicator side by side
pub const MIN_COLUMNS: u16 = 48;
/// Room for the whole debug panel
pub const MIN_ROWS: u16 = (PANEL_ROW + PANEL_LINES) as u16;
const FALLBACK_SIZE: (u16, u16) = (80, 24);

pub struct Viewer {
    state: AnimationState,
    livery: &'static Livery,
    fixed_size: bool,
    wireframe: bool,
    debug: bool,
    canvas: Canvas,
    screen: Screen,
    fps: FpsCounter,
}

impl Viewer {
    pub fn new(config: &ViewerConfig, (columns, rows): (u16, u16), now: Instant) -> Self {
        let screen = Screen::new(columns.into(), rows.into());
        let (width, height) = screen.pixel_size();
        Viewer {
            state: AnimationState::default(),
            livery: config.team.livery(),
            fixed_size: config.size.is_some(),
            wireframe: config.wireframe,
            debug: config.debug,
            canvas: Canvas::new(width, height),
            screen,
            fps: FpsCounter::new(now),
        }
    }

    /// Applies one command; breaks when the viewer should quit
    pub fn apply(&mut self, command: Command) -> ControlFlow<()> {
        let state = &mut self.state;
        match command {
            Command::ToggleRunning => state.toggle_running(),
            Command::ToggleDrs => state.toggle_drs(),
            Command::Step(direction) => state.camera.step(direction),
            Command::Zoom(amount) => state.camera.zoom(amount),
            Command::Drag { columns, rows } => state.camera.drag(columns, rows),
            Command::ResetCamera => state.camera.reset(),
            Command::ToggleWireframe => {
                self.wireframe = !self.wireframe;
                tracing::info!(wireframe = self.wireframe, "render mode changed");
            }
            Command::ToggleDebug => self.debug = !self.debug,
            Command::Resize { columns, rows } => self.resize(columns, rows),
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        if self.fixed_size {
            return;
        }
        tracing::debug!(columns, rows, "terminal resized");
        self.screen.resize(columns.into(), rows.into());
        let (width, height) = self.screen.pixel_size();
        self.canvas.resize(width, height);
    }

    /// Advances the camera by the held keys and the animation by one frame
    pub fn step(&mut self, delta_seconds: f64, held: impl Iterator<Item = PanDirection>) {
        let pan_delta = clamp_delta(delta_seconds);
        for direction in held {
            self.state.camera.pan(direction, pan_delta);
        }
        self.state.update(delta_seconds);
    }

    /// Renders the scene and HUD into the screen buffer
    pub fn draw(&mut self, now: Instant) {
        let fps = self.fps.tick(now);
        let stats = scene::render(&self.state, self.livery, &mut self.canvas, self.wireframe);
        let lines = hud_lines(&HudInfo {
            state: &self.state,
            livery: self.livery,
            fps,
            triangles: stats.triangles,
            wireframe: self.wireframe,
            debug: self.debug,
        });
        self.screen.compose(&self.canvas, &lines);
    }

    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        self.screen.flush(out)
    }
}

fn initial_size(config: &ViewerConfig) -> (u16, u16) {
    config
        .size
        .or_else(|| termsize::get().map(|size| (size.cols, size.rows)))
        .unwrap_or(FALLBACK_SIZE)
}

/// Runs the viewer until quit. Each frame drains pending terminal events,
/// applies held camera keys, advances the animation once, renders, presents
/// and sleeps for what is left of the frame budget.
pub fn run(config: ViewerConfig) -> Result<(), ViewerError> {
    let (columns, rows) = initial_size(&config);
    if columns < MIN_COLUMNS || rows < MIN_ROWS {
        return Err(ViewerError::TooSmall {
            columns,
            rows,
            min_columns: MIN_COLUMNS,
            min_rows: MIN_ROWS,
        });
    }

    let livery = config.team.livery();
    tracing::info!(
        livery = livery.title,
        columns,
        rows,
        fps = config.target_fps,
        "starting viewer"
    );

    let session = TerminalSession::start(livery.title)?;
    let mut input = InputState::new(session.releases_reported());
    let mut viewer = Viewer::new(&config, (columns, rows), Instant::now());
    let frame_budget = Duration::from_secs_f64(1.0 / f64::from(config.target_fps));
    let mut stdout = io::stdout();
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Some(command) = input.handle(&event) {
                if viewer.apply(command).is_break() {
                    tracing::info!("quit requested");
                    return Ok(());
                }
            }
        }

        let delta = frame_start.duration_since(last_frame).as_secs_f64();
        last_frame = frame_start;
        viewer.step(delta, input.held());
        viewer.draw(frame_start);
        viewer.present(&mut stdout)?;

        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}
