use crate::graphics::{Canvas, Rgb};
use crate::hud::{Anchor, HudLine};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::{execute, queue};
use std::io::{self, Write};
use std::panic;

/// Upper half block: foreground paints the top pixel, background the bottom one
pub const HALF_BLOCK: char = '▀';

/// Raw mode, alternate screen and mouse capture for as long as it lives
pub struct TerminalSession {
    keyboard_enhanced: bool,
}

impl TerminalSession {
    pub fn start(title: &str) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, dropping the session restores the terminal
        let mut session = TerminalSession {
            keyboard_enhanced: false,
        };
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            Hide,
            EnableMouseCapture,
            EnableFocusChange,
            SetTitle(title),
            Clear(ClearType::All)
        )?;
        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            session.keyboard_enhanced = true;
        }
        install_panic_hook(session.keyboard_enhanced);
        tracing::info!(
            key_releases = session.keyboard_enhanced,
            "terminal session started"
        );
        Ok(session)
    }

    /// Whether key release events will be delivered
    pub fn releases_reported(&self) -> bool {
        self.keyboard_enhanced
    }
}

/// Undoes everything `TerminalSession::start` set up on `out`
fn restore<W: Write>(out: &mut W, keyboard_enhanced: bool) -> io::Result<()> {
    if keyboard_enhanced {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(
        out,
        ResetColor,
        DisableFocusChange,
        DisableMouseCapture,
        Show,
        LeaveAlternateScreen
    )
}

/// Leaves the alternate screen before the panic message is printed
fn install_panic_hook(keyboard_enhanced: bool) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore(&mut io::stdout(), keyboard_enhanced);
        let _ = terminal::disable_raw_mode();
        previous(info);
    }));
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore(&mut io::stdout(), self.keyboard_enhanced);
        let _ = terminal::disable_raw_mode();
        tracing::info!("terminal restored");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// A grid of terminal cells that only writes what changed since the last flush
pub struct Screen {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    previous: Vec<Cell>,
}

impl Screen {
    pub fn new(columns: usize, rows: usize) -> Self {
        let blank = Cell {
            symbol: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
        };
        Screen {
            columns,
            rows,
            cells: vec![blank; columns * rows],
            previous: Vec::new(),
        }
    }

    /// Canvas size in pixels that maps onto this screen
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.columns, self.rows * 2)
    }

    /// Resizes the grid; the next flush redraws everything
    pub fn resize(&mut self, columns: usize, rows: usize) {
        if columns != self.columns || rows != self.rows {
            *self = Screen::new(columns, rows);
        }
    }

    #[cfg(test)]
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[row * self.columns + column]
    }

    /// Fills the cells from the canvas, two pixels per cell, and lays the HUD over it
    pub fn compose(&mut self, canvas: &Canvas, hud: &[HudLine]) {
        let columns = self.columns.min(canvas.width());
        let rows = self.rows.min(canvas.height() / 2);
        for row in 0..rows {
            for column in 0..columns {
                self.cells[row * self.columns + column] = Cell {
                    symbol: HALF_BLOCK,
                    fg: canvas.pixel(column, row * 2),
                    bg: canvas.pixel(column, row * 2 + 1),
                };
            }
        }
        for line in hud {
            self.overlay(line);
        }
    }

    fn overlay(&mut self, line: &HudLine) {
        if line.row >= self.rows {
            return;
        }
        let length = line.text.chars().count().min(self.columns);
        let start = match line.anchor {
            Anchor::Left => 1.min(self.columns - length),
            Anchor::Right => self.columns.saturating_sub(length + 1),
        };
        for (i, symbol) in line.text.chars().take(length).enumerate() {
            let cell = &mut self.cells[line.row * self.columns + start + i];
            *cell = Cell {
                symbol,
                fg: line.color,
                bg: dim(cell.fg, cell.bg),
            };
        }
    }

    /// Writes the changed cells and returns how many were written
    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        let mut written = 0;
        let mut colors = None;
        let mut cursor = None;
        for row in 0..self.rows {
            for column in 0..self.columns {
                let index = row * self.columns + column;
                let cell = self.cells[index];
                if self.previous.get(index) == Some(&cell) {
                    continue;
                }
                if cursor != Some((column, row)) {
                    queue!(out, MoveTo(column as u16, row as u16))?;
                }
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(
                        out,
                        SetForegroundColor(cell.fg.into()),
                        SetBackgroundColor(cell.bg.into())
                    )?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(out, Print(cell.symbol))?;
                cursor = Some((column + 1, row));
                written += 1;
            }
        }
        if written > 0 {
            queue!(out, ResetColor)?;
        }
        out.flush()?;
        self.previous.clone_from(&self.cells);
        Ok(written)
    }
}

/// Darkened backdrop behind HUD text
fn dim(top: Rgb, bottom: Rgb) -> Rgb {
    let mix = |a: u8, b: u8| ((u16::from(a) + u16::from(b)) / 6) as u8;
    Rgb::new(mix(top.r, bottom.r), mix(top.g, bottom.g), mix(top.b, bottom.b))
}
