use crate::camera::{PanDirection, KEY_ZOOM_STEP, SCROLL_ZOOM_STEP};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    ToggleRunning,
    ToggleDrs,
    Step(PanDirection),
    /// Positive values move the camera away
    Zoom(f64),
    /// Mouse drag in terminal cells
    Drag { columns: f64, rows: f64 },
    ToggleWireframe,
    ToggleDebug,
    ResetCamera,
    Resize { columns: u16, rows: u16 },
    Quit,
}

/// Arrow keys pan continuously while held when the terminal reports key
/// releases; otherwise each press and auto-repeat pans by a fixed step
#[derive(Debug, Default)]
pub struct InputState {
    releases_reported: bool,
    held: HashSet<PanDirection>,
    drag_anchor: Option<(u16, u16)>,
}

fn arrow(code: KeyCode) -> Option<PanDirection> {
    match code {
        KeyCode::Left => Some(PanDirection::Left),
        KeyCode::Right => Some(PanDirection::Right),
        KeyCode::Up => Some(PanDirection::Up),
        KeyCode::Down => Some(PanDirection::Down),
        _ => None,
    }
}

impl InputState {
    pub fn new(releases_reported: bool) -> Self {
        InputState {
            releases_reported,
            ..InputState::default()
        }
    }

    /// Directions currently held down
    pub fn held(&self) -> impl Iterator<Item = PanDirection> + '_ {
        self.held.iter().copied()
    }

    pub fn handle(&mut self, event: &Event) -> Option<Command> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => Some(Command::Resize {
                columns: *columns,
                rows: *rows,
            }),
            Event::FocusLost => {
                // Releases that happen while unfocused are never reported
                self.held.clear();
                self.drag_anchor = None;
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<Command> {
        if let Some(direction) = arrow(key.code) {
            return match (self.releases_reported, key.kind) {
                (true, KeyEventKind::Press) => {
                    self.held.insert(direction);
                    None
                }
                (true, KeyEventKind::Release) => {
                    self.held.remove(&direction);
                    None
                }
                (true, KeyEventKind::Repeat) => None,
                (false, KeyEventKind::Release) => None,
                (false, _) => Some(Command::Step(direction)),
            };
        }

        let repeatable = match key.kind {
            KeyEventKind::Release => return None,
            KeyEventKind::Repeat => true,
            KeyEventKind::Press => false,
        };
        let command = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Char('+') | KeyCode::Char('=') => Command::Zoom(-KEY_ZOOM_STEP),
            KeyCode::Char('-') => Command::Zoom(KEY_ZOOM_STEP),
            _ if repeatable => return None,
            KeyCode::Char(' ') => Command::ToggleRunning,
            KeyCode::Char('d') | KeyCode::Char('D') => Command::ToggleDrs,
            KeyCode::Char('w') | KeyCode::Char('W') => Command::ToggleWireframe,
            KeyCode::Char('i') | KeyCode::Char('I') => Command::ToggleDebug,
            KeyCode::Char('r') | KeyCode::Char('R') => Command::ResetCamera,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Option<Command> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_anchor = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (column, row) = self.drag_anchor.replace((mouse.column, mouse.row))?;
                Some(Command::Drag {
                    columns: f64::from(mouse.column) - f64::from(column),
                    rows: f64::from(mouse.row) - f64::from(row),
                })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_anchor = None;
                None
            }
            MouseEventKind::ScrollUp => Some(Command::Zoom(-SCROLL_ZOOM_STEP)),
            MouseEventKind::ScrollDown => Some(Command::Zoom(SCROLL_ZOOM_STEP)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn with_kind(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn command_keys() {
        let mut input = InputState::new(false);
        assert_eq!(input.handle(&press(KeyCode::Char(' '))), Some(Command::ToggleRunning));
        assert_eq!(input.handle(&press(KeyCode::Char('D'))), Some(Command::ToggleDrs));
        assert_eq!(input.handle(&press(KeyCode::Char('w'))), Some(Command::ToggleWireframe));
        assert_eq!(input.handle(&press(KeyCode::Char('i'))), Some(Command::ToggleDebug));
        assert_eq!(input.handle(&press(KeyCode::Char('r'))), Some(Command::ResetCamera));
        assert_eq!(input.handle(&press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(input.handle(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut input = InputState::new(false);
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(input.handle(&event), Some(Command::Quit));
        assert_eq!(input.handle(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn zoom_keys_repeat_but_toggles_do_not() {
        let mut input = InputState::new(true);
        assert_eq!(
            input.handle(&with_kind(KeyCode::Char('+'), KeyEventKind::Repeat)),
            Some(Command::Zoom(-KEY_ZOOM_STEP))
        );
        assert_eq!(
            input.handle(&press(KeyCode::Char('-'))),
            Some(Command::Zoom(KEY_ZOOM_STEP))
        );
        assert_eq!(
            input.handle(&with_kind(KeyCode::Char(' '), KeyEventKind::Repeat)),
            None
        );
        assert_eq!(
            input.handle(&with_kind(KeyCode::Char(' '), KeyEventKind::Release)),
            None
        );
    }

    #[test]
    fn arrows_step_without_release_reporting() {
        let mut input = InputState::new(false);
        assert_eq!(
            input.handle(&press(KeyCode::Left)),
            Some(Command::Step(PanDirection::Left))
        );
        assert_eq!(
            input.handle(&with_kind(KeyCode::Up, KeyEventKind::Repeat)),
            Some(Command::Step(PanDirection::Up))
        );
        assert_eq!(input.held().count(), 0);
    }

    #[test]
    fn arrows_are_held_with_release_reporting() {
        let mut input = InputState::new(true);
        assert_eq!(input.handle(&press(KeyCode::Right)), None);
        assert_eq!(input.handle(&press(KeyCode::Down)), None);
        let mut held: Vec<_> = input.held().collect();
        held.sort_by_key(|d| *d as u8);
        assert_eq!(held, vec![PanDirection::Right, PanDirection::Down]);

        input.handle(&with_kind(KeyCode::Right, KeyEventKind::Release));
        assert_eq!(input.held().collect::<Vec<_>>(), vec![PanDirection::Down]);

        input.handle(&Event::FocusLost);
        assert_eq!(input.held().count(), 0);
    }

    #[test]
    fn left_drag_reports_cell_deltas() {
        let mut input = InputState::new(false);
        assert_eq!(input.handle(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 5)), None);
        input.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        assert_eq!(
            input.handle(&mouse(MouseEventKind::Drag(MouseButton::Left), 13, 8)),
            Some(Command::Drag {
                columns: 3.0,
                rows: -2.0
            })
        );
        assert_eq!(
            input.handle(&mouse(MouseEventKind::Drag(MouseButton::Left), 12, 8)),
            Some(Command::Drag {
                columns: -1.0,
                rows: 0.0
            })
        );
        input.handle(&mouse(MouseEventKind::Up(MouseButton::Left), 12, 8));
        assert_eq!(input.handle(&mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1)), None);
    }

    #[test]
    fn wheel_zooms_and_resize_passes_through() {
        let mut input = InputState::new(false);
        assert_eq!(
            input.handle(&mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(Command::Zoom(-SCROLL_ZOOM_STEP))
        );
        assert_eq!(
            input.handle(&mouse(MouseEventKind::ScrollDown, 0, 0)),
            Some(Command::Zoom(SCROLL_ZOOM_STEP))
        );
        assert_eq!(
            input.handle(&Event::Resize(100, 40)),
            Some(Command::Resize {
                columns: 100,
                rows: 40
            })
        );
    }
}
