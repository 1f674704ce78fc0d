// Terminal renderer. Owns the terminal in raw mode on the alternate screen
// and restores it on drop, so every exit path releases the display.

mod format;
mod panels;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::models::DisplaySnapshot;

/// Consumes one assembled snapshot per tick. The hand-off is synchronous:
/// the sampling loop does not advance until the frame is drawn. An error
/// means the display is unusable and stops the loop.
pub trait Renderer {
    fn render(&mut self, snapshot: &DisplaySnapshot) -> Result<()>;
}

pub struct TerminalUi {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalUi {
    /// Takes over the terminal. A failure partway through undoes the
    /// raw-mode and alternate-screen switches already made; `Drop` only
    /// ever sees a fully built value.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut undo_raw = Restore::arm(|| {
            let _ = disable_raw_mode();
        });
        execute!(io::stdout(), EnterAlternateScreen)?;
        let mut undo_screen = Restore::arm(|| {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        });
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        undo_raw.disarm();
        undo_screen.disarm();
        Ok(TerminalUi { terminal })
    }
}

/// Best-effort restore action that runs on drop unless disarmed. Covers
/// the window between a terminal state switch and the `TerminalUi` that
/// will own its cleanup.
struct Restore<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Restore<F> {
    fn arm(action: F) -> Self {
        Restore(Some(action))
    }

    fn disarm(&mut self) {
        self.0 = None;
    }
}

impl<F: FnOnce()> Drop for Restore<F> {
    fn drop(&mut self) {
        if let Some(action) = self.0.take() {
            action();
        }
    }
}

impl Renderer for TerminalUi {
    fn render(&mut self, snapshot: &DisplaySnapshot) -> Result<()> {
        self.terminal
            .draw(|frame| draw_dashboard(frame, snapshot))?;
        Ok(())
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn draw_dashboard(frame: &mut Frame, snapshot: &DisplaySnapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    panels::header(frame, rows[0], snapshot);
    panels::footer(frame, rows[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(rows[1]);

    // Network Statistics is a fixed 13-row table; give it exactly that and
    // let the process and connection tables flex around it.
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(15),
            Constraint::Min(4),
        ])
        .split(body[0]);

    panels::process_table(frame, main[0], snapshot);
    panels::network_stats(frame, main[1], snapshot);
    panels::connections_table(frame, main[2], snapshot);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .split(body[1]);

    panels::system_overview(frame, sidebar[0], snapshot);
    panels::disk_table(frame, sidebar[1], snapshot);
    panels::disk_io(frame, sidebar[2], snapshot);
}
