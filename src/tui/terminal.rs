//! Terminal lifecycle: raw mode and the alternate screen.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{BookdeskError, Result};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal into raw mode on the alternate screen and returns
/// the ratatui handle. Refuses to start when stdout is not a TTY.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(BookdeskError::Io(
            "stdout is not a terminal; the depth-book UI needs a TTY".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| BookdeskError::Io(format!("failed to enable raw mode: {e}")))?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(BookdeskError::Io(format!(
            "failed to enter alternate screen: {e}"
        )));
    }

    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = disable_raw_mode();
            Err(BookdeskError::Io(format!("failed to create terminal: {e}")))
        }
    }
}

/// Leaves the alternate screen and hands the terminal back to the shell.
/// Called on every exit path, including after a failed run.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| BookdeskError::Io(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| BookdeskError::Io(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| BookdeskError::Io(e.to_string()))?;
    Ok(())
}
