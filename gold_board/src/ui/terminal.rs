//! Raw-mode terminal setup and teardown.
use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gold_common::Result;
use ratatui::{Terminal, backend::CrosstermBackend};

/// The concrete terminal the board draws on.
pub type BoardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode on the alternate screen.
///
/// Installs a panic hook first so a crash leaves the shell usable.
pub fn setup() -> Result<BoardTerminal> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Give the terminal back to the shell.
pub fn restore(terminal: &mut BoardTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
