//! Raw terminal mode management with panic-safe cleanup.

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Static flag to track if a session is active (for panic handler)
pub(crate) static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Guard that owns the terminal for playback: raw mode, alternate screen
/// and a hidden cursor. Everything is restored on drop, on
/// [`leave`](Self::leave), and from the panic hook.
pub struct TerminalSession {
    /// Whether this guard is responsible for cleanup
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be switched (e.g. stdout is
    /// not a TTY). Partial state is rolled back before returning.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        // Flag before the escape writes so a failure below still restores raw mode
        SESSION_ACTIVE.store(true, Ordering::SeqCst);
        let session = Self { active: true };

        crossterm::execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        log::debug!("Terminal session entered");

        Ok(session)
    }

    /// Restore the terminal without dropping the guard.
    /// After calling this, the guard's drop is a no-op.
    pub fn leave(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            SESSION_ACTIVE.store(false, Ordering::SeqCst);
            let screen = crossterm::execute!(io::stdout(), Show, LeaveAlternateScreen);
            disable_raw_mode()?;
            screen?;
            log::debug!("Terminal session left");
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Best-effort cleanup - ignore errors during drop
        let _ = self.leave();
    }
}

/// Install a panic hook that restores terminal state before panicking.
/// This ensures the terminal is usable even if the app panics.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if SESSION_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = crossterm::execute!(io::stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }

        original_hook(panic_info);
    }));
}
