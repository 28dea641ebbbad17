//! Terminal management module - raw mode session and the drawing surface.

mod session;
mod surface;

pub use session::TerminalSession;
pub use surface::{is_interrupt_key, CrosstermSurface, Surface};
