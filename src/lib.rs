//! termtube library crate.
//!
//! Plays a video as ASCII art in the terminal: frames come from a
//! [`video::FrameSource`], are rasterized to a [`ascii::GlyphGrid`], drawn
//! to a [`terminal::Surface`] and paced by a [`clock::PlaybackClock`]. The
//! entry point is [`player::run_playback`].

pub mod ascii;
pub mod audio;
pub mod cancel;
pub mod cli;
pub mod clock;
pub mod config;
pub mod logging;
pub mod media;
pub mod player;
pub mod terminal;
pub mod video;

pub use cancel::CancelFlag;
pub use player::{run_playback, PlaybackError, PlaybackResult, StopReason};
