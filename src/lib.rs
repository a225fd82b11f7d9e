//! Game screen reader bridge
//!
//! Speaks game text through the platform accessibility service (Tolk on
//! Windows, Speech Dispatcher on Linux, TextToSpeech/TalkBack on Android)
//! and forwards touch gestures on mobile.

pub mod android;
pub mod config;
pub mod error;
pub mod gesture;
pub mod platform;
pub mod screen_reader;
pub mod speech;

pub use config::Config;
pub use error::{Result, ScreenReaderError};
pub use gesture::{Gesture, TouchEvent};
pub use screen_reader::{
    handle_gesture, initialize_screen_reader, initialize_screen_reader_with, install_backend,
    is_accessibility_enabled, is_screen_reader_ready, shut_down_screen_reader, speak_text,
    stop_speech, ScreenReader,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "game-screen-reader";
