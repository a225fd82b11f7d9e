//! Platform detection utilities
//!
//! The backend is chosen at build time; this module names the choice so the
//! rest of the crate (config defaults, logging) can refer to it.

use std::fmt;

/// Platform families with a distinct accessibility service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Tolk screen-reader bridge, Windows speech as fallback
    Windows,
    /// Speech Dispatcher
    Linux,
    /// TextToSpeech / TalkBack via the app's managed classes
    Android,
    /// Whatever the `tts` crate picks by default (AVFoundation on macOS)
    Other,
}

impl Platform {
    /// Platform this crate was compiled for
    pub const fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// Whether speech should cut off the previous utterance by default
    ///
    /// Screen readers on Windows always interrupt; Speech Dispatcher queues.
    pub const fn interrupts_by_default(self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Android => "android",
            Platform::Other => std::env::consts::OS,
        };
        f.write_str(name)
    }
}
