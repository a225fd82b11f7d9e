//! Speech backend abstraction
//!
//! Provides a unified interface to the platform accessibility services.
//! The façade forwards every announcement through this trait; which
//! implementation sits behind it is decided when the crate is compiled.

use crate::config::Config;
use crate::gesture::{Gesture, TouchEvent};
use crate::platform::Platform;
use crate::Result;
use log::info;

/// Platform accessibility service
///
/// Implementations call straight through to the OS or library API.
/// Methods without a meaningful answer on a platform keep the defaults.
pub trait SpeechBackend: Send {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Speak text to the player
    fn speak(&mut self, text: &str, interrupt: bool) -> Result<()>;

    /// Stop current speech
    fn stop(&mut self) -> Result<()>;

    /// Is the engine ready to accept speech?
    fn is_ready(&self) -> bool;

    /// Is a system screen reader (TalkBack) active?
    fn is_accessibility_enabled(&self) -> bool {
        false
    }

    /// Feed a touch event to the platform gesture detector
    fn handle_gesture(&mut self, _event: TouchEvent) -> Gesture {
        Gesture::None
    }
}

/// Create the speech backend for the platform this crate was built for
///
/// **Windows:** Tolk (active screen reader), then the Windows speech engine.
///
/// **Linux:** Speech Dispatcher.
///
/// **Android:** the app's `AndroidTextToSpeech` / `AccessibilityManager` /
/// `GestureDetector` classes through JNI. Creation never fails there; calls
/// degrade to no-ops until the VM and classes are reachable.
///
/// **Other:** the `tts` crate's default engine.
pub fn create_backend(config: &Config) -> Result<Box<dyn SpeechBackend>> {
    info!(
        "Creating speech backend for platform: {}",
        Platform::current()
    );

    #[cfg(target_os = "android")]
    {
        use super::backends::android::AndroidBackend;
        Ok(Box::new(AndroidBackend::new(config)))
    }

    #[cfg(not(target_os = "android"))]
    {
        use super::backends::native::NativeBackend;
        Ok(Box::new(NativeBackend::new(config)?))
    }
}
