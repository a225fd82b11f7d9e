//! Screen reader façade
//!
//! The game calls these functions from its main thread. Each call goes
//! straight to the platform backend; the only logic here is suppressing
//! repeats of the last announcement. Failures are logged and swallowed.

use crate::config::Config;
use crate::gesture::{Gesture, TouchEvent};
use crate::speech::{create_backend, SpeechBackend, SpokenText};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use std::cell::Cell;
use std::sync::{Mutex, PoisonError};

/// Screen reader state: the backend connection and the last announcement
pub struct ScreenReader {
    /// Connection to the platform service, None until initialized
    backend: Option<Box<dyn SpeechBackend>>,

    /// Last text sent to the backend, kept across re-initialization
    spoken: SpokenText,
}

impl ScreenReader {
    /// Create a screen reader with no backend attached
    pub fn new() -> Self {
        Self {
            backend: None,
            spoken: SpokenText::new(),
        }
    }

    /// Create a screen reader speaking through `backend`
    pub fn with_backend(backend: impl SpeechBackend + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            spoken: SpokenText::new(),
        }
    }

    /// Connect to the platform accessibility service
    ///
    /// Replaces any existing connection. A backend that cannot be created
    /// leaves the reader silent rather than failing.
    pub fn initialize(&mut self, config: &Config) {
        self.shut_down();

        if !config.enabled() {
            info!("Screen reader disabled in config");
            return;
        }

        match create_backend(config) {
            Ok(backend) => {
                info!("Screen reader using {}", backend.name());
                self.backend = Some(backend);
            }
            Err(e) => warn!("Screen reader unavailable: {}", e),
        }
    }

    /// Release the platform connection
    pub fn shut_down(&mut self) {
        if let Some(backend) = self.backend.take() {
            debug!("Shutting down {} backend", backend.name());
        }
    }

    /// Is a backend attached?
    pub fn is_initialized(&self) -> bool {
        self.backend.is_some()
    }

    /// Name of the attached backend
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.name())
    }

    /// Speak `text` unless it repeats the last announcement
    ///
    /// With `force` set the text is always spoken and interrupts current
    /// speech where the platform supports it.
    pub fn speak_text(&mut self, text: &str, force: bool) {
        if !self.spoken.admit(text, force) {
            return;
        }

        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.speak(text, force) {
                warn!("{}", e);
            }
        }
    }

    /// Stop current speech
    pub fn stop(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.stop() {
                warn!("{}", e);
            }
        }
    }

    /// Is the platform engine ready to speak?
    pub fn is_ready(&self) -> bool {
        self.backend.as_ref().map_or(false, |b| b.is_ready())
    }

    /// Is a system screen reader (TalkBack) active?
    pub fn is_accessibility_enabled(&self) -> bool {
        self.backend
            .as_ref()
            .map_or(false, |b| b.is_accessibility_enabled())
    }

    /// Feed a touch event to the platform gesture detector
    pub fn handle_gesture(&mut self, event: TouchEvent) -> Gesture {
        self.backend
            .as_mut()
            .map_or(Gesture::None, |b| b.handle_gesture(event))
    }

    /// Last text handed to the backend
    pub fn last_spoken(&self) -> &str {
        self.spoken.last()
    }
}

impl Default for ScreenReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide screen reader used by the free functions below
static SCREEN_READER: Lazy<Mutex<ScreenReader>> = Lazy::new(|| Mutex::new(ScreenReader::new()));

thread_local! {
    /// Set while this thread holds the global reader
    static IN_FACADE: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as inside the façade until dropped
struct FacadeEntry;

impl FacadeEntry {
    /// Enter the façade, or None if this thread is already inside it
    fn enter() -> Option<Self> {
        if IN_FACADE.with(|flag| flag.replace(true)) {
            None
        } else {
            Some(FacadeEntry)
        }
    }
}

impl Drop for FacadeEntry {
    fn drop(&mut self) {
        IN_FACADE.with(|flag| flag.set(false));
    }
}

/// Run `f` on the global reader, recovering from a panic in a previous holder
///
/// A backend that calls back into the façade (managed code re-entering
/// through the native entry points) would wait on its own lock; such a
/// nested call is dropped and answered with `default`.
fn with_global<R>(op: &str, default: R, f: impl FnOnce(&mut ScreenReader) -> R) -> R {
    let Some(_entry) = FacadeEntry::enter() else {
        warn!("{}: nested screen reader call dropped", op);
        return default;
    };

    let mut reader = SCREEN_READER.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut reader)
}

/// Connect the global screen reader using the default config
///
/// A config that cannot be loaded falls back to built-in defaults.
pub fn initialize_screen_reader() {
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Using default screen reader config: {}", e);
        Config::default()
    });
    initialize_screen_reader_with(&config);
}

/// Connect the global screen reader with an explicit config
pub fn initialize_screen_reader_with(config: &Config) {
    with_global("initialize", (), |reader| reader.initialize(config));
}

/// Install a custom backend in the global screen reader
pub fn install_backend(backend: impl SpeechBackend + 'static) {
    with_global("install_backend", (), |reader| {
        reader.shut_down();
        reader.backend = Some(Box::new(backend));
    });
}

/// Release the global screen reader's connection
pub fn shut_down_screen_reader() {
    with_global("shut_down", (), ScreenReader::shut_down);
}

/// Speak through the global screen reader, dropping repeats unless forced
pub fn speak_text(text: &str, force: bool) {
    with_global("speak_text", (), |reader| reader.speak_text(text, force));
}

/// Stop speech on the global screen reader
pub fn stop_speech() {
    with_global("stop_speech", (), ScreenReader::stop);
}

/// Is the global screen reader's engine ready?
pub fn is_screen_reader_ready() -> bool {
    with_global("is_ready", false, |reader| reader.is_ready())
}

/// Is a system screen reader (TalkBack) active?
pub fn is_accessibility_enabled() -> bool {
    with_global("is_accessibility_enabled", false, |reader| {
        reader.is_accessibility_enabled()
    })
}

/// Feed a touch event to the platform gesture detector
pub fn handle_gesture(event: TouchEvent) -> Gesture {
    with_global("handle_gesture", Gesture::None, |reader| {
        reader.handle_gesture(event)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        spoken: Arc<Mutex<Vec<(String, bool)>>>,
        stops: Arc<Mutex<u32>>,
    }

    impl SpeechBackend for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn speak(&mut self, text: &str, interrupt: bool) -> Result<()> {
            self.spoken.lock().unwrap().push((text.to_string(), interrupt));
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            *self.stops.lock().unwrap() += 1;
            Ok(())
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_without_backend_is_silent() {
        let mut reader = ScreenReader::new();
        reader.speak_text("Hello", false);
        reader.stop();
        assert!(!reader.is_initialized());
        assert!(!reader.is_ready());
        assert!(!reader.is_accessibility_enabled());
        assert_eq!(reader.handle_gesture(TouchEvent::new(0, 1.0, 2.0, 3)), Gesture::None);
        // Text is still remembered
        assert_eq!(reader.last_spoken(), "Hello");
    }

    #[test]
    fn test_force_passed_as_interrupt() {
        let recorder = Recorder::default();
        let mut reader = ScreenReader::with_backend(recorder.clone());

        reader.speak_text("Town", false);
        reader.speak_text("Town", true);

        let spoken = recorder.spoken.lock().unwrap();
        assert_eq!(
            *spoken,
            vec![("Town".to_string(), false), ("Town".to_string(), true)]
        );
    }

    #[test]
    fn test_stop_reaches_backend() {
        let recorder = Recorder::default();
        let mut reader = ScreenReader::with_backend(recorder.clone());
        reader.stop();
        assert_eq!(*recorder.stops.lock().unwrap(), 1);
    }

    #[test]
    fn test_disabled_config_leaves_no_backend() {
        let mut config = Config::default();
        config.set("screen_reader", "enabled", "false");

        let mut reader = ScreenReader::with_backend(Recorder::default());
        reader.initialize(&config);

        assert!(!reader.is_initialized());
        assert_eq!(reader.backend_name(), None);
    }

    #[test]
    fn test_memory_survives_shut_down() {
        let recorder = Recorder::default();
        let mut reader = ScreenReader::with_backend(recorder.clone());
        reader.speak_text("Options", false);
        reader.shut_down();
        assert_eq!(reader.last_spoken(), "Options");
        assert_eq!(recorder.spoken.lock().unwrap().len(), 1);
    }

    /// Backend that calls back into the global façade while speaking
    struct ReentrantBackend {
        inner_returned: Arc<Mutex<u32>>,
        spoken: Arc<Mutex<Vec<String>>>,
    }

    impl SpeechBackend for ReentrantBackend {
        fn name(&self) -> &'static str {
            "reentrant"
        }

        fn speak(&mut self, text: &str, _interrupt: bool) -> Result<()> {
            self.spoken.lock().unwrap().push(text.to_string());
            stop_speech();
            speak_text("nested", true);
            assert!(!is_screen_reader_ready());
            *self.inner_returned.lock().unwrap() += 1;
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            panic!("nested stop must not reach the backend");
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_nested_global_call_is_dropped() {
        // The only unit test touching the process-wide reader
        let inner_returned = Arc::new(Mutex::new(0));
        let spoken = Arc::new(Mutex::new(Vec::new()));
        install_backend(ReentrantBackend {
            inner_returned: inner_returned.clone(),
            spoken: spoken.clone(),
        });

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            speak_text("Outer", true);
            let _ = done_tx.send(());
        });

        assert!(
            done_rx
                .recv_timeout(std::time::Duration::from_secs(5))
                .is_ok(),
            "nested call blocked the façade"
        );
        assert_eq!(*inner_returned.lock().unwrap(), 1);
        assert_eq!(*spoken.lock().unwrap(), vec!["Outer".to_string()]);

        // The façade is usable again once the outer call returned
        assert!(is_screen_reader_ready());
        shut_down_screen_reader();
    }
}
