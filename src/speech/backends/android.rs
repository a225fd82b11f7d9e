//! Android backend forwarding to the app's managed classes over JNI
//!
//! The app owns `AndroidTextToSpeech` (system TextToSpeech engine),
//! `AccessibilityManager` (TalkBack status) and `GestureDetector`. This
//! backend only calls into them; every failure is logged and answered with
//! a default so gameplay never notices.

use crate::android::methods::{clear_exception, JavaMethods};
use crate::android::{call_or_default, java_vm};
use crate::config::Config;
use crate::gesture::{Gesture, TouchEvent};
use crate::speech::SpeechBackend;
use crate::Result;
use jni::JNIEnv;
use log::debug;

/// Speech, TalkBack status and gestures through JNI
pub struct AndroidBackend {
    /// JNI class path prefix of the managed classes
    package: String,
}

impl AndroidBackend {
    /// Create the backend
    ///
    /// The managed TTS engine is started by the activity, so nothing is
    /// opened here. Method handles are resolved on first use.
    pub fn new(config: &Config) -> Self {
        let package = config.android_package();
        debug!("Creating Android backend for {}", package);
        Self { package }
    }

    /// Run `f` on an attached thread with resolved methods
    ///
    /// Returns `default` if the VM is missing, the thread cannot be
    /// attached, resolution fails or the managed call throws.
    fn call<R>(
        &self,
        op: &str,
        default: R,
        f: impl FnOnce(&JavaMethods, &mut JNIEnv) -> Result<R>,
    ) -> R {
        call_or_default(
            java_vm(),
            op,
            default,
            |env| {
                let methods = JavaMethods::get(env, &self.package)?;
                f(methods, env)
            },
            clear_exception,
        )
    }
}

impl SpeechBackend for AndroidBackend {
    fn name(&self) -> &'static str {
        "Android TextToSpeech"
    }

    fn speak(&mut self, text: &str, interrupt: bool) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        debug!("Speaking: {}", text);
        self.call("speak", (), |methods, env| methods.speak(env, text, interrupt));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        debug!("Stopping speech");
        self.call("stop", (), |methods, env| methods.stop(env));
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.call("isReady", false, |methods, env| methods.is_ready(env))
    }

    fn is_accessibility_enabled(&self) -> bool {
        self.call("isScreenReaderEnabled", false, |methods, env| {
            methods.is_screen_reader_enabled(env)
        })
    }

    fn handle_gesture(&mut self, event: TouchEvent) -> Gesture {
        self.call("handleGesture", Gesture::None, |methods, env| {
            methods.handle_gesture(env, event)
        })
    }
}
