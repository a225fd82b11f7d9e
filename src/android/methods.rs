//! Cached handles to the app's managed accessibility methods

use super::bridge::MethodCache;
use crate::gesture::{Gesture, TouchEvent};
use crate::{Result, ScreenReaderError};
use jni::objects::{GlobalRef, JClass, JStaticMethodID, JValue};
use jni::signature::{Primitive, ReturnType};
use jni::JNIEnv;
use log::{debug, warn};

/// Class and method names the managed side must provide
pub const ACCESSIBILITY_MANAGER: &str = "AccessibilityManager";
pub const TEXT_TO_SPEECH: &str = "AndroidTextToSpeech";
pub const GESTURE_DETECTOR: &str = "GestureDetector";

const IS_SCREEN_READER_ENABLED: (&str, &str) = ("isScreenReaderEnabled", "()Z");
const SPEAK: (&str, &str) = ("speak", "(Ljava/lang/String;Z)V");
const STOP: (&str, &str) = ("stop", "()V");
const IS_READY: (&str, &str) = ("isReady", "()Z");
const HANDLE_GESTURE: (&str, &str) = ("handleGesture", "(IFFJ)I");

static METHODS: MethodCache<JavaMethods> = MethodCache::new();

/// Method IDs plus global class references keeping them valid
pub(crate) struct JavaMethods {
    accessibility_manager: GlobalRef,
    is_screen_reader_enabled: JStaticMethodID,
    text_to_speech: GlobalRef,
    speak: JStaticMethodID,
    stop: JStaticMethodID,
    is_ready: JStaticMethodID,
    gesture_detector: GlobalRef,
    handle_gesture: JStaticMethodID,
}

impl JavaMethods {
    /// Resolve the handles once per process
    ///
    /// The package of the first successful resolution wins.
    pub fn get(env: &mut JNIEnv, package: &str) -> Result<&'static JavaMethods> {
        METHODS.get_or_resolve(|| {
            let resolved = Self::resolve(env, package);
            if resolved.is_err() {
                clear_exception(env);
            }
            resolved
        })
    }

    fn resolve(env: &mut JNIEnv, package: &str) -> Result<Self> {
        debug!("Resolving accessibility methods in {}", package);

        let (accessibility_manager, is_screen_reader_enabled) =
            static_method(env, package, ACCESSIBILITY_MANAGER, IS_SCREEN_READER_ENABLED)?;
        let (text_to_speech, speak) = static_method(env, package, TEXT_TO_SPEECH, SPEAK)?;
        let (_, stop) = static_method(env, package, TEXT_TO_SPEECH, STOP)?;
        let (_, is_ready) = static_method(env, package, TEXT_TO_SPEECH, IS_READY)?;
        let (gesture_detector, handle_gesture) =
            static_method(env, package, GESTURE_DETECTOR, HANDLE_GESTURE)?;

        Ok(Self {
            accessibility_manager,
            is_screen_reader_enabled,
            text_to_speech,
            speak,
            stop,
            is_ready,
            gesture_detector,
            handle_gesture,
        })
    }

    pub fn is_screen_reader_enabled(&self, env: &mut JNIEnv) -> Result<bool> {
        let class: &JClass = self.accessibility_manager.as_obj().into();
        let value = unsafe {
            env.call_static_method_unchecked(
                class,
                self.is_screen_reader_enabled,
                ReturnType::Primitive(Primitive::Boolean),
                &[],
            )
        }?;
        Ok(value.z()?)
    }

    pub fn speak(&self, env: &mut JNIEnv, text: &str, force: bool) -> Result<()> {
        let class: &JClass = self.text_to_speech.as_obj().into();
        let java_text = env.new_string(text)?;
        let result = unsafe {
            env.call_static_method_unchecked(
                class,
                self.speak,
                ReturnType::Primitive(Primitive::Void),
                &[
                    JValue::Object(&java_text).as_jni(),
                    JValue::Bool(u8::from(force)).as_jni(),
                ],
            )
        };
        env.delete_local_ref(java_text)?;
        result?.v()?;
        Ok(())
    }

    pub fn stop(&self, env: &mut JNIEnv) -> Result<()> {
        let class: &JClass = self.text_to_speech.as_obj().into();
        unsafe {
            env.call_static_method_unchecked(
                class,
                self.stop,
                ReturnType::Primitive(Primitive::Void),
                &[],
            )
        }?
        .v()?;
        Ok(())
    }

    pub fn is_ready(&self, env: &mut JNIEnv) -> Result<bool> {
        let class: &JClass = self.text_to_speech.as_obj().into();
        let value = unsafe {
            env.call_static_method_unchecked(
                class,
                self.is_ready,
                ReturnType::Primitive(Primitive::Boolean),
                &[],
            )
        }?;
        Ok(value.z()?)
    }

    pub fn handle_gesture(&self, env: &mut JNIEnv, event: TouchEvent) -> Result<Gesture> {
        let class: &JClass = self.gesture_detector.as_obj().into();
        let value = unsafe {
            env.call_static_method_unchecked(
                class,
                self.handle_gesture,
                ReturnType::Primitive(Primitive::Int),
                &[
                    JValue::Int(event.action).as_jni(),
                    JValue::Float(event.x).as_jni(),
                    JValue::Float(event.y).as_jni(),
                    JValue::Long(event.time_ms).as_jni(),
                ],
            )
        }?;
        Ok(Gesture::from_code(value.i()?))
    }
}

/// Look up `class_name` in `package` and one static method on it
fn static_method(
    env: &mut JNIEnv,
    package: &str,
    class_name: &str,
    (name, sig): (&str, &str),
) -> Result<(GlobalRef, JStaticMethodID)> {
    let path = format!("{}/{}", package, class_name);
    let class = env
        .find_class(path.as_str())
        .map_err(|e| ScreenReaderError::Jni(format!("Class {} not found: {}", path, e)))?;

    let method = env.get_static_method_id(&class, name, sig).map_err(|e| {
        ScreenReaderError::Jni(format!("Method {}.{}{} not found: {}", path, name, sig, e))
    });
    let global = method.and_then(|method| Ok((env.new_global_ref(&class)?, method)));

    env.delete_local_ref(class)?;
    global
}

/// Clear a pending Java exception so the next JNI call is legal
pub(crate) fn clear_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        warn!("Clearing pending Java exception");
        if let Err(e) = env.exception_clear() {
            warn!("Failed to clear Java exception: {}", e);
        }
    }
}
