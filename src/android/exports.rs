//! Native methods callable from the app's managed code
//!
//! `NativeScreenReader` on the managed side declares:
//!
//! ```kotlin
//! external fun speakText(text: String, force: Boolean)
//! external fun stopSpeech()
//! ```
//!
//! JNI binds these by symbol name, so the class must live in
//! `org.diasurgical.devilutionx` whatever `[android] package` says. That
//! setting only moves the classes this crate calls into.

use jni::objects::{JClass, JString};
use jni::sys::{jboolean, JNI_TRUE};
use jni::JNIEnv;
use log::warn;

/// `NativeScreenReader.speakText(String, boolean)`
#[no_mangle]
pub extern "system" fn Java_org_diasurgical_devilutionx_NativeScreenReader_speakText(
    mut env: JNIEnv,
    _class: JClass,
    text: JString,
    force: jboolean,
) {
    if text.is_null() {
        return;
    }

    let text: String = match env.get_string(&text) {
        Ok(text) => text.into(),
        Err(e) => {
            warn!("Failed to read text from managed code: {}", e);
            return;
        }
    };

    crate::speak_text(&text, force == JNI_TRUE);
}

/// `NativeScreenReader.stopSpeech()`
#[no_mangle]
pub extern "system" fn Java_org_diasurgical_devilutionx_NativeScreenReader_stopSpeech(
    _env: JNIEnv,
    _class: JClass,
) {
    crate::stop_speech();
}
