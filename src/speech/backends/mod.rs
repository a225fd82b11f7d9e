//! Platform-specific speech backends

// Tolk / Speech Dispatcher / AVFoundation through the tts crate
#[cfg(not(target_os = "android"))]
pub mod native;

// Android TextToSpeech and TalkBack through the app's managed classes
#[cfg(target_os = "android")]
pub mod android;
