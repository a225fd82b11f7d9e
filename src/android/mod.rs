//! Bridge between native code and the Android app's managed classes

pub mod bridge;
pub mod thread;

#[cfg(target_os = "android")]
pub(crate) mod methods;

#[cfg(target_os = "android")]
mod vm;

#[cfg(target_os = "android")]
mod exports;

#[cfg(target_os = "android")]
pub use vm::register_java_vm;
#[cfg(target_os = "android")]
pub(crate) use vm::java_vm;

pub use bridge::{call_or_default, MethodCache};
pub use thread::{with_env, JavaThreads, ScopedEnv};
