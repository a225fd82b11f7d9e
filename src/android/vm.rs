//! Process-wide Java VM handle

use super::thread::JavaThreads;
use jni::sys::{jint, JNI_ERR, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::ffi::c_void;

static JAVA_VM: OnceCell<JavaVM> = OnceCell::new();

/// Register the VM for later calls into managed code
///
/// Hosts that define their own `JNI_OnLoad` call this instead of relying on
/// ours. Returns false if a VM was already registered.
pub fn register_java_vm(vm: JavaVM) -> bool {
    let registered = JAVA_VM.set(vm).is_ok();
    if registered {
        info!("Java VM registered");
    } else {
        warn!("Java VM already registered, ignoring");
    }
    registered
}

/// The registered VM, if any
pub(crate) fn java_vm() -> Option<&'static JavaVM> {
    JAVA_VM.get()
}

impl JavaThreads for JavaVM {
    type Env<'vm> = JNIEnv<'vm>;

    fn current_env(&self) -> Option<JNIEnv<'_>> {
        self.get_env().ok()
    }

    fn attach(&self) -> Option<JNIEnv<'_>> {
        self.attach_current_thread_permanently()
            .map_err(|e| warn!("AttachCurrentThread failed: {}", e))
            .ok()
    }

    unsafe fn detach(&self) {
        self.detach_current_thread();
    }
}

/// Called by the runtime when the library is loaded
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "system" fn JNI_OnLoad(vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    match unsafe { JavaVM::from_raw(vm) } {
        Ok(vm) => {
            register_java_vm(vm);
            JNI_VERSION_1_6
        }
        Err(e) => {
            warn!("JNI_OnLoad received an invalid VM: {}", e);
            JNI_ERR
        }
    }
}
