//! Thread attachment bookkeeping for calls into the Java VM
//!
//! Native code may call in from any thread. A thread that is already
//! attached (the UI thread, a Java-created thread) must stay attached after
//! the call; a thread attached only for this call must be detached again.

use log::{debug, warn};
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};

/// The attach/detach surface of a Java VM
pub trait JavaThreads {
    /// Per-thread environment handle
    type Env<'vm>
    where
        Self: 'vm;

    /// Environment of the current thread if it is already attached
    fn current_env(&self) -> Option<Self::Env<'_>>;

    /// Attach the current thread, returning its environment
    fn attach(&self) -> Option<Self::Env<'_>>;

    /// Detach the current thread
    ///
    /// # Safety
    ///
    /// No environment handle obtained on this thread may be used afterwards.
    unsafe fn detach(&self);
}

/// Environment borrowed for one call, detached on drop if we attached it
pub struct ScopedEnv<'vm, T: JavaThreads + ?Sized + 'vm> {
    vm: &'vm T,
    env: ManuallyDrop<T::Env<'vm>>,
    attached_here: bool,
}

impl<'vm, T: JavaThreads + ?Sized + 'vm> ScopedEnv<'vm, T> {
    /// Obtain an environment for the current thread, attaching it if needed
    ///
    /// Returns None if the thread is not attached and attaching fails.
    pub fn acquire(vm: &'vm T) -> Option<Self> {
        if let Some(env) = vm.current_env() {
            return Some(Self {
                vm,
                env: ManuallyDrop::new(env),
                attached_here: false,
            });
        }

        match vm.attach() {
            Some(env) => {
                debug!("Attached current thread to the Java VM");
                Some(Self {
                    vm,
                    env: ManuallyDrop::new(env),
                    attached_here: true,
                })
            }
            None => {
                warn!("Failed to attach current thread to the Java VM");
                None
            }
        }
    }

    /// Did this scope attach the thread?
    pub fn attached_here(&self) -> bool {
        self.attached_here
    }
}

impl<'vm, T: JavaThreads + ?Sized + 'vm> Deref for ScopedEnv<'vm, T> {
    type Target = T::Env<'vm>;

    fn deref(&self) -> &Self::Target {
        &self.env
    }
}

impl<'vm, T: JavaThreads + ?Sized + 'vm> DerefMut for ScopedEnv<'vm, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.env
    }
}

impl<'vm, T: JavaThreads + ?Sized + 'vm> Drop for ScopedEnv<'vm, T> {
    fn drop(&mut self) {
        // The handle must be gone before the thread detaches
        unsafe { ManuallyDrop::drop(&mut self.env) };
        if self.attached_here {
            debug!("Detaching current thread from the Java VM");
            unsafe { self.vm.detach() };
        }
    }
}

/// Run `f` with an environment for the current thread
///
/// Returns None when no environment could be obtained. The attach state of
/// the thread is the same before and after the call.
pub fn with_env<'vm, T, R, F>(vm: &'vm T, f: F) -> Option<R>
where
    T: JavaThreads + ?Sized + 'vm,
    F: FnOnce(&mut T::Env<'vm>) -> R,
{
    let mut scope = ScopedEnv::acquire(vm)?;
    Some(f(&mut scope))
}
