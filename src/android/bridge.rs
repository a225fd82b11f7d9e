//! Best-effort calls into managed code
//!
//! Every step (VM lookup, thread attach, method resolution, the call
//! itself) may fail. Each failure is logged and the caller gets its default.

use super::thread::{with_env, JavaThreads};
use crate::Result;
use log::{debug, warn};
use once_cell::sync::OnceCell;

/// Method handles resolved once per process
///
/// A failed resolution is not remembered, so a later call retries it.
pub struct MethodCache<M> {
    cell: OnceCell<M>,
}

impl<M> MethodCache<M> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Cached handles, resolving them with `resolve` on first success
    pub fn get_or_resolve(&self, resolve: impl FnOnce() -> Result<M>) -> Result<&M> {
        self.cell.get_or_try_init(resolve)
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<M> Default for MethodCache<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Call into managed code on an attached thread, or answer `default`
///
/// `recover` runs after a failed `f` while the thread is still attached,
/// so a pending Java exception can be cleared before the next JNI call.
pub fn call_or_default<'vm, T, R>(
    vm: Option<&'vm T>,
    op: &str,
    default: R,
    f: impl FnOnce(&mut T::Env<'vm>) -> Result<R>,
    recover: impl FnOnce(&mut T::Env<'vm>),
) -> R
where
    T: JavaThreads + ?Sized + 'vm,
{
    let Some(vm) = vm else {
        debug!("{}: no Java VM registered", op);
        return default;
    };

    let result = with_env(vm, |env| match f(env) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} failed: {}", op, e);
            recover(env);
            None
        }
    });

    result.flatten().unwrap_or(default)
}
