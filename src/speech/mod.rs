//! Speech output system

pub mod backend;
pub mod backends;
pub mod memory;

pub use backend::{create_backend, SpeechBackend};
pub use memory::SpokenText;
