//! Collaborator implementations shipped with the engine.

pub mod memory;

pub use memory::{BackendCall, MemoryBackend};
