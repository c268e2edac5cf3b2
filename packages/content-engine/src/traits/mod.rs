//! Collaborator contracts consumed by the engine.
//!
//! Applications implement these to connect the engine to list storage,
//! file upload and machine translation.

pub mod assets;
pub mod repository;
pub mod site;
pub mod translator;
