//! # tethr Core
//!
//! Orchestration for manual host addition: the serialized worker, the
//! failure diagnosis pipeline, and built-in adapters for the registry
//! and probe boundaries.

pub mod diagnosis;
pub mod nettest;
pub mod probe;
pub mod registry;
pub mod resolve;
pub mod worker;
