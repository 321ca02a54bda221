//! # tethr Common
//!
//! Shared data model and pure logic for the host addition workflow:
//! address parsing, subnet reachability, well-known port flags, and the
//! outcome taxonomy surfaced to users.

pub mod config;
pub mod network;
pub mod outcome;
pub mod probing;
pub mod registry;
