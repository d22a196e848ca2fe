//! Adapter implementations for repository resolution ports.

pub mod memory;
