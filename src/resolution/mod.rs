//! Repository resolution for batch changes.
//!
//! Turns the ordered `on` directives of a batch spec into a deduplicated set
//! of repository revisions, excluding repositories that live on unsupported
//! code hosts or that opt out with an ignore marker. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
