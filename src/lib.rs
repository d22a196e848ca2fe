//! Batch targets: repository resolution for batch changes.
//!
//! This crate turns the declarative `on` section of a batch spec (explicit
//! repositories, repositories on a branch, or search queries) into the
//! concrete set of repository revisions a batch change runs on.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure resolution values with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces to the repository store, git
//!   servers and search backend
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`resolution`]: Directive walking, deduplication and classification

pub mod resolution;
