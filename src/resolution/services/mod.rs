//! Application services for repository resolution.

mod config;
mod dedup;
mod error;
mod ignore;
mod outcome;
mod query;
mod resolver;

pub use config::{DEFAULT_IGNORE_MARKER_PATH, ResolverConfig};
pub use dedup::RevisionSet;
pub use error::{
    DirectiveError, DirectiveResult, IgnoreCheckError, IgnoreCheckErrors, ResolutionError,
    ResolutionResult,
};
pub use ignore::{MarkerCheck, check_ignore_markers, has_ignore_marker};
pub use outcome::build_resolution;
pub use query::{augment_query, with_default_count, with_default_select};
pub use resolver::RepositoryResolutionService;
