//! df-resolver: turns a classified junction into fittings.
//!
//! `preview` packages the result for ghost rendering; `commit` runs the same
//! pipeline and hands back requests for the entity store, or a typed error.
//! Neither retains anything between calls.

pub mod checks;
pub mod error;
pub mod memo;
pub mod preview;
pub mod resolver;

pub use checks::{check_geometry, check_service_rules};
pub use error::{ResolutionError, ResolutionResult};
pub use memo::PreviewMemo;
pub use preview::{FailureType, FittingPreview, GhostColor, PreviewFitting};
pub use resolver::{FittingResolver, Resolution};
