//! Class metadata model, annotation configuration, diagnostics, and the
//! structural checks that gate member synthesis.
//!
//! Everything here is produced fresh per class from host metadata and is
//! read-only once validation has run.

pub mod error;
pub mod inclusion;
pub mod node;
pub mod types;
pub mod validate;

/// Name of the builder method that constructs the target instance.
pub const BUILD_METHOD_NAME: &str = "build";

/// Suffix appended to a parameter name to form its was-set flag slot.
pub const WAS_SET_SUFFIX: &str = "Set";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::{Diagnostic, DiagnosticCode, Diagnostics, Severity},
        node::*,
        report,
        types::{Family, TypeRef},
    };
    pub use serde::{Deserialize, Serialize};
}
