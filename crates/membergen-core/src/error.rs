use crate::{config::ConfigError, ir::SynthTarget, runtime::RuntimeError};
use membergen_schema::{error::Diagnostics, types::Family};
use thiserror::Error as ThisError;

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Synth(#[from] SynthError),
}

///
/// SynthError
///
/// Why a synthesis request produced no method body.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SynthError {
    #[error("{family} is not requested on '{class}'")]
    NotRequested { class: String, family: Family },

    #[error("{family} synthesis refused for '{class}':\n{diagnostics}")]
    Rejected {
        class: String,
        family: Family,
        diagnostics: Diagnostics,
    },

    #[error("{family} synthesis skipped for '{class}'")]
    Skipped {
        class: String,
        family: Family,
        diagnostics: Diagnostics,
    },

    #[error("'{target}' is not a member that can be synthesized for '{class}'")]
    UnknownTarget { class: String, target: SynthTarget },
}

impl SynthError {
    /// Diagnostics behind the refusal, empty for request errors.
    #[must_use]
    pub fn diagnostics(&self) -> &[membergen_schema::error::Diagnostic] {
        match self {
            Self::Rejected { diagnostics, .. } | Self::Skipped { diagnostics, .. } => {
                diagnostics.as_slice()
            }
            Self::NotRequested { .. } | Self::UnknownTarget { .. } => &[],
        }
    }
}
