use membergen_schema::validate::ValidationPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub builder: BuilderConfig,
}

impl EngineConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(src)?;

        Ok(config)
    }

    #[must_use]
    pub const fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            strict_builder_members: matches!(self.builder.unrecognized_members, MemberPolicy::Strict),
        }
    }
}

///
/// BuilderConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub unrecognized_members: MemberPolicy,
}

///
/// MemberPolicy
///
/// Severity of builder members that are neither setters nor `build`.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberPolicy {
    #[default]
    Lenient,
    Strict,
}
