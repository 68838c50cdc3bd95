use serde::{Deserialize, Serialize};

///
/// EqualsAndHashCodeConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EqualsAndHashCodeConfig {
    pub only_explicitly_included: bool,
    pub call_super: bool,
    pub use_fields_not_accessors: bool,

    /// Lift the default exclusion of deferred-init properties.
    pub include_deferred_init: bool,
}

///
/// ToStringConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToStringConfig {
    pub only_explicitly_included: bool,
    pub call_super: bool,
    pub use_fields_not_accessors: bool,
}

///
/// ClassAnnotations
///
/// Class-level annotation state; an absent config means the family was not
/// requested on the class.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassAnnotations {
    pub equals_and_hash_code: Option<EqualsAndHashCodeConfig>,
    pub to_string: Option<ToStringConfig>,
    pub buildable: bool,
}
