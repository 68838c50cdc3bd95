use crate::{
    error::{Diagnostic, DiagnosticCode, Severity},
    node::{ClassDescriptor, ClassKind, PropertyDescriptor, PropertyOrigin, Storage},
    types::Family,
};

///
/// Decision
///
/// Outcome of the inclusion rules for one property in one family.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Participates; `label` is the name used in string output.
    Included { label: String },
    Excluded,

    /// An explicit mark that cannot be honoured; reported as an error.
    Rejected(Diagnostic),
}

impl Decision {
    #[must_use]
    pub const fn is_included(&self) -> bool {
        matches!(self, Self::Included { .. })
    }
}

///
/// InclusionPolicy
///
/// Class-level inputs to the inclusion rules, captured once per family.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InclusionPolicy {
    pub family: Family,
    pub only_explicitly_included: bool,
    pub include_deferred_init: bool,

    /// Data classes derive equality from constructor params only.
    pub data_class: bool,
}

impl InclusionPolicy {
    /// Policy for a requested family; `None` when the class does not carry
    /// the family annotation or the family has no per-property inclusion.
    #[must_use]
    pub fn for_class(class: &ClassDescriptor, family: Family) -> Option<Self> {
        let data_class = class.kind == ClassKind::DataClass;

        match family {
            Family::EqualsAndHashCode => {
                let config = class.annotations.equals_and_hash_code?;

                Some(Self {
                    family,
                    only_explicitly_included: config.only_explicitly_included,
                    include_deferred_init: config.include_deferred_init,
                    data_class,
                })
            }
            Family::ToString => {
                let config = class.annotations.to_string?;

                Some(Self {
                    family,
                    only_explicitly_included: config.only_explicitly_included,
                    include_deferred_init: true,
                    data_class,
                })
            }
            Family::Buildable => None,
        }
    }

    #[must_use]
    pub fn decide(&self, property: &PropertyDescriptor) -> Decision {
        match self.family {
            Family::EqualsAndHashCode => self.decide_equality(property),
            Family::ToString => self.decide_to_string(property),
            Family::Buildable => Decision::Excluded,
        }
    }

    // decide_equality
    fn decide_equality(&self, property: &PropertyDescriptor) -> Decision {
        let marks = &property.equality;

        // exclude is checked first so a doubly-marked getter is not an error
        if marks.exclude {
            return Decision::Excluded;
        }

        if property.storage == Storage::GetterOnly {
            return if marks.is_explicitly_included() {
                Decision::Rejected(Diagnostic::new(
                    DiagnosticCode::IncludeOnIneligibleProperty,
                    Severity::Error,
                    property.location,
                    format!(
                        "property '{}' has no backing field and cannot be included in equals/hashCode",
                        property.name
                    ),
                ))
            } else {
                Decision::Excluded
            };
        }

        let body_of_data_class = self.data_class && property.origin == PropertyOrigin::Body;

        if let Some(include) = &marks.include {
            if body_of_data_class {
                return Decision::Rejected(Diagnostic::new(
                    DiagnosticCode::AnnotatedDataClassBodyProperty,
                    Severity::Error,
                    property.location,
                    format!(
                        "property '{}' is declared in the body of a data class and cannot be included in equals/hashCode",
                        property.name
                    ),
                ));
            }

            return included(property, include.output_name());
        }

        if body_of_data_class {
            return Decision::Excluded;
        }
        if property.is_deferred_init() && !self.include_deferred_init {
            return Decision::Excluded;
        }

        self.by_default(property)
    }

    // decide_to_string
    fn decide_to_string(&self, property: &PropertyDescriptor) -> Decision {
        let marks = &property.to_string;

        if marks.exclude {
            return Decision::Excluded;
        }
        if let Some(include) = &marks.include {
            return included(property, include.output_name());
        }
        if property.storage == Storage::GetterOnly {
            return Decision::Excluded;
        }

        self.by_default(property)
    }

    fn by_default(&self, property: &PropertyDescriptor) -> Decision {
        if self.only_explicitly_included {
            Decision::Excluded
        } else {
            included(property, None)
        }
    }
}

fn included(property: &PropertyDescriptor, label: Option<&str>) -> Decision {
    Decision::Included {
        label: label.unwrap_or(&property.name).to_string(),
    }
}

///
/// TESTS
///
