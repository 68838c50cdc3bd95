//! Structural checks run before any member is synthesized.
//!
//! Each family is checked on its own; a failure in one family never blocks
//! another.

pub mod buildable;
pub mod equality;
pub mod to_string;

use crate::{
    error::{DiagnosticCode, Diagnostics},
    node::{ClassDescriptor, FoundMethod, ObjectMethod},
    types::Family,
};
use derive_more::Display;

///
/// ValidationPolicy
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ValidationPolicy {
    /// Report unrecognized builder members as errors instead of warnings.
    pub strict_builder_members: bool,
}

impl ValidationPolicy {
    pub const LENIENT: Self = Self {
        strict_builder_members: false,
    };
    pub const STRICT: Self = Self {
        strict_builder_members: true,
    };
}

///
/// Verdict
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Verdict {
    /// The class does not carry the family annotation.
    NotRequested,

    /// A precondition leaves nothing to synthesize; not an error.
    Skipped,

    /// At least one error was reported.
    Rejected,

    Ready,
}

///
/// FamilyReport
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FamilyReport {
    pub family: Family,
    pub verdict: Verdict,
    pub diagnostics: Diagnostics,
}

impl FamilyReport {
    #[must_use]
    pub const fn not_requested(family: Family) -> Self {
        Self {
            family,
            verdict: Verdict::NotRequested,
            diagnostics: Diagnostics::new(),
        }
    }

    // conclude
    // derive the verdict from what has been reported so far
    pub(crate) fn conclude(family: Family, diagnostics: Diagnostics) -> Self {
        let verdict = if diagnostics.has_errors() {
            Verdict::Rejected
        } else {
            Verdict::Ready
        };

        Self {
            family,
            verdict,
            diagnostics,
        }
    }

    pub(crate) const fn skipped(family: Family, diagnostics: Diagnostics) -> Self {
        Self {
            family,
            verdict: Verdict::Skipped,
            diagnostics,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.verdict == Verdict::Ready
    }
}

/// Check one family of the class.
#[must_use]
pub fn check_family(
    class: &ClassDescriptor,
    family: Family,
    policy: ValidationPolicy,
) -> FamilyReport {
    match family {
        Family::EqualsAndHashCode => equality::check(class),
        Family::ToString => to_string::check(class),
        Family::Buildable => buildable::check(class, policy),
    }
}

/// Check every family in fixed order and collect all diagnostics.
#[must_use]
pub fn validate_class(class: &ClassDescriptor, policy: ValidationPolicy) -> Diagnostics {
    let mut diags = Diagnostics::new();
    for family in Family::ALL {
        diags.append(check_family(class, family, policy).diagnostics);
    }

    diags
}

// blocking_method
// first of the given object methods whose user declaration rules out synthesis
fn blocking_method(
    class: &ClassDescriptor,
    methods: &[ObjectMethod],
) -> Option<(ObjectMethod, FoundMethod, DiagnosticCode)> {
    methods.iter().find_map(|&method| {
        let found = class.methods.find(method)?;
        let code = if found.declared_in_class {
            DiagnosticCode::MethodAlreadyDeclared
        } else if found.is_final {
            DiagnosticCode::MethodNotOverridable
        } else {
            return None;
        };

        Some((method, found, code))
    })
}

fn skip_message(class: &ClassDescriptor, method: ObjectMethod, found: FoundMethod) -> String {
    if found.declared_in_class {
        format!(
            "'{method}' is already declared in '{}'; nothing is generated",
            class.short_name()
        )
    } else {
        format!(
            "'{method}' is final in a superclass of '{}'; nothing is generated",
            class.short_name()
        )
    }
}
