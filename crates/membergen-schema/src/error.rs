use crate::node::SourceLoc;
use derive_more::{Deref, Display, IntoIterator};
use serde::Serialize;
use std::fmt;

///
/// Severity
///
/// Errors refuse synthesis for the family, warnings are advisory, and info
/// notes record a precondition skip.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Severity {
    #[display("info")]
    Info,
    #[display("warning")]
    Warning,
    #[display("error")]
    Error,
}

///
/// DiagnosticCode
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum DiagnosticCode {
    AnnotatedDataClassBodyProperty,
    BuildableInvalidPrimaryConstructor,
    BuildableMissingBuilder,
    BuilderInvalidLocation,
    BuilderInvalidMethodSignature,
    BuilderMissingMethod,
    BuilderUnrecognizedMethod,
    CallSuperWithoutSuperclass,
    IncludeOnIneligibleProperty,
    MethodAlreadyDeclared,
    MethodNotOverridable,
    UnsupportedClassType,
}

///
/// Diagnostic
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    pub location: SourceLoc,
}

impl Diagnostic {
    pub fn new(
        code: DiagnosticCode,
        severity: Severity,
        location: SourceLoc,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            location,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] at {}: {}",
            self.severity, self.code, self.location, self.message
        )
    }
}

///
/// Diagnostics
///
/// Ordered collection of everything reported for one class. Order follows
/// the check order, so two runs over the same class compare equal.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
pub struct Diagnostics(#[into_iterator(owned, ref)] Vec<Diagnostic>);

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn append(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.severity == severity)
    }

    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.code == code)
    }

    #[must_use]
    pub fn contains_code(&self, code: DiagnosticCode) -> bool {
        self.with_code(code).next().is_some()
    }

    /// Ok when nothing of error severity was reported.
    pub fn result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// report
/// push a formatted diagnostic onto a collection
///

#[macro_export]
macro_rules! report {
    ($diags:expr, $severity:ident, $code:ident, $loc:expr, $($arg:tt)*) => {
        $diags.push($crate::error::Diagnostic::new(
            $crate::error::DiagnosticCode::$code,
            $crate::error::Severity::$severity,
            $loc,
            format!($($arg)*),
        ))
    };
}

///
/// TESTS
///
