mod annotation;
mod builder;
mod class;
mod constructor;
mod lookup;
mod property;

pub use annotation::*;
pub use builder::*;
pub use class::*;
pub use constructor::*;
pub use lookup::*;
pub use property::*;

use derive_more::From;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// SourceLoc
///
/// Opaque host handle for a declaration. The engine only copies it onto
/// diagnostics; zero means the host supplied no location.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, From, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct SourceLoc(u64);

impl SourceLoc {
    pub const UNKNOWN: Self = Self(0);

    #[must_use]
    pub const fn new(handle: u64) -> Self {
        Self(handle)
    }

    #[must_use]
    pub const fn handle(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            write!(f, "<unknown>")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}
