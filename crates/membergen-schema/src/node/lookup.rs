use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// ObjectMethod
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ObjectMethod {
    #[display("equals")]
    Equals,
    #[display("hashCode")]
    HashCode,
    #[display("toString")]
    ToString,
}

///
/// FoundMethod
///
/// Nearest user declaration of an object method, as seen from the class.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FoundMethod {
    /// Declared by the class itself rather than inherited.
    pub declared_in_class: bool,
    pub is_final: bool,
}

impl FoundMethod {
    /// Whether the declaration leaves nothing to synthesize.
    #[must_use]
    pub const fn blocks_synthesis(self) -> bool {
        self.declared_in_class || self.is_final
    }
}

///
/// MethodLookup
///
/// Host capability: resolves object-method declarations along the class
/// hierarchy so the engine never walks a symbol table itself. Synthesized
/// members must not be reported.
///

pub trait MethodLookup: fmt::Debug + Send + Sync {
    fn find(&self, method: ObjectMethod) -> Option<FoundMethod>;
}

///
/// MethodTable
///
/// Map-backed lookup for hosts that resolve the hierarchy up front.
///

#[derive(Clone, Debug, Default)]
pub struct MethodTable(BTreeMap<ObjectMethod, FoundMethod>);

impl MethodTable {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn declared(self, method: ObjectMethod) -> Self {
        self.with(method, FoundMethod {
            declared_in_class: true,
            is_final: false,
        })
    }

    #[must_use]
    pub fn inherited_final(self, method: ObjectMethod) -> Self {
        self.with(method, FoundMethod {
            declared_in_class: false,
            is_final: true,
        })
    }

    #[must_use]
    pub fn inherited_open(self, method: ObjectMethod) -> Self {
        self.with(method, FoundMethod::default())
    }

    #[must_use]
    pub fn with(mut self, method: ObjectMethod, found: FoundMethod) -> Self {
        self.0.insert(method, found);
        self
    }
}

impl MethodLookup for MethodTable {
    fn find(&self, method: ObjectMethod) -> Option<FoundMethod> {
        self.0.get(&method).copied()
    }
}
