//! Per-family property inclusion, memoized per class and its inclusion inputs.

mod cache;

pub use cache::{CacheStats, ResolutionCache};

use membergen_schema::{
    error::Diagnostics,
    inclusion::{Decision, InclusionPolicy},
    node::{ClassDescriptor, PropertyDescriptor},
    types::Family,
};
use std::sync::Arc;

///
/// ResolvedProperty
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedProperty {
    pub property: PropertyDescriptor,

    /// Output name; differs from the property name only for a custom
    /// string label.
    pub label: String,
}

///
/// Resolution
///
/// Participating properties of one family, in declaration order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    pub family: Family,
    pub properties: Vec<ResolvedProperty>,

    /// Include marks the rules refused; non-empty means the family is invalid.
    pub rejected: Diagnostics,
}

impl Resolution {
    /// Apply the inclusion rules to every property of the class.
    #[must_use]
    pub fn compute(class: &ClassDescriptor, policy: &InclusionPolicy) -> Self {
        let mut properties = Vec::new();
        let mut rejected = Diagnostics::new();

        for property in &class.properties {
            match policy.decide(property) {
                Decision::Included { label } => properties.push(ResolvedProperty {
                    property: property.clone(),
                    label,
                }),
                Decision::Excluded => {}
                Decision::Rejected(diag) => rejected.push(diag),
            }
        }

        Self {
            family: policy.family,
            properties,
            rejected,
        }
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .map(|p| p.property.name.as_str())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

///
/// InclusionResolver
///

#[derive(Debug, Default)]
pub struct InclusionResolver {
    cache: ResolutionCache,
}

impl InclusionResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolution for a requested family; `None` when the class does not
    /// carry the family annotation.
    #[must_use]
    pub fn resolve(&self, class: &ClassDescriptor, family: Family) -> Option<Arc<Resolution>> {
        let policy = InclusionPolicy::for_class(class, family)?;

        Some(
            self.cache
                .get_or_compute(class, &policy, || Resolution::compute(class, &policy)),
        )
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
