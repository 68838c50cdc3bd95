use crate::resolve::Resolution;
use dashmap::{DashMap, mapref::entry::Entry};
use membergen_schema::{
    inclusion::InclusionPolicy,
    node::{ClassDescriptor, ClassId, PropertyDescriptor},
    types::Family,
};
use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicUsize, Ordering},
};

///
/// CacheStats
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub size: usize,

    /// Entries dropped because the class changed under the same id.
    pub stale: usize,
}

///
/// Slot
///
/// A compute-once cell plus the inputs it was computed from.
///

#[derive(Debug)]
struct Slot {
    policy: InclusionPolicy,
    properties: Vec<PropertyDescriptor>,
    resolution: OnceLock<Arc<Resolution>>,
}

impl Slot {
    fn new(policy: InclusionPolicy, properties: &[PropertyDescriptor]) -> Self {
        Self {
            policy,
            properties: properties.to_vec(),
            resolution: OnceLock::new(),
        }
    }

    fn matches(&self, policy: &InclusionPolicy, properties: &[PropertyDescriptor]) -> bool {
        self.policy == *policy && self.properties == properties
    }
}

///
/// ResolutionCache
///
/// Compute-once cells keyed by (class, family). A cell only answers for
/// the exact policy and property list it was computed from; anything else
/// replaces it. The shard lock is only held while the cell is fetched,
/// resolution itself runs under the cell.
///

#[derive(Debug, Default)]
pub struct ResolutionCache {
    slots: DashMap<(ClassId, Family), Arc<Slot>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    stale: AtomicUsize,
}

impl ResolutionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &self,
        class: &ClassDescriptor,
        policy: &InclusionPolicy,
        compute: impl FnOnce() -> Resolution,
    ) -> Arc<Resolution> {
        let family = policy.family;
        let slot = self.slot(class, policy);

        let mut computed = false;
        let resolution = slot
            .resolution
            .get_or_init(|| {
                computed = true;
                Arc::new(compute())
            })
            .clone();

        // stats are best-effort only
        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
            log::debug!(
                "resolved {family} for '{}': {} properties",
                class.id,
                resolution.properties.len()
            );
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("resolution cache hit for {family} on '{}'", class.id);
        }

        resolution
    }

    // slot
    // the live slot for these inputs, replacing one computed from others
    fn slot(&self, class: &ClassDescriptor, policy: &InclusionPolicy) -> Arc<Slot> {
        let key = (class.id.clone(), policy.family);

        match self.slots.entry(key) {
            Entry::Occupied(entry) if entry.get().matches(policy, &class.properties) => {
                entry.get().clone()
            }
            Entry::Occupied(mut entry) => {
                self.stale.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "dropping stale {} resolution for '{}'",
                    policy.family,
                    class.id
                );

                let slot = Arc::new(Slot::new(*policy, &class.properties));
                entry.insert(slot.clone());
                slot
            }
            Entry::Vacant(entry) => {
                let slot = Arc::new(Slot::new(*policy, &class.properties));
                entry.insert(slot.clone());
                slot
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.slots.len(),
            stale: self.stale.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        self.slots.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.stale.store(0, Ordering::Relaxed);
    }
}
