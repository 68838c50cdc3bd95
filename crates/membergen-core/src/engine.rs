//! Host-facing entry points.

use crate::{
    config::EngineConfig,
    error::SynthError,
    ir::{SynthTarget, SynthesizedMethod},
    resolve::{CacheStats, InclusionResolver},
    synth::{BuildGen, EqualsGen, HashCodeGen, MethodGen, SetterGen, ToStringGen},
};
use membergen_schema::{
    error::{Diagnostics, Severity},
    node::{BuilderDescriptor, ClassDescriptor, ClassId},
    types::Family,
    validate::{FamilyReport, ValidationPolicy, Verdict, check_family, validate_class},
};
use std::collections::BTreeSet;

///
/// ClassSynthesis
///
/// Everything produced for one class in a single pass.
///

#[derive(Clone, Debug)]
pub struct ClassSynthesis {
    pub class: ClassId,
    pub superclass: Option<ClassId>,
    pub methods: Vec<SynthesizedMethod>,

    /// Shadow slots to declare on the builder, when the builder family is valid.
    pub builder: Option<BuilderDescriptor>,
    pub diagnostics: Diagnostics,
}

impl ClassSynthesis {
    #[must_use]
    pub fn method(&self, target: &SynthTarget) -> Option<&SynthesizedMethod> {
        self.methods.iter().find(|m| &m.target == target)
    }
}

///
/// Engine
///

#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    resolver: InclusionResolver,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            resolver: InclusionResolver::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    const fn policy(&self) -> ValidationPolicy {
        self.config.validation_policy()
    }

    /// Diagnostics for every family, in fixed family order.
    #[must_use]
    pub fn validate(&self, class: &ClassDescriptor) -> Diagnostics {
        let diags = validate_class(class, self.policy());
        log_diagnostics(class, &diags);

        diags
    }

    /// Members that will be synthesized for the class.
    #[must_use]
    pub fn names_to_synthesize(&self, class: &ClassDescriptor) -> BTreeSet<SynthTarget> {
        Family::ALL
            .into_iter()
            .filter(|&family| check_family(class, family, self.policy()).is_ready())
            .flat_map(|family| targets_of(class, family))
            .collect()
    }

    /// Synthesize one member, validating its family first.
    pub fn synthesize(
        &self,
        target: &SynthTarget,
        class: &ClassDescriptor,
    ) -> Result<SynthesizedMethod, SynthError> {
        let family = target.family();
        let report = check_family(class, family, self.policy());
        ensure_ready(class, report)?;

        self.generate(target, class)
    }

    /// Builder slots for a class whose builder family is valid.
    pub fn builder_state(&self, class: &ClassDescriptor) -> Result<BuilderDescriptor, SynthError> {
        let report = check_family(class, Family::Buildable, self.policy());
        ensure_ready(class, report)?;

        BuilderDescriptor::from_class(class).ok_or_else(|| not_requested(class, Family::Buildable))
    }

    /// Validate the class and synthesize every member whose family is ready.
    #[must_use]
    pub fn synthesize_class(&self, class: &ClassDescriptor) -> ClassSynthesis {
        let mut synthesis = ClassSynthesis {
            class: class.id.clone(),
            superclass: class.superclass.clone(),
            methods: Vec::new(),
            builder: None,
            diagnostics: Diagnostics::new(),
        };

        for family in Family::ALL {
            let report = check_family(class, family, self.policy());
            let ready = report.is_ready();
            if report.verdict == Verdict::Skipped {
                log::info!("skipping {family} for '{}'", class.id);
            }
            synthesis.diagnostics.append(report.diagnostics);

            if !ready {
                continue;
            }
            for target in targets_of(class, family) {
                match self.generate(&target, class) {
                    Ok(method) => synthesis.methods.push(method),
                    Err(err) => log::warn!("{err}"),
                }
            }
            if family == Family::Buildable {
                synthesis.builder = BuilderDescriptor::from_class(class);
            }
        }

        log_diagnostics(class, &synthesis.diagnostics);
        synthesis
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.resolver.stats()
    }

    /// Drop memoized resolutions. Rebuilt descriptors are detected without
    /// this; it only releases memory.
    pub fn clear_cache(&self) {
        self.resolver.clear();
    }

    // generate
    // assumes the target's family has been validated
    fn generate(
        &self,
        target: &SynthTarget,
        class: &ClassDescriptor,
    ) -> Result<SynthesizedMethod, SynthError> {
        let annotations = &class.annotations;

        let method = match target {
            SynthTarget::Equals | SynthTarget::HashCode => {
                let config = annotations
                    .equals_and_hash_code
                    .ok_or_else(|| not_requested(class, Family::EqualsAndHashCode))?;
                let resolution = self
                    .resolver
                    .resolve(class, Family::EqualsAndHashCode)
                    .ok_or_else(|| not_requested(class, Family::EqualsAndHashCode))?;

                if *target == SynthTarget::Equals {
                    EqualsGen {
                        class,
                        config,
                        resolution: &resolution,
                    }
                    .generate()
                } else {
                    HashCodeGen {
                        class,
                        config,
                        resolution: &resolution,
                    }
                    .generate()
                }
            }
            SynthTarget::ToString => {
                let config = annotations
                    .to_string
                    .ok_or_else(|| not_requested(class, Family::ToString))?;
                let resolution = self
                    .resolver
                    .resolve(class, Family::ToString)
                    .ok_or_else(|| not_requested(class, Family::ToString))?;

                ToStringGen {
                    class,
                    config,
                    resolution: &resolution,
                }
                .generate()
            }
            SynthTarget::BuilderSetter(param) => {
                let builder = BuilderDescriptor::from_class(class)
                    .ok_or_else(|| not_requested(class, Family::Buildable))?;
                let slot = builder.slot(param).ok_or_else(|| SynthError::UnknownTarget {
                    class: class.id.to_string(),
                    target: target.clone(),
                })?;

                SetterGen {
                    builder: &builder,
                    slot,
                }
                .generate()
            }
            SynthTarget::BuilderBuild => {
                let builder = BuilderDescriptor::from_class(class)
                    .ok_or_else(|| not_requested(class, Family::Buildable))?;

                BuildGen { builder: &builder }.generate()
            }
        };

        log::debug!("synthesized {target} for '{}'", class.id);
        Ok(method)
    }
}

// targets_of
// members of one family in emission order
fn targets_of(class: &ClassDescriptor, family: Family) -> Vec<SynthTarget> {
    match family {
        Family::EqualsAndHashCode => vec![SynthTarget::Equals, SynthTarget::HashCode],
        Family::ToString => vec![SynthTarget::ToString],
        Family::Buildable => class
            .constructor_params()
            .iter()
            .map(|p| SynthTarget::BuilderSetter(p.name.clone()))
            .chain([SynthTarget::BuilderBuild])
            .collect(),
    }
}

fn ensure_ready(class: &ClassDescriptor, report: FamilyReport) -> Result<(), SynthError> {
    let FamilyReport {
        family,
        verdict,
        diagnostics,
    } = report;
    let name = class.id.to_string();

    match verdict {
        Verdict::Ready => Ok(()),
        Verdict::NotRequested => Err(not_requested(class, family)),
        Verdict::Skipped => {
            log::info!("skipping {family} for '{name}'");

            Err(SynthError::Skipped {
                class: name,
                family,
                diagnostics,
            })
        }
        Verdict::Rejected => Err(SynthError::Rejected {
            class: name,
            family,
            diagnostics,
        }),
    }
}

fn not_requested(class: &ClassDescriptor, family: Family) -> SynthError {
    SynthError::NotRequested {
        class: class.id.to_string(),
        family,
    }
}

fn log_diagnostics(class: &ClassDescriptor, diags: &Diagnostics) {
    for diag in diags.with_severity(Severity::Warning) {
        log::warn!("{}: {diag}", class.id);
    }
}

///
/// TESTS
///
