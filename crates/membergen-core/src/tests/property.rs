use crate::{
    HASH_SEED,
    engine::Engine,
    ir::SynthTarget,
    resolve::InclusionResolver,
    runtime::Value,
    tests::install,
};
use membergen_schema::{
    node::{ClassDescriptor, ClassKind, EqualsAndHashCodeConfig, PropertyDescriptor, PropertyMarks, Storage},
    types::{Family, TypeRef},
};
use proptest::prelude::*;
use std::ops::Range;

const CLASS: &str = "prop.Sample";
const BASE: &str = "prop.Base";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mark {
    None,
    Include,
    Exclude,
    Both,
}

#[derive(Clone, Debug)]
struct PropSpec {
    storage: Storage,
    text: bool,
    mark: Mark,
}

impl PropSpec {
    fn marks(&self) -> PropertyMarks {
        match self.mark {
            Mark::None => PropertyMarks::default(),
            Mark::Include => PropertyMarks::include(),
            Mark::Exclude => PropertyMarks::exclude(),
            Mark::Both => PropertyMarks::include().and_exclude(),
        }
    }
}

fn arb_storage() -> impl Strategy<Value = Storage> {
    prop_oneof![
        Just(Storage::BackedField),
        Just(Storage::DeferredInit),
        Just(Storage::GetterOnly),
    ]
}

fn arb_mark() -> impl Strategy<Value = Mark> {
    prop_oneof![
        Just(Mark::None),
        Just(Mark::Include),
        Just(Mark::Exclude),
        Just(Mark::Both),
    ]
}

// getter-only properties never carry a lone include; that is a rejected shape
fn arb_spec() -> impl Strategy<Value = PropSpec> {
    (arb_storage(), any::<bool>(), arb_mark()).prop_map(|(storage, text, mark)| {
        let mark = if storage == Storage::GetterOnly && mark == Mark::Include {
            Mark::None
        } else {
            mark
        };

        PropSpec { storage, text, mark }
    })
}

fn arb_config() -> impl Strategy<Value = EqualsAndHashCodeConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(only, sup, deferred, fields)| EqualsAndHashCodeConfig {
            only_explicitly_included: only,
            call_super: sup,
            use_fields_not_accessors: fields,
            include_deferred_init: deferred,
        },
    )
}

// small domains so equal instances show up often
fn arb_value(spec: &PropSpec) -> BoxedStrategy<Option<Value>> {
    let base = if spec.text {
        prop_oneof![Just(Value::Null), Just(Value::text("a")), Just(Value::text("b"))].boxed()
    } else {
        (0..3i32).prop_map(Value::Int).boxed()
    };

    if spec.storage == Storage::DeferredInit {
        prop::option::of(base).boxed()
    } else {
        base.prop_map(Some).boxed()
    }
}

fn arb_instances(
    size: Range<usize>,
) -> impl Strategy<Value = (Vec<PropSpec>, Vec<Option<Value>>, Vec<Option<Value>>)> {
    prop::collection::vec(arb_spec(), size).prop_flat_map(|specs| {
        let a: Vec<_> = specs.iter().map(arb_value).collect();
        let b: Vec<_> = specs.iter().map(arb_value).collect();

        (Just(specs), a, b)
    })
}

// sample class; chains to `BASE` when the config calls super
fn class(specs: &[PropSpec], config: EqualsAndHashCodeConfig) -> ClassDescriptor {
    let class = ClassDescriptor::new(CLASS, ClassKind::Class).with_equals_and_hash_code(config);
    let class = if config.call_super {
        class.with_superclass(BASE)
    } else {
        class
    };

    with_properties(class, 'p', specs)
}

fn base(specs: &[PropSpec]) -> ClassDescriptor {
    let class = ClassDescriptor::new(BASE, ClassKind::Class)
        .with_equals_and_hash_code(EqualsAndHashCodeConfig::default());

    with_properties(class, 'b', specs)
}

fn with_properties(mut class: ClassDescriptor, prefix: char, specs: &[PropSpec]) -> ClassDescriptor {
    for (i, spec) in specs.iter().enumerate() {
        let ty = if spec.text {
            TypeRef::nullable("String")
        } else {
            TypeRef::int()
        };
        let prop = PropertyDescriptor {
            storage: spec.storage,
            ..PropertyDescriptor::new(format!("{prefix}{i}"), ty)
        };
        class = class.with_property(prop.with_equality(spec.marks()));
    }

    class
}

// set fields only; a `None` deferred value stays uninitialized
fn fields(prefix: char, values: &[Option<Value>]) -> Vec<(String, Value)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.clone().map(|v| (format!("{prefix}{i}"), v)))
        .collect()
}

fn instance(values: &[Option<Value>], base_values: &[Option<Value>]) -> Value {
    let mut all = fields('p', values);
    all.extend(fields('b', base_values));

    Value::object(CLASS, all)
}

proptest! {
    #[test]
    fn equality_is_reflexive_symmetric_and_hash_consistent(
        (specs, a_vals, b_vals) in arb_instances(0..6),
        config in arb_config(),
    ) {
        let class = class(&specs, config);
        let rt = install(&[&base(&[]), &class]);
        let a = instance(&a_vals, &[]);
        let b = instance(&b_vals, &[]);
        let a_copy = instance(&a_vals, &[]);

        prop_assert!(rt.equals(&a, &a).unwrap());
        prop_assert!(rt.equals(&a, &a_copy).unwrap());
        prop_assert_eq!(rt.hash_code(&a).unwrap(), rt.hash_code(&a_copy).unwrap());

        let ab = rt.equals(&a, &b).unwrap();
        prop_assert_eq!(ab, rt.equals(&b, &a).unwrap());
        if ab {
            prop_assert_eq!(rt.hash_code(&a).unwrap(), rt.hash_code(&b).unwrap());
        }
        prop_assert!(!rt.equals(&a, &Value::Null).unwrap());
    }

    #[test]
    fn super_chained_equality_is_symmetric_and_hash_consistent(
        (specs, a_vals, b_vals) in arb_instances(0..4),
        (base_specs, a_base, b_base) in arb_instances(0..3),
        config in arb_config(),
    ) {
        let class = class(&specs, config);
        let rt = install(&[&base(&base_specs), &class]);
        let a = instance(&a_vals, &a_base);
        let b = instance(&b_vals, &b_base);
        let a_copy = instance(&a_vals, &a_base);

        prop_assert!(rt.equals(&a, &a_copy).unwrap());
        prop_assert_eq!(rt.hash_code(&a).unwrap(), rt.hash_code(&a_copy).unwrap());

        let ab = rt.equals(&a, &b).unwrap();
        prop_assert_eq!(ab, rt.equals(&b, &a).unwrap());
        if ab {
            prop_assert_eq!(rt.hash_code(&a).unwrap(), rt.hash_code(&b).unwrap());
        }

        // with super chaining, equal children imply equal base state
        if ab && config.call_super {
            let a_only = Value::object(BASE, fields('b', &a_base));
            let b_only = Value::object(BASE, fields('b', &b_base));
            prop_assert!(rt.equals(&a_only, &b_only).unwrap());
        }
    }

    #[test]
    fn exclude_wins_regardless_of_position(
        specs in prop::collection::vec(arb_spec(), 0..6),
        config in arb_config(),
    ) {
        let class = class(&specs, config);
        let resolution = InclusionResolver::new()
            .resolve(&class, Family::EqualsAndHashCode)
            .unwrap();

        for (i, spec) in specs.iter().enumerate() {
            let name = format!("p{i}");
            let included = resolution.names().contains(&name.as_str());
            if matches!(spec.mark, Mark::Exclude | Mark::Both) {
                prop_assert!(!included, "{} should be excluded", name);
            }
            if spec.mark == Mark::Include {
                prop_assert!(included, "{} should be included", name);
            }
        }
    }

    #[test]
    fn only_explicit_without_includes_ignores_every_property(
        (specs, a_vals, b_vals) in arb_instances(0..6),
        deferred in any::<bool>(),
    ) {
        let specs: Vec<_> = specs
            .into_iter()
            .map(|s| PropSpec {
                mark: if s.mark == Mark::Include { Mark::None } else { s.mark },
                ..s
            })
            .collect();
        let config = EqualsAndHashCodeConfig {
            only_explicitly_included: true,
            include_deferred_init: deferred,
            ..Default::default()
        };
        let class = class(&specs, config);
        let rt = install(&[&class]);
        let a = instance(&a_vals, &[]);
        let b = instance(&b_vals, &[]);

        prop_assert!(rt.equals(&a, &b).unwrap());
        prop_assert_eq!(rt.hash_code(&a).unwrap(), HASH_SEED);
        prop_assert_eq!(rt.hash_code(&b).unwrap(), HASH_SEED);
    }

    #[test]
    fn synthesis_is_structurally_stable(
        specs in prop::collection::vec(arb_spec(), 0..6),
        config in arb_config(),
    ) {
        let class = class(&specs, config);
        let engine = Engine::default();

        for target in [SynthTarget::Equals, SynthTarget::HashCode] {
            let first = engine.synthesize(&target, &class).unwrap();
            let second = engine.synthesize(&target, &class).unwrap();
            prop_assert_eq!(&first, &second);

            // a cold cache yields the same body
            let fresh = Engine::default().synthesize(&target, &class).unwrap();
            prop_assert_eq!(&first, &fresh);
        }
    }
}
