use super::*;
use membergen_core::{engine::Engine, ir::SynthTarget};
use membergen_schema::node::{
    BuilderClass, BuilderDescriptor, ClassDescriptor, ClassKind, ConstructorParam, DefaultValue,
    EqualsAndHashCodeConfig, Literal, PropertyDescriptor, PropertyMarks, ToStringConfig,
};
use membergen_schema::types::TypeRef;

fn person() -> ClassDescriptor {
    buildable(
        ClassDescriptor::new("demo.Person", ClassKind::Class).with_constructor(vec![
            ConstructorParam::new("name", TypeRef::string()),
            ConstructorParam::new("age", TypeRef::nullable("Int")).with_default(Literal::Int(10)),
            ConstructorParam::new("email", TypeRef::nullable("String"))
                .with_default(DefaultValue::Null),
        ]),
    )
}

fn buildable(class: ClassDescriptor) -> ClassDescriptor {
    let class = class
        .with_equals_and_hash_code(EqualsAndHashCodeConfig::default())
        .with_to_string(ToStringConfig::default())
        .buildable();
    let builder = BuilderClass::conventional(&class);

    class.with_builder(builder)
}

fn render(class: &ClassDescriptor, target: &SynthTarget) -> Result<TokenStream, RenderError> {
    let method = Engine::default().synthesize(target, class).unwrap();

    render_method(&method, &RenderOptions::default())
}

// token text with all whitespace removed
fn squash(tokens: &TokenStream) -> String {
    tokens.to_string().split_whitespace().collect()
}

#[test]
fn equals_renders_as_a_fn_item() {
    let tokens = render(&person(), &SynthTarget::Equals).unwrap();
    let item: syn::ItemFn = syn::parse2(tokens.clone()).unwrap();

    assert_eq!(item.sig.ident.to_string(), "equals");
    assert_eq!(item.sig.inputs.len(), 3);

    let text = squash(&tokens);
    assert!(text.contains("__this.same_ref(&other)"));
    assert!(text.contains("__rt.is_instance(&other,&::membergen::runtime::ClassId::from(\"demo.Person\"))"));
    assert!(text.contains("__rt.equals(&(__this.field(\"name\")?)"));
}

#[test]
fn hash_code_accumulates_in_a_mutable_local() {
    let tokens = render(&person(), &SynthTarget::HashCode).unwrap();
    let item: syn::ItemFn = syn::parse2(tokens.clone()).unwrap();

    assert_eq!(item.sig.ident.to_string(), "hash_code");
    assert_eq!(item.sig.inputs.len(), 2);

    let text = squash(&tokens);
    assert!(text.contains("letmutresult=::membergen::runtime::Value::Int(17i32);"));
    assert!(text.contains("wrapping_mul"));
    assert!(text.contains("::core::result::Result::Ok(::core::clone::Clone::clone(&result))"));
}

#[test]
fn to_string_is_a_single_format_call() {
    let tokens = render(&person(), &SynthTarget::ToString).unwrap();
    syn::parse2::<syn::ItemFn>(tokens.clone()).unwrap();

    let text = tokens.to_string();
    assert_eq!(text.matches("format !").count(), 1);
    assert!(text.contains("\"Person(name={}, age={}, email={})\""));
}

#[test]
fn to_string_escapes_braces_in_labels() {
    let class = ClassDescriptor::new("demo.Braces", ClassKind::Class)
        .with_property(
            PropertyDescriptor::new("x", TypeRef::int())
                .with_to_string(PropertyMarks::include_as("{x}")),
        )
        .with_to_string(ToStringConfig::default());

    let tokens = render(&class, &SynthTarget::ToString).unwrap();
    assert!(tokens.to_string().contains("\"Braces({{x}}={})\""));
}

#[test]
fn empty_to_string_has_no_arguments() {
    let class = ClassDescriptor::new("demo.Empty", ClassKind::Object)
        .with_to_string(ToStringConfig::default());

    let tokens = render(&class, &SynthTarget::ToString).unwrap();
    assert!(squash(&tokens).contains("::std::format!(\"Empty()\")"));
}

#[test]
fn build_checks_required_slots_then_constructs() {
    let tokens = render(&person(), &SynthTarget::BuilderBuild).unwrap();
    let item: syn::ItemFn = syn::parse2(tokens.clone()).unwrap();
    assert_eq!(item.sig.ident.to_string(), "build");

    let text = squash(&tokens);
    assert!(text.contains("MissingArgument{param:::std::string::String::from(\"name\"),}"));
    assert!(text.contains("::membergen::runtime::Value::Int(10i32)"));
    assert!(text.contains("::membergen::runtime::Value::object(\"demo.Person\""));
}

#[test]
fn setter_keeps_the_builder_chainable() {
    let tokens = render(&person(), &SynthTarget::BuilderSetter("age".into())).unwrap();
    let item: syn::ItemFn = syn::parse2(tokens.clone()).unwrap();
    assert_eq!(item.sig.inputs.len(), 3);

    let text = squash(&tokens);
    assert!(text.contains("__this.set_field(\"age\",::core::clone::Clone::clone(&age))?;"));
    assert!(text.contains("__this.set_field(\"ageSet\",::membergen::runtime::Value::Bool(true))?;"));
    assert!(text.contains("::core::result::Result::Ok(::core::clone::Clone::clone(__this))"));
}

#[test]
fn keyword_names_render_raw() {
    let class = buildable(
        ClassDescriptor::new("demo.Token", ClassKind::Class)
            .with_constructor(vec![ConstructorParam::new("type", TypeRef::string())]),
    );

    let tokens = render(&class, &SynthTarget::BuilderSetter("type".into())).unwrap();
    let item: syn::ItemFn = syn::parse2(tokens).unwrap();
    assert_eq!(item.sig.ident.to_string(), "r#type");
}

#[test]
fn malformed_names_are_errors() {
    let class = buildable(
        ClassDescriptor::new("demo.Odd", ClassKind::Class)
            .with_constructor(vec![ConstructorParam::new("1st", TypeRef::string())]),
    );

    let err = render(&class, &SynthTarget::BuilderSetter("1st".into())).unwrap_err();
    assert!(matches!(err, RenderError::InvalidIdent(_)), "{err}");
}

#[test]
fn host_default_expressions_are_parsed() {
    let class = |expr: &str| {
        buildable(ClassDescriptor::new("demo.Dflt", ClassKind::Class).with_constructor(vec![
            ConstructorParam::new("n", TypeRef::int()).with_default(DefaultValue::Expr(expr.into())),
        ]))
    };

    let tokens = render(&class("40 + 2"), &SynthTarget::BuilderBuild).unwrap();
    assert!(squash(&tokens).contains("::membergen::runtime::Value::from(40+2)"));

    let err = render(&class("40 +"), &SynthTarget::BuilderBuild).unwrap_err();
    assert!(matches!(err, RenderError::InvalidDefault { ref param, .. } if param == "n"));
}

#[test]
fn body_without_trailing_return_is_an_error() {
    let mut method = Engine::default()
        .synthesize(&SynthTarget::HashCode, &person())
        .unwrap();
    method.body.stmts.pop();

    let err = render_method(&method, &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, RenderError::MissingReturn { ref method } if method == "hashCode"));
}

#[test]
fn builder_slots_start_empty() {
    let desc = Engine::default().builder_state(&person()).unwrap();
    let tokens = render_builder_slots(&desc, &RenderOptions::default()).unwrap();
    let item: syn::ItemFn = syn::parse2(tokens.clone()).unwrap();
    assert_eq!(item.sig.ident.to_string(), "new_builder");

    let text = squash(&tokens);
    assert!(text.contains("(\"name\",::membergen::runtime::Value::Null)"));
    assert!(text.contains("(\"ageSet\",::membergen::runtime::Value::Bool(false))"));
    assert!(!text.contains("nameSet"));
}

#[test]
fn class_renders_as_a_module_with_a_builder_submodule() {
    let synthesis = Engine::default().synthesize_class(&person());
    let tokens = render_class(&synthesis, &RenderOptions::default()).unwrap();
    let module: syn::ItemMod = syn::parse2(tokens).unwrap();
    assert_eq!(module.ident.to_string(), "person");

    let (_, items) = module.content.unwrap();
    let names: Vec<_> = items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Fn(f) => Some(f.sig.ident.to_string()),
            syn::Item::Mod(m) => Some(m.ident.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["equals", "hash_code", "to_string", "builder"]);
}

#[test]
fn names_that_snake_case_alike_collide() {
    let class = buildable(ClassDescriptor::new("demo.Twins", ClassKind::Class).with_constructor(
        vec![
            ConstructorParam::new("fooBar", TypeRef::string()),
            ConstructorParam::new("foo_bar", TypeRef::string()),
        ],
    ));
    let synthesis = Engine::default().synthesize_class(&class);
    assert!(!synthesis.diagnostics.has_errors(), "{}", synthesis.diagnostics);

    let err = render_class(&synthesis, &RenderOptions::default()).unwrap_err();
    let RenderError::IdentCollision { ident, first, second } = err else {
        panic!("expected a collision");
    };
    assert_eq!(ident, "foo_bar");
    let mut sources = [first, second];
    sources.sort();
    assert_eq!(sources, ["fooBar", "foo_bar"]);
}

#[test]
fn setter_named_like_the_slot_constructor_collides() {
    let class = buildable(
        ClassDescriptor::new("demo.Odd", ClassKind::Class)
            .with_constructor(vec![ConstructorParam::new("newBuilder", TypeRef::string())]),
    );
    let synthesis = Engine::default().synthesize_class(&class);

    let err = render_class(&synthesis, &RenderOptions::default()).unwrap_err();
    assert!(
        matches!(err, RenderError::IdentCollision { ref ident, .. } if ident == "new_builder"),
        "{err}"
    );
}

#[test]
fn was_set_flag_clashing_with_a_slot_is_an_error() {
    let desc = BuilderDescriptor::from_constructor(
        "demo.Flag".into(),
        "demo.Flag.Builder".into(),
        &[
            ConstructorParam::new("age", TypeRef::nullable("Int")).with_default(Literal::Int(10)),
            ConstructorParam::new("ageSet", TypeRef::string()),
        ],
    );

    let err = render_builder_slots(&desc, &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, RenderError::DuplicateSlot(ref name) if name == "ageSet"), "{err}");
}

#[test]
fn runtime_path_is_configurable() {
    let options = RenderOptions::with_runtime("crate::rt").unwrap();
    let method = Engine::default()
        .synthesize(&SynthTarget::HashCode, &person())
        .unwrap();
    let tokens = render_method(&method, &options).unwrap();

    let text = squash(&tokens);
    assert!(text.contains("__rt:&crate::rt::Runtime"));
    assert!(!text.contains("membergen"));

    assert!(matches!(
        RenderOptions::with_runtime("not a path"),
        Err(RenderError::InvalidRuntimePath { .. })
    ));
}
