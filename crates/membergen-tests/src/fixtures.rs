//! Class descriptors shared by the build script and the tests.

use membergen::prelude::*;

/// Constructor-declared class with a builder: one required param, one
/// nullable param with a non-null default, one nullable param defaulting
/// to null.
#[must_use]
pub fn person() -> ClassDescriptor {
    let class = ClassDescriptor::new("demo.Person", ClassKind::Class)
        .with_constructor(vec![
            ConstructorParam::new("name", TypeRef::string()),
            ConstructorParam::new("age", TypeRef::nullable("Int")).with_default(Literal::Int(10)),
            ConstructorParam::new("email", TypeRef::nullable("String"))
                .with_default(DefaultValue::Null),
        ])
        .with_equals_and_hash_code(EqualsAndHashCodeConfig::default())
        .with_to_string(ToStringConfig::default())
        .buildable();
    let builder = BuilderClass::conventional(&class);

    class.with_builder(builder)
}

/// Body-declared class with a deferred-init property in both families, a
/// relabelled property and one excluded from everything.
#[must_use]
pub fn session() -> ClassDescriptor {
    ClassDescriptor::new("demo.Session", ClassKind::Class)
        .with_property(PropertyDescriptor::new("id", TypeRef::int()))
        .with_property(
            PropertyDescriptor::deferred("token", TypeRef::string())
                .with_equality(PropertyMarks::include()),
        )
        .with_property(
            PropertyDescriptor::new("user", TypeRef::string())
                .with_to_string(PropertyMarks::include_as("who")),
        )
        .with_property(
            PropertyDescriptor::new("secret", TypeRef::string())
                .with_equality(PropertyMarks::exclude())
                .with_to_string(PropertyMarks::exclude()),
        )
        .with_equals_and_hash_code(EqualsAndHashCodeConfig::default())
        .with_to_string(ToStringConfig::default())
}

/// Every fixture, in render order.
#[must_use]
pub fn all() -> Vec<ClassDescriptor> {
    vec![person(), session()]
}
