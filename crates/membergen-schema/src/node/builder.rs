use crate::{
    WAS_SET_SUFFIX,
    node::{ClassDescriptor, ClassId, ClassKind, ClassModifiers, ConstructorParam, DefaultValue, SourceLoc},
    types::TypeRef,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// MethodDecl
///
/// Member method as declared on the builder class by the user.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<TypeRef>,
    pub returns: TypeRef,

    #[serde(default)]
    pub location: SourceLoc,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, params: Vec<TypeRef>, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
            location: SourceLoc::UNKNOWN,
        }
    }

    #[must_use]
    pub const fn at(mut self, location: SourceLoc) -> Self {
        self.location = location;
        self
    }
}

///
/// BuilderClass
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BuilderClass {
    pub id: ClassId,

    #[serde(default)]
    pub kind: ClassKind,

    #[serde(default)]
    pub modifiers: ClassModifiers,

    #[serde(default)]
    pub methods: Vec<MethodDecl>,

    #[serde(default)]
    pub location: SourceLoc,
}

impl BuilderClass {
    pub fn new(id: impl Into<ClassId>) -> Self {
        Self {
            id: id.into(),
            kind: ClassKind::Class,
            modifiers: ClassModifiers::default(),
            methods: Vec::new(),
            location: SourceLoc::UNKNOWN,
        }
    }

    /// Builder nested in `target` with a setter per constructor parameter and
    /// a `build` method, i.e. the shape a user is expected to declare.
    #[must_use]
    pub fn conventional(target: &ClassDescriptor) -> Self {
        let mut builder = Self::new(target.id.nested("Builder"));
        let self_ty = builder.self_type();
        for param in target.constructor_params() {
            builder = builder.with_method(MethodDecl::new(
                &param.name,
                vec![param.ty.clone()],
                self_ty.clone(),
            ));
        }

        builder.with_method(MethodDecl::new(
            crate::BUILD_METHOD_NAME,
            vec![],
            target.self_type(),
        ))
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: ClassModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub const fn at(mut self, location: SourceLoc) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }

    #[must_use]
    pub fn self_type(&self) -> TypeRef {
        TypeRef::of_class(&self.id)
    }
}

///
/// ValueSource
///
/// How `build` turns a slot into the constructor argument.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum ValueSource {
    /// Non-nullable without a default; an empty slot fails the build.
    Required,

    /// Nullable without a default, or defaulting to the null literal. The
    /// slot value is passed through as is.
    Shadow,

    /// Non-nullable with a default; an empty slot means "use the default".
    ShadowOrDefault,

    /// Nullable with a non-null default; the was-set flag decides.
    FlagOrDefault,
}

impl ValueSource {
    #[must_use]
    pub fn of(param: &ConstructorParam) -> Self {
        match (&param.default, param.ty.nullable) {
            (None, false) => Self::Required,
            (None, true) | (Some(DefaultValue::Null), _) => Self::Shadow,
            (Some(_), false) => Self::ShadowOrDefault,
            (Some(_), true) => Self::FlagOrDefault,
        }
    }
}

///
/// BuilderSlot
///
/// Private builder-owned state for one constructor parameter.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BuilderSlot {
    pub param: ConstructorParam,
    pub source: ValueSource,

    /// Shadow property; named after the parameter, always nullable.
    pub value_slot: String,
    pub value_ty: TypeRef,

    /// Boolean was-set flag, only for nullable params with a non-null default.
    pub was_set_slot: Option<String>,
}

impl BuilderSlot {
    #[must_use]
    pub fn new(param: &ConstructorParam) -> Self {
        let source = ValueSource::of(param);
        let was_set_slot =
            (source == ValueSource::FlagOrDefault).then(|| format!("{}{WAS_SET_SUFFIX}", param.name));

        Self {
            param: param.clone(),
            source,
            value_slot: param.name.clone(),
            value_ty: param.ty.to_nullable(),
            was_set_slot,
        }
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.source == ValueSource::Required
    }
}

///
/// BuilderDescriptor
///
/// Slots for every constructor parameter of the target, in declaration order.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BuilderDescriptor {
    pub target: ClassId,
    pub builder: ClassId,
    pub slots: Vec<BuilderSlot>,
}

impl BuilderDescriptor {
    #[must_use]
    pub fn from_constructor(target: ClassId, builder: ClassId, params: &[ConstructorParam]) -> Self {
        Self {
            target,
            builder,
            slots: params.iter().map(BuilderSlot::new).collect(),
        }
    }

    /// Descriptor for a class with a nested builder; `None` without one.
    #[must_use]
    pub fn from_class(class: &ClassDescriptor) -> Option<Self> {
        let builder = class.builder.as_ref()?;

        Some(Self::from_constructor(
            class.id.clone(),
            builder.id.clone(),
            class.constructor_params(),
        ))
    }

    #[must_use]
    pub fn slot(&self, param: &str) -> Option<&BuilderSlot> {
        self.slots.iter().find(|s| s.param.name == param)
    }

    pub fn required(&self) -> impl Iterator<Item = &BuilderSlot> {
        self.slots.iter().filter(|s| s.is_required())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Literal;

    fn params() -> Vec<ConstructorParam> {
        vec![
            ConstructorParam::new("name", TypeRef::string()),
            ConstructorParam::new("age", TypeRef::nullable("Int")).with_default(Literal::Int(10)),
            ConstructorParam::new("email", TypeRef::nullable("String")).with_default(DefaultValue::Null),
            ConstructorParam::new("nick", TypeRef::nullable("String")),
            ConstructorParam::new("score", TypeRef::int()).with_default(Literal::Int(0)),
        ]
    }

    #[test]
    fn value_sources_follow_nullability_and_default() {
        let sources: Vec<_> = params().iter().map(ValueSource::of).collect();
        assert_eq!(
            sources,
            [
                ValueSource::Required,
                ValueSource::FlagOrDefault,
                ValueSource::Shadow,
                ValueSource::Shadow,
                ValueSource::ShadowOrDefault,
            ]
        );
    }

    #[test]
    fn was_set_flag_only_for_nullable_non_null_default() {
        let desc = BuilderDescriptor::from_constructor("a.P".into(), "a.P.Builder".into(), &params());

        let flags: Vec<_> = desc
            .slots
            .iter()
            .filter_map(|s| s.was_set_slot.as_deref())
            .collect();
        assert_eq!(flags, ["ageSet"]);

        let name = desc.slot("name").unwrap();
        assert!(name.is_required());
        assert!(name.value_ty.nullable);
        assert_eq!(desc.required().count(), 1);
    }

    #[test]
    fn conventional_builder_has_setters_and_build() {
        let class = ClassDescriptor::new("a.P", ClassKind::Class).with_constructor(params());
        let builder = BuilderClass::conventional(&class);

        assert_eq!(builder.id.as_str(), "a.P.Builder");
        assert_eq!(builder.methods.len(), 6);
        let build = builder.method("build").unwrap();
        assert!(build.params.is_empty());
        assert_eq!(build.returns, class.self_type());
    }
}
