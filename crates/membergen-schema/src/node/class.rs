use crate::{
    node::{
        BuilderClass, ClassAnnotations, ConstructorParam, EqualsAndHashCodeConfig, MethodLookup,
        MethodTable, PropertyDescriptor, PropertyOrigin, SourceLoc, ToStringConfig,
    },
    types::TypeRef,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

///
/// ClassId
///

#[derive(
    Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, used as the type name in string output.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Identity of a class nested directly inside this one.
    #[must_use]
    pub fn nested(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }
}

impl From<&str> for ClassId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ClassId {
    fn from(path: String) -> Self {
        Self(path)
    }
}

///
/// ClassKind
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ClassKind {
    #[default]
    Class,
    DataClass,
    Object,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    AnonymousObject,
}

impl ClassKind {
    /// Plain classes, including the data-class flavour.
    #[must_use]
    pub const fn is_regular_class(self) -> bool {
        matches!(self, Self::Class | Self::DataClass)
    }
}

///
/// ClassModifiers
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClassModifiers {
    pub local: bool,
    pub inner: bool,
    pub value: bool,
}

impl ClassModifiers {
    #[must_use]
    pub const fn is_plain(self) -> bool {
        !self.local && !self.inner && !self.value
    }
}

///
/// ClassDescriptor
///
/// Shape of one class as presented by the host. Built once per class and
/// never mutated after validation.
///

#[derive(Clone, Debug)]
pub struct ClassDescriptor {
    pub id: ClassId,
    pub kind: ClassKind,
    pub modifiers: ClassModifiers,

    /// Explicitly declared superclass, if any.
    pub superclass: Option<ClassId>,

    /// Declared properties in source order.
    pub properties: Vec<PropertyDescriptor>,

    /// Primary constructor parameters, `None` when there is no primary
    /// constructor at all.
    pub constructor: Option<Vec<ConstructorParam>>,

    /// Host capability answering whether object methods are declared here
    /// or final on an ancestor.
    pub methods: Arc<dyn MethodLookup>,

    pub annotations: ClassAnnotations,

    /// Nested class carrying the builder mark.
    pub builder: Option<BuilderClass>,

    pub location: SourceLoc,
}

impl ClassDescriptor {
    pub fn new(id: impl Into<ClassId>, kind: ClassKind) -> Self {
        Self {
            id: id.into(),
            kind,
            modifiers: ClassModifiers::default(),
            superclass: None,
            properties: Vec::new(),
            constructor: None,
            methods: Arc::new(MethodTable::new()),
            annotations: ClassAnnotations::default(),
            builder: None,
            location: SourceLoc::UNKNOWN,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: ClassModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_superclass(mut self, superclass: impl Into<ClassId>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Declare the primary constructor. Each parameter becomes a
    /// constructor-origin property; one already declared under that name
    /// keeps its storage and marks but is re-tagged and moved into
    /// parameter order.
    #[must_use]
    pub fn with_constructor(mut self, params: Vec<ConstructorParam>) -> Self {
        let mut ctor_props = Vec::new();
        for param in &params {
            let declared = self.properties.iter().position(|p| p.name == param.name);
            let property = match declared {
                Some(index) => PropertyDescriptor {
                    origin: PropertyOrigin::Constructor,
                    ..self.properties.remove(index)
                },
                None => PropertyDescriptor::constructor(&param.name, param.ty.clone())
                    .at(param.location),
            };
            ctor_props.push(property);
        }

        // constructor properties precede body properties in source order
        ctor_props.append(&mut self.properties);
        self.properties = ctor_props;
        self.constructor = Some(params);
        self
    }

    #[must_use]
    pub fn with_methods(mut self, methods: impl MethodLookup + 'static) -> Self {
        self.methods = Arc::new(methods);
        self
    }

    #[must_use]
    pub const fn with_equals_and_hash_code(mut self, config: EqualsAndHashCodeConfig) -> Self {
        self.annotations.equals_and_hash_code = Some(config);
        self
    }

    #[must_use]
    pub const fn with_to_string(mut self, config: ToStringConfig) -> Self {
        self.annotations.to_string = Some(config);
        self
    }

    #[must_use]
    pub const fn buildable(mut self) -> Self {
        self.annotations.buildable = true;
        self
    }

    #[must_use]
    pub fn with_builder(mut self, builder: BuilderClass) -> Self {
        self.builder = Some(builder);
        self
    }

    #[must_use]
    pub const fn at(mut self, location: SourceLoc) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn short_name(&self) -> &str {
        self.id.short_name()
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Constructor parameters, empty when there is no primary constructor.
    #[must_use]
    pub fn constructor_params(&self) -> &[ConstructorParam] {
        self.constructor.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn self_type(&self) -> TypeRef {
        TypeRef::of_class(&self.id)
    }
}
