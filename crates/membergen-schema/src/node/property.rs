use crate::{
    node::SourceLoc,
    types::{Family, TypeRef},
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Storage
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum Storage {
    #[default]
    BackedField,

    /// Computed on every read; nothing to compare or hash by default.
    GetterOnly,

    /// Assigned once after construction; reading it early raises.
    DeferredInit,
}

impl Storage {
    #[must_use]
    pub const fn has_backing_field(self) -> bool {
        !matches!(self, Self::GetterOnly)
    }
}

///
/// PropertyOrigin
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum PropertyOrigin {
    Constructor,
    #[default]
    Body,
}

///
/// IncludeMark
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IncludeMark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IncludeMark {
    /// Custom output name; a blank name means "use the declared name".
    #[must_use]
    pub fn output_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

///
/// PropertyMarks
///
/// Include and exclude marks of one annotation family. Both may be present;
/// exclude always wins.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyMarks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<IncludeMark>,

    #[serde(default)]
    pub exclude: bool,
}

impl PropertyMarks {
    #[must_use]
    pub fn include() -> Self {
        Self {
            include: Some(IncludeMark::default()),
            exclude: false,
        }
    }

    pub fn include_as(name: impl Into<String>) -> Self {
        Self {
            include: Some(IncludeMark {
                name: Some(name.into()),
            }),
            exclude: false,
        }
    }

    #[must_use]
    pub const fn exclude() -> Self {
        Self {
            include: None,
            exclude: true,
        }
    }

    #[must_use]
    pub fn and_exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    #[must_use]
    pub const fn is_explicitly_included(&self) -> bool {
        self.include.is_some()
    }
}

///
/// PropertyDescriptor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: TypeRef,

    #[serde(default)]
    pub storage: Storage,

    #[serde(default)]
    pub origin: PropertyOrigin,

    #[serde(default)]
    pub equality: PropertyMarks,

    #[serde(default)]
    pub to_string: PropertyMarks,

    #[serde(default)]
    pub location: SourceLoc,
}

impl PropertyDescriptor {
    /// A body-declared property with a backing field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            storage: Storage::BackedField,
            origin: PropertyOrigin::Body,
            equality: PropertyMarks::default(),
            to_string: PropertyMarks::default(),
            location: SourceLoc::UNKNOWN,
        }
    }

    pub fn constructor(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            origin: PropertyOrigin::Constructor,
            ..Self::new(name, ty)
        }
    }

    pub fn getter_only(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            storage: Storage::GetterOnly,
            ..Self::new(name, ty)
        }
    }

    pub fn deferred(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            storage: Storage::DeferredInit,
            ..Self::new(name, ty)
        }
    }

    #[must_use]
    pub fn with_equality(mut self, marks: PropertyMarks) -> Self {
        self.equality = marks;
        self
    }

    #[must_use]
    pub fn with_to_string(mut self, marks: PropertyMarks) -> Self {
        self.to_string = marks;
        self
    }

    #[must_use]
    pub const fn at(mut self, location: SourceLoc) -> Self {
        self.location = location;
        self
    }

    /// Marks for the given family; the builder family carries none.
    #[must_use]
    pub fn marks(&self, family: Family) -> Option<&PropertyMarks> {
        match family {
            Family::EqualsAndHashCode => Some(&self.equality),
            Family::ToString => Some(&self.to_string),
            Family::Buildable => None,
        }
    }

    #[must_use]
    pub const fn is_deferred_init(&self) -> bool {
        matches!(self.storage, Storage::DeferredInit)
    }

    #[must_use]
    pub const fn has_backing_field(&self) -> bool {
        self.storage.has_backing_field()
    }
}
