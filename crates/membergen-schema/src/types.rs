use crate::node::ClassId;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Family
///
/// One annotation family; each family is validated and synthesized
/// independently of the others.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Family {
    EqualsAndHashCode,
    ToString,
    Buildable,
}

impl Family {
    /// Fixed check order used wherever families are iterated.
    pub const ALL: [Self; 3] = [Self::EqualsAndHashCode, Self::ToString, Self::Buildable];
}

///
/// TypeRef
///
/// Declared type of a property, parameter, or method return. `array` marks
/// the raw array family, whose ambient equality and hash are identity based.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TypeRef {
    pub name: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub array: bool,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
            array: false,
        }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            nullable: true,
            ..Self::new(name)
        }
    }

    pub fn array(name: impl Into<String>) -> Self {
        Self {
            array: true,
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn of_class(id: &ClassId) -> Self {
        Self::new(id.as_str())
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::new("Boolean")
    }

    #[must_use]
    pub fn int() -> Self {
        Self::new("Int")
    }

    #[must_use]
    pub fn string() -> Self {
        Self::new("String")
    }

    /// The top type every `equals` parameter accepts.
    #[must_use]
    pub fn any_nullable() -> Self {
        Self::nullable("Any")
    }

    #[must_use]
    pub fn to_nullable(&self) -> Self {
        Self {
            nullable: true,
            ..self.clone()
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.array {
            write!(f, "Array<{}>", self.name)?;
        } else {
            write!(f, "{}", self.name)?;
        }
        if self.nullable {
            write!(f, "?")?;
        }

        Ok(())
    }
}
