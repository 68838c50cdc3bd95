use crate::{node::SourceLoc, types::TypeRef};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Literal
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Literal {
    Bool(bool),
    Int(i32),
    Long(i64),
    #[display("{_0:?}")]
    Text(String),
}

///
/// DefaultValue
///
/// Default expression of a constructor parameter. `Expr` is host source the
/// engine carries through untouched.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum DefaultValue {
    #[display("null")]
    Null,
    Literal(Literal),
    Expr(String),
}

impl DefaultValue {
    #[must_use]
    pub const fn is_null_literal(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<Literal> for DefaultValue {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

///
/// ConstructorParam
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConstructorParam {
    pub name: String,
    pub ty: TypeRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,

    #[serde(default)]
    pub location: SourceLoc,
}

impl ConstructorParam {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            location: SourceLoc::UNKNOWN,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub const fn at(mut self, location: SourceLoc) -> Self {
        self.location = location;
        self
    }

    /// Non-nullable and without a default: the builder must receive it.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !self.ty.nullable && self.default.is_none()
    }

    #[must_use]
    pub fn has_non_null_default(&self) -> bool {
        self.default.as_ref().is_some_and(|d| !d.is_null_literal())
    }
}
