//! Method-body IR produced by the generators.
//!
//! Bodies are host-neutral: a host either lowers them into its own tree or
//! renders them as source. `runtime` executes them directly.

mod target;

pub use target::*;

use membergen_schema::{
    node::{ClassId, DefaultValue, ObjectMethod},
    types::TypeRef,
};
use serde::Serialize;

///
/// Access
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Access {
    Getter,
    Field,
}

///
/// HashKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum HashKind {
    /// The value's own hash.
    Ambient,

    /// Reference identity hash; raw arrays are never hashed by content.
    ArrayIdentity,
}

///
/// Failure
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Failure {
    MissingArgument { param: String },
}

///
/// Expr
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Expr {
    Null,
    Bool(bool),
    Int(i32),
    Text(String),

    This,
    Param(String),
    Local(String),

    Property {
        receiver: Box<Self>,
        name: String,
        access: Access,
    },

    /// Read that evaluates `fallback` instead of raising when the property
    /// has not been initialized yet.
    GuardedProperty {
        receiver: Box<Self>,
        name: String,
        access: Access,
        fallback: Box<Self>,
    },

    /// Call to the superclass implementation; `superclass` is `None` when
    /// only the root object sits above the class.
    SuperCall {
        superclass: Option<ClassId>,
        method: ObjectMethod,
        args: Vec<Self>,
    },

    Not(Box<Self>),
    IsNull(Box<Self>),
    SameRef(Box<Self>, Box<Self>),
    ValueEq(Box<Self>, Box<Self>),

    IsInstance {
        value: Box<Self>,
        class: ClassId,
    },
    Cast {
        value: Box<Self>,
        class: ClassId,
    },

    /// Hash of a value; null hashes to 0 for either kind.
    HashOf {
        value: Box<Self>,
        kind: HashKind,
    },

    /// 32-bit wrapping arithmetic.
    Add(Box<Self>, Box<Self>),
    Mul(Box<Self>, Box<Self>),

    Concat(Vec<Self>),
    Stringify(Box<Self>),

    If {
        cond: Box<Self>,
        then: Box<Self>,
        otherwise: Box<Self>,
    },

    /// Primary constructor call; args are named and in declaration order.
    New {
        class: ClassId,
        args: Vec<(String, Self)>,
    },

    /// Default expression of a constructor parameter.
    DefaultOf {
        param: String,
        value: DefaultValue,
    },
}

impl Expr {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::Param(name.into())
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self::Local(name.into())
    }

    #[must_use]
    pub fn field_of_this(name: impl Into<String>) -> Self {
        Self::Property {
            receiver: Box::new(Self::This),
            name: name.into(),
            access: Access::Field,
        }
    }

    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    #[must_use]
    pub fn is_null(self) -> Self {
        Self::IsNull(Box::new(self))
    }
}

///
/// Stmt
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Stmt {
    Let { name: String, value: Expr },
    Assign { name: String, value: Expr },
    SetField {
        receiver: Expr,
        name: String,
        value: Expr,
    },
    IfReturn { cond: Expr, value: Expr },
    ThrowIf { cond: Expr, failure: Failure },
    Return(Expr),
}

///
/// Param
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

///
/// MethodSignature
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: TypeRef,
}

///
/// MethodBody
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct MethodBody {
    pub signature: MethodSignature,
    pub stmts: Vec<Stmt>,
}
