use crate::ir::MethodBody;
use membergen_schema::{
    BUILD_METHOD_NAME,
    node::{ClassId, ObjectMethod},
    types::Family,
};
use serde::Serialize;
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

const BUILDER_PREFIX: &str = "Builder.";

///
/// SynthTarget
///
/// One member the engine can synthesize for a class.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum SynthTarget {
    Equals,
    HashCode,
    ToString,
    BuilderSetter(String),
    BuilderBuild,
}

impl SynthTarget {
    #[must_use]
    pub const fn family(&self) -> Family {
        match self {
            Self::Equals | Self::HashCode => Family::EqualsAndHashCode,
            Self::ToString => Family::ToString,
            Self::BuilderSetter(_) | Self::BuilderBuild => Family::Buildable,
        }
    }

    /// Name of the generated method on its owner.
    #[must_use]
    pub fn method_name(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::HashCode => "hashCode",
            Self::ToString => "toString",
            Self::BuilderSetter(param) => param.as_str(),
            Self::BuilderBuild => BUILD_METHOD_NAME,
        }
    }
}

impl fmt::Display for SynthTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuilderSetter(_) | Self::BuilderBuild => {
                write!(f, "{BUILDER_PREFIX}{}", self.method_name())
            }
            _ => write!(f, "{}", self.method_name()),
        }
    }
}

impl From<ObjectMethod> for SynthTarget {
    fn from(method: ObjectMethod) -> Self {
        match method {
            ObjectMethod::Equals => Self::Equals,
            ObjectMethod::HashCode => Self::HashCode,
            ObjectMethod::ToString => Self::ToString,
        }
    }
}

///
/// ParseTargetError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("unknown synthesis target '{0}'")]
pub struct ParseTargetError(pub String);

impl FromStr for SynthTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(Self::Equals),
            "hashCode" => Ok(Self::HashCode),
            "toString" => Ok(Self::ToString),
            _ => match s.strip_prefix(BUILDER_PREFIX) {
                Some(BUILD_METHOD_NAME) => Ok(Self::BuilderBuild),
                Some(param) if !param.is_empty() => Ok(Self::BuilderSetter(param.to_string())),
                _ => Err(ParseTargetError(s.to_string())),
            },
        }
    }
}

///
/// Origin
///
/// Fixed at creation; lets a host tell engine output from user code.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Origin {
    Synthesized(Family),
}

///
/// SynthesizedMethod
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SynthesizedMethod {
    pub target: SynthTarget,

    /// Class the method is added to; the builder class for builder members.
    pub owner: ClassId,
    pub body: MethodBody,

    origin: Origin,
}

impl SynthesizedMethod {
    pub(crate) fn new(target: SynthTarget, owner: ClassId, body: MethodBody) -> Self {
        let origin = Origin::Synthesized(target.family());

        Self {
            target,
            owner,
            body,
            origin,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }
}
