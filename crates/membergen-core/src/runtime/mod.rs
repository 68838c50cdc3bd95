//! Reference interpreter for synthesized method bodies.
//!
//! Executes the IR against a small reference-semantics value model so hosts
//! and tests can observe what a generated body does without lowering it.

mod eval;
pub mod hash;
mod value;

pub use membergen_schema::node::{ClassId, ObjectMethod};
pub use value::{ArrayRef, ObjectRef, Value};

use crate::{
    engine::ClassSynthesis,
    ir::{MethodBody, SynthTarget, SynthesizedMethod},
};
use std::{collections::HashMap, fmt};
use thiserror::Error as ThisError;

///
/// RuntimeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum RuntimeError {
    #[error("cannot cast {found} to '{class}'")]
    ClassCast { class: ClassId, found: &'static str },

    #[error("{param} is required but was not set")]
    MissingArgument { param: String },

    #[error("'{method}' ended without returning a value")]
    MissingReturn { method: String },

    #[error("no '{target}' installed for '{class}'")]
    NoSuchMethod { class: ClassId, target: SynthTarget },

    #[error("null receiver while accessing '{name}'")]
    NullReceiver { name: String },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("unbound name '{0}'")]
    Unbound(String),

    #[error("property '{property}' of '{class}' has not been initialized")]
    Uninitialized { class: ClassId, property: String },

    #[error("default of '{param}' is a host expression and cannot be evaluated: {expr}")]
    UnsupportedDefault { param: String, expr: String },

    #[error("'{method}' takes {expected} argument(s), got {found}")]
    WrongArity {
        method: String,
        expected: usize,
        found: usize,
    },
}

///
/// SuperDispatch
///
/// Behaviour of object methods above every installed class.
///

pub trait SuperDispatch: fmt::Debug {
    fn invoke(
        &self,
        this: &ObjectRef,
        method: ObjectMethod,
        args: &[Value],
    ) -> Result<Value, RuntimeError>;
}

///
/// RootObject
///
/// Identity equality, identity hash, and `Name@hash` representation.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RootObject;

impl SuperDispatch for RootObject {
    fn invoke(
        &self,
        this: &ObjectRef,
        method: ObjectMethod,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let value = match method {
            ObjectMethod::Equals => {
                Value::Bool(matches!(args.first(), Some(Value::Object(other)) if other.same(this)))
            }
            ObjectMethod::HashCode => Value::Int(this.identity_hash()),
            ObjectMethod::ToString => Value::Text(this.identity_repr()),
        };

        Ok(value)
    }
}

///
/// Runtime
///

#[derive(Debug)]
pub struct Runtime {
    methods: HashMap<(ClassId, SynthTarget), MethodBody>,
    parents: HashMap<ClassId, ClassId>,
    root: Box<dyn SuperDispatch>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(RootObject)
    }

    #[must_use]
    pub fn with_root(root: impl SuperDispatch + 'static) -> Self {
        Self {
            methods: HashMap::new(),
            parents: HashMap::new(),
            root: Box::new(root),
        }
    }

    /// Record the superclass of a class for instance checks and dispatch.
    pub fn register_class(&mut self, class: impl Into<ClassId>, superclass: Option<ClassId>) {
        let class = class.into();
        match superclass {
            Some(parent) => {
                self.parents.insert(class, parent);
            }
            None => {
                self.parents.remove(&class);
            }
        }
    }

    pub fn install(&mut self, method: &SynthesizedMethod) {
        self.methods.insert(
            (method.owner.clone(), method.target.clone()),
            method.body.clone(),
        );
    }

    /// Install every method of a class and remember its superclass.
    pub fn install_all(&mut self, synthesis: &ClassSynthesis) {
        self.register_class(synthesis.class.clone(), synthesis.superclass.clone());
        for method in &synthesis.methods {
            self.install(method);
        }
    }

    /// Invoke a synthesized member on an object.
    pub fn call(
        &self,
        receiver: &Value,
        target: &SynthTarget,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let Value::Object(this) = receiver else {
            return Err(mismatch("object", receiver));
        };
        let body = self
            .lookup(this.class(), target)
            .ok_or_else(|| RuntimeError::NoSuchMethod {
                class: this.class().clone(),
                target: target.clone(),
            })?;

        self.run(body, this, args)
    }

    /// Ambient equality: value equality for primitives, installed `equals`
    /// or identity for objects.
    pub fn equals(&self, a: &Value, b: &Value) -> Result<bool, RuntimeError> {
        let eq = match (a, b) {
            (Value::Object(this), _) => match self.lookup(this.class(), &SynthTarget::Equals) {
                Some(body) => {
                    let result = self.run(body, this, vec![b.clone()])?;
                    result.as_bool().ok_or_else(|| mismatch("boolean", &result))?
                }
                None => a.same_ref(b),
            },
            _ => a == b,
        };

        Ok(eq)
    }

    /// Ambient hash; null hashes to 0.
    pub fn hash_code(&self, value: &Value) -> Result<i32, RuntimeError> {
        let hash = match value {
            Value::Null => 0,
            Value::Bool(b) => hash::bool_hash(*b),
            Value::Int(i) => *i,
            Value::Long(l) => hash::long_hash(*l),
            Value::Text(t) => hash::text_hash(t),
            Value::Array(a) => a.identity_hash(),
            Value::Object(this) => match self.lookup(this.class(), &SynthTarget::HashCode) {
                Some(body) => {
                    let result = self.run(body, this, Vec::new())?;
                    result.as_int().ok_or_else(|| mismatch("int", &result))?
                }
                None => this.identity_hash(),
            },
        };

        Ok(hash)
    }

    /// Ambient string form; null renders as `null`.
    pub fn stringify(&self, value: &Value) -> Result<String, RuntimeError> {
        let text = match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Long(l) => l.to_string(),
            Value::Text(t) => t.clone(),
            Value::Array(a) => format!("{a:?}"),
            Value::Object(this) => match self.lookup(this.class(), &SynthTarget::ToString) {
                Some(body) => match self.run(body, this, Vec::new())? {
                    Value::Text(t) => t,
                    other => return Err(mismatch("string", &other)),
                },
                None => this.identity_repr(),
            },
        };

        Ok(text)
    }

    /// Hash that treats arrays by identity and defers to `hash_code` otherwise.
    pub fn identity_hash_code(&self, value: &Value) -> Result<i32, RuntimeError> {
        match value {
            Value::Array(a) => Ok(a.identity_hash()),
            _ => self.hash_code(value),
        }
    }

    /// Non-null instance of `class` or one of its subclasses.
    #[must_use]
    pub fn is_instance(&self, value: &Value, class: &ClassId) -> bool {
        value
            .as_object()
            .is_some_and(|obj| self.is_subclass(obj.class(), class))
    }

    /// Checked cast; null passes through.
    pub fn cast(&self, value: Value, class: &ClassId) -> Result<Value, RuntimeError> {
        if !value.is_null() && !self.is_instance(&value, class) {
            return Err(RuntimeError::ClassCast {
                class: class.clone(),
                found: value.kind_name(),
            });
        }

        Ok(value)
    }

    /// Dispatch to the nearest installed implementation at or above
    /// `superclass`, else to the root.
    pub fn super_call(
        &self,
        this: &Value,
        superclass: Option<&ClassId>,
        method: ObjectMethod,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let this = this.receiver("super")?;
        if let Some(parent) = superclass
            && let Some(body) = self.lookup(parent, &method.into())
        {
            return self.run(body, this, args);
        }

        self.root.invoke(this, method, &args)
    }

    /// Whether `class` is `target` or inherits from it.
    #[must_use]
    pub fn is_subclass(&self, class: &ClassId, target: &ClassId) -> bool {
        self.ancestry(class).any(|c| c == target)
    }

    // lookup
    // nearest installed body along the superclass chain
    fn lookup(&self, class: &ClassId, target: &SynthTarget) -> Option<&MethodBody> {
        self.ancestry(class)
            .find_map(|c| self.methods.get(&(c.clone(), target.clone())))
    }

    // ancestry
    // the class followed by its registered superclasses; bounded so a
    // cyclic registration cannot loop forever
    fn ancestry<'a>(&'a self, class: &'a ClassId) -> impl Iterator<Item = &'a ClassId> {
        std::iter::successors(Some(class), |c| self.parents.get(*c)).take(self.parents.len() + 1)
    }
}

fn mismatch(expected: &'static str, found: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        expected,
        found: found.kind_name(),
    }
}
