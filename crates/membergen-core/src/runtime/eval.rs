use crate::{
    ir::{Expr, Failure, HashKind, MethodBody, Stmt},
    runtime::{ObjectRef, Runtime, RuntimeError, Value, mismatch},
};
use membergen_schema::node::{DefaultValue, Literal};
use std::collections::BTreeMap;

///
/// Frame
///

struct Frame {
    this: ObjectRef,
    params: BTreeMap<String, Value>,
    locals: BTreeMap<String, Value>,
}

impl Runtime {
    pub(super) fn run(
        &self,
        body: &MethodBody,
        this: &ObjectRef,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let sig = &body.signature;
        if sig.params.len() != args.len() {
            return Err(RuntimeError::WrongArity {
                method: sig.name.clone(),
                expected: sig.params.len(),
                found: args.len(),
            });
        }

        let mut frame = Frame {
            this: this.clone(),
            params: sig.params.iter().map(|p| p.name.clone()).zip(args).collect(),
            locals: BTreeMap::new(),
        };

        for stmt in &body.stmts {
            match stmt {
                Stmt::Let { name, value } | Stmt::Assign { name, value } => {
                    let value = self.eval(value, &frame)?;
                    frame.locals.insert(name.clone(), value);
                }
                Stmt::SetField {
                    receiver,
                    name,
                    value,
                } => {
                    let target = self.eval(receiver, &frame)?;
                    target.set_field(name, self.eval(value, &frame)?)?;
                }
                Stmt::IfReturn { cond, value } => {
                    if self.eval_bool(cond, &frame)? {
                        return self.eval(value, &frame);
                    }
                }
                Stmt::ThrowIf { cond, failure } => {
                    if self.eval_bool(cond, &frame)? {
                        return Err(match failure {
                            Failure::MissingArgument { param } => RuntimeError::MissingArgument {
                                param: param.clone(),
                            },
                        });
                    }
                }
                Stmt::Return(value) => return self.eval(value, &frame),
            }
        }

        Err(RuntimeError::MissingReturn {
            method: sig.name.clone(),
        })
    }

    fn eval(&self, expr: &Expr, frame: &Frame) -> Result<Value, RuntimeError> {
        let value = match expr {
            Expr::Null => Value::Null,
            Expr::Bool(b) => Value::Bool(*b),
            Expr::Int(i) => Value::Int(*i),
            Expr::Text(t) => Value::Text(t.clone()),

            Expr::This => Value::Object(frame.this.clone()),
            Expr::Param(name) => lookup_name(&frame.params, name)?,
            Expr::Local(name) => lookup_name(&frame.locals, name)?,

            Expr::Property { receiver, name, .. } => self.eval(receiver, frame)?.field(name)?,
            Expr::GuardedProperty {
                receiver,
                name,
                fallback,
                ..
            } => match self.eval(receiver, frame)?.try_field(name)? {
                Some(value) => value,
                None => self.eval(fallback, frame)?,
            },

            Expr::SuperCall {
                superclass,
                method,
                args,
            } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg, frame))
                    .collect::<Result<Vec<_>, _>>()?;
                let this = Value::Object(frame.this.clone());
                self.super_call(&this, superclass.as_ref(), *method, args)?
            }

            Expr::Not(inner) => Value::Bool(!self.eval_bool(inner, frame)?),
            Expr::IsNull(inner) => Value::Bool(self.eval(inner, frame)?.is_null()),
            Expr::SameRef(a, b) => {
                let a = self.eval(a, frame)?;
                let b = self.eval(b, frame)?;
                Value::Bool(a.same_ref(&b))
            }
            Expr::ValueEq(a, b) => {
                let a = self.eval(a, frame)?;
                let b = self.eval(b, frame)?;
                Value::Bool(self.equals(&a, &b)?)
            }

            Expr::IsInstance { value, class } => {
                let value = self.eval(value, frame)?;
                Value::Bool(self.is_instance(&value, class))
            }
            Expr::Cast { value, class } => self.cast(self.eval(value, frame)?, class)?,

            Expr::HashOf { value, kind } => {
                let value = self.eval(value, frame)?;
                Value::Int(match kind {
                    HashKind::Ambient => self.hash_code(&value)?,
                    HashKind::ArrayIdentity => self.identity_hash_code(&value)?,
                })
            }
            Expr::Add(a, b) => Value::Int(self.eval_int(a, frame)?.wrapping_add(self.eval_int(b, frame)?)),
            Expr::Mul(a, b) => Value::Int(self.eval_int(a, frame)?.wrapping_mul(self.eval_int(b, frame)?)),

            Expr::Concat(parts) => {
                let mut out = String::new();
                for part in parts {
                    match self.eval(part, frame)? {
                        Value::Text(text) => out.push_str(&text),
                        other => return Err(mismatch("string", &other)),
                    }
                }
                Value::Text(out)
            }
            Expr::Stringify(inner) => {
                let value = self.eval(inner, frame)?;
                Value::Text(self.stringify(&value)?)
            }

            Expr::If {
                cond,
                then,
                otherwise,
            } => {
                if self.eval_bool(cond, frame)? {
                    self.eval(then, frame)?
                } else {
                    self.eval(otherwise, frame)?
                }
            }

            Expr::New { class, args } => {
                let mut fields = Vec::with_capacity(args.len());
                for (name, arg) in args {
                    fields.push((name.clone(), self.eval(arg, frame)?));
                }
                Value::object(class.clone(), fields)
            }
            Expr::DefaultOf { param, value } => default_value(param, value)?,
        };

        Ok(value)
    }

    fn eval_bool(&self, expr: &Expr, frame: &Frame) -> Result<bool, RuntimeError> {
        self.eval(expr, frame)?.to_bool()
    }

    fn eval_int(&self, expr: &Expr, frame: &Frame) -> Result<i32, RuntimeError> {
        self.eval(expr, frame)?.to_int()
    }
}

fn lookup_name(scope: &BTreeMap<String, Value>, name: &str) -> Result<Value, RuntimeError> {
    scope
        .get(name)
        .cloned()
        .ok_or_else(|| RuntimeError::Unbound(name.to_string()))
}

fn default_value(param: &str, value: &DefaultValue) -> Result<Value, RuntimeError> {
    let value = match value {
        DefaultValue::Null => Value::Null,
        DefaultValue::Literal(Literal::Bool(b)) => Value::Bool(*b),
        DefaultValue::Literal(Literal::Int(i)) => Value::Int(*i),
        DefaultValue::Literal(Literal::Long(l)) => Value::Long(*l),
        DefaultValue::Literal(Literal::Text(t)) => Value::Text(t.clone()),
        DefaultValue::Expr(expr) => {
            return Err(RuntimeError::UnsupportedDefault {
                param: param.to_string(),
                expr: expr.clone(),
            });
        }
    };

    Ok(value)
}
