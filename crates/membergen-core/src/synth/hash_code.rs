use crate::{
    HASH_MULTIPLIER, HASH_SEED,
    ir::{Expr, HashKind, MethodSignature, Stmt, SynthTarget},
    resolve::Resolution,
    synth::{MethodGen, safe_read},
};
use membergen_schema::{
    node::{ClassDescriptor, ClassId, EqualsAndHashCodeConfig, ObjectMethod},
    types::TypeRef,
};

const RESULT: &str = "result";

///
/// HashCodeGen
///
/// Walks the same resolution as `EqualsGen`, so equal instances hash alike.
///

pub struct HashCodeGen<'a> {
    pub class: &'a ClassDescriptor,
    pub config: EqualsAndHashCodeConfig,
    pub resolution: &'a Resolution,
}

impl MethodGen for HashCodeGen<'_> {
    fn target(&self) -> SynthTarget {
        SynthTarget::HashCode
    }

    fn owner(&self) -> ClassId {
        self.class.id.clone()
    }

    fn signature(&self) -> MethodSignature {
        MethodSignature {
            name: ObjectMethod::HashCode.to_string(),
            params: Vec::new(),
            returns: TypeRef::int(),
        }
    }

    fn stmts(&self) -> Vec<Stmt> {
        let init = if self.config.call_super {
            Expr::SuperCall {
                superclass: self.class.superclass.clone(),
                method: ObjectMethod::HashCode,
                args: Vec::new(),
            }
        } else {
            Expr::Int(HASH_SEED)
        };

        if self.resolution.is_empty() {
            return vec![Stmt::Return(init)];
        }

        let mut stmts = vec![Stmt::Let {
            name: RESULT.to_string(),
            value: init,
        }];

        let use_fields = self.config.use_fields_not_accessors;
        for resolved in &self.resolution.properties {
            let prop = &resolved.property;
            let kind = if prop.ty.array {
                HashKind::ArrayIdentity
            } else {
                HashKind::Ambient
            };
            let hash = Expr::HashOf {
                value: Box::new(safe_read(Expr::This, prop, use_fields)),
                kind,
            };

            stmts.push(Stmt::Assign {
                name: RESULT.to_string(),
                value: Expr::Add(
                    Box::new(Expr::Mul(
                        Box::new(Expr::local(RESULT)),
                        Box::new(Expr::Int(HASH_MULTIPLIER)),
                    )),
                    Box::new(hash),
                ),
            });
        }

        stmts.push(Stmt::Return(Expr::local(RESULT)));
        stmts
    }
}
