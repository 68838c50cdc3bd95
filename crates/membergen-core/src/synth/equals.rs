use crate::{
    ir::{Expr, MethodSignature, Param, Stmt, SynthTarget},
    resolve::Resolution,
    synth::{MethodGen, safe_read},
};
use membergen_schema::{
    node::{ClassDescriptor, ClassId, EqualsAndHashCodeConfig, ObjectMethod},
    types::TypeRef,
};

const OTHER: &str = "other";
const THAT: &str = "that";

///
/// EqualsGen
///

pub struct EqualsGen<'a> {
    pub class: &'a ClassDescriptor,
    pub config: EqualsAndHashCodeConfig,
    pub resolution: &'a Resolution,
}

impl MethodGen for EqualsGen<'_> {
    fn target(&self) -> SynthTarget {
        SynthTarget::Equals
    }

    fn owner(&self) -> ClassId {
        self.class.id.clone()
    }

    fn signature(&self) -> MethodSignature {
        MethodSignature {
            name: ObjectMethod::Equals.to_string(),
            params: vec![Param::new(OTHER, TypeRef::any_nullable())],
            returns: TypeRef::boolean(),
        }
    }

    fn stmts(&self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        let id = &self.class.id;

        if self.config.call_super {
            stmts.push(Stmt::IfReturn {
                cond: Expr::SuperCall {
                    superclass: self.class.superclass.clone(),
                    method: ObjectMethod::Equals,
                    args: vec![Expr::param(OTHER)],
                }
                .not(),
                value: Expr::Bool(false),
            });
        }

        stmts.push(Stmt::IfReturn {
            cond: Expr::SameRef(Box::new(Expr::This), Box::new(Expr::param(OTHER))),
            value: Expr::Bool(true),
        });
        stmts.push(Stmt::IfReturn {
            cond: Expr::IsInstance {
                value: Box::new(Expr::param(OTHER)),
                class: id.clone(),
            }
            .not(),
            value: Expr::Bool(false),
        });
        stmts.push(Stmt::Let {
            name: THAT.to_string(),
            value: Expr::Cast {
                value: Box::new(Expr::param(OTHER)),
                class: id.clone(),
            },
        });

        // short-circuit on the first differing property
        let use_fields = self.config.use_fields_not_accessors;
        for resolved in &self.resolution.properties {
            let prop = &resolved.property;
            let ours = safe_read(Expr::This, prop, use_fields);
            let theirs = safe_read(Expr::local(THAT), prop, use_fields);

            stmts.push(Stmt::IfReturn {
                cond: Expr::ValueEq(Box::new(ours), Box::new(theirs)).not(),
                value: Expr::Bool(false),
            });
        }

        stmts.push(Stmt::Return(Expr::Bool(true)));
        stmts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ir::Access, resolve::InclusionResolver};
    use membergen_schema::{
        node::{ClassKind, PropertyDescriptor},
        types::Family,
    };

    fn generate(config: EqualsAndHashCodeConfig) -> Vec<Stmt> {
        let class = ClassDescriptor::new("t.Pair", ClassKind::Class)
            .with_superclass("t.Base")
            .with_property(PropertyDescriptor::new("left", TypeRef::int()))
            .with_property(PropertyDescriptor::deferred("right", TypeRef::string()))
            .with_equals_and_hash_code(config);
        let resolution = InclusionResolver::new()
            .resolve(&class, Family::EqualsAndHashCode)
            .unwrap();

        EqualsGen {
            class: &class,
            config,
            resolution: &resolution,
        }
        .stmts()
    }

    #[test]
    fn shape_without_super() {
        let stmts = generate(EqualsAndHashCodeConfig::default());

        // identity, type guard, cast, one property, return
        assert_eq!(stmts.len(), 5);
        assert!(matches!(&stmts[0], Stmt::IfReturn { cond: Expr::SameRef(..), value: Expr::Bool(true) }));
        assert!(matches!(&stmts[2], Stmt::Let { name, .. } if name == THAT));
        assert_eq!(stmts[4], Stmt::Return(Expr::Bool(true)));
    }

    #[test]
    fn super_call_comes_first() {
        let stmts = generate(EqualsAndHashCodeConfig {
            call_super: true,
            ..Default::default()
        });

        let Stmt::IfReturn { cond: Expr::Not(inner), .. } = &stmts[0] else {
            panic!("expected super guard");
        };
        assert!(matches!(
            inner.as_ref(),
            Expr::SuperCall { method: ObjectMethod::Equals, superclass: Some(_), .. }
        ));
    }

    #[test]
    fn deferred_init_reads_are_guarded() {
        let stmts = generate(EqualsAndHashCodeConfig {
            include_deferred_init: true,
            use_fields_not_accessors: true,
            ..Default::default()
        });

        let Stmt::IfReturn { cond: Expr::Not(inner), .. } = &stmts[4] else {
            panic!("expected property comparison");
        };
        let Expr::ValueEq(ours, _) = inner.as_ref() else {
            panic!("expected value comparison");
        };
        assert!(matches!(
            ours.as_ref(),
            Expr::GuardedProperty { access: Access::Field, fallback, .. } if **fallback == Expr::Null
        ));
    }
}
