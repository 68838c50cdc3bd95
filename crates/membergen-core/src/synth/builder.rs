use crate::{
    ir::{Expr, Failure, MethodSignature, Param, Stmt, SynthTarget},
    synth::MethodGen,
};
use membergen_schema::{
    BUILD_METHOD_NAME,
    node::{BuilderDescriptor, BuilderSlot, ClassId, DefaultValue, ValueSource},
    types::TypeRef,
};

///
/// SetterGen
///
/// Stores the argument in the slot, marks the was-set flag when there is
/// one, and returns the builder for chaining.
///

pub struct SetterGen<'a> {
    pub builder: &'a BuilderDescriptor,
    pub slot: &'a BuilderSlot,
}

impl MethodGen for SetterGen<'_> {
    fn target(&self) -> SynthTarget {
        SynthTarget::BuilderSetter(self.slot.param.name.clone())
    }

    fn owner(&self) -> ClassId {
        self.builder.builder.clone()
    }

    fn signature(&self) -> MethodSignature {
        let param = &self.slot.param;

        MethodSignature {
            name: param.name.clone(),
            params: vec![Param::new(&param.name, param.ty.clone())],
            returns: TypeRef::of_class(&self.builder.builder),
        }
    }

    fn stmts(&self) -> Vec<Stmt> {
        let mut stmts = vec![Stmt::SetField {
            receiver: Expr::This,
            name: self.slot.value_slot.clone(),
            value: Expr::param(&self.slot.param.name),
        }];

        if let Some(flag) = &self.slot.was_set_slot {
            stmts.push(Stmt::SetField {
                receiver: Expr::This,
                name: flag.clone(),
                value: Expr::Bool(true),
            });
        }

        stmts.push(Stmt::Return(Expr::This));
        stmts
    }
}

///
/// BuildGen
///
/// Checks required slots, then calls the primary constructor. Builder state
/// is only read, so repeated builds yield equal instances.
///

pub struct BuildGen<'a> {
    pub builder: &'a BuilderDescriptor,
}

impl MethodGen for BuildGen<'_> {
    fn target(&self) -> SynthTarget {
        SynthTarget::BuilderBuild
    }

    fn owner(&self) -> ClassId {
        self.builder.builder.clone()
    }

    fn signature(&self) -> MethodSignature {
        MethodSignature {
            name: BUILD_METHOD_NAME.to_string(),
            params: Vec::new(),
            returns: TypeRef::of_class(&self.builder.target),
        }
    }

    fn stmts(&self) -> Vec<Stmt> {
        let mut stmts: Vec<_> = self
            .builder
            .required()
            .map(|slot| Stmt::ThrowIf {
                cond: Expr::field_of_this(&slot.value_slot).is_null(),
                failure: Failure::MissingArgument {
                    param: slot.param.name.clone(),
                },
            })
            .collect();

        let args = self
            .builder
            .slots
            .iter()
            .map(|slot| (slot.param.name.clone(), effective_value(slot)))
            .collect();

        stmts.push(Stmt::Return(Expr::New {
            class: self.builder.target.clone(),
            args,
        }));
        stmts
    }
}

// effective_value
// constructor argument for one slot
fn effective_value(slot: &BuilderSlot) -> Expr {
    let shadow = Expr::field_of_this(&slot.value_slot);
    let default = || Expr::DefaultOf {
        param: slot.param.name.clone(),
        value: slot.param.default.clone().unwrap_or(DefaultValue::Null),
    };

    match (slot.source, &slot.was_set_slot) {
        (ValueSource::Required | ValueSource::Shadow, _) => shadow,
        (ValueSource::ShadowOrDefault, _) | (ValueSource::FlagOrDefault, None) => Expr::If {
            cond: Box::new(shadow.clone().is_null()),
            then: Box::new(default()),
            otherwise: Box::new(shadow),
        },
        (ValueSource::FlagOrDefault, Some(flag)) => Expr::If {
            cond: Box::new(Expr::field_of_this(flag)),
            then: Box::new(shadow),
            otherwise: Box::new(default()),
        },
    }
}
