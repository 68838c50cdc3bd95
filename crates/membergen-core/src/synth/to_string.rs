use crate::{
    ir::{Expr, MethodSignature, Stmt, SynthTarget},
    resolve::Resolution,
    synth::{MethodGen, read},
};
use membergen_schema::{
    node::{ClassDescriptor, ClassId, ObjectMethod, ToStringConfig},
    types::TypeRef,
};

const SEPARATOR: &str = ", ";

///
/// ToStringGen
///
/// Emits `Name(a=.., b=..)` as a single concatenation. Reads are never
/// guarded, so an unset deferred-init property raises here.
///

pub struct ToStringGen<'a> {
    pub class: &'a ClassDescriptor,
    pub config: ToStringConfig,
    pub resolution: &'a Resolution,
}

impl MethodGen for ToStringGen<'_> {
    fn target(&self) -> SynthTarget {
        SynthTarget::ToString
    }

    fn owner(&self) -> ClassId {
        self.class.id.clone()
    }

    fn signature(&self) -> MethodSignature {
        MethodSignature {
            name: ObjectMethod::ToString.to_string(),
            params: Vec::new(),
            returns: TypeRef::string(),
        }
    }

    fn stmts(&self) -> Vec<Stmt> {
        let mut segments = Vec::new();

        if self.config.call_super {
            segments.push((
                "super",
                Expr::SuperCall {
                    superclass: self.class.superclass.clone(),
                    method: ObjectMethod::ToString,
                    args: Vec::new(),
                },
            ));
        }
        for resolved in &self.resolution.properties {
            let value = read(
                Expr::This,
                &resolved.property,
                self.config.use_fields_not_accessors,
            );
            segments.push((resolved.label.as_str(), value));
        }

        let mut parts = Parts::default();
        parts.text(&format!("{}(", self.class.short_name()));
        for (i, (label, value)) in segments.into_iter().enumerate() {
            if i > 0 {
                parts.text(SEPARATOR);
            }
            parts.text(&format!("{label}="));
            parts.push(Expr::Stringify(Box::new(value)));
        }
        parts.text(")");

        vec![Stmt::Return(parts.finish())]
    }
}

///
/// Parts
/// concatenation operands with adjacent literals merged
///

#[derive(Default)]
struct Parts(Vec<Expr>);

impl Parts {
    fn text(&mut self, text: &str) {
        if let Some(Expr::Text(last)) = self.0.last_mut() {
            last.push_str(text);
        } else {
            self.0.push(Expr::text(text));
        }
    }

    fn push(&mut self, expr: Expr) {
        self.0.push(expr);
    }

    fn finish(self) -> Expr {
        Expr::Concat(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ir::Access, resolve::InclusionResolver};
    use membergen_schema::{
        node::{ClassKind, PropertyDescriptor, PropertyMarks},
        types::Family,
    };

    fn parts(class: &ClassDescriptor) -> Vec<Expr> {
        let config = class.annotations.to_string.unwrap();
        let resolution = InclusionResolver::new()
            .resolve(class, Family::ToString)
            .unwrap();
        let stmts = ToStringGen {
            class,
            config,
            resolution: &resolution,
        }
        .stmts();

        let [Stmt::Return(Expr::Concat(parts))] = stmts.as_slice() else {
            panic!("expected a single concatenation");
        };
        parts.clone()
    }

    #[test]
    fn empty_class_renders_name_and_parens() {
        let class =
            ClassDescriptor::new("a.b.Empty", ClassKind::Class).with_to_string(ToStringConfig::default());

        assert_eq!(parts(&class), [Expr::text("Empty()")]);
    }

    #[test]
    fn labels_and_separators_are_merged_literals() {
        let class = ClassDescriptor::new("t.User", ClassKind::Class)
            .with_property(PropertyDescriptor::new("id", TypeRef::int()))
            .with_property(
                PropertyDescriptor::new("name", TypeRef::string())
                    .with_to_string(PropertyMarks::include_as("fullName")),
            )
            .with_to_string(ToStringConfig::default());
        let parts = parts(&class);

        assert_eq!(parts.len(), 5);
        assert_eq!(parts[0], Expr::text("User(id="));
        assert_eq!(parts[2], Expr::text(", fullName="));
        assert_eq!(parts[4], Expr::text(")"));
    }

    #[test]
    fn super_segment_and_unguarded_deferred_read() {
        let class = ClassDescriptor::new("t.Node", ClassKind::Class)
            .with_property(PropertyDescriptor::deferred("parent", TypeRef::nullable("t.Node")))
            .with_to_string(ToStringConfig {
                call_super: true,
                ..Default::default()
            });
        let parts = parts(&class);

        assert_eq!(parts[0], Expr::text("Node(super="));
        assert!(matches!(
            &parts[1],
            Expr::Stringify(inner) if matches!(inner.as_ref(), Expr::SuperCall { superclass: None, .. })
        ));
        assert_eq!(parts[2], Expr::text(", parent="));
        assert!(matches!(
            &parts[3],
            Expr::Stringify(inner) if matches!(inner.as_ref(), Expr::Property { access: Access::Getter, .. })
        ));
    }
}
