use crate::{
    error::{Diagnostic, Diagnostics, Severity},
    inclusion::{Decision, InclusionPolicy},
    node::{ClassDescriptor, ObjectMethod},
    report,
    types::Family,
    validate::{FamilyReport, blocking_method, skip_message},
};

const FAMILY: Family = Family::EqualsAndHashCode;

/// Both methods are skipped together so the pair always agrees.
const PAIR: [ObjectMethod; 2] = [ObjectMethod::Equals, ObjectMethod::HashCode];

// check
pub(super) fn check(class: &ClassDescriptor) -> FamilyReport {
    let Some(config) = class.annotations.equals_and_hash_code else {
        return FamilyReport::not_requested(FAMILY);
    };
    let mut diags = Diagnostics::new();

    if !class.kind.is_regular_class() || !class.modifiers.is_plain() {
        report!(
            diags,
            Error,
            UnsupportedClassType,
            class.location,
            "equals/hashCode can only be generated for regular and data classes, not '{}' ({})",
            class.short_name(),
            class.kind
        );
        return FamilyReport::conclude(FAMILY, diags);
    }

    if let Some((method, found, code)) = blocking_method(class, &PAIR) {
        diags.push(Diagnostic::new(
            code,
            Severity::Info,
            class.location,
            skip_message(class, method, found),
        ));
        return FamilyReport::skipped(FAMILY, diags);
    }

    if config.call_super && class.superclass.is_none() {
        report!(
            diags,
            Error,
            CallSuperWithoutSuperclass,
            class.location,
            "callSuper requires an explicit superclass; '{}' only inherits identity equality",
            class.short_name()
        );
    }

    check_marks(class, &mut diags);

    FamilyReport::conclude(FAMILY, diags)
}

// check_marks
// surface every include mark the inclusion rules refuse
fn check_marks(class: &ClassDescriptor, diags: &mut Diagnostics) {
    let Some(policy) = InclusionPolicy::for_class(class, FAMILY) else {
        return;
    };

    for property in &class.properties {
        if let Decision::Rejected(diag) = policy.decide(property) {
            diags.push(diag);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{DiagnosticCode, Severity},
        node::{
            ClassDescriptor, ClassKind, ClassModifiers, EqualsAndHashCodeConfig, MethodTable,
            ObjectMethod, PropertyDescriptor, PropertyMarks,
        },
        types::{Family, TypeRef},
        validate::{ValidationPolicy, Verdict, check_family},
    };

    fn class(kind: ClassKind) -> ClassDescriptor {
        ClassDescriptor::new("t.Point", kind)
            .with_property(PropertyDescriptor::new("x", TypeRef::int()))
            .with_equals_and_hash_code(EqualsAndHashCodeConfig::default())
    }

    fn verdict(class: &ClassDescriptor) -> Verdict {
        check_family(class, Family::EqualsAndHashCode, ValidationPolicy::default()).verdict
    }

    #[test]
    fn regular_and_data_classes_are_ready() {
        assert_eq!(verdict(&class(ClassKind::Class)), Verdict::Ready);
        assert_eq!(verdict(&class(ClassKind::DataClass)), Verdict::Ready);
    }

    #[test]
    fn unsupported_shapes_are_rejected() {
        for kind in [ClassKind::Object, ClassKind::Interface, ClassKind::EnumClass] {
            assert_eq!(verdict(&class(kind)), Verdict::Rejected, "{kind}");
        }

        let inner = class(ClassKind::Class).with_modifiers(ClassModifiers {
            inner: true,
            ..Default::default()
        });
        let report = check_family(&inner, Family::EqualsAndHashCode, ValidationPolicy::default());
        assert_eq!(report.verdict, Verdict::Rejected);
        assert!(report.diagnostics.contains_code(DiagnosticCode::UnsupportedClassType));
    }

    #[test]
    fn declared_or_final_method_skips_with_info() {
        let declared = class(ClassKind::Class)
            .with_methods(MethodTable::new().declared(ObjectMethod::HashCode));
        let report = check_family(&declared, Family::EqualsAndHashCode, ValidationPolicy::default());
        assert_eq!(report.verdict, Verdict::Skipped);
        assert_eq!(report.diagnostics[0].severity, Severity::Info);
        assert_eq!(report.diagnostics[0].code, DiagnosticCode::MethodAlreadyDeclared);

        let fin = class(ClassKind::Class)
            .with_methods(MethodTable::new().inherited_final(ObjectMethod::Equals));
        let report = check_family(&fin, Family::EqualsAndHashCode, ValidationPolicy::default());
        assert_eq!(report.verdict, Verdict::Skipped);
        assert_eq!(report.diagnostics[0].code, DiagnosticCode::MethodNotOverridable);

        let open = class(ClassKind::Class)
            .with_methods(MethodTable::new().inherited_open(ObjectMethod::Equals));
        assert_eq!(verdict(&open), Verdict::Ready);
    }

    #[test]
    fn call_super_needs_superclass() {
        let config = EqualsAndHashCodeConfig {
            call_super: true,
            ..Default::default()
        };
        let orphan = class(ClassKind::Class).with_equals_and_hash_code(config);
        assert_eq!(verdict(&orphan), Verdict::Rejected);

        let child = orphan.with_superclass("t.Base");
        assert_eq!(verdict(&child), Verdict::Ready);
    }

    #[test]
    fn include_on_getter_is_an_error() {
        let c = class(ClassKind::Class).with_property(
            PropertyDescriptor::getter_only("area", TypeRef::int())
                .with_equality(PropertyMarks::include()),
        );
        let report = check_family(&c, Family::EqualsAndHashCode, ValidationPolicy::default());

        assert_eq!(report.verdict, Verdict::Rejected);
        assert!(report.diagnostics.contains_code(DiagnosticCode::IncludeOnIneligibleProperty));
    }
}
