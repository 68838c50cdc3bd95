use crate::{
    error::{Diagnostic, Diagnostics, Severity},
    node::{ClassDescriptor, ClassKind, ObjectMethod},
    report,
    types::Family,
    validate::{FamilyReport, blocking_method, skip_message},
};

const FAMILY: Family = Family::ToString;

// check
pub(super) fn check(class: &ClassDescriptor) -> FamilyReport {
    let Some(config) = class.annotations.to_string else {
        return FamilyReport::not_requested(FAMILY);
    };
    let mut diags = Diagnostics::new();

    // inner classes are fine here, unlike the other families
    let supported_kind = class.kind.is_regular_class() || class.kind == ClassKind::Object;
    if !supported_kind || class.modifiers.local || class.modifiers.value {
        report!(
            diags,
            Error,
            UnsupportedClassType,
            class.location,
            "toString can only be generated for regular classes, data classes and objects, not '{}' ({})",
            class.short_name(),
            class.kind
        );
        return FamilyReport::conclude(FAMILY, diags);
    }

    if let Some((method, found, code)) = blocking_method(class, &[ObjectMethod::ToString]) {
        diags.push(Diagnostic::new(
            code,
            Severity::Warning,
            class.location,
            skip_message(class, method, found),
        ));
        return FamilyReport::skipped(FAMILY, diags);
    }

    if config.call_super && class.superclass.is_none() {
        report!(
            diags,
            Warning,
            CallSuperWithoutSuperclass,
            class.location,
            "callSuper on '{}' without a superclass prints the default object representation",
            class.short_name()
        );
    }

    FamilyReport::conclude(FAMILY, diags)
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{DiagnosticCode, Severity},
        node::{ClassDescriptor, ClassKind, ClassModifiers, MethodTable, ObjectMethod, ToStringConfig},
        types::Family,
        validate::{ValidationPolicy, Verdict, check_family},
    };

    fn check(class: &ClassDescriptor) -> crate::validate::FamilyReport {
        check_family(class, Family::ToString, ValidationPolicy::default())
    }

    fn annotated(kind: ClassKind) -> ClassDescriptor {
        ClassDescriptor::new("t.Thing", kind).with_to_string(ToStringConfig::default())
    }

    #[test]
    fn objects_and_inner_classes_are_supported() {
        assert_eq!(check(&annotated(ClassKind::Object)).verdict, Verdict::Ready);

        let inner = annotated(ClassKind::Class).with_modifiers(ClassModifiers {
            inner: true,
            ..Default::default()
        });
        assert_eq!(check(&inner).verdict, Verdict::Ready);

        let value = annotated(ClassKind::Class).with_modifiers(ClassModifiers {
            value: true,
            ..Default::default()
        });
        assert_eq!(check(&value).verdict, Verdict::Rejected);
        assert_eq!(check(&annotated(ClassKind::Interface)).verdict, Verdict::Rejected);
    }

    #[test]
    fn declared_method_skip_is_a_warning() {
        let c = annotated(ClassKind::Class)
            .with_methods(MethodTable::new().declared(ObjectMethod::ToString));
        let report = check(&c);

        assert_eq!(report.verdict, Verdict::Skipped);
        assert_eq!(report.diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn call_super_without_superclass_warns_but_proceeds() {
        let c = ClassDescriptor::new("t.Thing", ClassKind::Class).with_to_string(ToStringConfig {
            call_super: true,
            ..Default::default()
        });
        let report = check(&c);

        assert_eq!(report.verdict, Verdict::Ready);
        assert!(report.diagnostics.contains_code(DiagnosticCode::CallSuperWithoutSuperclass));
        assert!(!report.diagnostics.has_errors());
    }
}
