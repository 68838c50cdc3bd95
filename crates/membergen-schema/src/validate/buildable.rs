use crate::{
    BUILD_METHOD_NAME,
    error::Diagnostics,
    node::{BuilderClass, ClassDescriptor, ClassKind, ConstructorParam, MethodDecl},
    report,
    types::Family,
    validate::{FamilyReport, ValidationPolicy},
};

const FAMILY: Family = Family::Buildable;

// check
pub(super) fn check(class: &ClassDescriptor, policy: ValidationPolicy) -> FamilyReport {
    let mut diags = Diagnostics::new();

    let builder = match (&class.builder, class.annotations.buildable) {
        (None, false) => return FamilyReport::not_requested(FAMILY),
        (Some(builder), false) => {
            report!(
                diags,
                Error,
                BuilderInvalidLocation,
                builder.location,
                "builder class '{}' must be nested in a class marked buildable",
                builder.id
            );
            return FamilyReport::conclude(FAMILY, diags);
        }
        (None, true) => {
            report!(
                diags,
                Error,
                BuildableMissingBuilder,
                class.location,
                "buildable class '{}' has no nested builder class",
                class.short_name()
            );
            return FamilyReport::conclude(FAMILY, diags);
        }
        (Some(builder), true) => builder,
    };

    if builder.kind != ClassKind::Class || !builder.modifiers.is_plain() {
        report!(
            diags,
            Error,
            UnsupportedClassType,
            builder.location,
            "builder class must be a regular class, not an object, interface, inner, value or enum class"
        );
        return FamilyReport::conclude(FAMILY, diags);
    }
    if !class.kind.is_regular_class() || !class.modifiers.is_plain() {
        report!(
            diags,
            Error,
            UnsupportedClassType,
            class.location,
            "buildable class must be a regular class, not an object, interface, inner, value or enum class"
        );
        return FamilyReport::conclude(FAMILY, diags);
    }

    let params = class.constructor_params();
    if params.is_empty() {
        report!(
            diags,
            Error,
            BuildableInvalidPrimaryConstructor,
            class.location,
            "buildable class must have a primary constructor with at least one property"
        );
        return FamilyReport::conclude(FAMILY, diags);
    }
    if let Some(param) = params.iter().find(|p| !is_backed_property(class, p)) {
        report!(
            diags,
            Error,
            BuildableInvalidPrimaryConstructor,
            param.location,
            "all parameters of a buildable class constructor must be properties, '{}' is not",
            param.name
        );
        return FamilyReport::conclude(FAMILY, diags);
    }

    check_members(class, builder, params, policy, &mut diags);

    FamilyReport::conclude(FAMILY, diags)
}

fn is_backed_property(class: &ClassDescriptor, param: &ConstructorParam) -> bool {
    class
        .property(&param.name)
        .is_some_and(|p| p.has_backing_field() && p.ty == param.ty)
}

// check_members
fn check_members(
    class: &ClassDescriptor,
    builder: &BuilderClass,
    params: &[ConstructorParam],
    policy: ValidationPolicy,
    diags: &mut Diagnostics,
) {
    for method in &builder.methods {
        if method.name == BUILD_METHOD_NAME {
            check_build(class, method, diags);
        } else if let Some(param) = params.iter().find(|p| p.name == method.name) {
            check_setter(builder, param, method, diags);
        } else if policy.strict_builder_members {
            report!(
                diags,
                Error,
                BuilderUnrecognizedMethod,
                method.location,
                "'{}' is neither a setter for a constructor parameter nor '{BUILD_METHOD_NAME}'",
                method.name
            );
        } else {
            report!(
                diags,
                Warning,
                BuilderUnrecognizedMethod,
                method.location,
                "'{}' is neither a setter for a constructor parameter nor '{BUILD_METHOD_NAME}' and is ignored",
                method.name
            );
        }
    }

    for param in params {
        if builder.method(&param.name).is_none() {
            report!(
                diags,
                Error,
                BuilderMissingMethod,
                builder.location,
                "builder class must have a method for each constructor parameter but '{}' is missing",
                param.name
            );
        }
    }
    if builder.method(BUILD_METHOD_NAME).is_none() {
        report!(
            diags,
            Error,
            BuilderMissingMethod,
            builder.location,
            "builder class must have a '{BUILD_METHOD_NAME}' method"
        );
    }
}

fn check_build(class: &ClassDescriptor, method: &MethodDecl, diags: &mut Diagnostics) {
    if !method.params.is_empty() || method.returns != class.self_type() {
        report!(
            diags,
            Error,
            BuilderInvalidMethodSignature,
            method.location,
            "builder '{BUILD_METHOD_NAME}' method must not have any parameters and must return the buildable class '{}'",
            class.short_name()
        );
    }
}

fn check_setter(
    builder: &BuilderClass,
    param: &ConstructorParam,
    method: &MethodDecl,
    diags: &mut Diagnostics,
) {
    if method.returns != builder.self_type() {
        report!(
            diags,
            Error,
            BuilderInvalidMethodSignature,
            method.location,
            "builder method '{}' must return the builder type",
            method.name
        );
    } else if method.params.len() != 1 {
        report!(
            diags,
            Error,
            BuilderInvalidMethodSignature,
            method.location,
            "builder method '{}' must have exactly one parameter of the same type as the constructor parameter",
            method.name
        );
    } else if method.params[0] != param.ty {
        report!(
            diags,
            Error,
            BuilderInvalidMethodSignature,
            method.location,
            "invalid parameter type for builder method '{}', expected '{}'",
            method.name,
            param.ty
        );
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::{
        error::{DiagnosticCode, Severity},
        node::{
            BuilderClass, ClassDescriptor, ClassKind, ConstructorParam, Literal, MethodDecl,
            PropertyDescriptor,
        },
        types::{Family, TypeRef},
        validate::{FamilyReport, ValidationPolicy, Verdict, check_family},
    };

    fn person() -> ClassDescriptor {
        ClassDescriptor::new("t.Person", ClassKind::Class)
            .with_constructor(vec![
                ConstructorParam::new("name", TypeRef::string()),
                ConstructorParam::new("age", TypeRef::nullable("Int")).with_default(Literal::Int(10)),
            ])
            .buildable()
    }

    fn with_conventional_builder(class: ClassDescriptor) -> ClassDescriptor {
        let builder = BuilderClass::conventional(&class);
        class.with_builder(builder)
    }

    fn check(class: &ClassDescriptor) -> FamilyReport {
        check_family(class, Family::Buildable, ValidationPolicy::LENIENT)
    }

    fn codes(report: &FamilyReport) -> Vec<DiagnosticCode> {
        report.diagnostics.iter().map(|d| d.code).collect()
    }

    #[test]
    fn conventional_builder_is_ready() {
        let report = check(&with_conventional_builder(person()));

        assert_eq!(report.verdict, Verdict::Ready);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn unannotated_class_without_builder_is_not_requested() {
        let class = ClassDescriptor::new("t.Plain", ClassKind::Class);
        assert_eq!(check(&class).verdict, Verdict::NotRequested);
    }

    #[test]
    fn builder_and_annotation_must_pair() {
        let missing = check(&person());
        assert_eq!(codes(&missing), [DiagnosticCode::BuildableMissingBuilder]);

        let mut stray = with_conventional_builder(person());
        stray.annotations.buildable = false;
        assert_eq!(codes(&check(&stray)), [DiagnosticCode::BuilderInvalidLocation]);
    }

    #[test]
    fn builder_must_be_a_plain_class() {
        let class = person();
        let builder = BuilderClass::conventional(&class).with_kind(ClassKind::Object);
        let report = check(&class.with_builder(builder));

        assert_eq!(codes(&report), [DiagnosticCode::UnsupportedClassType]);
    }

    #[test]
    fn constructor_must_exist_and_be_properties() {
        let empty = ClassDescriptor::new("t.Empty", ClassKind::Class).buildable();
        let empty = with_conventional_builder(empty);
        assert_eq!(
            codes(&check(&empty)),
            [DiagnosticCode::BuildableInvalidPrimaryConstructor]
        );

        // a constructor param shadowed by a getter-only property has no field
        let getter = ClassDescriptor::new("t.G", ClassKind::Class)
            .with_property(PropertyDescriptor::getter_only("name", TypeRef::string()))
            .with_constructor(vec![ConstructorParam::new("name", TypeRef::string())])
            .buildable();
        let getter = with_conventional_builder(getter);
        assert_eq!(
            codes(&check(&getter)),
            [DiagnosticCode::BuildableInvalidPrimaryConstructor]
        );
    }

    #[test]
    fn missing_and_mistyped_methods() {
        let class = person();
        let builder_ty = TypeRef::new("t.Person.Builder");
        let builder = BuilderClass::new("t.Person.Builder")
            .with_method(MethodDecl::new("name", vec![TypeRef::int()], builder_ty))
            .with_method(MethodDecl::new("build", vec![], TypeRef::string()));
        let report = check(&class.with_builder(builder));

        assert_eq!(report.verdict, Verdict::Rejected);
        assert_eq!(
            codes(&report),
            [
                DiagnosticCode::BuilderInvalidMethodSignature,
                DiagnosticCode::BuilderInvalidMethodSignature,
                DiagnosticCode::BuilderMissingMethod,
            ]
        );
        assert!(report.diagnostics[2].message.contains("'age'"));
    }

    #[test]
    fn setter_must_return_builder_and_take_one_param() {
        let class = person();
        let builder_ty = TypeRef::new("t.Person.Builder");
        let builder = BuilderClass::conventional(&class)
            .with_method(MethodDecl::new("name", vec![], builder_ty));

        // first declaration wins the lookup, the extra overload is still checked
        let report = check(&class.with_builder(builder));
        assert_eq!(codes(&report), [DiagnosticCode::BuilderInvalidMethodSignature]);
    }

    #[test]
    fn unrecognized_member_severity_follows_policy() {
        let class = person();
        let builder = BuilderClass::conventional(&class).with_method(MethodDecl::new(
            "reset",
            vec![],
            TypeRef::new("t.Person.Builder"),
        ));
        let class = class.with_builder(builder);

        let lenient = check(&class);
        assert_eq!(lenient.verdict, Verdict::Ready);
        assert_eq!(lenient.diagnostics[0].severity, Severity::Warning);

        let strict = check_family(&class, Family::Buildable, ValidationPolicy::STRICT);
        assert_eq!(strict.verdict, Verdict::Rejected);
        assert_eq!(strict.diagnostics[0].code, DiagnosticCode::BuilderUnrecognizedMethod);
    }
}
