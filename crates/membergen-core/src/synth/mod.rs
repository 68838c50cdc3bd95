//! Generators turning a validated class and its resolution into method
//! bodies. Generators never consult each other.

mod builder;
mod equals;
mod hash_code;
mod to_string;

pub use builder::{BuildGen, SetterGen};
pub use equals::EqualsGen;
pub use hash_code::HashCodeGen;
pub use to_string::ToStringGen;

use crate::ir::{Access, Expr, MethodBody, MethodSignature, Stmt, SynthTarget, SynthesizedMethod};
use membergen_schema::node::{ClassId, PropertyDescriptor};

///
/// MethodGen
///
/// Common interface for all member generators.
///

pub trait MethodGen {
    fn target(&self) -> SynthTarget;

    /// Class the generated member is added to.
    fn owner(&self) -> ClassId;

    fn signature(&self) -> MethodSignature;

    fn stmts(&self) -> Vec<Stmt>;

    fn generate(&self) -> SynthesizedMethod {
        let body = MethodBody {
            signature: self.signature(),
            stmts: self.stmts(),
        };

        SynthesizedMethod::new(self.target(), self.owner(), body)
    }
}

/// Getter unless fields were requested and the property has one.
const fn access_for(property: &PropertyDescriptor, use_fields: bool) -> Access {
    if use_fields && property.has_backing_field() {
        Access::Field
    } else {
        Access::Getter
    }
}

// read
// plain read; raises at runtime if a deferred-init property is unset
fn read(receiver: Expr, property: &PropertyDescriptor, use_fields: bool) -> Expr {
    Expr::Property {
        receiver: Box::new(receiver),
        name: property.name.clone(),
        access: access_for(property, use_fields),
    }
}

// safe_read
// deferred-init properties read as null while unset
fn safe_read(receiver: Expr, property: &PropertyDescriptor, use_fields: bool) -> Expr {
    if property.is_deferred_init() {
        Expr::GuardedProperty {
            receiver: Box::new(receiver),
            name: property.name.clone(),
            access: access_for(property, use_fields),
            fallback: Box::new(Expr::Null),
        }
    } else {
        read(receiver, property, use_fields)
    }
}
