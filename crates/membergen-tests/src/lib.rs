//! Members of the fixture classes rendered by the build script and
//! compiled against `membergen::runtime`.

pub mod fixtures;

///
/// Rendered
///
/// One module per fixture class, e.g. `rendered::person::equals` and
/// `rendered::person::builder::build`.
///

#[allow(clippy::pedantic, clippy::nursery, missing_docs)]
pub mod rendered {
    include!(concat!(env!("OUT_DIR"), "/rendered.rs"));
}
