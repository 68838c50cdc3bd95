//! ## Crate layout
//! - `schema`: class metadata, annotation configs, diagnostics, and the
//!   structural validator.
//! - `core`: inclusion resolution, method-body generation, the `Engine`,
//!   and the reference `runtime`.
//! - `build`: renders synthesized bodies as Rust source.
//!
//! `runtime` is re-exported at the root because rendered code refers to it as
//! `::membergen::runtime` by default.

pub use membergen_build as build;
pub use membergen_core as core;
pub use membergen_schema as schema;

pub use crate::core::{Error, runtime};

use crate::core::{config::EngineConfig, engine::Engine};

///
/// Consts
///

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configured from a TOML document.
pub fn engine_from_toml(src: &str) -> Result<Engine, Error> {
    let config = EngineConfig::from_toml_str(src)?;

    Ok(Engine::new(config))
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{RenderOptions, render_builder_slots, render_class, render_method},
        core::prelude::*,
        engine_from_toml,
    };
}
