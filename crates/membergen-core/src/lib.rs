//! Member synthesis: inclusion resolution, method-body generation, and a
//! reference interpreter for the generated bodies.

pub mod config;
pub mod engine;
pub mod error;
pub mod ir;
pub mod resolve;
pub mod runtime;
pub mod synth;

#[cfg(test)]
mod tests;

pub use error::Error;

/// Initial hash accumulator when no super hash is chained.
pub const HASH_SEED: i32 = 17;

/// Multiplier applied to the accumulator before each property hash.
pub const HASH_MULTIPLIER: i32 = 31;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::EngineConfig,
        engine::{ClassSynthesis, Engine},
        error::{Error, SynthError},
        ir::{MethodBody, SynthTarget, SynthesizedMethod},
        runtime::{Runtime, RuntimeError, Value},
    };
    pub use membergen_schema::prelude::*;
}
