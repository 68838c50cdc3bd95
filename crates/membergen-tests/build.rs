#[path = "src/fixtures.rs"]
mod fixtures;

use membergen::prelude::*;
use std::{env::var, error::Error, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/fixtures.rs");

    let engine = Engine::default();
    let options = RenderOptions::default();

    let mut output = String::new();
    for class in fixtures::all() {
        let synthesis = engine.synthesize_class(&class);
        if synthesis.diagnostics.has_errors() {
            return Err(format!("'{}' is not ready: {}", class.id, synthesis.diagnostics).into());
        }

        output.push_str(&render_class(&synthesis, &options)?.to_string());
        output.push('\n');
    }

    let out_dir = var("OUT_DIR")?;
    fs::write(PathBuf::from(out_dir).join("rendered.rs"), output)?;

    Ok(())
}
