mod property;

use crate::{engine::Engine, runtime::Runtime};
use membergen_schema::node::ClassDescriptor;

/// Synthesize every listed class into one runtime.
fn install(classes: &[&ClassDescriptor]) -> Runtime {
    let engine = Engine::default();
    let mut rt = Runtime::new();
    for class in classes {
        let synthesis = engine.synthesize_class(class);
        assert!(
            !synthesis.diagnostics.has_errors(),
            "{}",
            synthesis.diagnostics
        );
        rt.install_all(&synthesis);
    }

    rt
}
