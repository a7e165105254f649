//! Shared class declarations for integration tests.

use std::sync::Arc;

use record_synth::{Class, ClassBody, OptionOverrides, dataclass};

/// `Point(x: int, y: int = 0)`.
pub fn point_body() -> ClassBody {
    let mut body = ClassBody::new("Point");
    body.annotate("x", "int")
        .annotate("y", "int")
        .assign("y", 0);
    body
}

/// Synthesize `Point` with `overrides`.
pub fn point(overrides: OptionOverrides) -> anyhow::Result<Arc<Class>> {
    Ok(dataclass(point_body(), &overrides)?)
}
