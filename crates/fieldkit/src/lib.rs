//! ## Crate layout
//! - `config`: TOML configuration consumed by fields and observability.
//! - `core`: expressions, fields, predicates, comparators and values.
//! - `primitives`: kind tags and small enums shared by every layer.
//!
//! The `prelude` module carries what schema-binding code needs to declare
//! fields and build predicates over them.

pub use fieldkit_config as config;
pub use fieldkit_core as core;
pub use fieldkit_primitives as primitives;

pub use fieldkit_core::{Error, ErrorClass, ErrorOrigin, enum_domain};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Apply a loaded configuration to the calling thread's metrics state.
///
/// Metrics state is per thread, so worker threads that record events call
/// this themselves.
///
/// Field-level settings such as case folding are applied per field through
/// `StringField::with_config`.
pub fn init(config: &config::Config) {
    core::obs::configure(&config.metrics);
    log::debug!("fieldkit {VERSION} initialised with case_fold={:?}", config.case_fold());
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::core::prelude::*;
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{init, prelude::*};
    use crate::core::obs::metrics_report;

    #[derive(Default)]
    struct Row {
        n: i32,
    }

    #[test]
    fn init_applies_metrics_switch() {
        let config = Config::from_toml_str("[metrics]\nenabled = false\n").unwrap();
        init(&config);

        let field = IntField::create(
            ColumnIdentifier::new("row", "n"),
            |r: &Row| r.n,
            |r: &mut Row, v| r.n = v,
            IdentityMapper,
            false,
        );
        assert!(field.equal(0).test(&Row::default()));
        assert_eq!(metrics_report().ops.predicates_built, 0);

        init(&Config::default());
    }
}
