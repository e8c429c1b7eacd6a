//! Command implementations.

pub mod profile;
pub mod resolve;
pub mod schema;
pub mod submit;

pub use self::profile::execute_profile;
pub use self::resolve::{apply_inputs, execute_export, execute_resolve, export_text};
pub use self::schema::execute_schema;
pub use self::submit::execute_submit;

use crate::config::Config;
use crate::error::Result;
use crate::schema::load_schema;
use intake_domain::FieldRegistry;
use intake_engine::Engine;
use std::path::Path;
use tracing::debug;

/// Build an engine over the schema named on the command line, the one in
/// the config, or the built-in intake fields, in that order.
pub fn build_engine(config: &Config, schema: Option<&Path>) -> Result<Engine> {
    let registry = match schema.or(config.schema.as_deref()) {
        Some(path) => {
            debug!("Loading schema from {}", path.display());
            load_schema(path)?
        }
        None => FieldRegistry::intake(),
    };
    Ok(Engine::new(registry, config.engine.clone())?)
}
