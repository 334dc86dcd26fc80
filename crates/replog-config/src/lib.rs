//! Loading and validating `config.json`.
//!
//! Schema: `{"Hosts": [{id, name, type, hostname, port, active}], "debug": bool}`.

mod error;
mod loader;
mod model;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use model::{HostEntry, HostKind, HostsFile};
