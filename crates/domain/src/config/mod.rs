mod errors;
mod federation;
mod logging;
mod refresh;
mod root;
mod server;

pub use errors::ConfigError;
pub use federation::FederationConfig;
pub use logging::LoggingConfig;
pub use refresh::RefreshConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
