mod config;
mod error;
mod extractors;

pub use config::{Config, ConfigError, Environment};
pub use error::AppError;
pub use extractors::ValidatedJson;
