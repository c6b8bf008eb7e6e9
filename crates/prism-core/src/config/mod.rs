mod dirs;
mod settings;
mod validation;

pub use dirs::Directories;
pub use settings::{Config, ENV_SERVICE_URL};
pub use validation::warn_unknown_fields;
