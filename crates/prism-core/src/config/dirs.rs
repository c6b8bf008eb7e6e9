use directories::ProjectDirs;
use std::path::PathBuf;

/// Application directories following XDG spec
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/prism)
    pub config: PathBuf,

    /// Data directory (~/.local/share/prism)
    pub data: PathBuf,

    /// Cache directory (~/.cache/prism)
    pub cache: PathBuf,

    /// Config file path
    pub config_file: PathBuf,
}

impl Directories {
    /// Create a new `Directories` instance with standard XDG paths.
    ///
    /// # Panics
    ///
    /// Panics if the system's project directories cannot be determined.
    #[must_use]
    pub fn new() -> Self {
        let project =
            ProjectDirs::from("", "", "prism").expect("Failed to determine project directories");

        let config = project.config_dir().to_path_buf();
        let data = project.data_dir().to_path_buf();
        let cache = project.cache_dir().to_path_buf();

        Self {
            config_file: config.join("config.json"),
            config,
            data,
            cache,
        }
    }

    /// All paths rooted under `base` - used by tests.
    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.json"),
            config: base.clone(),
            data: base.clone(),
            cache: base,
        }
    }
}

impl Default for Directories {
    fn default() -> Self {
        Self::new()
    }
}
