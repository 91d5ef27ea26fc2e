use serde::Deserialize;
use std::path::PathBuf;

// Top-level configuration, a container for every section
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub catalog: CatalogConfig,
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

// Where the movie catalog is read from
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: PathBuf,
    pub has_header: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

pub const DEFAULT_CATALOG_PATH: &str = "Movie Reservation Dataset.csv";

impl Config {
    /// Layers built-in defaults, an optional `config/default` file and
    /// `RESERVATION__`-prefixed environment variables, in that order.
    ///
    /// `RESERVATION__CATALOG__PATH=data/movies.csv` overrides `catalog.path`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "movie_reservation=info")?
            .set_default("app.log_format", "text")?
            .set_default("catalog.path", DEFAULT_CATALOG_PATH)?
            .set_default("catalog.has_header", true)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("RESERVATION")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                environment: "development".to_string(),
                rust_log: "movie_reservation=info".to_string(),
                log_format: LogFormat::Text,
            },
            catalog: CatalogConfig {
                path: PathBuf::from(DEFAULT_CATALOG_PATH),
                has_header: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_dataset_in_working_directory() {
        let config = Config::default();
        assert_eq!(config.catalog.path, PathBuf::from("Movie Reservation Dataset.csv"));
        assert!(config.catalog.has_header);
        assert_eq!(config.app.log_format, LogFormat::Text);
    }

    #[test]
    fn log_format_deserializes_lowercase() {
        let built = config::Config::builder()
            .set_override("format", "json")
            .unwrap()
            .build()
            .unwrap();
        let format: LogFormat = built.get("format").unwrap();
        assert_eq!(format, LogFormat::Json);
    }
}
