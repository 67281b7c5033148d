//! Settings of the ledger server.
//!
//! Sources, each one overriding the previous: built-in defaults, an optional
//! `settings.toml` in the working directory, then `LEDGER__`-prefixed
//! environment variables (`LEDGER__SERVER__PORT=8080`).
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    Memory,
    /// Path of a SQLite file, created if missing.
    Sqlite(String),
    /// Any database URL understood by sea-orm.
    Url(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
            Database::Url(url) => url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    #[serde(default)]
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("settings").required(false))
                .add_source(
                    Environment::with_prefix("LEDGER")
                        .prefix_separator("__")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("app.level", "info")?
            .set_default("server.port", 5000)?
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        let bind = self.server.bind.as_deref().unwrap_or("127.0.0.1");
        format!("{bind}:{}", self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Settings {
        Settings::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let settings = from_toml("");

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.database, Database::Memory);
        assert_eq!(settings.address(), "127.0.0.1:5000");
        assert_eq!(settings.server.database.url(), "sqlite::memory:");
    }

    #[test]
    fn sqlite_file() {
        let settings = from_toml(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8080
            database = { sqlite = "ledger.db" }
            "#,
        );

        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.address(), "0.0.0.0:8080");
        assert_eq!(
            settings.server.database.url(),
            "sqlite:ledger.db?mode=rwc"
        );
    }

    #[test]
    fn database_url_is_used_as_is() {
        let settings = from_toml(
            r#"
            [server]
            database = { url = "sqlite:/tmp/ledger.db" }
            "#,
        );

        assert_eq!(settings.server.database.url(), "sqlite:/tmp/ledger.db");
    }
}
