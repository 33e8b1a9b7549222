//! Server settings loaded via OrthoConfig, plus the assembled server config.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use bulletin::domain::NEWS_COUNT_ON_HOME_PAGE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Which app the binary serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    /// Private notes.
    Notes,
    /// Public news with comments.
    News,
}

/// Raised for settings that parse but make no sense.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown app '{0}'; expected notes|news")]
    UnknownApp(String),
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl FromStr for AppKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notes" => Ok(Self::Notes),
            "news" => Ok(Self::News),
            _ => Err(SettingsError::UnknownApp(s.to_owned())),
        }
    }
}

/// Settings read from CLI flags, `BULLETIN_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BULLETIN")]
pub struct ServerSettings {
    /// `notes` or `news`; defaults to `news`.
    pub app: Option<String>,
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. In-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Items on the news home page.
    pub news_count: Option<usize>,
    /// JSON array of news items seeded into an empty news store.
    pub news_fixture: Option<PathBuf>,
}

impl ServerSettings {
    /// Selected app.
    pub fn app(&self) -> Result<AppKind, SettingsError> {
        self.app.as_deref().map_or(Ok(AppKind::News), AppKind::from_str)
    }

    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Home page size.
    pub fn news_count(&self) -> usize {
        self.news_count.unwrap_or(NEWS_COUNT_ON_HOME_PAGE)
    }
}

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) app: AppKind,
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(app: AppKind, key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            app,
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "BULLETIN_APP",
        "BULLETIN_BIND_ADDR",
        "BULLETIN_DATABASE_URL",
        "BULLETIN_NEWS_COUNT",
        "BULLETIN_NEWS_FIXTURE",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("bulletin")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.app().expect("app"), AppKind::News);
        assert_eq!(
            settings.bind_addr().expect("addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.news_count(), NEWS_COUNT_ON_HOME_PAGE);
        assert!(settings.database_url.is_none());
        assert!(settings.news_fixture.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BULLETIN_APP", Some("notes".to_owned())),
            ("BULLETIN_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("BULLETIN_DATABASE_URL", Some("postgres://localhost/bulletin".to_owned())),
            ("BULLETIN_NEWS_COUNT", Some("5".to_owned())),
            ("BULLETIN_NEWS_FIXTURE", Some("/tmp/news.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.app().expect("app"), AppKind::Notes);
        assert_eq!(settings.bind_addr().expect("addr").port(), 9000);
        assert_eq!(settings.news_count(), 5);
        assert_eq!(settings.database_url.as_deref(), Some("postgres://localhost/bulletin"));
        assert_eq!(settings.news_fixture, Some(PathBuf::from("/tmp/news.json")));
    }

    #[rstest]
    #[case("NEWS", AppKind::News)]
    #[case(" notes ", AppKind::Notes)]
    fn app_names_are_case_insensitive(#[case] raw: &str, #[case] expected: AppKind) {
        assert_eq!(raw.parse::<AppKind>().expect("known app"), expected);
    }

    #[rstest]
    fn unknown_apps_are_rejected() {
        assert!(matches!(
            "blog".parse::<AppKind>(),
            Err(SettingsError::UnknownApp(name)) if name == "blog"
        ));
    }
}
