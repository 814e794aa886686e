//! Application configuration loaded from environment variables.
//!
//! - `OILWATCH_API_URL`: backend base URL (default `http://localhost:8080`)
//! - `OILWATCH_REFRESH_SECS`: price polling period in seconds (default 15)
//! - `OILWATCH_SITE_URL`: public site used for canonical page links
//! - `OILWATCH_LOG_FILE`: optional file that receives tracing output
//!
//! Empty values are treated as unset.

use std::path::PathBuf;
use std::time::Duration;

/// Default backend endpoint.
const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default public site used to build canonical links.
const DEFAULT_SITE_URL: &str = "https://liveoilprices.com";

/// Default price polling period.
const DEFAULT_REFRESH_SECS: u64 = 15;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub site_url: String,
    pub log_file: Option<PathBuf>,
}

/// Backend connection and polling settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub refresh_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            },
            site_url: DEFAULT_SITE_URL.to_string(),
            log_file: None,
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`OilwatchError::Config`](crate::OilwatchError::Config) if the
/// API URL is not an `http(s)` URL or the refresh period is not a positive
/// integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = match non_empty_var("OILWATCH_API_URL") {
        Some(url) => normalize_url("OILWATCH_API_URL", &url)?,
        None => DEFAULT_API_URL.to_string(),
    };

    let site_url = match non_empty_var("OILWATCH_SITE_URL") {
        Some(url) => normalize_url("OILWATCH_SITE_URL", &url)?,
        None => DEFAULT_SITE_URL.to_string(),
    };

    let refresh_secs = match non_empty_var("OILWATCH_REFRESH_SECS") {
        Some(raw) => parse_refresh_secs(&raw)?,
        None => DEFAULT_REFRESH_SECS,
    };

    Ok(AppConfig {
        api: ApiConfig {
            base_url,
            refresh_interval: Duration::from_secs(refresh_secs),
        },
        site_url,
        log_file: non_empty_var("OILWATCH_LOG_FILE").map(PathBuf::from),
    })
}

/// Strips trailing slashes and rejects anything that is not `http(s)`.
fn normalize_url(name: &str, raw: &str) -> crate::Result<String> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(crate::OilwatchError::Config(format!(
            "{name} must start with http:// or https://, got {raw:?}"
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_refresh_secs(raw: &str) -> crate::Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(crate::OilwatchError::Config(format!(
            "OILWATCH_REFRESH_SECS must be a positive integer, got {raw:?}"
        ))),
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    /// Serializes every test that touches the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Helper that temporarily sets env vars, runs `f`, then restores originals.
    ///
    /// Holds [`ENV_LOCK`] for the whole run so parallel tests never observe
    /// each other's values.
    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(&str, Option<String>)> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(k).ok()))
            .collect();

        for (k, v) in vars {
            // SAFETY: ENV_LOCK keeps other config tests from touching the environment.
            unsafe {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values, same single-threaded context.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    const ALL_VARS: [&str; 4] = [
        "OILWATCH_API_URL",
        "OILWATCH_REFRESH_SECS",
        "OILWATCH_SITE_URL",
        "OILWATCH_LOG_FILE",
    ];

    fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|k| (*k, None)).collect()
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&cleared(), || {
            let config = fetch_config().unwrap();
            assert_eq!(config.api.base_url, DEFAULT_API_URL);
            assert_eq!(config.api.refresh_interval, Duration::from_secs(15));
            assert_eq!(config.site_url, DEFAULT_SITE_URL);
            assert!(config.log_file.is_none());
        });
    }

    #[test]
    fn custom_api_url_trims_trailing_slash() {
        let mut vars = cleared();
        vars[0] = ("OILWATCH_API_URL", Some("https://api.example.com/"));
        with_env(&vars, || {
            let config = fetch_config().unwrap();
            assert_eq!(config.api.base_url, "https://api.example.com");
        });
    }

    #[test]
    fn rejects_non_http_api_url() {
        let mut vars = cleared();
        vars[0] = ("OILWATCH_API_URL", Some("ftp://example.com"));
        with_env(&vars, || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("OILWATCH_API_URL"));
        });
    }

    #[test]
    fn custom_refresh_interval() {
        let mut vars = cleared();
        vars[1] = ("OILWATCH_REFRESH_SECS", Some("30"));
        with_env(&vars, || {
            let config = fetch_config().unwrap();
            assert_eq!(config.api.refresh_interval, Duration::from_secs(30));
        });
    }

    #[test]
    fn rejects_zero_refresh_interval() {
        let mut vars = cleared();
        vars[1] = ("OILWATCH_REFRESH_SECS", Some("0"));
        with_env(&vars, || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("positive integer"));
        });
    }

    #[test]
    fn rejects_garbage_refresh_interval() {
        let mut vars = cleared();
        vars[1] = ("OILWATCH_REFRESH_SECS", Some("soon"));
        with_env(&vars, || {
            assert!(fetch_config().is_err());
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        let vars: Vec<_> = ALL_VARS.iter().map(|k| (*k, Some(""))).collect();
        with_env(&vars, || {
            let config = fetch_config().unwrap();
            assert_eq!(config.api.base_url, DEFAULT_API_URL);
            assert_eq!(config.site_url, DEFAULT_SITE_URL);
            assert!(config.log_file.is_none());
        });
    }

    #[test]
    fn log_file_from_env() {
        let mut vars = cleared();
        vars[3] = ("OILWATCH_LOG_FILE", Some("/tmp/oilwatch.log"));
        with_env(&vars, || {
            let config = fetch_config().unwrap();
            assert_eq!(config.log_file, Some(PathBuf::from("/tmp/oilwatch.log")));
        });
    }
}
