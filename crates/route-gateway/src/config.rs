//! Application configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which collaborator `/route` requests are forwarded to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    /// POST to a sidecar service over HTTP
    Local,
    /// Invoke a remote function with an HTTP-event envelope
    Remote,
}

impl FromStr for GatewayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "sidecar" => Ok(Self::Local),
            "remote" | "lambda" => Ok(Self::Remote),
            other => Err(format!("unknown gateway mode '{other}'")),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the gateway listens on
    pub port: u16,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// Document served at `/`
    pub index_file: PathBuf,

    pub mode: GatewayMode,

    /// Sidecar endpoint used in local mode
    pub sidecar_url: String,

    /// Outbound timeout for sidecar calls in seconds
    pub sidecar_timeout_secs: u64,

    /// Remote function invoked in remote mode
    pub function_name: String,

    /// Overall request timeout for the server in seconds
    pub request_timeout_secs: u64,

    /// Largest `/route` request body accepted, in bytes
    pub max_body_bytes: usize,

    /// Verbose logging toggle
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            port: parse_var(&lookup, "ROUTE_GATEWAY_PORT").unwrap_or(defaults.port),

            static_dir: lookup("ROUTE_GATEWAY_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),

            index_file: lookup("ROUTE_GATEWAY_INDEX_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.index_file),

            mode: parse_var(&lookup, "ROUTE_GATEWAY_MODE").unwrap_or(defaults.mode),

            sidecar_url: lookup("ROUTE_GATEWAY_SIDECAR_URL").unwrap_or(defaults.sidecar_url),

            sidecar_timeout_secs: parse_var(&lookup, "ROUTE_GATEWAY_SIDECAR_TIMEOUT_SECS")
                .unwrap_or(defaults.sidecar_timeout_secs),

            function_name: lookup("ROUTE_GATEWAY_FUNCTION_NAME").unwrap_or(defaults.function_name),

            request_timeout_secs: parse_var(&lookup, "ROUTE_GATEWAY_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),

            max_body_bytes: parse_var(&lookup, "ROUTE_GATEWAY_MAX_BODY_BYTES")
                .unwrap_or(defaults.max_body_bytes),

            debug: lookup("ROUTE_GATEWAY_DEBUG")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.debug),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            static_dir: PathBuf::from("./static"),
            index_file: PathBuf::from("./static/index.html"),
            mode: GatewayMode::Local,
            sidecar_url: "http://localhost:9000/".to_string(),
            sidecar_timeout_secs: 30,
            function_name: "get-shortest-path".to_string(),
            request_timeout_secs: 60,
            max_body_bytes: 64 * 1024 * 1024,
            debug: true,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.mode, GatewayMode::Local);
        assert_eq!(config.sidecar_url, "http://localhost:9000/");
        assert_eq!(config.sidecar_timeout_secs, 30);
        assert_eq!(config.function_name, "get-shortest-path");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.max_body_bytes, 64 * 1024 * 1024);
        assert!(config.debug);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("ROUTE_GATEWAY_PORT", "8123"),
            ("ROUTE_GATEWAY_MODE", "lambda"),
            ("ROUTE_GATEWAY_FUNCTION_NAME", "route-fn"),
            ("ROUTE_GATEWAY_DEBUG", "off"),
            ("ROUTE_GATEWAY_STATIC_DIR", "/srv/assets"),
            ("ROUTE_GATEWAY_MAX_BODY_BYTES", "1048576"),
        ]);
        assert_eq!(config.port, 8123);
        assert_eq!(config.mode, GatewayMode::Remote);
        assert_eq!(config.function_name, "route-fn");
        assert!(!config.debug);
        assert_eq!(config.static_dir, PathBuf::from("/srv/assets"));
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("ROUTE_GATEWAY_PORT", "eighty"),
            ("ROUTE_GATEWAY_MODE", "carrier-pigeon"),
            ("ROUTE_GATEWAY_DEBUG", "maybe"),
        ]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.mode, GatewayMode::Local);
        assert!(config.debug);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Remote".parse::<GatewayMode>(), Ok(GatewayMode::Remote));
        assert_eq!(" local ".parse::<GatewayMode>(), Ok(GatewayMode::Local));
        assert!("".parse::<GatewayMode>().is_err());
    }
}
