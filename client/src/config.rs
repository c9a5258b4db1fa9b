//! Client configuration resolved at build time.
//!
//! A WASM bundle has no process environment, so overrides are read with
//! `option_env!` when the crate is compiled. Every field is `'static` so the
//! whole config can be provided as a `Copy` context value.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const DEFAULT_MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
pub const AVATAR_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every REST call, without a trailing slash.
    pub api_base: &'static str,
    /// `localStorage` key holding the bearer credential.
    pub token_storage_key: &'static str,
    /// Anonymous entry route; rejected sessions are sent here.
    pub login_path: &'static str,
    /// Landing route for signed-in visitors hitting anonymous-only pages.
    pub home_path: &'static str,
    pub max_avatar_bytes: usize,
    pub avatar_content_types: &'static [&'static str],
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE,
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY,
            login_path: LOGIN_PATH,
            home_path: HOME_PATH,
            max_avatar_bytes: DEFAULT_MAX_AVATAR_BYTES,
            avatar_content_types: AVATAR_CONTENT_TYPES,
        }
    }
}

impl ClientConfig {
    /// Build the config from compile-time environment variables.
    ///
    /// Optional:
    /// - `CATALOG_API_BASE`: default `/api`
    /// - `CATALOG_TOKEN_KEY`: default `token`
    pub fn from_build_env() -> Self {
        Self::with_overrides(option_env!("CATALOG_API_BASE"), option_env!("CATALOG_TOKEN_KEY"))
    }

    fn with_overrides(api_base: Option<&'static str>, token_key: Option<&'static str>) -> Self {
        let defaults = Self::default();
        Self {
            api_base: api_base
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map_or(defaults.api_base, |v| v.trim_end_matches('/')),
            token_storage_key: token_key
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.token_storage_key),
            ..defaults
        }
    }

    /// Join the API base and an endpoint path.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}
