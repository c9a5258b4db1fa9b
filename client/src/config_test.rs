use super::*;

#[test]
fn default_config_matches_server_layout() {
    let config = ClientConfig::default();
    assert_eq!(config.api_base, "/api");
    assert_eq!(config.token_storage_key, "token");
    assert_eq!(config.login_path, "/login");
    assert_eq!(config.home_path, "/");
    assert_eq!(config.max_avatar_bytes, 5 * 1024 * 1024);
}

#[test]
fn overrides_trim_trailing_slash_from_api_base() {
    let config = ClientConfig::with_overrides(Some("https://shop.example/api/"), Some("session"));
    assert_eq!(config.api_base, "https://shop.example/api");
    assert_eq!(config.token_storage_key, "session");
}

#[test]
fn blank_overrides_fall_back_to_defaults() {
    let config = ClientConfig::with_overrides(Some("  "), Some(""));
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn api_url_joins_without_doubling_slashes() {
    let config = ClientConfig::default();
    assert_eq!(config.api_url("/users/me"), "/api/users/me");
    assert_eq!(config.api_url("auth/login"), "/api/auth/login");
}
