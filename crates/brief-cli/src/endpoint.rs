//! Service base URL resolution

use brief_api::client::DEFAULT_BASE_URL;

/// Environment variable naming the service base URL
pub const API_URL_ENV: &str = "BRIEF_API_URL";

/// Port the service listens on behind a Codespaces forward
const CODESPACES_PORT: u16 = 8000;

/// Pick the base URL. The first non-blank source wins: the CLI flag, then
/// `BRIEF_API_URL`, then the config file, then a GitHub Codespaces forward,
/// then localhost.
pub fn resolve_base_url(
    flag: Option<&str>,
    config: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> String {
    let non_blank = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    let url = flag
        .and_then(non_blank)
        .or_else(|| env(API_URL_ENV).as_deref().and_then(non_blank))
        .or_else(|| config.and_then(non_blank))
        .or_else(|| codespaces_url(&env))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    url.trim_end_matches('/').to_string()
}

fn codespaces_url(env: &impl Fn(&str) -> Option<String>) -> Option<String> {
    let name = env("CODESPACE_NAME").filter(|s| !s.is_empty())?;
    let domain = env("GITHUB_CODESPACES_PORT_FORWARDING_DOMAIN").filter(|s| !s.is_empty())?;
    Some(format!("https://{name}-{CODESPACES_PORT}.{domain}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_localhost() {
        assert_eq!(resolve_base_url(None, None, env(&[])), "http://localhost:8000");
    }

    #[test]
    fn test_flag_beats_everything() {
        let url = resolve_base_url(
            Some("http://flag:1/"),
            Some("http://config:2"),
            env(&[(API_URL_ENV, "http://env:3")]),
        );
        assert_eq!(url, "http://flag:1");
    }

    #[test]
    fn test_env_beats_config() {
        let url = resolve_base_url(
            None,
            Some("http://config:2"),
            env(&[(API_URL_ENV, "http://env:3")]),
        );
        assert_eq!(url, "http://env:3");
    }

    #[test]
    fn test_blank_sources_skipped() {
        let url = resolve_base_url(Some("  "), Some("http://config:2"), env(&[(API_URL_ENV, "")]));
        assert_eq!(url, "http://config:2");
    }

    #[test]
    fn test_codespaces_forward() {
        let vars = env(&[
            ("CODESPACE_NAME", "fuzzy-disco-x7"),
            ("GITHUB_CODESPACES_PORT_FORWARDING_DOMAIN", "app.github.dev"),
        ]);
        assert_eq!(
            resolve_base_url(None, None, vars),
            "https://fuzzy-disco-x7-8000.app.github.dev"
        );
    }

    #[test]
    fn test_codespaces_needs_both_vars() {
        let vars = env(&[("CODESPACE_NAME", "fuzzy-disco-x7")]);
        assert_eq!(resolve_base_url(None, None, vars), "http://localhost:8000");
    }
}
