//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Variable named in a `${...}` reference that is not set.
struct Unset(String);

fn lookup(var: &str) -> Result<Option<String>, Unset> {
    std::env::var(var)
        .map(Some)
        .map_err(|_| Unset(var.to_owned()))
}

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// Values without `${` skip expansion entirely, so `{document}` style
/// placeholders and a bare `$` survive untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CNX_EXPAND_HOST", "cnx.example.org");
        }
        let result = expand_env("https://${CNX_EXPAND_HOST}/content", "links.base_url").unwrap();
        assert_eq!(result, "https://cnx.example.org/content");
        unsafe {
            std::env::remove_var("CNX_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CNX_EXPAND_UNSET");
        }
        let result = expand_env("${CNX_EXPAND_UNSET:-/archive}", "links.base_url").unwrap();
        assert_eq!(result, "/archive");
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CNX_EXPAND_MISSING");
        }
        let err = expand_env("${CNX_EXPAND_MISSING}", "links.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("CNX_EXPAND_MISSING"), "{msg}");
        assert!(msg.contains("links.base_url"), "{msg}");
    }

    #[test]
    fn test_template_placeholders_unchanged() {
        let result = expand_env("/content/{document}/{version}/", "links.document_template").unwrap();
        assert_eq!(result, "/content/{document}/{version}/");
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        let result = expand_env("/content/$latest", "links.latest_template").unwrap();
        assert_eq!(result, "/content/$latest");
    }
}
