//! Environment and home-directory expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references.
///
/// Bare `$VAR` is left alone. An unset variable without a default is an
/// error naming both the variable and the config field.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, Unset> {
        std::env::var(var).map(Some).map_err(|_| Unset)
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.var_name),
    })
}

/// Expand environment references, then a leading `~` to the home directory.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = expand_env(value, field)?;
    if expanded.starts_with('~') {
        return Ok(shellexpand::tilde(&expanded).into_owned());
    }
    Ok(expanded)
}

/// Lookup failure for an unset variable.
struct Unset;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TINYHTML_TEST_LANG", "de");
        }
        let result = expand_env("${TINYHTML_TEST_LANG}", "writer.language_code").unwrap();
        assert_eq!(result, "de");
        unsafe {
            std::env::remove_var("TINYHTML_TEST_LANG");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TINYHTML_TEST_UNSET_LABEL");
        }
        let result = expand_env("${TINYHTML_TEST_UNSET_LABEL:-top}", "writer.top").unwrap();
        assert_eq!(result, "top");
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TINYHTML_TEST_MISSING");
        }
        let err = expand_env("css/${TINYHTML_TEST_MISSING}.css", "writer.stylesheet").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("TINYHTML_TEST_MISSING"));
        assert!(err.to_string().contains("writer.stylesheet"));
    }

    #[test]
    fn test_plain_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("plain", "f").unwrap(), "plain");
        assert_eq!(expand_env("$HOME/x", "f").unwrap(), "$HOME/x");
    }

    #[test]
    fn test_expand_path_tilde() {
        let home = tempfile::tempdir().unwrap();
        let saved = std::env::var_os("HOME");
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("HOME", home.path());
        }
        let result = expand_path("~/styles/base.css", "writer.stylesheet");
        unsafe {
            match &saved {
                Some(value) => std::env::set_var("HOME", value),
                None => std::env::remove_var("HOME"),
            }
        }
        assert_eq!(
            result.unwrap(),
            format!("{}/styles/base.css", home.path().display())
        );
        assert_eq!(std::env::var_os("HOME"), saved);
    }

    #[test]
    fn test_expand_path_without_tilde() {
        assert_eq!(
            expand_path("styles/~base.css", "writer.stylesheet").unwrap(),
            "styles/~base.css"
        );
    }
}
