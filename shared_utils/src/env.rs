use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads the first of `names` that is set to a non-empty value.
///
/// The error names the first (preferred) variable.
pub fn get_env_var_any(names: &[&str]) -> Result<String, MissingEnvVarError> {
    names
        .iter()
        .find_map(|name| get_optional_env_var(name))
        .ok_or_else(|| MissingEnvVarError(names.first().copied().unwrap_or_default().to_string()))
}

/// Reads an environment variable, treating unset and empty the same.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
