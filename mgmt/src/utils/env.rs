//! Validated environment variable access.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvVarError {
    #[error("Environment variable '{name}' not found. Set it in your .env file or environment.")]
    NotFound { name: String },

    #[error("Environment variable '{name}' contains invalid UTF-8 characters.")]
    InvalidUtf8 { name: String },

    #[error("Environment variable '{name}' is empty.")]
    Empty { name: String },
}

/// Environment lookups that trim values and treat blank as missing.
///
/// ```no_run
/// use sbmgmt::utils::EnvUtils;
///
/// if EnvUtils::has_non_empty_var("AZURE_AD__SUBSCRIPTION_ID") {
///     let subscription = EnvUtils::get_validated_var("AZURE_AD__SUBSCRIPTION_ID")?;
///     println!("Using subscription {subscription}");
/// }
/// # Ok::<(), sbmgmt::utils::EnvVarError>(())
/// ```
pub struct EnvUtils;

impl EnvUtils {
    pub fn has_non_empty_var(name: &str) -> bool {
        Self::get_validated_var(name).is_ok()
    }

    /// The trimmed value of `name`.
    ///
    /// # Errors
    ///
    /// [`EnvVarError::NotFound`] when unset, [`EnvVarError::Empty`] when
    /// blank, [`EnvVarError::InvalidUtf8`] when not valid Unicode.
    pub fn get_validated_var(name: &str) -> Result<String, EnvVarError> {
        match std::env::var(name) {
            Ok(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(EnvVarError::Empty {
                        name: name.to_string(),
                    })
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Err(std::env::VarError::NotPresent) => Err(EnvVarError::NotFound {
                name: name.to_string(),
            }),
            Err(std::env::VarError::NotUnicode(_)) => Err(EnvVarError::InvalidUtf8 {
                name: name.to_string(),
            }),
        }
    }

    pub fn get_optional_var(name: &str) -> Option<String> {
        Self::get_validated_var(name).ok()
    }

    /// First non-empty of `configured` and the variable `name`.
    pub fn configured_or_var(
        configured: Option<&str>,
        name: &str,
    ) -> Result<String, EnvVarError> {
        match configured.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => Ok(value.to_string()),
            None => Self::get_validated_var(name),
        }
    }
}
