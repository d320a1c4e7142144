//! Environment-based application configuration.

use std::{ops::RangeInclusive, str::FromStr};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
const DEFAULT_AI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_AI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
/// Token lifetimes accepted from the environment, one hour to one year.
const JWT_EXPIRY_HOURS_RANGE: RangeInclusive<i64> = 1..=8760;
const DEFAULT_AI_RATE_LIMIT_PER_MINUTE: u32 = 20;
const DEFAULT_MEDIA_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub cors_origin: Option<String>,

    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Hands reset tokens back in the forgot-password response; there is no mailer.
    pub reset_token_in_response: bool,

    pub ai_api_url: String,
    pub ai_api_key: Option<String>,
    pub ai_model: String,
    pub ai_rate_limit_per_minute: u32,

    pub media_host_url: Option<String>,
    pub media_api_key: Option<String>,
    pub media_max_upload_bytes: usize,

    /// Credentials for the admin account created on first startup.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            cors_origin: optional("CORS_ORIGIN"),
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiry_hours: within(
                "JWT_EXPIRY_HOURS",
                parsed("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
                JWT_EXPIRY_HOURS_RANGE,
            )?,
            reset_token_in_response: parsed("RESET_TOKEN_IN_RESPONSE", false)?,
            ai_api_url: optional("AI_API_URL").unwrap_or_else(|| DEFAULT_AI_API_URL.to_string()),
            ai_api_key: optional("AI_API_KEY"),
            ai_model: optional("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            ai_rate_limit_per_minute: parsed(
                "AI_RATE_LIMIT_PER_MINUTE",
                DEFAULT_AI_RATE_LIMIT_PER_MINUTE,
            )?,
            media_host_url: optional("MEDIA_HOST_URL"),
            media_api_key: optional("MEDIA_API_KEY"),
            media_max_upload_bytes: parsed(
                "MEDIA_MAX_UPLOAD_BYTES",
                DEFAULT_MEDIA_MAX_UPLOAD_BYTES,
            )?,
            admin_email: optional("ADMIN_EMAIL"),
            admin_password: optional("ADMIN_PASSWORD"),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads a variable, treating an empty value as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    parse_or_default(name, optional(name), default)
}

fn parse_or_default<T: FromStr>(
    name: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

fn within<T>(name: &str, value: T, range: RangeInclusive<T>) -> Result<T, ConfigError>
where
    T: PartialOrd + ToString,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_expiry_outside_range_is_invalid() {
        for hours in [0, -1, 8761, i64::MAX] {
            let result = within("JWT_EXPIRY_HOURS", hours, JWT_EXPIRY_HOURS_RANGE);
            assert!(matches!(
                result,
                Err(ConfigError::InvalidEnvVar { name, value })
                    if name == "JWT_EXPIRY_HOURS" && value == hours.to_string()
            ));
        }
    }

    #[test]
    fn jwt_expiry_inside_range_is_kept() {
        for hours in [1, DEFAULT_JWT_EXPIRY_HOURS, 8760] {
            assert_eq!(
                within("JWT_EXPIRY_HOURS", hours, JWT_EXPIRY_HOURS_RANGE).ok(),
                Some(hours)
            );
        }
    }

    #[test]
    fn unparsable_value_is_invalid() {
        let result = parse_or_default::<i64>("JWT_EXPIRY_HOURS", Some("soon".to_string()), 24);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { value, .. }) if value == "soon"));

        let unset = parse_or_default::<i64>("JWT_EXPIRY_HOURS", None, 24);
        assert_eq!(unset.ok(), Some(24));
    }
}
