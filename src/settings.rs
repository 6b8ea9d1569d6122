use chrono::FixedOffset;
use config::ConfigError;
use std::env;
use std::path::PathBuf;

/// Process configuration, loaded once at startup and injected into the
/// components that need it. Business logic never reads the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub llm_prompt: String,
    pub model: String,
    pub api_url: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub log_root: PathBuf,
    pub log_utc_offset: FixedOffset,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();

        let offset_raw = env::var("LOG_UTC_OFFSET").unwrap_or_else(|_| "+09:00".to_string());
        let log_utc_offset = parse_utc_offset(&offset_raw).ok_or_else(|| {
            ConfigError::Message(format!(
                "LOG_UTC_OFFSET must look like +09:00 or -05:30, got {:?}",
                offset_raw
            ))
        })?;

        Ok(Settings {
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|_| ConfigError::NotFound("OPENAI_API_KEY".to_string()))?,
            llm_prompt: env::var("LLM_PROMPT").unwrap_or_default(),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4-turbo-preview".to_string()),
            api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            port: env::var("PORT")
                .map(|v| v.parse().unwrap_or(3000))
                .unwrap_or(3000),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .map(|v| v.parse().unwrap_or(60))
                .unwrap_or(60),
            log_root: PathBuf::from(env::var("LOG_ROOT").unwrap_or_else(|_| "./log".to_string())),
            log_utc_offset,
        })
    }
}

/// Parses a `±HH:MM` offset string into a [`FixedOffset`].
///
/// The audit log is pinned to one offset for the whole process so that log
/// paths and timestamps stay stable across deployment environments.
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let sign = match raw.chars().next()? {
        '+' => 1i32,
        '-' => -1i32,
        _ => return None,
    };
    let (hours, minutes) = raw[1..].split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_offset() {
        let offset = parse_utc_offset("+09:00").unwrap();
        assert_eq!(offset.local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn parses_negative_offset_with_minutes() {
        let offset = parse_utc_offset("-05:30").unwrap();
        assert_eq!(offset.local_minus_utc(), -(5 * 3600 + 30 * 60));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_utc_offset("").is_none());
        assert!(parse_utc_offset("09:00").is_none());
        assert!(parse_utc_offset("+9").is_none());
        assert!(parse_utc_offset("+25:00").is_none());
        assert!(parse_utc_offset("+09:61").is_none());
    }
}
