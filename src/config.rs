//! Process configuration
//!
//! Everything comes from the environment. The bot credential and the public
//! URL have no sensible default, so their absence is fatal at startup.

use thiserror::Error;

/// Fixed administrator destination used when `GOLDFORK_ADMIN_CHAT` is unset.
const DEFAULT_ADMIN_CHAT: i64 = 7_994_205_774;

const DEFAULT_DB_PATH: &str = "/data/reservation.db";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} is invalid: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Bot credential; also the webhook path secret.
    pub bot_token: String,
    /// Externally reachable base URL, e.g. `https://bot.example.com`.
    pub public_url: String,
    pub port: u16,
    pub db_path: String,
    pub admin_chat_id: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = get("TELEGRAM_BOT_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let public_url = get("GOLDFORK_PUBLIC_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("GOLDFORK_PUBLIC_URL"))?
            .trim_end_matches('/')
            .to_string();

        // The hosting platform usually supplies PORT.
        let port = match get("GOLDFORK_PORT").or_else(|| get("PORT")) {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("GOLDFORK_PORT", raw))?,
            None => DEFAULT_PORT,
        };

        let db_path = get("GOLDFORK_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let admin_chat_id = match get("GOLDFORK_ADMIN_CHAT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("GOLDFORK_ADMIN_CHAT", raw))?,
            None => DEFAULT_ADMIN_CHAT,
        };

        Ok(Self {
            bot_token,
            public_url,
            port,
            db_path,
            admin_chat_id,
        })
    }

    /// Full callback URL registered with the transport.
    pub fn webhook_url(&self) -> String {
        format!("{}/webhook/{}", self.public_url, self.bot_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn minimal_config_applies_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:ABC"),
            ("GOLDFORK_PUBLIC_URL", "https://bot.example.com/"),
        ]))
        .unwrap();

        assert_eq!(config.bot_token, "123:ABC");
        assert_eq!(config.public_url, "https://bot.example.com");
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, "/data/reservation.db");
        assert_eq!(config.admin_chat_id, 7_994_205_774);
        assert_eq!(
            config.webhook_url(),
            "https://bot.example.com/webhook/123:ABC"
        );
    }

    #[test]
    fn missing_token_is_fatal() {
        let result = Config::from_lookup(lookup(&[(
            "GOLDFORK_PUBLIC_URL",
            "https://bot.example.com",
        )]));
        assert!(matches!(
            result,
            Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))
        ));
    }

    #[test]
    fn missing_public_url_is_fatal() {
        let result = Config::from_lookup(lookup(&[("TELEGRAM_BOT_TOKEN", "123:ABC")]));
        assert!(matches!(
            result,
            Err(ConfigError::Missing("GOLDFORK_PUBLIC_URL"))
        ));
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let result = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", ""),
            ("GOLDFORK_PUBLIC_URL", "https://bot.example.com"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))
        ));
    }

    #[test]
    fn platform_port_is_honored() {
        let config = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:ABC"),
            ("GOLDFORK_PUBLIC_URL", "https://bot.example.com"),
            ("PORT", "3000"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn unparseable_port_is_fatal() {
        let result = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:ABC"),
            ("GOLDFORK_PUBLIC_URL", "https://bot.example.com"),
            ("GOLDFORK_PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid("GOLDFORK_PORT", _))));
    }
}
