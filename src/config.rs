use clap::Parser;
use std::time::Duration;

use crate::rate_limit::DEFAULT_MAX_REQUESTS_PER_CLIENT;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

// CLI argument structure, every flag can also come from the environment (or .env)
#[derive(Parser, Debug, Clone)]
#[command(name = "idea-validator")]
#[command(about = "Validates product ideas through the Gemini API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Gemini API key, sent as x-goog-api-key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    // Gemini API base url (override for local testing)
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    // Gemini model name
    #[arg(short, long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub model: String,

    // Max accepted validations per client for the process lifetime
    #[arg(long, env = "RATE_LIMIT", default_value_t = DEFAULT_MAX_REQUESTS_PER_CLIENT)]
    pub rate_limit: u32,

    // Upstream request timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT", default_value_t = 60)]
    pub upstream_timeout: u64,
}

impl Args {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_key_is_given() {
        let args = Args::try_parse_from(["idea-validator", "--gemini-api-key", "k"]).unwrap();
        assert_eq!(args.rate_limit, 5);
        assert_eq!(args.model, "gemini-2.0-flash");
        assert_eq!(args.upstream_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "idea-validator",
            "--gemini-api-key",
            "k",
            "--rate-limit",
            "2",
            "-p",
            "9000",
        ])
        .unwrap();
        assert_eq!(args.rate_limit, 2);
        assert_eq!(args.port, 9000);
    }
}
