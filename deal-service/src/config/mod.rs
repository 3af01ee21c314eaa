use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// `sonar-pro` gives the best research quality; `sonar` is the faster,
/// cheaper option.
const DEFAULT_MODEL: &str = "sonar-pro";

const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

#[derive(Debug, Clone)]
pub struct DealConfig {
    pub common: core_config::Config,
    pub perplexity: PerplexitySettings,
}

#[derive(Debug, Clone)]
pub struct PerplexitySettings {
    /// Absence degrades the search path to an error report; it never fails
    /// startup.
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
}

impl DealConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(DealConfig {
            common,
            perplexity: PerplexitySettings {
                api_key: env::var("PERPLEXITY_API_KEY")
                    .ok()
                    .filter(|key| !key.is_empty())
                    .map(Secret::new),
                base_url: get_env("PERPLEXITY_BASE_URL", DEFAULT_BASE_URL),
                model: get_env("PERPLEXITY_MODEL", DEFAULT_MODEL),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation: keep everything in one test so parallel test
    // threads never race on the same variables.
    #[test]
    fn credential_is_optional_and_defaults_apply() {
        env::remove_var("PERPLEXITY_API_KEY");
        env::remove_var("PERPLEXITY_BASE_URL");
        env::remove_var("PERPLEXITY_MODEL");

        let config = DealConfig::load().expect("config should load without a credential");
        assert!(config.perplexity.api_key.is_none());
        assert_eq!(config.perplexity.base_url, "https://api.perplexity.ai");
        assert_eq!(config.perplexity.model, "sonar-pro");

        env::set_var("PERPLEXITY_API_KEY", "pplx-test-key");
        env::set_var("PERPLEXITY_MODEL", "sonar");

        let config = DealConfig::load().expect("config should load with a credential");
        assert!(config.perplexity.api_key.is_some());
        assert_eq!(config.perplexity.model, "sonar");

        // An empty credential counts as absent.
        env::set_var("PERPLEXITY_API_KEY", "");
        let config = DealConfig::load().unwrap();
        assert!(config.perplexity.api_key.is_none());

        env::remove_var("PERPLEXITY_API_KEY");
        env::remove_var("PERPLEXITY_MODEL");
    }
}
