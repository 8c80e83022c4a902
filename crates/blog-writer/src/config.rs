//! Blog generation settings

use std::time::Duration;

use agent_core::GenerationOptions;

use crate::integrations::env_or;

/// Settings shared by the three agents and the pipeline
#[derive(Clone, Debug)]
pub struct BlogSettings {
    /// Chat model used by every agent
    pub model: String,

    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,

    /// Model turns allowed per tool-calling agent run
    pub max_iterations: usize,

    /// Time allowed for a single model call
    pub model_timeout_secs: u64,

    /// Owner recorded on generated blogs
    pub owner_id: String,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            temperature: None,
            max_iterations: 10,
            model_timeout_secs: 120,
            owner_id: "user123".into(),
        }
    }
}

impl BlogSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model: std::env::var("BLOG_MODEL").unwrap_or(defaults.model),
            temperature: std::env::var("BLOG_TEMPERATURE").ok().and_then(|t| t.parse().ok()),
            max_iterations: env_or("BLOG_MAX_ITERATIONS", defaults.max_iterations),
            model_timeout_secs: env_or("BLOG_MODEL_TIMEOUT_SECS", defaults.model_timeout_secs),
            owner_id: std::env::var("BLOG_OWNER_ID").unwrap_or(defaults.owner_id),
        }
    }

    pub fn generation(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            ..Default::default()
        }
    }

    pub fn model_timeout(&self) -> Option<Duration> {
        (self.model_timeout_secs > 0).then(|| Duration::from_secs(self.model_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = BlogSettings::default();
        assert_eq!(settings.max_iterations, 10);
        assert_eq!(settings.owner_id, "user123");
        assert_eq!(settings.model_timeout(), Some(Duration::from_secs(120)));
        assert_eq!(settings.generation().model, "gpt-4o-mini");
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let settings = BlogSettings {
            model_timeout_secs: 0,
            ..Default::default()
        };
        assert!(settings.model_timeout().is_none());
    }
}
