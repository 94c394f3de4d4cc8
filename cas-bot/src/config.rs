//! Startup configuration.

use cas_graph::GraphOptions;
use thiserror::Error;

/// The environment variable holding the Telegram bot token.
pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// An error in the configuration, detected before any message is processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No bot token was given on the command line or in the environment.
    #[error("TELEGRAM_BOT_TOKEN not set")]
    MissingToken,
}

/// Settings shared by every request, built once at startup and handed to the engine.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// The variable that equations are solved for, and that derivatives and integrals are taken
    /// with respect to.
    pub var: String,

    /// How graphs are sampled and rendered.
    pub graph: GraphOptions,
}

/// Solves in `x`, and plots `x` from `-10` to `10` with 400 samples on a `1000×600` canvas.
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            var: "x".to_string(),
            graph: GraphOptions::default()
                .canvas_size(1000, 600)
                .x_range(-10.0, 10.0)
                .samples(400),
        }
    }
}

/// Returns the bot token, treating a blank value the same as a missing one.
pub fn require_token(token: Option<String>) -> Result<String, ConfigError> {
    token
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(ConfigError::MissingToken)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn token_must_be_present() {
        assert_eq!(require_token(None), Err(ConfigError::MissingToken));
        assert_eq!(require_token(Some("  ".to_string())), Err(ConfigError::MissingToken));
        assert_eq!(require_token(Some("123:abc\n".to_string())), Ok("123:abc".to_string()));
    }

    #[test]
    fn default_graph_range() {
        let config = EngineConfig::default();
        assert_eq!(config.var, "x");
        assert_eq!(config.graph.x_bounds(), (-10.0, 10.0));
        assert_eq!(config.graph.samples, 400);
    }
}
