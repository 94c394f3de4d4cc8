//! A Telegram bot that solves equations, rewrites expressions, takes derivatives and integrals,
//! plots graphs and reports on matrices.
//!
//! Every message is [routed](router) to a command from the fixed [command table](command), or
//! treated as a bare expression to simplify. The [`MathBot`] runs the command on the
//! [`cas_compute`] engine and [formats](format) exactly one [`Reply`], or none for unknown
//! commands and for bare text that is not math.
//!
//! ```
//! use cas_bot::{EngineConfig, MathBot, Reply};
//!
//! let bot = MathBot::new(EngineConfig::default());
//! let reply = bot.handle("/diff x^2+3x");
//! assert_eq!(reply, Some(Reply::Text("✅ Derivative:\n\nf(x) = x^2+3x\nf'(x) = 2*x + 3".to_string())));
//! assert_eq!(bot.handle("hello world"), None);
//! ```

pub mod command;
pub mod config;
pub mod engine;
pub mod format;
pub mod reply;
pub mod router;
pub mod transport;

pub use config::{ConfigError, EngineConfig};
pub use engine::MathBot;
pub use reply::Reply;
