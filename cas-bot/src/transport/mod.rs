//! Ways of delivering messages to a [`MathBot`](crate::engine::MathBot) and sending back its
//! replies.

pub mod console;
pub mod telegram;
