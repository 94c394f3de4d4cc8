//! Splitting an incoming message into a command name and its arguments.

/// Where a message should go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route<'a> {
    /// A message starting with `/`.
    Command {
        /// The command name, without the leading `/` or any `@botname` suffix.
        name: &'a str,

        /// The remaining words, joined with single spaces.
        args: String,
    },

    /// Any other non-empty message, trimmed.
    Bare(&'a str),

    /// An empty or whitespace-only message.
    Empty,
}

/// Routes the message text.
///
/// In group chats Telegram appends the bot's username to commands, as in `/solve@mathbot x=1`;
/// the suffix is removed before the name is matched.
pub fn route(text: &str) -> Route<'_> {
    let text = text.trim();
    let Some(command) = text.strip_prefix('/') else {
        return if text.is_empty() { Route::Empty } else { Route::Bare(text) };
    };

    let mut words = command.split_whitespace();
    let word = words.next().unwrap_or_default();
    let name = word.split_once('@').map_or(word, |(name, _)| name);
    let args = words.collect::<Vec<_>>().join(" ");
    Route::Command { name, args }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn command(name: &'static str, args: &str) -> Route<'static> {
        Route::Command { name, args: args.to_string() }
    }

    #[test]
    fn commands() {
        assert_eq!(route("/solve x^2+5x+6=0"), command("solve", "x^2+5x+6=0"));
        assert_eq!(route("/solve   x^2 +5x\t+6 = 0 "), command("solve", "x^2 +5x +6 = 0"));
        assert_eq!(route("/help"), command("help", ""));
    }

    #[test]
    fn bot_name_suffix() {
        assert_eq!(route("/graph@math_bot x^2"), command("graph", "x^2"));
        assert_eq!(route("/start@math_bot"), command("start", ""));
    }

    #[test]
    fn bare_text() {
        assert_eq!(route("  x^2+5x+6 "), Route::Bare("x^2+5x+6"));
        assert_eq!(route("hello world"), Route::Bare("hello world"));
        assert_eq!(route("   "), Route::Empty);
        assert_eq!(route("/"), command("", ""));
    }
}
