//! The Telegram transport, using long polling.

use std::sync::Arc;
use teloxide::{
    prelude::*,
    types::{ChatAction, InputFile},
};
use tracing::{error, info, warn};
use crate::{command::OperationKind, engine::MathBot, reply::Reply};

/// The chat action shown while a request is computed.
fn chat_action(kind: OperationKind) -> ChatAction {
    match kind {
        OperationKind::Graph => ChatAction::UploadPhoto,
        _ => ChatAction::Typing,
    }
}

/// Handles one incoming message. The computation runs on the blocking thread pool.
async fn handle_message(bot: Bot, msg: Message, engine: Arc<MathBot>) -> ResponseResult<()> {
    let Some(request) = msg.text().and_then(|text| engine.request(text)) else {
        return Ok(());
    };

    if request.command.usage.is_some() && !request.args.is_empty() {
        let action = chat_action(request.command.kind);
        if let Err(err) = bot.send_chat_action(msg.chat.id, action).await {
            warn!("could not send chat action: {err}");
        }
    }

    let reply = tokio::task::spawn_blocking(move || engine.dispatch(&request)).await;
    match reply {
        Ok(Some(Reply::Text(text))) => {
            bot.send_message(msg.chat.id, text).await?;
        },
        Ok(Some(Reply::Image { png, caption })) => {
            bot.send_photo(msg.chat.id, InputFile::memory(png).file_name("graph.png"))
                .caption(caption)
                .await?;
        },
        Ok(None) => {},
        Err(err) => error!("request handler panicked: {err}"),
    }

    Ok(())
}

/// Runs the bot until the process is interrupted.
pub async fn run(engine: Arc<MathBot>, token: String) {
    let bot = Bot::new(token);
    info!("Bot started!");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let engine = Arc::clone(&engine);
        async move { handle_message(bot, msg, engine).await }
    })
    .await;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn chat_action_per_operation() {
        assert_eq!(chat_action(OperationKind::Graph), ChatAction::UploadPhoto);
        assert_eq!(chat_action(OperationKind::Solve), ChatAction::Typing);
        assert_eq!(chat_action(OperationKind::MatrixInfo), ChatAction::Typing);
    }
}
