//! An interactive console that feeds each line through the bot, for trying it out without a
//! Telegram token.

use anyhow::Context;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, path::{Path, PathBuf}};
use tracing::info;
use crate::{engine::MathBot, reply::Reply};

/// Prints a reply. Images are written to `save_dir` when one is given.
fn show(reply: Reply, save_dir: Option<&Path>, count: &mut usize) -> anyhow::Result<()> {
    match reply {
        Reply::Text(text) => println!("{text}"),
        Reply::Image { png, caption } => {
            println!("{caption}");
            match save_dir {
                Some(dir) => {
                    *count += 1;
                    let path = dir.join(format!("graph-{count}.png"));
                    fs::write(&path, &png)
                        .with_context(|| format!("could not write {}", path.display()))?;
                    println!("[image: {} bytes, saved to {}]", png.len(), path.display());
                },
                None => println!("[image: {} bytes]", png.len()),
            }
        },
    }
    Ok(())
}

/// Reads lines until end of input, printing the bot's reply to each one.
pub fn run(engine: &MathBot, save_dir: Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(dir) = &save_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create {}", dir.display()))?;
    }

    let mut rl = DefaultEditor::new()?;
    let mut count = 0;
    info!("console started, type /help for the commands");

    fn process_line(
        rl: &mut DefaultEditor,
        engine: &MathBot,
        save_dir: Option<&Path>,
        count: &mut usize,
    ) -> anyhow::Result<()> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        if let Some(reply) = engine.handle(&input) {
            show(reply, save_dir, count)?;
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, engine, save_dir.as_deref(), &mut count) {
            match err.downcast_ref::<ReadlineError>() {
                Some(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
                Some(_) => return Err(err),
                None => eprintln!("{err:#}"),
            }
        }
    }
}
