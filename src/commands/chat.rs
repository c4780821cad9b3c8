use anyhow::Result;
use elite_core::chat::{ChatSession, Role};
use elite_core::responder::{self, ResponseMatcher};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::Context;
use crate::render::Render;

pub fn ask(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to ask");
    }
    println!("{}", responder::respond(text));
    Ok(())
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut session = ChatSession::new(ResponseMatcher::default(), ctx.config.reply_delay())?;
    let mut shown = 0;

    for message in session.messages() {
        println!("{}", message.render());
        shown += 1;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if session.send(&line).is_none() {
            continue;
        }
        println!("{}", "  ...".dimmed());
        session.settle().await;

        for message in session.messages().into_iter().skip(shown) {
            // The user's own line is already on screen.
            if message.role == Role::Assistant {
                println!("{}", message.render());
            }
            shown += 1;
        }
    }

    session.close();
    Ok(())
}
