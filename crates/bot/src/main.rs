//! Chatshop console bot.
//!
//! Runs the command dispatcher against stdin/stdout: each line you type is
//! handled as a message from chat id 1 and the reply is printed. Type
//! `exit` to quit. This is the transport-free stand-in for a real
//! messaging-channel front-end.
//!
//! Configuration comes from the environment (see [`chatshop_bot::config`]);
//! a `.env` file is honored.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use chatshop_bot::{BotConfig, Dispatcher, seed};
use chatshop_core::ChatId;
use chatshop_engine::Shop;

const CONSOLE_CHAT: ChatId = ChatId::new(1);
const CONSOLE_NAME: &str = "USER_1";

#[tokio::main]
#[allow(clippy::print_stdout)]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chatshop_bot=info,chatshop_engine=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = BotConfig::from_env().expect("Failed to load configuration");
    tracing::info!(bot_name = %config.bot_name, "starting console bot");

    let shop = Shop::new();
    seed::load_from_config(&shop, &config)
        .await
        .expect("Failed to load seed data");

    let dispatcher = Dispatcher::new(shop);

    // Greet like a first contact, then echo replies for each input line.
    let reply = dispatcher.dispatch(CONSOLE_CHAT, CONSOLE_NAME, "/start").await;
    println!("{reply}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line == "exit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let reply = dispatcher.dispatch(CONSOLE_CHAT, CONSOLE_NAME, line).await;
        println!("{reply}");
    }

    tracing::info!("console bot shutting down");
}
