//! Shared fixtures for the end-to-end tests.
//!
//! Builds a dispatcher over a freshly seeded shop, mirroring what the
//! console binary does at startup, and provides a `send` helper that
//! plays the role of the messaging channel: each call is one inbound
//! message from a chat, and the return value is the reply text.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chatshop_bot::{BotConfig, Dispatcher, seed};
use chatshop_core::ChatId;
use chatshop_engine::Shop;

/// Catalog fixture: ids 1-3 and 5, with id 4 deliberately absent.
pub const SEED_PRODUCTS: &str = "1,Good with high price,4000,5;\
                                 2,good2,500,10;\
                                 3,batflix,100,3;\
                                 5,limited good,1000,1";

/// Coupon fixture.
pub const SEED_COUPONS: &str = "WELCOME1000,1000;BONUS50,50";

/// Build a dispatcher over a shop seeded with the standard fixture.
///
/// # Panics
///
/// Panics if the fixture seed strings fail to parse; they are constants,
/// so that would be a bug in the fixture itself.
pub async fn seeded_dispatcher() -> Dispatcher {
    let config = BotConfig {
        bot_name: "chatshop-test".to_owned(),
        products: Some(SEED_PRODUCTS.to_owned()),
        coupons: Some(SEED_COUPONS.to_owned()),
    };

    let shop = Shop::new();
    seed::load_from_config(&shop, &config)
        .await
        .expect("fixture seed data must parse");
    Dispatcher::new(shop)
}

/// Deliver one message from `chat` and return the reply.
pub async fn send(dispatcher: &Dispatcher, chat: i64, text: &str) -> String {
    dispatcher
        .dispatch(ChatId::new(chat), &format!("USER_{chat}"), text)
        .await
}
