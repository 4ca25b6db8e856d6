//! Command-surface tests: every command the dispatcher understands,
//! including malformed input, driven exactly as a messaging channel would.

use chatshop_integration_tests::{seeded_dispatcher, send};

const USER: i64 = 1;

#[tokio::test]
async fn test_commands_require_start_first() {
    let bot = seeded_dispatcher().await;
    let reply = send(&bot, USER, "/hello").await;
    assert!(
        reply
            .to_lowercase()
            .contains("please use /start to create an account first")
    );
}

#[tokio::test]
async fn test_start_creates_account() {
    let bot = seeded_dispatcher().await;
    let reply = send(&bot, USER, "/start").await;
    assert!(reply.contains("USER_1"));
    assert!(reply.contains("$0"));
}

#[tokio::test]
async fn test_start_twice_welcomes_back() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/start").await;
    assert!(reply.contains("Welcome back"));
}

#[tokio::test]
async fn test_help_lists_all_commands() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/help").await;
    for command in ["/start", "/help", "/account", "/orders", "/products", "/coupon", "/cart"] {
        assert!(reply.contains(command), "help should mention {command}");
    }
}

#[tokio::test]
async fn test_help_topics() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    for topic in ["start", "help", "account", "orders", "products", "coupon", "cart"] {
        let reply = send(&bot, USER, &format!("/help {topic}")).await;
        assert!(
            reply.to_lowercase().contains(topic),
            "help for {topic} should mention it"
        );
    }
}

#[tokio::test]
async fn test_unrecognized_subcommands() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    for command in ["/help nonsense", "/cart nonsense", "/coupon nonsense"] {
        let reply = send(&bot, USER, command).await;
        assert!(
            reply.to_lowercase().contains("not recognized"),
            "{command} should not be recognized"
        );
    }
}

#[tokio::test]
async fn test_unknown_command() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/wrong").await;
    assert!(reply.to_lowercase().contains("unknown command"));
}

#[tokio::test]
async fn test_products_listing() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/products").await;
    assert!(reply.contains("Good with high price"));
    assert!(reply.contains("$4000"));
    assert!(reply.contains("good2"));
    assert!(reply.contains("$500"));
    assert!(reply.contains("batflix"));
}

#[tokio::test]
async fn test_cart_add_non_numeric_id() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/cart add string 1").await;
    assert!(reply.to_lowercase().contains("invalid product id"));
}

#[tokio::test]
async fn test_cart_add_unknown_product() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/cart add 4 1").await;
    assert!(reply.to_lowercase().contains("not found"));
}

#[tokio::test]
async fn test_cart_add_without_funds() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/cart add 1 1").await;
    assert!(reply.to_lowercase().contains("insufficient balance"));
}

#[tokio::test]
async fn test_cart_add_exceeding_stock() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/cart add 1 1000").await;
    assert!(reply.to_lowercase().contains("not enough stock available"));
}

#[tokio::test]
async fn test_cart_add_missing_quantity() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/cart add 3").await;
    assert!(reply.to_lowercase().contains("invalid command"));
}

#[tokio::test]
async fn test_cart_add_rejects_bad_quantities() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    send(&bot, USER, "/coupon apply WELCOME1000").await;

    let reply = send(&bot, USER, "/cart add 1 ff").await;
    assert!(reply.to_lowercase().contains("invalid"));

    let reply = send(&bot, USER, "/cart add 1 -10").await;
    assert!(reply.to_lowercase().contains("greater than zero"));
}

#[tokio::test]
async fn test_cart_clear() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    send(&bot, USER, "/coupon apply WELCOME1000").await;
    send(&bot, USER, "/cart add 3 10").await;

    let reply = send(&bot, USER, "/cart clear").await;
    assert!(reply.to_lowercase().contains("been cleared"));

    let reply = send(&bot, USER, "/cart").await;
    assert!(reply.to_lowercase().contains("is empty"));
}

#[tokio::test]
async fn test_cart_info_shows_totals() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    send(&bot, USER, "/coupon apply WELCOME1000").await;
    send(&bot, USER, "/cart add 2 1").await;

    let reply = send(&bot, USER, "/cart").await;
    assert!(reply.contains("1x good2"));
    assert!(reply.contains("Total: $500"));
    assert!(reply.contains("balance: $1000"));
}

#[tokio::test]
async fn test_checkout_empty_cart() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    let reply = send(&bot, USER, "/cart checkout").await;
    assert!(reply.contains("is empty"));
}

#[tokio::test]
async fn test_buy_and_checkout() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    send(&bot, USER, "/coupon apply WELCOME1000").await;
    send(&bot, USER, "/cart add 2 1").await;

    let reply = send(&bot, USER, "/cart checkout").await;
    assert!(reply.contains("Order placed successfully"));
    assert!(reply.contains("balance: $500"));
}

#[tokio::test]
async fn test_checkout_after_clear_and_readd() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    send(&bot, USER, "/coupon apply WELCOME1000").await;
    send(&bot, USER, "/cart add 2 1").await;
    send(&bot, USER, "/cart clear").await;
    send(&bot, USER, "/cart add 2 1").await;

    let reply = send(&bot, USER, "/cart checkout").await;
    assert!(reply.contains("balance: $500"));
}

#[tokio::test]
async fn test_orders_history() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;

    let reply = send(&bot, USER, "/orders").await;
    assert!(reply.to_lowercase().contains("yet"));

    send(&bot, USER, "/coupon apply WELCOME1000").await;
    send(&bot, USER, "/cart add 2 1").await;
    send(&bot, USER, "/cart checkout").await;

    let reply = send(&bot, USER, "/orders").await;
    assert!(reply.contains("Order ID: 1"));
    assert!(reply.contains("Items: 1"));
    assert!(reply.contains("Total: $500"));
}

#[tokio::test]
async fn test_account_balance() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;

    let reply = send(&bot, USER, "/account").await;
    assert!(reply.contains("balance: $0"));

    send(&bot, USER, "/coupon apply WELCOME1000").await;
    let reply = send(&bot, USER, "/account").await;
    assert!(reply.contains("balance: $1000"));
}

#[tokio::test]
async fn test_coupon_list() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;

    let reply = send(&bot, USER, "/coupon").await;
    assert_eq!(reply, "Already applied coupons: \n");

    send(&bot, USER, "/coupon apply WELCOME1000").await;
    let reply = send(&bot, USER, "/coupon list").await;
    assert!(reply.contains("Already applied coupons"));
    assert!(reply.contains("WELCOME1000"));
}

#[tokio::test]
async fn test_coupon_errors_leave_balance_alone() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;

    let reply = send(&bot, USER, "/coupon apply 1").await;
    assert!(reply.to_lowercase().contains("is not found"));

    send(&bot, USER, "/coupon apply WELCOME1000").await;
    let reply = send(&bot, USER, "/coupon apply WELCOME1000").await;
    assert!(reply.to_lowercase().contains("already applied"));

    let reply = send(&bot, USER, "/account").await;
    assert!(reply.contains("balance: $1000"));
}

#[tokio::test]
async fn test_coupon_codes_are_case_insensitive() {
    let bot = seeded_dispatcher().await;
    send(&bot, USER, "/start").await;
    send(&bot, USER, "/coupon apply welcome1000").await;

    let reply = send(&bot, USER, "/coupon apply WELCOME1000").await;
    assert!(reply.to_lowercase().contains("already applied"));
}
