//! Text command dispatcher.
//!
//! Parses one inbound message, invokes the engine, and returns the reply
//! text. All user-facing strings live here; the engine only reports typed
//! failures and the dispatcher translates them.
//!
//! Affordability and stock are pre-checked on `/cart add` to give early
//! feedback, using exact decimal arithmetic; the authoritative checks
//! still happen atomically inside checkout.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use chatshop_core::{ChatId, ProductId};
use chatshop_engine::models::User;
use chatshop_engine::{Shop, ShopError};

const HELP_TEXT_START: &str = "/start - Start the bot and create an account";
const HELP_TEXT_ACCOUNT: &str = "/account - Check your account balance";
const HELP_TEXT_ORDERS: &str = "/orders - Show your active orders";
const HELP_TEXT_PRODUCTS: &str = "/products - Show all available products";
const HELP_TEXT_COUPON: &str = "/coupon or /coupon list - Show all applied coupons\n\
    /coupon apply <coupon> - Apply selected coupon";
const HELP_TEXT_CART: &str = "/cart or /cart list - Show products in current cart\n\
    /cart add <product> <quantity> - Add selected product to cart\n\
    /cart clear - Remove all products from your cart\n\
    /cart checkout - Create new order with selected products from cart";
const HELP_TEXT_UNKNOWN: &str =
    "Command not recognized. Send /help to list all available commands.";

/// Routes inbound text commands to the engine and formats replies.
pub struct Dispatcher {
    shop: Shop,
}

impl Dispatcher {
    /// Create a dispatcher over an assembled shop.
    #[must_use]
    pub const fn new(shop: Shop) -> Self {
        Self { shop }
    }

    /// The shop this dispatcher fronts.
    #[must_use]
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    /// Handle one inbound message and produce the reply text.
    #[instrument(skip(self, text), fields(text = %text))]
    pub async fn dispatch(&self, chat_id: ChatId, first_name: &str, text: &str) -> String {
        let text = text.trim();
        debug!("received command");

        if text.starts_with("/start") {
            return self.handle_start(chat_id, first_name).await;
        }

        let Some(user) = self.shop.account().find_by_chat(chat_id).await else {
            return "Please use /start to create an account first.".to_owned();
        };

        if let Some(rest) = text.strip_prefix("/help") {
            Self::handle_help(rest.trim())
        } else if text.starts_with("/account") {
            Self::handle_account(&user)
        } else if text.starts_with("/orders") {
            self.handle_orders(&user).await
        } else if text.starts_with("/products") {
            self.handle_products().await
        } else if let Some(rest) = text.strip_prefix("/coupon") {
            self.handle_coupon(&user, rest.trim()).await
        } else if let Some(rest) = text.strip_prefix("/cart") {
            self.handle_cart(&user, rest.trim()).await
        } else {
            "Unknown command. Type /help to see available commands.".to_owned()
        }
    }

    async fn handle_start(&self, chat_id: ChatId, first_name: &str) -> String {
        if self.shop.account().find_by_chat(chat_id).await.is_some() {
            return format!("Welcome back, {first_name}! Your account is already set up.");
        }

        let user = self.shop.account().create(chat_id, first_name).await;
        format!(
            "Welcome, {first_name}! Your account has been created with an initial balance \
             of ${}. Type /help to see available commands.",
            user.balance
        )
    }

    fn handle_help(topic: &str) -> String {
        let reply = match topic {
            "" | "help" => concat!(
                "Available commands:\n",
                "/start - Start the bot and create an account\n",
                "/help - Show this help message\n",
                "/help <command> - Show the help message for corresponding command\n",
                "/account - Check your account balance\n",
                "/orders - Show your active orders\n",
                "/products - Show all available products\n",
                "/coupon - Apply coupon or list all applied coupons\n",
                "/cart - Show your current cart, buy goods from store, checkout",
            ),
            "start" => HELP_TEXT_START,
            "account" => HELP_TEXT_ACCOUNT,
            "orders" => HELP_TEXT_ORDERS,
            "products" => HELP_TEXT_PRODUCTS,
            "coupon" => HELP_TEXT_COUPON,
            "cart" => HELP_TEXT_CART,
            _ => HELP_TEXT_UNKNOWN,
        };
        reply.to_owned()
    }

    fn handle_account(user: &User) -> String {
        format!(
            "Your current balance: ${}\n\nUse /coupon apply <code> to add funds to your \
             balance.",
            user.balance
        )
    }

    async fn handle_orders(&self, user: &User) -> String {
        let orders = self.shop.checkout().user_orders(user.id).await;

        if orders.is_empty() {
            return "You haven't placed any orders yet.".to_owned();
        }

        let mut reply = String::from("Your Order History:\n\n");
        for order in orders {
            reply.push_str(&format!(
                "Order ID: {}\nDate: {}\nTotal: ${}\nItems: {}\n\n",
                order.id,
                order.created_at_display(),
                order.total,
                order.items.len()
            ));
        }
        reply
    }

    async fn handle_products(&self) -> String {
        let products = self.shop.catalog().list().await;

        if products.is_empty() {
            return "No products available at the moment.".to_owned();
        }

        let mut reply = String::from("Available Products:\n\n");
        for product in products {
            reply.push_str(&format!(
                "ID: {}\nName: {}\nPrice: ${}\nIn Stock: {}\n\nTo add to cart: \
                 /cart add {} <quantity>\n\n",
                product.id, product.name, product.price, product.stock, product.id
            ));
        }
        reply
    }

    async fn handle_coupon(&self, user: &User, rest: &str) -> String {
        if rest.is_empty() || rest == "list" {
            return Self::format_coupon_list(user);
        }

        if let Some(code) = rest.strip_prefix("apply") {
            return self.apply_coupon(user, code.trim()).await;
        }

        HELP_TEXT_UNKNOWN.to_owned()
    }

    fn format_coupon_list(user: &User) -> String {
        let mut reply = String::from("Already applied coupons: \n");
        for code in &user.coupons_used {
            reply.push('\n');
            reply.push_str(code.as_str());
        }
        reply
    }

    async fn apply_coupon(&self, user: &User, code: &str) -> String {
        match self.shop.coupon().apply(user.id, code).await {
            Ok(_) => {
                let balance = self
                    .shop
                    .account()
                    .find(user.id)
                    .await
                    .map_or(Decimal::ZERO, |u| u.balance);
                format!(
                    "Coupon {code} was successfully applied\n\nYour balance: ${balance}"
                )
            }
            Err(ShopError::CouponNotFound { .. }) => {
                format!("Coupon {code} is not found.")
            }
            Err(ShopError::CouponAlreadyUsed { .. }) => {
                format!("Coupon {code} was already applied.")
            }
            Err(err) => format!("An error occurred: {err}"),
        }
    }

    async fn handle_cart(&self, user: &User, rest: &str) -> String {
        if rest.is_empty() || rest == "list" {
            return self.format_cart(user).await;
        }
        if rest == "clear" {
            return self.clear_cart(user).await;
        }
        if rest.starts_with("add") {
            return self.add_to_cart(user, rest).await;
        }
        if rest == "checkout" {
            return self.checkout(user).await;
        }

        HELP_TEXT_UNKNOWN.to_owned()
    }

    async fn format_cart(&self, user: &User) -> String {
        if user.cart.is_empty() {
            return "Your shopping cart is empty. Use /products to browse available \
                    products."
                .to_owned();
        }

        let lines = match self.shop.cart().cart_lines(user).await {
            Ok(lines) => lines,
            Err(err) => return format!("An error occurred: {err}"),
        };

        let mut total = Decimal::ZERO;
        let mut reply = String::from("Your Shopping Cart:\n\n");
        for (item, product) in lines {
            let line_total = product.price * Decimal::from(item.quantity);
            reply.push_str(&format!(
                "{}x {} - ${} each = ${}\n",
                item.quantity, product.name, product.price, line_total
            ));
            total += line_total;
        }

        reply.push_str(&format!(
            "\nTotal: ${total}\n\nYour balance: ${}\n\nUse /cart checkout to complete \
             your purchase or /cart clear to empty your cart.",
            user.balance
        ));
        reply
    }

    async fn clear_cart(&self, user: &User) -> String {
        match self.shop.cart().clear_cart(user.id).await {
            Ok(_) => "Your shopping cart has been cleared.".to_owned(),
            Err(err) => format!("An error occurred: {err}"),
        }
    }

    async fn add_to_cart(&self, user: &User, rest: &str) -> String {
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let [_add, product_id, quantity] = parts.as_slice() else {
            return "Invalid command format. Use: /cart add <product_id> <quantity>"
                .to_owned();
        };

        let (Ok(product_id), Ok(quantity)) =
            (product_id.parse::<i64>(), quantity.parse::<i64>())
        else {
            return "Invalid product ID or quantity. Please use numbers only.".to_owned();
        };

        if quantity <= 0 {
            return "Quantity must be greater than zero.".to_owned();
        }
        let Ok(quantity) = u32::try_from(quantity) else {
            return "Invalid product ID or quantity. Please use numbers only.".to_owned();
        };

        let product = match self.shop.catalog().product(ProductId::new(product_id)).await {
            Ok(product) => product,
            Err(ShopError::ProductNotFound { id }) => {
                return format!("Product with ID {id} not found.");
            }
            Err(err) => return format!("An error occurred: {err}"),
        };

        if !product.in_stock(quantity) {
            return format!(
                "Not enough stock available. Current stock: {}",
                product.stock
            );
        }

        // Early affordability feedback; checkout re-validates atomically.
        let cart_cost = match self.shop.cart().cart_total(user).await {
            Ok(total) => total,
            Err(err) => return format!("An error occurred: {err}"),
        };
        let new_cost = cart_cost + product.price * Decimal::from(quantity);
        if new_cost > user.balance {
            return format!(
                "Insufficient balance.\nUse /coupon apply <code> to add funds to your \
                 balance.\nCurrent balance: ${}\nCurrent cart cost: ${cart_cost}",
                user.balance
            );
        }

        match self
            .shop
            .cart()
            .add_to_cart(user.id, product.id, quantity)
            .await
        {
            Ok(_) => format!(
                "{quantity}x {} added to your cart.\nUse /cart to view your cart or \
                 /cart checkout to complete your purchase.",
                product.name
            ),
            Err(err) => format!("An error occurred: {err}"),
        }
    }

    async fn checkout(&self, user: &User) -> String {
        if user.cart.is_empty() {
            return "Your shopping cart is empty. Use /products to browse available \
                    products."
                .to_owned();
        }

        match self.shop.checkout().create_order(user.id).await {
            Ok(order) => {
                let balance = self
                    .shop
                    .account()
                    .find(user.id)
                    .await
                    .map_or(Decimal::ZERO, |u| u.balance);

                let mut reply = String::from("Order placed successfully!\n\n");
                reply.push_str(&format!(
                    "Order ID: {}\nDate: {}\n\nItems:\n",
                    order.id,
                    order.created_at_display()
                ));
                for item in &order.items {
                    reply.push_str(&format!(
                        "- {}x {} (${} each)\n",
                        item.quantity, item.product_name, item.unit_price
                    ));
                }
                reply.push_str(&format!(
                    "\nTotal: ${}\nRemaining balance: ${balance}\n\nThank you for your \
                     purchase!",
                    order.total
                ));
                reply
            }
            Err(ShopError::InsufficientBalance {
                required,
                available,
            }) => format!(
                "Insufficient balance. Required: ${required}, Available: ${available}\n\
                 Use /coupon apply <code> to add funds to your balance."
            ),
            Err(ShopError::InsufficientStock {
                product,
                available,
                requested,
            }) => format!(
                "Not enough stock for {product}. Available: {available}, Requested: \
                 {requested}\nPlease update your cart with available quantities."
            ),
            Err(ShopError::EmptyCart) => "Your shopping cart is empty. Use /products to \
                                          browse available products."
                .to_owned(),
            Err(err) => format!("Error processing your order: {err}"),
        }
    }
}
