//! # Kiosk CLI
//!
//! Reference wiring of the storefront SDK: env config, telemetry, and a
//! handful of commands exercising the request pipeline end to end.

use anyhow::{bail, Context};
use uuid::Uuid;

use kiosk_client::services::{PageQuery, ToolFilter};
use kiosk_shared::dto::{CreateOrderRequest, LoginRequest};

mod config;
mod state;
mod telemetry;

use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&telemetry::TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::info!(base_url = %config.client.base_url, "Starting Kiosk CLI");

    let api = state::build_api(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("login") => {
            let [_, email, password] = args.as_slice() else {
                bail!("usage: kiosk login <email> <password>");
            };
            let session = api
                .auth
                .login(&LoginRequest {
                    email: email.clone(),
                    password: password.clone(),
                })
                .await?;
            println!(
                "signed in as {} (balance {})",
                session.user.username, session.user.balance
            );
        }
        Some("me") => {
            let user = api.auth.me().await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Some("tools") => {
            let filter = ToolFilter {
                search: args.get(1).cloned(),
                ..ToolFilter::default()
            };
            let page = api.tools.list(&filter).await?;
            for tool in &page.items {
                println!("{}  {}  {}", tool.id, tool.name, tool.price);
            }
            println!(
                "page {}/{} ({} total)",
                page.meta.page, page.meta.total_pages, page.meta.total
            );
        }
        Some("orders") => {
            let page = api.orders.list(PageQuery::default()).await?;
            for order in &page.items {
                println!("{}  {}  {:?}", order.code, order.total_price, order.status);
            }
        }
        Some("order") => {
            let item_id: Uuid = args
                .get(1)
                .context("usage: kiosk order <item-id> [quantity]")?
                .parse()
                .context("item id must be a UUID")?;
            let quantity = args.get(2).map_or(Ok(1), |q| q.parse()).context("quantity")?;
            let receipt = api
                .orders
                .create(&CreateOrderRequest {
                    item_id,
                    quantity,
                    coupon: None,
                })
                .await?;
            println!(
                "order {} accepted ({:?}, {} due)",
                receipt.code, receipt.status, receipt.total_price
            );
        }
        Some("logout") => {
            api.auth.logout().await?;
            println!("signed out");
        }
        _ => {
            bail!("usage: kiosk <login|me|tools|orders|order|logout> [...]");
        }
    }

    Ok(())
}
