//! Order wizard binary
//!
//! Walks one ordering session through every screen against console-backed
//! ports.

use anyhow::Context;
use cupcake_core::environment::SystemClock;
use cupcake_order::{
    ConsoleShareTarget, OrderConfig, OrderEnvironment, OrderFlow, ShareOutcome, TracingNavigator,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cupcake=debug,cupcake_order=debug,cupcake_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = OrderConfig::from_env().context("loading order configuration")?;
    let env = OrderEnvironment::from_config(Arc::new(SystemClock), config);
    let flow = OrderFlow::open(env, Arc::new(ConsoleShareTarget), Arc::new(TracingNavigator));

    let currency = flow.store().environment().config.currency.clone();
    flow.store().observe(move |order| {
        tracing::info!(
            quantity = order.quantity(),
            flavor = order.flavor(),
            pickup = order.pickup_date(),
            total = %order.price_display(&currency),
            "Order changed"
        );
    });

    let choices = flow.quantity_choices().to_vec();
    println!(
        "Quantities: {}",
        choices.iter().map(u32::to_string).collect::<Vec<_>>().join(", ")
    );
    let quantity = choices.iter().copied().max().unwrap_or(1);
    flow.start_order(i64::from(quantity)).await?;

    println!("Flavors: {}", flow.flavors().join(", "));
    flow.choose_flavor("Chocolate").await?;
    flow.next_from_flavor().await?;

    let options = flow.pickup_options().await;
    println!("Pickup options: {}", options.join(", "));

    if let Some(tomorrow) = options.get(1) {
        flow.choose_pickup_date(tomorrow).await?;
    }
    flow.next_from_pickup();

    println!("Total: {}", flow.price_text().await);
    match flow.send_order().await? {
        ShareOutcome::Shared => println!("Order sent."),
        ShareOutcome::NoHandler => println!("No app available to send the order."),
    }

    let snapshot = flow.snapshot().await;
    println!(
        "Snapshot: {}",
        serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?
    );

    flow.cancel_order().await?;
    println!("After cancel, total: {}", flow.price_text().await);

    Ok(())
}
