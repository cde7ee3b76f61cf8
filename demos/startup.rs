use std::sync::Arc;

use bot_config::{AppContext, ConfigStore};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), bot_config::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Keep the built-in defaults if ./config.json is missing or broken
    let store = Arc::new(ConfigStore::new());
    store.load_or_default(bot_config::DEFAULT_CONFIG_FILE);

    let ctx = AppContext::builder().with_store(store).build()?;
    let config = ctx.config();

    println!("Prefix: {}", config.prefix);
    println!("Bot host: {}", config.bot_host_name);
    println!("Config admins: {}", config.roles_for("config").join(", "));

    Ok(())
}
