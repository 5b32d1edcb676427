//! Manual smoke tool: fetches the board once and prints it.
//!
//! ```sh
//! TIL_API_URL=http://localhost:54321 cargo run -p tester -- science
//! ```

use anyhow::Result;
use board::{config::Config, remote::RemoteTable, session::Session};
use facts::{Category, CategoryFilter};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();
    info!("Fetching facts from {}", config.api_url);

    let filter = match std::env::args().nth(1) {
        Some(name) => CategoryFilter::Only(name.parse::<Category>()?),
        None => CategoryFilter::All,
    };

    let fetch_limit = config.fetch_limit;
    let mut session = Session::with_limit(RemoteTable::new(&config), fetch_limit);
    session.set_filter(filter);
    session.refresh().await?;

    match session.empty_message() {
        Some(message) => println!("{message}"),
        None => {
            for fact in session.facts() {
                let disputed = if fact.is_disputed() { "[DISPUTED] " } else { "" };
                println!(
                    "{disputed}[{}] {} ({}) 👍{} 🤯{} ⛔{}",
                    fact.category,
                    fact.text,
                    fact.source,
                    fact.votes_interesting,
                    fact.votes_mindblowing,
                    fact.votes_false,
                );
            }
            println!(
                "There are {} facts in the database. Add your own!",
                session.facts().len()
            );
        }
    }

    Ok(())
}
