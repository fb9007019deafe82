//! Initialize command.

use console::style;

use novacrest::config::Settings;
use novacrest::repository::migrations::applied_migrations;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.prepare_database().await?;

    let applied = applied_migrations(&settings.database_url()).await?;
    println!(
        "  {} Schema at {} ({} migrations)",
        style("✓").green(),
        applied.last().map(String::as_str).unwrap_or("empty"),
        applied.len()
    );

    let categories = ctx.categories().list().await?;
    if categories.is_empty() {
        println!("{} Catalog is empty", style("!").yellow());
        println!("  Run `novacrest seed` to load the starter catalog");
    }

    println!(
        "{} Initialized novacrest in {}",
        style("✓").green(),
        settings.data_dir.display()
    );

    Ok(())
}
