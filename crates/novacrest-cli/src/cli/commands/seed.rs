//! Seed command.

use console::style;

use novacrest::config::Settings;

/// Load the starter catalog into the database.
pub async fn cmd_seed(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.prepare_database().await?;
    let report = novacrest::seed::seed(&ctx).await?;

    if report.total() == 0 {
        println!("{} Starter data already present", style("✓").green());
        return Ok(());
    }

    println!("{} Seeded database", style("✓").green());
    println!("  Categories: {}", report.categories);
    println!("  Products:   {}", report.products);
    println!("  Blogs:      {}", report.blogs);
    Ok(())
}
