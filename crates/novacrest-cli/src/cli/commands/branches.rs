//! Branch listing command.

use console::style;

use novacrest::config::Settings;

pub fn cmd_branches(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let branches = settings.branches.branches();

    if json {
        println!("{}", serde_json::to_string_pretty(branches)?);
        return Ok(());
    }

    if branches.is_empty() {
        println!("{} No branches configured", style("!").yellow());
        return Ok(());
    }

    println!("{:<4} {:<28} {:>10} {:>10}", "ID", "NAME", "LAT", "LON");
    for b in branches {
        println!(
            "{:<4} {:<28} {:>10.4} {:>10.4}",
            b.id, b.name, b.location.latitude, b.location.longitude
        );
    }
    Ok(())
}
