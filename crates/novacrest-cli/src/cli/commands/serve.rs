//! Web server command.

use console::style;

use novacrest::config::Settings;

const DEFAULT_PORT: u16 = 5000;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind)?;

    println!("{} Running database migrations...", style("→").cyan());
    if let Err(e) = settings.prepare_database().await {
        eprintln!("  {} Migration failed: {}", style("✗").red(), e);
        return Err(anyhow::anyhow!("Database migration failed: {}", e));
    }
    println!("  {} Database ready", style("✓").green());

    println!(
        "{} Starting novacrest server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!(
        "  {} branches, geocoding via {}",
        settings.branches.len(),
        settings.geocoder.base_url
    );
    println!("  Press Ctrl+C to stop");

    novacrest_server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "5000" -> 127.0.0.1:5000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:5000
/// - Host and port: "0.0.0.0:5000" -> 0.0.0.0:5000
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    let bind = bind.trim();
    if bind.is_empty() {
        anyhow::bail!("Empty bind address");
    }

    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    Ok((bind.to_string(), DEFAULT_PORT))
}
