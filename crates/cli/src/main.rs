use clap::Parser;
use schedule_dns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "schedule-dns")]
#[command(version)]
#[command(about = "Schedule DNS - conference talks served as DNS TXT records")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS port to answer on
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Listening address, also used to recognise our own replies
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Network interface to capture queries on
    #[arg(short = 'i', long)]
    interface: Option<String>,

    /// Schedule dataset (JSON)
    #[arg(short = 's', long, value_name = "FILE")]
    schedule: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        interface_name: cli.interface.clone(),
        schedule_path: cli.schedule.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::report_config_source(cli.config.as_deref());

    if let Some(path) = cli.write_config.as_deref() {
        config.save(path)?;
        info!(path = %path, "Configuration written");
        return Ok(());
    }

    info!("Starting Schedule DNS v{}", env!("CARGO_PKG_VERSION"));

    let store = bootstrap::load_schedule(&config)?;
    let dns_services = di::DnsServices::new(&config, store)?;

    server::start_dns_server(&config, dns_services).await?;

    info!("Server shutdown complete");
    Ok(())
}
