//! Veles demo driver - exercises the routing decision engine against the
//! reference link set (three weighted WAN links plus a backup).

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use veles::config::{init_logging, Config};
use veles::error::Result;
use veles::router::RouteOutcome;
use veles::VERSION;

/// Veles - SD-WAN edge routing decision engine
#[derive(Parser, Debug)]
#[command(
    name = "veles",
    author,
    version,
    about = "SD-WAN edge routing decision engine with SLA-aware uplink selection"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = if let Some(ref path) = cli.config {
        Config::load(path)?
    } else {
        Config::example()
    };
    config.logging.level = cli.log_level.clone();
    config.logging.color = !cli.no_color;
    init_logging(&config.logging)?;

    println!("{}", format!("Veles {VERSION} - routing demo").bright_cyan().bold());
    println!();

    let (router, links, _backup) = config.router.build()?;
    let sessions = config.demo.sessions;

    // Uniform round-robin distribution
    println!("{}", format!("Round-robin load balancing for {sessions} sessions:").bright_white().bold());
    for assignment in router.round_robin(sessions) {
        match &assignment.outcome {
            RouteOutcome::Routed(link) => {
                println!("  Session {} is routed to {}", assignment.session, link.id().to_string().green());
            }
            RouteOutcome::LinkDown(id) => {
                println!("  Session {} cannot use {}, link is down!", assignment.session, id.to_string().red());
            }
        }
    }

    // Weight-proportional distribution
    println!();
    println!("{}", format!("Weighted round-robin load balancing for {sessions} sessions:").bright_white().bold());
    for assignment in router.weighted_round_robin(sessions)? {
        if let Some(link) = assignment.outcome.routed() {
            println!("  Session {} is routed to {}", assignment.session, link.id().to_string().green());
        }
    }

    // SLA-based routing
    println!();
    println!("{}", format!("SLA-based routing ({}):", config.sla).bright_white().bold());
    match router.sla_route(&config.sla) {
        Some(link) => println!("  Application routed to {}", link.id().to_string().green()),
        None => println!("  {}", "No link available".red()),
    }

    // Failover after a link failure
    println!();
    println!("{}", "Simulating link failure and failover:".bright_white().bold());
    links[0].fail();
    report_failover(&router)?;

    // Recovery and retest
    println!();
    println!("{}", "Simulating link recovery:".bright_white().bold());
    links[0].recover();
    report_failover(&router)?;

    Ok(())
}

fn report_failover(router: &veles::router::Router) -> Result<()> {
    match router.failover()? {
        Some(backup) => println!("  Shifting all traffic to backup link {}", backup.id().to_string().yellow()),
        None => println!("  {}", "All links are operational, no need for failover.".green()),
    }
    Ok(())
}
