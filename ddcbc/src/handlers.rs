use clap::ArgMatches;
use colored::Colorize;
use ddcbc_core::classify::MissingUserAgentPolicy;
use ddcbc_core::config::{DEFAULT_PORT, RelayConfig};
use ddcbc_core::relay;
use std::time::Duration;
use tracing_subscriber;
use url::Url;

/// Resolve the listening port: CLI flag first, then the PORT environment
/// variable, then the default.
pub fn resolve_port(flag: Option<u16>, env_port: Option<&str>) -> u16 {
    flag.or_else(|| env_port.and_then(|value| value.trim().parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}

pub async fn handle_serve(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let port_flag = sub_matches.get_one::<u16>("port").copied();
    let upstream = sub_matches.get_one::<Url>("upstream").unwrap();
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&8);
    let missing_ua_bot = sub_matches.get_flag("missing-ua-bot");

    let env_port = std::env::var("PORT").ok();
    let port = resolve_port(port_flag, env_port.as_deref());

    let policy = if missing_ua_bot {
        MissingUserAgentPolicy::TreatAsBot
    } else {
        MissingUserAgentPolicy::TreatAsHuman
    };

    let config = match RelayConfig::new(port, upstream.as_str()) {
        Ok(config) => config
            .with_missing_user_agent_policy(policy)
            .with_fetch_timeout(Duration::from_secs(timeout)),
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "{} Relaying {}",
        "→".blue(),
        config.upstream_origin.bright_white()
    );
    println!(
        "{} Listening on port {}",
        "→".blue(),
        config.listen_port.to_string().bright_white()
    );
    println!(
        "{} Missing User-Agent: {}",
        "→".blue(),
        match config.missing_user_agent_policy {
            MissingUserAgentPolicy::TreatAsBot => "embed page",
            MissingUserAgentPolicy::TreatAsHuman => "redirect",
        }
        .bright_white()
    );
    println!();

    if let Err(e) = relay::serve(config).await {
        eprintln!("✗ Server failed: {}", e);
        std::process::exit(1);
    }
}
