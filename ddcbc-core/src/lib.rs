pub mod classify;
pub mod config;
pub mod embed;
pub mod relay;
pub mod target;

pub use classify::{MissingUserAgentPolicy, RequestKind};
pub use config::RelayConfig;

use colored::Colorize;

/// Print the DDCBC startup banner.
pub fn print_banner() {
    println!();
    println!(
        "  {}{}",
        " DD ".on_red().bright_white().bold(),
        " CBC News relay".bright_white().bold()
    );
    println!("  {}", "embeddable links for link-preview crawlers".bright_black());
    println!();
}
