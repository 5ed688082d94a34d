//! Help command - displays available commands and configuration

use colored::*;
use somnia_daily_claim::config::{
    DEFAULT_API_URL, DEFAULT_DAILY_CLAIM_TIME, DEFAULT_ONBOARDING_URL, DEFAULT_PRIVATE_KEYS_FILE,
    DEFAULT_PROXIES_FILE,
};

fn main() {
    println!("{}", "━".repeat(65).cyan().bold());
    println!("{}", "     🤖 SOMNIA DAILY CLAIM BOT - COMMANDS".cyan().bold());
    println!("{}\n", "━".repeat(65).cyan().bold());

    println!("{}\n", "📖 GETTING STARTED".yellow().bold());
    println!("  {}          Compile the project", "cargo build --release".green());
    println!("  {}              Start the interactive menu", "cargo run --release".green());
    println!("  {}   Check keys offline and list wallets", "cargo run --bin check_wallets".green());
    println!();

    println!("{}\n", "🗂  MENU OPTIONS".yellow().bold());
    println!("  1  Run one pass over every account");
    println!("  2  Repeat every 24h 1m after each pass starts");
    println!("  3  Repeat daily at DAILY_CLAIM_TIME (WIB, UTC+7)");
    println!("  4  Write a private key template");
    println!("  5  Write a proxy template");
    println!();

    println!("{}\n", "⚙️  CONFIGURATION (.env, all optional)".yellow().bold());
    let rows = [
        ("QUEST_API_URL", DEFAULT_API_URL.to_string()),
        ("QUEST_ONBOARDING_URL", DEFAULT_ONBOARDING_URL.to_string()),
        ("PRIVATE_KEYS_FILE", DEFAULT_PRIVATE_KEYS_FILE.to_string()),
        ("PROXIES_FILE", DEFAULT_PROXIES_FILE.to_string()),
        ("REQUEST_TIMEOUT_MS", "30000".to_string()),
        ("ACCOUNT_DELAY_SECS", "3".to_string()),
        ("STEP_DELAY_SECS", "1".to_string()),
        ("DAILY_CLAIM_TIME", DEFAULT_DAILY_CLAIM_TIME.to_string()),
        ("RUST_LOG", "warn".to_string()),
    ];
    for (key, default) in rows {
        println!("  {:<22} {}", key.green(), default.bright_black());
    }
    println!();

    println!("{}", "Press Ctrl+C to stop a running schedule; keys are cleared on exit.".bright_black());
}
