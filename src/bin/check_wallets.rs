//! Offline check of the private key file: derived wallets and rejected lines

use anyhow::Result;
use colored::*;

use somnia_daily_claim::config::load_env;
use somnia_daily_claim::utils::{load_private_keys, onboarding_message};

fn main() -> Result<()> {
    let env = load_env()?;

    println!("\n🔍 WALLET CHECK\n");
    println!("{}\n", "━".repeat(65));
    println!("📋 Key file:          {}", env.private_keys_file);
    println!("📋 Signed message:    {}\n", onboarding_message(&env.onboarding_url));

    let loaded = load_private_keys(&env.private_keys_file, &env.onboarding_url);

    if loaded.accounts.is_empty() && loaded.skipped.is_empty() {
        println!("{}", "   No private keys found.".yellow());
        return Ok(());
    }

    for account in &loaded.accounts {
        println!("   {} {:<6} {}", "✅".green(), account.name, account.wallet_address);
    }
    for (line, reason) in &loaded.skipped {
        println!("   {} line {:<3} {}", "❌".red(), line, reason.bright_black());
    }

    println!("\n{}", "━".repeat(65));
    println!(
        "   {} usable, {} rejected",
        loaded.accounts.len().to_string().green().bold(),
        loaded.skipped.len().to_string().red().bold()
    );
    Ok(())
}
