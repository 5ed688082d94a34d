use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use somnia_daily_claim::config::{load_env, write_private_keys_template, write_proxies_template, Env};
use somnia_daily_claim::services::{ClaimRunner, Schedule};
use somnia_daily_claim::utils::prompt::{confirm, question};
use somnia_daily_claim::utils::{load_private_keys, load_proxies, Logger, ProxyPool};

fn print_menu(env: &Env) {
    println!("{}", "=".repeat(70).cyan());
    println!("{}", "🤖 SOMNIA MULTI-ACCOUNT AUTO CLAIM BOT".cyan().bold());
    println!("{}", "=".repeat(70).cyan());
    println!("1. Run once (manual)");
    println!("2. Run with countdown (every 24h 1m)");
    println!("3. Run daily at {} WIB", env.daily_claim_time.format("%H:%M"));
    println!("4. Create {} template", env.private_keys_file);
    println!("5. Create {} template", env.proxies_file);
    println!("{}", "=".repeat(70).cyan());
}

fn create_template(path: &str, write: fn(&Path) -> Result<()>) -> Result<()> {
    let path = Path::new(path);
    if path.exists() && !confirm(&format!("⚠️  {} already exists. Overwrite?", path.display()))? {
        Logger::info("Template not written");
        return Ok(());
    }
    write(path)?;
    Logger::success(&format!("Template {} created", path.display()));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let env = Arc::new(load_env()?);

    print_menu(&env);
    let choice = question("Choose an option (1/2/3/4/5): ")?;

    let schedule = match choice.as_str() {
        "1" => Schedule::Once,
        "2" => Schedule::Cooldown,
        "3" => Schedule::Daily { at: env.daily_claim_time },
        "4" => {
            create_template(&env.private_keys_file, |p| write_private_keys_template(p))?;
            println!("💡 Put your private keys in {}", env.private_keys_file);
            println!("{}", "⚠️  NEVER SHARE THIS FILE!".red().bold());
            return Ok(());
        }
        "5" => {
            create_template(&env.proxies_file, |p| write_proxies_template(p))?;
            println!("💡 Add your proxies to {} (optional)", env.proxies_file);
            return Ok(());
        }
        _ => {
            Logger::error("Invalid choice");
            return Ok(());
        }
    };

    println!("\n📂 Loading private keys from {}...", env.private_keys_file);
    let loaded = load_private_keys(&env.private_keys_file, &env.onboarding_url);
    if loaded.accounts.is_empty() {
        Logger::error("No private keys loaded");
        println!("💡 Use option 4 to create a {} template", env.private_keys_file);
        return Ok(());
    }
    Logger::success(&format!("Loaded {} accounts", loaded.accounts.len()));
    if !loaded.skipped.is_empty() {
        Logger::warning(&format!("Skipped {} invalid key line(s)", loaded.skipped.len()));
    }

    println!("\n📂 Loading proxies from {}...", env.proxies_file);
    let proxies = ProxyPool::new(load_proxies(&env.proxies_file));
    let use_proxy = if proxies.is_empty() {
        Logger::warning("No proxies loaded, running without proxy");
        false
    } else {
        Logger::success(&format!("Loaded {} proxies", proxies.len()));
        confirm("🌐 Use proxy?")?
    };

    let run_now = if schedule.is_repeating() {
        Logger::header(match schedule {
            Schedule::Cooldown => "🤖 SOMNIA AUTO CLAIM BOT - COUNTDOWN MODE",
            _ => "🤖 SOMNIA AUTO CLAIM BOT - DAILY MODE",
        });
        println!("👥 Total Accounts: {}", loaded.accounts.len());
        println!("🌐 Proxy: {}", if use_proxy { "Enabled" } else { "Disabled" });
        confirm("🚀 Run claim now?")?
    } else {
        true
    };

    let mut runner = ClaimRunner::new(env.clone(), loaded.accounts, proxies, use_proxy);

    let interrupted = tokio::select! {
        _ = runner.run(schedule, run_now) => false,
        res = signal::ctrl_c() => {
            if let Err(err) = res {
                eprintln!("Unable to listen for shutdown signal: {}", err);
            }
            true
        }
    };

    runner.clear_private_keys();
    if interrupted {
        println!();
        Logger::warning("🛑 Bot stopped by user");
    }
    Logger::success("Done!");
    Ok(())
}
