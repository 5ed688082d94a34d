use chrono::{DateTime, FixedOffset, Local};
use colored::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::interfaces::{Account, ClaimOutcome, PassSummary};
use crate::utils::eligibility::{format_claim_time, CLAIM_ZONE_LABEL};

const BOX_WIDTH: usize = 68;

pub struct Logger;

impl Logger {
    fn get_logs_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("logs")
    }

    fn get_log_file_name() -> PathBuf {
        let date = Local::now().format("%Y-%m-%d").to_string();
        Self::get_logs_dir().join(format!("bot-{}.log", date))
    }

    fn write_to_file(message: &str) {
        let _ = (|| -> std::io::Result<()> {
            fs::create_dir_all(Self::get_logs_dir())?;
            let timestamp = Local::now().to_rfc3339();
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(Self::get_log_file_name())?;
            file.write_all(format!("[{}] {}\n", timestamp, message).as_bytes())
        })();
    }

    /// Trims to `length` characters, ending in `...` when cut. Empty is `-`.
    pub fn shorten(text: &str, length: usize) -> String {
        if text.is_empty() {
            return "-".to_string();
        }
        if text.chars().count() <= length {
            return text.to_string();
        }
        let keep = length.saturating_sub(3);
        format!("{}...", text.chars().take(keep).collect::<String>())
    }

    /// `1234567` -> `1,234,567`
    pub fn format_thousands(value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        if value < 0 {
            format!("-{}", out)
        } else {
            out
        }
    }

    pub fn format_countdown(seconds: u64) -> String {
        format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
    }

    pub fn header(title: &str) {
        println!("\n{}", "═".repeat(70).cyan());
        println!("{}", title.cyan().bold());
        println!("{}", "═".repeat(70).cyan());
        Self::write_to_file(&format!("HEADER: {}", title));
    }

    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
        Self::write_to_file(&format!("INFO: {}", message));
    }

    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
        Self::write_to_file(&format!("SUCCESS: {}", message));
    }

    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
        Self::write_to_file(&format!("WARNING: {}", message));
    }

    pub fn error(message: &str) {
        println!("{} {}", "✗".red(), message);
        Self::write_to_file(&format!("ERROR: {}", message));
    }

    pub fn separator() {
        println!("{}", "─".repeat(70).bright_black());
    }

    pub fn clear_line() {
        print!("\r{}\r", " ".repeat(100));
        let _ = std::io::stdout().flush();
    }

    pub fn pass_banner(now: &DateTime<FixedOffset>, accounts: usize, use_proxy: bool, proxies: usize) {
        println!("\n{}", "═".repeat(70).cyan());
        println!("{}", "🚀 SOMNIA AUTO CLAIM BOT".cyan().bold());
        println!("⏰ {} {}", now.format("%d/%m/%Y %H:%M:%S"), CLAIM_ZONE_LABEL);
        println!("👥 Total Accounts: {}", accounts);
        println!(
            "🌐 Proxy: {} ({} available)",
            if use_proxy { "Yes".green() } else { "No".bright_black() },
            proxies
        );
        println!("{}\n", "═".repeat(70).cyan());
        Self::write_to_file(&format!(
            "PASS START: {} accounts, proxy={} ({} available)",
            accounts, use_proxy, proxies
        ));
    }

    fn box_row(content: &str) -> String {
        let width = content.chars().count();
        let padding = BOX_WIDTH.saturating_sub(width + 1);
        format!("│ {}{}│", content, " ".repeat(padding))
    }

    pub fn account_open(account: &Account) {
        let name = Self::shorten(&account.name, 8);
        let wallet = Self::shorten(&account.wallet_address, 12);
        println!("┌{}┐", "─".repeat(BOX_WIDTH));
        println!("{}", Self::box_row(&format!("🔹 {:<8} │ 📧 {}", name, wallet)));
        println!("├{}┤", "─".repeat(BOX_WIDTH));
    }

    /// Overwritten by the next `step_*` call.
    pub fn step_pending(message: &str) {
        print!("{}\r", Self::box_row(&format!("⏳ {}", message)));
        let _ = std::io::stdout().flush();
    }

    pub fn step_line(message: &str) {
        println!("{}", Self::box_row(message));
    }

    pub fn step_failed(account: &Account, step: &str, reason: &str) {
        let line = format!("❌ {}: {}", step, Self::shorten(reason, 48));
        println!("{}", Self::box_row(&line).red());
        Self::write_to_file(&format!("ACCOUNT {} ({}) {} FAILED: {}", account.name, account.wallet_address, step, reason));
    }

    pub fn account_close() {
        println!("└{}┘", "─".repeat(BOX_WIDTH));
    }

    pub fn profile_lines(account: &Account) {
        let profile = &account.profile;
        let username = profile.username.as_deref().unwrap_or("-");
        let discord = profile.socials.discord.as_deref().unwrap_or("-");
        Self::step_line(&format!(
            "👤 User: {:<20} │ 💬 DC: {}",
            Self::shorten(username, 20),
            Self::shorten(discord, 20)
        ));
        Self::step_line(&format!(
            "💰 Points: {:<10} │ 🔥 Streak: {}",
            Self::format_thousands(profile.points),
            profile.streak
        ));
    }

    pub fn claim_result(account: &Account, outcome: &ClaimOutcome) {
        let earned = if outcome.earned >= 0 {
            format!("+{}", Self::format_thousands(outcome.earned))
        } else {
            Self::format_thousands(outcome.earned)
        };
        let points_text = format!(
            "{} ➜ {} ➜ {}",
            Self::format_thousands(outcome.old_points),
            earned,
            Self::format_thousands(outcome.new_points)
        );
        println!("{}", Self::box_row("🎉 CLAIM SUCCESSFUL!").green().bold());
        Self::step_line(&format!("📊 Points: {}", points_text));
        Self::step_line(&format!("🔥 Streak: {}", outcome.streak));
        if outcome.booster > 0 {
            Self::step_line(&format!("⚡ Booster: {}", outcome.booster));
        }
        Self::write_to_file(&format!(
            "CLAIMED: {} ({}) points {} -> {} ({}) streak {}",
            account.name, account.wallet_address, outcome.old_points, outcome.new_points, earned, outcome.streak
        ));
    }

    pub fn already_claimed(account: &Account) {
        let profile = &account.profile;
        Self::step_line("✅ ALREADY CLAIMED TODAY");
        Self::account_close();

        println!("\n{}", "=".repeat(70));
        println!("{}", "✅ ALREADY CLAIMED TODAY".green().bold());
        println!("{}", "=".repeat(70));
        println!("🆔 Wallet Address : {}", account.wallet_address);
        println!("👤 Username       : {}", profile.username.as_deref().unwrap_or("-"));
        if let Some(discord) = &profile.socials.discord {
            println!("💬 Discord        : {}", discord);
        }
        if let Some(twitter) = &profile.socials.twitter {
            println!("🐦 Twitter        : {}", twitter);
        }
        if let Some(telegram) = &profile.socials.telegram {
            println!("✈️  Telegram       : {}", telegram);
        }
        println!("💰 Total Points   : {}", Self::format_thousands(profile.points));
        println!("🔥 Streak         : {}", profile.streak);
        println!("🎫 Referral Code  : {}", profile.referral_code.as_deref().unwrap_or("-"));
        if let Some(last) = &account.last_claim {
            println!("⏰ Last Claim     : {}", format_claim_time(last));
        }
        println!("{}\n", "=".repeat(70));

        Self::write_to_file(&format!("ALREADY CLAIMED: {} ({})", account.name, account.wallet_address));
    }

    pub fn summary(accounts: &[Account], summary: &PassSummary) {
        println!("\n{}", "═".repeat(70).cyan());
        println!("{}", "📊 SUMMARY".cyan().bold());
        println!("{}", "═".repeat(70).cyan());
        println!("✅ Claimed Today    : {} accounts", summary.claimed);
        println!("⏭️  Already Claimed  : {} accounts", summary.already_claimed);
        println!("❌ Failed          : {} accounts", summary.failed);
        if summary.ready > 0 {
            println!("⏳ Not Processed   : {} accounts", summary.ready);
        }
        println!("💰 Total Points    : {}", Self::format_thousands(summary.total_points));
        println!("{}", "═".repeat(70).cyan());

        println!(
            "\n{:<4} {:<10} {:<15} {:<15} {:<12} {:<8} {}",
            "No", "Account", "Username", "Discord", "Points", "Streak", "Status"
        );
        println!("{}", "-".repeat(90));
        for (idx, acc) in accounts.iter().enumerate() {
            println!(
                "{:<4} {:<10} {:<15} {:<15} {:<12} {:<8} {}",
                idx + 1,
                Self::shorten(&acc.name, 8),
                Self::shorten(acc.profile.username.as_deref().unwrap_or(""), 13),
                Self::shorten(acc.profile.socials.discord.as_deref().unwrap_or(""), 13),
                Self::format_thousands(acc.profile.points),
                acc.profile.streak,
                acc.status.label()
            );
        }
        println!("{}\n", "-".repeat(90));

        Self::write_to_file(&format!(
            "SUMMARY: claimed={} already={} failed={} ready={} total_points={}",
            summary.claimed, summary.already_claimed, summary.failed, summary.ready, summary.total_points
        ));
    }

    pub fn cycle_done(cycle: u64, last_run: &DateTime<FixedOffset>, next_run: Option<&DateTime<FixedOffset>>) {
        println!("\n{}", "═".repeat(70).cyan());
        println!("{}", format!("✅ Cycle #{} finished!", cycle).green().bold());
        println!("⏰ Last Claim : {} {}", last_run.format("%d/%m/%Y %H:%M:%S"), CLAIM_ZONE_LABEL);
        if let Some(next) = next_run {
            println!("⏰ Next Claim : {} {}", next.format("%d/%m/%Y %H:%M:%S"), CLAIM_ZONE_LABEL);
        }
        println!("{}\n", "═".repeat(70).cyan());
        Self::write_to_file(&format!(
            "CYCLE {} DONE: next={}",
            cycle,
            next_run.map(|n| n.to_rfc3339()).unwrap_or_else(|| "-".to_string())
        ));
    }

    pub fn countdown(remaining_secs: u64, now: &DateTime<FixedOffset>, next: &DateTime<FixedOffset>) {
        print!(
            "\r{} {} | Current: {} {} | Next Claim: {}",
            "⏳ Countdown:".cyan(),
            Self::format_countdown(remaining_secs).yellow().bold(),
            now.format("%H:%M:%S"),
            CLAIM_ZONE_LABEL,
            next.format("%d/%m %H:%M:%S")
        );
        let _ = std::io::stdout().flush();
    }
}
