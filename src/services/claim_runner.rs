use std::sync::Arc;
use tokio::time::sleep;

use crate::config::Env;
use crate::interfaces::{Account, AccountStatus, PassSummary};
use crate::services::scheduler::{wait_until, Schedule};
use crate::utils::eligibility::{can_claim, now_in_claim_zone, parse_timestamp};
use crate::utils::logger::Logger;
use crate::utils::quest_client::{parse_claim, parse_profile, QuestClient};
use crate::utils::ProxyPool;

/// Owns the account list and drives login -> profile -> eligibility -> claim
/// for each account in order. Accounts are never processed concurrently.
pub struct ClaimRunner {
    env: Arc<Env>,
    accounts: Vec<Account>,
    proxies: ProxyPool,
    use_proxy: bool,
}

impl ClaimRunner {
    pub fn new(env: Arc<Env>, accounts: Vec<Account>, proxies: ProxyPool, use_proxy: bool) -> Self {
        Self {
            env,
            accounts,
            use_proxy: use_proxy && !proxies.is_empty(),
            proxies,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn uses_proxy(&self) -> bool {
        self.use_proxy
    }

    pub fn summary(&self) -> PassSummary {
        PassSummary::from_accounts(&self.accounts)
    }

    /// One pass over every account followed by the summary table.
    pub async fn run_pass(&mut self) -> PassSummary {
        Logger::pass_banner(&now_in_claim_zone(), self.accounts.len(), self.use_proxy, self.proxies.len());

        for index in 0..self.accounts.len() {
            if index > 0 {
                Logger::separator();
                sleep(self.env.account_delay()).await;
            }
            let proxy = if self.use_proxy {
                self.proxies.choose().map(|p| p.to_string())
            } else {
                None
            };
            process_account(&self.env, proxy.as_deref(), &mut self.accounts[index]).await;
        }

        let summary = self.summary();
        Logger::summary(&self.accounts, &summary);
        summary
    }

    /// Runs passes according to `schedule`. Repeating schedules never
    /// return; cancel by dropping the future.
    pub async fn run(&mut self, schedule: Schedule, run_now: bool) {
        if !schedule.is_repeating() {
            self.run_pass().await;
            return;
        }

        let mut cycle: u64 = 1;
        let mut next = if run_now {
            None
        } else {
            schedule.first_trigger(now_in_claim_zone())
        };

        loop {
            if let Some(target) = next {
                wait_until(target).await;
            }

            Logger::header(&format!("🔄 CYCLE #{}", cycle));
            let started = now_in_claim_zone();
            self.run_pass().await;

            next = schedule.next_trigger(started, now_in_claim_zone());
            Logger::cycle_done(cycle, &started, next.as_ref());
            cycle += 1;
        }
    }

    pub fn clear_private_keys(&mut self) {
        for account in &mut self.accounts {
            account.clear_private_key();
        }
    }
}

/// One claim cycle for one account. Every failure is local: the account is
/// marked failed and the caller moves on.
pub async fn process_account(env: &Env, proxy: Option<&str>, account: &mut Account) {
    account.status = AccountStatus::Ready;
    account.token = None;
    Logger::account_open(account);

    let mut client = match QuestClient::new(env, proxy) {
        Ok(client) => client,
        Err(e) => {
            fail(account, "Session setup failed", &e.short_message());
            return;
        }
    };
    if let Some(proxy) = client.proxy() {
        tracing::debug!(account = %account.name, proxy, "using proxy");
    }

    Logger::step_pending("Logging in...");
    match client.onboard(&account.signature, &account.wallet_address).await {
        Ok(token) => account.token = Some(token),
        Err(e) => {
            fail(account, "Login failed", &e.short_message());
            return;
        }
    }

    sleep(env.step_delay()).await;

    Logger::step_pending("Getting info...");
    match client.get_user_info().await {
        Ok(data) => {
            let profile = parse_profile(&data);
            // Eligibility follows this fetch only.
            account.last_claim = match profile.last_gm_at.as_deref() {
                Some(last) => {
                    let parsed = parse_timestamp(last);
                    if parsed.is_none() {
                        tracing::warn!(account = %account.name, last, "unparseable lastGmAt");
                    }
                    parsed
                }
                None => None,
            };
            account.profile = profile;
        }
        Err(e) => {
            fail(account, "Get info failed", &e.short_message());
            return;
        }
    }
    Logger::profile_lines(account);

    sleep(env.step_delay()).await;

    if !can_claim(account.last_claim.as_ref(), &now_in_claim_zone()) {
        account.status = AccountStatus::AlreadyClaimed;
        Logger::already_claimed(account);
        return;
    }

    Logger::step_pending("Claiming...");
    match client.claim_gm().await {
        Ok(data) => {
            let outcome = parse_claim(&data, account.profile.points);
            account.profile.points = outcome.new_points;
            account.profile.streak = outcome.streak;
            account.last_claim = Some(now_in_claim_zone());
            account.status = AccountStatus::Claimed;
            Logger::claim_result(account, &outcome);
        }
        Err(e) => {
            fail(account, "Claim failed", &e.short_message());
            return;
        }
    }
    Logger::account_close();
}

fn fail(account: &mut Account, step: &str, reason: &str) {
    Logger::step_failed(account, step, reason);
    Logger::account_close();
    account.status = AccountStatus::Failed;
}
