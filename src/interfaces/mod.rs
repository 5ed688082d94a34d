use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;
use zeroize::Zeroize;

/// Placeholder written over a private key once it is no longer needed.
pub const CLEARED_KEY: &str = "CLEARED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Ready,
    Claimed,
    AlreadyClaimed,
    Failed,
}

impl AccountStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AccountStatus::Claimed => "✅ Claimed",
            AccountStatus::AlreadyClaimed => "⏭️  Already",
            AccountStatus::Failed => "❌ Failed",
            AccountStatus::Ready => "⏳ Ready",
        }
    }
}

/// One configured wallet identity and everything the platform told us about it.
#[derive(Clone)]
pub struct Account {
    pub name: String,
    pub wallet_address: String,
    pub signature: String,
    pub private_key: String,
    pub token: Option<String>,
    pub status: AccountStatus,
    pub profile: Profile,
    pub last_claim: Option<DateTime<FixedOffset>>,
}

impl Account {
    pub fn new(name: String, wallet_address: String, signature: String, private_key: String) -> Self {
        Self {
            name,
            wallet_address,
            signature,
            private_key,
            token: None,
            status: AccountStatus::Ready,
            profile: Profile::default(),
            last_claim: None,
        }
    }

    /// Best-effort scrub: zeroes the current buffer and replaces it with
    /// the sentinel. Copies made earlier are not reachable from here.
    pub fn clear_private_key(&mut self) {
        self.private_key.zeroize();
        self.private_key = CLEARED_KEY.to_string();
    }

    pub fn is_key_cleared(&self) -> bool {
        self.private_key == CLEARED_KEY
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("wallet_address", &self.wallet_address)
            .field("status", &self.status)
            .field("has_token", &self.token.is_some())
            .field("profile", &self.profile)
            .field("last_claim", &self.last_claim)
            .finish()
    }
}

/// Fields extracted from `GET /users/me`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub referral_code: Option<String>,
    pub is_bot: Option<bool>,
    pub socials: Socials,
    pub points: i64,
    pub streak: i64,
    pub last_gm_at: Option<String>,
    pub next_login: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Socials {
    pub discord: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
}

/// Result of a successful `POST /users/gm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub old_points: i64,
    pub new_points: i64,
    /// `new_points - old_points`, reported as-is even when negative.
    /// Saturates at the `i64` bounds.
    pub earned: i64,
    pub streak: i64,
    pub booster: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardRequest<'a> {
    pub signature: &'a str,
    pub wallet_address: &'a str,
}

/// Counts reported at the end of a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub claimed: usize,
    pub already_claimed: usize,
    pub failed: usize,
    pub ready: usize,
    pub total_points: i64,
}

impl PassSummary {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        accounts.iter().fold(Self::default(), |mut summary, account| {
            match account.status {
                AccountStatus::Claimed => summary.claimed += 1,
                AccountStatus::AlreadyClaimed => summary.already_claimed += 1,
                AccountStatus::Failed => summary.failed += 1,
                AccountStatus::Ready => summary.ready += 1,
            }
            summary.total_points = summary.total_points.saturating_add(account.profile.points);
            summary
        })
    }
}
