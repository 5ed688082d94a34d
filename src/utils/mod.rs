pub mod logger;
pub mod loader;
pub mod signer;
pub mod points;
pub mod eligibility;
pub mod quest_client;
pub mod prompt;

// Re-export commonly used items
pub use logger::Logger;
pub use loader::{load_private_keys, load_proxies, read_entries, LoadedAccounts, ProxyPool};
pub use signer::{generate_signature, onboarding_message, SignedOnboarding};
pub use points::{extract_points, safe_int};
pub use eligibility::{can_claim, claim_zone, now_in_claim_zone, parse_timestamp};
pub use quest_client::QuestClient;
