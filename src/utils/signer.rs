use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use std::str::FromStr;

use crate::error::{QuestError, QuestResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedOnboarding {
    /// EIP-55 checksummed address.
    pub wallet_address: String,
    /// `0x`-prefixed 65-byte `r || s || v` signature, v in {27, 28}.
    pub signature: String,
    pub message: String,
}

/// The exact string the platform verifies: compact JSON, no whitespace.
pub fn onboarding_message(onboarding_url: &str) -> String {
    serde_json::json!({ "onboardingUrl": onboarding_url }).to_string()
}

pub fn signer_from_key(private_key: &str) -> QuestResult<PrivateKeySigner> {
    let trimmed = private_key.trim();
    let normalized = if trimmed.starts_with("0x") {
        trimmed.to_string()
    } else {
        format!("0x{}", trimmed)
    };
    PrivateKeySigner::from_str(&normalized).map_err(|e| QuestError::InvalidKey(e.to_string()))
}

/// Derives the wallet address and signs the onboarding message with an
/// EIP-191 personal-sign prefix.
pub fn generate_signature(private_key: &str, onboarding_url: &str) -> QuestResult<SignedOnboarding> {
    let signer = signer_from_key(private_key)?;
    let message = onboarding_message(onboarding_url);
    let signature = signer
        .sign_message_sync(message.as_bytes())
        .map_err(|e| QuestError::Signing(e.to_string()))?;

    Ok(SignedOnboarding {
        wallet_address: signer.address().to_checksum(None),
        signature: format!("0x{}", hex::encode(signature.as_bytes())),
        message,
    })
}
