use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::config::Env;
use crate::error::{QuestError, QuestResult};
use crate::interfaces::{ClaimOutcome, OnboardRequest, Profile, Socials};
use crate::utils::points::{extract_points, safe_int};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/141.0.0.0 Safari/537.36";
const MAX_ERROR_LEN: usize = 100;

/// HTTP session for one account. The bearer credential is empty until a
/// successful login and is only ever attached to authenticated calls.
pub struct QuestClient {
    http: Client,
    api_url: String,
    token: Option<String>,
    proxy: Option<String>,
}

impl QuestClient {
    pub fn new(env: &Env, proxy: Option<&str>) -> QuestResult<Self> {
        let mut builder = Client::builder()
            .timeout(env.request_timeout())
            .default_headers(default_headers(&env.onboarding_url));

        builder = match proxy {
            Some(proxy_url) => builder.proxy(reqwest::Proxy::all(proxy_url)?),
            // Direct connection; ignore system proxy variables.
            None => builder.no_proxy(),
        };

        Ok(Self {
            http: builder.build()?,
            api_url: env.api_url.clone(),
            token: None,
            proxy: proxy.map(|p| p.to_string()),
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> QuestResult<RequestBuilder> {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(request.header(AUTHORIZATION, format!("Bearer {}", token))),
            _ => Err(QuestError::NotAuthenticated),
        }
    }

    /// `POST /auth/onboard`. Any previous credential is dropped first, so a
    /// failed login leaves the session unauthenticated.
    pub async fn onboard(&mut self, signature: &str, wallet_address: &str) -> QuestResult<String> {
        self.clear_token();

        let signature = if signature.starts_with("0x") {
            signature.to_string()
        } else {
            format!("0x{}", signature)
        };
        let body = OnboardRequest {
            signature: &signature,
            wallet_address,
        };

        let url = self.url("/auth/onboard");
        tracing::debug!(%url, wallet = wallet_address, "onboarding");
        let response = self.http.post(&url).json(&body).send().await?;
        let data = expect_ok(response).await?;

        let token = data
            .get("token")
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .ok_or(QuestError::MissingToken)?
            .to_string();
        self.token = Some(token.clone());
        Ok(token)
    }

    /// `GET /users/me`
    pub async fn get_user_info(&self) -> QuestResult<Value> {
        let url = self.url("/users/me");
        tracing::debug!(%url, "fetching profile");
        let response = self.authorized(self.http.get(&url))?.send().await?;
        expect_ok(response).await
    }

    /// `POST /users/gm` with an empty body.
    pub async fn claim_gm(&self) -> QuestResult<Value> {
        let url = self.url("/users/gm");
        tracing::debug!(%url, "claiming daily gm");
        let response = self.authorized(self.http.post(&url))?.send().await?;
        expect_ok(response).await
    }
}

fn default_headers(onboarding_url: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.6"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(HeaderName::from_static("sec-fetch-mode"), HeaderValue::from_static("cors"));
    headers.insert(HeaderName::from_static("sec-fetch-site"), HeaderValue::from_static("same-origin"));

    let origin = onboarding_url.trim_end_matches('/');
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(ORIGIN, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("{}/", origin)) {
        headers.insert(REFERER, value);
    }
    headers
}

/// Reads the body and turns anything but 200 into `QuestError::Http`.
async fn expect_ok(response: Response) -> QuestResult<Value> {
    let status = response.status();
    let text = response.text().await?;
    tracing::debug!(status = status.as_u16(), "response received");

    if status != StatusCode::OK {
        return Err(QuestError::Http {
            status,
            message: error_message(status, &text),
        });
    }
    Ok(serde_json::from_str(&text)?)
}

/// JSON `message` field, else the raw body (truncated), else `HTTP <code>`.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(data) = serde_json::from_str::<Value>(body) {
        if let Some(message) = data.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed.chars().take(MAX_ERROR_LEN).collect()
    }
}

fn string_field(data: &Value, field: &str) -> Option<String> {
    match data.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn social_username(socials: &Value, network: &str) -> Option<String> {
    socials.get(network).and_then(|s| string_field(s, "username"))
}

/// Pulls the fields we care about out of a `/users/me` payload. Missing or
/// mistyped fields become `None` / 0.
pub fn parse_profile(data: &Value) -> Profile {
    let socials = match data.get("socials") {
        Some(s) if s.is_object() => Socials {
            discord: social_username(s, "discord"),
            twitter: social_username(s, "twitter"),
            telegram: social_username(s, "telegram"),
        },
        _ => Socials::default(),
    };

    Profile {
        user_id: string_field(data, "id"),
        username: string_field(data, "username"),
        referral_code: string_field(data, "referralCode"),
        is_bot: data.get("isBot").and_then(|v| v.as_bool()),
        socials,
        points: extract_points(data),
        streak: safe_int(data.get("streakCount"), 0),
        last_gm_at: string_field(data, "lastGmAt"),
        next_login: string_field(data, "nextLogin"),
    }
}

/// Reads a `/users/gm` success payload. `finalPoints` is preferred; when it
/// is absent or zero the generic points rules are tried.
pub fn parse_claim(data: &Value, old_points: i64) -> ClaimOutcome {
    let mut new_points = safe_int(data.get("finalPoints"), 0);
    if new_points == 0 {
        new_points = extract_points(data);
    }
    ClaimOutcome {
        old_points,
        new_points,
        earned: new_points.saturating_sub(old_points),
        streak: safe_int(data.get("streakCount"), 0),
        booster: safe_int(data.get("dailyBooster"), 0),
    }
}
