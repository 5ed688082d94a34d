use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

/// UTC+7 (WIB). The platform's day boundary is midnight in this zone.
pub const CLAIM_ZONE_OFFSET_SECS: i32 = 7 * 3600;
pub const CLAIM_ZONE_LABEL: &str = "WIB";

pub fn claim_zone() -> FixedOffset {
    FixedOffset::east_opt(CLAIM_ZONE_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

pub fn now_in_claim_zone() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&claim_zone())
}

/// Parses an ISO-8601 timestamp. A `Z` suffix or explicit offset is
/// honoured; a timestamp without an offset is read as claim-zone local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    claim_zone().from_local_datetime(&naive).single()
}

/// Eligible unless the last claim falls on today's calendar date in the
/// claim zone. The hour of the previous claim does not matter.
pub fn can_claim(last_claim: Option<&DateTime<FixedOffset>>, now: &DateTime<FixedOffset>) -> bool {
    let zone = claim_zone();
    match last_claim {
        None => true,
        Some(last) => last.with_timezone(&zone).date_naive() != now.with_timezone(&zone).date_naive(),
    }
}

/// `dd/mm/YYYY HH:MM WIB`
pub fn format_claim_time(ts: &DateTime<FixedOffset>) -> String {
    format!(
        "{} {}",
        ts.with_timezone(&claim_zone()).format("%d/%m/%Y %H:%M"),
        CLAIM_ZONE_LABEL
    )
}
