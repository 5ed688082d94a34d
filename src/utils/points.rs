use serde_json::Value;

/// Coerces a JSON value to an integer the way the platform's mixed payloads
/// need: numbers are truncated, strings may carry thousands separators.
/// Anything else (or a failed parse) gives `default`.
pub fn safe_int(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(default),
        Some(Value::String(s)) => s.trim().replace(',', "").parse::<i64>().unwrap_or(default),
        _ => default,
    }
}

/// One way of reading a point total out of a response object.
pub type PointsRule = fn(&Value) -> Option<i64>;

macro_rules! field_rule {
    ($field:literal) => {{
        fn rule(data: &Value) -> Option<i64> {
            positive_field(data, $field)
        }
        rule as PointsRule
    }};
}

/// Field names seen across deployments, highest priority first.
pub const POINTS_RULES: &[PointsRule] = &[
    field_rule!("totalPoints"),
    field_rule!("points"),
    field_rule!("total_points"),
    field_rule!("point"),
    field_rule!("finalPoints"),
    field_rule!("accumulatedPoints"),
    field_rule!("userPoints"),
];

fn positive_field(data: &Value, field: &str) -> Option<i64> {
    let value = data.get(field).filter(|v| !v.is_null())?;
    let points = safe_int(Some(value), 0);
    (points > 0).then_some(points)
}

/// First rule yielding a positive number wins; 0 when none does.
pub fn extract_points(data: &Value) -> i64 {
    extract_with(POINTS_RULES, data)
}

pub fn extract_with(rules: &[PointsRule], data: &Value) -> i64 {
    rules.iter().find_map(|rule| rule(data)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coercion() {
        assert_eq!(safe_int(Some(&json!(42)), 0), 42);
        assert_eq!(safe_int(Some(&json!(42.9)), 0), 42);
        assert_eq!(safe_int(Some(&json!("1,234")), 0), 1234);
        assert_eq!(safe_int(Some(&json!(" 2,500,000 ")), 0), 2_500_000);
        assert_eq!(safe_int(Some(&json!("-7")), 0), -7);
        assert_eq!(safe_int(Some(&json!("12.5")), 3), 3);
        assert_eq!(safe_int(Some(&json!("abc")), 3), 3);
        assert_eq!(safe_int(Some(&json!(null)), 5), 5);
        assert_eq!(safe_int(Some(&json!({"a": 1})), 0), 0);
        assert_eq!(safe_int(None, 9), 9);
    }

    #[test]
    fn profile_with_string_total() {
        let data = json!({"totalPoints": "2,500", "streakCount": 5});
        assert_eq!(extract_points(&data), 2500);
        assert_eq!(safe_int(data.get("streakCount"), 0), 5);
    }

    #[test]
    fn priority_order_wins() {
        let data = json!({"points": 10, "totalPoints": 20, "userPoints": 30});
        assert_eq!(extract_points(&data), 20);
    }

    #[test]
    fn zero_null_and_garbage_fall_through() {
        let data = json!({
            "totalPoints": 0,
            "points": null,
            "total_points": "n/a",
            "point": -4,
            "finalPoints": "1,050"
        });
        assert_eq!(extract_points(&data), 1050);
    }

    #[test]
    fn nothing_qualifies() {
        assert_eq!(extract_points(&json!({"streakCount": 3})), 0);
        assert_eq!(extract_points(&json!({"points": 0})), 0);
        assert_eq!(extract_points(&json!([1, 2, 3])), 0);
    }

    #[test]
    fn custom_rule_lists() {
        fn nested(data: &Value) -> Option<i64> {
            data.get("stats").and_then(|s| positive_field(s, "points"))
        }
        let rules: &[PointsRule] = &[nested, field_rule!("points")];
        assert_eq!(extract_with(rules, &json!({"stats": {"points": 8}, "points": 2})), 8);
        assert_eq!(extract_with(rules, &json!({"points": 2})), 2);
    }
}
