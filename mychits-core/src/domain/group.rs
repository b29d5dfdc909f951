//! Chit group models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use super::amount::CurrencyAmount;

/// A chit group offered by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChitGroup {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "group_name")]
    pub name: String,
    #[serde(default, alias = "group_value")]
    pub group_value: CurrencyAmount,
    #[serde(default, alias = "group_install")]
    pub installment: CurrencyAmount,
    #[serde(default, alias = "group_members")]
    pub members: Option<u32>,
    #[serde(default, alias = "group_duration")]
    pub duration_months: Option<u32>,
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,
}

/// A group the current user holds tickets in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledGroup {
    pub group: ChitGroup,
    #[serde(default)]
    pub tickets: Vec<String>,
    /// Filled by a per-group follow-up request; missing if that request failed
    #[serde(default)]
    pub amount_paid: CurrencyAmount,
}

/// Wire shape of one enrollment as returned by the backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    #[serde(alias = "group_id")]
    pub group: ChitGroup,
    #[serde(default, alias = "tickets", deserialize_with = "deserialize_tickets")]
    pub ticket_numbers: Vec<String>,
}

impl From<EnrollmentRecord> for EnrolledGroup {
    fn from(record: EnrollmentRecord) -> Self {
        Self {
            group: record.group,
            tickets: record.ticket_numbers,
            amount_paid: CurrencyAmount::Missing,
        }
    }
}

/// Paid-so-far summary for one group
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidSummary {
    #[serde(default, alias = "total_paid", alias = "totalPaidAmount")]
    pub total_paid: CurrencyAmount,
}

/// Successful login or registration payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "userId", alias = "_id", deserialize_with = "deserialize_id")]
    pub user_id: String,
}

/// IDs arrive as strings or numbers
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Tickets arrive as a list, a single value, or null
fn deserialize_tickets<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    let scalar = |v: &JsonValue| match v {
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::String(s) => Some(s.clone()),
        _ => None,
    };
    Ok(match value {
        Some(JsonValue::Array(items)) => items.iter().filter_map(scalar).collect(),
        Some(other) => scalar(&other).into_iter().collect(),
        None => Vec::new(),
    })
}
