//! Survey management records
//!
//! Plain records mapped from the survey, filter and directory listing
//! endpoints. Field names follow the API's camelCase payloads.

use super::ids::{FilterId, SurveyId};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layout used by the survey listing endpoint
pub const SURVEY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, SURVEY_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.with_timezone(&Utc)))
        .map_err(serde::de::Error::custom)
}

/// Survey as returned by `GET surveys`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: SurveyId,

    pub name: String,

    pub owner_id: String,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_modified: DateTime<Utc>,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub creation_date: DateTime<Utc>,

    pub is_active: bool,
}

/// Saved response filter of a survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyFilter {
    pub filter_id: FilterId,

    pub filter_name: String,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub creation_date: DateTime<Utc>,
}

/// Contact directory (XM directory)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    pub directory_id: String,

    pub name: String,

    #[serde(default)]
    pub contact_count: Option<u64>,

    #[serde(default)]
    pub is_default: Option<bool>,
}
