//! Qualtrics data centers
//!
//! A data center is the regional host segment of an account's API URL,
//! e.g. `fra1` in `https://fra1.qualtrics.com/API/v3/`.

use super::errors::QualtricsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// URL template for the v3 API, `{}` is the data center
pub const BASE_URL_TEMPLATE: &str = "https://{}.qualtrics.com/API/v3/";

/// Supported data centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataCenter {
    Fra1,
    Ca1,
    Iad1,
    Sjc1,
    Syd1,
    Gov1,
}

impl DataCenter {
    /// All supported data centers
    pub const ALL: [DataCenter; 6] = [
        DataCenter::Fra1,
        DataCenter::Ca1,
        DataCenter::Iad1,
        DataCenter::Sjc1,
        DataCenter::Syd1,
        DataCenter::Gov1,
    ];

    /// Host segment for this data center
    pub fn as_str(&self) -> &'static str {
        match self {
            DataCenter::Fra1 => "fra1",
            DataCenter::Ca1 => "ca1",
            DataCenter::Iad1 => "iad1",
            DataCenter::Sjc1 => "sjc1",
            DataCenter::Syd1 => "syd1",
            DataCenter::Gov1 => "gov1",
        }
    }

    /// API base URL, always ending in `/`
    pub fn base_url(&self) -> String {
        BASE_URL_TEMPLATE.replace("{}", self.as_str())
    }
}

impl fmt::Display for DataCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataCenter {
    type Err = QualtricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataCenter::ALL
            .iter()
            .copied()
            .find(|dc| dc.as_str() == s)
            .ok_or_else(|| QualtricsError::InvalidDataCenter(s.to_string()))
    }
}
