//! Domain identifier types with validation
//!
//! Newtype wrappers for the opaque handles the Qualtrics API hands out.
//! Identifiers are interpolated into URL paths, so besides being non-empty
//! they must not contain path separators or whitespace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn validate_segment(kind: &str, id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err(format!("{kind} cannot be empty"));
    }
    if id.contains('/') || id.contains('?') || id.chars().any(char::is_whitespace) {
        return Err(format!(
            "{kind} must be a single path segment without whitespace, got: {id}"
        ));
    }
    Ok(())
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new ", $kind, " from a string")]
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                validate_segment($kind, &id)?;
                Ok(Self(id))
            }

            #[doc = concat!("Returns the ", $kind, " as a string slice")]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

identifier!(
    /// Survey identifier, e.g. `SV_0c9ZqP7gdG4SvrD`
    ///
    /// # Examples
    ///
    /// ```
    /// use qualtrics_client::domain::ids::SurveyId;
    /// use std::str::FromStr;
    ///
    /// let survey_id = SurveyId::from_str("SV_0c9ZqP7gdG4SvrD").unwrap();
    /// assert_eq!(survey_id.as_str(), "SV_0c9ZqP7gdG4SvrD");
    /// ```
    SurveyId,
    "Survey ID"
);

identifier!(
    /// Handle for one response export job
    ///
    /// Issued by the export-initiation endpoint and reused for every
    /// progress poll of that job.
    ProgressId,
    "Progress ID"
);

identifier!(
    /// Handle for a completed export's downloadable archive
    FileId,
    "File ID"
);

identifier!(
    /// Saved response filter identifier
    FilterId,
    "Filter ID"
);
