//! Review model and its month-granularity date type.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A user's review of a brewery.
///
/// Immutable once created except for the like/dislike counters, which only
/// ever grow by one per distinct (reviewer, review) expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub brewery_id: String,
    pub rating: u8,
    pub description: String,
    pub date: ReviewMonth,
    pub reviewer_name: String,
    pub reviewer_color: String,
    pub likes: i64,
    pub dislikes: i64,
}

/// Request body for submitting a new review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub username: String,
    pub rating: u8,
    pub description: String,
}

/// A like or dislike on a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionKind {
    Like,
    Dislike,
}

/// Request body for registering an expression on a review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionRequest {
    pub username: String,
    pub kind: ExpressionKind,
}

/// Sort order for review listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Review date at month granularity, rendered as e.g. "March 2024".
///
/// Reviews deliberately carry no finer timestamp, so listings can only
/// order reviews down to the month; ties keep their stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReviewMonth {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
}

impl ReviewMonth {
    /// The current year and month in UTC.
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// Lexicographically sortable storage key, e.g. "2024-03".
    pub fn db_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Parse a storage key produced by [`ReviewMonth::db_key`].
    pub fn from_db_key(key: &str) -> Option<Self> {
        let (year, month) = key.split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

impl fmt::Display for ReviewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", MONTH_NAMES[self.month as usize - 1], self.year)
    }
}

/// Error returned when a review date string is not "<Month> <year>".
#[derive(Debug)]
pub struct ParseReviewMonthError(String);

impl fmt::Display for ParseReviewMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid review date: {}", self.0)
    }
}

impl std::error::Error for ParseReviewMonthError {}

impl FromStr for ReviewMonth {
    type Err = ParseReviewMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(name), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseReviewMonthError(s.to_string()));
        };
        let month = MONTH_NAMES
            .iter()
            .position(|m| *m == name)
            .ok_or_else(|| ParseReviewMonthError(s.to_string()))?;
        let year = year
            .parse()
            .map_err(|_| ParseReviewMonthError(s.to_string()))?;
        Ok(Self {
            year,
            month: month as u32 + 1,
        })
    }
}

impl Serialize for ReviewMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ReviewMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
