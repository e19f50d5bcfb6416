//! Temporal token families.
//!
//! Seven lexical families recognize the ways a chat answer labels a point in
//! time. The same token definitions drive two things: pulling `<token>: <n>`
//! points out of free text, and deciding whether a table's first column is
//! time-ordered.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::numbers::NUMBER;

const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";
const MONTH_YEAR: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?,?[ \t]+\d{4}";
const QUARTER: &str = r"Q[1-4](?:[ \t]+\d{4})?";
const WEEK: &str = r"(?:[Ww]eek|[Ww]k)[ \t]*\d{1,2}";
const WEEKDAY: &str = r"(?:Mon(?:day)?|Tue(?:s(?:day)?)?|Wed(?:nesday)?|Thu(?:r(?:s(?:day)?)?)?|Fri(?:day)?|Sat(?:urday)?|Sun(?:day)?)";
const YEAR: &str = r"(?:19|20)\d{2}";
const FULL_DATE: &str = r"(?:\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{4}|\d{2}-\d{2}-\d{4})";

/// The family a temporal token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemporalKind {
    Month,
    MonthYear,
    Quarter,
    Week,
    Weekday,
    Year,
    Date,
}

impl TemporalKind {
    /// All families, in scan order.
    pub const ALL: [TemporalKind; 7] = [
        Self::Month,
        Self::MonthYear,
        Self::Quarter,
        Self::Week,
        Self::Weekday,
        Self::Year,
        Self::Date,
    ];

    fn token(self) -> &'static str {
        match self {
            Self::Month => MONTH,
            Self::MonthYear => MONTH_YEAR,
            Self::Quarter => QUARTER,
            Self::Week => WEEK,
            Self::Weekday => WEEKDAY,
            Self::Year => YEAR,
            Self::Date => FULL_DATE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::MonthYear => "month-year",
            Self::Quarter => "quarter",
            Self::Week => "week",
            Self::Weekday => "weekday",
            Self::Year => "year",
            Self::Date => "date",
        }
    }
}

impl std::fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Compiled regexes
// ---------------------------------------------------------------------------

/// `<token>[:\s]+<number>` per family. Capture groups: `date`, `value`.
static POINT_RES: LazyLock<Vec<(TemporalKind, Regex)>> = LazyLock::new(|| {
    TemporalKind::ALL
        .iter()
        .map(|kind| {
            let pattern = [
                r"\b(?P<date>",
                kind.token(),
                r")[:\s]+(?P<value>",
                NUMBER,
                ")",
            ]
            .concat();
            let re = Regex::new(&pattern).expect("temporal point regex must compile");
            (*kind, re)
        })
        .collect()
});

/// Bare token per family, bounded on both sides. Case-insensitive, so a
/// lowercase `jan` / `mon` column still reads as time-ordered.
static TOKEN_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TemporalKind::ALL
        .iter()
        .map(|kind| {
            let pattern = [r"\b(?i:", kind.token(), r")\b"].concat();
            Regex::new(&pattern).expect("temporal token regex must compile")
        })
        .collect()
});

/// Point regexes for every family, in scan order.
pub fn point_patterns() -> &'static [(TemporalKind, Regex)] {
    &POINT_RES
}

/// True if any family's token appears anywhere in `text`.
pub fn contains_temporal_token(text: &str) -> bool {
    TOKEN_RES.iter().any(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_each_family() {
        for sample in [
            "Jan",
            "March 2024",
            "Q3",
            "Q1 2024",
            "Week 12",
            "Tuesday",
            "2023",
            "2024-01-15",
            "01/15/2024",
            "15-01-2024",
        ] {
            assert!(contains_temporal_token(sample), "{sample} should be temporal");
        }
    }

    #[test]
    fn bare_tokens_ignore_case() {
        for sample in ["jan feb mar", "MONDAY", "q2 2024", "week 4"] {
            assert!(contains_temporal_token(sample), "{sample} should be temporal");
        }
    }

    #[test]
    fn ignores_words_that_merely_start_like_months() {
        for sample in ["Marketing", "Maybe", "Common", "Enterprise", "Decision", "Sunset"] {
            assert!(!contains_temporal_token(sample), "{sample} is not temporal");
        }
    }

    #[test]
    fn month_pattern_captures_date_and_value() {
        let (_, re) = &point_patterns()[0];
        let caps = re.captures("January: 1,500").unwrap();
        assert_eq!(&caps["date"], "January");
        assert_eq!(&caps["value"], "1,500");
    }

    #[test]
    fn kinds_render_kebab_case() {
        assert_eq!(TemporalKind::MonthYear.to_string(), "month-year");
        assert_eq!(TemporalKind::Date.as_str(), "date");
    }
}
