use std::sync::{Arc, LazyLock};
use std::time::Duration;

use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use regex::Regex;

use super::patterns::{ChronoUnit, PatternsHolder, PatternsManager};
use super::{DateWrapper, Localization};
use crate::error::{ExtractionError, Result};

static RE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("invalid amount regex"));
static RE_DURATION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(\d+)\s*)?(\p{L}+)").expect("invalid duration token regex")
});

/// Separator class used when a table declares a plain space.
const SPACE_CLASS: &str = r"[ \t\x{A0}\x{2009}]";

/// Turns "3 days ago" style text into a [`DateWrapper`].
#[derive(Debug, Clone)]
pub struct TimeAgoParser {
    patterns: Arc<PatternsHolder>,
    matchers: Arc<Matchers>,
    now: DateTime<Utc>,
}

/// A phrase compiled against the table's word separator.
#[derive(Debug)]
enum PhraseMatcher {
    Substring(String),
    Token(Regex),
}

impl PhraseMatcher {
    fn new(phrase: &str, separator: &str) -> Option<Self> {
        let phrase = phrase.to_lowercase();
        if separator.is_empty() {
            return Some(Self::Substring(phrase));
        }

        let separator = if separator == " " {
            SPACE_CLASS.to_string()
        } else {
            regex::escape(separator)
        };
        let pattern = format!(
            "(?:^|{separator}){}(?:$|{separator})",
            regex::escape(&phrase)
        );
        Regex::new(&pattern).ok().map(Self::Token)
    }

    /// `text` must already be lowercased.
    fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Substring(phrase) => text.contains(phrase.as_str()),
            Self::Token(re) => re.is_match(text),
        }
    }
}

#[derive(Debug)]
struct Matchers {
    units: Vec<(ChronoUnit, Vec<PhraseMatcher>)>,
    // parallel to `PatternsHolder::special_cases`
    special_cases: Vec<Option<PhraseMatcher>>,
}

impl Matchers {
    fn compile(patterns: &PatternsHolder) -> Self {
        let separator = patterns.word_separator();
        let units = ChronoUnit::ALL
            .into_iter()
            .map(|unit| {
                let phrases = patterns
                    .phrases(unit)
                    .iter()
                    .filter_map(|phrase| PhraseMatcher::new(phrase, separator))
                    .collect();
                (unit, phrases)
            })
            .collect();
        let special_cases = patterns
            .special_cases()
            .iter()
            .map(|special| PhraseMatcher::new(&special.phrase, separator))
            .collect();

        Self {
            units,
            special_cases,
        }
    }

    fn unit(&self, unit: ChronoUnit) -> &[PhraseMatcher] {
        self.units
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, matchers)| matchers.as_slice())
            .unwrap_or_default()
    }
}

impl TimeAgoParser {
    /// Compiles every phrase of `patterns` up front.
    #[must_use]
    pub fn new(patterns: Arc<PatternsHolder>) -> Self {
        let matchers = Arc::new(Matchers::compile(&patterns));
        Self {
            patterns,
            matchers,
            now: Utc::now(),
        }
    }

    /// Pin the reference time dates are computed against.
    #[must_use]
    pub const fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternsHolder {
        &self.patterns
    }

    /// Parse a relative date.
    ///
    /// Special-case idioms win over the unit tables. Sub-day units give an
    /// exact instant; days and longer give an approximate date at midnight UTC.
    pub fn parse(&self, textual_date: &str) -> Result<DateWrapper> {
        let text = textual_date.to_lowercase();
        if let Some(special) = self
            .patterns
            .special_cases()
            .iter()
            .zip(&self.matchers.special_cases)
            .find_map(|(special, matcher)| {
                matcher.as_ref().is_some_and(|m| m.is_match(&text)).then_some(special)
            })
        {
            return self.date_ago(special.unit, special.amount);
        }

        let amount = parse_amount(textual_date);
        let unit = ChronoUnit::ALL
            .into_iter()
            .find(|unit| self.unit_matches(&text, *unit))
            .ok_or_else(|| {
                ExtractionError::parsing(format!("Unable to parse the date: {textual_date}"))
            })?;

        self.date_ago(unit, amount)
    }

    /// Parse an absolute duration such as "1h 3m" or "2 hours 5 minutes".
    ///
    /// Words that name no unit are skipped; fails when no unit was found.
    pub fn parse_duration(&self, textual_duration: &str) -> Result<Duration> {
        let mut total = Duration::ZERO;
        let mut matched = false;

        for caps in RE_DURATION_TOKEN.captures_iter(textual_duration) {
            let Some(unit) = self.unit_for_word(&caps[2]) else {
                continue;
            };
            let amount = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(1);
            total = unit
                .duration()
                .checked_mul(amount)
                .and_then(|part| total.checked_add(part))
                .ok_or_else(|| {
                    ExtractionError::parsing(format!(
                        "Duration out of range: {textual_duration}"
                    ))
                })?;
            matched = true;
        }

        if matched {
            Ok(total)
        } else {
            Err(ExtractionError::parsing(format!(
                "Unable to parse the duration: {textual_duration}"
            )))
        }
    }

    /// Whether any phrase of `unit` appears in `text`.
    #[must_use]
    pub fn matches_unit(&self, text: &str, unit: ChronoUnit) -> bool {
        self.unit_matches(&text.to_lowercase(), unit)
    }

    fn unit_matches(&self, lowered: &str, unit: ChronoUnit) -> bool {
        self.matchers
            .unit(unit)
            .iter()
            .any(|matcher| matcher.is_match(lowered))
    }

    fn unit_for_word(&self, word: &str) -> Option<ChronoUnit> {
        let word = word.to_lowercase();
        ChronoUnit::ALL.into_iter().find(|unit| {
            self.patterns
                .phrases(*unit)
                .iter()
                .any(|phrase| phrase.to_lowercase() == word)
        })
    }

    fn date_ago(&self, unit: ChronoUnit, amount: u32) -> Result<DateWrapper> {
        let now = self.now;
        let days = u64::from(amount);
        let instant = match unit {
            ChronoUnit::Seconds => {
                TimeDelta::try_seconds(i64::from(amount)).and_then(|d| now.checked_sub_signed(d))
            }
            ChronoUnit::Minutes => {
                TimeDelta::try_minutes(i64::from(amount)).and_then(|d| now.checked_sub_signed(d))
            }
            ChronoUnit::Hours => {
                TimeDelta::try_hours(i64::from(amount)).and_then(|d| now.checked_sub_signed(d))
            }
            ChronoUnit::Days => now.checked_sub_days(Days::new(days)),
            ChronoUnit::Weeks => now.checked_sub_days(Days::new(days * 7)),
            ChronoUnit::Months => now.checked_sub_months(Months::new(amount)),
            // one extra day so "1 year ago" never lands on the same calendar day a year back
            ChronoUnit::Years => now
                .checked_sub_months(Months::new(amount.saturating_mul(12)))
                .and_then(|d| d.checked_sub_days(Days::new(1))),
        }
        .ok_or_else(|| ExtractionError::parsing(format!("{amount} {unit:?} ago is out of range")))?;

        Ok(DateWrapper::new(instant, unit.is_approximate()))
    }
}

/// First digit run in the text, 1 when there is none.
fn parse_amount(text: &str) -> u32 {
    RE_AMOUNT
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1)
}

/// Parser for `localization`, falling back to its language alone.
pub fn time_ago_parser_for(localization: &Localization) -> Result<TimeAgoParser> {
    PatternsManager::patterns(localization.language_code(), localization.country_code())
        .or_else(|| PatternsManager::patterns(localization.language_code(), None))
        .map(TimeAgoParser::new)
        .ok_or_else(|| ExtractionError::UnsupportedLocalization(localization.localization_code()))
}
