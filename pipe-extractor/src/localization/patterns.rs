//! Per-language phrase tables for relative dates
//!
//! Each table maps calendar units to the words a service uses for them in
//! phrases like "3 days ago", plus a few irregular idioms ("yesterday") that
//! carry their own amount.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

/// Calendar unit a phrase resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChronoUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl ChronoUnit {
    /// Matching order used by the parser.
    pub const ALL: [Self; 7] = [
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
    ];

    /// Nominal length; a month counts as 30 days and a year as 365.
    #[must_use]
    pub const fn duration(self) -> Duration {
        let seconds = match self {
            Self::Seconds => 1,
            Self::Minutes => 60,
            Self::Hours => 3_600,
            Self::Days => 86_400,
            Self::Weeks => 604_800,
            Self::Months => 2_592_000,
            Self::Years => 31_536_000,
        };
        Duration::from_secs(seconds)
    }

    /// Units of a day or more only give the date, not the time.
    #[must_use]
    pub const fn is_approximate(self) -> bool {
        !matches!(self, Self::Seconds | Self::Minutes | Self::Hours)
    }
}

/// Irregular phrase with a fixed amount, e.g. "yesterday" = 1 day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialCase {
    pub unit: ChronoUnit,
    pub phrase: String,
    pub amount: u32,
}

/// Phrase table for one language.
#[derive(Debug, Clone, Default)]
pub struct PatternsHolder {
    word_separator: String,
    units: Vec<(ChronoUnit, Vec<String>)>,
    special_cases: Vec<SpecialCase>,
}

impl PatternsHolder {
    /// Empty table. An empty separator switches matching to substring search.
    #[must_use]
    pub fn new(word_separator: &str) -> Self {
        Self {
            word_separator: word_separator.to_string(),
            units: Vec::new(),
            special_cases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: ChronoUnit, phrases: &[&str]) -> Self {
        let phrases = phrases.iter().map(ToString::to_string);
        match self.units.iter_mut().find(|(u, _)| *u == unit) {
            Some((_, existing)) => existing.extend(phrases),
            None => self.units.push((unit, phrases.collect())),
        }
        self
    }

    #[must_use]
    pub fn with_special_case(mut self, unit: ChronoUnit, phrase: &str, amount: u32) -> Self {
        self.special_cases.push(SpecialCase {
            unit,
            phrase: phrase.to_string(),
            amount,
        });
        self
    }

    #[must_use]
    pub fn word_separator(&self) -> &str {
        &self.word_separator
    }

    #[must_use]
    pub fn phrases(&self, unit: ChronoUnit) -> &[String] {
        self.units
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, phrases)| phrases.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn special_cases(&self) -> &[SpecialCase] {
        &self.special_cases
    }
}

static BUILT_IN: LazyLock<HashMap<&'static str, Arc<PatternsHolder>>> = LazyLock::new(|| {
    use ChronoUnit::{Days, Hours, Minutes, Months, Seconds, Weeks, Years};

    let mut tables = HashMap::new();

    tables.insert(
        "en",
        PatternsHolder::new(" ")
            .with_unit(Seconds, &["second", "seconds", "sec", "secs", "s"])
            .with_unit(Minutes, &["minute", "minutes", "min", "mins", "m"])
            .with_unit(Hours, &["hour", "hours", "hr", "hrs", "h"])
            .with_unit(Days, &["day", "days", "d"])
            .with_unit(Weeks, &["week", "weeks", "wk", "wks", "w"])
            .with_unit(Months, &["month", "months", "mo"])
            .with_unit(Years, &["year", "years", "yr", "yrs", "y"])
            .with_special_case(Days, "yesterday", 1),
    );
    tables.insert(
        "de",
        PatternsHolder::new(" ")
            .with_unit(Seconds, &["Sekunde", "Sekunden"])
            .with_unit(Minutes, &["Minute", "Minuten"])
            .with_unit(Hours, &["Stunde", "Stunden"])
            .with_unit(Days, &["Tag", "Tagen"])
            .with_unit(Weeks, &["Woche", "Wochen"])
            .with_unit(Months, &["Monat", "Monaten"])
            .with_unit(Years, &["Jahr", "Jahren"])
            .with_special_case(Days, "gestern", 1)
            .with_special_case(Days, "vorgestern", 2),
    );
    tables.insert(
        "fr",
        PatternsHolder::new(" ")
            .with_unit(Seconds, &["seconde", "secondes"])
            .with_unit(Minutes, &["minute", "minutes"])
            .with_unit(Hours, &["heure", "heures"])
            .with_unit(Days, &["jour", "jours"])
            .with_unit(Weeks, &["semaine", "semaines"])
            .with_unit(Months, &["mois"])
            .with_unit(Years, &["an", "ans"])
            .with_special_case(Days, "hier", 1),
    );
    tables.insert(
        "es",
        PatternsHolder::new(" ")
            .with_unit(Seconds, &["segundo", "segundos"])
            .with_unit(Minutes, &["minuto", "minutos"])
            .with_unit(Hours, &["hora", "horas"])
            .with_unit(Days, &["día", "días"])
            .with_unit(Weeks, &["semana", "semanas"])
            .with_unit(Months, &["mes", "meses"])
            .with_unit(Years, &["año", "años"])
            .with_special_case(Days, "ayer", 1),
    );
    tables.insert(
        "pt",
        PatternsHolder::new(" ")
            .with_unit(Seconds, &["segundo", "segundos"])
            .with_unit(Minutes, &["minuto", "minutos"])
            .with_unit(Hours, &["hora", "horas"])
            .with_unit(Days, &["dia", "dias"])
            .with_unit(Weeks, &["semana", "semanas"])
            .with_unit(Months, &["mês", "meses"])
            .with_unit(Years, &["ano", "anos"])
            .with_special_case(Days, "ontem", 1),
    );
    tables.insert(
        "it",
        PatternsHolder::new(" ")
            .with_unit(Seconds, &["secondo", "secondi"])
            .with_unit(Minutes, &["minuto", "minuti"])
            .with_unit(Hours, &["ora", "ore"])
            .with_unit(Days, &["giorno", "giorni"])
            .with_unit(Weeks, &["settimana", "settimane"])
            .with_unit(Months, &["mese", "mesi"])
            .with_unit(Years, &["anno", "anni"])
            .with_special_case(Days, "ieri", 1),
    );
    tables.insert(
        "ru",
        PatternsHolder::new(" ")
            .with_unit(Seconds, &["секунду", "секунды", "секунд"])
            .with_unit(Minutes, &["минуту", "минуты", "минут"])
            .with_unit(Hours, &["час", "часа", "часов"])
            .with_unit(Days, &["день", "дня", "дней"])
            .with_unit(Weeks, &["неделю", "недели", "недель"])
            .with_unit(Months, &["месяц", "месяца", "месяцев"])
            .with_unit(Years, &["год", "года", "лет"])
            .with_special_case(Days, "вчера", 1),
    );
    tables.insert(
        "ja",
        PatternsHolder::new("")
            .with_unit(Seconds, &["秒前"])
            .with_unit(Minutes, &["分前"])
            .with_unit(Hours, &["時間前"])
            .with_unit(Days, &["日前"])
            .with_unit(Weeks, &["週間前"])
            .with_unit(Months, &["か月前"])
            .with_unit(Years, &["年前"])
            .with_special_case(Days, "昨日", 1),
    );

    tables
        .into_iter()
        .map(|(key, holder)| (key, Arc::new(holder)))
        .collect()
});

/// Lookup of the built-in phrase tables.
pub struct PatternsManager;

impl PatternsManager {
    /// Exact lookup keyed by `lang` or `lang_CC`; no fallback.
    #[must_use]
    pub fn patterns(language_code: &str, country_code: Option<&str>) -> Option<Arc<PatternsHolder>> {
        let key = match country_code {
            Some(country) if !country.is_empty() => format!("{language_code}_{country}"),
            _ => language_code.to_string(),
        };
        BUILT_IN.get(key.as_str()).cloned()
    }

    /// Keys of every built-in table.
    #[must_use]
    pub fn available() -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = BUILT_IN.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}
