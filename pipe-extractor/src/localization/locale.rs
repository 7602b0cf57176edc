use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Result};

/// Language plus optional country, e.g. `en-GB` or `ja`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Localization {
    language_code: String,
    country_code: Option<String>,
}

impl Localization {
    #[must_use]
    pub fn new(language_code: &str, country_code: Option<&str>) -> Self {
        Self {
            language_code: language_code.to_string(),
            country_code: country_code
                .filter(|c| !c.is_empty())
                .map(ToString::to_string),
        }
    }

    /// Parse `lang`, `lang-CC` or `lang_CC`.
    pub fn from_localization_code(code: &str) -> Result<Self> {
        let parts: Vec<&str> = code.split(['-', '_']).collect();
        match parts.as_slice() {
            [language] if !language.is_empty() => Ok(Self::new(language, None)),
            [language, country] if !language.is_empty() => Ok(Self::new(language, Some(country))),
            _ => Err(ExtractionError::UnsupportedLocalization(format!(
                "not a localization code: \"{code}\""
            ))),
        }
    }

    /// Parse every code, failing on the first malformed one.
    pub fn list_from<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Self>> {
        codes
            .iter()
            .map(|code| Self::from_localization_code(code.as_ref()))
            .collect()
    }

    #[must_use]
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    #[must_use]
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    /// `lang` or `lang-CC`
    #[must_use]
    pub fn localization_code(&self) -> String {
        match &self.country_code {
            Some(country) => format!("{}-{}", self.language_code, country),
            None => self.language_code.clone(),
        }
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::new("en", Some("GB"))
    }
}

impl fmt::Display for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.localization_code())
    }
}

/// Country whose content a service should prefer (trending lists and the like).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentCountry {
    country_code: String,
}

impl ContentCountry {
    #[must_use]
    pub fn new(country_code: &str) -> Self {
        Self {
            country_code: country_code.to_string(),
        }
    }

    #[must_use]
    pub fn list_from<S: AsRef<str>>(codes: &[S]) -> Vec<Self> {
        codes.iter().map(|code| Self::new(code.as_ref())).collect()
    }

    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

impl Default for ContentCountry {
    fn default() -> Self {
        Self::new("GB")
    }
}

impl fmt::Display for ContentCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.country_code)
    }
}
