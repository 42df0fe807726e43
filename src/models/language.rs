//! Supported interface/catalog languages.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Closed set of languages shipped with the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    El,
    Es,
    Sv,
    It,
}

impl Language {
    /// Switcher order
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::El,
        Language::Es,
        Language::Sv,
        Language::It,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::El => "el",
            Language::Es => "es",
            Language::Sv => "sv",
            Language::It => "it",
        }
    }

    /// Next language in switcher order (wraps)
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|l| l.code() == lower)
            .ok_or_else(|| ConfigError::UnsupportedLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!("EL".parse::<Language>().unwrap(), Language::El);
        assert_eq!(" sv ".parse::<Language>().unwrap(), Language::Sv);
    }

    #[test]
    fn test_parse_unknown_code() {
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_next_wraps_in_switcher_order() {
        assert_eq!(Language::En.next(), Language::El);
        assert_eq!(Language::It.next(), Language::En);
    }
}
