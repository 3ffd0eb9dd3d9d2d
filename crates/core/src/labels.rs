//! Localized severity labels shown on the status page.

use std::fmt;
use std::str::FromStr;

use crate::classification::Severity;
use crate::error::CoreError;

/// Label language for rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    English,
    /// Bahasa Indonesia: Aman / Siaga / Bahaya.
    Indonesian,
}

impl Locale {
    pub fn label(self, severity: Severity) -> &'static str {
        match (self, severity) {
            (Locale::English, Severity::Safe) => "safe",
            (Locale::English, Severity::Alert) => "alert",
            (Locale::English, Severity::Danger) => "danger",
            (Locale::Indonesian, Severity::Safe) => "Aman",
            (Locale::Indonesian, Severity::Alert) => "Siaga",
            (Locale::Indonesian, Severity::Danger) => "Bahaya",
        }
    }

    /// BCP 47 language tag, used for the page's `lang` attribute.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Indonesian => "id",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "id" | "indonesian" => Ok(Locale::Indonesian),
            other => Err(CoreError::Validation(format!("unsupported locale '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_labels() {
        assert_eq!(Locale::English.label(Severity::Safe), "safe");
        assert_eq!(Locale::English.label(Severity::Alert), "alert");
        assert_eq!(Locale::English.label(Severity::Danger), "danger");
    }

    #[test]
    fn indonesian_labels() {
        assert_eq!(Locale::Indonesian.label(Severity::Safe), "Aman");
        assert_eq!(Locale::Indonesian.label(Severity::Alert), "Siaga");
        assert_eq!(Locale::Indonesian.label(Severity::Danger), "Bahaya");
    }

    #[test]
    fn parses_tags() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!("id".parse::<Locale>().unwrap(), Locale::Indonesian);
        assert!("fr".parse::<Locale>().is_err());
    }
}
