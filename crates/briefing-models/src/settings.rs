//! Report configuration that steers the briefing prompt.

use serde::{Deserialize, Serialize};

/// Priority domains used when the caller supplies none.
pub const DEFAULT_PRIORITY_DOMAINS: [&str; 2] = ["example.com", "important-client.com"];

/// Priority keywords used when the caller supplies none.
pub const DEFAULT_PRIORITY_KEYWORDS: [&str; 4] = ["至急", "重要", "期限", "緊急"];

/// How much detail the generated report should carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStyle {
    #[default]
    Detailed,
    Concise,
}

impl std::fmt::Display for ReportStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detailed => write!(f, "detailed"),
            Self::Concise => write!(f, "concise"),
        }
    }
}

impl std::str::FromStr for ReportStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detailed" => Ok(Self::Detailed),
            "concise" => Ok(Self::Concise),
            other => Err(format!("unknown report style: {}", other)),
        }
    }
}

/// An inclusive span of clock hours, e.g. 9 to 18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub start: u8,
    pub end: u8,
}

impl HourRange {
    pub const fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }
}

/// Settings rendered into the guidelines block of the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfiguration {
    pub priority_domains: Vec<String>,
    pub priority_keywords: Vec<String>,
    pub working_hours: HourRange,
    pub focus_time: HourRange,
    pub report_style: ReportStyle,
}

impl Default for ReportConfiguration {
    fn default() -> Self {
        Self {
            priority_domains: DEFAULT_PRIORITY_DOMAINS.iter().map(|d| d.to_string()).collect(),
            priority_keywords: DEFAULT_PRIORITY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            working_hours: HourRange::new(9, 18),
            focus_time: HourRange::new(10, 12),
            report_style: ReportStyle::default(),
        }
    }
}

/// Caller-supplied values layered over the defaults.
///
/// `None` and empty lists leave the default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOverrides {
    pub priority_domains: Option<Vec<String>>,
    pub priority_keywords: Option<Vec<String>>,
    pub working_hours: Option<HourRange>,
    pub focus_time: Option<HourRange>,
    pub report_style: Option<ReportStyle>,
}

impl ReportConfiguration {
    /// Build a configuration from the defaults plus the given overrides.
    pub fn with_overrides(overrides: ReportOverrides) -> Self {
        let mut config = Self::default();
        config.apply(overrides);
        config
    }

    /// Apply overrides field by field, ignoring empty values.
    pub fn apply(&mut self, overrides: ReportOverrides) {
        if let Some(domains) = overrides.priority_domains.filter(|d| !d.is_empty()) {
            self.priority_domains = domains;
        }
        if let Some(keywords) = overrides.priority_keywords.filter(|k| !k.is_empty()) {
            self.priority_keywords = keywords;
        }
        if let Some(hours) = overrides.working_hours {
            self.working_hours = hours;
        }
        if let Some(focus) = overrides.focus_time {
            self.focus_time = focus;
        }
        if let Some(style) = overrides.report_style {
            self.report_style = style;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfiguration::default();
        assert_eq!(config.priority_domains, vec!["example.com", "important-client.com"]);
        assert_eq!(config.priority_keywords.len(), 4);
        assert_eq!(config.working_hours, HourRange::new(9, 18));
        assert_eq!(config.focus_time, HourRange::new(10, 12));
        assert_eq!(config.report_style, ReportStyle::Detailed);
    }

    #[test]
    fn test_overrides_replace_fields() {
        let config = ReportConfiguration::with_overrides(ReportOverrides {
            priority_domains: Some(vec!["corp.jp".into()]),
            focus_time: Some(HourRange::new(14, 16)),
            report_style: Some(ReportStyle::Concise),
            ..Default::default()
        });
        assert_eq!(config.priority_domains, vec!["corp.jp"]);
        assert_eq!(config.focus_time, HourRange::new(14, 16));
        assert_eq!(config.report_style, ReportStyle::Concise);
        // Untouched fields keep defaults
        assert_eq!(config.working_hours, HourRange::new(9, 18));
        assert_eq!(config.priority_keywords.len(), 4);
    }

    #[test]
    fn test_empty_list_override_is_ignored() {
        let config = ReportConfiguration::with_overrides(ReportOverrides {
            priority_domains: Some(vec![]),
            priority_keywords: Some(vec![]),
            ..Default::default()
        });
        assert_eq!(config, ReportConfiguration::default());
    }

    #[test]
    fn test_report_style_round_trip_text() {
        assert_eq!("concise".parse::<ReportStyle>().unwrap(), ReportStyle::Concise);
        assert_eq!(" Detailed ".parse::<ReportStyle>().unwrap(), ReportStyle::Detailed);
        assert!("verbose".parse::<ReportStyle>().is_err());
        assert_eq!(ReportStyle::Concise.to_string(), "concise");
    }
}
