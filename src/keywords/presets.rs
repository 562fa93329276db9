// Built-in keyword lists used by the hiring section of the report.

/// Day-to-day responsibilities advertised in job descriptions.
pub const RESPONSIBILITIES: &[&str] = &[
    "client relationship",
    "onboarding",
    "annual review",
    "financial plan",
    "investment research",
    "compliance",
    "reporting",
];

/// Tooling and technology mentioned in job descriptions.
pub const TOOLS: &[&str] = &[
    "excel",
    "crm",
    "database",
    "software",
    "platform",
    "technology",
];

/// A named keyword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Responsibilities,
    Tools,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Responsibilities, Preset::Tools];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Preset::Responsibilities => RESPONSIBILITIES,
            Preset::Tools => TOOLS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Responsibilities => "responsibilities",
            Preset::Tools => "tools",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named list of keywords to count together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    pub name: String,
    pub keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new(name: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            name: name.into(),
            keywords,
        }
    }

    /// Both built-in lists, responsibilities first.
    pub fn presets() -> Vec<KeywordSet> {
        Preset::ALL.into_iter().map(KeywordSet::from).collect()
    }
}

impl From<Preset> for KeywordSet {
    fn from(preset: Preset) -> Self {
        Self {
            name: preset.as_str().to_string(),
            keywords: preset.keywords().iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::counter::validate_keywords;

    #[test]
    fn presets_are_valid_keyword_lists() {
        for set in KeywordSet::presets() {
            assert!(validate_keywords(set.keywords.as_slice()).is_ok(), "{}", set.name);
            assert!(set.keywords.iter().all(|k| *k == k.to_lowercase()));
        }
    }
}
