use serde::Deserialize;

use crate::error::DemoError;

const BUNDLED: &str = include_str!("../demos.toml");

// =============================================================================
// Demo parameters
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub prototype: HarnessSettings,
    pub visitor: VisitorSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HarnessSettings {
    pub title: String,
    pub topic: String,
    /// Title given to the clone during verification.
    pub renamed_title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisitorSettings {
    pub apples: usize,
    pub bananas: usize,
    pub oranges: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            prototype: HarnessSettings::default(),
            visitor: VisitorSettings::default(),
        }
    }
}

impl Default for HarnessSettings {
    fn default() -> Self {
        HarnessSettings {
            title: "Java book 1".to_string(),
            topic: "programming".to_string(),
            renamed_title: "Java book 2".to_string(),
        }
    }
}

impl Default for VisitorSettings {
    fn default() -> Self {
        VisitorSettings {
            apples: 2,
            bananas: 1,
            oranges: 1,
        }
    }
}

impl Settings {
    /// The parameters shipped in `demos.toml`, compiled into the binary.
    pub fn bundled() -> Result<Self, DemoError> {
        Self::from_toml_str(BUNDLED)
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, DemoError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_parameters() {
        let settings = Settings::default();
        assert_eq!(settings.prototype.title, "Java book 1");
        assert_eq!(settings.prototype.topic, "programming");
        assert_eq!(settings.prototype.renamed_title, "Java book 2");
        assert_eq!(settings.visitor.apples, 2);
    }

    #[test]
    fn test_bundled_parameters_parse_to_defaults() {
        assert_eq!(Settings::bundled().unwrap(), Settings::default());
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let toml = "[prototype]\ntitle = \"Rust book 1\"\n\n[visitor]\noranges = 5\n";
        let settings = Settings::from_toml_str(toml).unwrap();

        assert_eq!(settings.prototype.title, "Rust book 1");
        assert_eq!(settings.prototype.topic, "programming");
        assert_eq!(settings.visitor.oranges, 5);
        assert_eq!(settings.visitor.apples, 2);
    }

    #[test]
    fn test_invalid_toml_is_settings_error() {
        let result = Settings::from_toml_str("[prototype\ntitle = ");
        assert!(matches!(result, Err(DemoError::Settings(_))));
    }

    #[test]
    fn test_wrong_type_is_settings_error() {
        let result = Settings::from_toml_str("[visitor]\napples = \"many\"\n");
        assert!(matches!(result, Err(DemoError::Settings(_))));
    }
}
