//! # Analysis Result Model
//!
//! Typed form of a validated project analysis. A value of these types only
//! exists after the candidate passed structural validation, so downstream
//! consumers destructure it without further existence checks beyond the
//! `Option` markers the schema itself declares.
//!
//! Wire names are camelCase (the generator is prompted for camelCase JSON);
//! Rust fields are snake_case via serde renames.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AnalysisError;

/// Generator self-reported confidence in the tech stack identification.
///
/// A closed enumeration — any other string is a structural violation, never
/// an open-ended label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Stack identified from authoritative files (lockfiles, manifests).
    High,
    /// Stack inferred from partial evidence.
    Medium,
    /// Stack guessed from weak signals (file extensions, naming).
    Low,
}

impl Confidence {
    /// Returns all confidence levels in descending order.
    pub fn all_levels() -> &'static [Confidence] {
        &[Self::High, Self::Medium, Self::Low]
    }

    /// Returns the lowercase string identifier for this level.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = AnalysisError;

    /// Parse a confidence level from its lowercase identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(AnalysisError::UnknownConfidence(other.to_string())),
        }
    }
}

/// Identified technology composition of the analyzed project.
///
/// All fields are required when this section is present; the sequence
/// fields may be empty when the analysis found nothing for that axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStack {
    /// Programming languages, most prominent first.
    pub languages: Vec<String>,
    /// Application frameworks and major libraries.
    pub frameworks: Vec<String>,
    /// The package manager in use (e.g. "npm", "cargo", "pip").
    pub package_manager: String,
    /// Build tools (bundlers, compilers, task runners).
    pub build_tools: Vec<String>,
    /// Test frameworks and runners.
    pub test_frameworks: Vec<String>,
    /// Databases and data stores referenced by the project.
    pub databases: Vec<String>,
    /// Infrastructure and deployment tooling (containers, CI, cloud).
    pub infrastructure: Vec<String>,
    /// How confident the generator is in this identification.
    pub confidence: Confidence,
}

/// Dev server coordinates discovered in the project configuration.
///
/// Both keys are required when the record form is used; each value is
/// independently nullable when only one coordinate could be determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevServer {
    /// Base URL the dev server listens on, if known.
    pub url: Option<String>,
    /// TCP port the dev server listens on, if known.
    pub port: Option<u16>,
}

/// Three-state dev server field.
///
/// The wire format distinguishes "the analysis said nothing about a dev
/// server" (key absent) from "the analysis determined there is none"
/// (explicit `null`) from "a dev server was found" (record). Collapsing
/// the first two would turn silence into a finding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DevServerField {
    /// The key was absent — no finding either way.
    #[default]
    Absent,
    /// Explicit `null` — the analysis concluded there is no dev server.
    Disabled,
    /// A dev server record was found.
    Configured(DevServer),
}

impl DevServerField {
    /// Returns true if the key was absent from the candidate.
    pub fn is_absent(&self) -> bool {
        matches!(self, DevServerField::Absent)
    }

    /// Returns the dev server record, if one was found.
    pub fn as_configured(&self) -> Option<&DevServer> {
        match self {
            DevServerField::Configured(ds) => Some(ds),
            _ => None,
        }
    }
}

impl Serialize for DevServerField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Absent is normally skipped at the field level; if forced to
            // serialize, the closest wire form is null.
            DevServerField::Absent | DevServerField::Disabled => serializer.serialize_none(),
            DevServerField::Configured(ds) => ds.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for DevServerField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A present key deserializes here: null becomes Disabled, a record
        // becomes Configured. Absent is produced by #[serde(default)].
        let inner = Option::<DevServer>::deserialize(deserializer)?;
        Ok(match inner {
            None => DevServerField::Disabled,
            Some(ds) => DevServerField::Configured(ds),
        })
    }
}

/// Discovered build/run/test automation.
///
/// Every field is independently optional; a record with zero populated
/// fields is a valid "no build-system findings" result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildSystem {
    /// Commands that start the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_commands: Option<Vec<String>>,
    /// Commands that produce a build artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_commands: Option<Vec<String>>,
    /// Commands that run the test suite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_commands: Option<Vec<String>>,
    /// Commands that run linters or formatters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint_commands: Option<Vec<String>>,
    /// Other labeled commands (label → command line). Unordered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_commands: Option<BTreeMap<String, String>>,
    /// Dev server coordinates; see [`DevServerField`] for the three states.
    #[serde(default, skip_serializing_if = "DevServerField::is_absent")]
    pub dev_server: DevServerField,
    /// Free-form notes about the build setup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Debugger discoverability for the analyzed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebuggerConfig {
    /// Whether a debugger configuration was found.
    pub available: bool,
    /// Debugger kind (e.g. "lldb", "node --inspect"), if identified.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub debugger_type: Option<String>,
    /// How to attach or launch it, if documented.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Logging setup discovered in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSetup {
    /// The logging library in use.
    pub library: String,
    /// Log levels the project configures or emits.
    pub levels: Vec<String>,
    /// Where logs end up (file path, stdout, service), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Error tracking service discovered in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorTracking {
    /// The error tracking service (e.g. "sentry").
    pub service: String,
    /// Whether the integration appears configured and active.
    pub configured: bool,
}

/// Profiling tooling discovered in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profiling {
    /// Whether profiling tooling was found.
    pub available: bool,
    /// The profiling tools identified.
    pub tools: Vec<String>,
}

/// Discovered debugging and observability surface.
///
/// `debugger_config`, `common_issues`, and `tips` are required whenever
/// this section is present; the three sub-records are each optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebuggingTools {
    /// Debugger discoverability — always reported, even as "not available".
    pub debugger_config: DebuggerConfig,
    /// Logging setup, if one was identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingSetup>,
    /// Error tracking integration, if one was identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_tracking: Option<ErrorTracking>,
    /// Profiling tooling, if any was identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiling: Option<Profiling>,
    /// Known failure modes of this project. May be empty.
    pub common_issues: Vec<String>,
    /// Debugging tips specific to this project. May be empty.
    pub tips: Vec<String>,
}

/// The top-level validated analysis result.
///
/// Each section models a logically separate facet of the analysis and is
/// independently optional — partial knowledge in one facet never blocks
/// acceptance of another facet's findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    /// Identified technology composition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<TechStack>,
    /// Discovered build/run/test automation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_system: Option<BuildSystem>,
    /// Discovered debugging and observability surface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debugging_tools: Option<DebuggingTools>,
    /// Free-form structural summary (markdown).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_structure: Option<String>,
}

impl ProjectAnalysis {
    /// Returns true if the analysis produced no findings at all.
    pub fn is_empty(&self) -> bool {
        self.tech_stack.is_none()
            && self.build_system.is_none()
            && self.debugging_tools.is_none()
            && self.project_structure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confidence_as_str_roundtrip() {
        for level in Confidence::all_levels() {
            let parsed: Confidence = level.as_str().parse().unwrap();
            assert_eq!(*level, parsed);
        }
    }

    #[test]
    fn test_confidence_from_str_invalid() {
        assert!("certain".parse::<Confidence>().is_err());
        assert!("High".parse::<Confidence>().is_err()); // case-sensitive
        assert!("".parse::<Confidence>().is_err());
    }

    #[test]
    fn test_confidence_serde_format_matches_as_str() {
        for level in Confidence::all_levels() {
            let json = serde_json::to_string(level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.as_str()));
        }
    }

    #[test]
    fn test_dev_server_field_absent_skipped() {
        let bs = BuildSystem {
            notes: Some("no build tool found".to_string()),
            ..BuildSystem::default()
        };
        let value = serde_json::to_value(&bs).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("devServer"));
        assert_eq!(obj.get("notes"), Some(&json!("no build tool found")));
    }

    #[test]
    fn test_dev_server_field_disabled_serializes_null() {
        let bs = BuildSystem {
            dev_server: DevServerField::Disabled,
            ..BuildSystem::default()
        };
        let value = serde_json::to_value(&bs).unwrap();
        assert_eq!(value.get("devServer"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_dev_server_field_configured_serializes_record() {
        let bs = BuildSystem {
            dev_server: DevServerField::Configured(DevServer {
                url: Some("http://localhost:5173".to_string()),
                port: Some(5173),
            }),
            ..BuildSystem::default()
        };
        let value = serde_json::to_value(&bs).unwrap();
        assert_eq!(value["devServer"]["url"], "http://localhost:5173");
        assert_eq!(value["devServer"]["port"], 5173);
    }

    #[test]
    fn test_dev_server_field_deserialize_states() {
        let absent: BuildSystem = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.dev_server, DevServerField::Absent);

        let disabled: BuildSystem =
            serde_json::from_value(json!({ "devServer": null })).unwrap();
        assert_eq!(disabled.dev_server, DevServerField::Disabled);

        let configured: BuildSystem = serde_json::from_value(json!({
            "devServer": { "url": null, "port": 3000 }
        }))
        .unwrap();
        let ds = configured.dev_server.as_configured().unwrap();
        assert_eq!(ds.url, None);
        assert_eq!(ds.port, Some(3000));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let analysis = ProjectAnalysis {
            tech_stack: Some(TechStack {
                languages: vec!["Rust".to_string()],
                frameworks: vec![],
                package_manager: "cargo".to_string(),
                build_tools: vec![],
                test_frameworks: vec![],
                databases: vec![],
                infrastructure: vec![],
                confidence: Confidence::High,
            }),
            ..ProjectAnalysis::default()
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert!(value.get("techStack").is_some());
        assert!(value["techStack"].get("packageManager").is_some());
        assert!(value["techStack"].get("testFrameworks").is_some());
    }

    #[test]
    fn test_debugger_type_wire_name() {
        let config = DebuggerConfig {
            available: true,
            debugger_type: Some("node --inspect".to_string()),
            instructions: None,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "node --inspect");
        assert!(value.get("instructions").is_none());
    }

    #[test]
    fn test_empty_analysis() {
        let analysis = ProjectAnalysis::default();
        assert!(analysis.is_empty());
        assert_eq!(serde_json::to_value(&analysis).unwrap(), json!({}));
    }
}
