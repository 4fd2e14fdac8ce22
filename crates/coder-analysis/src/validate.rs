//! # Structural Validation
//!
//! Validation of an untrusted candidate value against the project analysis
//! schema. This is a trust boundary: the candidate comes from a
//! non-deterministic generator, and nothing about its shape can be assumed.
//!
//! Every violation is collected with its field path before the call fails,
//! so a caller re-prompting the generator can name all defects at once.
//! Sections are validated fully independently — an absent section is never
//! an error, and an invalid present section fails the whole call. Types are
//! never coerced and invalid sections are never silently dropped.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{AnalysisError, ValidationViolations, Violation};
use crate::model::{
    BuildSystem, Confidence, DebuggerConfig, DebuggingTools, DevServer, DevServerField,
    ErrorTracking, LoggingSetup, Profiling, ProjectAnalysis, TechStack,
};

/// Validate a candidate value against the project analysis schema.
///
/// Returns the fully-typed [`ProjectAnalysis`] on success. On failure,
/// returns [`AnalysisError::ValidationFailed`] carrying every violation
/// found, each with the dotted path of the offending field.
///
/// The call is pure and synchronous: no I/O, no mutation of the candidate,
/// no partial acceptance.
pub fn validate(candidate: &Value) -> Result<ProjectAnalysis, AnalysisError> {
    let mut out = Collector::default();

    let root = match candidate.as_object() {
        Some(root) => root,
        None => {
            out.report("", "a JSON object", Some(candidate));
            return Err(out.into_error());
        }
    };

    let tech_stack = root
        .get("techStack")
        .and_then(|v| tech_stack_section(v, &mut out));
    let build_system = root
        .get("buildSystem")
        .and_then(|v| build_system_section(v, &mut out));
    let debugging_tools = root
        .get("debuggingTools")
        .and_then(|v| debugging_tools_section(v, &mut out));
    let project_structure = optional_string(root, "", "projectStructure", &mut out);

    if out.is_clean() {
        Ok(ProjectAnalysis {
            tech_stack,
            build_system,
            debugging_tools,
            project_structure,
        })
    } else {
        tracing::debug!(
            violations = out.len(),
            "analysis candidate rejected by structural validation"
        );
        Err(out.into_error())
    }
}

impl ProjectAnalysis {
    /// Validate a candidate value. See [`validate`].
    pub fn from_value(candidate: &Value) -> Result<Self, AnalysisError> {
        validate(candidate)
    }

    /// Extract the candidate JSON from a raw generator reply and validate it.
    ///
    /// Composes [`crate::response::extract_json`] with [`validate`].
    pub fn from_response(content: &str) -> Result<Self, AnalysisError> {
        let candidate = crate::response::extract_json(content)?;
        validate(&candidate)
    }
}

/// Accumulates violations across the whole candidate walk.
#[derive(Default)]
struct Collector {
    violations: Vec<Violation>,
}

impl Collector {
    fn report(
        &mut self,
        path: impl Into<String>,
        expected: impl Into<String>,
        found: Option<&Value>,
    ) {
        self.violations.push(Violation {
            path: path.into(),
            expected: expected.into(),
            actual: describe(found),
        });
    }

    fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn len(&self) -> usize {
        self.violations.len()
    }

    fn into_error(self) -> AnalysisError {
        AnalysisError::ValidationFailed {
            violations: ValidationViolations::new(self.violations),
        }
    }
}

/// Short rendering of a found value for violation messages.
fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => format!("boolean {b}"),
        Some(Value::Number(n)) => format!("number {n}"),
        Some(Value::String(s)) if s.chars().count() <= 40 => format!("string {s:?}"),
        Some(Value::String(s)) => format!("string of {} chars", s.chars().count()),
        Some(Value::Array(items)) => format!("array of {} items", items.len()),
        Some(Value::Object(_)) => "object".to_string(),
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn required_string(
    obj: &Map<String, Value>,
    parent: &str,
    key: &str,
    out: &mut Collector,
) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        other => {
            out.report(join(parent, key), "a string", other);
            None
        }
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    parent: &str,
    key: &str,
    out: &mut Collector,
) -> Option<String> {
    match obj.get(key) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            out.report(join(parent, key), "a string", Some(other));
            None
        }
    }
}

fn required_bool(
    obj: &Map<String, Value>,
    parent: &str,
    key: &str,
    out: &mut Collector,
) -> Option<bool> {
    match obj.get(key) {
        Some(Value::Bool(b)) => Some(*b),
        other => {
            out.report(join(parent, key), "a boolean", other);
            None
        }
    }
}

/// Validate a sequence of strings. Every element is checked; each
/// wrong-typed element gets its own indexed violation.
fn string_list(value: &Value, path: &str, out: &mut Collector) -> Option<Vec<String>> {
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            out.report(path, "an array of strings", Some(value));
            return None;
        }
    };
    let mut result = Vec::with_capacity(items.len());
    let mut clean = true;
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => result.push(s.clone()),
            other => {
                out.report(format!("{path}[{i}]"), "a string", Some(other));
                clean = false;
            }
        }
    }
    if clean {
        Some(result)
    } else {
        None
    }
}

fn required_string_list(
    obj: &Map<String, Value>,
    parent: &str,
    key: &str,
    out: &mut Collector,
) -> Option<Vec<String>> {
    let path = join(parent, key);
    match obj.get(key) {
        Some(value) => string_list(value, &path, out),
        None => {
            out.report(path, "an array of strings", None);
            None
        }
    }
}

fn optional_string_list(
    obj: &Map<String, Value>,
    parent: &str,
    key: &str,
    out: &mut Collector,
) -> Option<Vec<String>> {
    let value = obj.get(key)?;
    string_list(value, &join(parent, key), out)
}

fn tech_stack_section(value: &Value, out: &mut Collector) -> Option<TechStack> {
    const PATH: &str = "techStack";
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            out.report(PATH, "an object", Some(value));
            return None;
        }
    };

    let languages = required_string_list(obj, PATH, "languages", out);
    let frameworks = required_string_list(obj, PATH, "frameworks", out);
    let package_manager = required_string(obj, PATH, "packageManager", out);
    let build_tools = required_string_list(obj, PATH, "buildTools", out);
    let test_frameworks = required_string_list(obj, PATH, "testFrameworks", out);
    let databases = required_string_list(obj, PATH, "databases", out);
    let infrastructure = required_string_list(obj, PATH, "infrastructure", out);
    let confidence = confidence_field(obj, PATH, out);

    Some(TechStack {
        languages: languages?,
        frameworks: frameworks?,
        package_manager: package_manager?,
        build_tools: build_tools?,
        test_frameworks: test_frameworks?,
        databases: databases?,
        infrastructure: infrastructure?,
        confidence: confidence?,
    })
}

fn confidence_field(
    obj: &Map<String, Value>,
    parent: &str,
    out: &mut Collector,
) -> Option<Confidence> {
    const EXPECTED: &str = r#"one of "high", "medium", "low""#;
    let path = join(parent, "confidence");
    match obj.get("confidence") {
        Some(value @ Value::String(s)) => match s.parse::<Confidence>() {
            Ok(level) => Some(level),
            Err(_) => {
                out.report(path, EXPECTED, Some(value));
                None
            }
        },
        other => {
            out.report(path, EXPECTED, other);
            None
        }
    }
}

fn build_system_section(value: &Value, out: &mut Collector) -> Option<BuildSystem> {
    const PATH: &str = "buildSystem";
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            out.report(PATH, "an object", Some(value));
            return None;
        }
    };

    let run_commands = optional_string_list(obj, PATH, "runCommands", out);
    let build_commands = optional_string_list(obj, PATH, "buildCommands", out);
    let test_commands = optional_string_list(obj, PATH, "testCommands", out);
    let lint_commands = optional_string_list(obj, PATH, "lintCommands", out);
    let other_commands = other_commands_field(obj, PATH, out);
    let dev_server = dev_server_field(obj, PATH, out);
    let notes = optional_string(obj, PATH, "notes", out);

    // A record with zero populated fields is a valid "no findings" result.
    Some(BuildSystem {
        run_commands,
        build_commands,
        test_commands,
        lint_commands,
        other_commands,
        dev_server,
        notes,
    })
}

fn other_commands_field(
    obj: &Map<String, Value>,
    parent: &str,
    out: &mut Collector,
) -> Option<BTreeMap<String, String>> {
    let path = join(parent, "otherCommands");
    let value = obj.get("otherCommands")?;
    let record = match value.as_object() {
        Some(record) => record,
        None => {
            out.report(path, "an object mapping labels to command strings", Some(value));
            return None;
        }
    };

    let mut commands = BTreeMap::new();
    let mut clean = true;
    for (label, command) in record {
        if label.is_empty() {
            out.report(path.clone(), "non-empty command labels", Some(command));
            clean = false;
            continue;
        }
        match command {
            Value::String(s) => {
                commands.insert(label.clone(), s.clone());
            }
            other => {
                out.report(format!("{path}.{label}"), "a command string", Some(other));
                clean = false;
            }
        }
    }
    if clean {
        Some(commands)
    } else {
        None
    }
}

/// Validate the three-state `devServer` field: key absent, explicit null,
/// or a `{url, port}` record with both keys present and each independently
/// nullable.
fn dev_server_field(
    obj: &Map<String, Value>,
    parent: &str,
    out: &mut Collector,
) -> DevServerField {
    let path = join(parent, "devServer");
    let value = match obj.get("devServer") {
        None => return DevServerField::Absent,
        Some(Value::Null) => return DevServerField::Disabled,
        Some(value) => value,
    };
    let record = match value.as_object() {
        Some(record) => record,
        None => {
            out.report(path, "an object or null", Some(value));
            return DevServerField::Absent;
        }
    };

    let url = match record.get("url") {
        Some(Value::Null) => Some(None),
        Some(Value::String(s)) => Some(Some(s.clone())),
        other => {
            out.report(format!("{path}.url"), "a string or null", other);
            None
        }
    };
    let port = match record.get("port") {
        Some(Value::Null) => Some(None),
        Some(value @ Value::Number(_)) => {
            match value.as_u64().filter(|p| *p <= u64::from(u16::MAX)) {
                Some(p) => Some(Some(p as u16)),
                None => {
                    out.report(
                        format!("{path}.port"),
                        "a TCP port number or null",
                        Some(value),
                    );
                    None
                }
            }
        }
        other => {
            out.report(format!("{path}.port"), "a TCP port number or null", other);
            None
        }
    };

    match (url, port) {
        (Some(url), Some(port)) => DevServerField::Configured(DevServer { url, port }),
        // Violations already recorded; the field value is irrelevant since
        // the call is failing.
        _ => DevServerField::Absent,
    }
}

fn debugging_tools_section(value: &Value, out: &mut Collector) -> Option<DebuggingTools> {
    const PATH: &str = "debuggingTools";
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            out.report(PATH, "an object", Some(value));
            return None;
        }
    };

    let debugger_config = match obj.get("debuggerConfig") {
        Some(value) => debugger_config_record(value, &join(PATH, "debuggerConfig"), out),
        None => {
            out.report(join(PATH, "debuggerConfig"), "an object", None);
            None
        }
    };
    let logging = obj
        .get("logging")
        .and_then(|v| logging_record(v, &join(PATH, "logging"), out));
    let error_tracking = obj
        .get("errorTracking")
        .and_then(|v| error_tracking_record(v, &join(PATH, "errorTracking"), out));
    let profiling = obj
        .get("profiling")
        .and_then(|v| profiling_record(v, &join(PATH, "profiling"), out));
    let common_issues = required_string_list(obj, PATH, "commonIssues", out);
    let tips = required_string_list(obj, PATH, "tips", out);

    Some(DebuggingTools {
        debugger_config: debugger_config?,
        logging,
        error_tracking,
        profiling,
        common_issues: common_issues?,
        tips: tips?,
    })
}

fn debugger_config_record(
    value: &Value,
    path: &str,
    out: &mut Collector,
) -> Option<DebuggerConfig> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            out.report(path, "an object", Some(value));
            return None;
        }
    };
    let available = required_bool(obj, path, "available", out);
    let debugger_type = optional_string(obj, path, "type", out);
    let instructions = optional_string(obj, path, "instructions", out);
    Some(DebuggerConfig {
        available: available?,
        debugger_type,
        instructions,
    })
}

fn logging_record(value: &Value, path: &str, out: &mut Collector) -> Option<LoggingSetup> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            out.report(path, "an object", Some(value));
            return None;
        }
    };
    let library = required_string(obj, path, "library", out);
    let levels = required_string_list(obj, path, "levels", out);
    let location = optional_string(obj, path, "location", out);
    Some(LoggingSetup {
        library: library?,
        levels: levels?,
        location,
    })
}

fn error_tracking_record(
    value: &Value,
    path: &str,
    out: &mut Collector,
) -> Option<ErrorTracking> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            out.report(path, "an object", Some(value));
            return None;
        }
    };
    let service = required_string(obj, path, "service", out);
    let configured = required_bool(obj, path, "configured", out);
    Some(ErrorTracking {
        service: service?,
        configured: configured?,
    })
}

fn profiling_record(value: &Value, path: &str, out: &mut Collector) -> Option<Profiling> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            out.report(path, "an object", Some(value));
            return None;
        }
    };
    let available = required_bool(obj, path, "available", out);
    let tools = required_string_list(obj, path, "tools", out);
    Some(Profiling {
        available: available?,
        tools: tools?,
    })
}
