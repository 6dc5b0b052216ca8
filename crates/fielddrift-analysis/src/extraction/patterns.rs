//! Recognizer definitions for both extraction batteries.

use regex::Regex;

/// How a recognizer turns its first capture group into field names.
#[derive(Debug, Clone)]
pub enum CaptureMode {
    /// Group 1 is a single field name.
    Single,
    /// Group 1 is a comma-separated binding list (`a, b, c`).
    BindingList,
    /// Group 1 is the body of a `SET` clause; every `segment` match inside it
    /// contributes its first group.
    SetClause { segment: Regex },
}

/// A compiled recognizer.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub id: &'static str,
    pub regex: Regex,
    pub mode: CaptureMode,
}

/// Assignment segment inside a `SET` clause body.
const SET_SEGMENT: &str = r"(\w+)\s*=\s*:\w+";

/// Compile the recognizers for fields read from the payload variables.
///
/// Payload variable names and the `.get` accessor match case-insensitively;
/// captured names keep their case.
pub fn processed_patterns(payload_vars: &[String]) -> Vec<FieldPattern> {
    let vars = payload_vars
        .iter()
        .map(|v| regex::escape(v))
        .collect::<Vec<_>>()
        .join("|");

    let defs: [(&'static str, String, Mode); 4] = [
        (
            "payload-get",
            format!(r#"(?i:{vars})\s*\.\s*(?i:get)\s*\(\s*['"](\w+)['"]"#),
            Mode::Single,
        ),
        (
            "payload-index",
            format!(r#"(?i:{vars})\s*\[\s*['"](\w+)['"]\s*\]"#),
            Mode::Single,
        ),
        (
            "payload-membership",
            format!(r#"['"](\w+)['"]\s+(?:not\s+)?in\s+(?i:{vars})\b"#),
            Mode::Single,
        ),
        (
            "payload-destructure",
            format!(r#"\b(?:const|let|var)\s*\{{\s*(\w+(?:\s*,\s*\w+)*)\s*,?\s*\}}\s*=\s*(?i:{vars})\b"#),
            Mode::BindingList,
        ),
    ];

    compile(defs)
}

/// Compile the recognizers for fields written by an update expression.
pub fn update_expression_patterns() -> Vec<FieldPattern> {
    let defs: [(&'static str, String, Mode); 3] = [
        (
            "update-append",
            r#"(?i:update_?expression)\s*\+=\s*[fFrRbBuU]?['"]\s*,\s*(\w+)\s*="#.to_string(),
            Mode::Single,
        ),
        (
            "update-assign",
            r#"(?i:update_?expression)\s*[=:]\s*[fFrRbBuU]?['"]\s*(?i:SET)\s+(\w+)\s*="#.to_string(),
            Mode::Single,
        ),
        (
            "update-set-clause",
            r#"['"]\s*(?i:SET)\s+([^'"]*)"#.to_string(),
            Mode::SetClause,
        ),
    ];

    compile(defs)
}

/// Capture mode before its helper regexes are compiled.
#[derive(Clone, Copy)]
enum Mode {
    Single,
    BindingList,
    SetClause,
}

fn compile<const N: usize>(defs: [(&'static str, String, Mode); N]) -> Vec<FieldPattern> {
    defs.into_iter()
        .filter_map(|(id, pattern, mode)| {
            let compiled = Regex::new(&pattern).and_then(|regex| {
                let mode = match mode {
                    Mode::Single => CaptureMode::Single,
                    Mode::BindingList => CaptureMode::BindingList,
                    Mode::SetClause => CaptureMode::SetClause {
                        segment: Regex::new(SET_SEGMENT)?,
                    },
                };
                Ok(FieldPattern { id, regex, mode })
            });
            match compiled {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!(pattern_id = id, error = %e, "skipping recognizer that failed to compile");
                    None
                }
            }
        })
        .collect()
}

impl FieldPattern {
    /// Push every field name this recognizer finds in `source` into `out`.
    pub fn collect_into(&self, source: &str, out: &mut Vec<String>) {
        for caps in self.regex.captures_iter(source) {
            let Some(group) = caps.get(1) else { continue };
            match &self.mode {
                CaptureMode::Single => out.push(group.as_str().to_string()),
                CaptureMode::BindingList => out.extend(
                    group
                        .as_str()
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string),
                ),
                CaptureMode::SetClause { segment } => out.extend(
                    segment
                        .captures_iter(group.as_str())
                        .filter_map(|seg| seg.get(1))
                        .map(|m| m.as_str().to_string()),
                ),
            }
        }
    }
}
