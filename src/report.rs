//! Environment report and its renderings.
//!
//! The text form is five fixed lines: executable, version, search path, then
//! one line per optional dependency. The search path is printed as the
//! interpreter rendered it, or else the way Python prints a list of strings. The JSON form carries the same facts plus
//! the extracted release number.

use crate::dependency::{DependencyStatus, OptionalDependency};
use crate::error::Result;
use crate::runtime::RuntimeIdentity;
use serde::Serialize;

/// Status of one optional dependency, as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    pub label: String,
    pub module: String,
    #[serde(flatten)]
    pub status: DependencyStatus,
}

impl DependencyReport {
    /// Pair a dependency with its resolved status.
    pub fn new(dependency: &OptionalDependency, status: DependencyStatus) -> Self {
        Self {
            label: dependency.label.clone(),
            module: dependency.module.clone(),
            status,
        }
    }

    /// Report line: `<Label> version: <v>` or `<Label> not found`.
    pub fn line(&self) -> String {
        match self.status.version() {
            Some(version) => format!("{} version: {}", self.label, version),
            None => format!("{} not found", self.label),
        }
    }
}

/// Everything one probe run observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentReport {
    #[serde(flatten)]
    pub runtime: RuntimeIdentity,
    pub version_number: Option<String>,
    pub dependencies: Vec<DependencyReport>,
}

impl EnvironmentReport {
    /// Build a report from an identity and ordered dependency results.
    pub fn new(runtime: RuntimeIdentity, dependencies: Vec<DependencyReport>) -> Self {
        let version_number = runtime.version_number();
        Self {
            runtime,
            version_number,
            dependencies,
        }
    }

    /// Report lines in output order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Python executable: {}", self.runtime.executable),
            format!("Python version: {}", self.runtime.version),
            format!("Python path: {}", self.search_path_text()),
        ];
        lines.extend(self.dependencies.iter().map(DependencyReport::line));
        lines
    }

    fn search_path_text(&self) -> String {
        match &self.runtime.search_path_repr {
            Some(repr) => repr.clone(),
            None => python_list(&self.runtime.search_path),
        }
    }

    /// Plain-text report, one fact per line, newline-terminated.
    pub fn render_text(&self) -> String {
        let mut out = self.lines().join("\n");
        out.push('\n');
        out
    }

    /// Pretty-printed JSON report.
    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render strings as a Python list literal, e.g. `['', '/usr/lib']`.
pub fn python_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| python_str(item)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Render a string the way Python's `repr` does.
///
/// Single quotes are used unless the text contains a single quote and no
/// double quote. Non-printable characters are escaped as `\xNN`, `\uNNNN`, or
/// `\UNNNNNNNN`.
pub fn python_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => {
                let code = c as u32;
                if code < 0x100 {
                    out.push_str(&format!("\\x{:02x}", code));
                } else if code < 0x10000 {
                    out.push_str(&format!("\\u{:04x}", code));
                } else {
                    out.push_str(&format!("\\U{:08x}", code));
                }
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Format characters (Unicode category Cf).
const FORMAT_CHARS: &[(u32, u32)] = &[
    (0x00AD, 0x00AD),
    (0x0600, 0x0605),
    (0x061C, 0x061C),
    (0x06DD, 0x06DD),
    (0x070F, 0x070F),
    (0x0890, 0x0891),
    (0x08E2, 0x08E2),
    (0x180E, 0x180E),
    (0x200B, 0x200F),
    (0x202A, 0x202E),
    (0x2060, 0x2064),
    (0x2066, 0x206F),
    (0xFEFF, 0xFEFF),
    (0xFFF9, 0xFFFB),
    (0x110BD, 0x110BD),
    (0x110CD, 0x110CD),
    (0x13430, 0x1343F),
    (0x1BCA0, 0x1BCA3),
    (0x1D173, 0x1D17A),
    (0xE0001, 0xE0001),
    (0xE0020, 0xE007F),
];

/// Whether Python's `str.isprintable` accepts `c`.
///
/// Rejects control, separator (other than space), format, private-use, and
/// noncharacter code points. Other unassigned code points are treated as
/// printable.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    let code = c as u32;
    let format = FORMAT_CHARS
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code));
    let private_use = (0xE000..=0xF8FF).contains(&code) || code >= 0xF0000;
    let noncharacter = (0xFDD0..=0xFDEF).contains(&code) || code & 0xFFFE == 0xFFFE;
    !(format || private_use || noncharacter)
}
