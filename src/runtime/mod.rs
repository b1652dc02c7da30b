//! Runtime identity and the interpreter collaborator.
//!
//! The probe never reads interpreter state directly. It goes through
//! [`RuntimeIntrospector`], which [`PythonInterpreter`] implements by asking a
//! real interpreter about itself and which tests implement with fixed values.
//!
//! - [`discovery`] - Locating the interpreter on PATH
//! - [`python`] - Subprocess-backed interpreter collaborator

pub mod discovery;
pub mod python;

pub use discovery::{locate_interpreter, parse_system_path};
pub use python::PythonInterpreter;

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

static RELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)+[A-Za-z0-9+]*)").unwrap());

/// Read-only view of the runtime being probed.
pub trait RuntimeIntrospector {
    /// Absolute path of the interpreter executable.
    fn executable_path(&self) -> Result<String>;

    /// Full version string as reported by the interpreter.
    fn runtime_version(&self) -> Result<String>;

    /// Ordered module search path.
    fn search_path(&self) -> Result<Vec<String>>;

    /// The search path exactly as the runtime itself prints it, if it can say.
    fn search_path_repr(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Executable path, version, and search path of one interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeIdentity {
    pub executable: String,
    pub version: String,
    #[serde(rename = "path")]
    pub search_path: Vec<String>,
    /// Interpreter-rendered search path, printed verbatim when present.
    #[serde(rename = "path_repr", default, skip_serializing)]
    pub search_path_repr: Option<String>,
}

impl RuntimeIdentity {
    /// Read all three facts from an introspector, in report order.
    pub fn collect(runtime: &dyn RuntimeIntrospector) -> Result<Self> {
        Ok(Self {
            executable: runtime.executable_path()?,
            version: runtime.runtime_version()?,
            search_path: runtime.search_path()?,
            search_path_repr: runtime.search_path_repr()?,
        })
    }

    /// Leading `X.Y[.Z]` release number of the version string, if any.
    pub fn version_number(&self) -> Option<String> {
        version_number(&self.version)
    }
}

/// Extract the leading release number from a version string.
///
/// `"3.11.4 (main, Jun  7 2023) [GCC 12.2.0]"` yields `"3.11.4"`.
pub fn version_number(version: &str) -> Option<String> {
    RELEASE.captures(version).map(|caps| caps[1].to_string())
}

/// Collapse line breaks in a version string so it fits on one output line.
pub fn single_line(version: &str) -> String {
    version
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn lone UTF-16 surrogate escapes in JSON text into literal text.
///
/// Python writes undecodable path bytes as lone surrogates (`\udcff`), which
/// are not valid in a Rust `String`. Each lone `\uD800`-`\uDFFF` escape gets
/// its backslash escaped, so it decodes to the six characters `\udcff`.
/// Well-formed surrogate pairs are left alone.
pub fn escape_lone_surrogates(json: &str) -> Cow<'_, str> {
    if !json.contains("\\u") {
        return Cow::Borrowed(json);
    }

    let bytes = json.as_bytes();
    let mut out = String::with_capacity(json.len() + 8);
    let mut copied = 0;
    let mut changed = false;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) != Some(&b'u') {
            // Any other escape, including an escaped backslash.
            i += 2;
            continue;
        }
        let Some(unit) = utf16_escape(json, i) else {
            i += 2;
            continue;
        };
        if (0xD800..0xDC00).contains(&unit)
            && utf16_escape(json, i + 6).is_some_and(|low| (0xDC00..0xE000).contains(&low))
        {
            i += 12;
            continue;
        }
        if (0xD800..0xE000).contains(&unit) {
            out.push_str(&json[copied..i]);
            out.push('\\');
            copied = i;
            changed = true;
        }
        i += 6;
    }

    if !changed {
        return Cow::Borrowed(json);
    }
    out.push_str(&json[copied..]);
    Cow::Owned(out)
}

/// Code unit of a `\uXXXX` escape starting at byte `at`.
fn utf16_escape(json: &str, at: usize) -> Option<u32> {
    let escape = json.get(at..at + 6)?;
    let hex = escape.strip_prefix("\\u")?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
