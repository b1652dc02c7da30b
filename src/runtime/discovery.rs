//! Interpreter discovery.
//!
//! Locates the Python interpreter to probe. An explicit choice (from
//! `--python` or `PYPROBE_PYTHON`) wins; otherwise the PATH entries are
//! walked in order for each name in [`INTERPRETER_CANDIDATES`].
//!
//! # Example
//!
//! ```no_run
//! use pyprobe::runtime::discovery::{locate_interpreter, parse_system_path};
//!
//! let python = locate_interpreter(None, &parse_system_path()).unwrap();
//! println!("Probing {}", python.display());
//! ```

use crate::error::{ProbeError, Result};
use std::path::{Path, PathBuf};

/// Interpreter names tried, in order, when none is given explicitly.
pub const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Platform file name for a tool (`python` becomes `python.exe` on Windows).
pub fn executable_name(tool: &str) -> String {
    if cfg!(windows) && Path::new(tool).extension().is_none() {
        format!("{}.exe", tool)
    } else {
        tool.to_string()
    }
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let file_name = executable_name(tool);
    for dir in path_entries {
        let candidate = dir.join(&file_name);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Find the first default interpreter candidate on the given PATH entries.
pub fn find_interpreter(path_entries: &[PathBuf]) -> Option<PathBuf> {
    INTERPRETER_CANDIDATES
        .iter()
        .find_map(|name| resolve_tool_path(name, path_entries))
}

/// Locate the interpreter to probe.
///
/// A bare name such as `python3.12` is looked up on `path_entries`; anything
/// with a directory component is used as given and must be an existing file.
pub fn locate_interpreter(explicit: Option<&Path>, path_entries: &[PathBuf]) -> Result<PathBuf> {
    let Some(explicit) = explicit else {
        tracing::debug!("Searching PATH for {:?}", INTERPRETER_CANDIDATES);
        return find_interpreter(path_entries).ok_or_else(|| ProbeError::InterpreterNotFound {
            searched: INTERPRETER_CANDIDATES.join(", "),
        });
    };

    let is_bare_name = explicit.components().count() == 1 && !explicit.is_absolute();
    let found = if is_bare_name {
        resolve_tool_path(&explicit.to_string_lossy(), path_entries)
    } else if explicit.is_file() {
        Some(explicit.to_path_buf())
    } else {
        None
    };

    found.ok_or_else(|| ProbeError::InterpreterNotFound {
        searched: explicit.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_fake_binary(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[cfg(unix)]
    fn create_non_executable_file(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "not executable").unwrap();
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn resolve_tool_path_finds_first_match() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");
        create_fake_binary(&dir_a.join(executable_name("python3")));
        create_fake_binary(&dir_b.join(executable_name("python3")));

        let result = resolve_tool_path("python3", &[dir_a.clone(), dir_b]);
        assert_eq!(result, Some(dir_a.join(executable_name("python3"))));
    }

    #[test]
    fn resolve_tool_path_returns_none_when_not_found() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("empty");
        fs::create_dir_all(&dir).unwrap();

        assert!(resolve_tool_path("python3", &[dir]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_skips_non_executable() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");
        create_non_executable_file(&dir_a.join("python3"));
        create_fake_binary(&dir_b.join("python3"));

        let result = resolve_tool_path("python3", &[dir_a, dir_b.clone()]);
        assert_eq!(result, Some(dir_b.join("python3")));
    }

    #[cfg(unix)]
    #[test]
    fn is_executable_distinguishes_permission_bits() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        let file = temp.path().join("file");
        create_fake_binary(&bin);
        create_non_executable_file(&file);
        assert!(is_executable(&bin));
        assert!(!is_executable(&file));
    }

    #[test]
    fn is_executable_returns_false_for_nonexistent_file() {
        assert!(!is_executable(Path::new("/nonexistent/path/to/file")));
    }

    #[test]
    fn find_interpreter_prefers_python3_over_python() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");
        create_fake_binary(&dir_a.join(executable_name("python")));
        create_fake_binary(&dir_b.join(executable_name("python3")));

        let result = find_interpreter(&[dir_a, dir_b.clone()]);
        assert_eq!(result, Some(dir_b.join(executable_name("python3"))));
    }

    #[test]
    fn find_interpreter_falls_back_to_python() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join(executable_name("python")));

        let result = find_interpreter(&[temp.path().to_path_buf()]);
        assert_eq!(result, Some(temp.path().join(executable_name("python"))));
    }

    #[test]
    fn locate_without_candidates_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = locate_interpreter(None, &[temp.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, ProbeError::InterpreterNotFound { .. }));
        assert!(err.to_string().contains("python3, python"));
    }

    #[test]
    fn locate_explicit_path_is_used_as_given() {
        let temp = TempDir::new().unwrap();
        let python = temp.path().join("venv/bin/python");
        create_fake_binary(&python);

        let result = locate_interpreter(Some(&python), &[]).unwrap();
        assert_eq!(result, python);
    }

    #[test]
    fn locate_explicit_missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope/python");

        let err = locate_interpreter(Some(&missing), &[]).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn locate_explicit_bare_name_searches_path() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join(executable_name("python3.12")));

        let result =
            locate_interpreter(Some(Path::new("python3.12")), &[temp.path().to_path_buf()])
                .unwrap();
        assert_eq!(result, temp.path().join(executable_name("python3.12")));
    }
}
