//! Subprocess-backed Python interpreter.
//!
//! [`PythonInterpreter`] answers both collaborator traits by running short
//! `-c` scripts in a child interpreter:
//!
//! - Introspection prints one JSON object with `executable`, `version`,
//!   `path`, and `path_repr` (the interpreter's own `repr(sys.path)`), read
//!   once per interpreter and reused by every accessor. Strings are
//!   re-encoded with `backslashreplace` so undecodable path bytes survive
//!   the trip as escapes.
//! - Dependency lookup imports a module by name and prints its `__version__`.
//!   A failed import maps to [`DependencyStatus::Unavailable`].

use crate::dependency::{DependencyResolver, DependencyStatus, OptionalDependency};
use crate::error::{ProbeError, Result};
use crate::runtime::{
    escape_lone_surrogates, single_line, RuntimeIdentity, RuntimeIntrospector,
};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const INTROSPECT_SCRIPT: &str = "import json, sys
def text(s):
    return str(s).encode('utf-8', 'backslashreplace').decode('utf-8')
json.dump({
    'executable': text(sys.executable),
    'version': text(sys.version),
    'path': [text(p) for p in sys.path],
    'path_repr': repr(sys.path),
}, sys.stdout)
";

const IMPORT_SCRIPT: &str = "import importlib, sys
module = importlib.import_module(sys.argv[1])
sys.stdout.write(str(module.__version__))
";

/// A Python interpreter probed through child processes.
#[derive(Debug)]
pub struct PythonInterpreter {
    path: PathBuf,
    identity: OnceCell<RuntimeIdentity>,
}

impl PythonInterpreter {
    /// Wrap the interpreter at `path`. Nothing is executed until queried.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            identity: OnceCell::new(),
        }
    }

    /// Path the interpreter is launched from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ask the interpreter for its executable, version, and search path.
    ///
    /// An empty executable is replaced by the launch path, and a version
    /// string spanning several lines is joined onto one. Lone surrogate
    /// escapes from older protocol output are kept as literal text.
    pub fn introspect(&self) -> Result<RuntimeIdentity> {
        let output = self
            .run(&["-c", INTROSPECT_SCRIPT])
            .map_err(|e| self.introspection_failed(format!("could not start: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.introspection_failed(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut identity: RuntimeIdentity =
            serde_json::from_str(&escape_lone_surrogates(&stdout)).map_err(|e| {
                self.introspection_failed(format!("unexpected output: {}", e))
            })?;

        if identity.executable.trim().is_empty() {
            identity.executable = self.path.display().to_string();
        }
        identity.version = single_line(&identity.version);

        tracing::debug!(
            "Interpreter {} reports version {}",
            identity.executable,
            identity.version
        );
        Ok(identity)
    }

    /// Import `module` in the interpreter and return its `__version__`.
    ///
    /// The version is reported as printed, only joined onto one line; an
    /// empty `__version__` is still a version.
    pub fn import_version(&self, module: &str) -> Result<String> {
        let unavailable = |reason: String| ProbeError::DependencyUnavailable {
            module: module.to_string(),
            reason,
        };

        let output = self
            .run(&["-c", IMPORT_SCRIPT, module])
            .map_err(|e| unavailable(format!("could not start interpreter: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("import failed")
                .trim()
                .to_string();
            return Err(unavailable(reason));
        }

        Ok(single_line(&String::from_utf8_lossy(&output.stdout)))
    }

    fn identity(&self) -> Result<&RuntimeIdentity> {
        if let Some(identity) = self.identity.get() {
            return Ok(identity);
        }
        let identity = self.introspect()?;
        Ok(self.identity.get_or_init(|| identity))
    }

    fn run(&self, args: &[&str]) -> std::io::Result<Output> {
        tracing::debug!("Running {} with {} args", self.path.display(), args.len());
        Command::new(&self.path)
            .args(args)
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::null())
            .output()
    }

    fn introspection_failed(&self, message: String) -> ProbeError {
        ProbeError::IntrospectionFailed {
            interpreter: self.path.clone(),
            message,
        }
    }
}

impl RuntimeIntrospector for PythonInterpreter {
    fn executable_path(&self) -> Result<String> {
        Ok(self.identity()?.executable.clone())
    }

    fn runtime_version(&self) -> Result<String> {
        Ok(self.identity()?.version.clone())
    }

    fn search_path(&self) -> Result<Vec<String>> {
        Ok(self.identity()?.search_path.clone())
    }

    fn search_path_repr(&self) -> Result<Option<String>> {
        Ok(self.identity()?.search_path_repr.clone())
    }
}

impl DependencyResolver for PythonInterpreter {
    fn resolve(&self, dependency: &OptionalDependency) -> DependencyStatus {
        match self.import_version(&dependency.module) {
            Ok(version) => DependencyStatus::Available { version },
            Err(e) => {
                tracing::debug!("{}", e);
                DependencyStatus::Unavailable
            }
        }
    }
}
