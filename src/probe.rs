//! Environment probe.
//!
//! [`EnvironmentProbe`] reads the runtime identity and then resolves each
//! optional dependency in a fixed order. Identity failures are fatal;
//! dependency failures only ever show up as [`DependencyStatus::Unavailable`].
//!
//! # Example
//!
//! ```no_run
//! use pyprobe::probe::EnvironmentProbe;
//! use pyprobe::runtime::{locate_interpreter, parse_system_path, PythonInterpreter};
//!
//! let python = PythonInterpreter::new(locate_interpreter(None, &parse_system_path()).unwrap());
//! let report = EnvironmentProbe::new().run(&python, &python).unwrap();
//! print!("{}", report.render_text());
//! ```
//!
//! [`DependencyStatus::Unavailable`]: crate::dependency::DependencyStatus::Unavailable

use crate::dependency::{default_dependencies, DependencyResolver, OptionalDependency};
use crate::error::Result;
use crate::report::{DependencyReport, EnvironmentReport};
use crate::runtime::{RuntimeIdentity, RuntimeIntrospector};

/// Collects an [`EnvironmentReport`] from the runtime collaborators.
#[derive(Debug, Clone)]
pub struct EnvironmentProbe {
    dependencies: Vec<OptionalDependency>,
}

impl Default for EnvironmentProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentProbe {
    /// Probe for the default optional dependencies (Shapely, then Pyproj).
    pub fn new() -> Self {
        Self::with_dependencies(default_dependencies())
    }

    /// Probe for a custom ordered set of optional dependencies.
    pub fn with_dependencies(dependencies: Vec<OptionalDependency>) -> Self {
        Self { dependencies }
    }

    /// Run the probe once.
    pub fn run(
        &self,
        runtime: &dyn RuntimeIntrospector,
        resolver: &dyn DependencyResolver,
    ) -> Result<EnvironmentReport> {
        let identity = RuntimeIdentity::collect(runtime)?;

        let dependencies = self
            .dependencies
            .iter()
            .map(|dependency| {
                let status = resolver.resolve(dependency);
                tracing::debug!(
                    "{} available: {} ({:?})",
                    dependency.module,
                    status.is_available(),
                    status.version()
                );
                DependencyReport::new(dependency, status)
            })
            .collect();

        Ok(EnvironmentReport::new(identity, dependencies))
    }
}
