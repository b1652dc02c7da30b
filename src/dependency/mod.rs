//! Optional dependency lookup.
//!
//! Each optional library is checked through a [`DependencyResolver`], a
//! capability query that always answers with a [`DependencyStatus`]. A library
//! that cannot be imported for any reason is reported as
//! [`DependencyStatus::Unavailable`]; the failure never escapes the resolver.

use serde::{Deserialize, Serialize};

/// A library whose presence is reported but not required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalDependency {
    /// Import name (e.g., "shapely").
    pub module: String,
    /// Display name used in the report (e.g., "Shapely").
    pub label: String,
}

impl OptionalDependency {
    /// Create a dependency from its import name and display label.
    pub fn new(module: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            label: label.into(),
        }
    }
}

/// The geospatial libraries reported by default, in report order.
pub fn default_dependencies() -> Vec<OptionalDependency> {
    vec![
        OptionalDependency::new("shapely", "Shapely"),
        OptionalDependency::new("pyproj", "Pyproj"),
    ]
}

/// Outcome of resolving one optional dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DependencyStatus {
    /// The library imported and reported this version.
    Available { version: String },
    /// The library could not be imported.
    Unavailable,
}

impl DependencyStatus {
    /// Whether the library was found.
    pub fn is_available(&self) -> bool {
        matches!(self, DependencyStatus::Available { .. })
    }

    /// The reported version, if the library was found.
    pub fn version(&self) -> Option<&str> {
        match self {
            DependencyStatus::Available { version } => Some(version),
            DependencyStatus::Unavailable => None,
        }
    }
}

/// Resolves optional dependencies by name.
///
/// Implementations must absorb every failure and answer
/// [`DependencyStatus::Unavailable`] instead.
pub trait DependencyResolver {
    /// Check whether `dependency` can be loaded and which version it reports.
    fn resolve(&self, dependency: &OptionalDependency) -> DependencyStatus;
}
