//! pyprobe - Report the active Python interpreter and its optional libraries.
//!
//! pyprobe locates a Python interpreter, asks it for its executable path,
//! version, and module search path, and checks whether the optional
//! geospatial libraries Shapely and Pyproj can be imported.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`dependency`] - Optional dependency types and the resolver trait
//! - [`error`] - Error types and result aliases
//! - [`probe`] - The environment probe
//! - [`report`] - Report rendering as text or JSON
//! - [`runtime`] - Runtime identity, interpreter discovery, and introspection
//!
//! # Example
//!
//! ```
//! use pyprobe::dependency::{DependencyStatus, OptionalDependency};
//! use pyprobe::report::{DependencyReport, EnvironmentReport};
//! use pyprobe::runtime::RuntimeIdentity;
//!
//! let report = EnvironmentReport::new(
//!     RuntimeIdentity {
//!         executable: "/usr/bin/python3".to_string(),
//!         version: "3.11.4".to_string(),
//!         search_path: vec!["/usr/lib/python3.11".to_string()],
//!         search_path_repr: None,
//!     },
//!     vec![DependencyReport::new(
//!         &OptionalDependency::new("shapely", "Shapely"),
//!         DependencyStatus::Unavailable,
//!     )],
//! );
//! assert_eq!(report.lines()[3], "Shapely not found");
//! ```

pub mod cli;
pub mod dependency;
pub mod error;
pub mod probe;
pub mod report;
pub mod runtime;

pub use error::{ProbeError, Result};
