//! Overload resolution for the binding generator.
//!
//! The specification parser emits one [`FunctionDeclaration`] per raw
//! overload. Several of them often describe the same function with slightly
//! different parameter typing (`glTexImage` vs `glTexImageuiv`, a scalar vs a
//! four-element array). This crate reduces them to one canonical declaration
//! per function per extension, deterministically, before code generation.
//!
//! # Overview
//!
//! 1. **Group**: declarations are partitioned by extension; groups never interact
//! 2. **Match**: a [`SignatureIdentity`] finds the entry a candidate duplicates
//! 3. **Resolve**: the [`ConflictResolver`] keeps the entry or replaces it
//! 4. **Emit**: [`GroupedStore::groups`] yields groups in key order
//!
//! # Example
//!
//! ```
//! use bind_core::{FunctionDeclaration, GroupedStore, ParameterType};
//!
//! let mut store = GroupedStore::new();
//! store.ingest_all(vec![
//!     FunctionDeclaration::new("glTexImage", "Core").with_parameter("x", ParameterType::unsigned()),
//!     FunctionDeclaration::new("glTexImageuiv", "Core").with_parameter("x", ParameterType::unsigned()),
//! ]);
//!
//! let core = store.group("Core").unwrap();
//! assert_eq!(core.len(), 1);
//! assert_eq!(core[0].name, "glTexImageuiv");
//! ```

pub mod config;
pub mod decl;
pub mod identity;
pub mod naming;
pub mod resolve;
pub mod store;

pub use config::{ResolverConfig, RuleConfig};
pub use decl::{load_declarations, FunctionDeclaration, Parameter, ParameterType};
pub use identity::{OverloadIdentity, SignatureIdentity};
pub use naming::{base_name, is_unsigned_name, split_overload, OverloadName};
pub use resolve::{ConflictResolver, Resolution, Rules};
pub use store::{GroupedStore, IngestReport, Ingested};

use thiserror::Error;

/// Errors from loading declarations or configuration.
///
/// Ingestion itself never fails.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for loading operations.
pub type BindResult<T> = Result<T, BindError>;
