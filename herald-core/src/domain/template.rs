//! Pipeline template domain type

use serde::{Deserialize, Serialize};

/// An existing, externally managed pipeline definition
///
/// Read-only to Herald; a run references it by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineTemplate {
    pub name: String,
    pub namespace: String,
}
