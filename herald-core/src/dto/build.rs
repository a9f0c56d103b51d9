//! Manual build request DTO

use serde::{Deserialize, Serialize};

/// A manually submitted build
///
/// Either `commit_id` or `branch` should be set; when both are present the
/// commit wins.
///
/// ```json
/// {
///   "repourl": "https://github.com/your-org/test-project",
///   "commitid": "7d84981c66718ee2dda1af280f915cc2feb6ffow",
///   "reponame": "test-project"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    #[serde(rename = "repourl")]
    pub repo_url: String,
    #[serde(rename = "commitid", default, skip_serializing_if = "String::is_empty")]
    pub commit_id: String,
    #[serde(rename = "reponame")]
    pub repo_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branch: String,
}
