//! Dispatch configuration
//!
//! Every value the submission flow needs that does not come from the event
//! itself. Defaults match a stock single-namespace install.

use std::collections::BTreeMap;
use std::time::Duration;

/// How generated resource and run names are made unique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingPolicy {
    /// Suffix is the submission time in whole seconds.
    ///
    /// Two submissions in the same second produce the same names and the
    /// backend rejects the second set as already existing.
    #[default]
    Timestamp,
    /// Suffix is the submission time followed by a random salt
    Salted,
}

/// Settings consumed by the dispatch flow
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Namespace resources and runs are created in
    pub namespace: String,

    /// Name of the pipeline template to run
    pub template_name: String,

    /// Namespace the template is looked up in
    pub template_namespace: String,

    /// Service identity the run executes as
    pub service_account: String,

    /// Registry host images are pushed to (not validated)
    pub registry: String,

    /// Timeout embedded in every run request
    pub run_timeout: Duration,

    /// Labels attached to every run request
    pub run_labels: BTreeMap<String, String>,

    pub naming: NamingPolicy,
}

impl DispatchConfig {
    /// Creates a configuration with defaults and the given registry
    pub fn new(registry: impl Into<String>) -> Self {
        Self {
            namespace: "default".to_string(),
            template_name: "simple-pipeline".to_string(),
            template_namespace: "default".to_string(),
            service_account: "default".to_string(),
            registry: registry.into(),
            run_timeout: Duration::from_secs(60 * 60),
            run_labels: BTreeMap::from([("app".to_string(), "devops-knative".to_string())]),
            naming: NamingPolicy::default(),
        }
    }

    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}
