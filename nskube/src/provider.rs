use serde::Deserialize;

use crate::error::ProviderError;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClusterInfo {
    pub name: String,
    pub location: String,
}

impl ClusterInfo {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// The external tooling that knows about projects, clusters and namespaces.
///
/// Activation calls change shared state (the active gcloud configuration, the current
/// kube context), so listing calls answer for whatever was activated last.
pub trait Provider {
    fn list_projects(&mut self) -> Result<Vec<String>, ProviderError>;

    fn activate_project(&mut self, project: &str) -> Result<(), ProviderError>;

    /// Clusters of the active project.
    fn list_clusters(&mut self) -> Result<Vec<ClusterInfo>, ProviderError>;

    fn activate_cluster(&mut self, cluster: &str, location: &str) -> Result<(), ProviderError>;

    /// Namespaces of the active cluster.
    fn list_namespaces(&mut self) -> Result<Vec<String>, ProviderError>;

    fn set_active_namespace(&mut self, namespace: &str) -> Result<(), ProviderError>;
}
