//! A scripted [`Provider`] for tests.

use std::collections::HashMap;

use crate::error::ProviderError;
use crate::provider::{ClusterInfo, Provider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListProjects,
    ActivateProject(String),
    ListClusters,
    ActivateCluster(String, String),
    ListNamespaces,
    SetActiveNamespace(String),
}

/// Answers from an in-memory world of projects, clusters and namespaces.
///
/// Like the real tools it keeps an active project and cluster, and listing calls
/// answer for whatever was activated last. Any call registered with
/// [`FakeProvider::fail_on`] fails instead. Every call is recorded in `calls`.
#[derive(Debug, Default)]
pub struct FakeProvider {
    projects: Vec<String>,
    clusters: HashMap<String, Vec<ClusterInfo>>,
    namespaces: HashMap<(String, String), Vec<String>>,
    failures: Vec<Call>,
    broken_projects: Vec<String>,
    active_project: Option<String>,
    active_cluster: Option<String>,
    pub calls: Vec<Call>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: &str) -> Self {
        self.projects.push(project.to_owned());
        self.clusters.entry(project.to_owned()).or_default();
        self
    }

    /// Adds a cluster to `project`, registering the project if needed.
    pub fn with_cluster(
        mut self,
        project: &str,
        cluster: &str,
        location: &str,
        namespaces: &[&str],
    ) -> Self {
        if !self.projects.iter().any(|p| p == project) {
            self = self.with_project(project);
        }
        self.clusters
            .entry(project.to_owned())
            .or_default()
            .push(ClusterInfo::new(cluster, location));
        self.namespaces.insert(
            (project.to_owned(), cluster.to_owned()),
            namespaces.iter().map(|ns| ns.to_string()).collect(),
        );
        self
    }

    pub fn fail_on(mut self, call: Call) -> Self {
        self.failures.push(call);
        self
    }

    /// Makes `list_clusters` fail while `project` is active.
    pub fn fail_clusters_of(mut self, project: &str) -> Self {
        self.broken_projects.push(project.to_owned());
        self
    }

    fn record(&mut self, call: Call) -> Result<(), ProviderError> {
        let failed = self.failures.contains(&call);
        let msg = format!("{call:?} failed");
        self.calls.push(call);
        if failed {
            Err(ProviderError::Other(msg))
        } else {
            Ok(())
        }
    }

    fn active_project(&self) -> Result<&str, ProviderError> {
        self.active_project
            .as_deref()
            .ok_or_else(|| ProviderError::Other("no active project".to_owned()))
    }
}

impl Provider for FakeProvider {
    fn list_projects(&mut self) -> Result<Vec<String>, ProviderError> {
        self.record(Call::ListProjects)?;
        Ok(self.projects.clone())
    }

    fn activate_project(&mut self, project: &str) -> Result<(), ProviderError> {
        self.record(Call::ActivateProject(project.to_owned()))?;
        if !self.clusters.contains_key(project) {
            return Err(ProviderError::Other(format!("unknown project {project}")));
        }
        self.active_project = Some(project.to_owned());
        self.active_cluster = None;
        Ok(())
    }

    fn list_clusters(&mut self) -> Result<Vec<ClusterInfo>, ProviderError> {
        self.record(Call::ListClusters)?;
        let project = self.active_project()?;
        if self.broken_projects.iter().any(|p| p == project) {
            return Err(ProviderError::Other(format!(
                "listing clusters of {project} failed"
            )));
        }
        Ok(self.clusters.get(project).cloned().unwrap_or_default())
    }

    fn activate_cluster(&mut self, cluster: &str, location: &str) -> Result<(), ProviderError> {
        self.record(Call::ActivateCluster(cluster.to_owned(), location.to_owned()))?;
        let project = self.active_project()?;
        let known = self
            .clusters
            .get(project)
            .map_or(false, |cs| cs.iter().any(|c| c.name == cluster));
        if !known {
            return Err(ProviderError::Other(format!(
                "cluster {cluster} not found in {project}"
            )));
        }
        self.active_cluster = Some(cluster.to_owned());
        Ok(())
    }

    fn list_namespaces(&mut self) -> Result<Vec<String>, ProviderError> {
        self.record(Call::ListNamespaces)?;
        let project = self.active_project()?.to_owned();
        let cluster = self
            .active_cluster
            .clone()
            .ok_or_else(|| ProviderError::Other("no active cluster".to_owned()))?;
        Ok(self
            .namespaces
            .get(&(project, cluster))
            .cloned()
            .unwrap_or_default())
    }

    fn set_active_namespace(&mut self, namespace: &str) -> Result<(), ProviderError> {
        self.record(Call::SetActiveNamespace(namespace.to_owned()))
    }
}
