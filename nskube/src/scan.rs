use std::fmt;

use log::{info, warn};

use crate::error::ProviderError;
use crate::provider::Provider;
use crate::registry::{ConnectionTarget, NamespaceEntry, Registry};

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Scan only this project instead of every one the provider lists.
    pub project: Option<String>,
}

/// The provider call that failed during a scan, and what it was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStep {
    ListProjects,
    ActivateProject { project: String },
    ListClusters { project: String },
    ActivateCluster { project: String, cluster: String },
    ListNamespaces { project: String, cluster: String },
}

impl fmt::Display for ScanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStep::ListProjects => write!(f, "listing projects"),
            ScanStep::ActivateProject { project } => write!(f, "activating project {project}"),
            ScanStep::ListClusters { project } => write!(f, "listing clusters of {project}"),
            ScanStep::ActivateCluster { project, cluster } => {
                write!(f, "activating cluster {cluster} ({project})")
            }
            ScanStep::ListNamespaces { project, cluster } => {
                write!(f, "listing namespaces of {cluster} ({project})")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub projects: usize,
    pub clusters: usize,
    pub namespaces: usize,
    pub failures: Vec<(ScanStep, ProviderError)>,
}

impl ScanReport {
    /// True when provider failures kept the scan from activating a single project.
    ///
    /// The registry then holds nothing new, and saving it would throw away the store.
    pub fn reached_nothing(&self) -> bool {
        self.projects == 0 && !self.failures.is_empty()
    }

    fn fail(&mut self, step: ScanStep, err: ProviderError) {
        warn!("{step} failed: {err}");
        self.failures.push((step, err));
    }
}

/// Walks projects, their clusters and their namespaces, upserting every namespace found.
///
/// Provider failures are recorded in the report and skip only the item they belong to.
/// A project or cluster that cannot be activated is skipped entirely, since listing
/// would then answer for whatever was active before.
pub fn scan(
    provider: &mut dyn Provider,
    registry: &mut Registry,
    options: &ScanOptions,
) -> ScanReport {
    let mut report = ScanReport::default();

    let projects = match &options.project {
        Some(project) => vec![project.clone()],
        None => match provider.list_projects() {
            Ok(projects) => projects,
            Err(err) => {
                report.fail(ScanStep::ListProjects, err);
                return report;
            }
        },
    };

    for project in projects {
        info!("--> Processing project: {project}");
        if let Err(err) = provider.activate_project(&project) {
            report.fail(ScanStep::ActivateProject { project }, err);
            continue;
        }
        report.projects += 1;

        let clusters = match provider.list_clusters() {
            Ok(clusters) => clusters,
            Err(err) => {
                report.fail(ScanStep::ListClusters { project }, err);
                continue;
            }
        };

        for cluster in clusters {
            info!("    --> Processing cluster: {}", cluster.name);
            if let Err(err) = provider.activate_cluster(&cluster.name, &cluster.location) {
                let step = ScanStep::ActivateCluster {
                    project: project.clone(),
                    cluster: cluster.name,
                };
                report.fail(step, err);
                continue;
            }
            report.clusters += 1;

            let namespaces = match provider.list_namespaces() {
                Ok(namespaces) => namespaces,
                Err(err) => {
                    let step = ScanStep::ListNamespaces {
                        project: project.clone(),
                        cluster: cluster.name,
                    };
                    report.fail(step, err);
                    continue;
                }
            };

            for name in namespaces {
                let target = ConnectionTarget::new(&project, &cluster.name, &cluster.location);
                let Some(entry) = NamespaceEntry::with_targets(&name, vec![target]) else {
                    continue;
                };
                info!("        - {}", entry.name);
                registry.upsert(entry);
                report.namespaces += 1;
            }
        }
    }

    report
}
