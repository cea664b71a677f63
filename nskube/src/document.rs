//! The on-disk shape of the namespace store.
//!
//! Field names are PascalCase so stores written by earlier versions of the tool keep loading.

use serde::*;

use crate::registry::{ConnectionTarget, NamespaceEntry, Registry};

// region: ConnectionData
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionData {
    pub project_name: String,
    pub cluster_name: String,
    pub region: String,
}

impl From<ConnectionData> for ConnectionTarget {
    fn from(cd: ConnectionData) -> Self {
        ConnectionTarget::new(cd.project_name, cd.cluster_name, cd.region)
    }
}

impl From<ConnectionTarget> for ConnectionData {
    fn from(target: ConnectionTarget) -> Self {
        Self {
            project_name: target.project,
            cluster_name: target.cluster,
            region: target.region,
        }
    }
}
// endregion

// region: Namespace
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub connection_data: Vec<ConnectionData>,
}
// endregion

// region: Document
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct NamespacesDocument {
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
}

impl From<NamespacesDocument> for Registry {
    fn from(doc: NamespacesDocument) -> Self {
        let mut registry = Registry::new();
        for ns in doc.namespaces {
            let targets = ns
                .connection_data
                .into_iter()
                .map(ConnectionTarget::from)
                .collect();
            // Hand-edited stores can repeat a name or leave a namespace without targets.
            if let Some(entry) = NamespaceEntry::with_targets(&ns.name, targets) {
                registry.upsert(entry);
            }
        }
        registry
    }
}

impl From<Registry> for NamespacesDocument {
    fn from(registry: Registry) -> Self {
        Self {
            namespaces: registry
                .into_entries()
                .map(|entry| Namespace {
                    name: entry.name,
                    connection_data: entry
                        .targets
                        .into_iter()
                        .map(ConnectionData::from)
                        .collect(),
                })
                .collect(),
        }
    }
}
// endregion
