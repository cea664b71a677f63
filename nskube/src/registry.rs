use indexmap::IndexMap;

/// Everything needed to point local tooling at one cluster of one project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionTarget {
    pub project: String,
    pub cluster: String,
    pub region: String,
}

impl ConnectionTarget {
    pub fn new(
        project: impl Into<String>,
        cluster: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            cluster: cluster.into(),
            region: region.into(),
        }
    }
}

/// A namespace name and every place it has been seen.
///
/// `targets` is never empty and may hold the same target more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    pub name: String,
    pub targets: Vec<ConnectionTarget>,
}

fn normalize(name: &str) -> &str {
    name.trim_end()
}

impl NamespaceEntry {
    /// Returns `None` when the name is blank.
    pub fn new(name: &str, target: ConnectionTarget) -> Option<Self> {
        Self::with_targets(name, vec![target])
    }

    /// Returns `None` when the name is blank or there are no targets.
    pub fn with_targets(name: &str, targets: Vec<ConnectionTarget>) -> Option<Self> {
        let name = normalize(name);
        if name.is_empty() || targets.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_owned(),
            targets,
        })
    }
}

/// Namespace name to entry, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: IndexMap<String, NamespaceEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the entry's targets to an existing entry of the same name, or inserts it.
    ///
    /// Never removes anything and never deduplicates targets.
    pub fn upsert(&mut self, entry: NamespaceEntry) {
        match self.entries.get_mut(&entry.name) {
            Some(existing) => existing.targets.extend(entry.targets),
            None => {
                self.entries.insert(entry.name.clone(), entry);
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<&NamespaceEntry> {
        self.entries.get(normalize(name))
    }

    pub fn entries(&self) -> impl Iterator<Item = &NamespaceEntry> {
        self.entries.values()
    }

    pub fn into_entries(self) -> impl Iterator<Item = NamespaceEntry> {
        self.entries.into_values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east() -> ConnectionTarget {
        ConnectionTarget::new("p1", "eastCluster", "us-east1")
    }

    fn west() -> ConnectionTarget {
        ConnectionTarget::new("p1", "westCluster", "us-west1")
    }

    #[test]
    fn upsert_inserts_new_names() {
        let mut registry = Registry::new();
        registry.upsert(NamespaceEntry::new("payments", east()).unwrap());
        registry.upsert(NamespaceEntry::new("billing", west()).unwrap());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("payments").unwrap().targets, [east()]);
        assert_eq!(registry.find("billing").unwrap().targets, [west()]);
    }

    #[test]
    fn upsert_appends_to_existing_name() {
        let mut registry = Registry::new();
        registry.upsert(NamespaceEntry::new("payments", east()).unwrap());
        registry.upsert(NamespaceEntry::new("payments", west()).unwrap());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("payments").unwrap().targets, [east(), west()]);
    }

    #[test]
    fn upsert_same_target_twice_keeps_both() {
        let mut registry = Registry::new();
        registry.upsert(NamespaceEntry::new("payments", east()).unwrap());
        registry.upsert(NamespaceEntry::new("payments", east()).unwrap());

        assert_eq!(registry.find("payments").unwrap().targets, [east(), east()]);
    }

    #[test]
    fn find_trims_trailing_newline() {
        let mut registry = Registry::new();
        registry.upsert(NamespaceEntry::new("payments\n", east()).unwrap());

        assert_eq!(registry.find("payments").unwrap().name, "payments");
        assert!(registry.find("payments\n").is_some());
    }

    #[test]
    fn find_is_case_sensitive_and_exact() {
        let mut registry = Registry::new();
        registry.upsert(NamespaceEntry::new("payments", east()).unwrap());

        assert!(registry.find("Payments").is_none());
        assert!(registry.find("pay").is_none());
        assert!(registry.find("missing").is_none());
    }

    #[test]
    fn entries_keep_first_seen_order() {
        let mut registry = Registry::new();
        for name in ["zeta", "alpha", "mid", "alpha"] {
            registry.upsert(NamespaceEntry::new(name, east()).unwrap());
        }

        let names: Vec<_> = registry.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn new_rejects_blank_names() {
        assert!(NamespaceEntry::new("", east()).is_none());
        assert!(NamespaceEntry::new(" \n", east()).is_none());
        assert_eq!(NamespaceEntry::new("payments\n", east()).unwrap().name, "payments");
    }

    #[test]
    fn with_targets_rejects_blank_entries() {
        assert!(NamespaceEntry::with_targets("  \n", vec![east()]).is_none());
        assert!(NamespaceEntry::with_targets("payments", vec![]).is_none());
        assert!(NamespaceEntry::with_targets("payments", vec![east()]).is_some());
    }
}
