use std::fmt;

use log::warn;

use crate::error::ProviderError;
use crate::provider::Provider;
use crate::registry::ConnectionTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStep {
    ActivateProject,
    ActivateCluster,
    SetNamespace,
}

impl fmt::Display for ConnectStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectStep::ActivateProject => f.write_str("activating project"),
            ConnectStep::ActivateCluster => f.write_str("activating cluster"),
            ConnectStep::SetNamespace => f.write_str("setting namespace"),
        }
    }
}

#[derive(Debug, Default)]
pub struct ConnectReport {
    pub failures: Vec<(ConnectStep, ProviderError)>,
}

impl ConnectReport {
    pub fn is_connected(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Points the provider's tooling at `namespace` on `target`.
///
/// All three steps are attempted even when an earlier one fails, and nothing is undone,
/// so a failed connect can leave the tools half switched.
pub fn connect(
    provider: &mut dyn Provider,
    target: &ConnectionTarget,
    namespace: &str,
) -> ConnectReport {
    let mut report = ConnectReport::default();
    let steps = [
        (
            ConnectStep::ActivateProject,
            provider.activate_project(&target.project),
        ),
        (
            ConnectStep::ActivateCluster,
            provider.activate_cluster(&target.cluster, &target.region),
        ),
        (
            ConnectStep::SetNamespace,
            provider.set_active_namespace(namespace.trim_end()),
        ),
    ];

    for (step, result) in steps {
        if let Err(err) = result {
            warn!("{step} failed: {err}");
            report.failures.push((step, err));
        }
    }

    report
}
