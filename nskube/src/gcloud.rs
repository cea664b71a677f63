use std::ffi::OsStr;
use std::process::Command;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::provider::{ClusterInfo, Provider};

pub const DEFAULT_REQUEST_TIMEOUT: &str = "10s";

/// Talks to GKE through the `gcloud` and `kubectl` binaries.
///
/// A "project" here is a gcloud configuration name.
#[derive(Debug, Clone)]
pub struct GcloudProvider {
    pub gcloud: String,
    pub kubectl: String,
    /// Passed to `kubectl --request-timeout` when listing namespaces, so one hung
    /// cluster cannot stall a scan.
    pub request_timeout: String,
}

impl Default for GcloudProvider {
    fn default() -> Self {
        Self {
            gcloud: "gcloud".to_owned(),
            kubectl: "kubectl".to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT.to_owned(),
        }
    }
}

#[derive(Deserialize)]
struct Configuration {
    name: String,
}

#[derive(Deserialize)]
struct NamespaceList {
    #[serde(default)]
    items: Vec<NamespaceItem>,
}

#[derive(Deserialize)]
struct NamespaceItem {
    metadata: Metadata,
}

#[derive(Deserialize)]
struct Metadata {
    name: String,
}

fn run<I, S>(program: &str, args: I) -> Result<Vec<u8>, ProviderError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    let command = format!("{cmd:?}");
    debug!("running {command}");

    let output = cmd.output().map_err(|source| ProviderError::Spawn {
        program: program.to_owned(),
        source,
    })?;

    if !output.status.success() {
        return Err(ProviderError::Failed {
            command,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    Ok(output.stdout)
}

fn parse<T: DeserializeOwned>(command: &str, stdout: &[u8]) -> Result<T, ProviderError> {
    serde_json::from_slice(stdout).map_err(|source| ProviderError::Parse {
        command: command.to_owned(),
        source,
    })
}

fn parse_projects(stdout: &[u8]) -> Result<Vec<String>, ProviderError> {
    let configs: Vec<Configuration> = parse("gcloud config configurations list", stdout)?;
    Ok(configs.into_iter().map(|c| c.name).collect())
}

fn parse_clusters(stdout: &[u8]) -> Result<Vec<ClusterInfo>, ProviderError> {
    parse("gcloud container clusters list", stdout)
}

fn parse_namespaces(stdout: &[u8]) -> Result<Vec<String>, ProviderError> {
    let list: NamespaceList = parse("kubectl get ns", stdout)?;
    Ok(list.items.into_iter().map(|i| i.metadata.name).collect())
}

impl Provider for GcloudProvider {
    fn list_projects(&mut self) -> Result<Vec<String>, ProviderError> {
        let out = run(
            &self.gcloud,
            ["config", "configurations", "list", "--format", "json"],
        )?;
        parse_projects(&out)
    }

    fn activate_project(&mut self, project: &str) -> Result<(), ProviderError> {
        run(&self.gcloud, ["config", "configurations", "activate", project])?;
        Ok(())
    }

    fn list_clusters(&mut self) -> Result<Vec<ClusterInfo>, ProviderError> {
        let out = run(
            &self.gcloud,
            ["container", "clusters", "list", "--format", "json"],
        )?;
        parse_clusters(&out)
    }

    fn activate_cluster(&mut self, cluster: &str, location: &str) -> Result<(), ProviderError> {
        run(
            &self.gcloud,
            [
                "container",
                "clusters",
                "get-credentials",
                cluster,
                "--region",
                location,
            ],
        )?;
        Ok(())
    }

    fn list_namespaces(&mut self) -> Result<Vec<String>, ProviderError> {
        let out = run(
            &self.kubectl,
            [
                "get",
                "ns",
                "--request-timeout",
                self.request_timeout.as_str(),
                "-o",
                "json",
            ],
        )?;
        parse_namespaces(&out)
    }

    fn set_active_namespace(&mut self, namespace: &str) -> Result<(), ProviderError> {
        run(
            &self.kubectl,
            ["config", "set-context", "--current", "--namespace", namespace],
        )?;
        Ok(())
    }
}
