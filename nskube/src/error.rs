use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::registry::ConnectionTarget;

/// A call to gcloud or kubectl that did not produce a usable answer.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("could not parse output of `{command}`: {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("namespace store {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("could not serialize namespace store: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("could not write namespace store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Cluster,
    Project,
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintKind::Cluster => f.write_str("cluster"),
            HintKind::Project => f.write_str("project"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{0} doesn't exist in the namespace store, check the name or run a scan to refresh it")]
    NotFound(String),

    #[error("no known {kind} matching '{hint}' for namespace {namespace}, check the {kind} or run a scan to refresh the store")]
    HintMismatch {
        namespace: String,
        kind: HintKind,
        hint: String,
    },

    #[error("namespace {name} exists in {} clusters, pass --cluster or --project to pick one", candidates.len())]
    Ambiguous {
        name: String,
        candidates: Vec<ConnectionTarget>,
    },

    #[error("'{0}' is not a valid choice")]
    InvalidSelection(String),

    #[error("could not read selection: {0}")]
    Prompt(#[source] io::Error),
}

impl ResolveError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ResolveError::Prompt(_) => 1,
            _ => 2,
        }
    }
}
