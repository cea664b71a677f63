use std::io;

use crate::error::{HintKind, ResolveError};
use crate::registry::{ConnectionTarget, Registry};

#[derive(Debug, Clone, Default)]
pub struct ResolveHints {
    /// Fragment of the cluster name. Wins over `project` when both are set.
    pub cluster: Option<String>,
    /// Fragment of the project name.
    pub project: Option<String>,
}

/// Asks someone to pick one of several targets.
///
/// Returns the raw answer; the resolver parses it as an index into `targets`.
pub trait Chooser {
    fn choose(&mut self, namespace: &str, targets: &[ConnectionTarget]) -> io::Result<String>;
}

impl<F> Chooser for F
where
    F: FnMut(&str, &[ConnectionTarget]) -> io::Result<String>,
{
    fn choose(&mut self, namespace: &str, targets: &[ConnectionTarget]) -> io::Result<String> {
        self(namespace, targets)
    }
}

fn first_containing<'a>(
    targets: &'a [ConnectionTarget],
    hint: &str,
    field: impl Fn(&ConnectionTarget) -> &str,
) -> Option<&'a ConnectionTarget> {
    targets.iter().find(|t| field(t).contains(hint))
}

/// Picks the one target `name` should connect to.
///
/// A single known target is returned as is, hints or not. With several, the first
/// target whose cluster (or else project) contains the hint wins; multiple matches are
/// not reported. Without hints the chooser decides, and a bad answer is final.
pub fn resolve<'r>(
    registry: &'r Registry,
    name: &str,
    hints: &ResolveHints,
    chooser: Option<&mut dyn Chooser>,
) -> Result<&'r ConnectionTarget, ResolveError> {
    let entry = registry
        .find(name)
        .ok_or_else(|| ResolveError::NotFound(name.trim_end().to_owned()))?;
    let targets = entry.targets.as_slice();

    if let [only] = targets {
        return Ok(only);
    }

    let mismatch = |kind, hint: &str| ResolveError::HintMismatch {
        namespace: entry.name.clone(),
        kind,
        hint: hint.to_owned(),
    };

    if let Some(hint) = &hints.cluster {
        return first_containing(targets, hint, |t| t.cluster.as_str())
            .ok_or_else(|| mismatch(HintKind::Cluster, hint.as_str()));
    }

    if let Some(hint) = &hints.project {
        return first_containing(targets, hint, |t| t.project.as_str())
            .ok_or_else(|| mismatch(HintKind::Project, hint.as_str()));
    }

    let chooser = chooser.ok_or_else(|| ResolveError::Ambiguous {
        name: entry.name.clone(),
        candidates: targets.to_vec(),
    })?;

    let answer = chooser
        .choose(&entry.name, targets)
        .map_err(ResolveError::Prompt)?;
    let answer = answer.trim();

    answer
        .parse::<usize>()
        .ok()
        .and_then(|index| targets.get(index))
        .ok_or_else(|| ResolveError::InvalidSelection(answer.to_owned()))
}
