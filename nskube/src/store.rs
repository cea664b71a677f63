use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::document::NamespacesDocument;
use crate::error::StoreError;
use crate::registry::Registry;

pub const STORE_FILE: &str = "namespaces.yaml";

/// `~/.lmi`, falling back to the working directory when no home is known.
pub fn lmi_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".lmi")
}

pub fn default_store_path() -> PathBuf {
    lmi_dir().join(STORE_FILE)
}

/// Reads the store at `path`.
///
/// A missing or unreadable file is a cold start and yields an empty registry.
/// A file that reads but does not parse, including one that is not UTF-8, is an error:
/// merging into it would lose data.
pub fn load(path: &Path) -> Result<Registry, StoreError> {
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!("no namespace store at {}, starting empty", path.display());
            return Ok(Registry::new());
        }
        Err(err) => {
            warn!("could not read namespace store {}: {err}", path.display());
            return Ok(Registry::new());
        }
    };

    if contents.iter().all(u8::is_ascii_whitespace) {
        return Ok(Registry::new());
    }

    let doc: NamespacesDocument =
        serde_yaml::from_slice(&contents).map_err(|source| StoreError::Corrupt {
            path: path.to_owned(),
            source,
        })?;
    Ok(doc.into())
}

/// Replaces the store at `path` with `registry`.
///
/// Writes a sibling file first and renames it into place, so readers only ever see a
/// complete store.
pub fn save(registry: &Registry, path: &Path) -> Result<(), StoreError> {
    let doc = NamespacesDocument::from(registry.clone());
    let yaml = serde_yaml::to_string(&doc).map_err(StoreError::Serialize)?;

    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    debug!("writing {} namespaces to {}", registry.len(), path.display());
    fs::write(&tmp, yaml).map_err(write_err)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(err));
    }

    Ok(())
}
