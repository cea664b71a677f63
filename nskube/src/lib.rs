pub mod connect;
pub mod document;
pub mod error;
pub mod fake;
pub mod gcloud;
pub mod provider;
pub mod registry;
pub mod resolve;
pub mod scan;
pub mod store;

pub use connect::{connect, ConnectReport, ConnectStep};
pub use error::{HintKind, ProviderError, ResolveError, StoreError};
pub use gcloud::GcloudProvider;
pub use provider::{ClusterInfo, Provider};
pub use registry::{ConnectionTarget, NamespaceEntry, Registry};
pub use resolve::{resolve, Chooser, ResolveHints};
pub use scan::{scan, ScanOptions, ScanReport, ScanStep};
pub use store::{default_store_path, lmi_dir, load, save};
