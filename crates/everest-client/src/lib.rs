//! # everest-client
//!
//! Client adapter for the Percona Everest API.
//!
//! The adapter can reach an Everest server two ways:
//!
//! 1. **Direct** — a plain base URL, for steady-state use once the server
//!    has a stable address.
//! 2. **Kubernetes service proxy** — requests are tunneled through the
//!    Kubernetes API server to the `everest` service inside the cluster,
//!    authenticated with the caller's kubeconfig. Intended for provisioning
//!    only, before a direct address exists.
//!
//! Every call goes through one response-handling path: 2xx responses are
//! decoded from JSON (an empty body is fine and yields the type's default
//! value), anything else is turned into an [`EverestError`] that keeps the
//! server's own message and the HTTP status.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use everest_client::Everest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let everest = Everest::from_url("https://everest.example.com")?;
//!
//!     for cluster in everest.list_kubernetes_clusters().await? {
//!         println!("{} ({})", cluster.name, cluster.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Callers that need to tell an explicit server-side rejection apart from
//! infrastructure trouble can match on [`EverestError::Server`] (or use
//! [`EverestError::is_server`]).

pub mod api;
pub mod client;
pub mod error;
mod transport;
pub mod types;

// Re-export primary types
pub use api::ApiClient;
pub use client::Everest;
pub use error::{ErrorEnvelope, EverestError, EverestResult};
pub use types::{
    CreateMonitoringInstanceRequest, KubernetesCluster, MonitoringInstance,
    MonitoringInstanceType, PmmCredentials, RegisterKubernetesClusterRequest,
    UnregisterKubernetesClusterRequest,
};
