//! Request and response bodies for the Everest endpoints.
//!
//! Response types implement `Default` because an empty success body decodes
//! to the zero value (see [`crate::client::Everest`]).

use serde::{Deserialize, Serialize};

/// A Kubernetes cluster registered in Everest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubernetesCluster {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Body for registering a Kubernetes cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterKubernetesClusterRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Body for unregistering a Kubernetes cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnregisterKubernetesClusterRequest {
    /// Remove the cluster even if it still has resources attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,

    /// Proceed even when the cluster itself is unreachable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_kubernetes_unavailable: Option<bool>,
}

/// Kind of monitoring instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringInstanceType {
    #[default]
    Pmm,
}

/// A monitoring instance known to Everest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitoringInstance {
    #[serde(rename = "type")]
    pub instance_type: MonitoringInstanceType,
    pub name: String,
    pub url: String,
}

/// Credentials for a PMM monitoring instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmmCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body for creating a monitoring instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateMonitoringInstanceRequest {
    #[serde(rename = "type")]
    pub instance_type: MonitoringInstanceType,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmm: Option<PmmCredentials>,
}
