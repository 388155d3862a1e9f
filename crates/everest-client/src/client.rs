//! Everest connector — connection building and uniform response handling.

use std::future::Future;

use reqwest::Response;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::ApiClient;
use crate::error::{self, EverestError, EverestResult};
use crate::transport;
use crate::types::{
    CreateMonitoringInstanceRequest, KubernetesCluster, MonitoringInstance,
    RegisterKubernetesClusterRequest, UnregisterKubernetesClusterRequest,
};

/// Connector to the Everest API.
///
/// Immutable once built; safe to share across concurrent calls. Every call
/// is a single attempt — retry policy, if any, belongs to the caller.
#[derive(Debug, Clone)]
pub struct Everest {
    api: ApiClient,
}

impl Everest {
    /// Wrap an already-bound API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Connect to an Everest server at the given base URL.
    ///
    /// The fixed API version segment (`/v1`) is appended to the address.
    pub fn from_url(base_url: &str) -> EverestResult<Self> {
        let url = Url::parse(&format!("{base_url}/v1"))
            .map_err(|source| EverestError::ClientInit { source })?;
        tracing::debug!(url = %url, "resolved everest base url");
        Ok(Self::new(ApiClient::new(url)))
    }

    /// Connect to Everest by proxying requests to the in-cluster `everest`
    /// service through the Kubernetes API server.
    ///
    /// See <https://kubernetes.io/docs/tasks/access-application-cluster/access-cluster-services/#manually-constructing-apiserver-proxy-urls>
    ///
    /// Intended for provisioning only — prefer [`Everest::from_url`] once a
    /// stable direct address is known. No network call is made here; the
    /// kubeconfig's auth and TLS material is only installed on the HTTP
    /// transport.
    pub fn from_kubernetes_proxy(config: &kube::Config, namespace: &str) -> EverestResult<Self> {
        let mut url = Url::parse(&config.cluster_url.to_string())
            .map_err(|source| EverestError::KubeHost {
                source: Box::new(source),
            })?;
        url.path_segments_mut()
            .map_err(|()| EverestError::KubeHost {
                source: "kubernetes api host cannot be a base URL".into(),
            })?
            .pop_if_empty()
            .extend(["api", "v1", "namespaces"])
            .push(namespace)
            .extend(["services", "everest", "proxy", "v1"]);

        let http = transport::transport_for(config)?;
        tracing::debug!(url = %url, "resolved everest service-proxy base url");
        Ok(Self::new(ApiClient::new(url).with_http_client(http)))
    }

    /// The base URL this connector is bound to.
    pub fn base_url(&self) -> &Url {
        self.api.base_url()
    }

    // ── Kubernetes Cluster Operations ────────────────────────

    /// Register a Kubernetes cluster in Everest.
    pub async fn register_kubernetes_cluster(
        &self,
        body: &RegisterKubernetesClusterRequest,
    ) -> EverestResult<KubernetesCluster> {
        self.make_request(self.api.register_kubernetes_cluster(body))
            .await
    }

    /// List the registered Kubernetes clusters.
    pub async fn list_kubernetes_clusters(&self) -> EverestResult<Vec<KubernetesCluster>> {
        self.make_request(self.api.list_kubernetes_clusters()).await
    }

    /// Get a registered Kubernetes cluster by ID.
    pub async fn get_kubernetes_cluster(&self, id: &str) -> EverestResult<KubernetesCluster> {
        self.make_request(self.api.get_kubernetes_cluster(id)).await
    }

    /// Remove a Kubernetes cluster from Everest.
    pub async fn unregister_kubernetes_cluster(
        &self,
        id: &str,
        body: &UnregisterKubernetesClusterRequest,
    ) -> EverestResult<()> {
        self.make_request(self.api.unregister_kubernetes_cluster(id, body))
            .await
    }

    // ── Monitoring Instance Operations ───────────────────────

    /// Create a monitoring instance.
    pub async fn create_monitoring_instance(
        &self,
        body: &CreateMonitoringInstanceRequest,
    ) -> EverestResult<MonitoringInstance> {
        self.make_request(self.api.create_monitoring_instance(body))
            .await
    }

    /// List the known monitoring instances.
    pub async fn list_monitoring_instances(&self) -> EverestResult<Vec<MonitoringInstance>> {
        self.make_request(self.api.list_monitoring_instances())
            .await
    }

    /// Get a monitoring instance by name.
    pub async fn get_monitoring_instance(&self, name: &str) -> EverestResult<MonitoringInstance> {
        self.make_request(self.api.get_monitoring_instance(name))
            .await
    }

    /// Delete a monitoring instance by name.
    pub async fn delete_monitoring_instance(&self, name: &str) -> EverestResult<()> {
        self.make_request(self.api.delete_monitoring_instance(name))
            .await
    }

    // ── Internal Response Handling ───────────────────────────

    /// Awaits one API call and applies the common response handling.
    ///
    /// Transport errors pass through unchanged. A 2xx response decodes into
    /// `T`; an empty 2xx body (DELETE and friends) yields `T::default()`.
    /// Anything else is translated into a descriptive [`EverestError`].
    async fn make_request<T>(
        &self,
        call: impl Future<Output = Result<Response, reqwest::Error>>,
    ) -> EverestResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let response = call.await?;
        let status = response.status();
        tracing::debug!(status = %status, url = %response.url(), "everest response");

        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(error::translate(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            // No content, e.g. from DELETE. Not an error.
            return Ok(T::default());
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
