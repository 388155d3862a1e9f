//! Low-level bound client — one method per Everest endpoint.
//!
//! This layer knows paths, verbs, and request bodies, and nothing about
//! response handling: every method hands back the raw [`reqwest::Response`]
//! (or the transport error) untouched. Status classification, decoding and
//! error translation live in [`crate::client`].

use reqwest::{Client, Response};
use url::Url;

use crate::types::{
    CreateMonitoringInstanceRequest, RegisterKubernetesClusterRequest,
    UnregisterKubernetesClusterRequest,
};

/// Everest API client bound to one base URL and one HTTP transport.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Resolved base URL, version segment included.
    base_url: Url,

    /// HTTP client.
    http: Client,
}

impl ApiClient {
    /// Create a client bound to the given base URL, using a default HTTP
    /// transport.
    ///
    /// The URL must be a valid base (an `http`/`https` address, as produced
    /// by [`crate::Everest::from_url`]). Cannot-be-a-base URLs such as
    /// `mailto:` are unsupported and panic when an endpoint path is built.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// Replace the HTTP transport (used by the Kubernetes proxy mode to
    /// install a kubeconfig-authenticated client).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// The base URL this client is bound to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL must be a valid base")
            .pop_if_empty()
            .extend(segments);
        url
    }

    // ── Kubernetes Cluster Endpoints ─────────────────────────

    pub async fn register_kubernetes_cluster(
        &self,
        body: &RegisterKubernetesClusterRequest,
    ) -> Result<Response, reqwest::Error> {
        self.http
            .post(self.endpoint(&["kubernetes"]))
            .json(body)
            .send()
            .await
    }

    pub async fn list_kubernetes_clusters(&self) -> Result<Response, reqwest::Error> {
        self.http.get(self.endpoint(&["kubernetes"])).send().await
    }

    pub async fn get_kubernetes_cluster(&self, id: &str) -> Result<Response, reqwest::Error> {
        self.http
            .get(self.endpoint(&["kubernetes", id]))
            .send()
            .await
    }

    pub async fn unregister_kubernetes_cluster(
        &self,
        id: &str,
        body: &UnregisterKubernetesClusterRequest,
    ) -> Result<Response, reqwest::Error> {
        self.http
            .delete(self.endpoint(&["kubernetes", id]))
            .json(body)
            .send()
            .await
    }

    // ── Monitoring Instance Endpoints ────────────────────────

    pub async fn create_monitoring_instance(
        &self,
        body: &CreateMonitoringInstanceRequest,
    ) -> Result<Response, reqwest::Error> {
        self.http
            .post(self.endpoint(&["monitoring-instances"]))
            .json(body)
            .send()
            .await
    }

    pub async fn list_monitoring_instances(&self) -> Result<Response, reqwest::Error> {
        self.http
            .get(self.endpoint(&["monitoring-instances"]))
            .send()
            .await
    }

    pub async fn get_monitoring_instance(&self, name: &str) -> Result<Response, reqwest::Error> {
        self.http
            .get(self.endpoint(&["monitoring-instances", name]))
            .send()
            .await
    }

    pub async fn delete_monitoring_instance(
        &self,
        name: &str,
    ) -> Result<Response, reqwest::Error> {
        self.http
            .delete(self.endpoint(&["monitoring-instances", name]))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let api = client("https://host/v1");
        let url = api.endpoint(&["kubernetes", "abc"]);
        assert_eq!(url.as_str(), "https://host/v1/kubernetes/abc");
    }

    #[test]
    fn test_endpoint_percent_encodes_segments() {
        let api = client("https://host/v1");
        let url = api.endpoint(&["monitoring-instances", "my pmm"]);
        assert_eq!(
            url.as_str(),
            "https://host/v1/monitoring-instances/my%20pmm"
        );
    }

    #[test]
    #[should_panic(expected = "valid base")]
    fn test_endpoint_rejects_cannot_be_a_base_url() {
        let api = client("mailto:everest@example.com");
        api.endpoint(&["kubernetes"]);
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let api = client("https://host/v1/");
        let url = api.endpoint(&["kubernetes"]);
        assert_eq!(url.as_str(), "https://host/v1/kubernetes");
    }
}
