//! HTTP transport derived from a Kubernetes client configuration.
//!
//! Builds a [`reqwest::Client`] that authenticates the way the kubeconfig
//! says to: cluster root CAs, bearer token (inline or from a token file) and
//! inline client-certificate identity. Exec plugins, auth providers and
//! basic auth are not supported at this layer.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use kube::config::AuthInfo;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::ExposeSecret;

use crate::error::EverestError;

/// Derives an HTTP client from the kubeconfig's auth and TLS material.
pub(crate) fn transport_for(config: &kube::Config) -> Result<reqwest::Client, EverestError> {
    let mut builder = reqwest::Client::builder();

    if let Some(chain) = &config.root_cert {
        for der in chain {
            let cert = reqwest::Certificate::from_der(der).map_err(kube_transport)?;
            builder = builder.add_root_certificate(cert);
        }
    }

    if config.accept_invalid_certs {
        builder = builder.danger_accept_invalid_certs(true);
    }

    let auth = &config.auth_info;

    if let (Some(cert), Some(key)) = (&auth.client_certificate_data, &auth.client_key_data) {
        let mut pem = BASE64.decode(cert.trim()).map_err(kube_transport)?;
        pem.extend(
            BASE64
                .decode(key.expose_secret().trim())
                .map_err(kube_transport)?,
        );
        let identity = reqwest::Identity::from_pem(&pem).map_err(kube_transport)?;
        builder = builder.identity(identity);
    }

    if let Some(token) = bearer_token(auth)? {
        let mut value =
            HeaderValue::try_from(format!("Bearer {token}")).map_err(kube_transport)?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        builder = builder.default_headers(headers);
    }

    builder.build().map_err(kube_transport)
}

/// The bearer token configured in the kubeconfig, if any. An inline token
/// wins over a token file.
fn bearer_token(auth: &AuthInfo) -> Result<Option<String>, EverestError> {
    if let Some(token) = &auth.token {
        return Ok(Some(token.expose_secret().to_string()));
    }

    if let Some(path) = &auth.token_file {
        let token = std::fs::read_to_string(path).map_err(kube_transport)?;
        return Ok(Some(token.trim_end().to_string()));
    }

    Ok(None)
}

fn kube_transport<E>(source: E) -> EverestError
where
    E: std::error::Error + Send + Sync + 'static,
{
    EverestError::KubeTransport {
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> kube::Config {
        kube::Config::new("https://k8s.example.com:6443".parse().unwrap())
    }

    #[test]
    fn test_transport_from_bare_config() {
        assert!(transport_for(&config()).is_ok());
    }

    #[test]
    fn test_transport_accepts_invalid_certs_flag() {
        let mut config = config();
        config.accept_invalid_certs = true;
        assert!(transport_for(&config).is_ok());
    }

    #[test]
    fn test_inline_bearer_token() {
        let mut auth = AuthInfo::default();
        auth.token = Some("sekret".to_string().into());

        let token = bearer_token(&auth).unwrap();
        assert_eq!(token.as_deref(), Some("sekret"));
    }

    #[test]
    fn test_token_file_is_trimmed() {
        let path = std::env::temp_dir().join(format!("everest-token-{}", std::process::id()));
        std::fs::write(&path, "file-token\n").unwrap();

        let mut auth = AuthInfo::default();
        auth.token_file = Some(path.to_string_lossy().into_owned());
        let token = bearer_token(&auth).unwrap();

        std::fs::remove_file(&path).unwrap();
        assert_eq!(token.as_deref(), Some("file-token"));
    }

    #[test]
    fn test_missing_token_file_is_a_transport_error() {
        let mut auth = AuthInfo::default();
        auth.token_file = Some("/nonexistent/everest-token".into());

        let err = bearer_token(&auth).unwrap_err();
        assert!(matches!(err, EverestError::KubeTransport { .. }));
        assert_eq!(err.to_string(), "could not build kubernetes transport");
    }

    #[test]
    fn test_bad_certificate_data_is_a_transport_error() {
        let mut config = config();
        config.auth_info.client_certificate_data = Some("!!not-base64!!".into());
        config.auth_info.client_key_data = Some("!!not-base64!!".to_string().into());

        let err = transport_for(&config).unwrap_err();
        assert!(matches!(err, EverestError::KubeTransport { .. }));
    }
}
