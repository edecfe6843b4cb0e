//! ViaCEP lookup over HTTP

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::PostalCodeConfig;
use crate::domain::{Address, DomainError, DomainResult, PostalCodeResolver};
use crate::shared::errors::InfraError;

/// Resolves CEPs with `GET {base_url}/{cep}/json/`
pub struct ViaCepResolver {
    client: reqwest::Client,
    base_url: String,
}

/// ViaCEP body; `erro` is set (as `true` or `"true"`) for unknown codes
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    uf: Option<String>,
}

impl ViaCepResolver {
    pub fn new(config: &PostalCodeConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, cep: &str) -> String {
        format!("{}/{}/json/", self.base_url, cep)
    }
}

fn is_error_flag(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Turn a decoded body into an address
fn parse_response(cep: &str, body: ViaCepResponse) -> DomainResult<Address> {
    if body.erro.as_ref().map(is_error_flag).unwrap_or(false) {
        return Err(DomainError::PostalCodeNotFound(cep.to_string()));
    }

    let city = body.localidade.unwrap_or_default().trim().to_string();
    let state = body.uf.unwrap_or_default().trim().to_uppercase();

    if city.is_empty() {
        return Err(DomainError::Validation(format!(
            "Postal code {} returned no city",
            cep
        )));
    }
    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::Validation(format!(
            "Postal code {} returned an invalid state '{}'",
            cep, state
        )));
    }

    Ok(Address { city, state })
}

#[async_trait]
impl PostalCodeResolver for ViaCepResolver {
    async fn resolve(&self, cep: &str) -> DomainResult<Address> {
        let url = self.url(cep);
        debug!(cep, %url, "Resolving postal code");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(InfraError::from)?;

        let status = response.status();
        if !status.is_success() {
            warn!(cep, %status, "Postal code lookup failed");
            return Err(DomainError::PostalCodeUnavailable(format!(
                "lookup returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: ViaCepResponse = response.json().await.map_err(InfraError::from)?;
        parse_response(cep, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> ViaCepResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn found_address_is_normalized() {
        let address = parse_response(
            "01310100",
            body(r#"{"cep":"01310-100","localidade":" São Paulo ","uf":"sp"}"#),
        )
        .unwrap();
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
    }

    #[test]
    fn error_flag_means_not_found() {
        let err = parse_response("99999999", body(r#"{"erro": true}"#)).unwrap_err();
        assert!(matches!(err, DomainError::PostalCodeNotFound(_)));

        let err = parse_response("99999999", body(r#"{"erro": "true"}"#)).unwrap_err();
        assert!(matches!(err, DomainError::PostalCodeNotFound(_)));
    }

    #[test]
    fn missing_city_or_bad_state_is_invalid() {
        let err = parse_response("01310100", body(r#"{"localidade":"","uf":"SP"}"#)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err =
            parse_response("01310100", body(r#"{"localidade":"X","uf":"S1"}"#)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn url_has_trailing_json_segment() {
        let resolver = ViaCepResolver::new(&PostalCodeConfig {
            base_url: "https://viacep.com.br/ws/".into(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(
            resolver.url("01310100"),
            "https://viacep.com.br/ws/01310100/json/"
        );
    }

    async fn fake_viacep() -> String {
        use axum::extract::Path;
        use axum::http::StatusCode;
        use axum::response::IntoResponse;
        use axum::routing::get;

        async fn lookup(Path(cep): Path<String>) -> axum::response::Response {
            match cep.as_str() {
                "01310100" => {
                    axum::Json(serde_json::json!({"localidade": "São Paulo", "uf": "SP"}))
                        .into_response()
                }
                "99999999" => axum::Json(serde_json::json!({"erro": true})).into_response(),
                "11111111" => "<html>maintenance</html>".into_response(),
                _ => StatusCode::SERVICE_UNAVAILABLE.into_response(),
            }
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new().route("/{cep}/json/", get(lookup));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn resolver_at(base_url: String) -> ViaCepResolver {
        ViaCepResolver::new(&PostalCodeConfig {
            base_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn resolve_maps_lookup_outcomes() {
        let resolver = resolver_at(fake_viacep().await);

        let address = resolver.resolve("01310100").await.unwrap();
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");

        assert!(matches!(
            resolver.resolve("99999999").await,
            Err(DomainError::PostalCodeNotFound(_))
        ));
        assert!(matches!(
            resolver.resolve("20040020").await,
            Err(DomainError::PostalCodeUnavailable(msg)) if msg.contains("503")
        ));
        assert!(matches!(
            resolver.resolve("11111111").await,
            Err(DomainError::PostalCodeUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let resolver = resolver_at(format!("http://{}", addr));
        assert!(matches!(
            resolver.resolve("01310100").await,
            Err(DomainError::PostalCodeUnavailable(_))
        ));
    }
}
