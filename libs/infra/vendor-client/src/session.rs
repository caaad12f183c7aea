// [libs/infra/vendor-client/src/session.rs]
/*!
 * APARATO: VENDOR HTTP SESSION (ESTRATO L3)
 * RESPONSABILIDAD: CLIENTE TLS AGRUPADO, ACEPTACION DE CERTIFICADO AUTOFIRMADO
 *
 * La sesion es un valor poseido: el token vive como campo de este struct,
 * no en un grafo ciclico de sesion-token-sesion.
 */

use crate::errors::VendorClientError;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::instrument;

const USER_AGENT: &str = "sentinel-atm-collector/1.0";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const READ_TIMEOUT: Duration = Duration::from_secs(60);

pub struct VendorSession {
    client: Client,
    base_url: String,
    token: Option<String>,
    logged_user: String,
}

impl VendorSession {
    pub fn new(base_url: impl Into<String>) -> Result<Self, VendorClientError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            logged_user: String::new(),
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn set_logged_user(&mut self, logged_user: impl Into<String>) {
        self.logged_user = logged_user.into();
    }

    pub fn logged_user(&self) -> &str {
        &self.logged_user
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// Envia una peticion PUT con el envelope vendor y devuelve el estado HTTP
    /// crudo mas el cuerpo decodificado, sin clasificar aun el resultado --
    /// esa decision (401 vs 404 vs 5xx vs exito) pertenece al llamador, que
    /// conoce si esta en medio de un flujo de refresco.
    #[instrument(skip(self, body), fields(path = path_and_query))]
    pub async fn send_put(
        &self,
        path_and_query: &str,
        body: serde_json::Value,
    ) -> Result<(StatusCode, serde_json::Value), VendorClientError> {
        let response = self
            .client
            .put(self.url(path_and_query))
            .header("Content-Type", "application/json;charset=UTF-8")
            .json(&body)
            .send()
            .await?;
        self.decode(response).await
    }

    #[instrument(skip(self, body), fields(path = path_and_query))]
    pub async fn send_post(
        &self,
        path_and_query: &str,
        body: serde_json::Value,
    ) -> Result<(StatusCode, serde_json::Value), VendorClientError> {
        let response = self
            .client
            .post(self.url(path_and_query))
            .header("Content-Type", "application/json;charset=UTF-8")
            .json(&body)
            .send()
            .await?;
        self.decode(response).await
    }

    async fn decode(&self, response: reqwest::Response) -> Result<(StatusCode, serde_json::Value), VendorClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok((status, serde_json::Value::Null));
        }
        let value = serde_json::from_slice(&bytes)?;
        Ok((status, value))
    }
}

/// Clasifica un estado HTTP no-200 en la categoria de error correspondiente.
/// Los llamadores de 401 lo intercepten antes de invocar esto: este
/// clasificador asume que ya se decidio que no habra refresco.
pub fn classify_non_success_status(status: StatusCode) -> VendorClientError {
    match status {
        StatusCode::NOT_FOUND => VendorClientError::NotFound,
        StatusCode::UNAUTHORIZED => VendorClientError::Unauthorized,
        s if s.is_server_error() => VendorClientError::ServerError(s.as_u16()),
        s => VendorClientError::ServerError(s.as_u16()),
    }
}
