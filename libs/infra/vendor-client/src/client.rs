// [libs/infra/vendor-client/src/client.rs]
/*!
 * APARATO: API CLIENT (ESTRATO L3)
 * RESPONSABILIDAD: UNA OPERACION TIPADA POR ENDPOINT VENDOR, CON POLITICA DE REINTENTO
 *
 * Cada llamada pasa por un unico punto (`call`) que aplica la politica de
 * reintentos: un 401 dispara un refresco de token sin consumir reintento;
 * un 404 es terminal; un 5xx, un error de red o un fallo de parseo JSON
 * consumen un reintento hasta `max_retries`.
 */

use crate::auth::AuthManager;
use crate::envelope::{parse_response_envelope, ResponseEnvelope};
use crate::errors::VendorClientError;
use crate::session::{classify_non_success_status, VendorSession};
use reqwest::StatusCode;
use sentinel_domain_models::VendorStatus;
use std::time::Duration;
use tracing::{instrument, warn};

/// Intervalo fijo entre reintentos: no hay backoff exponencial.
pub const RETRY_SLEEP: Duration = Duration::from_secs(3);
/// Valor por defecto de reintentos por llamada; configurable por plataforma
/// (2 por defecto, 3 en ciertas plataformas).
pub const DEFAULT_MAX_RETRIES: u32 = 2;
/// Pausa entre peticiones consecutivas de la fase P5.
pub const INTER_TERMINAL_PACING: Duration = Duration::from_millis(200);

const DASHBOARD_PATH: &str = "/sigit/reports/dashboards?terminal_type=ATM&status_filter=Status";
const TERMINAL_SEARCH_PATH: &str = "/sigit/terminal/searchTerminalDashBoard?number_of_occurrences=30&terminal_type=ATM";
const CASH_INFO_PATH: &str = "/sigit/terminal/searchTerminal?number_of_occurrences=30&terminal_type=ATM&language=EN";

#[derive(Debug, Clone, Copy)]
enum HttpMethod {
    Put,
}

pub struct ApiClient {
    session: VendorSession,
    auth: AuthManager,
    max_retries: u32,
}

impl ApiClient {
    pub fn new(session: VendorSession, auth: AuthManager, max_retries: u32) -> Self {
        Self { session, auth, max_retries }
    }

    pub fn session(&self) -> &VendorSession {
        &self.session
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    /// Asegura que la sesion tenga un token antes de la primera llamada del
    /// ciclo. Si la autenticacion fracasa tras agotar ambos
    /// credenciales, propaga `AuthenticationFailed` para que el orquestador
    /// entre en la rama de failover.
    #[instrument(skip(self))]
    pub async fn authenticate(&mut self) -> Result<(), VendorClientError> {
        self.auth.login(&mut self.session).await
    }

    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        self.auth.logout(&mut self.session).await;
    }

    /// P3: obtiene el cuerpo crudo del endpoint de dashboards, del cual el
    /// Processor extrae `fifth_graphic`.
    #[instrument(skip(self))]
    pub async fn fetch_reports_dashboard(&mut self) -> Result<serde_json::Value, VendorClientError> {
        let envelope = self.call(HttpMethod::Put, DASHBOARD_PATH, serde_json::json!({})).await?;
        Ok(envelope.raw)
    }

    /// P4: busca terminales bajo un filtro `issueStateName` vendor dado.
    /// Retorna la lista cruda de terminales (o vacia si el vendor no reporto
    /// coincidencias para este filtro).
    #[instrument(skip(self))]
    pub async fn search_terminals_by_status(
        &mut self,
        status: VendorStatus,
    ) -> Result<Vec<serde_json::Value>, VendorClientError> {
        let body = serde_json::json!({
            "parameters_list": [{ "parameter_name": "issueStateName", "parameter_values": [status.as_vendor_str()] }]
        });
        let envelope = self.call(HttpMethod::Put, TERMINAL_SEARCH_PATH, body).await?;
        Ok(envelope.body.as_list().map(<[_]>::to_vec).unwrap_or_default())
    }

    /// P5: detalle de un terminal individual, incluyendo `faultList` si el
    /// terminal tiene una falla activa. `issue_state_code` por defecto es
    /// `HARD` cuando el terminal no trae uno propio.
    #[instrument(skip(self))]
    pub async fn fetch_terminal_details(
        &mut self,
        terminal_id: &str,
        issue_state_code: &str,
    ) -> Result<Vec<serde_json::Value>, VendorClientError> {
        let path = format!("{TERMINAL_SEARCH_PATH}&terminal_id={terminal_id}");
        let body = serde_json::json!({
            "parameters_list": [{ "parameter_name": "issueStateCode", "parameter_values": [issue_state_code] }]
        });
        let envelope = self.call(HttpMethod::Put, &path, body).await?;
        Ok(envelope.body.as_list().map(<[_]>::to_vec).unwrap_or_default())
    }

    /// P6: posicion de efectivo cruda de un terminal. Se devuelve el
    /// envelope completo (no solo `body`) porque el Processor de cash
    /// necesita preservar la respuesta entera en `raw_cash_data` incluso
    /// cuando resulta en un registro nulo.
    #[instrument(skip(self))]
    pub async fn fetch_cash_info(&mut self, terminal_id: &str) -> Result<serde_json::Value, VendorClientError> {
        let path = format!("{CASH_INFO_PATH}&terminal_id={terminal_id}");
        let envelope = self.call(HttpMethod::Put, &path, serde_json::json!({})).await?;
        Ok(envelope.raw)
    }

    /// El unico punto de entrada de red para peticiones autenticadas.
    /// Aplica la clasificacion de fallos y la politica de reintento;
    /// un 401 dispara exactamente un refresco de token.
    async fn call(
        &mut self,
        method: HttpMethod,
        path_and_query: &str,
        inner_body: serde_json::Value,
    ) -> Result<ResponseEnvelope, VendorClientError> {
        let mut attempt: u32 = 0;
        let mut refreshed = false;

        loop {
            let envelope_body = serde_json::json!({
                "header": {
                    "logged_user": self.session.logged_user(),
                    "user_token": self.session.token().unwrap_or_default(),
                },
                "body": inner_body,
            });

            let send_result = match method {
                HttpMethod::Put => self.session.send_put(path_and_query, envelope_body).await,
            };

            let (status, raw) = match send_result {
                Ok(pair) => pair,
                Err(error @ (VendorClientError::Network(_) | VendorClientError::Decode(_))) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        return Err(VendorClientError::RetriesExhausted(format!("{path_and_query}: {error}")));
                    }
                    warn!("🔁 [API_CLIENT]: Transient fault on [{path_and_query}] ({error}), retry {attempt}/{}.", self.max_retries);
                    tokio::time::sleep(RETRY_SLEEP).await;
                    continue;
                }
                Err(other) => return Err(other),
            };

            if status == StatusCode::UNAUTHORIZED {
                if refreshed {
                    return Err(VendorClientError::Unauthorized);
                }
                refreshed = true;
                warn!("🔑 [API_CLIENT]: 401 on [{path_and_query}], refreshing token once.");
                self.auth.login(&mut self.session).await?;
                continue;
            }

            if status == StatusCode::NOT_FOUND {
                return Err(VendorClientError::NotFound);
            }

            if status.is_server_error() {
                attempt += 1;
                if attempt > self.max_retries {
                    return Err(VendorClientError::RetriesExhausted(format!("{path_and_query}: HTTP_{status}")));
                }
                warn!("🔁 [API_CLIENT]: Upstream {status} on [{path_and_query}], retry {attempt}/{}.", self.max_retries);
                tokio::time::sleep(RETRY_SLEEP).await;
                continue;
            }

            if !status.is_success() {
                return Err(classify_non_success_status(status));
            }

            let envelope = parse_response_envelope(raw);
            if let Some(refreshed_token) = &envelope.user_token {
                self.session.set_token(Some(refreshed_token.clone()));
            }
            return Ok(envelope);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialSet;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let mut session = VendorSession::new(server.uri()).unwrap();
        session.set_token(Some("tok-initial".to_string()));
        session.set_logged_user("operator");
        ApiClient::new(session, AuthManager::new(CredentialSet::primary_only("operator", "pw")), DEFAULT_MAX_RETRIES)
    }

    #[tokio::test]
    async fn not_found_is_terminal_and_does_not_retry() {
        let server = MockServer::start().await;
        Mock::given(method("PUT")).and(path("/sigit/reports/dashboards")).respond_with(ResponseTemplate::new(404)).expect(1).mount(&server).await;

        let mut client = client_for(&server);
        let result = client.fetch_reports_dashboard().await;
        assert!(matches!(result, Err(VendorClientError::NotFound)));
    }

    #[tokio::test]
    async fn server_error_is_retried_up_to_max_retries_then_gives_up() {
        let server = MockServer::start().await;
        Mock::given(method("PUT")).and(path("/sigit/reports/dashboards")).respond_with(ResponseTemplate::new(503)).mount(&server).await;

        let mut client = ApiClient::new(
            {
                let mut s = VendorSession::new(server.uri()).unwrap();
                s.set_token(Some("t".into()));
                s
            },
            AuthManager::new(CredentialSet::primary_only("u", "p")),
            1,
        );

        let result = client.fetch_reports_dashboard().await;
        assert!(matches!(result, Err(VendorClientError::RetriesExhausted(_))));
    }

    #[tokio::test]
    async fn a_401_triggers_exactly_one_refresh_and_then_succeeds() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/sigit/reports/dashboards"))
            .respond_with(ResponseTemplate::new(401))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sigit/user/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"user_token": "tok-refreshed"})))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/sigit/reports/dashboards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "header": {"result_code": "000"},
                "body": {"fifth_graphic": []}
            })))
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        let result = client.fetch_reports_dashboard().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn search_by_status_returns_empty_list_when_body_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/sigit/terminal/searchTerminalDashBoard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"header": {"result_code": "001"}})))
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        let terminals = client.search_terminals_by_status(VendorStatus::Available).await.unwrap();
        assert!(terminals.is_empty());
    }
}
