// [libs/infra/vendor-client/src/auth.rs]
/*!
 * APARATO: AUTH MANAGER (ESTRATO L3)
 * RESPONSABILIDAD: CICLO DE VIDA DE SESION AUTENTICADA CONTRA LA API SIGIT
 *
 * Prueba primero las credenciales primarias; si fallan, reintenta una sola
 * vez con las de respaldo. El par actualmente vigente es un campo de este
 * tipo, no una variable de modulo compartida.
 */

use crate::credentials::{CredentialSet, Credentials};
use crate::envelope::ResponseEnvelope;
use crate::errors::VendorClientError;
use crate::session::{classify_non_success_status, VendorSession};
use tracing::{info, instrument, warn};

const LOGIN_PATH: &str = "/sigit/user/login?language=EN";
const LOGOUT_PATH: &str = "/sigit/user/logout";

/// Cual credencial esta actualmente vigente en la sesion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveCredential {
    Primary,
    Fallback,
}

pub struct AuthManager {
    credentials: CredentialSet,
    active: Option<ActiveCredential>,
}

impl AuthManager {
    pub fn new(credentials: CredentialSet) -> Self {
        Self { credentials, active: None }
    }

    pub fn active_credential(&self) -> Option<ActiveCredential> {
        self.active
    }

    /// Inicia sesion: primaria primero, respaldo despues si existe. Deja el
    /// token y `logged_user` instalados en `session` cuando tiene exito.
    #[instrument(skip(self, session))]
    pub async fn login(&mut self, session: &mut VendorSession) -> Result<(), VendorClientError> {
        let primary = self.credentials.primary.clone();
        if self.attempt_login(session, &primary).await.is_ok() {
            self.active = Some(ActiveCredential::Primary);
            info!("🔑 [AUTH]: Login succeeded with primary credentials.");
            return Ok(());
        }

        if let Some(fallback) = self.credentials.fallback.clone() {
            warn!("🔑 [AUTH]: Primary credentials rejected, attempting fallback.");
            if self.attempt_login(session, &fallback).await.is_ok() {
                self.active = Some(ActiveCredential::Fallback);
                info!("🔑 [AUTH]: Login succeeded with fallback credentials.");
                return Ok(());
            }
        }

        warn!("🔑 [AUTH]: Both primary and fallback credentials were rejected.");
        Err(VendorClientError::AuthenticationFailed)
    }

    async fn attempt_login(
        &self,
        session: &mut VendorSession,
        credentials: &Credentials,
    ) -> Result<(), VendorClientError> {
        let envelope = serde_json::json!({
            "header": { "logged_user": credentials.username, "user_token": "" },
            "body": { "username": credentials.username, "password": credentials.password },
        });

        let (status, raw) = session.send_post(LOGIN_PATH, envelope).await?;
        if !status.is_success() {
            return Err(classify_non_success_status(status));
        }

        let token = ResponseEnvelope::extract_token(&raw).ok_or(VendorClientError::AuthenticationFailed)?;
        session.set_token(Some(token));
        session.set_logged_user(credentials.username.clone());
        Ok(())
    }

    /// Logout best-effort: nunca hace fallar el ciclo. El token se limpia
    /// localmente sin importar la respuesta del vendor.
    #[instrument(skip(self, session))]
    pub async fn logout(&mut self, session: &mut VendorSession) {
        let Some(token) = session.token().map(str::to_string) else {
            return;
        };

        let envelope = serde_json::json!({
            "header": { "logged_user": session.logged_user(), "user_token": token },
            "body": {},
        });

        match session.send_put(LOGOUT_PATH, envelope).await {
            Ok((status, _)) if status.is_success() => info!("🔓 [AUTH]: Logout acknowledged by vendor."),
            Ok((status, _)) => warn!("🔓 [AUTH]: Logout returned non-success status {status}, proceeding anyway."),
            Err(error) => warn!("🔓 [AUTH]: Logout request failed ({error}), clearing token locally anyway."),
        }

        session.set_token(None);
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialSet;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn primary_credentials_succeed_without_touching_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sigit/user/login"))
            .and(body_partial_json(serde_json::json!({"body": {"username": "primary_user"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"user_token": "tok-primary"})))
            .mount(&server)
            .await;

        let mut session = VendorSession::new(server.uri()).unwrap();
        let mut manager = AuthManager::new(CredentialSet::with_fallback(
            ("primary_user", "primary_pass"),
            ("fallback_user", "fallback_pass"),
        ));

        manager.login(&mut session).await.unwrap();
        assert_eq!(manager.active_credential(), Some(ActiveCredential::Primary));
        assert_eq!(session.token(), Some("tok-primary"));
    }

    #[tokio::test]
    async fn falls_back_to_secondary_credentials_when_primary_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sigit/user/login"))
            .and(body_partial_json(serde_json::json!({"body": {"username": "primary_user"}})))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sigit/user/login"))
            .and(body_partial_json(serde_json::json!({"body": {"username": "fallback_user"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"user_token": "tok-fallback"})))
            .mount(&server)
            .await;

        let mut session = VendorSession::new(server.uri()).unwrap();
        let mut manager = AuthManager::new(CredentialSet::with_fallback(
            ("primary_user", "primary_pass"),
            ("fallback_user", "fallback_pass"),
        ));

        manager.login(&mut session).await.unwrap();
        assert_eq!(manager.active_credential(), Some(ActiveCredential::Fallback));
        assert_eq!(session.token(), Some("tok-fallback"));
    }

    #[tokio::test]
    async fn both_credentials_rejected_yields_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).and(path("/sigit/user/login")).respond_with(ResponseTemplate::new(401)).mount(&server).await;

        let mut session = VendorSession::new(server.uri()).unwrap();
        let mut manager = AuthManager::new(CredentialSet::with_fallback(
            ("primary_user", "primary_pass"),
            ("fallback_user", "fallback_pass"),
        ));

        let result = manager.login(&mut session).await;
        assert!(matches!(result, Err(VendorClientError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn logout_clears_token_even_on_non_200_response() {
        let server = MockServer::start().await;
        Mock::given(method("PUT")).and(path("/sigit/user/logout")).respond_with(ResponseTemplate::new(500)).mount(&server).await;

        let mut session = VendorSession::new(server.uri()).unwrap();
        session.set_token(Some("stale-token".to_string()));

        let mut manager = AuthManager::new(CredentialSet::primary_only("u", "p"));
        manager.logout(&mut session).await;

        assert!(session.token().is_none());
    }
}
