// [libs/infra/vendor-client/src/credentials.rs]
/*!
 * APARATO: VENDOR CREDENTIALS (ESTRATO L3)
 * RESPONSABILIDAD: PAR PRIMARIO/RESPALDO DE CREDENCIALES, SIN ESTADO GLOBAL
 */

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Conjunto de credenciales que el Auth Manager prueba en orden. El par
/// actualmente vigente vive dentro del `AuthManager`, no en una variable de
/// modulo compartida.
#[derive(Debug, Clone)]
pub struct CredentialSet {
    pub primary: Credentials,
    pub fallback: Option<Credentials>,
}

impl CredentialSet {
    pub fn primary_only(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            primary: Credentials { username: username.into(), password: password.into() },
            fallback: None,
        }
    }

    pub fn with_fallback(
        primary: (impl Into<String>, impl Into<String>),
        fallback: (impl Into<String>, impl Into<String>),
    ) -> Self {
        Self {
            primary: Credentials { username: primary.0.into(), password: primary.1.into() },
            fallback: Some(Credentials { username: fallback.0.into(), password: fallback.1.into() }),
        }
    }
}
