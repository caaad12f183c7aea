// [libs/infra/vendor-client/src/errors.rs]
/*!
 * APARATO: VENDOR CLIENT ERROR CATALOG (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACION SEMANTICA DE FALLOS DE COMUNICACION CON EL VENDOR
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendorClientError {
    /// Fallo de red, TLS o timeout de conexion/lectura.
    #[error("[L3_VENDOR_NET_FAULT]: UPLINK_SEVERED -> {0}")]
    Network(#[from] reqwest::Error),

    /// El cuerpo de la respuesta no pudo decodificarse como JSON.
    #[error("[L3_VENDOR_DECODE_FAULT]: RESPONSE_NOT_JSON -> {0}")]
    Decode(#[from] serde_json::Error),

    /// Las credenciales primaria y de respaldo fallaron ambas.
    #[error("[L3_VENDOR_AUTH_FAULT]: ALL_CREDENTIALS_REJECTED")]
    AuthenticationFailed,

    /// Un 401 persistio incluso despues de un refresco de token.
    #[error("[L3_VENDOR_AUTH_FAULT]: TOKEN_REFRESH_DID_NOT_RECOVER")]
    Unauthorized,

    /// 404: sin reintento, se trata como ausencia de datos para ese terminal/estado.
    #[error("[L3_VENDOR_DATA_FAULT]: RESOURCE_NOT_FOUND")]
    NotFound,

    /// 5xx devuelto por el proveedor.
    #[error("[L3_VENDOR_SERVER_FAULT]: UPSTREAM_ERROR -> HTTP_{0}")]
    ServerError(u16),

    /// El envelope de respuesta no tenia la forma esperada (ni lista ni objeto donde se esperaba uno).
    #[error("[L3_VENDOR_SCHEMA_FAULT]: MALFORMED_ENVELOPE -> {0}")]
    MalformedResponse(String),

    /// Los reintentos se agotaron para esta llamada.
    #[error("[L3_VENDOR_RETRY_FAULT]: RETRIES_EXHAUSTED -> {0}")]
    RetriesExhausted(String),
}

impl VendorClientError {
    /// Si es verdadero, esta categoria de fallo consume un intento de reintento
    ///: 5xx, errores de red y fallos de parseo JSON.
    pub fn consumes_retry(&self) -> bool {
        matches!(
            self,
            VendorClientError::Network(_) | VendorClientError::Decode(_) | VendorClientError::ServerError(_)
        )
    }

    /// 404 es terminal: no hay reintento, se trata como "sin datos".
    pub fn is_terminal_no_data(&self) -> bool {
        matches!(self, VendorClientError::NotFound)
    }
}
