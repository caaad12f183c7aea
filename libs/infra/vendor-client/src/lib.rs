// INICIO DEL ARCHIVO [libs/infra/vendor-client/src/lib.rs]
/*!
 * =================================================================
 * APARATO: VENDOR CLIENT (V1.0 - SOBERANO)
 * CLASIFICACION: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: SESION HTTP, GESTOR DE AUTENTICACION Y CLIENTE TIPADO SIGIT
 *
 * VISION HIPER-HOLISTICA:
 * Agrupa la sesion HTTP, el gestor de autenticacion y el cliente tipado
 * detras de un unico `ApiClient`: la sesion posee el token como campo propio
 * (sin grafo ciclico sesion-token-sesion), el gestor de autenticacion
 * posee las credenciales vigentes, y el cliente tipado es el unico
 * punto que clasifica fallos y aplica la politica de reintento.
 * =================================================================
 */

pub mod auth;
pub mod client;
pub mod credentials;
pub mod envelope;
pub mod errors;
pub mod session;

pub use auth::{ActiveCredential, AuthManager};
pub use client::{ApiClient, DEFAULT_MAX_RETRIES, INTER_TERMINAL_PACING, RETRY_SLEEP};
pub use credentials::{CredentialSet, Credentials};
pub use envelope::{parse_response_envelope, ResponseEnvelope, VendorBody};
pub use errors::VendorClientError;
pub use session::{classify_non_success_status, VendorSession};
// FIN DEL ARCHIVO [libs/infra/vendor-client/src/lib.rs]
