// [libs/infra/registry/src/errors.rs]
/*!
 * APARATO: REGISTRY ERROR CATALOG (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACION SEMANTICA DE FALLOS DEL REGISTRO DURABLE
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// Fallo de lectura, escritura o renombrado sobre el archivo del registro.
    #[error("[L3_REGISTRY_IO_FAULT]: DISK_OPERATION_FAILED -> {0}")]
    Io(#[from] std::io::Error),

    /// El contenido en disco no pudo interpretarse como una lista de entradas validas.
    #[error("[L3_REGISTRY_DECODE_FAULT]: MALFORMED_REGISTRY_CONTENT -> {0}")]
    Decode(#[from] serde_json::Error),
}
