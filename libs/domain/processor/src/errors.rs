// [libs/domain/processor/src/errors.rs]
/*!
 * APARATO: PROCESSOR ERROR CATALOG (ESTRATO L2)
 * RESPONSABILIDAD: FALLOS DE TRANSFORMACION DE PAYLOADS VENDOR
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    /// El payload `fifth_graphic` no contenia una entrada para la region esperada.
    #[error("[L2_PROCESSOR_FAULT]: REGION_NOT_FOUND -> {0}")]
    RegionNotFound(String),

    /// El bloque `state_count` esperado estaba ausente o vacio.
    #[error("[L2_PROCESSOR_FAULT]: EMPTY_STATE_COUNT")]
    EmptyStateCount,
}
