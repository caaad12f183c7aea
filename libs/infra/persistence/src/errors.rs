// [libs/infra/persistence/src/errors.rs]
/*!
 * APARATO: PERSISTENCE ERROR CATALOG (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACION SEMANTICA DE FALLOS DE ESCRITURA
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Fallo al adquirir una conexion del pool o al ejecutar la DDL idempotente.
    #[error("[L3_PERSISTENCE_CONN_FAULT]: DATABASE_LINK_FAILED -> {0}")]
    Connection(#[from] sqlx::Error),

    /// Un stream (regional, terminal, cash, legacy) fallo y su transaccion
    /// fue revertida; el ciclo continua con los streams restantes.
    #[error("[L3_PERSISTENCE_STREAM_FAULT]: STREAM_ROLLED_BACK[{stream}] -> {source}")]
    StreamRolledBack { stream: &'static str, source: sqlx::Error },
}
