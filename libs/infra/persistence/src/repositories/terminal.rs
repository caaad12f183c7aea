// [libs/infra/persistence/src/repositories/terminal.rs]
/*!
 * APARATO: TERMINAL DETAILS REPOSITORY (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DE SOLO-ANEXADO DE OBSERVACIONES DE TERMINAL
 *
 * Cada `INSERT` es su propia sentencia dentro de una unica transaccion para
 * el stream completo del ciclo; un fallo a mitad de lote revierte solo este
 * stream y el llamador continua con los demas.
 */

use crate::errors::PersistenceError;
use crate::schema::{apply_ddl, TERMINAL_DETAILS_DDL};
use sentinel_domain_models::TerminalStatusRecord;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

const STREAM: &str = "terminal_details";

#[instrument(skip(pool, records), fields(count = records.len()))]
pub async fn persist_terminal_details(
    pool: &PgPool,
    records: &[TerminalStatusRecord],
) -> Result<usize, PersistenceError> {
    if records.is_empty() {
        return Ok(0);
    }

    apply_ddl(pool, TERMINAL_DETAILS_DDL).await?;

    let mut tx = pool.begin().await?;
    for record in records {
        let outcome = sqlx::query(
            r#"
            INSERT INTO terminal_details (
                unique_request_id, terminal_id, location, issue_state_name, serial_number,
                retrieved_date, fetched_status, raw_terminal_data, fault_data, metadata
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.unique_request_id)
        .bind(&record.terminal_id)
        .bind(&record.location)
        .bind(&record.issue_state_name)
        .bind(&record.serial_number)
        .bind(record.retrieved_date)
        .bind(&record.fetched_status)
        .bind(&record.raw_terminal_data)
        .bind(Json(&record.fault_data))
        .bind(Json(&record.metadata))
        .execute(&mut *tx)
        .await;

        if let Err(source) = outcome {
            warn!("⚠️ [TERMINAL_REPO]: Write to [{STREAM}] failed at terminal [{}], rolling back this stream only.", record.terminal_id);
            tx.rollback().await.ok();
            return Err(PersistenceError::StreamRolledBack { stream: STREAM, source });
        }
    }

    tx.commit().await?;
    info!("💾 [TERMINAL_REPO]: Persisted {} terminal observations to [{STREAM}].", records.len());
    Ok(records.len())
}
