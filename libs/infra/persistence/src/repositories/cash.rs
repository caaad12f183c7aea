// [libs/infra/persistence/src/repositories/cash.rs]
/*!
 * APARATO: CASH INFORMATION REPOSITORY (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DEL STREAM DE POSICIONES DE EFECTIVO
 *
 * Persiste tanto registros normales como registros nulos sentinela;
 * `raw_cash_data` se conserva en ambos casos para depuracion.
 */

use crate::errors::PersistenceError;
use crate::schema::{apply_ddl, TERMINAL_CASH_INFORMATION_DDL};
use sentinel_domain_models::CashRecord;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

const STREAM: &str = "terminal_cash_information";

#[instrument(skip(pool, records), fields(count = records.len()))]
pub async fn persist_cash_records(pool: &PgPool, records: &[CashRecord]) -> Result<usize, PersistenceError> {
    if records.is_empty() {
        return Ok(0);
    }

    apply_ddl(pool, TERMINAL_CASH_INFORMATION_DDL).await?;

    let mut tx = pool.begin().await?;
    for record in records {
        let cassette_count_column = record.cassette_count;
        let outcome = sqlx::query(
            r#"
            INSERT INTO terminal_cash_information (
                unique_request_id, terminal_id, business_code, technical_code, external_id,
                retrieval_timestamp, event_date, total_cash_amount, total_currency,
                cassettes_data, cassette_count, has_low_cash_warning, has_cash_errors,
                is_null_record, null_reason, raw_cash_data
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(record.unique_request_id)
        .bind(&record.terminal_id)
        .bind(&record.business_code)
        .bind(&record.technical_code)
        .bind(&record.external_id)
        .bind(record.retrieval_timestamp)
        .bind(record.event_date)
        .bind(record.total_cash_amount)
        .bind(&record.total_currency)
        .bind(serde_json::to_value(&record.cassettes_data).unwrap_or(serde_json::Value::Array(vec![])))
        .bind(cassette_count_column)
        .bind(record.has_low_cash_warning)
        .bind(record.has_cash_errors)
        .bind(record.is_null_record)
        .bind(&record.null_reason)
        .bind(&record.raw_cash_data)
        .execute(&mut *tx)
        .await;

        if let Err(source) = outcome {
            warn!("⚠️ [CASH_REPO]: Write to [{STREAM}] failed at terminal [{}], rolling back this stream only.", record.terminal_id);
            tx.rollback().await.ok();
            return Err(PersistenceError::StreamRolledBack { stream: STREAM, source });
        }
    }

    tx.commit().await?;
    info!("💾 [CASH_REPO]: Persisted {} cash records to [{STREAM}].", records.len());
    Ok(records.len())
}
