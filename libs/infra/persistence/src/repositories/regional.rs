// [libs/infra/persistence/src/repositories/regional.rs]
/*!
 * APARATO: REGIONAL DATA REPOSITORY (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DEL STREAM DE SNAPSHOTS REGIONALES
 *
 * Escribe a `regional_data` (JSONB, autoritativa) o a `regional_atm_counts`
 * (legado) segun la configuracion `use_new_tables`; nunca a ambas en el
 * mismo ciclo (decision de diseno registrada en DESIGN.md).
 */

use crate::errors::PersistenceError;
use crate::schema::{apply_ddl, REGIONAL_ATM_COUNTS_DDL, REGIONAL_DATA_DDL};
use sentinel_domain_models::RegionalSnapshot;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

const STREAM_NEW: &str = "regional_data";
const STREAM_LEGACY: &str = "regional_atm_counts";

#[instrument(skip(pool, snapshot))]
pub async fn persist_regional_snapshot(
    pool: &PgPool,
    snapshot: &RegionalSnapshot,
    use_new_tables: bool,
) -> Result<(), PersistenceError> {
    if use_new_tables {
        persist_to_jsonb_table(pool, snapshot).await
    } else {
        persist_to_legacy_table(pool, snapshot).await
    }
}

async fn persist_to_jsonb_table(pool: &PgPool, snapshot: &RegionalSnapshot) -> Result<(), PersistenceError> {
    apply_ddl(pool, REGIONAL_DATA_DDL).await?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        INSERT INTO regional_data (
            unique_request_id, region_code, retrieval_timestamp, raw_regional_data,
            count_available, count_warning, count_zombie, count_wounded, count_out_of_service,
            total_atms_in_region
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(snapshot.unique_request_id)
    .bind(&snapshot.region_code)
    .bind(snapshot.date_creation)
    .bind(&snapshot.raw_regional_data)
    .bind(snapshot.count_available)
    .bind(snapshot.count_warning)
    .bind(snapshot.count_zombie)
    .bind(snapshot.count_wounded)
    .bind(snapshot.count_out_of_service)
    .bind(snapshot.total_atms_in_region)
    .execute(&mut *tx)
    .await;

    match result {
        Ok(_) => {
            tx.commit().await?;
            info!("💾 [REGIONAL_REPO]: Persisted 1 snapshot to [{STREAM_NEW}].");
            Ok(())
        }
        Err(source) => {
            warn!("⚠️ [REGIONAL_REPO]: Write to [{STREAM_NEW}] failed, rolling back this stream only.");
            tx.rollback().await.ok();
            Err(PersistenceError::StreamRolledBack { stream: STREAM_NEW, source })
        }
    }
}

async fn persist_to_legacy_table(pool: &PgPool, snapshot: &RegionalSnapshot) -> Result<(), PersistenceError> {
    apply_ddl(pool, REGIONAL_ATM_COUNTS_DDL).await?;

    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        INSERT INTO regional_atm_counts (
            unique_request_id, region_code, retrieval_timestamp,
            count_available, count_warning, count_zombie, count_wounded, count_out_of_service,
            percentage_available, percentage_warning, percentage_zombie, percentage_wounded, percentage_out_of_service,
            total_atms_in_region
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
    )
    .bind(snapshot.unique_request_id)
    .bind(&snapshot.region_code)
    .bind(snapshot.date_creation)
    .bind(snapshot.count_available)
    .bind(snapshot.count_warning)
    .bind(snapshot.count_zombie)
    .bind(snapshot.count_wounded)
    .bind(snapshot.count_out_of_service)
    .bind(snapshot.percentage_available)
    .bind(snapshot.percentage_warning)
    .bind(snapshot.percentage_zombie)
    .bind(snapshot.percentage_wounded)
    .bind(snapshot.percentage_out_of_service)
    .bind(snapshot.total_atms_in_region)
    .execute(&mut *tx)
    .await;

    match result {
        Ok(_) => {
            tx.commit().await?;
            info!("💾 [REGIONAL_REPO]: Persisted 1 snapshot to [{STREAM_LEGACY}].");
            Ok(())
        }
        Err(source) => {
            warn!("⚠️ [REGIONAL_REPO]: Write to [{STREAM_LEGACY}] failed, rolling back this stream only.");
            tx.rollback().await.ok();
            Err(PersistenceError::StreamRolledBack { stream: STREAM_LEGACY, source })
        }
    }
}
