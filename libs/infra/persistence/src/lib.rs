// INICIO DEL ARCHIVO [libs/infra/persistence/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PERSISTENCE CLIENT (V1.0 - SOBERANO)
 * CLASIFICACION: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: ESCRITURA DE LOS CUATRO STREAMS LOGICOS DEL COLECTOR
 *
 * VISION HIPER-HOLISTICA:
 * No existe una transaccion que abarque streams: cada flujo
 * -- regional, detalle de terminal, efectivo -- compromete o revierte de
 * forma independiente. Un problema de esquema en una tabla jamas oculta
 * una cosecha exitosa en otra; `write_cycle` refleja esto devolviendo un
 * reporte por stream en vez de abortar en el primer error.
 * =================================================================
 */

pub mod errors;
pub mod repositories;
pub mod schema;

pub use errors::PersistenceError;

use sentinel_domain_models::{CashRecord, RegionalSnapshot, TerminalStatusRecord};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{instrument, warn};

#[derive(Clone)]
pub struct PersistenceClient {
    pool: PgPool,
}

impl PersistenceClient {
    #[instrument(skip(database_url))]
    pub async fn connect(database_url: &str) -> Result<Self, PersistenceError> {
        let pool = PgPoolOptions::new().max_connections(5).connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// El resultado de intentar persistir un unico stream: `Ok` con el conteo
/// de filas escritas, o el error que revirtio ese stream puntualmente.
pub type StreamOutcome = Result<usize, PersistenceError>;

/// El reporte completo de un ciclo de persistencia: un resultado
/// independiente por stream, en el orden de conveniencia documentado
/// (regional, luego detalle, luego efectivo -- sin garantia de
/// correctitud implicada por el orden).
#[derive(Debug)]
pub struct CycleWriteReport {
    /// `None` cuando P3 no produjo ningun snapshot para este ciclo (fallo de
    /// red en la fase regional sin que el ciclo entero cayera en failover):
    /// no hay nada que intentar persistir, lo cual no es lo mismo que un
    /// intento fallido.
    pub regional: Option<StreamOutcome>,
    pub terminal_details: StreamOutcome,
    pub cash_information: Option<StreamOutcome>,
}

impl CycleWriteReport {
    pub fn any_stream_failed(&self) -> bool {
        self.regional.as_ref().is_some_and(Result::is_err)
            || self.terminal_details.is_err()
            || self.cash_information.as_ref().is_some_and(Result::is_err)
    }
}

/// Persiste un ciclo completo. Cada stream se
/// intenta sin importar si un stream anterior fallo; el cash stream solo
/// se intenta si se proveyeron registros (P6 es opcional), y el regional
/// solo si P3 efectivamente produjo un snapshot.
#[instrument(skip(client, regional, terminals, cash_records))]
pub async fn write_cycle(
    client: &PersistenceClient,
    regional: Option<&RegionalSnapshot>,
    terminals: &[TerminalStatusRecord],
    cash_records: Option<&[CashRecord]>,
    use_new_tables: bool,
) -> CycleWriteReport {
    let regional_outcome = match regional {
        Some(snapshot) => Some(match repositories::regional::persist_regional_snapshot(client.pool(), snapshot, use_new_tables).await {
            Ok(()) => Ok(1),
            Err(error) => {
                warn!("⚠️ [PERSISTENCE]: regional stream failed this cycle: {error}");
                Err(error)
            }
        }),
        None => None,
    };

    let terminal_outcome = repositories::terminal::persist_terminal_details(client.pool(), terminals).await;
    if let Err(error) = &terminal_outcome {
        warn!("⚠️ [PERSISTENCE]: terminal_details stream failed this cycle: {error}");
    }

    let cash_outcome = match cash_records {
        Some(records) => {
            let outcome = repositories::cash::persist_cash_records(client.pool(), records).await;
            if let Err(error) = &outcome {
                warn!("⚠️ [PERSISTENCE]: terminal_cash_information stream failed this cycle: {error}");
            }
            Some(outcome)
        }
        None => None,
    };

    CycleWriteReport {
        regional: regional_outcome,
        terminal_details: terminal_outcome,
        cash_information: cash_outcome,
    }
}
// FIN DEL ARCHIVO [libs/infra/persistence/src/lib.rs]
