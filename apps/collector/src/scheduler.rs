// [apps/collector/src/scheduler.rs]
/*!
 * APARATO: CYCLE SCHEDULER (ESTRATO L4 - APP)
 * RESPONSABILIDAD: MODO UNICO VS. MODO CONTINUO
 *
 * El modo continuo jamas superpone ciclos: si uno se excede del intervalo
 * configurado, el siguiente arranca de inmediato con una advertencia, nunca
 * en paralelo. El shutdown flag se observa en incrementos de un segundo para
 * que una senal responda con latencia acotada incluso durante una espera larga.
 */

use crate::config::CollectorConfig;
use crate::orchestrator::{run_cycle, CycleReport};
use sentinel_infra_persistence::PersistenceClient;
use sentinel_infra_registry::TerminalRegistry;
use sentinel_infra_vendor_client::ApiClient;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

const CYCLE_HISTORY_CAPACITY: usize = 50;

/// Resumen de un ciclo retenido para diagnostico en modo continuo; no se
/// persiste, vive solo en memoria mientras el proceso continua corriendo.
#[derive(Debug, Clone)]
pub struct CycleHistoryEntry {
    pub cycle_index: u64,
    pub duration: Duration,
    pub took_failover_branch: bool,
    pub terminals_collected: usize,
    pub cash_records_collected: usize,
    pub any_stream_failed: bool,
}

/// Bitacora circular de los ultimos 50 ciclos, para inspeccion del operador
/// sin necesitar la base de datos.
#[derive(Default)]
pub struct CycleHistory {
    entries: VecDeque<CycleHistoryEntry>,
}

impl CycleHistory {
    pub fn push(&mut self, entry: CycleHistoryEntry) {
        if self.entries.len() == CYCLE_HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &CycleHistoryEntry> {
        self.entries.iter()
    }
}

fn summarize(cycle_index: u64, duration: Duration, report: &CycleReport) -> CycleHistoryEntry {
    CycleHistoryEntry {
        cycle_index,
        duration,
        took_failover_branch: report.outcome.took_failover_branch(),
        terminals_collected: report.outcome.terminals.len(),
        cash_records_collected: report.outcome.cash_records.len(),
        any_stream_failed: report.write_report.as_ref().is_some_and(|write_report| write_report.any_stream_failed()),
    }
}

async fn dump_cycle_json(config: &CollectorConfig, cycle_index: u64, report: &CycleReport) {
    if !config.save_json {
        return;
    }
    if let Err(error) = tokio::fs::create_dir_all(&config.output_dir).await {
        warn!("⚠️ [SCHEDULER]: could not create --output-dir [{}]: {error}", config.output_dir.display());
        return;
    }

    let dump = serde_json::json!({
        "cycle_index": cycle_index,
        "took_failover_branch": report.outcome.took_failover_branch(),
        "regional": report.outcome.regional,
        "terminals": report.outcome.terminals,
        "cash_records": report.outcome.cash_records,
        "newly_discovered_count": report.outcome.newly_discovered_count,
        "performance_metrics": report.outcome.performance_metrics,
    });

    let path = config.output_dir.join(format!("cycle_{cycle_index:06}.json"));
    match serde_json::to_vec_pretty(&dump) {
        Ok(bytes) => match tokio::fs::File::create(&path).await {
            Ok(mut file) => {
                if let Err(error) = file.write_all(&bytes).await {
                    warn!("⚠️ [SCHEDULER]: failed writing JSON dump to [{}]: {error}", path.display());
                }
            }
            Err(error) => warn!("⚠️ [SCHEDULER]: could not create JSON dump file [{}]: {error}", path.display()),
        },
        Err(error) => warn!("⚠️ [SCHEDULER]: could not serialize cycle {cycle_index} for dump: {error}"),
    }
}

struct CycleContext<'a> {
    config: &'a CollectorConfig,
    api_client: &'a mut ApiClient,
    registry: &'a mut TerminalRegistry,
    http_client: &'a reqwest::Client,
    persistence: Option<&'a PersistenceClient>,
}

async fn run_one_cycle(ctx: &mut CycleContext<'_>, cycle_index: u64) -> (CycleReport, Duration) {
    let started = Instant::now();
    let report = run_cycle(ctx.config, ctx.api_client, ctx.registry, ctx.http_client, ctx.persistence).await;
    let duration = started.elapsed();

    if report.outcome.took_failover_branch() {
        warn!("🛰️ [SCHEDULER]: cycle {cycle_index} completed via the failover branch in {duration:?}.");
    } else {
        info!(
            "✅ [SCHEDULER]: cycle {cycle_index} completed in {duration:?}: {} terminals, {} cash records.",
            report.outcome.terminals.len(),
            report.outcome.cash_records.len()
        );
    }

    dump_cycle_json(ctx.config, cycle_index, &report).await;
    (report, duration)
}

/// Corre un unico ciclo y retorna su reporte; usado cuando `--continuous`
/// no fue solicitado.
pub async fn run_once(
    config: &CollectorConfig,
    api_client: &mut ApiClient,
    registry: &mut TerminalRegistry,
    http_client: &reqwest::Client,
    persistence: Option<&PersistenceClient>,
) -> CycleReport {
    let mut ctx = CycleContext { config, api_client, registry, http_client, persistence };
    run_one_cycle(&mut ctx, 0).await.0
}

/// Corre ciclos en bucle hasta que `shutdown` se active, espaciados por
/// `config.interval`. Un ciclo que se excede del intervalo no retrasa al
/// siguiente mas alla de su propia duracion: el siguiente arranca de
/// inmediato con una advertencia de sobretiempo.
pub async fn run_continuous(
    config: &CollectorConfig,
    api_client: &mut ApiClient,
    registry: &mut TerminalRegistry,
    http_client: &reqwest::Client,
    persistence: Option<&PersistenceClient>,
    shutdown: Arc<AtomicBool>,
) -> CycleHistory {
    let mut history = CycleHistory::default();
    let mut cycle_index: u64 = 0;

    while !shutdown.load(Ordering::SeqCst) {
        let mut ctx = CycleContext { config, api_client, registry, http_client, persistence };
        let (report, duration) = run_one_cycle(&mut ctx, cycle_index).await;
        history.push(summarize(cycle_index, duration, &report));
        cycle_index += 1;

        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        if duration >= config.interval {
            warn!(
                "⏱️ [SCHEDULER]: cycle {} took {duration:?}, at or past the configured interval of {:?}; starting the next cycle immediately.",
                cycle_index - 1,
                config.interval
            );
            continue;
        }

        let mut remaining = config.interval - duration;
        while remaining > Duration::ZERO {
            if shutdown.load(Ordering::SeqCst) {
                break;
            }
            let slice = remaining.min(Duration::from_secs(1));
            tokio::time::sleep(slice).await;
            remaining = remaining.saturating_sub(slice);
        }
    }

    info!("🛑 [SCHEDULER]: shutdown signal observed, exiting the continuous loop after {cycle_index} cycles.");
    history
}
