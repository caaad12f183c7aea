// [apps/collector/src/orchestrator.rs]
/*!
 * APARATO: COLLECTOR ORCHESTRATOR (ESTRATO L4 - APP)
 * RESPONSABILIDAD: LA MAQUINA DE ESTADOS DE OCHO FASES DE UN CICLO
 *
 * P1/P2 son los unicos puntos que pueden desviar el ciclo entero hacia la
 * rama de failover; P3-P6 degradan de forma independiente y jamas impiden
 * que P7 persista lo que si se logro recolectar.
 */

use crate::config::CollectorConfig;
use crate::demo;
use chrono::{DateTime, FixedOffset};
use sentinel_domain_failover::{synthesize, FailoverBranch};
use sentinel_domain_models::{
    CashRecord, RegionalSnapshot, TerminalStatusRecord, ALL_VENDOR_STATUS_FILTERS,
};
use sentinel_infra_persistence::{write_cycle, CycleWriteReport, PersistenceClient};
use sentinel_infra_registry::TerminalRegistry;
use sentinel_infra_vendor_client::{ApiClient, INTER_TERMINAL_PACING};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Todo lo que un ciclo produjo, sin importar si tomo la rama de failover.
pub struct CycleOutcome {
    pub regional: Option<RegionalSnapshot>,
    pub terminals: Vec<TerminalStatusRecord>,
    pub cash_records: Vec<CashRecord>,
    pub failover_branch: Option<FailoverBranch>,
    pub newly_discovered_count: usize,
    pub performance_metrics: BTreeMap<String, f64>,
}

impl CycleOutcome {
    pub fn took_failover_branch(&self) -> bool {
        self.failover_branch.is_some()
    }
}

/// `CycleOutcome` mas el resultado de P7, si la persistencia estaba habilitada.
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub write_report: Option<CycleWriteReport>,
}

struct DiscoveredTerminal {
    terminal_id: String,
    location: String,
    fetched_status: &'static str,
    issue_state_code: String,
    is_newly_discovered: bool,
}

fn vendor_host(base_url: &str) -> String {
    url::Url::parse(base_url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| base_url.to_string())
}

/// Corre un ciclo completo: ocho fases en modo vivo, o el sustituto sintetico
/// completo en modo demo (demo nunca persiste, se comprueba una
/// sola vez al entrar).
#[instrument(skip(config, api_client, registry, http_client, persistence))]
pub async fn run_cycle(
    config: &CollectorConfig,
    api_client: &mut ApiClient,
    registry: &mut TerminalRegistry,
    http_client: &reqwest::Client,
    persistence: Option<&PersistenceClient>,
) -> CycleReport {
    let now = sentinel_core_clock::dili_now();

    if config.demo_mode {
        let outcome = run_demo_cycle(config, registry, now).await;
        return CycleReport { outcome, write_report: None };
    }

    let mut metrics = BTreeMap::new();

    // --- P1: Reachability ---
    let t0 = Instant::now();
    let host = vendor_host(&config.vendor_base_url);
    let probe_outcome = sentinel_infra_reachability::probe_vendor_host(&host, http_client, &config.vendor_base_url).await;
    metrics.insert("p1_reachability_seconds".to_string(), t0.elapsed().as_secs_f64());

    if let Err(error) = probe_outcome {
        warn!("🚨 [ORCHESTRATOR]: P1 reachability probe to [{host}] failed ({error}), entering failover.");
        return finish_with_failover(config, api_client, registry, FailoverBranch::ReachabilityFailure, now, metrics, persistence).await;
    }

    // --- P2: Authenticate ---
    let t0 = Instant::now();
    let auth_outcome = api_client.authenticate().await;
    metrics.insert("p2_authenticate_seconds".to_string(), t0.elapsed().as_secs_f64());

    if let Err(error) = auth_outcome {
        warn!("🚨 [ORCHESTRATOR]: P2 authentication exhausted both credential sets ({error}), entering failover.");
        return finish_with_failover(config, api_client, registry, FailoverBranch::AuthenticationFailure, now, metrics, persistence).await;
    }

    // --- P3: Regional fetch ---
    let t0 = Instant::now();
    let regional = fetch_regional_snapshot(api_client, config.total_atms, now).await;
    metrics.insert("p3_regional_fetch_seconds".to_string(), t0.elapsed().as_secs_f64());

    // --- P4: Terminal search ---
    let t0 = Instant::now();
    let discovered = search_all_terminal_filters(api_client, registry).await;
    let newly_discovered_count = discovered.iter().filter(|t| t.is_newly_discovered).count();
    if newly_discovered_count > 0 {
        if let Err(error) = registry.persist().await {
            warn!("⚠️ [ORCHESTRATOR]: failed to persist Terminal Registry after discovering {newly_discovered_count} new terminals: {error}");
        }
    }
    metrics.insert("p4_terminal_search_seconds".to_string(), t0.elapsed().as_secs_f64());

    // --- P5: Terminal details ---
    let t0 = Instant::now();
    let terminals = fetch_terminal_details(api_client, &discovered, now).await;
    metrics.insert("p5_terminal_details_seconds".to_string(), t0.elapsed().as_secs_f64());

    // --- P6: Cash information (optional) ---
    let cash_records = if config.include_cash_info {
        let t0 = Instant::now();
        let records = fetch_cash_records(api_client, &discovered, now).await;
        metrics.insert("p6_cash_information_seconds".to_string(), t0.elapsed().as_secs_f64());
        records
    } else {
        Vec::new()
    };

    let outcome = CycleOutcome {
        regional,
        terminals,
        cash_records,
        failover_branch: None,
        newly_discovered_count,
        performance_metrics: metrics,
    };

    // --- P7: Persist ---
    let write_report = persist_outcome(config, persistence, &outcome).await;

    // --- P8: Logout ---
    api_client.logout().await;

    CycleReport { outcome, write_report }
}

async fn finish_with_failover(
    config: &CollectorConfig,
    api_client: &mut ApiClient,
    registry: &TerminalRegistry,
    branch: FailoverBranch,
    now: DateTime<FixedOffset>,
    mut metrics: BTreeMap<String, f64>,
    persistence: Option<&PersistenceClient>,
) -> CycleReport {
    let t0 = Instant::now();
    let cycle = synthesize(branch, registry, config.total_atms, now);
    metrics.insert("failover_synthesis_seconds".to_string(), t0.elapsed().as_secs_f64());

    let outcome = CycleOutcome {
        regional: Some(cycle.regional),
        terminals: cycle.terminals,
        cash_records: Vec::new(),
        failover_branch: Some(branch),
        newly_discovered_count: 0,
        performance_metrics: metrics,
    };

    let write_report = persist_outcome(config, persistence, &outcome).await;

    // P2 may not have produced a token; logout is a no-op in that case.
    api_client.logout().await;

    CycleReport { outcome, write_report }
}

async fn persist_outcome(
    config: &CollectorConfig,
    persistence: Option<&PersistenceClient>,
    outcome: &CycleOutcome,
) -> Option<CycleWriteReport> {
    let client = persistence?;
    if !config.save_to_db {
        return None;
    }

    let cash_slice = (!outcome.cash_records.is_empty()).then_some(outcome.cash_records.as_slice());
    Some(
        write_cycle(
            client,
            outcome.regional.as_ref(),
            &outcome.terminals,
            cash_slice,
            config.use_new_tables,
        )
        .await,
    )
}

async fn fetch_regional_snapshot(
    api_client: &mut ApiClient,
    total_atms: i32,
    now: DateTime<FixedOffset>,
) -> Option<RegionalSnapshot> {
    let raw_envelope = match api_client.fetch_reports_dashboard().await {
        Ok(raw) => raw,
        Err(error) => {
            warn!("⚠️ [ORCHESTRATOR]: P3 regional fetch failed, continuing without a regional snapshot this cycle: {error}");
            return None;
        }
    };

    let Some(fifth_graphic) = raw_envelope.get("body").and_then(|body| body.get("fifth_graphic")) else {
        warn!("⚠️ [ORCHESTRATOR]: P3 response carried no body.fifth_graphic, continuing without a regional snapshot this cycle.");
        return None;
    };

    match sentinel_domain_processor::process_regional_snapshot(fifth_graphic, total_atms, now) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            warn!("⚠️ [ORCHESTRATOR]: P3 processor rejected the regional payload: {error}");
            None
        }
    }
}

async fn search_all_terminal_filters(
    api_client: &mut ApiClient,
    registry: &mut TerminalRegistry,
) -> Vec<DiscoveredTerminal> {
    let mut seen = std::collections::HashSet::new();
    let mut discovered = Vec::new();

    for status in ALL_VENDOR_STATUS_FILTERS.iter().copied() {
        let raw_terminals = match api_client.search_terminals_by_status(status).await {
            Ok(list) => list,
            Err(error) => {
                warn!("⚠️ [ORCHESTRATOR]: P4 search for filter [{}] failed, treating as no matches: {error}", status.as_vendor_str());
                continue;
            }
        };

        for raw in raw_terminals {
            let Some(terminal_id) = raw.get("terminalId").and_then(|v| v.as_str()).map(str::to_string) else {
                continue;
            };
            // First occurrence wins: the filter under which a terminal is first seen
            // is retained as its discovery tag, later filters do not overwrite it.
            if !seen.insert(terminal_id.clone()) {
                continue;
            }

            let location = raw.get("location").and_then(|v| v.as_str()).unwrap_or_default().to_string();
            let issue_state_code = raw
                .get("issueStateCode")
                .and_then(|v| v.as_str())
                .unwrap_or("HARD")
                .to_string();
            let is_newly_discovered = registry.observe(&terminal_id, &location);

            discovered.push(DiscoveredTerminal {
                terminal_id,
                location,
                fetched_status: status.as_vendor_str(),
                issue_state_code,
                is_newly_discovered,
            });
        }
    }

    info!("🔎 [ORCHESTRATOR]: P4 merged {} distinct terminals across 8 status filters.", discovered.len());
    discovered
}

async fn fetch_terminal_details(
    api_client: &mut ApiClient,
    discovered: &[DiscoveredTerminal],
    now: DateTime<FixedOffset>,
) -> Vec<TerminalStatusRecord> {
    let mut records = Vec::with_capacity(discovered.len());

    for (index, terminal) in discovered.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(INTER_TERMINAL_PACING).await;
        }

        let raw_details = match api_client.fetch_terminal_details(&terminal.terminal_id, &terminal.issue_state_code).await {
            Ok(list) => list,
            Err(error) => {
                warn!("⚠️ [ORCHESTRATOR]: P5 detail fetch for terminal [{}] failed, skipping this terminal: {error}", terminal.terminal_id);
                continue;
            }
        };

        for raw_detail in raw_details {
            records.push(sentinel_domain_processor::build_terminal_status_record(
                &raw_detail,
                terminal.fetched_status,
                false,
                terminal.is_newly_discovered,
                Uuid::new_v4(),
                now,
            ));
        }
    }

    records
}

async fn fetch_cash_records(
    api_client: &mut ApiClient,
    discovered: &[DiscoveredTerminal],
    now: DateTime<FixedOffset>,
) -> Vec<CashRecord> {
    let mut records = Vec::with_capacity(discovered.len());

    for (index, terminal) in discovered.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(INTER_TERMINAL_PACING).await;
        }

        match api_client.fetch_cash_info(&terminal.terminal_id).await {
            Ok(raw) => records.push(sentinel_domain_processor::process_cash_information(&terminal.terminal_id, &raw, now)),
            Err(error) => {
                warn!("⚠️ [ORCHESTRATOR]: P6 cash fetch for terminal [{}] failed, skipping this terminal: {error}", terminal.terminal_id);
            }
        }
    }

    records
}

async fn run_demo_cycle(config: &CollectorConfig, registry: &mut TerminalRegistry, now: DateTime<FixedOffset>) -> CycleOutcome {
    let mut metrics = BTreeMap::new();
    let t0 = Instant::now();

    let regional = sentinel_domain_processor::process_regional_snapshot(&demo::regional_fifth_graphic(), config.total_atms, now)
        .ok()
        .flatten();

    let mut seen = std::collections::HashSet::new();
    let mut discovered = Vec::new();
    for status in ALL_VENDOR_STATUS_FILTERS.iter().copied() {
        for raw in demo::terminal_search(status) {
            let Some(terminal_id) = raw.get("terminalId").and_then(|v| v.as_str()).map(str::to_string) else {
                continue;
            };
            if !seen.insert(terminal_id.clone()) {
                continue;
            }
            let location = raw.get("location").and_then(|v| v.as_str()).unwrap_or_default().to_string();
            let issue_state_code = raw.get("issueStateCode").and_then(|v| v.as_str()).unwrap_or("HARD").to_string();
            let is_newly_discovered = registry.observe(&terminal_id, &location);
            discovered.push(DiscoveredTerminal { terminal_id, location, fetched_status: status.as_vendor_str(), issue_state_code, is_newly_discovered });
        }
    }

    let newly_discovered_count = discovered.iter().filter(|t| t.is_newly_discovered).count();
    if newly_discovered_count > 0 {
        if let Err(error) = registry.persist().await {
            warn!("⚠️ [ORCHESTRATOR]: failed to persist Terminal Registry after a demo cycle: {error}");
        }
    }

    let mut terminals = Vec::with_capacity(discovered.len());
    for terminal in &discovered {
        for raw_detail in demo::terminal_detail(&terminal.terminal_id, &terminal.issue_state_code) {
            terminals.push(sentinel_domain_processor::build_terminal_status_record(
                &raw_detail,
                terminal.fetched_status,
                true,
                terminal.is_newly_discovered,
                Uuid::new_v4(),
                now,
            ));
        }
    }

    let cash_records = if config.include_cash_info {
        discovered
            .iter()
            .map(|terminal| sentinel_domain_processor::process_cash_information(&terminal.terminal_id, &demo::cash_info(&terminal.terminal_id), now))
            .collect()
    } else {
        Vec::new()
    };

    metrics.insert("demo_cycle_seconds".to_string(), t0.elapsed().as_secs_f64());

    CycleOutcome {
        regional,
        terminals,
        cash_records,
        failover_branch: None,
        newly_discovered_count,
        performance_metrics: metrics,
    }
}
