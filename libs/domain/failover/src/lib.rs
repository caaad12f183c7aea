// INICIO DEL ARCHIVO [libs/domain/failover/src/lib.rs]
/*!
 * =================================================================
 * APARATO: FAILOVER SYNTHESISER (V1.0 - SOBERANO)
 * CLASIFICACION: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: SINTESIS DE SNAPSHOTS CUANDO P1/P2 FALLAN
 *
 * VISION HIPER-HOLISTICA:
 * Cuando la sonda de alcance o la autenticacion fallan, el ciclo no se
 * aborta: se sintetiza un snapshot OUT_OF_SERVICE para toda la flota
 * conocida y el ciclo se reporta exitoso. El marcador embebido en cada
 * registro (CONNECTION_FAILED vs AUTH_FAILED) es lo unico que permite
 * a un operador distinguir ambos escenarios en los datos persistidos.
 * =================================================================
 */

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use sentinel_domain_models::{
    FaultData, ProcessingInfo, RegionalSnapshot, TerminalMetadata, TerminalStatusRecord,
};
use sentinel_infra_registry::TerminalRegistry;
use uuid::Uuid;

/// Cual de las dos fases de apertura de ciclo fallo. Los dos ramales producen
/// formas identicas salvo por el marcador embebido en cada registro sintetico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailoverBranch {
    /// P1: la sonda de alcance no pudo confirmar conectividad con el vendor.
    ReachabilityFailure,
    /// P2: el login fallo despues de agotar los reintentos de autenticacion.
    AuthenticationFailure,
}

impl FailoverBranch {
    fn serial_marker(self) -> &'static str {
        match self {
            FailoverBranch::ReachabilityFailure => "CONNECTION_FAILED",
            FailoverBranch::AuthenticationFailure => "AUTH_FAILED",
        }
    }

    fn external_fault_id(self) -> &'static str {
        match self {
            FailoverBranch::ReachabilityFailure => "CONN_FAILURE",
            FailoverBranch::AuthenticationFailure => "AUTH_FAILURE",
        }
    }

    fn describe(self, terminal_id: &str, location: &str) -> String {
        match self {
            FailoverBranch::ReachabilityFailure => {
                format!("Connection to monitoring system failed - Terminal {terminal_id} at {location}")
            }
            FailoverBranch::AuthenticationFailure => {
                format!("Authentication failed - Unable to login to monitoring system for Terminal {terminal_id} at {location}")
            }
        }
    }
}

/// El resultado completo de un ciclo de failover: un snapshot regional y un
/// `TerminalStatusRecord` por cada entrada del Terminal Registry.
pub struct FailoverCycle {
    pub regional: RegionalSnapshot,
    pub terminals: Vec<TerminalStatusRecord>,
}

/// Sintetiza el ciclo de failover completo para la rama dada.
///
/// El snapshot regional reporta la flota entera como `OUT_OF_SERVICE`
/// (percentages `(0,0,0,0,1)`); cada terminal conocido recibe un registro con
/// `issue_state_name = fetched_status = "OUT_OF_SERVICE"` y el marcador de la
/// rama en `serial_number` y `agent_error_description`.
pub fn synthesize(
    branch: FailoverBranch,
    registry: &TerminalRegistry,
    total_atms: i32,
    now: DateTime<FixedOffset>,
) -> FailoverCycle {
    let regional = RegionalSnapshot {
        unique_request_id: Uuid::new_v4(),
        region_code: sentinel_domain_processor::MONITORED_REGION_CODE.to_string(),
        count_available: 0,
        count_warning: 0,
        count_zombie: 0,
        count_wounded: 0,
        count_out_of_service: total_atms,
        percentage_available: Decimal::ZERO,
        percentage_warning: Decimal::ZERO,
        percentage_zombie: Decimal::ZERO,
        percentage_wounded: Decimal::ZERO,
        percentage_out_of_service: Decimal::ONE,
        date_creation: now,
        total_atms_in_region: total_atms,
        raw_regional_data: serde_json::json!({ "synthesized": true, "branch": branch.serial_marker() }),
    };

    let terminals = registry
        .all()
        .map(|entry| synthesize_terminal(branch, &entry.terminal_id, &entry.location, now))
        .collect();

    FailoverCycle { regional, terminals }
}

fn synthesize_terminal(
    branch: FailoverBranch,
    terminal_id: &str,
    location: &str,
    now: DateTime<FixedOffset>,
) -> TerminalStatusRecord {
    let description = branch.describe(terminal_id, location);
    let fault_data = FaultData {
        year: Some(now.format("%Y").to_string()),
        month: Some(now.format("%m").to_string()),
        day: Some(now.format("%d").to_string()),
        external_fault_id: Some(branch.external_fault_id().to_string()),
        agent_error_description: Some(description.clone()),
        creation_date: Some(sentinel_core_clock::format_fault_timestamp(&now)),
    };

    let metadata = TerminalMetadata {
        retrieval_timestamp: sentinel_core_clock::format_iso8601(&now),
        demo_mode: false,
        unique_request_id: Uuid::new_v4(),
        processing_info: ProcessingInfo {
            has_fault_data: true,
            has_location: !location.is_empty(),
            status_at_retrieval: "OUT_OF_SERVICE".to_string(),
        },
        is_newly_discovered: false,
    };

    let raw_terminal_data = serde_json::json!({
        "terminalId": terminal_id,
        "location": location,
        "issueStateName": "OUT_OF_SERVICE",
        "brand": branch.serial_marker(),
        "agentErrorDescription": description,
        "synthesized": true,
    });

    TerminalStatusRecord {
        unique_request_id: Uuid::new_v4(),
        terminal_id: terminal_id.to_string(),
        location: location.to_string(),
        serial_number: branch.serial_marker().to_string(),
        issue_state_name: "OUT_OF_SERVICE".to_string(),
        fetched_status: "OUT_OF_SERVICE".to_string(),
        retrieved_date: now,
        raw_terminal_data,
        fault_data,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_registry() -> TerminalRegistry {
        let dir = tempfile::tempdir().unwrap();
        TerminalRegistry::load_or_seed(&dir.path().join("registry.json")).await.unwrap()
    }

    #[tokio::test]
    async fn reachability_failure_marks_every_terminal_connection_failed() {
        let registry = seeded_registry().await;
        let cycle = synthesize(FailoverBranch::ReachabilityFailure, &registry, 14, sentinel_core_clock::dili_now());

        assert_eq!(cycle.regional.count_out_of_service, 14);
        assert_eq!(cycle.regional.percentage_out_of_service, Decimal::ONE);
        assert_eq!(cycle.terminals.len(), 14);
        assert!(cycle.terminals.iter().all(|t| t.serial_number == "CONNECTION_FAILED"));
        assert!(cycle.terminals.iter().all(|t| t.issue_state_name == "OUT_OF_SERVICE"));
    }

    #[tokio::test]
    async fn authentication_failure_uses_a_distinct_marker() {
        let registry = seeded_registry().await;
        let cycle = synthesize(FailoverBranch::AuthenticationFailure, &registry, 14, sentinel_core_clock::dili_now());

        assert!(cycle.terminals.iter().all(|t| t.serial_number == "AUTH_FAILED"));
        assert!(cycle.terminals[0].fault_data.agent_error_description.as_ref().unwrap().contains("Authentication failed"));
    }

    #[tokio::test]
    async fn failover_snapshot_carries_zero_counts_outside_out_of_service() {
        let registry = seeded_registry().await;
        let cycle = synthesize(FailoverBranch::ReachabilityFailure, &registry, 14, sentinel_core_clock::dili_now());
        assert_eq!(cycle.regional.count_available, 0);
        assert_eq!(cycle.regional.count_warning, 0);
        assert_eq!(cycle.regional.count_zombie, 0);
        assert_eq!(cycle.regional.count_wounded, 0);
    }
}
// FIN DEL ARCHIVO [libs/domain/failover/src/lib.rs]
