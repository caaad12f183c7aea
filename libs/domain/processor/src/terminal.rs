// [libs/domain/processor/src/terminal.rs]
/*!
 * APARATO: TERMINAL STATUS RECORD PROCESSOR (ESTRATO L2)
 * RESPONSABILIDAD: detalle crudo del vendor -> TerminalStatusRecord
 */

use chrono::{DateTime, FixedOffset};
use sentinel_domain_models::{FaultData, ProcessingInfo, TerminalMetadata, TerminalStatusRecord};
use uuid::Uuid;

fn as_str_field(value: &serde_json::Value, key: &str) -> String {
    value.get(key).and_then(|v| v.as_str()).unwrap_or_default().to_string()
}

fn as_opt_string_field(value: &serde_json::Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| {
        if v.is_null() {
            None
        } else if let Some(s) = v.as_str() {
            Some(s.to_string())
        } else {
            Some(v.to_string())
        }
    })
}

/// Extrae y formatea `fault_data` desde `faultList[0]`, o todos-nulos si ausente.
///
/// `creationDate` llega como epoch en milisegundos UTC; se convierte a hora de
/// Dili y se formatea `DD:MM:YYYY HH:MM:SS`.
fn extract_fault_data(raw_detail: &serde_json::Value) -> FaultData {
    let Some(fault) = raw_detail
        .get("faultList")
        .and_then(|v| v.as_array())
        .and_then(|list| list.first())
    else {
        return FaultData::default();
    };

    let creation_date = fault
        .get("creationDate")
        .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse::<i64>().ok())))
        .and_then(sentinel_core_clock::from_vendor_epoch_millis)
        .map(|dili| sentinel_core_clock::format_fault_timestamp(&dili));

    FaultData {
        year: as_opt_string_field(fault, "year"),
        month: as_opt_string_field(fault, "month"),
        day: as_opt_string_field(fault, "day"),
        external_fault_id: as_opt_string_field(fault, "externalFaultId"),
        agent_error_description: as_opt_string_field(fault, "agentErrorDescription"),
        creation_date,
    }
}

/// Construye un `TerminalStatusRecord` a partir de un item de detalle crudo
/// devuelto por la fase de busqueda por terminal (P5).
///
/// `fetched_status` es la etiqueta de descubrimiento del filtro vendor bajo el
/// cual este terminal aparecio por primera vez en P4, no necesariamente el
/// `issueStateName` del detalle.
pub fn build_terminal_status_record(
    raw_detail: &serde_json::Value,
    fetched_status: &str,
    demo_mode: bool,
    is_newly_discovered: bool,
    unique_request_id: Uuid,
    now: DateTime<FixedOffset>,
) -> TerminalStatusRecord {
    let location = as_str_field(raw_detail, "location");
    let fault_data = extract_fault_data(raw_detail);

    let metadata = TerminalMetadata {
        retrieval_timestamp: sentinel_core_clock::format_iso8601(&now),
        demo_mode,
        unique_request_id,
        processing_info: ProcessingInfo {
            has_fault_data: fault_data.external_fault_id.is_some(),
            has_location: !location.is_empty(),
            status_at_retrieval: fetched_status.to_string(),
        },
        is_newly_discovered,
    };

    let raw_terminal_data = serde_json::json!({
        "terminalId": raw_detail.get("terminalId").cloned().unwrap_or(serde_json::Value::Null),
        "location": raw_detail.get("location").cloned().unwrap_or(serde_json::Value::Null),
        "issueStateName": raw_detail.get("issueStateName").cloned().unwrap_or(serde_json::Value::Null),
        "serialNumber": raw_detail.get("serialNumber").cloned().unwrap_or(serde_json::Value::Null),
        "fetched_status": fetched_status,
        "original_data": raw_detail,
    });

    TerminalStatusRecord {
        unique_request_id,
        terminal_id: as_str_field(raw_detail, "terminalId"),
        location,
        serial_number: as_str_field(raw_detail, "serialNumber"),
        issue_state_name: as_str_field(raw_detail, "issueStateName"),
        fetched_status: fetched_status.to_string(),
        retrieved_date: now,
        raw_terminal_data,
        fault_data,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_record_with_fault_data_from_first_fault_list_entry() {
        let raw = serde_json::json!({
            "terminalId": "83",
            "location": "RUA NICOLAU DOS REIS LOBATO",
            "issueStateName": "WOUNDED",
            "serialNumber": "YB762083",
            "faultList": [
                {
                    "year": "2024",
                    "month": "06",
                    "day": "15",
                    "externalFaultId": "PRR211983",
                    "agentErrorDescription": "Cash dispenser jam",
                    "creationDate": 1_718_438_400_000_i64
                }
            ]
        });

        let record = build_terminal_status_record(&raw, "WOUNDED", false, false, Uuid::new_v4(), sentinel_core_clock::dili_now());

        assert_eq!(record.terminal_id, "83");
        assert!(record.metadata.processing_info.has_fault_data);
        assert_eq!(record.fault_data.external_fault_id.as_deref(), Some("PRR211983"));
        assert!(record.fault_data.creation_date.is_some());
    }

    #[test]
    fn absent_fault_list_yields_all_null_fault_data() {
        let raw = serde_json::json!({
            "terminalId": "87",
            "location": "PERTAMINA INT.",
            "issueStateName": "AVAILABLE",
            "serialNumber": "YB762087"
        });

        let record = build_terminal_status_record(&raw, "AVAILABLE", false, false, Uuid::new_v4(), sentinel_core_clock::dili_now());
        assert!(!record.metadata.processing_info.has_fault_data);
        assert!(record.fault_data.external_fault_id.is_none());
        assert!(record.fault_data.creation_date.is_none());
    }

    #[test]
    fn newly_discovered_flag_propagates_into_metadata() {
        let raw = serde_json::json!({"terminalId": "9999", "location": "", "issueStateName": "HARD", "serialNumber": ""});
        let record = build_terminal_status_record(&raw, "HARD", false, true, Uuid::new_v4(), sentinel_core_clock::dili_now());
        assert!(record.metadata.is_newly_discovered);
        assert!(!record.metadata.processing_info.has_location);
    }
}
