// [libs/domain/models/src/terminal.rs]
/*!
 * APARATO: TERMINAL STATUS RECORD (ESTRATO L2)
 * RESPONSABILIDAD: UNA OBSERVACION DE UN TERMINAL EN UN INSTANTE DADO
 */

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bloque de falla embebido en `fault_data`. Todos los campos son
/// opcionales: ausencia de falla se representa con todos en `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaultData {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    #[serde(rename = "externalFaultId")]
    pub external_fault_id: Option<String>,
    #[serde(rename = "agentErrorDescription")]
    pub agent_error_description: Option<String>,
    /// Formateado `DD:MM:YYYY HH:MM:SS` en hora de Dili.
    #[serde(rename = "creationDate")]
    pub creation_date: Option<String>,
}

/// Sub-bloque `processing_info` dentro de `metadata`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingInfo {
    pub has_fault_data: bool,
    pub has_location: bool,
    pub status_at_retrieval: String,
}

/// Blob `metadata` completo adjunto a cada `TerminalStatusRecord`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalMetadata {
    pub retrieval_timestamp: String,
    pub demo_mode: bool,
    pub unique_request_id: Uuid,
    pub processing_info: ProcessingInfo,
    /// Marca cuando el terminal fue visto por primera vez en este
    /// ciclo y no existia previamente en el Terminal Registry.
    #[serde(default)]
    pub is_newly_discovered: bool,
}

/// Una observacion de un terminal. Registro de solo-anexado: nunca
/// se actualiza en el lugar, la historia es intencional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalStatusRecord {
    pub unique_request_id: Uuid,
    pub terminal_id: String,
    pub location: String,
    pub serial_number: String,
    pub issue_state_name: String,
    /// Filtro vendor bajo el cual fue descubierto este terminal en P4.
    pub fetched_status: String,
    pub retrieved_date: DateTime<FixedOffset>,
    pub raw_terminal_data: serde_json::Value,
    pub fault_data: FaultData,
    pub metadata: TerminalMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieved_date_carries_dili_offset() {
        let record = TerminalStatusRecord {
            unique_request_id: Uuid::new_v4(),
            terminal_id: "T001".into(),
            location: "Dili Central".into(),
            serial_number: "SN001".into(),
            issue_state_name: "AVAILABLE".into(),
            fetched_status: "AVAILABLE".into(),
            retrieved_date: sentinel_core_clock::dili_now(),
            raw_terminal_data: serde_json::json!({}),
            fault_data: FaultData::default(),
            metadata: TerminalMetadata {
                retrieval_timestamp: sentinel_core_clock::format_iso8601(&sentinel_core_clock::dili_now()),
                demo_mode: false,
                unique_request_id: Uuid::new_v4(),
                processing_info: ProcessingInfo {
                    has_fault_data: false,
                    has_location: true,
                    status_at_retrieval: "AVAILABLE".into(),
                },
                is_newly_discovered: false,
            },
        };

        assert_eq!(record.retrieved_date.offset().local_minus_utc(), sentinel_core_clock::DILI_OFFSET_SECONDS);
    }

    #[test]
    fn fault_data_defaults_to_all_null() {
        let fault = FaultData::default();
        assert!(fault.year.is_none());
        assert!(fault.agent_error_description.is_none());
        assert!(fault.creation_date.is_none());
    }

    #[test]
    fn metadata_serializes_with_processing_info_nested() {
        let metadata = TerminalMetadata {
            retrieval_timestamp: "2024-01-01T09:00:00+09:00".into(),
            demo_mode: false,
            unique_request_id: Uuid::new_v4(),
            processing_info: ProcessingInfo {
                has_fault_data: true,
                has_location: true,
                status_at_retrieval: "WOUNDED".into(),
            },
            is_newly_discovered: true,
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["processing_info"]["has_fault_data"], true);
        assert_eq!(value["is_newly_discovered"], true);
    }
}
