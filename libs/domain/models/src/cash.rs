// [libs/domain/models/src/cash.rs]
/*!
 * APARATO: CASH POSITION RECORD (ESTRATO L2)
 * RESPONSABILIDAD: INVENTARIO DE CASSETTES Y POLITICA DE REGISTRO NULO
 */

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Estado crudo reportado por el vendor para un cassette. El vocabulario es
/// abierto (`OK|LOW|ERROR|...`); se preserva el valor tal cual y se ofrecen
/// predicados sobre los valores conocidos en vez de forzar un enum cerrado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CassetteStatus(pub String);

impl CassetteStatus {
    pub fn is_low(&self) -> bool {
        self.0.eq_ignore_ascii_case("LOW")
    }

    /// Engloba los estados que cuentan como `has_cash_errors`.
    pub fn is_error_like(&self) -> bool {
        matches!(self.0.to_ascii_uppercase().as_str(), "ERROR" | "FAULT" | "FAILED")
    }
}

impl fmt::Display for CassetteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Un cassette fisico dentro de un terminal (embebido en `CashRecord.cassettes_data`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CassetteState {
    pub cassette_id: String,
    pub logical_number: i32,
    pub physical_number: i32,
    #[serde(rename = "type")]
    pub cassette_type: String,
    pub type_description: String,
    pub status: CassetteStatus,
    pub status_description: String,
    pub status_color: String,
    pub currency: Option<String>,
    pub denomination: Option<Decimal>,
    pub note_count: i64,
    pub total_value: Decimal,
    pub percentage: Decimal,
    pub instance_id: String,
}

/// El conjunto enumerado de motivos por los que un `CashRecord` puede ser un
/// registro nulo. `Processing` preserva el mensaje original del
/// fallo inesperado, siguiendo el patron `"Processing error: {detail}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullReason {
    NoBodyData,
    NoCashInfo,
    NoCassetteData,
    InvalidCassetteData,
    Processing(String),
}

impl NullReason {
    pub fn as_display_string(&self) -> String {
        match self {
            NullReason::NoBodyData => "No body data".to_string(),
            NullReason::NoCashInfo => "No cash info".to_string(),
            NullReason::NoCassetteData => "No cassette data".to_string(),
            NullReason::InvalidCassetteData => "Invalid cassette data".to_string(),
            NullReason::Processing(detail) => format!("Processing error: {}", detail),
        }
    }
}

impl fmt::Display for NullReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_display_string())
    }
}

/// Una observacion de posicion de efectivo de un terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashRecord {
    pub unique_request_id: Uuid,
    pub terminal_id: String,
    pub business_code: String,
    pub technical_code: String,
    pub external_id: String,
    pub retrieval_timestamp: DateTime<FixedOffset>,
    pub event_date: DateTime<FixedOffset>,
    pub total_cash_amount: Option<Decimal>,
    pub total_currency: Option<String>,
    pub cassettes_data: Vec<CassetteState>,
    pub cassette_count: i32,
    pub has_low_cash_warning: bool,
    pub has_cash_errors: bool,
    pub is_null_record: bool,
    pub null_reason: Option<String>,
    pub raw_cash_data: serde_json::Value,
}

impl CashRecord {
    /// Construye el registro sentinela para un motivo nulo dado: sin
    /// cassettes, sin monto total, divisa `None`.
    pub fn null_record(
        unique_request_id: Uuid,
        terminal_id: String,
        retrieval_timestamp: DateTime<FixedOffset>,
        event_date: DateTime<FixedOffset>,
        reason: NullReason,
        raw_cash_data: serde_json::Value,
    ) -> Self {
        Self {
            unique_request_id,
            terminal_id,
            business_code: String::new(),
            technical_code: String::new(),
            external_id: String::new(),
            retrieval_timestamp,
            event_date,
            total_cash_amount: None,
            total_currency: None,
            cassettes_data: Vec::new(),
            cassette_count: 0,
            has_low_cash_warning: false,
            has_cash_errors: false,
            is_null_record: true,
            null_reason: Some(reason.as_display_string()),
            raw_cash_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_record_shape_matches_property_four() {
        let record = CashRecord::null_record(
            Uuid::new_v4(),
            "T001".into(),
            sentinel_core_clock::dili_now(),
            sentinel_core_clock::dili_now(),
            NullReason::NoCassetteData,
            serde_json::json!({"cashInfo": []}),
        );

        assert!(record.is_null_record);
        assert!(record.cassettes_data.is_empty());
        assert!(record.total_cash_amount.is_none());
        assert_eq!(record.null_reason.as_deref(), Some("No cassette data"));
    }

    #[test]
    fn processing_error_reason_preserves_detail() {
        let reason = NullReason::Processing("unexpected key missing".to_string());
        assert_eq!(reason.as_display_string(), "Processing error: unexpected key missing");
    }

    #[test]
    fn cassette_status_predicates_are_case_insensitive() {
        assert!(CassetteStatus("low".to_string()).is_low());
        assert!(CassetteStatus("ERROR".to_string()).is_error_like());
        assert!(CassetteStatus("Failed".to_string()).is_error_like());
        assert!(!CassetteStatus("OK".to_string()).is_error_like());
    }

    #[test]
    fn all_enumerated_null_reasons_are_non_empty_strings() {
        let reasons = [
            NullReason::NoBodyData,
            NullReason::NoCashInfo,
            NullReason::NoCassetteData,
            NullReason::InvalidCassetteData,
            NullReason::Processing("x".into()),
        ];
        for reason in reasons {
            assert!(!reason.as_display_string().is_empty());
        }
    }
}
