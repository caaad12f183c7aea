// [libs/domain/processor/src/cash.rs]
/*!
 * APARATO: CASH RECORD PROCESSOR (ESTRATO L2)
 * RESPONSABILIDAD: respuesta cruda de cash info -> CashRecord, politica de registro nulo
 */

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use sentinel_domain_models::{CashRecord, CassetteState, CassetteStatus, NullReason};
use std::str::FromStr;
use uuid::Uuid;

fn string_field(value: &serde_json::Value, key: &str) -> String {
    value.get(key).and_then(|v| v.as_str()).unwrap_or_default().to_string()
}

fn decimal_field(value: &serde_json::Value, key: &str) -> Decimal {
    match value.get(key) {
        Some(serde_json::Value::Number(n)) => Decimal::from_str(&n.to_string()).unwrap_or_default(),
        Some(serde_json::Value::String(s)) => Decimal::from_str(s).unwrap_or_default(),
        _ => Decimal::default(),
    }
}

fn parse_cassette(raw: &serde_json::Value) -> Option<CassetteState> {
    let obj = raw.as_object()?;
    let denomination = obj
        .get("notesVal")
        .filter(|v| !v.is_null())
        .map(|_| decimal_field(raw, "notesVal"));
    let note_count = obj
        .get("nbrNotes")
        .and_then(|v| v.as_i64())
        .unwrap_or(0);

    Some(CassetteState {
        cassette_id: string_field(raw, "cassId"),
        logical_number: obj.get("cassLogicNbr").and_then(|v| v.as_i64()).unwrap_or(0) as i32,
        physical_number: obj.get("cassPhysNbr").and_then(|v| v.as_i64()).unwrap_or(0) as i32,
        cassette_type: string_field(raw, "cassTypeValue"),
        type_description: string_field(raw, "cassTypeDescription"),
        status: CassetteStatus(string_field(raw, "cassStatusValue")),
        status_description: string_field(raw, "cassStatusDescription"),
        status_color: string_field(raw, "cassStatusColor"),
        currency: obj.get("currency").and_then(|v| v.as_str()).map(str::to_string),
        denomination,
        note_count,
        total_value: decimal_field(raw, "cassTotal"),
        percentage: decimal_field(raw, "percentage"),
        instance_id: string_field(raw, "instanceId"),
    })
}

/// Procesa la respuesta cruda de `/sigit/terminal/searchTerminal` en un
/// `CashRecord`, aplicando la politica de registro nulo: cada motivo de
/// ausencia produce un registro sentinela distinguible en vez de omitir el
/// terminal.
pub fn process_cash_information(
    terminal_id: &str,
    raw_response: &serde_json::Value,
    now: DateTime<FixedOffset>,
) -> CashRecord {
    let unique_request_id = Uuid::new_v4();

    let Some(body) = raw_response.get("body").and_then(|v| v.as_array()).filter(|a| !a.is_empty()) else {
        return CashRecord::null_record(unique_request_id, terminal_id.to_string(), now, now, NullReason::NoBodyData, raw_response.clone());
    };

    let terminal_info = &body[0];
    let Some(cash_info) = terminal_info.get("terminalCashInfo").filter(|v| !v.is_null()) else {
        return CashRecord::null_record(unique_request_id, terminal_id.to_string(), now, now, NullReason::NoCashInfo, raw_response.clone());
    };

    let Some(cassettes_raw) = cash_info.get("cashInfo").and_then(|v| v.as_array()).filter(|a| !a.is_empty()) else {
        return CashRecord::null_record(unique_request_id, terminal_id.to_string(), now, now, NullReason::NoCassetteData, raw_response.clone());
    };

    let cassettes: Vec<CassetteState> = cassettes_raw.iter().filter_map(parse_cassette).collect();
    if cassettes.is_empty() {
        return CashRecord::null_record(unique_request_id, terminal_id.to_string(), now, now, NullReason::InvalidCassetteData, raw_response.clone());
    }

    let has_low_cash_warning = cassettes.iter().any(|c| c.status.is_low());
    let has_cash_errors = cassettes.iter().any(|c| c.status.is_error_like());

    let event_date = cassettes_raw[0]
        .get("eventDate")
        .and_then(|v| v.as_i64())
        .and_then(sentinel_core_clock::from_vendor_epoch_millis)
        .unwrap_or(now);

    let total_cash_amount = cash_info.get("total").map(|_| decimal_field(cash_info, "total"));

    CashRecord {
        unique_request_id,
        terminal_id: terminal_id.to_string(),
        business_code: string_field(terminal_info, "businessId"),
        technical_code: string_field(terminal_info, "technicalCode"),
        external_id: string_field(terminal_info, "externalId"),
        retrieval_timestamp: now,
        event_date,
        total_cash_amount,
        total_currency: Some("USD".to_string()),
        cassette_count: cassettes.len() as i32,
        cassettes_data: cassettes,
        has_low_cash_warning,
        has_cash_errors,
        is_null_record: false,
        null_reason: None,
        raw_cash_data: raw_response.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> serde_json::Value {
        serde_json::json!({
            "body": [{
                "businessId": "BIZ01",
                "technicalCode": "TECH01",
                "externalId": "EXT01",
                "terminalCashInfo": {
                    "total": "12500.00",
                    "cashInfo": [
                        {
                            "cassId": "C1", "cassLogicNbr": 1, "cassPhysNbr": 1,
                            "cassTypeValue": "DISPENSE", "cassTypeDescription": "Dispense cassette",
                            "cassStatusValue": "OK", "cassStatusDescription": "Operational",
                            "cassStatusColor": "GREEN", "currency": "USD", "notesVal": 20,
                            "nbrNotes": 400, "cassTotal": "8000.00", "percentage": "0.64",
                            "instanceId": "I1", "eventDate": 1_718_438_400_000_i64
                        },
                        {
                            "cassId": "C2", "cassLogicNbr": 2, "cassPhysNbr": 2,
                            "cassTypeValue": "DISPENSE", "cassTypeDescription": "Dispense cassette",
                            "cassStatusValue": "LOW", "cassStatusDescription": "Low",
                            "cassStatusColor": "YELLOW", "currency": "USD", "notesVal": 10,
                            "nbrNotes": 450, "cassTotal": "4500.00", "percentage": "0.36",
                            "instanceId": "I2"
                        }
                    ]
                }
            }]
        })
    }

    #[test]
    fn valid_response_produces_populated_record_with_low_warning() {
        let record = process_cash_information("83", &sample_response(), sentinel_core_clock::dili_now());
        assert!(!record.is_null_record);
        assert_eq!(record.cassette_count, 2);
        assert!(record.has_low_cash_warning);
        assert!(!record.has_cash_errors);
        assert_eq!(record.total_cash_amount, Some(Decimal::from_str("12500.00").unwrap()));
    }

    #[test]
    fn missing_body_yields_null_record_with_distinct_reason() {
        let record = process_cash_information("83", &serde_json::json!({}), sentinel_core_clock::dili_now());
        assert!(record.is_null_record);
        assert_eq!(record.null_reason.as_deref(), Some("No body data"));
    }

    #[test]
    fn missing_terminal_cash_info_yields_null_record() {
        let raw = serde_json::json!({"body": [{"businessId": "BIZ01"}]});
        let record = process_cash_information("83", &raw, sentinel_core_clock::dili_now());
        assert!(record.is_null_record);
        assert_eq!(record.null_reason.as_deref(), Some("No cash info"));
    }

    #[test]
    fn empty_cassette_array_yields_null_record() {
        let raw = serde_json::json!({"body": [{"terminalCashInfo": {"total": "0", "cashInfo": []}}]});
        let record = process_cash_information("83", &raw, sentinel_core_clock::dili_now());
        assert!(record.is_null_record);
        assert_eq!(record.null_reason.as_deref(), Some("No cassette data"));
    }

    #[test]
    fn all_invalid_cassette_entries_yield_null_record() {
        let raw = serde_json::json!({"body": [{"terminalCashInfo": {"total": "0", "cashInfo": ["not-an-object", 42]}}]});
        let record = process_cash_information("83", &raw, sentinel_core_clock::dili_now());
        assert!(record.is_null_record);
        assert_eq!(record.null_reason.as_deref(), Some("Invalid cassette data"));
    }

    #[test]
    fn error_like_cassette_status_sets_has_cash_errors() {
        let mut raw = sample_response();
        raw["body"][0]["terminalCashInfo"]["cashInfo"][1]["cassStatusValue"] = serde_json::json!("FAULT");
        let record = process_cash_information("83", &raw, sentinel_core_clock::dili_now());
        assert!(record.has_cash_errors);
    }
}
