// [apps/collector/src/demo.rs]
/*!
 * APARATO: DEMO DATA GENERATOR (ESTRATO L4 - APP)
 * RESPONSABILIDAD: SUSTITUTOS SINTETICOS DE LAS RESPUESTAS DEL VENDOR
 *
 * `--demo` no es un atajo que salta el pipeline: produce los mismos payloads
 * crudos que P3-P6 esperarian del vendor, y los pasa por el mismo Processor
 * que usa el modo en vivo. Solo P1/P2 y la E/S de red se omiten.
 */

use chrono::Utc;
use sentinel_domain_models::VendorStatus;

/// El unico payload `fifth_graphic` que el colector conoce en modo demo: la
/// region TL-DL con una distribucion fija de catorce terminales.
pub fn regional_fifth_graphic() -> serde_json::Value {
    serde_json::json!([
        {
            "hc-key": "TL-DL",
            "state_count": {
                "AVAILABLE": "0.78571427",
                "WOUNDED": "0.14285714",
                "WARNING": "0.07142857"
            }
        }
    ])
}

/// Terminales asignados a cada filtro vendor en modo demo, replicando la
/// distribucion de los catorce terminales reales de la flota.
fn terminal_ids_for(status: VendorStatus) -> &'static [&'static str] {
    match status {
        VendorStatus::Available => &["147", "169", "2603", "2604", "2605", "49", "83", "87", "88", "93"],
        VendorStatus::Warning => &["85", "90", "86"],
        VendorStatus::Wounded => &["89"],
        VendorStatus::Hard
        | VendorStatus::Cash
        | VendorStatus::Zombie
        | VendorStatus::Unavailable
        | VendorStatus::OutOfService => &[],
    }
}

/// Sustituto de P4 (busqueda por filtro de estado).
pub fn terminal_search(status: VendorStatus) -> Vec<serde_json::Value> {
    let vendor_name = status.as_vendor_str();
    terminal_ids_for(status)
        .iter()
        .map(|terminal_id| {
            serde_json::json!({
                "terminalId": terminal_id,
                "location": format!("Sample Location for {terminal_id}"),
                "issueStateName": vendor_name,
                "fetched_status": vendor_name,
                "issueStateCode": if vendor_name == "WOUNDED" { "HARD" } else { vendor_name },
                "brand": "Nautilus Hyosun",
                "model": "Monimax 5600",
            })
        })
        .collect()
}

/// Sustituto de P5 (detalle de un terminal individual), con una unica falla
/// sintetica cuyo mensaje depende del filtro bajo el que fue descubierto.
pub fn terminal_detail(terminal_id: &str, issue_state_code: &str) -> Vec<serde_json::Value> {
    let now_millis = Utc::now().timestamp_millis();
    let now = Utc::now();
    let last_digit = terminal_id.chars().last().unwrap_or('0');
    let agent_error_description = match issue_state_code {
        "HARD" => "MEDIA JAMMED",
        "CASH" => "CASH LOW",
        _ => "DEVICE ERROR",
    };

    vec![serde_json::json!({
        "terminalId": terminal_id,
        "networkId": "P24",
        "externalId": format!("4520{last_digit}"),
        "brand": "Nautilus Hyosun",
        "model": "Monimax 5600",
        "supplier": "BRI",
        "location": format!("Sample location for {terminal_id}"),
        "geoLocation": "TL-DL",
        "terminalType": "ATM",
        "osVersion": "00130035",
        "issueStateName": issue_state_code,
        "creationDate": now_millis,
        "statusDate": now_millis,
        "bank": "BRI",
        "serialNumber": format!("YB7620{terminal_id}"),
        "faultList": [{
            "faultId": format!("1379{terminal_id}"),
            "faultTypeCode": issue_state_code,
            "componentTypeCode": "PRR",
            "issueStateName": issue_state_code,
            "terminalId": terminal_id.parse::<i64>().unwrap_or(0),
            "serviceRequestId": 63173,
            "location": "DILI",
            "bank": "BRI",
            "brand": "Nautilus Hyosun",
            "model": "Monimax 5600",
            "year": now.format("%Y").to_string(),
            "month": now.format("%b").to_string().to_uppercase(),
            "day": now.format("%d").to_string(),
            "externalFaultId": format!("PRR2119{terminal_id}"),
            "agentErrorDescription": agent_error_description,
            "creationDate": now_millis,
        }],
    })]
}

/// Sustituto de P6 (posicion de efectivo): dos cassettes fijos, uno en
/// estado `LOW`, reproduciendo el ejemplo de referencia del proveedor.
pub fn cash_info(terminal_id: &str) -> serde_json::Value {
    serde_json::json!({
        "header": { "result_code": "000", "result_description": "Success." },
        "body": [{
            "terminalId": terminal_id,
            "businessId": "00610",
            "technicalCode": "00600610",
            "externalId": "45210",
            "terminalCashInfo": {
                "cashInfo": [
                    {
                        "cassId": "PCU00",
                        "cassLogicNbr": 1,
                        "cassPhysNbr": 0,
                        "cassTypeValue": "REJECT",
                        "cassTypeDescription": "Cassette of Rejected Notes",
                        "cassStatusValue": "OK",
                        "cassStatusDescription": "Cassete OK",
                        "cassStatusColor": "#3cd179",
                        "currency": null,
                        "notesVal": null,
                        "nbrNotes": 14,
                        "cassTotal": 0,
                        "percentage": 0.0,
                        "instanceId": "PCU00-1",
                    },
                    {
                        "cassId": "PCU01",
                        "cassLogicNbr": 2,
                        "cassPhysNbr": 1,
                        "cassTypeValue": "DISPENSE",
                        "cassTypeDescription": "Dispensing Cassette",
                        "cassStatusValue": "LOW",
                        "cassStatusDescription": "Cassette almost empty",
                        "cassStatusColor": "#90EE90",
                        "currency": "USD",
                        "notesVal": 20,
                        "nbrNotes": 542,
                        "cassTotal": 10840,
                        "percentage": 0.0,
                        "instanceId": "PCU01-2",
                    }
                ],
                "total": 10840
            }
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regional_demo_payload_carries_the_tl_dl_region() {
        let payload = regional_fifth_graphic();
        assert_eq!(payload[0]["hc-key"], "TL-DL");
    }

    #[test]
    fn terminal_search_covers_all_fourteen_terminals_across_three_filters() {
        let available = terminal_search(VendorStatus::Available);
        let warning = terminal_search(VendorStatus::Warning);
        let wounded = terminal_search(VendorStatus::Wounded);
        assert_eq!(available.len() + warning.len() + wounded.len(), 14);
        assert!(terminal_search(VendorStatus::Zombie).is_empty());
    }

    #[test]
    fn terminal_detail_embeds_a_fault_matching_the_issue_state() {
        let body = terminal_detail("83", "HARD");
        assert_eq!(body[0]["faultList"][0]["agentErrorDescription"], "MEDIA JAMMED");
    }

    #[test]
    fn cash_info_demo_has_one_low_cassette() {
        let raw = cash_info("83");
        assert_eq!(raw["body"][0]["terminalCashInfo"]["total"], 10840);
    }
}
