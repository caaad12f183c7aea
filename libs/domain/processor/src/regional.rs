// [libs/domain/processor/src/regional.rs]
/*!
 * APARATO: REGIONAL SNAPSHOT PROCESSOR (ESTRATO L2)
 * RESPONSABILIDAD: fifth_graphic -> RegionalSnapshot
 */

use crate::errors::ProcessorError;
use chrono::{DateTime, FixedOffset};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sentinel_domain_models::{CanonicalStatus, RegionalSnapshot, VendorStatus};
use std::str::FromStr;
use tracing::warn;
use uuid::Uuid;

/// El codigo de region que este colector monitorea en exclusiva.
pub const MONITORED_REGION_CODE: &str = "TL-DL";

/// Acumulador mutable de cuentas y porcentajes por estado canonico mientras se
/// recorre `state_count`.
#[derive(Default)]
struct Accumulator {
    count_available: i32,
    count_warning: i32,
    count_zombie: i32,
    count_wounded: i32,
    count_out_of_service: i32,
    percentage_available: Decimal,
    percentage_warning: Decimal,
    percentage_zombie: Decimal,
    percentage_wounded: Decimal,
    percentage_out_of_service: Decimal,
}

impl Accumulator {
    fn add(&mut self, canonical: CanonicalStatus, count: i32, percentage: Decimal) {
        match canonical {
            CanonicalStatus::Available => {
                self.count_available += count;
                self.percentage_available += percentage;
            }
            CanonicalStatus::Warning => {
                self.count_warning += count;
                self.percentage_warning += percentage;
            }
            CanonicalStatus::Zombie => {
                self.count_zombie += count;
                self.percentage_zombie += percentage;
            }
            CanonicalStatus::Wounded => {
                self.count_wounded += count;
                self.percentage_wounded += percentage;
            }
            CanonicalStatus::OutOfService => {
                self.count_out_of_service += count;
                self.percentage_out_of_service += percentage;
            }
        }
    }

    fn total_count(&self) -> i32 {
        self.count_available
            + self.count_warning
            + self.count_zombie
            + self.count_wounded
            + self.count_out_of_service
    }

    fn total_percentage(&self) -> Decimal {
        self.percentage_available
            + self.percentage_warning
            + self.percentage_zombie
            + self.percentage_wounded
            + self.percentage_out_of_service
    }
}

/// Convierte el bloque `fifth_graphic` crudo en un `RegionalSnapshot` para la
/// region monitoreada. Retorna `None` si la region no aparece en el payload;
/// retorna error si la region aparece pero `state_count` esta vacio.
///
/// Las percentages son la fuente de verdad: desviaciones entre la suma de
/// counts redondeados y `total_atms` se registran pero no se corrigen.
pub fn process_regional_snapshot(
    fifth_graphic: &serde_json::Value,
    total_atms: i32,
    now: DateTime<FixedOffset>,
) -> Result<Option<RegionalSnapshot>, ProcessorError> {
    let entries = fifth_graphic.as_array().map(Vec::as_slice).unwrap_or(&[]);

    let Some(region) = entries
        .iter()
        .find(|entry| entry.get("hc-key").and_then(|v| v.as_str()) == Some(MONITORED_REGION_CODE))
    else {
        return Ok(None);
    };

    let state_count = region
        .get("state_count")
        .and_then(|v| v.as_object())
        .ok_or(ProcessorError::EmptyStateCount)?;

    if state_count.is_empty() {
        return Err(ProcessorError::EmptyStateCount);
    }

    let total_atms_decimal = Decimal::from(total_atms);
    let mut accumulator = Accumulator::default();

    for (state_type, raw_percentage) in state_count.iter() {
        let Some(percentage_str) = raw_percentage.as_str().map(str::to_string).or_else(|| raw_percentage.as_f64().map(|f| f.to_string())) else {
            warn!("⚠️ [PROCESSOR]: state_count entry {state_type} has a non-numeric value, skipping.");
            continue;
        };
        let Ok(percentage) = Decimal::from_str(&percentage_str) else {
            warn!("⚠️ [PROCESSOR]: could not parse percentage '{percentage_str}' for state {state_type}.");
            continue;
        };

        let vendor_status = VendorStatus::parse_lenient(state_type);
        let canonical = vendor_status.collapse();
        let count = (percentage * total_atms_decimal).round().to_i32().unwrap_or(0);

        accumulator.add(canonical, count, percentage.round_dp(8));
    }

    let total_percentage = accumulator.total_percentage();
    if (total_percentage - Decimal::ONE).abs() > Decimal::new(1, 2) {
        warn!(
            "⚠️ [PROCESSOR]: percentages for region {MONITORED_REGION_CODE} sum to {total_percentage}, expected ~1.0."
        );
    }

    let total_count = accumulator.total_count();
    if total_count != total_atms {
        warn!(
            "⚠️ [PROCESSOR]: rounded counts for region {MONITORED_REGION_CODE} sum to {total_count}, expected {total_atms}."
        );
    }

    Ok(Some(RegionalSnapshot {
        unique_request_id: Uuid::new_v4(),
        region_code: MONITORED_REGION_CODE.to_string(),
        count_available: accumulator.count_available,
        count_warning: accumulator.count_warning,
        count_zombie: accumulator.count_zombie,
        count_wounded: accumulator.count_wounded,
        count_out_of_service: accumulator.count_out_of_service,
        percentage_available: accumulator.percentage_available,
        percentage_warning: accumulator.percentage_warning,
        percentage_zombie: accumulator.percentage_zombie,
        percentage_wounded: accumulator.percentage_wounded,
        percentage_out_of_service: accumulator.percentage_out_of_service,
        date_creation: now,
        total_atms_in_region: total_atms,
        raw_regional_data: region.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_matches_property_example_from_the_contract() {
        let payload = serde_json::json!([
            {
                "hc-key": "TL-DL",
                "state_count": {
                    "AVAILABLE": "0.78571427",
                    "WOUNDED": "0.14285714",
                    "WARNING": "0.07142857"
                }
            }
        ]);

        let snapshot = process_regional_snapshot(&payload, 14, sentinel_core_clock::dili_now())
            .unwrap()
            .expect("TL-DL region present");

        assert_eq!(snapshot.count_available, 11);
        assert_eq!(snapshot.count_warning, 1);
        assert_eq!(snapshot.count_wounded, 2);
        assert_eq!(snapshot.count_zombie, 0);
        assert_eq!(snapshot.count_out_of_service, 0);
        assert_eq!(snapshot.counted_total(), 14);
    }

    #[test]
    fn region_absent_from_payload_yields_none() {
        let payload = serde_json::json!([{"hc-key": "TL-BB", "state_count": {"AVAILABLE": "1.0"}}]);
        let result = process_regional_snapshot(&payload, 14, sentinel_core_clock::dili_now()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_state_count_is_an_error_not_a_silent_zero_snapshot() {
        let payload = serde_json::json!([{"hc-key": "TL-DL", "state_count": {}}]);
        let result = process_regional_snapshot(&payload, 14, sentinel_core_clock::dili_now());
        assert!(result.is_err());
    }

    #[test]
    fn rounding_deviation_does_not_get_corrected_after_the_fact() {
        // Three states at 1/3 each round to 5+5+5=15 for total_atms=14, by design uncorrected.
        let payload = serde_json::json!([
            {
                "hc-key": "TL-DL",
                "state_count": {
                    "AVAILABLE": "0.33333333",
                    "WARNING": "0.33333333",
                    "WOUNDED": "0.33333334"
                }
            }
        ]);
        let snapshot = process_regional_snapshot(&payload, 14, sentinel_core_clock::dili_now())
            .unwrap()
            .unwrap();
        assert_ne!(snapshot.counted_total(), 14);
    }
}
