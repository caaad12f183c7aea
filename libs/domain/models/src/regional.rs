// [libs/domain/models/src/regional.rs]
/*!
 * APARATO: REGIONAL SNAPSHOT (ESTRATO L2)
 * RESPONSABILIDAD: CONTEO AGREGADO POR REGION EN UN INSTANTE DADO
 */

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conteo agregado por region en un instante dado.
///
/// Invariante: `count_available + count_warning + count_zombie + count_wounded
/// + count_out_of_service == total_atms_in_region` fuera de modo failover; en
/// modo failover, `count_out_of_service == total_atms_in_region` y el resto es
/// cero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalSnapshot {
    pub unique_request_id: Uuid,
    pub region_code: String,
    pub count_available: i32,
    pub count_warning: i32,
    pub count_zombie: i32,
    pub count_wounded: i32,
    pub count_out_of_service: i32,
    pub percentage_available: Decimal,
    pub percentage_warning: Decimal,
    pub percentage_zombie: Decimal,
    pub percentage_wounded: Decimal,
    pub percentage_out_of_service: Decimal,
    pub date_creation: DateTime<FixedOffset>,
    pub total_atms_in_region: i32,
    /// Fragmento crudo `fifth_graphic` del vendor, preservado sin tocar.
    pub raw_regional_data: serde_json::Value,
}

impl RegionalSnapshot {
    /// Suma de los cinco contadores de estado.
    pub fn counted_total(&self) -> i32 {
        self.count_available
            + self.count_warning
            + self.count_zombie
            + self.count_wounded
            + self.count_out_of_service
    }

    /// Verifica la invariante de suma de contadores. No valida porcentajes:
    /// esos se toleran con una franja de +/-0.01.
    pub fn counts_balance(&self) -> bool {
        self.counted_total() == self.total_atms_in_region
    }

    /// Suma de los cinco porcentajes, para validar la tolerancia documentada.
    pub fn percentage_sum(&self) -> Decimal {
        self.percentage_available
            + self.percentage_warning
            + self.percentage_zombie
            + self.percentage_wounded
            + self.percentage_out_of_service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).expect("valid decimal literal in test")
    }

    fn sample(counts: (i32, i32, i32, i32, i32), total: i32) -> RegionalSnapshot {
        RegionalSnapshot {
            unique_request_id: Uuid::new_v4(),
            region_code: "TL-DL".to_string(),
            count_available: counts.0,
            count_warning: counts.1,
            count_zombie: counts.2,
            count_wounded: counts.3,
            count_out_of_service: counts.4,
            percentage_available: dec("0.78571427"),
            percentage_warning: dec("0.07142857"),
            percentage_zombie: dec("0"),
            percentage_wounded: dec("0.14285714"),
            percentage_out_of_service: dec("0"),
            date_creation: sentinel_core_clock::dili_now(),
            total_atms_in_region: total,
            raw_regional_data: serde_json::json!({}),
        }
    }

    #[test]
    fn counts_balance_detects_matching_totals() {
        let snapshot = sample((11, 1, 0, 2, 0), 14);
        assert!(snapshot.counts_balance());
        assert_eq!(snapshot.counted_total(), 14);
    }

    #[test]
    fn counts_balance_flags_a_mismatch() {
        let snapshot = sample((11, 1, 0, 2, 1), 14);
        assert!(!snapshot.counts_balance());
    }

    #[test]
    fn failover_snapshot_shape_is_all_out_of_service() {
        let snapshot = sample((0, 0, 0, 0, 14), 14);
        assert_eq!(snapshot.count_out_of_service, snapshot.total_atms_in_region);
        assert_eq!(snapshot.count_available + snapshot.count_warning + snapshot.count_zombie + snapshot.count_wounded, 0);
    }
}
