// [libs/infra/registry/src/seed.rs]
/*!
 * APARATO: REGISTRY SEED DATA (ESTRATO L3)
 * RESPONSABILIDAD: LISTA INICIAL DE TERMINALES CONOCIDOS POR LA FLOTA REAL
 */

use chrono::{DateTime, FixedOffset};
use sentinel_domain_models::RegistryEntry;

/// Los catorce terminales reales y sus ubicaciones autoritativas, usadas para
/// poblar el registro en su primera ejecucion y como base de la sintesis de
/// failover cuando el proveedor vendor es inalcanzable.
const KNOWN_TERMINALS: &[(&str, &str)] = &[
    ("83", "RUA NICOLAU DOS REIS LOBATO"),
    ("2603", "BRI - CENTRAL OFFICE COLMERA 02"),
    ("87", "PERTAMINA INT. BEBORRA RUA. DOS MARTIRES DA PATRIA"),
    ("88", "AERO PORTO NICOLAU LOBATU,DILI"),
    ("2604", "BRI - SUB-BRANCH AUDIAN"),
    ("85", "ESTRADA DE BALIDE, BALIDE"),
    ("147", "CENTRO SUPERMERCADO PANTAI KELAPA"),
    ("49", "AV. ALM. AMERICO TOMAS"),
    ("86", "FATU AHI"),
    ("2605", "BRI - SUB BRANCH HUDILARAN"),
    ("169", "BRI SUB-BRANCH FATUHADA"),
    ("90", "NOVO TURISMO, BIDAU LECIDERE"),
    ("89", "UNTL, RUA JACINTO CANDIDO"),
    ("93", "TIMOR PLAZA COMORO"),
];

pub fn seed_entries(discovered_at: DateTime<FixedOffset>) -> Vec<RegistryEntry> {
    KNOWN_TERMINALS
        .iter()
        .map(|(terminal_id, location)| RegistryEntry {
            terminal_id: (*terminal_id).to_string(),
            location: (*location).to_string(),
            discovery_timestamp: discovered_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_list_has_fourteen_unique_terminal_ids() {
        let now = sentinel_core_clock::dili_now();
        let entries = seed_entries(now);
        assert_eq!(entries.len(), 14);

        let mut ids: Vec<&str> = entries.iter().map(|e| e.terminal_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn seed_list_carries_no_blank_locations() {
        let now = sentinel_core_clock::dili_now();
        for entry in seed_entries(now) {
            assert!(!entry.location.trim().is_empty());
        }
    }
}
