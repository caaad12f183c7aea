// [libs/domain/models/src/registry.rs]
/*!
 * APARATO: TERMINAL REGISTRY ENTRY (ESTRATO L2)
 * RESPONSABILIDAD: FORMA DE UN TERMINAL CONOCIDO EN EL REGISTRO DURABLE
 */

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Un terminal conocido dentro del Terminal Registry. El registro
/// es monotono: las entradas se agregan, nunca se eliminan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryEntry {
    pub terminal_id: String,
    /// Ubicacion autoritativa usada por el sintetizador de failover cuando el
    /// terminal no pudo ser observado en el ciclo actual.
    pub location: String,
    pub discovery_timestamp: DateTime<FixedOffset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_entry_round_trips_through_json() {
        let entry = RegistryEntry {
            terminal_id: "T001".into(),
            location: "Dili Central".into(),
            discovery_timestamp: sentinel_core_clock::dili_now(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: RegistryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
