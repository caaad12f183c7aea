// [libs/domain/models/src/status.rs]
/*!
 * APARATO: TERMINAL STATUS VOCABULARY (ESTRATO L2)
 * RESPONSABILIDAD: COLAPSO TOTAL DEL VOCABULARIO VENDOR AL ESTADO CANONICO
 *
 * El proveedor expone un vocabulario mas rico que el modelo canonico.
 * `VendorStatus::collapse` es una funcion total: todo valor vendor
 * observado produce exactamente un `CanonicalStatus`.
 */

use serde::{Deserialize, Serialize};

/// Vocabulario crudo tal como lo reporta la API del proveedor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendorStatus {
    #[serde(rename = "AVAILABLE")]
    Available,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "WOUNDED")]
    Wounded,
    #[serde(rename = "HARD")]
    Hard,
    #[serde(rename = "CASH")]
    Cash,
    #[serde(rename = "ZOMBIE")]
    Zombie,
    #[serde(rename = "OUT_OF_SERVICE")]
    OutOfService,
    #[serde(rename = "UNAVAILABLE")]
    Unavailable,
}

/// Vocabulario canonico persistido en las columnas `issue_state_name` / `fetched_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalStatus {
    Available,
    Warning,
    Wounded,
    Zombie,
    OutOfService,
}

impl VendorStatus {
    /// Colapsa el vocabulario vendor al vocabulario canonico. Funcion total:
    /// no hay variante vendor sin mapeo.
    pub fn collapse(self) -> CanonicalStatus {
        match self {
            VendorStatus::Available => CanonicalStatus::Available,
            VendorStatus::Warning => CanonicalStatus::Warning,
            VendorStatus::Wounded | VendorStatus::Hard | VendorStatus::Cash => CanonicalStatus::Wounded,
            VendorStatus::Zombie => CanonicalStatus::Zombie,
            VendorStatus::OutOfService | VendorStatus::Unavailable => CanonicalStatus::OutOfService,
        }
    }

    /// Nombre exacto tal como aparece en la API vendor (para construir el filtro P4).
    pub fn as_vendor_str(self) -> &'static str {
        match self {
            VendorStatus::Available => "AVAILABLE",
            VendorStatus::Warning => "WARNING",
            VendorStatus::Wounded => "WOUNDED",
            VendorStatus::Hard => "HARD",
            VendorStatus::Cash => "CASH",
            VendorStatus::Zombie => "ZOMBIE",
            VendorStatus::OutOfService => "OUT_OF_SERVICE",
            VendorStatus::Unavailable => "UNAVAILABLE",
        }
    }

    /// Analiza un valor de cadena crudo del proveedor. Valores desconocidos se tratan
    /// como `OUT_OF_SERVICE` -- la posicion mas conservadora para telemetria de fallas.
    pub fn parse_lenient(raw: &str) -> VendorStatus {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => VendorStatus::Available,
            "WARNING" => VendorStatus::Warning,
            "WOUNDED" => VendorStatus::Wounded,
            "HARD" => VendorStatus::Hard,
            "CASH" => VendorStatus::Cash,
            "ZOMBIE" => VendorStatus::Zombie,
            "UNAVAILABLE" => VendorStatus::Unavailable,
            _ => VendorStatus::OutOfService,
        }
    }
}

impl CanonicalStatus {
    /// La union {AVAILABLE, WARNING} cuenta como operativa para el porcentaje de
    /// disponibilidad.
    pub fn is_operational(self) -> bool {
        matches!(self, CanonicalStatus::Available | CanonicalStatus::Warning)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalStatus::Available => "AVAILABLE",
            CanonicalStatus::Warning => "WARNING",
            CanonicalStatus::Wounded => "WOUNDED",
            CanonicalStatus::Zombie => "ZOMBIE",
            CanonicalStatus::OutOfService => "OUT_OF_SERVICE",
        }
    }
}

impl std::fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Los ocho filtros de estado vendor consultados durante la fase P4 de busqueda de
/// terminales. El orden no es significativo para la union de resultados,
/// pero se preserva el orden documentado para facilitar la comparacion con logs.
pub const ALL_VENDOR_STATUS_FILTERS: &[VendorStatus] = &[
    VendorStatus::Wounded,
    VendorStatus::Hard,
    VendorStatus::Cash,
    VendorStatus::Unavailable,
    VendorStatus::Available,
    VendorStatus::Warning,
    VendorStatus::Zombie,
    VendorStatus::OutOfService,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_table_is_total_and_maps_every_vendor_variant() {
        let expectations = [
            (VendorStatus::Available, CanonicalStatus::Available),
            (VendorStatus::Warning, CanonicalStatus::Warning),
            (VendorStatus::Wounded, CanonicalStatus::Wounded),
            (VendorStatus::Hard, CanonicalStatus::Wounded),
            (VendorStatus::Cash, CanonicalStatus::Wounded),
            (VendorStatus::Zombie, CanonicalStatus::Zombie),
            (VendorStatus::OutOfService, CanonicalStatus::OutOfService),
            (VendorStatus::Unavailable, CanonicalStatus::OutOfService),
        ];
        for (vendor, expected) in expectations {
            assert_eq!(vendor.collapse(), expected);
        }
    }

    #[test]
    fn operational_union_is_available_and_warning_only() {
        assert!(CanonicalStatus::Available.is_operational());
        assert!(CanonicalStatus::Warning.is_operational());
        assert!(!CanonicalStatus::Wounded.is_operational());
        assert!(!CanonicalStatus::Zombie.is_operational());
        assert!(!CanonicalStatus::OutOfService.is_operational());
    }

    #[test]
    fn parse_lenient_defaults_unknown_values_to_out_of_service() {
        assert_eq!(VendorStatus::parse_lenient("available").collapse(), CanonicalStatus::Available);
        assert_eq!(VendorStatus::parse_lenient("totally-unknown").collapse(), CanonicalStatus::OutOfService);
    }

    #[test]
    fn all_eight_filters_are_present_exactly_once() {
        assert_eq!(ALL_VENDOR_STATUS_FILTERS.len(), 8);
    }
}
