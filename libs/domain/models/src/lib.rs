// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS (V1.0 - GROUND ZERO)
 * CLASIFICACION: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICION DE CONTRATOS CANONICOS DE TELEMETRIA ATM
 * =================================================================
 */

pub mod status;
pub mod regional;
pub mod terminal;
pub mod cash;
pub mod registry;

pub use status::{CanonicalStatus, VendorStatus, ALL_VENDOR_STATUS_FILTERS};
pub use regional::RegionalSnapshot;
pub use terminal::{FaultData, ProcessingInfo, TerminalMetadata, TerminalStatusRecord};
pub use cash::{CashRecord, CassetteState, CassetteStatus, NullReason};
pub use registry::RegistryEntry;
