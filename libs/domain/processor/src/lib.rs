// INICIO DEL ARCHIVO [libs/domain/processor/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CANONICAL RECORD PROCESSOR (V1.0 - SOBERANO)
 * CLASIFICACION: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: TRANSFORMACION PURA DE PAYLOADS VENDOR A REGISTROS CANONICOS
 *
 * VISION HIPER-HOLISTICA:
 * Este aparato no realiza E/S. Toma payloads JSON crudos mas un reloj de
 * pared y produce las formas canonicas del dominio. Toda decision de
 * redondeo, colapso de vocabulario y politica de registro nulo vive
 * aqui, no en el orquestador.
 * =================================================================
 */

pub mod cash;
pub mod errors;
pub mod regional;
pub mod terminal;

pub use cash::process_cash_information;
pub use errors::ProcessorError;
pub use regional::{process_regional_snapshot, MONITORED_REGION_CODE};
pub use terminal::build_terminal_status_record;
// FIN DEL ARCHIVO [libs/domain/processor/src/lib.rs]
