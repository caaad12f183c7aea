// INICIO DEL ARCHIVO [libs/core/clock/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DILI WALL CLOCK (V1.0 - SOBERANO)
 * CLASIFICACION: CORE UTILITY (ESTRATO L1)
 * RESPONSABILIDAD: FUENTE UNICA DE VERDAD TEMPORAL PARA EL COLECTOR
 *
 * VISION HIPER-HOLISTICA:
 * El banco opera exclusivamente en husos Asia/Dili (UTC+9, sin horario
 * de verano). Este aparato evita que cada estrato reimplemente la
 * aritmetica de zona horaria: toda marca de tiempo persistida nace
 * o transita por aqui antes de tocar disco.
 * =================================================================
 */

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Desplazamiento fijo de Dili respecto a UTC, en segundos (+09:00, sin DST).
pub const DILI_OFFSET_SECONDS: i32 = 9 * 3600;

/// Construye el desplazamiento fijo de Dili. Nunca falla: la constante es valida.
fn dili_offset() -> FixedOffset {
    FixedOffset::east_opt(DILI_OFFSET_SECONDS).expect("DILI_OFFSET_SECONDS is a valid fixed offset")
}

/// Marca de tiempo actual, expresada en hora de Dili.
pub fn dili_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&dili_offset())
}

/// Convierte una marca de tiempo consciente de zona (cualquier zona) a hora de Dili.
pub fn to_dili<Tz: TimeZone>(timestamp: DateTime<Tz>) -> DateTime<FixedOffset> {
    timestamp.with_timezone(&dili_offset())
}

/// Interpreta una marca de tiempo ingenua (sin zona) como si ya estuviera en hora de Dili.
///
/// Usado para valores que llegan de fuentes locales (por ejemplo el registro de
/// terminales en disco) que nunca cruzaron una frontera de zona horaria.
pub fn naive_as_dili(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    dili_offset()
        .from_local_datetime(&naive)
        .single()
        .expect("fixed offsets never produce ambiguous or nonexistent local times")
}

/// Convierte un epoch en milisegundos UTC (el formato que usa el proveedor vendor
/// para `creationDate`) a una marca de tiempo consciente en hora de Dili.
///
/// Retorna `None` si el valor no corresponde a un instante representable.
pub fn from_vendor_epoch_millis(epoch_millis: i64) -> Option<DateTime<FixedOffset>> {
    let seconds = epoch_millis.div_euclid(1000);
    let nanos = (epoch_millis.rem_euclid(1000) * 1_000_000) as u32;
    let utc = Utc.timestamp_opt(seconds, nanos).single()?;
    Some(to_dili(utc))
}

/// Formatea una marca de tiempo Dili en el formato del contrato `fault_data.creationDate`:
/// `DD:MM:YYYY HH:MM:SS`.
pub fn format_fault_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%d:%m:%Y %H:%M:%S").to_string()
}

/// Renderiza una marca de tiempo Dili como ISO-8601 con el desplazamiento explicito,
/// el formato exigido dentro de los blobs JSONB de `metadata`.
pub fn format_iso8601(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dili_offset_is_nine_hours_east_no_dst() {
        let offset = dili_offset();
        assert_eq!(offset.local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn vendor_epoch_millis_round_trips_through_dili() {
        // 2024-01-01T00:00:00Z -> 2024-01-01T09:00:00+09:00
        let epoch_millis = 1_704_067_200_000_i64;
        let dili = from_vendor_epoch_millis(epoch_millis).expect("valid epoch");
        assert_eq!(dili.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-01 09:00:00");
        assert_eq!(dili.offset().local_minus_utc(), DILI_OFFSET_SECONDS);
    }

    #[test]
    fn fault_timestamp_format_matches_contract() {
        let dili = from_vendor_epoch_millis(1_704_067_200_000_i64).unwrap();
        assert_eq!(format_fault_timestamp(&dili), "01:01:2024 09:00:00");
    }

    #[test]
    fn naive_datetime_is_interpreted_as_dili_not_utc() {
        let naive = NaiveDateTime::parse_from_str("2024-06-15 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let dili = naive_as_dili(naive);
        assert_eq!(dili.offset().local_minus_utc(), DILI_OFFSET_SECONDS);
        assert_eq!(dili.naive_local(), naive);
    }

    #[test]
    fn iso8601_rendering_carries_the_dili_offset() {
        let dili = dili_now();
        let rendered = format_iso8601(&dili);
        assert!(rendered.ends_with("+09:00"));
    }
}
// FIN DEL ARCHIVO [libs/core/clock/src/lib.rs]
