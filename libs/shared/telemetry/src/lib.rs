// INICIO DEL ARCHIVO [libs/shared/telemetry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TELEMETRY INITIALISER (V1.0 - SOBERANO)
 * CLASIFICACION: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: SUMIDERO DE TRAZAS Y CAPTURA DE PANICOS DEL COLECTOR
 *
 * VISION HIPER-HOLISTICA:
 * El colector corre sin supervision durante dias en modo continuo
 *; un panico en un hilo secundario no debe desaparecer en
 * silencio. `LOG_LEVEL`/`RUST_LOG` controlan la verbosidad; en
 * ausencia de ambas se usa `info` fuera de builds de depuracion.
 * =================================================================
 */

use std::panic;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa tracing-subscriber para el binario nombrado y registra un
/// panic hook que emite la ubicacion y el mensaje del panico como un evento
/// `error` estructurado antes de que el proceso termine.
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
        format!("{service_name}={default_level},sentinel={default_level},reqwest=warn,sqlx=warn").into()
    });

    let is_production = !cfg!(debug_assertions);

    if is_production {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false))
            .init();
    }

    let service = service_name.to_string();
    panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "unknown location".to_string());
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string panic payload>");

        tracing::error!(
            target: "panic_monitor",
            service = %service,
            location = %location,
            "🔥 [PANIC]: {}", payload
        );
    }));

    tracing::info!("👁️ [TELEMETRY]: tracing initialised for [{service_name}].");
}
// FIN DEL ARCHIVO [libs/shared/telemetry/src/lib.rs]
