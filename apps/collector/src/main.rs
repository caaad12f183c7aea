// INICIO DEL ARCHIVO [apps/collector/src/main.rs]
/*!
 * =================================================================
 * APARATO: COLLECTOR SHELL (ESTRATO L4 - APP)
 * RESPONSABILIDAD: BOOTSTRAP, SENALES DE SISTEMA Y CODIGOS DE SALIDA
 *
 * El binario es un orquestador puro de configuracion: toda la logica de
 * ciclo vive en `orchestrator`/`scheduler`. Este archivo solo ensambla las
 * dependencias de infraestructura y traduce el resultado a un codigo de
 * salida (0 exito, 1 excepcion no manejada, 130 por senal).
 * =================================================================
 */

use clap::Parser;
use sentinel_collector_lib::cli::CollectorArgs;
use sentinel_collector_lib::config::CollectorConfig;
use sentinel_collector_lib::scheduler;
use sentinel_infra_persistence::PersistenceClient;
use sentinel_infra_registry::TerminalRegistry;
use sentinel_infra_vendor_client::{ApiClient, AuthManager, CredentialSet, VendorSession};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    sentinel_shared_telemetry::init_tracing("collector");

    let exit_code = match run().await {
        Ok(code) => code,
        Err(error) => {
            error!("🚨 [SHELL]: unhandled exception during collector startup or execution: {error:?}");
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> anyhow::Result<i32> {
    info!("💠 [SHELL]: starting the ATM fleet telemetry collector...");

    let args = CollectorArgs::parse();
    let config = CollectorConfig::from_args(args)?;

    let shutdown = install_signal_handlers();

    let mut registry = TerminalRegistry::load_or_seed(&config.registry_path).await?;
    info!("📋 [SHELL]: Terminal Registry loaded with {} known terminals.", registry.len());

    let credentials = config.credentials.clone().unwrap_or_else(|| CredentialSet::primary_only(String::new(), String::new()));
    let session = VendorSession::new(config.vendor_base_url.clone())?;
    let auth = AuthManager::new(credentials);
    let mut api_client = ApiClient::new(session, auth, config.max_retries);

    let http_client = reqwest::Client::builder().danger_accept_invalid_certs(true).build()?;

    let persistence = match &config.database_url {
        Some(database_url) if config.save_to_db => Some(PersistenceClient::connect(database_url).await?),
        _ => None,
    };

    if config.continuous {
        let history = scheduler::run_continuous(&config, &mut api_client, &mut registry, &http_client, persistence.as_ref(), Arc::clone(&shutdown)).await;
        info!("📊 [SHELL]: retained {} entries in the in-memory cycle history.", history.entries().count());
    } else {
        let report = scheduler::run_once(&config, &mut api_client, &mut registry, &http_client, persistence.as_ref()).await;
        if report.write_report.as_ref().is_some_and(|write_report| write_report.any_stream_failed()) {
            warn!("⚠️ [SHELL]: the cycle completed but at least one persistence stream failed; see preceding warnings.");
        }
    }

    if shutdown.load(Ordering::SeqCst) {
        return Ok(130);
    }

    Ok(0)
}

/// Instala manejadores para SIGINT y SIGTERM, ambos convergiendo en la misma
/// bandera atomica que el planificador observa en incrementos de un segundo.
fn install_signal_handlers() -> Arc<AtomicBool> {
    let shutdown = Arc::new(AtomicBool::new(false));

    let sigint_flag = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⚠️ [SIGNAL]: SIGINT received, requesting a graceful shutdown after the current cycle...");
            sigint_flag.store(true, Ordering::SeqCst);
        }
    });

    #[cfg(unix)]
    {
        let sigterm_flag = Arc::clone(&shutdown);
        tokio::spawn(async move {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    warn!("⚠️ [SIGNAL]: SIGTERM received, requesting a graceful shutdown after the current cycle...");
                    sigterm_flag.store(true, Ordering::SeqCst);
                }
                Err(error) => warn!("⚠️ [SIGNAL]: could not install the SIGTERM handler: {error}"),
            }
        });
    }

    shutdown
}
// FIN DEL ARCHIVO [apps/collector/src/main.rs]
