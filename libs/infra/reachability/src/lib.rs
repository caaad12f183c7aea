// INICIO DEL ARCHIVO [libs/infra/reachability/src/lib.rs]
/*!
 * =================================================================
 * APARATO: REACHABILITY PROBE (V1.0 - SOBERANO)
 * CLASIFICACION: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: DISTINGUIR "RED CAIDA" DE "AUTENTICACION ROTA"
 *
 * VISION HIPER-HOLISTICA:
 * P1 del ciclo del colector existe solo para que el
 * sintetizador de failover pueda elegir el marcador correcto
 * (CONNECTION_FAILED vs AUTH_FAILED). Tres ecos ICMP con 15s de
 * limite total; si el binario `ping` del sistema no existe, se
 * degrada a un HEAD HTTPS contra el host del vendor (nota de
 * diseno 9: las dos rutas nunca se mezclan dentro de una misma
 * sonda).
 * =================================================================
 */

use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

const PROBE_ECHO_COUNT: u32 = 3;
const PROBE_OVERALL_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ReachabilityError {
    /// Ninguno de los tres ecos ICMP tuvo exito dentro del limite de tiempo.
    #[error("[L3_REACHABILITY_FAULT]: ICMP_ECHO_UNANSWERED")]
    IcmpUnreachable,

    /// El HEAD HTTPS de respaldo (usado cuando `ping` no esta disponible) fallo.
    #[error("[L3_REACHABILITY_FAULT]: HTTP_HEAD_FALLBACK_FAILED -> {0}")]
    HttpFallbackFailed(String),

    /// La sonda completa (ICMP y HTTP) se agoto sin resolver.
    #[error("[L3_REACHABILITY_FAULT]: PROBE_TIMED_OUT")]
    TimedOut,
}

/// Como se resolvio la sonda, para que el orquestador lo registre en
/// `performance_metrics` sin tener que inspeccionar el error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Icmp,
    HttpHeadFallback,
}

/// Confirma si el host del vendor responde antes de arriesgar un login.
///
/// Nunca se usa para decidir un fallo de autenticacion: solo para que el
/// branch A del sintetizador de failover tenga una explicacion.
#[instrument(skip(http_client))]
pub async fn probe_vendor_host(
    vendor_host: &str,
    http_client: &reqwest::Client,
    base_url: &str,
) -> Result<ProbeMethod, ReachabilityError> {
    match timeout(PROBE_OVERALL_TIMEOUT, run_icmp_probe(vendor_host)).await {
        Ok(Ok(true)) => {
            info!("📡 [REACHABILITY]: ICMP probe to [{vendor_host}] succeeded.");
            Ok(ProbeMethod::Icmp)
        }
        Ok(Ok(false)) => {
            warn!("📡 [REACHABILITY]: ICMP probe to [{vendor_host}] completed with no successful echo.");
            Err(ReachabilityError::IcmpUnreachable)
        }
        Ok(Err(IcmpProbeFailure::PingUnavailable)) => {
            warn!("📡 [REACHABILITY]: system `ping` binary unavailable, degrading to HTTP HEAD fallback.");
            run_http_head_fallback(http_client, base_url).await
        }
        Err(_) => {
            warn!("📡 [REACHABILITY]: ICMP probe to [{vendor_host}] exceeded the 15s overall budget.");
            Err(ReachabilityError::TimedOut)
        }
    }
}

enum IcmpProbeFailure {
    PingUnavailable,
}

#[cfg(unix)]
fn ping_command(host: &str) -> Command {
    let mut command = Command::new("ping");
    command.args(["-c", &PROBE_ECHO_COUNT.to_string(), "-W", "5", host]);
    command
}

#[cfg(windows)]
fn ping_command(host: &str) -> Command {
    let mut command = Command::new("ping");
    command.args(["-n", &PROBE_ECHO_COUNT.to_string(), "-w", "5000", host]);
    command
}

async fn run_icmp_probe(vendor_host: &str) -> Result<bool, IcmpProbeFailure> {
    let mut command = ping_command(vendor_host);
    command.stdout(std::process::Stdio::null()).stderr(std::process::Stdio::null());

    match command.status().await {
        Ok(status) => Ok(status.success()),
        Err(io_error) if io_error.kind() == std::io::ErrorKind::NotFound => {
            Err(IcmpProbeFailure::PingUnavailable)
        }
        Err(_) => Ok(false),
    }
}

async fn run_http_head_fallback(
    http_client: &reqwest::Client,
    base_url: &str,
) -> Result<ProbeMethod, ReachabilityError> {
    match timeout(PROBE_OVERALL_TIMEOUT, http_client.head(base_url).send()).await {
        Ok(Ok(response)) if response.status().is_success() || response.status().is_redirection() => {
            info!("📡 [REACHABILITY]: HTTP HEAD fallback to [{base_url}] succeeded.");
            Ok(ProbeMethod::HttpHeadFallback)
        }
        Ok(Ok(response)) => Err(ReachabilityError::HttpFallbackFailed(format!("HTTP_{}", response.status()))),
        Ok(Err(error)) => Err(ReachabilityError::HttpFallbackFailed(error.to_string())),
        Err(_) => Err(ReachabilityError::TimedOut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn http_head_fallback_succeeds_on_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD")).respond_with(ResponseTemplate::new(200)).mount(&server).await;

        let client = reqwest::Client::new();
        let result = run_http_head_fallback(&client, &server.uri()).await;
        assert!(matches!(result, Ok(ProbeMethod::HttpHeadFallback)));
    }

    #[tokio::test]
    async fn http_head_fallback_reports_server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD")).respond_with(ResponseTemplate::new(503)).mount(&server).await;

        let client = reqwest::Client::new();
        let result = run_http_head_fallback(&client, &server.uri()).await;
        assert!(matches!(result, Err(ReachabilityError::HttpFallbackFailed(_))));
    }
}
// FIN DEL ARCHIVO [libs/infra/reachability/src/lib.rs]
