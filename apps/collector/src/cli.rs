// [apps/collector/src/cli.rs]
/*!
 * APARATO: CLI DIRECTIVES (ESTRATO L4 - APP)
 * RESPONSABILIDAD: SUPERFICIE DE LINEA DE COMANDOS DEL COLECTOR
 */

use clap::Parser;
use std::path::PathBuf;

/// Colector de telemetria de la flota de ATM de Timor-Leste.
#[derive(Parser, Debug)]
#[command(name = "collector", about = "Colector de telemetria ATM contra la API SIGIT del proveedor")]
pub struct CollectorArgs {
    /// Genera datos sinteticos en vez de llamar al vendor; no toca red ni base de datos.
    #[arg(long)]
    pub demo: bool,

    /// Persiste cada ciclo en PostgreSQL.
    #[arg(long)]
    pub save_to_db: bool,

    /// Selecciona las tablas JSONB en vez de las tablas de conteo heredadas.
    #[arg(long)]
    pub use_new_tables: bool,

    /// Habilita P6 (posicion de efectivo por terminal).
    #[arg(long)]
    pub include_cash_info: bool,

    /// Tamano de la flota para la aritmetica de porcentajes.
    #[arg(long, default_value_t = 14)]
    pub total_atms: i32,

    /// Habilita el modo planificador: corre en bucle hasta recibir una senal.
    #[arg(long)]
    pub continuous: bool,

    /// Segundos entre el inicio de un ciclo y el siguiente en modo continuo.
    #[arg(long, default_value_t = 900)]
    pub interval: u64,

    /// Ademas de cualquier otra salida, escribe un volcado JSON por ciclo.
    #[arg(long)]
    pub save_json: bool,

    /// Directorio destino para los volcados de `--save-json`.
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Ruta del archivo del Terminal Registry.
    #[arg(long, env = "TERMINAL_REGISTRY_PATH", default_value = "terminal_registry.json")]
    pub registry_path: PathBuf,

    /// Maximo de reintentos por llamada a la API del vendor.
    #[arg(long, default_value_t = 2)]
    pub max_retries: u32,

    /// URL base del host del proveedor (TLS autofirmado).
    #[arg(long, env = "VENDOR_BASE_URL", default_value = "https://172.31.1.46")]
    pub vendor_base_url: String,

    /// Usuario primario de la API SIGIT.
    #[arg(long, env = "VENDOR_USERNAME")]
    pub vendor_username: Option<String>,

    /// Contrasena del usuario primario.
    #[arg(long, env = "VENDOR_PASSWORD")]
    pub vendor_password: Option<String>,

    /// Usuario de respaldo, probado solo si el primario es rechazado.
    #[arg(long, env = "VENDOR_FALLBACK_USERNAME")]
    pub vendor_fallback_username: Option<String>,

    /// Contrasena del usuario de respaldo.
    #[arg(long, env = "VENDOR_FALLBACK_PASSWORD")]
    pub vendor_fallback_password: Option<String>,

    /// Host de la base de datos PostgreSQL.
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Puerto de la base de datos.
    #[arg(long, env = "DB_PORT", default_value = "5432")]
    pub db_port: String,

    /// Nombre de la base de datos.
    #[arg(long, env = "DB_NAME", default_value = "atm_monitor")]
    pub db_name: String,

    /// Usuario de la base de datos.
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Contrasena de la base de datos.
    #[arg(long, env = "DB_PASSWORD", default_value = "")]
    pub db_password: String,
}
