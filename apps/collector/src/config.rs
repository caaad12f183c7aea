// [apps/collector/src/config.rs]
/*!
 * APARATO: COLLECTOR CONFIGURATION (ESTRATO L4 - APP)
 * RESPONSABILIDAD: ENSAMBLAJE DE LA CONFIGURACION EFECTIVA A PARTIR DE CLI/ENV
 *
 * Las credenciales del vendor solo son obligatorias fuera de `--demo`: en
 * modo sintetico no existe ninguna llamada de red que las necesite.
 */

use crate::cli::CollectorArgs;
use anyhow::{bail, Context, Result};
use sentinel_infra_vendor_client::CredentialSet;
use std::path::PathBuf;
use std::time::Duration;

pub struct CollectorConfig {
    pub demo_mode: bool,
    pub save_to_db: bool,
    pub use_new_tables: bool,
    pub include_cash_info: bool,
    pub total_atms: i32,
    pub continuous: bool,
    pub interval: Duration,
    pub save_json: bool,
    pub output_dir: PathBuf,
    pub registry_path: PathBuf,
    pub max_retries: u32,
    pub vendor_base_url: String,
    pub credentials: Option<CredentialSet>,
    pub database_url: Option<String>,
}

impl CollectorConfig {
    pub fn from_args(args: CollectorArgs) -> Result<Self> {
        let credentials = if args.demo_mode_requires_credentials() {
            let username = args
                .vendor_username
                .clone()
                .context("VENDOR_USERNAME (or --vendor-username) is required outside --demo")?;
            let password = args
                .vendor_password
                .clone()
                .context("VENDOR_PASSWORD (or --vendor-password) is required outside --demo")?;

            Some(match (args.vendor_fallback_username.clone(), args.vendor_fallback_password.clone()) {
                (Some(fallback_user), Some(fallback_pass)) => {
                    CredentialSet::with_fallback((username, password), (fallback_user, fallback_pass))
                }
                _ => CredentialSet::primary_only(username, password),
            })
        } else {
            None
        };

        let database_url = if args.save_to_db {
            if args.db_port.parse::<u16>().is_err() {
                bail!("DB_PORT must be a valid port number, got '{}'", args.db_port);
            }
            Some(format!(
                "postgres://{}:{}@{}:{}/{}",
                args.db_user, args.db_password, args.db_host, args.db_port, args.db_name
            ))
        } else {
            None
        };

        Ok(Self {
            demo_mode: args.demo,
            save_to_db: args.save_to_db,
            use_new_tables: args.use_new_tables,
            include_cash_info: args.include_cash_info,
            total_atms: args.total_atms,
            continuous: args.continuous,
            interval: Duration::from_secs(args.interval),
            save_json: args.save_json,
            output_dir: args.output_dir,
            registry_path: args.registry_path,
            max_retries: args.max_retries,
            vendor_base_url: args.vendor_base_url,
            credentials,
            database_url,
        })
    }
}

impl CollectorArgs {
    fn demo_mode_requires_credentials(&self) -> bool {
        !self.demo
    }
}
