// INICIO DEL ARCHIVO [libs/infra/registry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TERMINAL REGISTRY (V1.0 - SOBERANO)
 * CLASIFICACION: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: CONJUNTO DURABLE Y MONOTONO DE TERMINALES CONOCIDOS
 *
 * VISION HIPER-HOLISTICA:
 * El registro es el unico estado mutable compartido entre ciclos que
 * vive en disco. Se escribe con el patron escribir-temporal
 * y-renombrar para que un corte de energia a mitad de escritura jamas
 * deje el archivo en un estado corrupto o parcial.
 * =================================================================
 */

pub mod errors;
pub mod seed;

pub use errors::RegistryError;

use sentinel_domain_models::RegistryEntry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Conjunto durable de todo terminal jamas observado por el colector.
///
/// Invariante de monotonia: despues de
/// cualquier ciclo exitoso, `registry.after` es un superconjunto de
/// `registry.before`. Ninguna operacion publica de este tipo elimina una
/// entrada.
#[derive(Debug, Clone)]
pub struct TerminalRegistry {
    entries: BTreeMap<String, RegistryEntry>,
    storage_path: PathBuf,
}

impl TerminalRegistry {
    /// Carga el registro desde disco si el archivo existe; si no, lo crea a
    /// partir de la lista semilla de catorce terminales y lo persiste de
    /// inmediato.
    #[instrument(skip_all, fields(path = %storage_path.display()))]
    pub async fn load_or_seed(storage_path: &Path) -> Result<Self, RegistryError> {
        if tokio::fs::try_exists(storage_path).await.unwrap_or(false) {
            let raw = tokio::fs::read_to_string(storage_path)
                .await
                .map_err(RegistryError::Io)?;
            let entries: Vec<RegistryEntry> =
                serde_json::from_str(&raw).map_err(RegistryError::Decode)?;
            info!("📒 [REGISTRY]: Loaded {} known terminals from disk.", entries.len());
            Ok(Self {
                entries: entries.into_iter().map(|e| (e.terminal_id.clone(), e)).collect(),
                storage_path: storage_path.to_path_buf(),
            })
        } else {
            let now = sentinel_core_clock::dili_now();
            let seeded = seed::seed_entries(now);
            info!("🌱 [REGISTRY]: No registry file found, seeding {} known terminals.", seeded.len());
            let registry = Self {
                entries: seeded.into_iter().map(|e| (e.terminal_id.clone(), e)).collect(),
                storage_path: storage_path.to_path_buf(),
            };
            registry.persist().await?;
            Ok(registry)
        }
    }

    pub fn contains(&self, terminal_id: &str) -> bool {
        self.entries.contains_key(terminal_id)
    }

    pub fn get(&self, terminal_id: &str) -> Option<&RegistryEntry> {
        self.entries.get(terminal_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Todas las entradas conocidas, en orden estable de `terminal_id`. Usado
    /// por el sintetizador de failover para cubrir la flota completa.
    pub fn all(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    /// Registra una observacion de terminal. Si el ID ya era conocido no hace
    /// nada y retorna `false`; si es nuevo, lo agrega con la ubicacion dada y
    /// retorna `true`. No persiste por si sola -- el llamador decide cuando
    /// escribir a disco (una vez por ciclo, solo si algo cambio).
    pub fn observe(&mut self, terminal_id: &str, location: &str) -> bool {
        if self.entries.contains_key(terminal_id) {
            return false;
        }
        self.entries.insert(
            terminal_id.to_string(),
            RegistryEntry {
                terminal_id: terminal_id.to_string(),
                location: location.to_string(),
                discovery_timestamp: sentinel_core_clock::dili_now(),
            },
        );
        true
    }

    /// Persiste el registro completo con el patron escribir-temporal-y-renombrar.
    #[instrument(skip(self), fields(path = %self.storage_path.display(), count = self.entries.len()))]
    pub async fn persist(&self) -> Result<(), RegistryError> {
        let values: Vec<&RegistryEntry> = self.entries.values().collect();
        let serialized = serde_json::to_string_pretty(&values).map_err(RegistryError::Decode)?;

        let parent = self
            .storage_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !tokio::fs::try_exists(parent).await.unwrap_or(false) {
            tokio::fs::create_dir_all(parent).await.map_err(RegistryError::Io)?;
        }

        let temp_path = self.storage_path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, serialized.as_bytes())
            .await
            .map_err(RegistryError::Io)?;
        tokio::fs::rename(&temp_path, &self.storage_path)
            .await
            .map_err(RegistryError::Io)?;

        info!("💾 [REGISTRY]: Persisted {} terminals to [{}].", self.entries.len(), self.storage_path.display());
        Ok(())
    }
}

impl Drop for TerminalRegistry {
    fn drop(&mut self) {
        if self.entries.is_empty() {
            warn!("⚠️ [REGISTRY]: Registry dropped with zero known terminals.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_or_seed_creates_fourteen_entries_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");

        let registry = TerminalRegistry::load_or_seed(&path).await.unwrap();
        assert_eq!(registry.len(), 14);
        assert!(tokio::fs::try_exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn load_or_seed_reloads_prior_state_on_second_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");

        let mut first = TerminalRegistry::load_or_seed(&path).await.unwrap();
        first.observe("9999", "New Branch Annex");
        first.persist().await.unwrap();

        let second = TerminalRegistry::load_or_seed(&path).await.unwrap();
        assert_eq!(second.len(), 15);
        assert!(second.contains("9999"));
    }

    #[tokio::test]
    async fn observe_is_monotone_and_idempotent_for_known_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let mut registry = TerminalRegistry::load_or_seed(&path).await.unwrap();

        let before = registry.len();
        assert!(!registry.observe("83", "Some Other Location"));
        assert_eq!(registry.len(), before);

        assert!(registry.observe("9999", "Comoro Annex"));
        assert_eq!(registry.len(), before + 1);
        assert!(!registry.observe("9999", "Comoro Annex"));
        assert_eq!(registry.len(), before + 1);
    }

    #[tokio::test]
    async fn persist_survives_a_simulated_crash_mid_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let registry = TerminalRegistry::load_or_seed(&path).await.unwrap();

        // Simulate a stale temp file left behind by a crashed prior write.
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, b"{corrupt").await.unwrap();

        registry.persist().await.unwrap();
        let reloaded = TerminalRegistry::load_or_seed(&path).await.unwrap();
        assert_eq!(reloaded.len(), 14);
    }
}
// FIN DEL ARCHIVO [libs/infra/registry/src/lib.rs]
