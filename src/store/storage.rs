use super::types::{ValuationStore, STORE_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default store file path (~/.config/startup-valuator/valuations.json)
pub fn get_store_path() -> PathBuf {
    crate::config::get_config_dir().join("valuations.json")
}

/// Load saved valuations from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_store(path: &Path) -> Result<ValuationStore> {
    if !path.exists() {
        return Ok(ValuationStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open valuation store at {}", path.display()))?;

    let store: ValuationStore =
        serde_json::from_reader(file).context("Failed to load valuation store")?;

    if store.version != STORE_VERSION {
        anyhow::bail!("Unsupported valuation store version: {}", store.version);
    }

    tracing::debug!(path = %path.display(), count = store.valuations.len(), "loaded valuation store");
    Ok(store)
}

/// Save valuations to a JSON file atomically
///
/// The parent directory is created if needed.
pub fn save_store(path: &Path, store: &ValuationStore) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create store directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize valuation store")?;

    file.commit().context("Failed to save valuation store")?;

    tracing::debug!(path = %path.display(), count = store.valuations.len(), "saved valuation store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Industry, Stage};
    use crate::store::types::tests::sample_result;
    use crate::valuation::methods::tests::sample_input;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("startup_valuator_test_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let store = load_store(&temp_path).unwrap();
        assert_eq!(store.version, 1);
        assert!(store.valuations.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir()
            .join("startup_valuator_test_dir")
            .join("roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut store = ValuationStore::new();
        let result = sample_result("alice", 1_500_000.0, 0);
        let id = result.id;
        store.save(result.clone(), sample_input(Stage::PreRevenue, Industry::Saas));

        save_store(&temp_path, &store).unwrap();
        let loaded = load_store(&temp_path).unwrap();

        assert_eq!(loaded.valuations.len(), 1);
        let stored = loaded.get_by_id(id, "alice").unwrap();
        assert_eq!(stored.result.company_name, result.company_name);
        assert_eq!(stored.result.estimated_valuation, result.estimated_valuation);
        assert_eq!(stored.result.created_at, result.created_at);
        assert_eq!(stored.result.primary_method, result.primary_method);
        assert_eq!(stored.input.industry, Industry::Saas);
        assert_eq!(stored.input.stage, Stage::PreRevenue);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let temp_path = env::temp_dir().join("startup_valuator_test_version.json");
        std::fs::write(&temp_path, r#"{"version": 7, "valuations": []}"#).unwrap();

        let err = load_store(&temp_path).unwrap_err();
        assert!(err.to_string().contains("version"));

        let _ = std::fs::remove_file(&temp_path);
    }
}
