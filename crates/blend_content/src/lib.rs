//! Catalog content loading shared between blend_cli and blend_daemon.

use anyhow::{Context, Result};
use blend_core::{Catalog, CatalogConstants, ContainerDef, WickBracket};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct ConstantsFile {
    content_version: String,
    #[serde(flatten)]
    constants: CatalogConstants,
}

#[derive(Deserialize)]
struct ContainersFile {
    containers: Vec<ContainerDef>,
}

#[derive(Deserialize)]
struct WicksFile {
    brackets: Vec<WickBracket>,
}

fn read_json<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<T> {
    let raw = std::fs::read_to_string(dir.join(file_name))
        .with_context(|| format!("reading {file_name}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {file_name}"))
}

/// Loads `constants.json`, `containers.json` and `wicks.json` from
/// `content_dir` and validates them into a [`Catalog`].
pub fn load_catalog(content_dir: impl AsRef<Path>) -> Result<Catalog> {
    let dir = content_dir.as_ref();
    let constants_file: ConstantsFile = read_json(dir, "constants.json")?;
    let containers_file: ContainersFile = read_json(dir, "containers.json")?;
    let wicks_file: WicksFile = read_json(dir, "wicks.json")?;
    Catalog::new(
        constants_file.content_version,
        constants_file.constants,
        containers_file.containers,
        wicks_file.brackets,
    )
    .with_context(|| format!("validating catalog content in {}", dir.display()))
}

/// The catalog in `content_dir` when one is given, else the built-in table.
pub fn resolve_catalog(content_dir: Option<&Path>) -> Result<Catalog> {
    match content_dir {
        Some(dir) => load_catalog(dir),
        None => Ok(Catalog::builtin().clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CONSTANTS: &str = r#"{
        "content_version": "test",
        "wax_density_g_per_ml": 0.86,
        "ml_per_fl_oz": 29.5735,
        "default_fragrance_load_percent": 10.0,
        "bias_step_percent": 5,
        "min_proportion_percent": 1
    }"#;
    const CONTAINERS: &str = r#"{"containers": [
        {"id": "x-1", "name": "4oz jar", "capacity_oz": 4.0, "material": "glass"}
    ]}"#;
    const WICKS: &str = r#"{"brackets": [{"max_capacity_oz": 8.0, "wick": "ECO 6"}]}"#;

    fn write_content(constants: &str, containers: &str, wicks: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("constants.json"), constants).unwrap();
        fs::write(dir.path().join("containers.json"), containers).unwrap();
        fs::write(dir.path().join("wicks.json"), wicks).unwrap();
        dir
    }

    #[test]
    fn test_minimal_content_loads() {
        let dir = write_content(CONSTANTS, CONTAINERS, WICKS);
        let catalog = load_catalog(dir.path()).unwrap();
        assert_eq!(catalog.content_version(), "test");
        assert_eq!(catalog.containers().len(), 1);
        assert_eq!(catalog.wick_for_capacity(4.0), "ECO 6");
    }

    #[test]
    fn test_missing_file_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("constants.json"), CONSTANTS).unwrap();
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(
            format!("{err:#}").contains("containers.json"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let dir = write_content(CONSTANTS, "{ not json", WICKS);
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing containers.json"));
    }

    #[test]
    fn test_invalid_content_rejected() {
        let duplicate = r#"{"containers": [
            {"id": "x-1", "name": "a", "capacity_oz": 4.0, "material": "glass"},
            {"id": "x-1", "name": "b", "capacity_oz": 8.0, "material": "tin"}
        ]}"#;
        let dir = write_content(CONSTANTS, duplicate, WICKS);
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(
            format!("{err:#}").contains("defined more than once"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn test_no_content_dir_uses_builtin() {
        let catalog = resolve_catalog(None).unwrap();
        assert_eq!(&catalog, Catalog::builtin());
    }
}
