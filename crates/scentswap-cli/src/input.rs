//! # Input Loading
//!
//! Shared helpers for reading JSON/YAML files into typed values. Format is
//! chosen by extension: `.yaml`/`.yml` parse as YAML, everything else as
//! JSON.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

use scentswap_value::ValuationConfig;

/// Load a typed value from a JSON or YAML file.
pub fn load<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        serde_yaml::from_str(&raw).with_context(|| format!("parsing {} as YAML", path.display()))
    } else {
        serde_json::from_str(&raw).with_context(|| format!("parsing {} as JSON", path.display()))
    }
}

/// Load a valuation config, or the documented defaults when no path is
/// given.
pub fn load_valuation_config(path: Option<&Path>) -> anyhow::Result<ValuationConfig> {
    match path {
        Some(path) => load(path),
        None => Ok(ValuationConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use scentswap_core::Item;

    #[test]
    fn test_loads_json_by_default() {
        let item = Item::new("Chanel", 100, 80, scentswap_core::Condition::Good).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&item).unwrap()).unwrap();

        let loaded: Item = load(file.path()).unwrap();
        assert_eq!(loaded, item);
    }

    #[test]
    fn test_loads_yaml_by_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        write!(file, "tier_rates:\n  budget: 90\n  designer: 260\n  niche: 410\n  luxury: 610\n")
            .unwrap();

        let cfg: ValuationConfig = load(file.path()).unwrap();
        assert_eq!(cfg.tier_rates.budget.cents(), 90);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = load::<Item>(Path::new("/nonexistent/item.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/item.json"));
    }

    #[test]
    fn test_default_config_when_no_path() {
        let cfg = load_valuation_config(None).unwrap();
        assert_eq!(cfg, ValuationConfig::default());
    }
}
