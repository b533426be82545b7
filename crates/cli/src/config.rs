use anyhow::Context;
use efx_emissions::{EmissionConstants, IndexSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;


#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub constants: EmissionConstants,
    #[serde(default)]
    pub indexing: IndexSettings
}


impl Config {
    pub fn read(file: &Path) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_reader(
            std::io::BufReader::new(std::fs::File::open(file)?)
        )?;
        config.validate().context("invalid config")?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.constants.validate().context("invalid emission constants")?;
        self.indexing.validate().context("invalid indexing settings")?;
        Ok(())
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_partial_config() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{
            "constants": {{ "emissionsPerKwh": 400 }},
            "indexing": {{ "lookupConcurrency": 2, "genesisFloor": 1438269988 }}
        }}"#)?;

        let config = Config::read(file.path())?;

        assert_eq!(config.constants.emissions_per_kwh, 400.0);
        assert_eq!(config.constants.hash_efficiency, 0.4);
        assert_eq!(config.indexing.lookup_concurrency, 2);
        assert_eq!(config.indexing.genesis_floor, 1438269988);
        Ok(())
    }

    #[test]
    fn invalid_config_is_rejected() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{ "indexing": {{ "lookupConcurrency": 0 }} }}"#)?;
        assert!(Config::read(file.path()).is_err());
        Ok(())
    }
}
