use std::fs;
use std::path::Path;

use derive_traits::BalanceParameters;
use log::debug;
use serde_yaml::Value;

use crate::error::BalanceError;
use crate::error::Result;

/// The contents of a YAML parameter file. Each top-level key is a
/// section that is read into one parameter struct.
#[derive(Debug, Default)]
pub struct ParameterFileContents(Value);

impl ParameterFileContents {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| {
            BalanceError::ReadParameterFile {
                path: path.to_owned(),
                source,
            }
        })?;
        Self::from_str(&contents)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value =
            serde_yaml::from_str(contents).map_err(BalanceError::ParseParameterFile)?;
        Ok(Self(value))
    }

    pub fn get_section_names(&self) -> Vec<String> {
        self.0
            .as_mapping()
            .map(|mapping| {
                mapping
                    .keys()
                    .filter_map(|key| key.as_str().map(|key| key.to_owned()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reads the section belonging to `T`. A missing section
    /// results in the defaults of `T`.
    pub fn get<T: BalanceParameters>(&self) -> Result<T> {
        let name = T::section_name();
        match self.0.get(name) {
            Some(section) => serde_yaml::from_value(section.clone()).map_err(|source| {
                BalanceError::ParseParameterSection {
                    section: name,
                    source,
                }
            }),
            None => {
                debug!("Parameter section missing for '{}', assuming defaults", name);
                Ok(T::default())
            }
        }
    }
}
