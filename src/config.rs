use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::data::loader::DataStore;
use crate::data::model::Dataset;
use crate::error::LoadError;

/// Default sheet name, looked up relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "Model_CSV1.csv";

/// Data source options shared by the dashboard and `pdi-report`.
#[derive(Debug, Clone, Args)]
pub struct DataArgs {
    /// Weather/severity CSV to load.
    #[arg(long, env = "SOY_PDI_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Variety columns that must be present; loading fails otherwise.
    #[arg(long = "require-variety", value_delimiter = ',')]
    pub required_varieties: Vec<String>,
}

impl DataArgs {
    pub fn store(&self) -> DataStore {
        DataStore::new(&self.data)
    }

    /// Load through `store` and check the required varieties.
    pub fn load(&self, store: &DataStore) -> Result<Arc<Dataset>, LoadError> {
        let ds = store.load()?;
        ds.require_varieties(self.required_varieties.as_slice())?;
        Ok(ds)
    }
}
