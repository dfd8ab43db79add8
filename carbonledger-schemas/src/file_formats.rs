use crate::factors::FactorTables;
use serde::{Deserialize, Serialize};

/// On-disk wrapper for a factor table override.
#[derive(Debug, Serialize, Deserialize)]
pub struct FactorFile {
    pub schema_version: String,
    pub factors: FactorTables,
}
