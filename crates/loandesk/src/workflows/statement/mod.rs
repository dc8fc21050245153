//! Offline obligation hydration from a CSV export of identified EMIs, for
//! demo runs and cases analyzed outside the extraction service.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::assessment::domain::ObligationRecord;

#[derive(Debug)]
pub enum ObligationImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ObligationImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObligationImportError::Io(err) => {
                write!(f, "failed to read obligations export: {}", err)
            }
            ObligationImportError::Csv(err) => {
                write!(f, "invalid obligations CSV data: {}", err)
            }
        }
    }
}

impl std::error::Error for ObligationImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObligationImportError::Io(err) => Some(err),
            ObligationImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ObligationImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ObligationImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ObligationCsvImporter;

impl ObligationCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<ObligationRecord>, ObligationImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<ObligationRecord>, ObligationImportError> {
        Ok(parser::parse_records(reader)?)
    }
}
