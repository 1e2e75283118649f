use crate::domain::model::{Dataset, EnrichedBankRecord, COLUMNS};
use crate::utils::error::{EtlError, Result};

/// Serializes the dataset with a `Name,MC_USD_Billion,...` header and no index column.
pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    // 空資料集也要輸出標頭
    if dataset.is_empty() {
        writer.write_record(COLUMNS)?;
    }
    for record in dataset.iter() {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

pub fn read_csv(data: &[u8]) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(data);
    reader
        .deserialize::<EnrichedBankRecord>()
        .map(|row| row.map_err(EtlError::from))
        .collect()
}
