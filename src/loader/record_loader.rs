use crate::loader::error::LoadError;
use crate::types::raw_record::RawRecord;
use async_compression::tokio::bufread::GzipDecoder;
use log::{debug, info};
use polars::frame::DataFrame;
use polars::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, BufReader};
use tokio::{fs, task};

/// Columns the loader refuses to run without. Anything else in the input is
/// carried along by polars and ignored here.
const REQUIRED_COLUMNS: [&str; 11] = [
    "BGN_DATE",
    "BGN_TIME",
    "TIME_ZONE",
    "EVTYPE",
    "FATALITIES",
    "INJURIES",
    "PROPDMG",
    "PROPDMGEXP",
    "CROPDMG",
    "CROPDMGEXP",
    "REFNUM",
];

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Parses the raw storm event log into typed records.
///
/// The loader is the single I/O-bound step of the pipeline and the only place
/// a run can fail atomically: a missing required column or an empty stream
/// rejects the whole input. Malformed individual cells degrade per field
/// (`None`/zero on the record) and never abort the load.
pub struct RecordLoader;

impl RecordLoader {
    /// Loads records from a delimited text file, transparently decompressing
    /// gzip input.
    pub async fn load_path(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| LoadError::InputRead(path.to_path_buf(), e))?;
        Self::load_bytes(bytes).await
    }

    /// Loads records from an in-memory byte stream (plain or gzip-compressed
    /// CSV).
    pub async fn load_bytes(bytes: Vec<u8>) -> Result<Vec<RawRecord>, LoadError> {
        let bytes = if bytes.starts_with(&GZIP_MAGIC) {
            let mut decoder = GzipDecoder::new(BufReader::new(bytes.as_slice()));
            let mut decompressed = Vec::new();
            decoder
                .read_to_end(&mut decompressed)
                .await
                .map_err(LoadError::Decompress)?;
            debug!("Decompressed gzip input to {} bytes", decompressed.len());
            decompressed
        } else {
            bytes
        };

        let records = task::spawn_blocking(move || {
            let df = Self::csv_to_dataframe(bytes)?;
            Self::extract_records(&df)
        })
        .await??;
        info!("Loaded {} raw records", records.len());
        Ok(records)
    }

    /// Parses raw CSV bytes into a DataFrame via a temp file.
    ///
    /// Schema inference stays off: every column arrives as a string and each
    /// field is decoded per record, so a malformed cell degrades that field
    /// rather than the whole file.
    fn csv_to_dataframe(bytes: Vec<u8>) -> Result<DataFrame, LoadError> {
        let mut temp_file = NamedTempFile::new().map_err(LoadError::CsvStageIo)?;
        temp_file.write_all(&bytes).map_err(LoadError::CsvStageIo)?;
        temp_file.flush().map_err(LoadError::CsvStageIo)?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))
            .map_err(LoadError::CsvParse)?
            .finish()
            .map_err(LoadError::CsvParse)?;

        if df.height() == 0 {
            return Err(LoadError::EmptyInput);
        }
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoadError::MissingColumn(name));
            }
        }
        Ok(df)
    }

    fn extract_records(df: &DataFrame) -> Result<Vec<RawRecord>, LoadError> {
        macro_rules! get_column {
            ($name:expr) => {
                df.column($name).map_err(|_| LoadError::MissingColumn($name))?
            };
        }

        let refnums = get_column!("REFNUM");
        let dates = get_column!("BGN_DATE");
        let times = get_column!("BGN_TIME");
        let zones = get_column!("TIME_ZONE");
        let labels = get_column!("EVTYPE");
        let property = get_column!("PROPDMG");
        let property_exp = get_column!("PROPDMGEXP");
        let crop = get_column!("CROPDMG");
        let crop_exp = get_column!("CROPDMGEXP");
        let injuries = get_column!("INJURIES");
        let fatalities = get_column!("FATALITIES");

        let mut records = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            records.push(RawRecord {
                refnum: get_opt_num(refnums, idx).map(|v| v as i64),
                begin_date: get_str(dates, idx),
                begin_time: get_str(times, idx),
                timezone: get_str(zones, idx),
                event_type: get_str(labels, idx),
                property_damage: get_opt_num(property, idx),
                property_damage_exp: get_str(property_exp, idx),
                crop_damage: get_opt_num(crop, idx),
                crop_damage_exp: get_str(crop_exp, idx),
                injuries: get_count(injuries, idx),
                fatalities: get_count(fatalities, idx),
            });
        }
        Ok(records)
    }
}

fn get_opt_str(column: &Column, idx: usize) -> Option<&str> {
    column.str().ok().and_then(|ca| ca.get(idx))
}

fn get_str(column: &Column, idx: usize) -> String {
    get_opt_str(column, idx).unwrap_or_default().to_string()
}

fn get_opt_num(column: &Column, idx: usize) -> Option<f64> {
    get_opt_str(column, idx).and_then(|s| s.trim().parse::<f64>().ok())
}

fn get_count(column: &Column, idx: usize) -> u32 {
    // Casualty counts arrive as "0.0"-style floats in some vintages of the log.
    get_opt_num(column, idx).map(|v| v.max(0.0) as u32).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::GzipEncoder;

    const HEADER: &str =
        "REFNUM,BGN_DATE,BGN_TIME,TIME_ZONE,EVTYPE,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP,INJURIES,FATALITIES";

    fn sample_csv() -> String {
        format!(
            "{HEADER}\n\
             1,4/18/1950 0:00:00,0130,CST,TORNADO,25.0,K,0,,15,0\n\
             2,6/9/1972 0:00:00,1800,MST,FLASH FLOOD,1,B,50,M,0,5\n"
        )
    }

    #[tokio::test]
    async fn loads_plain_csv() -> Result<(), LoadError> {
        let records = RecordLoader::load_bytes(sample_csv().into_bytes()).await?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].refnum, Some(1));
        assert_eq!(records[0].event_type, "TORNADO");
        assert_eq!(records[0].property_damage, Some(25.0));
        assert_eq!(records[0].property_damage_exp, "K");
        assert_eq!(records[0].crop_damage_exp, "");
        assert_eq!(records[0].injuries, 15);
        assert_eq!(records[1].fatalities, 5);
        assert_eq!(records[1].timezone, "MST");
        Ok(())
    }

    #[tokio::test]
    async fn loads_gzip_csv() -> Result<(), LoadError> {
        let mut encoder = GzipEncoder::new(BufReader::new(std::io::Cursor::new(sample_csv().into_bytes())));
        let mut compressed = Vec::new();
        encoder
            .read_to_end(&mut compressed)
            .await
            .map_err(LoadError::Decompress)?;
        assert!(compressed.starts_with(&GZIP_MAGIC));

        let records = RecordLoader::load_bytes(compressed).await?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].event_type, "FLASH FLOOD");
        Ok(())
    }

    #[tokio::test]
    async fn rejects_missing_required_column() {
        let csv = "REFNUM,BGN_DATE\n1,4/18/1950\n";
        let result = RecordLoader::load_bytes(csv.as_bytes().to_vec()).await;
        assert!(matches!(result, Err(LoadError::MissingColumn(_))));
    }

    #[tokio::test]
    async fn rejects_empty_input() {
        let result = RecordLoader::load_bytes(format!("{HEADER}\n").into_bytes()).await;
        assert!(matches!(
            result,
            Err(LoadError::EmptyInput) | Err(LoadError::CsvParse(_))
        ));
    }

    #[tokio::test]
    async fn malformed_cells_degrade_per_field() -> Result<(), LoadError> {
        let csv = format!("{HEADER}\n3,not a date,??,XYZ,HAIL,oops,K,2,?,n/a,1\n");
        let records = RecordLoader::load_bytes(csv.into_bytes()).await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].property_damage, None);
        assert_eq!(records[0].crop_damage, Some(2.0));
        assert_eq!(records[0].injuries, 0);
        assert_eq!(records[0].fatalities, 1);
        Ok(())
    }
}
