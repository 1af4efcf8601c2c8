use crate::config::OutputFormat;
use crate::domain::model::{PersonRecord, OUTPUT_HEADERS};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use rust_xlsxwriter::{Format, Workbook};

pub const SHEET_NAME: &str = "Employee Info";

/// 只保留 `[A-Za-z0-9_]` 並轉小寫，例如 `O'Reilly & Sons` -> `oreillysons`
pub fn sanitize_organization(organization: &str) -> String {
    organization
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

pub fn default_file_name(organization: &str, format: OutputFormat) -> String {
    format!(
        "apollonator_{}.{}",
        sanitize_organization(organization),
        format.extension()
    )
}

pub fn encode_xlsx(records: &[PersonRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in OUTPUT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, value) in record.row().iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn encode_csv(records: &[PersonRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(OUTPUT_HEADERS)?;
    for record in records {
        writer.write_record(record.row())?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| e.into_error().into())
}

/// 把結果寫成試算表（或 CSV），交給 Storage 落地
pub struct ResultSink<S: Storage> {
    storage: S,
    file_name: String,
    format: OutputFormat,
}

impl<S: Storage> ResultSink<S> {
    /// `file_name` 為 None 時依組織名稱產生檔名
    pub fn new(storage: S, file_name: Option<String>, organization: &str, format: OutputFormat) -> Self {
        let file_name = file_name.unwrap_or_else(|| default_file_name(organization, format));
        Self {
            storage,
            file_name,
            format,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub async fn flush(&self, records: &[PersonRecord]) -> Result<String> {
        let data = match self.format {
            OutputFormat::Xlsx => encode_xlsx(records)?,
            OutputFormat::Csv => encode_csv(records)?,
        };

        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            records.len(),
            data.len(),
            self.file_name
        );
        self.storage.write_file(&self.file_name, &data).await
    }
}
