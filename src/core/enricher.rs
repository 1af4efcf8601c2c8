use crate::adapters::sink::ResultSink;
use crate::domain::credentials::CredentialPool;
use crate::domain::model::{PersonRecord, RunSummary};
use crate::domain::names::{parse_line, ParsedLine};
use crate::domain::ports::{PersonLookup, Storage};
use crate::utils::error::Result;
use chrono::Local;

pub struct Enricher<L: PersonLookup, S: Storage> {
    lookup: L,
    sink: Option<ResultSink<S>>,
    organization: String,
    require_email: bool,
}

impl<L: PersonLookup, S: Storage> Enricher<L, S> {
    pub fn new(lookup: L, organization: impl Into<String>, require_email: bool) -> Self {
        Self {
            lookup,
            sink: None,
            organization: organization.into(),
            require_email,
        }
    }

    pub fn with_sink(mut self, sink: ResultSink<S>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// 依序處理每一行名單。
    ///
    /// 遇到 rate limit 或 key 用完時，先把已累積的結果寫出再回傳錯誤；
    /// 若連寫出都失敗，回傳寫檔錯誤。
    pub async fn run(&self, pool: &mut CredentialPool, lines: &[String]) -> Result<RunSummary> {
        let mut summary = RunSummary::new(lines.len());

        for line in lines {
            let entry = match parse_line(line) {
                ParsedLine::Entry(entry) => entry,
                ParsedLine::Placeholder => {
                    tracing::debug!("Skipping placeholder name \"{}\"", line.trim());
                    summary.lines_skipped += 1;
                    continue;
                }
                ParsedLine::Malformed => {
                    tracing::warn!(
                        "Name \"{}\" cannot be used, it must have a first name and a last name.",
                        line
                    );
                    summary.lines_skipped += 1;
                    continue;
                }
            };

            summary.lookups_attempted += 1;
            let found = match self.lookup.lookup(pool, &entry, &self.organization).await {
                Ok(found) => found,
                Err(e) if e.is_run_terminating() => {
                    tracing::error!("❌ {}", e.user_friendly_message());
                    if let Err(flush_err) = self.flush_partial(&mut summary).await {
                        tracing::error!("❌ Failed to save partial results: {}", flush_err);
                        return Err(flush_err);
                    }
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to get a response for {} {}: {}",
                        entry.first_name,
                        entry.last_name,
                        e
                    );
                    summary.lookup_failures += 1;
                    continue;
                }
            };

            if self.require_email && found.email.is_empty() {
                tracing::debug!(
                    "No email for {} {}, dropped",
                    entry.first_name,
                    entry.last_name
                );
                summary.filtered_out += 1;
                continue;
            }

            let record = PersonRecord::new(entry, &self.organization, found);
            tracing::info!("{} {} {}", record.first_name, record.last_name, record.email);
            summary.records.push(record);
        }

        if let Some(sink) = &self.sink {
            summary.output_path = Some(sink.flush(&summary.records).await?);
        }
        summary.finished_at = Some(Local::now());
        Ok(summary)
    }

    async fn flush_partial(&self, summary: &mut RunSummary) -> Result<()> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };

        let path = sink.flush(&summary.records).await?;
        tracing::info!(
            "💾 Saved {} records collected before stopping to {}",
            summary.records.len(),
            path
        );
        summary.output_path = Some(path);
        Ok(())
    }
}
