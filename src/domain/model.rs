use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 一行名單拆出來的名字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub first_name: String,
    pub last_name: String,
}

impl NameEntry {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "LinkedIn Member" 是匯出名單時的佔位名字，不應查詢
    pub fn is_placeholder(&self) -> bool {
        self.first_name.eq_ignore_ascii_case("linkedin")
            && self.last_name.eq_ignore_ascii_case("member")
    }
}

/// 一次查詢的結果，email 與 title 都可能是空字串
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupMatch {
    pub email: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
    pub email: String,
    pub domain: String,
    pub title: String,
}

pub const OUTPUT_HEADERS: [&str; 6] = [
    "FirstName",
    "LastName",
    "Organization",
    "Email",
    "Domain",
    "Title",
];

impl PersonRecord {
    pub fn new(entry: NameEntry, organization: &str, found: LookupMatch) -> Self {
        let domain = email_domain(&found.email).to_string();
        Self {
            first_name: entry.first_name,
            last_name: entry.last_name,
            organization: organization.to_string(),
            email: found.email,
            domain,
            title: found.title,
        }
    }

    /// Cells in the same order as [`OUTPUT_HEADERS`].
    pub fn row(&self) -> [&str; 6] {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.organization.as_str(),
            self.email.as_str(),
            self.domain.as_str(),
            self.title.as_str(),
        ]
    }
}

/// `jane@acme.com` -> `acme.com`; empty when there is no `@`.
pub fn email_domain(email: &str) -> &str {
    email.split('@').nth(1).unwrap_or("")
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub lines_read: usize,
    pub lookups_attempted: usize,
    pub lines_skipped: usize,
    pub lookup_failures: usize,
    pub filtered_out: usize,
    pub records: Vec<PersonRecord>,
    pub output_path: Option<String>,
}

impl RunSummary {
    pub fn new(lines_read: usize) -> Self {
        Self {
            started_at: Local::now(),
            finished_at: None,
            lines_read,
            lookups_attempted: 0,
            lines_skipped: 0,
            lookup_failures: 0,
            filtered_out: 0,
            records: Vec::new(),
            output_path: None,
        }
    }
}
