use crate::domain::model::NameEntry;
use crate::utils::error::{ApollonatorError, Result};
use std::path::Path;

/// 一行名單的解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Entry(NameEntry),
    Placeholder,
    Malformed,
}

/// 讀取名單檔，原樣回傳每一行；過濾交給呼叫端
pub fn read_name_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).map_err(|source| ApollonatorError::NamesFileError {
            path: path.display().to_string(),
            source,
        })?;

    Ok(content.lines().map(str::to_string).collect())
}

/// `Jane Q Doe` -> first `Jane Q`, last `Doe`.
///
/// 只用空白切字，最後一個字是姓；少於兩個字視為無效。
pub fn parse_line(line: &str) -> ParsedLine {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((last, first)) = tokens.split_last() else {
        return ParsedLine::Malformed;
    };
    if first.is_empty() {
        return ParsedLine::Malformed;
    }

    let entry = NameEntry::new(first.join(" "), *last);
    if entry.is_placeholder() {
        ParsedLine::Placeholder
    } else {
        ParsedLine::Entry(entry)
    }
}
