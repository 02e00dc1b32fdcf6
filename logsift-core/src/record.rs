use serde::Serialize;
use thiserror::Error;

/// Column order of a record line.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "client_address",
    "timestamp",
    "resource_path",
    "status_code",
    "client_agent",
];

pub const FIELD_COUNT: usize = 5;

/// Index of `status_code` in [`FIELD_NAMES`].
pub const STATUS_FIELD: usize = 3;

/// One access log entry. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    client_address: String,
    timestamp: String,
    resource_path: String,
    status_code: i64,
    client_agent: String,
}

impl Record {
    /// Build a record from its five raw fields.
    ///
    /// Fields are trimmed; an empty field counts as missing. The status code must
    /// be an integer but is otherwise accepted as-is (no 100-599 range check).
    pub fn parse(
        client_address: &str,
        timestamp: &str,
        resource_path: &str,
        status_code: &str,
        client_agent: &str,
    ) -> Result<Self, MalformedRecordError> {
        let client_address = required(FIELD_NAMES[0], client_address)?;
        let timestamp = required(FIELD_NAMES[1], timestamp)?;
        let resource_path = required(FIELD_NAMES[2], resource_path)?;
        let raw_status = required(FIELD_NAMES[STATUS_FIELD], status_code)?;
        let client_agent = required(FIELD_NAMES[4], client_agent)?;

        let status_code = raw_status.parse::<i64>().map_err(|_| {
            MalformedRecordError::new(MalformedReason::InvalidStatus {
                value: raw_status.to_string(),
            })
        })?;

        Ok(Self {
            client_address: client_address.to_string(),
            timestamp: timestamp.to_string(),
            resource_path: resource_path.to_string(),
            status_code,
            client_agent: client_agent.to_string(),
        })
    }

    /// Parse an already-split line. Anything other than exactly five fields is malformed.
    pub fn from_fields(fields: &[&str]) -> Result<Self, MalformedRecordError> {
        match fields {
            [address, ts, path, status, agent] => Self::parse(address, ts, path, status, agent),
            _ => Err(MalformedRecordError::new(MalformedReason::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            })),
        }
    }

    pub fn client_address(&self) -> &str {
        &self.client_address
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    pub fn status_code(&self) -> i64 {
        self.status_code
    }

    pub fn client_agent(&self) -> &str {
        &self.client_agent
    }

    /// Split into `(status_code, [client_address, timestamp, resource_path, client_agent])`.
    pub(crate) fn into_parts(self) -> (i64, [String; 4]) {
        (
            self.status_code,
            [
                self.client_address,
                self.timestamp,
                self.resource_path,
                self.client_agent,
            ],
        )
    }

    pub(crate) fn from_parts(status_code: i64, body: [String; 4]) -> Self {
        let [client_address, timestamp, resource_path, client_agent] = body;
        Self {
            client_address,
            timestamp,
            resource_path,
            status_code,
            client_agent,
        }
    }

    /// Timestamp cut to its first `len` characters (the whole timestamp if shorter).
    pub fn timestamp_prefix(&self, len: usize) -> &str {
        match self.timestamp.char_indices().nth(len) {
            Some((idx, _)) => &self.timestamp[..idx],
            None => &self.timestamp,
        }
    }
}

fn required<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, MalformedRecordError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(MalformedRecordError::new(MalformedReason::MissingField { field }));
    }
    Ok(value)
}

/// A line that could not be turned into a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}{}", line_prefix(.line), .reason)]
pub struct MalformedRecordError {
    /// 1-based input line, when the record came from a decoder.
    pub line: Option<usize>,
    pub reason: MalformedReason,
}

impl MalformedRecordError {
    pub fn new(reason: MalformedReason) -> Self {
        Self { line: None, reason }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

fn line_prefix(line: &Option<usize>) -> String {
    line.map(|l| format!("line {l}: ")).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MalformedReason {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("missing field {field}")]
    MissingField { field: &'static str },

    #[error("status code '{value}' is not an integer")]
    InvalidStatus { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_keeps_fields() {
        let record = Record::parse(
            " 192.168.1.1",
            "2024-01-01 10:00:00",
            "/home",
            " 200 ",
            "Mozilla/5.0",
        )
        .unwrap();

        assert_eq!(record.client_address(), "192.168.1.1");
        assert_eq!(record.status_code(), 200);
        assert_eq!(record.client_agent(), "Mozilla/5.0");
    }

    #[test]
    fn out_of_range_status_is_kept() {
        let record = Record::parse("h", "t", "/", "999", "a").unwrap();
        assert_eq!(record.status_code(), 999);

        let record = Record::parse("h", "t", "/", "-1", "a").unwrap();
        assert_eq!(record.status_code(), -1);
    }

    #[test]
    fn non_integer_status_is_malformed() {
        let err = Record::parse("h", "t", "/", "OK", "a").unwrap_err();
        assert_eq!(
            err.reason,
            MalformedReason::InvalidStatus {
                value: "OK".to_string()
            }
        );
    }

    #[test]
    fn empty_field_is_missing() {
        let err = Record::parse("h", "  ", "/", "200", "a").unwrap_err();
        assert_eq!(err.reason, MalformedReason::MissingField { field: "timestamp" });
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let err = Record::from_fields(&["h", "t", "/", "200"]).unwrap_err();
        assert_eq!(
            err.reason,
            MalformedReason::FieldCount {
                expected: 5,
                found: 4
            }
        );
    }

    #[test]
    fn error_message_includes_line_when_known() {
        let err = Record::from_fields(&["h"]).unwrap_err();
        assert_eq!(err.to_string(), "expected 5 fields, found 1");
        assert_eq!(
            err.at_line(7).to_string(),
            "line 7: expected 5 fields, found 1"
        );
    }

    #[test]
    fn timestamp_prefix_truncates_to_minute() {
        let record = Record::parse("h", "2024-01-01 10:15:42", "/", "200", "a").unwrap();
        assert_eq!(record.timestamp_prefix(16), "2024-01-01 10:15");
        assert_eq!(record.timestamp_prefix(64), "2024-01-01 10:15:42");
    }
}
