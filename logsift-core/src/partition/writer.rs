use crate::record::Record;
use serde::Serialize;
use std::collections::BTreeMap;

/// A record without its status code. The status lives on the partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionRow {
    pub client_address: String,
    pub timestamp: String,
    pub resource_path: String,
    pub client_agent: String,
}

impl PartitionRow {
    /// Row body in input column order, joined by `delimiter`.
    pub fn to_line(&self, delimiter: char) -> String {
        let mut buf = [0u8; 4];
        let delimiter: &str = delimiter.encode_utf8(&mut buf);
        [
            self.client_address.as_str(),
            self.timestamp.as_str(),
            self.resource_path.as_str(),
            self.client_agent.as_str(),
        ]
        .join(delimiter)
    }

    fn into_record(self, status_code: i64) -> Record {
        Record::from_parts(
            status_code,
            [
                self.client_address,
                self.timestamp,
                self.resource_path,
                self.client_agent,
            ],
        )
    }
}

impl From<[String; 4]> for PartitionRow {
    fn from(body: [String; 4]) -> Self {
        let [client_address, timestamp, resource_path, client_agent] = body;
        Self {
            client_address,
            timestamp,
            resource_path,
            client_agent,
        }
    }
}

/// Rows grouped by status code, keys ascending.
///
/// Only statuses that occurred get a partition, and every partition holds at
/// least one row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PartitionSet {
    partitions: BTreeMap<i64, Vec<PartitionRow>>,
}

impl PartitionSet {
    pub fn get(&self, status_code: i64) -> Option<&[PartitionRow]> {
        self.partitions.get(&status_code).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &[PartitionRow])> {
        self.partitions
            .iter()
            .map(|(status, rows)| (*status, rows.as_slice()))
    }

    pub fn status_codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.partitions.keys().copied()
    }

    /// Number of partitions.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    /// Put the status code back on every row. Rows come out partition by
    /// partition, input order kept inside each.
    pub fn into_records(self) -> Vec<Record> {
        self.partitions
            .into_iter()
            .flat_map(|(status, rows)| rows.into_iter().map(move |row| row.into_record(status)))
            .collect()
    }

    fn push(&mut self, record: Record) {
        let (status, body) = record.into_parts();
        self.partitions
            .entry(status)
            .or_default()
            .push(PartitionRow::from(body));
    }
}

/// Split records by status code. Stable within each partition.
pub fn partition<I>(records: I) -> PartitionSet
where
    I: IntoIterator<Item = Record>,
{
    let mut set = PartitionSet::default();
    for record in records {
        set.push(record);
    }
    set
}
