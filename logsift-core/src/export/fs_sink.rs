use crate::analysis::{AnalysisReport, render_report};
use crate::export::error::ExportError;
use crate::export::format::ExportFormat;
use crate::export::sink::{ExportPayload, ExportSink};
use crate::partition::{PART_FILE_NAME, PartitionSet, partition_dir_name};
use std::fs;
use std::path::Path;

/// Writes exports to the local filesystem.
///
/// Reports become a single file in `format`. Partition sets become one
/// `status_code=<code>/part-00000.csv` per partition under the destination
/// directory, which must be missing or empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink {
    pub format: ExportFormat,
}

impl FsSink {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    fn write_report(&self, report: &AnalysisReport, destination: &Path) -> Result<(), ExportError> {
        let body = match self.format {
            ExportFormat::Text => render_report(report, false),
            ExportFormat::Json => serde_json::to_string_pretty(report)? + "\n",
            ExportFormat::Yaml => serde_yaml::to_string(report)?,
        };

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ExportError::write(parent, e))?;
        }
        fs::write(destination, body).map_err(|e| ExportError::write(destination, e))?;

        tracing::info!(
            destination = %destination.display(),
            format = ?self.format,
            "report exported"
        );
        Ok(())
    }

    fn write_partitions(
        &self,
        set: &PartitionSet,
        delimiter: char,
        destination: &Path,
    ) -> Result<(), ExportError> {
        ensure_empty_dir(destination)?;

        for (status, rows) in set.iter() {
            let dir = destination.join(partition_dir_name(status));
            fs::create_dir_all(&dir).map_err(|e| ExportError::write(&dir, e))?;

            let mut body = String::new();
            for row in rows {
                body.push_str(&row.to_line(delimiter));
                body.push('\n');
            }

            let file = dir.join(PART_FILE_NAME);
            fs::write(&file, body).map_err(|e| ExportError::write(&file, e))?;

            tracing::debug!(status, rows = rows.len(), path = %file.display(), "partition written");
        }

        tracing::info!(
            destination = %destination.display(),
            partitions = set.len(),
            rows = set.total_rows(),
            "partitions exported"
        );
        Ok(())
    }
}

impl ExportSink for FsSink {
    fn export(&self, payload: ExportPayload<'_>, destination: &Path) -> Result<(), ExportError> {
        match payload {
            ExportPayload::Report(report) => self.write_report(report, destination),
            ExportPayload::Partitions { set, delimiter } => {
                self.write_partitions(set, delimiter, destination)
            }
        }
    }
}

fn ensure_empty_dir(path: &Path) -> Result<(), ExportError> {
    match fs::read_dir(path) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                return Err(ExportError::DestinationNotEmpty {
                    path: path.to_path_buf(),
                });
            }
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| ExportError::write(path, e))
        }
        Err(e) => Err(ExportError::write(path, e)),
    }
}
