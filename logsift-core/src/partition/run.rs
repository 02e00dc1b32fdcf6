use crate::analysis::{finish_decode, materialize};
use crate::error::AnalysisError;
use crate::ingest::{DecodeOptions, decode, open_input};
use crate::partition::writer::{PartitionSet, partition};
use crate::record::MalformedRecordError;
use std::io::BufRead;
use std::path::Path;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct PartitionOutcome {
    pub partitions: PartitionSet,
    pub warnings: Vec<MalformedRecordError>,
}

/// Decode `input` and split it by status code.
pub fn run_partition(
    input: &Path,
    decode_options: DecodeOptions,
    strict: bool,
    cancel: &CancellationToken,
) -> Result<PartitionOutcome, AnalysisError> {
    let reader = open_input(input)?;
    partition_reader(reader, input, decode_options, strict, cancel)
}

pub fn partition_reader<R: BufRead>(
    reader: R,
    source: &Path,
    decode_options: DecodeOptions,
    strict: bool,
    cancel: &CancellationToken,
) -> Result<PartitionOutcome, AnalysisError> {
    let mut decoder = decode(reader, decode_options).with_cancel(cancel.clone());
    let (records, warnings) = materialize(decoder.by_ref(), strict)?;
    finish_decode(decoder, source)?;

    let partitions = partition(records);

    tracing::info!(
        source = %source.display(),
        partitions = partitions.len(),
        rows = partitions.total_rows(),
        malformed = warnings.len(),
        "partitioning complete"
    );

    Ok(PartitionOutcome {
        partitions,
        warnings,
    })
}
