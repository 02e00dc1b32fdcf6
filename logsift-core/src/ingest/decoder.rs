use crate::ingest::header::is_header;
use crate::record::{MalformedRecordError, Record};
use std::io::{self, BufRead};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub delimiter: char,

    /// Drop a leading line whose fields are the column names.
    pub skip_header: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            skip_header: true,
        }
    }
}

/// Why a decode ended before reaching the end of its input.
#[derive(Debug, Error)]
pub enum DecodeHalt {
    #[error("read failed after line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("decoding cancelled after line {line}")]
    Cancelled { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeSummary {
    pub lines: usize,
    pub header_skipped: bool,
}

/// Start decoding `reader`. Nothing is read until the decoder is iterated.
pub fn decode<R: BufRead>(reader: R, options: DecodeOptions) -> Decoder<R> {
    Decoder::new(reader, options)
}

/// Lazy, single-pass record stream over delimited text.
///
/// Yields one item per non-blank line. Malformed lines come through in-band as
/// `Err` so the consumer picks between skip-and-continue and abort. A read
/// failure or cancellation ends the stream; [`Decoder::finish`] reports which.
pub struct Decoder<R> {
    reader: R,
    options: DecodeOptions,
    cancel: Option<CancellationToken>,
    buf: Vec<u8>,
    line: usize,
    seen_content: bool,
    header_skipped: bool,
    halt: Option<DecodeHalt>,
    done: bool,
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R, options: DecodeOptions) -> Self {
        Self {
            reader,
            options,
            cancel: None,
            buf: Vec::new(),
            line: 0,
            seen_content: false,
            header_skipped: false,
            halt: None,
            done: false,
        }
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Consume the decoder, surfacing a read failure or cancellation if one
    /// ended the stream early.
    pub fn finish(self) -> Result<DecodeSummary, DecodeHalt> {
        match self.halt {
            Some(halt) => Err(halt),
            None => Ok(DecodeSummary {
                lines: self.line,
                header_skipped: self.header_skipped,
            }),
        }
    }

    fn next_line(&mut self) -> Option<String> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                let text = String::from_utf8_lossy(&self.buf);
                Some(text.trim_end_matches(['\n', '\r']).to_string())
            }
            Err(source) => {
                tracing::warn!(line = self.line, error = %source, "input read failed");
                self.halt = Some(DecodeHalt::Io {
                    line: self.line,
                    source,
                });
                None
            }
        }
    }
}

impl<R: BufRead> Iterator for Decoder<R> {
    type Item = Result<Record, MalformedRecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                self.done = true;
                self.halt = Some(DecodeHalt::Cancelled { line: self.line });
                return None;
            }

            let Some(line) = self.next_line() else {
                self.done = true;
                return None;
            };

            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(self.options.delimiter).collect();
            let first = !self.seen_content;
            self.seen_content = true;

            if first && self.options.skip_header && is_header(&fields) {
                tracing::debug!(line = self.line, "skipping header line");
                self.header_skipped = true;
                continue;
            }

            return Some(Record::from_fields(&fields).map_err(|e| e.at_line(self.line)));
        }
    }
}
