use crate::analysis::{
    AnalysisOptions, DEFAULT_FAILURE_CODES, DEFAULT_FAILURE_THRESHOLD, DEFAULT_TOP_N,
    TrendGranularity, ViewKind,
};
use crate::conf::error::ConfigError;
use crate::export::ExportFormat;
use crate::ingest::DecodeOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogsiftConfig {
    pub ingest: IngestConfig,
    pub analysis: AnalysisConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestConfig {
    pub delimiter: String,
    pub skip_header: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            skip_header: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub views: Vec<ViewKind>,
    pub top_n: usize,
    pub failure_threshold: u64,
    pub failure_codes: Vec<i64>,
    pub trend_granularity: TrendGranularity,
    pub concurrent: bool,
    pub strict: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            views: ViewKind::ALL.to_vec(),
            top_n: DEFAULT_TOP_N,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            failure_codes: DEFAULT_FAILURE_CODES.to_vec(),
            trend_granularity: TrendGranularity::default(),
            concurrent: false,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Unset: guess from the export path, then fall back to text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,
}

impl IngestConfig {
    pub fn delimiter_char(&self) -> Result<char, ConfigError> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConfigError::InvalidDelimiter {
                value: self.delimiter.clone(),
            }),
        }
    }
}

impl LogsiftConfig {
    /// Semantic checks that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ingest.delimiter_char()?;

        if self.analysis.top_n == 0 {
            return Err(ConfigError::InvalidTopN);
        }
        if self.analysis.failure_codes.is_empty() {
            return Err(ConfigError::EmptyFailureCodes);
        }
        if self.analysis.views.is_empty() {
            return Err(ConfigError::EmptyViews);
        }

        Ok(())
    }

    pub fn decode_options(&self) -> Result<DecodeOptions, ConfigError> {
        Ok(DecodeOptions {
            delimiter: self.ingest.delimiter_char()?,
            skip_header: self.ingest.skip_header,
        })
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        let mut views = Vec::with_capacity(self.analysis.views.len());
        for view in &self.analysis.views {
            if !views.contains(view) {
                views.push(*view);
            }
        }

        AnalysisOptions {
            views,
            top_n: self.analysis.top_n,
            failure_codes: self.analysis.failure_codes.clone(),
            failure_threshold: self.analysis.failure_threshold,
            trend_granularity: self.analysis.trend_granularity,
            strict: self.analysis.strict,
            concurrent: self.analysis.concurrent,
        }
    }
}
