use crate::error::{AnalysisError, Resource, Result};
use serde::Serialize;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for line reading
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// Statistics for one completed read
#[derive(Debug, Clone, Serialize)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Async reader that loads a text file as a vector of lines
#[derive(Debug, Clone, Default)]
pub struct LineReader {
    config: ReaderConfig,
}

impl LineReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read every line of `path`
    ///
    /// Line terminators are stripped. Any open or decode failure is reported as
    /// `ResourceUnavailable` for `resource`; partial content is discarded.
    pub async fn read_lines<P: AsRef<Path>>(
        &self,
        path: P,
        resource: Resource,
    ) -> Result<(Vec<String>, ReadStats)> {
        let path = path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of {}: {}", resource, path.display());

        let file = File::open(path).await.map_err(|e| {
            warn!("Failed to open {} {}: {}", resource, path.display(), e);
            AnalysisError::unavailable(resource.clone(), path, e.to_string())
        })?;

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut lines = reader.lines();
        let mut result_lines = Vec::new();
        let mut line_count = 0u64;
        let mut byte_count = 0u64;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    byte_count += line.len() as u64 + 1;
                    line_count += 1;
                    result_lines.push(line);
                }
                Ok(None) => break,
                Err(e) => {
                    let message = format!("read error at line {}: {}", line_count + 1, e);
                    warn!("Failed to read {} {}: {}", resource, path.display(), message);
                    return Err(AnalysisError::unavailable(resource, path, message));
                }
            }
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: line_count,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Read {} {}: {} lines, {} bytes in {}ms",
            resource,
            path.display(),
            line_count,
            byte_count,
            stats.duration_ms
        );

        Ok((result_lines, stats))
    }
}
