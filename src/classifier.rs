//! External classifier process adapter.
//!
//! Runs exactly one classification process per call:
//! - URL passed as a single argv element (never through a shell)
//! - stdout/stderr drained concurrently with the exit wait
//! - optional kill-on-timeout

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, error};

use crate::error::AdapterError;

/// Maximum stderr length kept for log messages.
const MAX_STDERR_LOG: usize = 2 * 1024;

/// Terminal record of one classifier invocation.
///
/// Created when the process starts, appended to as output arrives, and
/// discarded once the orchestrator has consumed the stdout buffer.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// One external classification per call.
///
/// Implementations must spawn (or simulate) an independent invocation each
/// time; there is no pooling and no reuse across calls.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn invoke(&self, url: &str) -> Result<ProcessOutcome, AdapterError>;
}

/// Classifier backed by an external program (the original deployment runs a
/// Python script around an XGBoost model).
#[derive(Debug, Clone)]
pub struct ProcessClassifier {
    program: String,
    /// Leading arguments (e.g. the script path); the URL is appended last.
    args: Vec<String>,
    /// Maximum time to wait for the process; `None` waits indefinitely.
    timeout: Option<Duration>,
}

impl ProcessClassifier {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Bound the process wait; the child is killed on expiry.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn run(&self, url: &str) -> Result<ProcessOutcome, AdapterError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Reaps the child if the timeout drops this future mid-wait.
            .kill_on_drop(true)
            .spawn()
            .map_err(AdapterError::Spawn)?;

        // Pipes must be drained while the child runs; a full pipe buffer
        // would deadlock the child. All three futures must finish before
        // the outcome is finalized.
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let (status, stdout, stderr) = tokio::try_join!(
            async { child.wait().await.map_err(AdapterError::Io) },
            drain(stdout_pipe),
            drain(stderr_pipe),
        )?;

        Ok(ProcessOutcome {
            exit_code: status.code(),
            stdout,
            stderr,
        })
    }
}

#[async_trait]
impl Classifier for ProcessClassifier {
    /// Run one classification and classify its terminal outcome.
    ///
    /// Any stderr output is treated as failure even when the exit code is 0:
    /// the external contract is that a healthy classifier writes exactly one
    /// record to stdout and nothing else.
    async fn invoke(&self, url: &str) -> Result<ProcessOutcome, AdapterError> {
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.run(url)).await {
                Ok(result) => result?,
                Err(_) => {
                    error!(program = %self.program, timeout = ?limit, "Classifier timed out");
                    return Err(AdapterError::Timeout(limit));
                }
            },
            None => self.run(url).await?,
        };

        if outcome.exit_code != Some(0) || !outcome.stderr.is_empty() {
            error!(
                exit_code = ?outcome.exit_code,
                stderr = %truncate(&outcome.stderr),
                "Classifier process failed"
            );
            return Err(AdapterError::ProcessFailed {
                exit_code: outcome.exit_code,
                stderr: outcome.stderr,
            });
        }

        debug!(bytes = outcome.stdout.len(), "Classifier produced output");
        Ok(outcome)
    }
}

/// Read a pipe to EOF, accumulating chunks as they arrive.
async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> Result<String, AdapterError> {
    let mut buf = String::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_string(&mut buf).await?;
    }
    Ok(buf)
}

/// Truncate stderr for log messages (UTF-8 safe).
fn truncate(s: &str) -> &str {
    if s.len() <= MAX_STDERR_LOG {
        return s;
    }
    let mut end = MAX_STDERR_LOG;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
