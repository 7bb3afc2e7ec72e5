// Subprocess runner implementation
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use mqini_core::port::command_runner::{
    CommandError, CommandOutput, CommandRequest, CommandRunner,
};

/// Subprocess runner
/// Runs the command directly (no shell) and waits for it to exit
#[derive(Debug, Clone, Default)]
pub struct SubprocessRunner {
    timeout: Option<Duration>,
}

impl SubprocessRunner {
    /// Create a runner that waits for the process without a time limit
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Create a runner that abandons (and kills) the process after `timeout`
    ///
    /// # Example
    /// ```ignore
    /// let runner = SubprocessRunner::with_timeout(Duration::from_secs(10));
    /// ```
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Spawn child process and wait for output
    async fn spawn_and_wait(
        &self,
        request: &CommandRequest,
    ) -> Result<std::process::Output, CommandError> {
        let child = Command::new(&request.program)
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CommandError::SpawnFailed {
                program: request.program.clone(),
                reason: e.to_string(),
            })?;

        debug!(pid = ?child.id(), program = %request.program, "Spawned child process");

        // Dropping the wait future on timeout drops the child, which kills it
        if let Some(limit) = self.timeout {
            match timeout(limit, child.wait_with_output()).await {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(e)) => Err(CommandError::Io(e.to_string())),
                Err(_) => Err(CommandError::Timeout {
                    program: request.program.clone(),
                    timeout_ms: limit.as_millis() as u64,
                }),
            }
        } else {
            child
                .wait_with_output()
                .await
                .map_err(|e| CommandError::Io(e.to_string()))
        }
    }

    /// Build command output from process output
    fn build_output(output: std::process::Output, duration: Duration) -> CommandOutput {
        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        CommandOutput {
            exit_code: output.status.code(),
            combined,
            duration,
        }
    }
}

#[async_trait]
impl CommandRunner for SubprocessRunner {
    async fn run(&self, request: &CommandRequest) -> Result<CommandOutput, CommandError> {
        let start = Instant::now();

        info!(
            command = %request.display(),
            timeout_ms = ?self.timeout.map(|t| t.as_millis() as u64),
            "Starting subprocess"
        );

        let output = self.spawn_and_wait(request).await?;
        let result = Self::build_output(output, start.elapsed());

        info!(
            command = %request.display(),
            duration_ms = result.duration.as_millis() as u64,
            exit_code = ?result.exit_code,
            "Subprocess completed"
        );

        Ok(result)
    }
}
