// Command Runner Port
// Abstraction over running an external administrative command to completion

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// An external command invocation: program plus arguments, no shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandRequest {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Render as a single line for logs and error messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a command that ran to completion
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// None if the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Standard output followed by standard error
    pub combined: Vec<u8>,
    pub duration: Duration,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn combined_lossy(&self) -> String {
        String::from_utf8_lossy(&self.combined).into_owned()
    }
}

/// Command errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Spawn failed for '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("'{command}' exited with {}: {output}", describe_exit(.exit_code))]
    NonZeroExit {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    #[error("'{program}' timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    #[error("IO error: {0}")]
    Io(String),
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("status {}", code),
        None => "signal".to_string(),
    }
}

/// Command Runner trait
///
/// Implementations:
/// - SubprocessRunner (mqini-infra-system): spawns the real process
/// - MockCommandRunner: scripted responses for tests
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion and capture its combined output
    ///
    /// A nonzero exit is NOT an error at this layer: it is reported through
    /// `CommandOutput::exit_code` so callers decide how to treat it.
    ///
    /// # Errors
    /// - CommandError::SpawnFailed if the process cannot be started
    /// - CommandError::Timeout if the runner enforces a timeout and it elapses
    /// - CommandError::Io if output cannot be collected
    async fn run(&self, request: &CommandRequest) -> Result<CommandOutput, CommandError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Exit with the given code and output
        Exit { code: i32, output: Vec<u8> },
        /// Fail to spawn
        SpawnFail(String),
        /// Time out after N ms
        Timeout(u64),
    }

    /// Mock Command Runner for testing
    #[derive(Clone)]
    pub struct MockCommandRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<CommandRequest>>>,
    }

    impl MockCommandRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_success(output: impl Into<Vec<u8>>) -> Self {
            Self::new(MockBehavior::Exit {
                code: 0,
                output: output.into(),
            })
        }
        pub fn new_exit(code: i32, output: impl Into<Vec<u8>>) -> Self {
            Self::new(MockBehavior::Exit {
                code,
                output: output.into(),
            })
        }
        pub fn new_spawn_fail(reason: impl Into<String>) -> Self {
            Self::new(MockBehavior::SpawnFail(reason.into()))
        }
        pub fn set_behavior(&self, behavior: MockBehavior) {
            *self.behavior.lock().unwrap() = behavior;
        }
        pub fn calls(&self) -> Vec<CommandRequest> {
            self.calls.lock().unwrap().clone()
        }
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CommandRunner for MockCommandRunner {
        async fn run(&self, request: &CommandRequest) -> Result<CommandOutput, CommandError> {
            self.calls.lock().unwrap().push(request.clone());

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Exit { code, output } => Ok(CommandOutput {
                    exit_code: Some(code),
                    combined: output,
                    duration: Duration::from_millis(5),
                }),
                MockBehavior::SpawnFail(reason) => Err(CommandError::SpawnFailed {
                    program: request.program.clone(),
                    reason,
                }),
                MockBehavior::Timeout(timeout_ms) => Err(CommandError::Timeout {
                    program: request.program.clone(),
                    timeout_ms,
                }),
            }
        }
    }
}
