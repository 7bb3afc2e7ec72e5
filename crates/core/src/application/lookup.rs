// Queue manager lookup use case
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::constants::{DSPMQINF_COMMAND, OUTPUT_FORMAT_FLAG, STANZA_FORMAT};
use crate::domain::{parse_queue_manager_stanza, QueueManagerRecord};
use crate::error::AppError;
use crate::port::{CommandError, CommandRequest, CommandRunner};

/// Lookup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Program invoked to display queue manager configuration
    pub command: String,
}

impl LookupConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Reject configurations that cannot produce a runnable command
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.command.trim().is_empty() {
            return Err(AppError::Config("lookup command must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self::new(DSPMQINF_COMMAND)
    }
}

/// Queue manager lookup service
///
/// Runs `dspmqinf -o stanza <name>` through the injected runner and parses
/// the result. Every call is one-shot: nothing is cached or retried.
pub struct QueueManagerLookup {
    runner: Arc<dyn CommandRunner>,
    config: LookupConfig,
}

impl QueueManagerLookup {
    /// Create a new lookup service
    ///
    /// # Arguments
    /// * `runner` - Command runner (SubprocessRunner in production)
    /// * `config` - Lookup configuration
    ///
    /// # Example
    /// ```ignore
    /// let lookup = QueueManagerLookup::new(
    ///     Arc::new(SubprocessRunner::new()),
    ///     LookupConfig::default(),
    /// );
    /// let qm = lookup.get_queue_manager("QM1").await?;
    /// ```
    pub fn new(runner: Arc<dyn CommandRunner>, config: LookupConfig) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    fn request_for(&self, name: &str) -> CommandRequest {
        CommandRequest::new(
            self.config.command.clone(),
            [OUTPUT_FORMAT_FLAG, STANZA_FORMAT, name],
        )
    }

    /// Return the configuration of the named queue manager
    ///
    /// # Errors
    /// - AppError::Command if the command cannot run or exits nonzero;
    ///   its output is never parsed in that case
    /// - AppError::Domain if the output cannot be scanned
    pub async fn get_queue_manager(&self, name: &str) -> crate::error::Result<QueueManagerRecord> {
        let request = self.request_for(name);

        debug!(command = %request.display(), "Querying queue manager configuration");

        let output = self.runner.run(&request).await.inspect_err(|e| {
            warn!(queue_manager = %name, error = %e, "Queue manager query failed to run");
        })?;

        if !output.success() {
            warn!(
                queue_manager = %name,
                exit_code = ?output.exit_code,
                "Queue manager query exited unsuccessfully"
            );
            return Err(CommandError::NonZeroExit {
                command: request.display(),
                exit_code: output.exit_code,
                output: output.combined_lossy().trim().to_string(),
            }
            .into());
        }

        let qm = parse_queue_manager_stanza(&output.combined)?;

        info!(
            queue_manager = %name,
            prefix = %qm.prefix,
            directory = %qm.directory,
            duration_ms = output.duration.as_millis() as u64,
            "Queue manager configuration resolved"
        );

        Ok(qm)
    }

    /// Look up the named queue manager and return its error-log directory
    pub async fn error_log_directory(&self, name: &str) -> crate::error::Result<PathBuf> {
        let qm = self.get_queue_manager(name).await?;
        Ok(qm.error_log_directory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::port::command_runner::mocks::{MockBehavior, MockCommandRunner};
    use std::path::Path;

    const QM1_STANZA: &str = "QueueManager:\n   Name=QM1\n   Prefix=/var/mqm\n   Directory=QM1\n   DataPath=/var/mqm/qmgrs/QM1\n   InstallationName=Installation1\n";

    fn lookup_with(runner: &MockCommandRunner) -> QueueManagerLookup {
        QueueManagerLookup::new(Arc::new(runner.clone()), LookupConfig::default())
    }

    #[test]
    fn test_config_validate() {
        assert!(LookupConfig::default().validate().is_ok());
        assert!(matches!(
            LookupConfig::new("  ").validate(),
            Err(AppError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_get_queue_manager_success() {
        let runner = MockCommandRunner::new_success(QM1_STANZA);
        let lookup = lookup_with(&runner);

        let qm = lookup.get_queue_manager("QM1").await.unwrap();

        assert_eq!(qm.name, "QM1");
        assert_eq!(qm.prefix, "/var/mqm");
        assert_eq!(qm.directory, "QM1");
        assert_eq!(qm.data_path, "/var/mqm/qmgrs/QM1");
        assert_eq!(qm.installation_name, "Installation1");
    }

    #[tokio::test]
    async fn test_get_queue_manager_passes_stanza_arguments() {
        let runner = MockCommandRunner::new_success(QM1_STANZA);
        let lookup = lookup_with(&runner);

        lookup.get_queue_manager("QM1").await.unwrap();

        assert_eq!(
            runner.calls(),
            vec![CommandRequest::new("dspmqinf", ["-o", "stanza", "QM1"])]
        );
    }

    #[tokio::test]
    async fn test_get_queue_manager_uses_configured_command() {
        let runner = MockCommandRunner::new_success(QM1_STANZA);
        let lookup = QueueManagerLookup::new(
            Arc::new(runner.clone()),
            LookupConfig::new("/opt/mqm/bin/dspmqinf"),
        );

        lookup.get_queue_manager("QM1").await.unwrap();

        assert_eq!(runner.calls()[0].program, "/opt/mqm/bin/dspmqinf");
    }

    #[tokio::test]
    async fn test_get_queue_manager_non_zero_exit_is_not_parsed() {
        // Output looks parseable but must not produce a record
        let runner = MockCommandRunner::new_exit(72, "Name=QM9\nAMQ7048E: not known.\n");
        let lookup = lookup_with(&runner);

        let result = lookup.get_queue_manager("QM9").await;

        match result {
            Err(AppError::Command(CommandError::NonZeroExit {
                command,
                exit_code,
                output,
            })) => {
                assert_eq!(command, "dspmqinf -o stanza QM9");
                assert_eq!(exit_code, Some(72));
                assert!(output.contains("AMQ7048E"));
            }
            other => panic!("expected NonZeroExit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_queue_manager_spawn_failure() {
        let runner = MockCommandRunner::new_spawn_fail("No such file or directory");
        let lookup = lookup_with(&runner);

        let result = lookup.get_queue_manager("QM1").await;

        assert!(matches!(
            result,
            Err(AppError::Command(CommandError::SpawnFailed { .. }))
        ));
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_queue_manager_timeout() {
        let runner = MockCommandRunner::new(MockBehavior::Timeout(500));
        let lookup = lookup_with(&runner);

        let result = lookup.get_queue_manager("QM1").await;

        assert!(matches!(
            result,
            Err(AppError::Command(CommandError::Timeout { timeout_ms: 500, .. }))
        ));
    }

    #[tokio::test]
    async fn test_get_queue_manager_empty_output() {
        let runner = MockCommandRunner::new_success("");
        let lookup = lookup_with(&runner);

        let qm = lookup.get_queue_manager("QM1").await.unwrap();

        assert_eq!(qm, QueueManagerRecord::default());
    }

    #[tokio::test]
    async fn test_get_queue_manager_scan_failure() {
        let runner = MockCommandRunner::new_success(b"Name=QM1\n\xff\n".to_vec());
        let lookup = lookup_with(&runner);

        let result = lookup.get_queue_manager("QM1").await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::StanzaScan { line: 2, .. }))
        ));
    }

    #[tokio::test]
    async fn test_error_log_directory() {
        let runner = MockCommandRunner::new_success(QM1_STANZA);
        let lookup = lookup_with(&runner);

        let dir = lookup.error_log_directory("QM1").await.unwrap();

        assert_eq!(
            dir,
            Path::new("/var/mqm").join("qmgrs").join("QM1").join("errors")
        );
    }

    #[tokio::test]
    async fn test_each_call_runs_the_command_again() {
        let runner = MockCommandRunner::new_success(QM1_STANZA);
        let lookup = lookup_with(&runner);

        let first = lookup.get_queue_manager("QM1").await.unwrap();
        runner.set_behavior(MockBehavior::Exit {
            code: 0,
            output: b"Name=QM1\nPrefix=/srv/mqm\n".to_vec(),
        });
        let second = lookup.get_queue_manager("QM1").await.unwrap();

        assert_eq!(runner.call_count(), 2);
        assert_eq!(first.prefix, "/var/mqm");
        assert_eq!(second.prefix, "/srv/mqm");
    }
}
