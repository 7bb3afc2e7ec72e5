// Queue Manager Domain Model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory under the installation prefix that holds per-queue-manager data
pub const QMGRS_SEGMENT: &str = "qmgrs";

/// Directory under a queue manager's data directory that holds its error logs
pub const ERRORS_SEGMENT: &str = "errors";

/// High-level configuration of a queue manager, as reported by `dspmqinf`
///
/// Fields are copied verbatim from the stanza. Any key missing from the
/// stanza leaves its field empty; no value is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueManagerRecord {
    pub name: String,
    pub prefix: String,
    pub directory: String,
    pub data_path: String,
    pub installation_name: String,
}

impl QueueManagerRecord {
    /// Directory holding this queue manager's error logs
    pub fn error_log_directory(&self) -> PathBuf {
        error_log_directory(self)
    }
}

/// Derive `<Prefix>/qmgrs/<Directory>/errors` with the host path separator
///
/// Pure string computation: the directory is neither checked nor created.
pub fn error_log_directory(record: &QueueManagerRecord) -> PathBuf {
    PathBuf::from(&record.prefix)
        .join(QMGRS_SEGMENT)
        .join(&record.directory)
        .join(ERRORS_SEGMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn qm1() -> QueueManagerRecord {
        QueueManagerRecord {
            name: "QM1".to_string(),
            prefix: "/var/mqm".to_string(),
            directory: "QM1".to_string(),
            data_path: "/var/mqm/qmgrs/QM1".to_string(),
            installation_name: "Installation1".to_string(),
        }
    }

    #[test]
    fn test_error_log_directory() {
        let dir = error_log_directory(&qm1());

        assert_eq!(
            dir,
            Path::new("/var/mqm").join("qmgrs").join("QM1").join("errors")
        );
        #[cfg(unix)]
        assert_eq!(dir, Path::new("/var/mqm/qmgrs/QM1/errors"));
    }

    #[test]
    fn test_error_log_directory_method_matches_function() {
        let record = qm1();
        assert_eq!(record.error_log_directory(), error_log_directory(&record));
    }

    #[test]
    fn test_error_log_directory_uses_directory_not_name() {
        // Names containing "." are stored under a mangled directory ("QM!1")
        let record = QueueManagerRecord {
            name: "QM.1".to_string(),
            prefix: "/var/mqm".to_string(),
            directory: "QM!1".to_string(),
            ..Default::default()
        };

        assert_eq!(
            record.error_log_directory(),
            Path::new("/var/mqm").join("qmgrs").join("QM!1").join("errors")
        );
    }

    #[test]
    fn test_error_log_directory_empty_record() {
        let dir = error_log_directory(&QueueManagerRecord::default());
        assert_eq!(dir, Path::new("qmgrs").join("errors"));
    }

    #[test]
    fn test_serialize_uses_stanza_key_names() {
        let json = serde_json::to_value(qm1()).unwrap();

        assert_eq!(json["Name"], "QM1");
        assert_eq!(json["DataPath"], "/var/mqm/qmgrs/QM1");
        assert_eq!(json["InstallationName"], "Installation1");
    }
}
