// Stanza parsing for `dspmqinf -o stanza` output
use std::io::BufRead;
use tracing::debug;

use super::error::{DomainError, Result};
use super::queue_manager::QueueManagerRecord;

/// Parse a queue manager stanza into a record
///
/// Each line is trimmed, then split at its first `=`. Recognized keys
/// (`Name`, `Prefix`, `Directory`, `DataPath`, `InstallationName`) are copied
/// into the record; anything else is ignored, including lines with no `=`
/// such as the `QueueManager:` header.
///
/// # Errors
/// - DomainError::StanzaScan if a line cannot be read (e.g. invalid UTF-8)
///
/// # Example
/// ```
/// use mqini_core::domain::parse_queue_manager_stanza;
///
/// let qm = parse_queue_manager_stanza(b"QueueManager:\n   Name=QM1\n").unwrap();
/// assert_eq!(qm.name, "QM1");
/// assert!(qm.prefix.is_empty());
/// ```
pub fn parse_queue_manager_stanza(stanza: &[u8]) -> Result<QueueManagerRecord> {
    let mut qm = QueueManagerRecord::default();

    for (index, line) in stanza.lines().enumerate() {
        let line = line.map_err(|source| DomainError::StanzaScan {
            line: index + 1,
            source,
        })?;

        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };

        let field = match key {
            "Name" => &mut qm.name,
            "Prefix" => &mut qm.prefix,
            "Directory" => &mut qm.directory,
            "DataPath" => &mut qm.data_path,
            "InstallationName" => &mut qm.installation_name,
            _ => {
                debug!(key = %key, "Ignoring unrecognized stanza key");
                continue;
            }
        };
        *field = value.to_string();
    }

    Ok(qm)
}
