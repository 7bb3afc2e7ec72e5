// Lookup constants (No magic values)

/// Command that displays queue manager configuration information
/// (a subset of mqs.ini, simpler to parse than the file itself)
pub const DSPMQINF_COMMAND: &str = "dspmqinf";

/// `dspmqinf` flag selecting the output format
pub const OUTPUT_FORMAT_FLAG: &str = "-o";

/// `dspmqinf` output format that prints one `Key=Value` per line
pub const STANZA_FORMAT: &str = "stanza";
