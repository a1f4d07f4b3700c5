//! Failures of the `keebgen` binary and the process exit code each one maps to.

use std::fmt;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad command line, rejected by clap before any command runs.
    Usage = 1,
    /// A layout, board config or point list that could not be read or was rejected by the
    /// parser (`interpret`, `hull`).
    Input = 2,
    /// A model or hull that was computed but could not be serialized or written to `--output`.
    Processing = 3,
}

impl From<ErrorCode> for ExitCode {
    fn from(code: ErrorCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Error reported on stderr as `Error: <message>` before exiting with `code`.
#[derive(Debug)]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    pub fn input(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Input,
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Processing,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_documented_exit_statuses() {
        assert_eq!(ErrorCode::Usage as u8, 1);
        assert_eq!(CliError::input("bad layout").code as u8, 2);
        assert_eq!(CliError::processing("disk full").code as u8, 3);
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = CliError::input("layout.json: malformed layout at row 1, item 2");
        assert_eq!(err.to_string(), "layout.json: malformed layout at row 1, item 2");
    }
}
