//! Process exit codes, so CI can tell drift apart from broken setup.

use ruledoc::error::GenerateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// Validation issues, or drift in check mode
    DocsFailure = 1,
    /// Invalid or unreadable ruledoc config
    ConfigError = 2,
    /// Plugin manifest missing or malformed
    ManifestError = 3,
    /// Missing target files, bad markers or I/O failures
    IoError = 4,
}

impl ExitCode {
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }
}

impl From<&GenerateError> for ExitCode {
    fn from(err: &GenerateError) -> Self {
        match err {
            GenerateError::Config(_) => ExitCode::ConfigError,
            GenerateError::Manifest(_) => ExitCode::ManifestError,
            // Render errors only come from manifest content the renderer cannot express.
            GenerateError::Render(_) => ExitCode::ManifestError,
            GenerateError::Splice { .. }
            | GenerateError::MissingRuleDoc { .. }
            | GenerateError::MissingRuleList(_)
            | GenerateError::Io { .. } => ExitCode::IoError,
        }
    }
}
