use std::fmt;

#[derive(Debug, Clone)]
pub enum ArchiveError {
    Config(String),
    Auth(String),
    Http(String),
    UnexpectedResponse(String),
    Consistency(String),
    FileOperation(String),
    Serialization(String),
    Validation(String),
    Download(String),
}

impl ArchiveError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ArchiveError::Config(_) => "E001",
            ArchiveError::Auth(_) => "E002",
            ArchiveError::Http(_) => "E003",
            ArchiveError::UnexpectedResponse(_) => "E004",
            ArchiveError::Consistency(_) => "E005",
            ArchiveError::FileOperation(_) => "E006",
            ArchiveError::Serialization(_) => "E007",
            ArchiveError::Validation(_) => "E008",
            ArchiveError::Download(_) => "E009",
        }
    }

    /// Human readable error category
    pub fn error_type(&self) -> &'static str {
        match self {
            ArchiveError::Config(_) => "Configuration Error",
            ArchiveError::Auth(_) => "Authentication Error",
            ArchiveError::Http(_) => "HTTP Error",
            ArchiveError::UnexpectedResponse(_) => "Unexpected Response",
            ArchiveError::Consistency(_) => "Consistency Error",
            ArchiveError::FileOperation(_) => "File Operation Error",
            ArchiveError::Serialization(_) => "Serialization Error",
            ArchiveError::Validation(_) => "Validation Error",
            ArchiveError::Download(_) => "Download Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ArchiveError::Config(msg) => msg,
            ArchiveError::Auth(msg) => msg,
            ArchiveError::Http(msg) => msg,
            ArchiveError::UnexpectedResponse(msg) => msg,
            ArchiveError::Consistency(msg) => msg,
            ArchiveError::FileOperation(msg) => msg,
            ArchiveError::Serialization(msg) => msg,
            ArchiveError::Validation(msg) => msg,
            ArchiveError::Download(msg) => msg,
        }
    }

    /// Coloured single-block output for the terminal
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ArchiveError {}

impl ArchiveError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        ArchiveError::Config(msg.into())
    }

    pub fn auth<T: Into<String>>(msg: T) -> Self {
        ArchiveError::Auth(msg.into())
    }

    pub fn http<T: Into<String>>(msg: T) -> Self {
        ArchiveError::Http(msg.into())
    }

    pub fn unexpected_response<T: Into<String>>(msg: T) -> Self {
        ArchiveError::UnexpectedResponse(msg.into())
    }

    pub fn consistency<T: Into<String>>(msg: T) -> Self {
        ArchiveError::Consistency(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ArchiveError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ArchiveError::Serialization(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ArchiveError::Validation(msg.into())
    }

    pub fn download<T: Into<String>>(msg: T) -> Self {
        ArchiveError::Download(msg.into())
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        ArchiveError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        ArchiveError::Serialization(err.to_string())
    }
}

impl From<ureq::Error> for ArchiveError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(401) | ureq::Error::StatusCode(403) => {
                ArchiveError::Auth(format!("server rejected credentials ({})", err))
            }
            other => ArchiveError::Http(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for ArchiveError {
    fn from(err: config::ConfigError) -> Self {
        ArchiveError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
