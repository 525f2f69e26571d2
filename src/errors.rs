use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Enumeration of all possible errors that can occur while generating a thumbnail
#[derive(Debug)]
pub enum ThumbnailerError {
    /// The input video does not exist. Raised before any resource is allocated.
    MissingInput(PathBuf),
    /// No usable browser executable could be found or started.
    BrowserUnavailable(BrowserError),
    Browser(BrowserError),
    Capture(CaptureError),
    Server(ServerError),
    Output(OutputError),
    Config(ConfigError),
    Other(io::Error),
}

impl ThumbnailerError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ThumbnailerError::Capture(CaptureError::Timeout(_)))
    }
}

/// Browser automation errors
#[derive(Debug)]
pub struct BrowserError {
    pub message: String,
}

impl BrowserError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Content server errors
#[derive(Debug)]
pub struct ServerError {
    pub message: String,
}

impl ServerError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors turning the exported canvas into a file on disk
#[derive(Debug)]
pub struct OutputError {
    pub message: String,
}

impl OutputError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failures of the in-page frame capture
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// Neither metadata nor a completed seek arrived within the window.
    Timeout(Duration),
    /// The video element reported a network or decode error.
    LoadFailed(String),
    /// Anything else raised while drawing or exporting the frame.
    Script(String),
}

impl fmt::Display for ThumbnailerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThumbnailerError::MissingInput(path) => {
                write!(f, "Video file does not exist: {}", path.display())
            }
            ThumbnailerError::BrowserUnavailable(err) => write!(
                f,
                "Chromium is not installed or could not be started ({}). \
                 Install it with your package manager (e.g. `apt install chromium`) \
                 or point FIRSTFRAME_CHROME at a Chrome/Chromium executable",
                err
            ),
            ThumbnailerError::Browser(err) => write!(f, "Browser error: {}", err),
            ThumbnailerError::Capture(err) => write!(f, "Capture error: {}", err),
            ThumbnailerError::Server(err) => write!(f, "Server error: {}", err),
            ThumbnailerError::Output(err) => write!(f, "Output error: {}", err),
            ThumbnailerError::Config(err) => write!(f, "Invalid configuration: {}", err),
            ThumbnailerError::Other(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Timeout(after) => write!(
                f,
                "Timeout while loading video (no frame after {:.1}s)",
                after.as_secs_f64()
            ),
            CaptureError::LoadFailed(message) => write!(f, "Error loading video: {}", message),
            CaptureError::Script(message) => write!(f, "{}", message),
        }
    }
}

impl Error for ThumbnailerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ThumbnailerError::Other(err) => Some(err),
            _ => None,
        }
    }
}
impl Error for BrowserError {}
impl Error for ServerError {}
impl Error for OutputError {}
impl Error for ConfigError {}
impl Error for CaptureError {}

// Conversion implementations
impl From<io::Error> for ThumbnailerError {
    fn from(err: io::Error) -> Self {
        ThumbnailerError::Other(err)
    }
}

impl From<BrowserError> for ThumbnailerError {
    fn from(err: BrowserError) -> Self {
        ThumbnailerError::Browser(err)
    }
}

impl From<CaptureError> for ThumbnailerError {
    fn from(err: CaptureError) -> Self {
        ThumbnailerError::Capture(err)
    }
}

impl From<ServerError> for ThumbnailerError {
    fn from(err: ServerError) -> Self {
        ThumbnailerError::Server(err)
    }
}

impl From<OutputError> for ThumbnailerError {
    fn from(err: OutputError) -> Self {
        ThumbnailerError::Output(err)
    }
}

impl From<ConfigError> for ThumbnailerError {
    fn from(err: ConfigError) -> Self {
        ThumbnailerError::Config(err)
    }
}

impl From<ThumbnailerError> for io::Error {
    fn from(err: ThumbnailerError) -> Self {
        io::Error::other(err)
    }
}

// Type alias for Result with ThumbnailerError
pub type ThumbnailerResult<T> = Result<T, ThumbnailerError>;
