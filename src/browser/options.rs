use std::path::PathBuf;

/// Flags every capture browser is started with.
///
/// The sandbox needs privileges automation hosts rarely have, nobody is there
/// to give the gesture autoplay wants, and the video comes from another origin
/// than the `about:blank` document.
pub const DEFAULT_BROWSER_ARGS: [&str; 5] = [
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--autoplay-policy=no-user-gesture-required",
    "--disable-web-security",
    "--disable-features=IsolateOrigins,site-per-process",
];

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Browser binary. Auto-detected when `None`.
    pub executable: Option<PathBuf>,
    /// Appended after [`DEFAULT_BROWSER_ARGS`].
    pub extra_args: Vec<String>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            extra_args: Vec::new(),
        }
    }
}

impl LaunchOptions {
    /// Full command-line flag list.
    pub fn args(&self) -> Vec<String> {
        DEFAULT_BROWSER_ARGS
            .iter()
            .map(|arg| arg.to_string())
            .chain(self.extra_args.iter().cloned())
            .collect()
    }
}
