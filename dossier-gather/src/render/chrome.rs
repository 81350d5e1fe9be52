//! Headless Chromium renderer.
//!
//! Launches one Chromium process per render with `--dump-dom` and a
//! throw-away profile directory. The process and the profile are owned by
//! the render future: the child is spawned with `kill_on_drop`, and the
//! profile is a [`tempfile::TempDir`], so both are released when the call
//! returns, fails, or is cancelled by the timeout.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;

use super::PageRenderer;
use crate::error::GatherError;
use crate::http;

/// Default Chromium executable name, resolved through `PATH`.
pub const DEFAULT_CHROME_BIN: &str = "chromium";

/// How long Chromium lets scripts and network activity settle before
/// dumping the DOM, unless the page budget is shorter.
const DEFAULT_SETTLE: Duration = Duration::from_secs(5);

/// Renders pages by spawning a headless Chromium per call.
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    chrome_bin: PathBuf,
    user_agent: Option<String>,
    settle: Duration,
}

impl Default for ChromeRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CHROME_BIN)
    }
}

impl ChromeRenderer {
    /// Create a renderer using the given Chromium executable.
    pub fn new(chrome_bin: impl Into<PathBuf>) -> Self {
        Self {
            chrome_bin: chrome_bin.into(),
            user_agent: None,
            settle: DEFAULT_SETTLE,
        }
    }

    /// Send a fixed User-Agent from the browser. With `None`, each render
    /// picks one from the rotation list.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Override the script/network settle window.
    #[must_use]
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Command-line arguments for one render.
    fn args(&self, url: &str, profile_dir: &std::path::Path, timeout: Duration) -> Vec<String> {
        let settle = self.settle.min(timeout);
        let mut args = vec![
            "--headless=new".to_owned(),
            "--no-sandbox".to_owned(),
            "--disable-gpu".to_owned(),
            "--disable-dev-shm-usage".to_owned(),
            "--hide-scrollbars".to_owned(),
            "--mute-audio".to_owned(),
            format!("--user-data-dir={}", profile_dir.display()),
            format!("--timeout={}", timeout.as_millis()),
            format!("--virtual-time-budget={}", settle.as_millis()),
        ];
        // Without a flag Chromium sends its own `HeadlessChrome` UA.
        let ua = match self.user_agent {
            Some(ref custom) => custom.as_str(),
            None => http::random_user_agent(),
        };
        args.push(format!("--user-agent={ua}"));
        args.push("--dump-dom".to_owned());
        args.push(url.to_owned());
        args
    }
}

impl PageRenderer for ChromeRenderer {
    async fn fetch_html(&self, url: &str, timeout: Duration) -> Result<String, GatherError> {
        let profile = tempfile::Builder::new()
            .prefix("dossier-chrome-")
            .tempdir()
            .map_err(|e| GatherError::Render(format!("failed to create profile dir: {e}")))?;

        tracing::debug!(url, bin = %self.chrome_bin.display(), "launching headless chromium");

        let output = Command::new(&self.chrome_bin)
            .args(self.args(url, profile.path(), timeout))
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                GatherError::Render(format!(
                    "failed to run {}: {e}",
                    self.chrome_bin.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let first_line = stderr.lines().next().unwrap_or_default();
            return Err(GatherError::Render(format!(
                "chromium exited with {}: {first_line}",
                output.status
            )));
        }

        // `profile` is removed here; on cancellation it is removed on drop.
        drop(profile);

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &'static str {
        "chrome"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn args_end_with_dump_dom_and_url() {
        let renderer = ChromeRenderer::default();
        let args = renderer.args(
            "https://example.com",
            Path::new("/tmp/profile"),
            Duration::from_secs(15),
        );
        assert_eq!(args[args.len() - 2], "--dump-dom");
        assert_eq!(args[args.len() - 1], "https://example.com");
        assert!(args.contains(&"--user-data-dir=/tmp/profile".to_owned()));
        assert!(args.contains(&"--timeout=15000".to_owned()));
    }

    #[test]
    fn settle_window_is_capped_by_timeout() {
        let renderer = ChromeRenderer::default().with_settle(Duration::from_secs(30));
        let args = renderer.args("https://a.com", Path::new("/tmp/p"), Duration::from_secs(2));
        assert!(args.contains(&"--virtual-time-budget=2000".to_owned()));
    }

    #[test]
    fn user_agent_defaults_to_rotation_list() {
        let plain = ChromeRenderer::default();
        let args = plain.args("https://a.com", Path::new("/tmp/p"), Duration::from_secs(5));
        let ua = args
            .iter()
            .find_map(|a| a.strip_prefix("--user-agent="))
            .expect("user agent flag");
        assert!(ua.starts_with("Mozilla/5.0"));
        assert!(!ua.contains("HeadlessChrome"));
    }

    #[test]
    fn configured_user_agent_is_used() {
        let custom = ChromeRenderer::default().with_user_agent(Some("DossierBot/1.0".into()));
        let args = custom.args("https://a.com", Path::new("/tmp/p"), Duration::from_secs(5));
        assert!(args.contains(&"--user-agent=DossierBot/1.0".to_owned()));
    }

    #[tokio::test]
    async fn missing_binary_is_render_error() {
        let renderer = ChromeRenderer::new("/nonexistent/dossier-chromium");
        let err = renderer
            .fetch_html("https://example.com", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to run"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdout_is_returned_as_dom() {
        // `echo` prints its arguments, standing in for `--dump-dom` output.
        let renderer = ChromeRenderer::new("echo");
        let html = renderer
            .fetch_html("https://example.com/page", Duration::from_secs(5))
            .await
            .expect("echo should succeed");
        assert!(html.contains("https://example.com/page"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_render_error() {
        let renderer = ChromeRenderer::new("false");
        let err = renderer
            .fetch_html("https://example.com", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("chromium exited"));
    }

    #[tokio::test]
    #[ignore] // Needs a local Chromium: run with `cargo test -- --ignored`
    async fn live_chromium_render() {
        let renderer = ChromeRenderer::default();
        let html = renderer
            .fetch_html("https://example.com/", Duration::from_secs(20))
            .await
            .expect("chromium should render");
        assert!(html.contains("Example Domain"));
    }
}
