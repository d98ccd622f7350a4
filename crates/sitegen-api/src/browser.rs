//! Browser navigation for preview and download references.
//!
//! Downloading a generated site is a plain navigation to the archive URL:
//! the browser performs the transfer and the client never sees the bytes.

use std::process::Command;

use sitegen_core::prelude::*;

/// Open `url` in the system browser (cross-platform, fire-and-forget).
///
/// If `browser` is non-empty it is used as the browser command, otherwise the
/// platform-default opener is used. Returns once the opener has been spawned.
pub fn open_url(url: &str, browser: &str) -> Result<()> {
    let mut command = opener_command(url, browser)?;
    command
        .spawn()
        .map_err(|e| Error::browser(format!("{}: {}", program_name(&command), e)))?;
    debug!("Opened {} in browser", url);
    Ok(())
}

/// Navigate to a project's download reference.
pub fn trigger_download(download_url: &str, browser: &str) -> Result<()> {
    info!("Downloading {}", download_url);
    open_url(download_url, browser)
}

fn opener_command(url: &str, browser: &str) -> Result<Command> {
    let browser = browser.trim();
    if !browser.is_empty() {
        let mut command = Command::new(browser);
        command.arg(url);
        return Ok(command);
    }

    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(url);
        return Ok(command);
    }

    #[cfg(target_os = "linux")]
    {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        return Ok(command);
    }

    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        return Ok(command);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = url;
        return Err(Error::browser(
            "no browser opener available for this platform",
        ));
    }

    #[allow(unreachable_code)]
    Err(Error::browser("no browser opener available"))
}

fn program_name(command: &Command) -> String {
    command.get_program().to_string_lossy().into_owned()
}
