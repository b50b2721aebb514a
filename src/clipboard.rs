use anyhow::Result;
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;

pub const DAEMON_FLAG: &str = "__clipboard_daemon";

#[cfg(target_os = "linux")]
fn run_daemon_mode() -> Result<()> {
    let text = std::io::read_to_string(std::io::stdin())?;

    let mut clipboard = Clipboard::new()?;
    let result = clipboard.set().wait().text(text);

    match result {
        Ok(_waiter) => {
            // The waiter must stay alive for the selection to remain valid,
            // so the daemon parks forever and dies with the session.
            std::thread::park();
            unreachable!("Daemon should park indefinitely");
        }
        Err(e) => Err(anyhow::Error::from(e)),
    }
}

/// Checks if the DAEMON_FLAG is present in args. If so, runs in daemon mode and exits.
/// Returns Ok(true) if daemon mode was run (and exited), Ok(false) otherwise.
pub fn check_and_run_daemon_if_requested() -> Result<bool> {
    if std::env::args().any(|a| a == DAEMON_FLAG) {
        #[cfg(target_os = "linux")]
        {
            run_daemon_mode()?;
            return Ok(true);
        }
        #[cfg(not(target_os = "linux"))]
        {
            eprintln!(
                "Warning: {} flag used on non-Linux system. Ignoring.",
                DAEMON_FLAG
            );
            std::process::exit(0);
        }
    }
    Ok(false)
}

/// Put the confirmed selection on the clipboard. On Linux a detached copy of
/// this binary holds the selection so it outlives the picker process.
pub fn copy_text_to_clipboard(text: String) -> Result<()> {
    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
    }

    #[cfg(target_os = "linux")]
    {
        use std::io::Write;
        use std::process::{Command, Stdio};

        let mut child = Command::new(std::env::current_exe()?)
            .arg(DAEMON_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
            stdin.flush()?;
        } else {
            return Err(anyhow::anyhow!("Failed to get stdin for clipboard daemon"));
        }
    }
    Ok(())
}
