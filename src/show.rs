use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Opens the image with the platform viewer without waiting for it to close.
pub fn show(fimg: &Path) -> io::Result<()> {
    let mut cmd = viewer_command(fimg);
    debug!("opening {} with {:?}", fimg.display(), cmd);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "macos")]
fn viewer_command(fimg: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(fimg);
    cmd
}

#[cfg(target_os = "windows")]
fn viewer_command(fimg: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg("start").arg("").arg(fimg);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(fimg: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(fimg);
    cmd
}
