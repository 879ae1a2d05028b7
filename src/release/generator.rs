//! Artwork generator programs
//!
//! A generator is any executable invoked as `<path> <width> <height>` that
//! prints plotter commands on stdout and exits 0. Its stderr goes straight to
//! the operator's terminal.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Drawing width handed to every generator, in device units
pub const ART_WIDTH: u32 = 2150;

/// Drawing height handed to every generator, in device units
pub const ART_HEIGHT: u32 = 1700;

/// Result of running a generator to completion
#[derive(Debug)]
pub enum GeneratorRun {
    /// Exited 0; holds everything printed to stdout
    Succeeded(Vec<u8>),

    /// Could not be spawned (`None`) or exited non-zero
    Failed { exit_code: Option<i32> },
}

/// An external program producing one artwork instance
pub struct Generator {
    path: PathBuf,
}

impl Generator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the path is a regular file with an execute bit
    pub fn is_usable(&self) -> bool {
        self.path.is_file() && is_executable(&self.path)
    }

    /// Runs the generator and waits for it to exit
    pub fn run(&self, width: u32, height: u32) -> GeneratorRun {
        let output = Command::new(&self.path)
            .arg(width.to_string())
            .arg(height.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output();

        match output {
            Ok(output) if output.status.success() => GeneratorRun::Succeeded(output.stdout),
            Ok(output) => GeneratorRun::Failed {
                exit_code: output.status.code(),
            },
            Err(_) => GeneratorRun::Failed { exit_code: None },
        }
    }
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = path.metadata() {
            return meta.permissions().mode() & 0o111 != 0;
        }
    }

    #[cfg(windows)]
    {
        if let Some(ext) = path.extension() {
            return ext == "exe" || ext == "bat" || ext == "cmd";
        }
    }

    false
}
