use std::io::Read as _;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::composite::encoder::EncoderCommand;
use crate::foundation::error::{AsymError, AsymResult};

/// Observed state of a spawned process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Still running.
    Running,
    /// Exited. `code` is `None` when the process was killed by a signal.
    Exited {
        /// Exit code.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
}

/// Narrow process-management contract used by the composite pipeline.
pub trait ProcessHost {
    /// Opaque handle to a spawned process.
    type Handle;

    /// Start `command` without waiting for it.
    fn spawn(&mut self, command: &EncoderCommand) -> AsymResult<Self::Handle>;

    /// Non-blocking status check.
    fn poll(&mut self, handle: &mut Self::Handle) -> AsymResult<ProcessStatus>;

    /// Release the handle. Does not terminate a process that is still running.
    fn close(&mut self, handle: Self::Handle);
}

/// Filesystem operations used for sequence discovery and cleanup.
pub trait FileSystem {
    /// Names (not paths) of regular files in `dir` whose name matches the `*`/`?` wildcard
    /// `pattern`, in unspecified order.
    fn list_files(&self, dir: &Path, pattern: &str) -> AsymResult<Vec<String>>;

    /// Delete one file.
    fn remove_file(&mut self, path: &Path) -> AsymResult<()>;

    /// `true` when `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Spawns real OS processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProcessHost;

/// A child process plus the thread draining its stderr.
#[derive(Debug)]
pub struct SystemProcess {
    child: Child,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl SystemProcess {
    /// OS process id.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    fn collect_stderr(&mut self) -> String {
        let Some(handle) = self.stderr_drain.take() else {
            return String::new();
        };
        match handle.join() {
            Ok(Ok(bytes)) => String::from_utf8_lossy(&bytes).trim().to_owned(),
            Ok(Err(e)) => format!("<stderr read failed: {e}>"),
            Err(_) => "<stderr drain thread panicked>".to_owned(),
        }
    }
}

impl ProcessHost for SystemProcessHost {
    type Handle = SystemProcess;

    fn spawn(&mut self, command: &EncoderCommand) -> AsymResult<SystemProcess> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            AsymError::composite(format!(
                "failed to launch encoder '{}': {e}",
                command.program.display()
            ))
        })?;

        // A full stderr pipe would block the encoder before it exits.
        let stderr_drain = child.stderr.take().map(|mut stderr| {
            std::thread::spawn(move || -> std::io::Result<Vec<u8>> {
                let mut bytes = Vec::new();
                stderr.read_to_end(&mut bytes)?;
                Ok(bytes)
            })
        });

        Ok(SystemProcess {
            child,
            stderr_drain,
        })
    }

    fn poll(&mut self, handle: &mut SystemProcess) -> AsymResult<ProcessStatus> {
        let status = handle
            .child
            .try_wait()
            .map_err(|e| AsymError::composite(format!("failed to query encoder status: {e}")))?;
        Ok(match status {
            None => ProcessStatus::Running,
            Some(status) => ProcessStatus::Exited {
                code: status.code(),
                stderr: handle.collect_stderr(),
            },
        })
    }

    fn close(&mut self, handle: SystemProcess) {
        tracing::trace!(pid = handle.id(), "closing encoder handle");
        drop(handle);
    }
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn list_files(&self, dir: &Path, pattern: &str) -> AsymResult<Vec<String>> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to list directory '{}'", dir.display()))?;

        let mut out = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("failed to read entry in '{}'", dir.display()))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if wildcard_match(pattern, &name) {
                out.push(name);
            }
        }
        Ok(out)
    }

    fn remove_file(&mut self, path: &Path) -> AsymResult<()> {
        std::fs::remove_file(path)
            .with_context(|| format!("failed to delete '{}'", path.display()))?;
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Match `text` against a wildcard `pattern` where `*` matches any run of characters and `?`
/// exactly one. Matching is case-sensitive.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

#[cfg(test)]
#[path = "../../tests/unit/composite/host.rs"]
mod tests;
