//! External program execution.
//!
//! Every tool the build pipeline drives goes through [`run`]: the program is
//! spawned directly (no shell), with an explicit working directory, extra
//! environment, closed stdin and captured output. An optional deadline kills
//! the child if it does not exit in time; whatever it printed until then is
//! kept in the error.

use crate::error::{Result, ScriptoriumError};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long the output readers may take to finish after a killed child.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Result of executing an external program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Stdout followed by stderr, as shown to users on failure.
    pub fn combined_output(&self) -> String {
        combine(&self.stdout, &self.stderr)
    }
}

fn combine(stdout: &str, stderr: &str) -> String {
    let mut out = stdout.to_string();
    if !stderr.is_empty() {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(stderr);
    }
    out
}

/// Options for program execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory of the child. The parent's directory never changes.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with the inherited environment).
    pub env: HashMap<String, String>,

    /// Deadline for the child (None = wait forever).
    pub timeout: Option<Duration>,
}

impl CommandOptions {
    /// Options running in `cwd` with the given deadline.
    pub fn in_dir(cwd: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            env: HashMap::new(),
            timeout,
        }
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Run `program` with `args`, capturing its output.
///
/// A non-zero exit is *not* an error here; see [`run_checked`]. Spawn
/// failures and deadline expiry are.
pub fn run<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    tracing::debug!(
        program,
        args = ?args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()).collect::<Vec<_>>(),
        cwd = ?options.cwd,
        "Running command"
    );

    let mut child = cmd
        .spawn()
        .map_err(|e| ScriptoriumError::ToolInvocationFailed {
            tool: program.to_string(),
            code: None,
            diagnostic: format!("could not start {}: {}", program, e),
        })?;

    let stdout_capture = Capture::spawn(child.stdout.take());
    let stderr_capture = Capture::spawn(child.stderr.take());

    let Some(status) = wait_with_deadline(&mut child, program, options.timeout)? else {
        let stdout = stdout_capture.finish_within(DRAIN_GRACE);
        let stderr = stderr_capture.finish_within(DRAIN_GRACE);
        return Err(ScriptoriumError::ToolTimedOut {
            tool: program.to_string(),
            seconds: options.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            diagnostic: combine(&stdout, &stderr),
        });
    };

    let stdout = stdout_capture.finish();
    let stderr = stderr_capture.finish();
    let duration = start.elapsed();

    tracing::debug!(program, code = ?status.code(), ?duration, "Command finished");

    Ok(CommandResult {
        exit_code: status.code(),
        stdout,
        stderr,
        duration,
        success: status.success(),
    })
}

/// Run `program` and turn a non-zero exit into
/// [`ScriptoriumError::ToolInvocationFailed`] carrying the captured output.
pub fn run_checked<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let result = run(program, args, options)?;
    if result.success {
        Ok(result)
    } else {
        Err(ScriptoriumError::ToolInvocationFailed {
            tool: program.to_string(),
            code: result.exit_code,
            diagnostic: result.combined_output(),
        })
    }
}

/// A pipe read to its end on a background thread.
///
/// Bytes land in a shared buffer as they arrive, so the output read so far
/// is available even if the reader never finishes.
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<()>,
}

impl Capture {
    fn spawn<R: Read + Send + 'static>(pipe: Option<R>) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buf);
        let handle = thread::spawn(move || {
            let Some(mut pipe) = pipe else {
                return;
            };
            let mut chunk = [0u8; 8192];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => match sink.lock() {
                        Ok(mut buf) => buf.extend_from_slice(&chunk[..n]),
                        Err(_) => break,
                    },
                }
            }
        });
        Self { buf, handle }
    }

    /// Wait for the pipe to close and return everything read.
    fn finish(self) -> String {
        let Self { buf, handle } = self;
        let _ = handle.join();
        Self::read_buf(&buf)
    }

    /// Like [`finish`](Self::finish), but give up waiting after `grace`.
    ///
    /// A grandchild holding the pipe open keeps the reader alive; it is left
    /// detached and exits once the pipe closes.
    fn finish_within(self, grace: Duration) -> String {
        let deadline = Instant::now() + grace;
        while !self.handle.is_finished() && Instant::now() < deadline {
            thread::sleep(POLL_INTERVAL);
        }
        if self.handle.is_finished() {
            return self.finish();
        }
        tracing::debug!("Output reader still running after grace period");
        self.contents()
    }

    fn contents(&self) -> String {
        Self::read_buf(&self.buf)
    }

    fn read_buf(buf: &Mutex<Vec<u8>>) -> String {
        buf.lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

/// Wait for `child`, killing it at the deadline. `None` means it was killed.
fn wait_with_deadline(
    child: &mut Child,
    program: &str,
    timeout: Option<Duration>,
) -> Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return Ok(Some(child.wait()?));
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            tracing::warn!(program, ?timeout, "Command exceeded its deadline and was killed");
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
