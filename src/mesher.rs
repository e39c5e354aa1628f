//! External mesh generator invocation.
//!
//! The mesher is run to completion with both output streams piped; every
//! line it prints is forwarded to the `log` facade (target `"mesher"`) as it
//! arrives. A non-zero exit status aborts the workflow with
//! [`MeshOrderError::ExternalTool`] once all output has been logged.

use crate::mesh_error::MeshOrderError;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Placeholder replaced by the domain geometry path.
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Placeholder replaced by the mesh output path.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// How to launch the mesh generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    pub executable: PathBuf,
    /// Arguments, with `{input}`/`{output}` substituted per run.
    pub args: Vec<String>,
    /// Kill the mesher after this long; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("gmsh"),
            args: ["{input}", "-2", "-format", "msh2", "-o", "{output}"]
                .into_iter()
                .map(String::from)
                .collect(),
            timeout: None,
        }
    }
}

impl MesherConfig {
    fn expand_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|a| {
                a.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }
}

/// Captured output of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MesherRun {
    /// stdout and stderr lines in arrival order.
    pub lines: Vec<String>,
}

/// Forward `stream` line by line until EOF. Bytes that are not UTF-8
/// (gmsh prints latin-1 in places) are replaced rather than ending the
/// stream, so the pipe stays drained until the mesher exits.
fn forward_lines<R: Read + Send + 'static>(
    stream: R,
    tx: mpsc::Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    while matches!(buf.last(), Some(b'\n' | b'\r')) {
                        buf.pop();
                    }
                    let line = String::from_utf8_lossy(&buf).into_owned();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!(target: "mesher", "stopped reading mesher output: {e}");
                    break;
                }
            }
        }
    })
}

fn kill_timed_out(child: &mut Child, program: String, config: &MesherConfig) -> MeshOrderError {
    let _ = child.kill();
    let _ = child.wait();
    let seconds = config.timeout.map_or(0, |t| t.as_secs());
    log::error!("{program} killed after {seconds}s");
    MeshOrderError::ExternalToolTimeout { program, seconds }
}

/// Run the mesher on `input`, expecting it to produce `output`.
pub fn run_mesher(
    config: &MesherConfig,
    input: &Path,
    output: &Path,
) -> Result<MesherRun, MeshOrderError> {
    let program = config.executable.display().to_string();
    let args = config.expand_args(input, output);
    log::info!("running mesher: {program} {}", args.join(" "));

    let mut child = Command::new(&config.executable)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| MeshOrderError::Io(format!("cannot start {program}: {e}")))?;

    let (tx, rx) = mpsc::channel();
    let mut readers = Vec::new();
    if let Some(out) = child.stdout.take() {
        readers.push(forward_lines(out, tx.clone()));
    }
    if let Some(err) = child.stderr.take() {
        readers.push(forward_lines(err, tx.clone()));
    }
    drop(tx);

    let deadline = config.timeout.map(|t| Instant::now() + t);
    let mut lines = Vec::new();
    loop {
        let received = match deadline {
            Some(deadline) => {
                let left = deadline.saturating_duration_since(Instant::now());
                rx.recv_timeout(left)
            }
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(line) => {
                log::info!(target: "mesher", "{line}");
                lines.push(line);
            }
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => return Err(kill_timed_out(&mut child, program, config)),
        }
    }
    for handle in readers {
        let _ = handle.join();
    }

    let status = match deadline {
        None => child.wait()?,
        Some(deadline) => loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                return Err(kill_timed_out(&mut child, program, config));
            }
            thread::sleep(Duration::from_millis(20));
        },
    };
    if !status.success() {
        log::error!("{program} failed with {status}; see mesher output above");
        return Err(MeshOrderError::ExternalTool {
            program,
            status: status.to_string(),
        });
    }
    if !output.exists() {
        return Err(MeshOrderError::Format(format!(
            "{program} finished but {} was not created",
            output.display()
        )));
    }
    Ok(MesherRun { lines })
}
