// src/runner/mod.rs

pub mod worker;

use crate::config::RunnerConfig;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long output readers may keep running after the child is reaped.
const READER_GRACE: Duration = Duration::from_millis(500);

static RUN_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exit code is `None` when the process was ended by a signal.
    Completed { exit_code: Option<i32> },
    TimedOut,
    Stopped,
    LaunchError,
}

impl RunOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::Completed { .. } => "completed",
            RunOutcome::TimedOut => "timed out",
            RunOutcome::Stopped => "stopped",
            RunOutcome::LaunchError => "launch error",
        }
    }
}

/// Per-run directory handed to the script for its figures. Removed with
/// its contents when the last result referring to it is dropped.
#[derive(Debug)]
pub struct FigureDir {
    path: PathBuf,
}

impl FigureDir {
    fn create() -> Result<Self, String> {
        let path = std::env::temp_dir().join(format!(
            "biomedical-dsp-{}-{}",
            std::process::id(),
            RUN_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        if path.exists() {
            let _ = fs::remove_dir_all(&path);
        }
        fs::create_dir_all(&path)
            .map_err(|e| format!("Failed to create figure directory {}: {}", path.display(), e))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FigureDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub figures: Vec<PathBuf>,
    pub outcome: RunOutcome,
    pub error: Option<String>,
    pub duration: Duration,
    pub timeout: Duration,
    pub pid: Option<u32>,
    figure_dir: Option<Arc<FigureDir>>,
}

impl ExecutionResult {
    pub fn launch_error(message: String, timeout: Duration) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            figures: Vec::new(),
            outcome: RunOutcome::LaunchError,
            error: Some(message),
            duration: Duration::ZERO,
            timeout,
            pid: None,
            figure_dir: None,
        }
    }

    /// Folder holding `figures`; it lives as long as this result (or a clone).
    pub fn figure_dir(&self) -> Option<&Path> {
        self.figure_dir.as_deref().map(FigureDir::path)
    }

    pub fn succeeded(&self) -> bool {
        self.outcome == RunOutcome::Completed { exit_code: Some(0) }
    }

    /// Status line shown under the run output.
    pub fn summary(&self) -> String {
        match &self.outcome {
            RunOutcome::Completed { exit_code: Some(0) } => {
                "✅ Ejecución completada exitosamente".to_string()
            }
            RunOutcome::Completed { exit_code: Some(code) } => {
                format!("⚠️ Código de salida: {}", code)
            }
            RunOutcome::Completed { exit_code: None } => {
                "⚠️ Proceso terminado por una señal".to_string()
            }
            RunOutcome::TimedOut => format!(
                "⏰ Ejecución detenida: Timeout de {} segundos",
                self.timeout.as_secs()
            ),
            RunOutcome::Stopped => "⏹️ Ejecución detenida por el usuario".to_string(),
            RunOutcome::LaunchError => format!(
                "❌ Error de ejecución: {}",
                self.error.as_deref().unwrap_or("desconocido")
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// SCRIPT RUNNER
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ScriptRunner {
    config: RunnerConfig,
}

impl ScriptRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// Runs `script` in its own folder until it exits, `timeout` elapses or
    /// `stop` is raised. Every failure is reported inside the result.
    pub fn run(&self, script: &Path, timeout: Duration, stop: &AtomicBool) -> ExecutionResult {
        let started = Instant::now();
        let script = match script.canonicalize() {
            Ok(path) if path.is_file() => path,
            Ok(path) => {
                return ExecutionResult::launch_error(
                    format!("{} is not a file", path.display()),
                    timeout,
                )
            }
            Err(e) => {
                return ExecutionResult::launch_error(
                    format!("Script not found {}: {}", script.display(), e),
                    timeout,
                )
            }
        };
        let working_dir = script
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let figure_dir = match FigureDir::create() {
            Ok(dir) => dir,
            Err(e) => return ExecutionResult::launch_error(e, timeout),
        };

        let mut command = Command::new(&self.config.interpreter);
        command
            .args(&self.config.interpreter_args)
            .arg(&script)
            .current_dir(&working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env(&self.config.figure_env_var, figure_dir.path());
        for (key, value) in &self.config.extra_env {
            command.env(key, value);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                return ExecutionResult::launch_error(
                    format!("Failed to start {}: {}", self.config.interpreter, e),
                    timeout,
                )
            }
        };
        let pid = child.id();

        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let poll_interval = Duration::from_millis(self.config.poll_interval_ms.max(1));
        let (outcome, error) = supervise(&mut child, started, timeout, stop, poll_interval);

        let deadline = Instant::now() + READER_GRACE;
        let stdout = stdout.map(|r| r.finish(deadline)).unwrap_or_default();
        let stderr = stderr.map(|r| r.finish(deadline)).unwrap_or_default();

        let exit_code = match outcome {
            RunOutcome::Completed { exit_code } => exit_code,
            _ => None,
        };

        ExecutionResult {
            stdout,
            stderr,
            exit_code,
            figures: collect_figures(figure_dir.path(), &self.config.figure_extensions),
            outcome,
            error,
            duration: started.elapsed(),
            timeout,
            pid: Some(pid),
            figure_dir: Some(Arc::new(figure_dir)),
        }
    }
}

/// Polls the child until it exits; on timeout or stop it is killed and reaped.
fn supervise(
    child: &mut Child,
    started: Instant,
    timeout: Duration,
    stop: &AtomicBool,
    poll_interval: Duration,
) -> (RunOutcome, Option<String>) {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return (completed(status), None),
            Ok(None) => {}
            Err(e) => {
                terminate(child);
                return (
                    RunOutcome::LaunchError,
                    Some(format!("Error checking process: {}", e)),
                );
            }
        }

        if stop.load(Ordering::SeqCst) {
            terminate(child);
            return (RunOutcome::Stopped, None);
        }
        if started.elapsed() >= timeout {
            terminate(child);
            return (
                RunOutcome::TimedOut,
                Some(format!("Timeout de {} segundos", timeout.as_secs())),
            );
        }
        thread::sleep(poll_interval);
    }
}

fn completed(status: ExitStatus) -> RunOutcome {
    RunOutcome::Completed {
        exit_code: status.code(),
    }
}

fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

struct OutputReader {
    buffer: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<()>,
}

impl OutputReader {
    /// Output collected so far; a reader still blocked after `deadline`
    /// (a grandchild holding the pipe) is left behind.
    fn finish(self, deadline: Instant) -> String {
        while !self.handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        if self.handle.is_finished() {
            let _ = self.handle.join();
        }
        let bytes = self
            .buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let text = String::from_utf8_lossy(&bytes).into_owned();
        text
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> OutputReader {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);
    let handle = thread::spawn(move || {
        let mut chunk = [0u8; 4096];
        loop {
            match pipe.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => sink
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .extend_from_slice(&chunk[..n]),
            }
        }
    });
    OutputReader { buffer, handle }
}

/// Image files left in `dir` by the script, sorted by name.
pub fn collect_figures(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut figures: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(read) => read
            .filter_map(|item| item.ok().map(|i| i.path()))
            .filter(|p| p.is_file())
            .filter(|p| {
                p.extension().map_or(false, |ext| {
                    let ext = ext.to_string_lossy();
                    extensions.iter().any(|e| ext.eq_ignore_ascii_case(e))
                })
            })
            .collect(),
        Err(_) => Vec::new(),
    };
    figures.sort();
    figures
}

/// Version string reported by `interpreter --version`.
pub fn check_interpreter(interpreter: &str) -> Result<String, String> {
    let output = Command::new(interpreter)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| format!("Interpreter '{}' not available: {}", interpreter, e))?;
    if !output.status.success() {
        return Err(format!(
            "Interpreter '{}' exited with {}",
            interpreter, output.status
        ));
    }
    // older interpreters print the version on stderr
    let mut version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        version = String::from_utf8_lossy(&output.stderr).trim().to_string();
    }
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(outcome: RunOutcome) -> ExecutionResult {
        let mut result = ExecutionResult::launch_error("boom".to_string(), Duration::from_secs(60));
        result.outcome = outcome;
        result
    }

    #[test]
    fn summaries_distinguish_outcomes() {
        assert_eq!(
            result_with(RunOutcome::Completed { exit_code: Some(0) }).summary(),
            "✅ Ejecución completada exitosamente"
        );
        assert_eq!(
            result_with(RunOutcome::Completed { exit_code: Some(2) }).summary(),
            "⚠️ Código de salida: 2"
        );
        assert_eq!(
            result_with(RunOutcome::TimedOut).summary(),
            "⏰ Ejecución detenida: Timeout de 60 segundos"
        );
        assert_eq!(
            result_with(RunOutcome::LaunchError).summary(),
            "❌ Error de ejecución: boom"
        );
        assert_ne!(
            result_with(RunOutcome::Stopped).summary(),
            result_with(RunOutcome::TimedOut).summary()
        );
    }

    #[test]
    fn missing_script_is_a_launch_error() {
        let runner = ScriptRunner::new(RunnerConfig::default());
        let stop = AtomicBool::new(false);
        let result = runner.run(
            Path::new("/no/such/dir/Clase 01.py"),
            Duration::from_secs(1),
            &stop,
        );
        assert_eq!(result.outcome, RunOutcome::LaunchError);
        assert!(result.error.unwrap().starts_with("Script not found"));
        assert!(result.pid.is_none());
    }

    #[test]
    fn figures_filtered_by_extension_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.SVG", "notes.txt", "c.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let figures = collect_figures(dir.path(), &["png".to_string(), "svg".to_string()]);
        let names: Vec<_> = figures
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.SVG", "b.png", "c.png"]);
    }

    #[test]
    fn figure_dir_outlives_clones_and_goes_with_the_last() {
        let dir = FigureDir::create().unwrap();
        let path = dir.path().to_path_buf();
        fs::write(path.join("fig.png"), b"x").unwrap();

        let mut result = result_with(RunOutcome::Completed { exit_code: Some(0) });
        result.figure_dir = Some(Arc::new(dir));
        let copy = result.clone();
        drop(result);
        assert!(path.join("fig.png").is_file());
        assert_eq!(copy.figure_dir(), Some(path.as_path()));

        drop(copy);
        assert!(!path.exists());
    }
}
