// src/runner/worker.rs

use super::{ExecutionResult, ScriptRunner};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunCompletion {
    pub script: PathBuf,
    pub result: ExecutionResult,
}

/// Runs at most one script at a time on a background thread.
pub struct RunWorker {
    runner: Arc<ScriptRunner>,
    stop: Arc<AtomicBool>,
    receiver: Option<Receiver<RunCompletion>>,
    current: Option<(PathBuf, Duration)>,
}

impl RunWorker {
    pub fn new(runner: ScriptRunner) -> Self {
        Self {
            runner: Arc::new(runner),
            stop: Arc::new(AtomicBool::new(false)),
            receiver: None,
            current: None,
        }
    }

    pub fn runner(&self) -> &ScriptRunner {
        &self.runner
    }

    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn current_script(&self) -> Option<&Path> {
        self.current.as_ref().map(|(script, _)| script.as_path())
    }

    pub fn start(&mut self, script: &Path, timeout: Duration) -> Result<(), String> {
        if self.is_running() {
            return Err("A script is already running".to_string());
        }

        self.stop = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = mpsc::channel();
        let runner = Arc::clone(&self.runner);
        let stop = Arc::clone(&self.stop);
        let script_path = script.to_path_buf();

        thread::Builder::new()
            .name("script-runner".to_string())
            .spawn(move || {
                let result = runner.run(&script_path, timeout, &stop);
                let _ = sender.send(RunCompletion {
                    script: script_path,
                    result,
                });
            })
            .map_err(|e| format!("Failed to start runner thread: {}", e))?;

        self.receiver = Some(receiver);
        self.current = Some((script.to_path_buf(), timeout));
        Ok(())
    }

    /// Requests termination of the in-flight run.
    pub fn stop(&self) {
        if self.is_running() {
            self.stop.store(true, Ordering::SeqCst);
        }
    }

    /// Completion of the in-flight run, if it has finished.
    pub fn poll(&mut self) -> Option<RunCompletion> {
        let received = match self.receiver.as_ref()?.try_recv() {
            Ok(completion) => Ok(completion),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(()),
        };
        Some(self.finish(received))
    }

    /// Blocks up to `limit` for the in-flight run.
    pub fn wait(&mut self, limit: Duration) -> Option<RunCompletion> {
        let received = match self.receiver.as_ref()?.recv_timeout(limit) {
            Ok(completion) => Ok(completion),
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => Err(()),
        };
        Some(self.finish(received))
    }

    fn finish(&mut self, received: Result<RunCompletion, ()>) -> RunCompletion {
        self.receiver = None;
        let (script, timeout) = self
            .current
            .take()
            .unwrap_or_else(|| (PathBuf::new(), Duration::ZERO));
        received.unwrap_or_else(|_| RunCompletion {
            script,
            result: ExecutionResult::launch_error(
                "Runner thread ended without a result".to_string(),
                timeout,
            ),
        })
    }
}
