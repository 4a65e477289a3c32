// src/course/mod.rs

use crate::catalog::{self, CatalogEntry, Unit};
use crate::config::Config;
use crate::runner::worker::{RunCompletion, RunWorker};
use crate::runner::{ExecutionResult, ScriptRunner};
use crate::session::PlotSession;
use crate::utils::log::{self, Status};
use crate::utils::system;
use chrono::Local;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message for the user, shown by the shell until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Course state independent of any UI: catalog, selection, editor buffer,
/// script runs and the interactive session of the selected class.
pub struct CourseBrowser {
    config: Config,
    units: Vec<Unit>,
    selected: Option<CatalogEntry>,
    code: String,
    saved_code: String,
    /// False when the selected script could not be read into `code`.
    code_loaded: bool,
    result: Option<ExecutionResult>,
    worker: RunWorker,
    session: Option<PlotSession>,
    notices: Vec<Notice>,
}

impl CourseBrowser {
    pub fn new(config: Config) -> Self {
        let worker = RunWorker::new(ScriptRunner::new(config.runner.clone()));
        Self {
            config,
            units: Vec::new(),
            selected: None,
            code: String::new(),
            saved_code: String::new(),
            code_loaded: false,
            result: None,
            worker,
            session: None,
            notices: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn selected(&self) -> Option<&CatalogEntry> {
        self.selected.as_ref()
    }

    pub fn result(&self) -> Option<&ExecutionResult> {
        self.result.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_running()
    }

    pub fn session(&self) -> Option<&PlotSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut PlotSession> {
        self.session.as_mut()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn dismiss_notices(&mut self) {
        self.notices.clear();
    }

    pub fn notify(&mut self, level: NoticeLevel, message: String) {
        self.notices.push(Notice { level, message });
    }

    // -------------------------------------------------------------------------
    // CATALOG
    // -------------------------------------------------------------------------

    /// Rescans the course root. On failure the previous catalog is kept.
    pub fn reload(&mut self) -> bool {
        match catalog::scan(&self.config.catalog.root_dir, &self.config.catalog) {
            Ok(units) => {
                let entries: usize = units.iter().map(|u| u.entries.len()).sum();
                self.log(&format!("Catalog: {} units, {} classes", units.len(), entries));
                self.units = units;
                true
            }
            Err(e) => {
                self.notify(NoticeLevel::Error, e);
                false
            }
        }
    }

    /// Makes `entry` current. An in-flight run is stopped and its result
    /// will be discarded.
    pub fn select(&mut self, entry: &CatalogEntry) {
        if self.worker.is_running() {
            self.worker.stop();
        }
        self.result = None;
        self.code.clear();
        self.saved_code.clear();
        self.code_loaded = false;

        if let Some(script) = &entry.script_path {
            match fs::read_to_string(script) {
                Ok(text) => {
                    self.code = text.clone();
                    self.saved_code = text;
                    self.code_loaded = true;
                }
                Err(e) => self.notify(
                    NoticeLevel::Error,
                    format!("No se pudo leer {}: {}", script.display(), e),
                ),
            }
        }

        self.session = entry.number().and_then(PlotSession::for_class);
        self.selected = Some(entry.clone());
    }

    /// Selects the entry with `class_number` ("07") in any unit.
    pub fn select_class(&mut self, class_number: &str) -> bool {
        match catalog::find_entry(&self.units, class_number).map(|(_, e)| e.clone()) {
            Some(entry) => {
                self.select(&entry);
                true
            }
            None => false,
        }
    }

    pub fn open_slides(&mut self) -> Result<(), String> {
        let slide = self
            .selected
            .as_ref()
            .and_then(|e| e.slide_path.clone())
            .ok_or_else(|| "La clase seleccionada no tiene diapositivas".to_string());
        let opened = slide.and_then(|path| system::open_with_default_app(&path));
        if let Err(e) = &opened {
            self.notify(NoticeLevel::Warning, e.clone());
        }
        opened
    }

    // -------------------------------------------------------------------------
    // CODE EDITOR
    // -------------------------------------------------------------------------

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn code_mut(&mut self) -> &mut String {
        &mut self.code
    }

    pub fn set_code(&mut self, code: String) {
        self.code = code;
    }

    pub fn is_code_loaded(&self) -> bool {
        self.code_loaded
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.code != self.saved_code
    }

    pub fn save_code(&mut self) -> Result<(), String> {
        let script = self
            .selected
            .as_ref()
            .and_then(|e| e.script_path.clone())
            .ok_or_else(|| "La clase seleccionada no tiene código".to_string())?;
        if !self.code_loaded {
            return Err(format!(
                "No se pudo cargar {}; el archivo no se sobrescribe",
                script.display()
            ));
        }
        fs::write(&script, &self.code)
            .map_err(|e| format!("No se pudo guardar {}: {}", script.display(), e))?;
        self.saved_code = self.code.clone();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // RUNS
    // -------------------------------------------------------------------------

    /// Saves the editor buffer and starts the current script in the background.
    /// `None` uses the configured timeout.
    pub fn run_current(&mut self, timeout: Option<Duration>) -> Result<(), String> {
        let started = self.start_run(timeout);
        if let Err(e) = &started {
            self.notify(NoticeLevel::Warning, e.clone());
        }
        started
    }

    fn start_run(&mut self, timeout: Option<Duration>) -> Result<(), String> {
        if self.worker.is_running() {
            return Err("Ya hay una ejecución en curso".to_string());
        }
        let script = self
            .selected
            .as_ref()
            .and_then(|e| e.script_path.clone())
            .ok_or_else(|| "La clase seleccionada no tiene código".to_string())?;
        self.save_code()?;

        let timeout = timeout.unwrap_or_else(|| self.worker.runner().default_timeout());
        self.result = None;
        self.worker.start(&script, timeout)?;
        self.log(&format!("Running {} (timeout {} s)", script.display(), timeout.as_secs()));
        Ok(())
    }

    pub fn stop_run(&mut self) {
        if self.worker.is_running() {
            self.log("⏹️ Solicitando detener ejecución...");
            self.worker.stop();
        }
    }

    pub fn clear_output(&mut self) {
        self.result = None;
    }

    /// Collects a finished run. Returns true when a result for the current
    /// script was stored.
    pub fn poll(&mut self) -> bool {
        match self.worker.poll() {
            Some(completion) => self.complete(completion),
            None => false,
        }
    }

    /// Blocking variant of `poll`, bounded by `limit`.
    pub fn wait_for_run(&mut self, limit: Duration) -> bool {
        match self.worker.wait(limit) {
            Some(completion) => self.complete(completion),
            None => false,
        }
    }

    fn complete(&mut self, completion: RunCompletion) -> bool {
        let RunCompletion { script, result } = completion;
        self.record_run(&script, &result);

        let is_current = self
            .selected
            .as_ref()
            .and_then(|e| e.script_path.as_deref())
            .map_or(false, |current| current == script.as_path());
        if is_current {
            self.result = Some(result);
        }
        is_current
    }

    // -------------------------------------------------------------------------
    // LOGGING
    // -------------------------------------------------------------------------

    fn record_run(&self, script: &Path, result: &ExecutionResult) {
        let summary = result.summary();
        log::print_status(
            if result.succeeded() { Status::Ok } else { Status::Warn },
            &format!("{}: {}", script.display(), summary),
        );

        let logging = &self.config.logging;
        if !logging.enabled {
            return;
        }
        let record = log::RunRecord {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            script: script.display().to_string(),
            outcome: result.outcome.label().to_string(),
            exit_code: result.exit_code,
            duration_ms: result.duration.as_millis() as u64,
            figures: result.figures.len(),
        };
        if let Err(e) = log::append_run_history(&logging.directory, &logging.run_history_file, &record) {
            log::print_status(Status::Warn, &e);
        }
        let body = format!(
            "{}\n--- stdout ---\n{}\n--- stderr ---\n{}",
            summary, result.stdout, result.stderr
        );
        if let Err(e) = log::log_with_header(
            &logging.directory,
            &logging.log_file,
            &script.display().to_string(),
            &body,
        ) {
            log::print_status(Status::Warn, &format!("Failed to write log: {}", e));
        }
    }

    fn log(&self, message: &str) {
        let logging = &self.config.logging;
        if !logging.enabled {
            return;
        }
        if let Err(e) = log::log_to_file(&logging.directory, &logging.log_file, message) {
            log::print_status(Status::Warn, &format!("Failed to write log: {}", e));
        }
    }
}
