// src/visualization/window.rs

use super::plotter::SessionPlotter;
use super::{Tab, VisualizationConfig};
use crate::config::preferences::{self, AppearanceMode, ColorTheme, Preferences};
use crate::config::Config;
use crate::course::{CourseBrowser, NoticeLevel};
use crate::utils::system;
use eframe::egui;
use std::time::Duration;

/// Repaint interval while a script runs, so completions are picked up.
const RUN_REPAINT: Duration = Duration::from_millis(100);

pub struct CourseWindow {
    browser: CourseBrowser,
    plotter: SessionPlotter,
    config: VisualizationConfig,
    preferences: Preferences,
    theme_applied: bool,
    tab: Tab,
}

impl CourseWindow {
    pub fn new(config: Config) -> Self {
        let visualization = config.visualization.clone();
        let mut browser = CourseBrowser::new(config);
        browser.reload();

        let preferences = match preferences::load_preferences(&visualization.preferences_path) {
            Ok(prefs) => prefs,
            Err(e) => {
                browser.notify(NoticeLevel::Warning, e);
                Preferences::default()
            }
        };

        Self {
            browser,
            plotter: SessionPlotter::new(),
            config: visualization,
            preferences,
            theme_applied: false,
            tab: Tab::default(),
        }
    }

    pub fn run(config: Config) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([
                    config.visualization.window_width,
                    config.visualization.window_height,
                ])
                .with_title("Procesamiento Digital de Señales Biomédicas"),
            ..Default::default()
        };

        eframe::run_native(
            "biomedical-dsp",
            options,
            Box::new(|_cc| Ok(Box::new(CourseWindow::new(config)))),
        )
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        if self.theme_applied {
            return;
        }
        let mut visuals = match self.preferences.appearance_mode {
            AppearanceMode::Dark => egui::Visuals::dark(),
            AppearanceMode::Light => egui::Visuals::light(),
            AppearanceMode::System => ctx.style().visuals.clone(),
        };
        let [r, g, b] = self.preferences.color_theme.accent_rgb();
        visuals.selection.bg_fill = egui::Color32::from_rgb(r, g, b);
        ctx.set_visuals(visuals);
        self.theme_applied = true;
    }

    fn set_preferences(&mut self, next: Preferences) {
        if next == self.preferences {
            return;
        }
        match preferences::save_preferences(&next, &self.config.preferences_path) {
            Ok(()) => {
                self.preferences = next;
                self.theme_applied = false;
            }
            Err(e) => self.browser.notify(NoticeLevel::Error, e),
        }
    }

    // -------------------------------------------------------------------------
    // PANELS
    // -------------------------------------------------------------------------

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Procesamiento Digital de Señales Biomédicas");
            ui.separator();
            if ui.button("🔄 Recargar").clicked() {
                self.browser.reload();
            }

            let mut next = self.preferences;
            egui::ComboBox::from_label("Apariencia")
                .selected_text(next.appearance_mode.label())
                .show_ui(ui, |ui| {
                    for mode in AppearanceMode::ALL {
                        ui.selectable_value(&mut next.appearance_mode, mode, mode.label());
                    }
                });
            egui::ComboBox::from_label("Tema")
                .selected_text(next.color_theme.label())
                .show_ui(ui, |ui| {
                    for theme in ColorTheme::ALL {
                        ui.selectable_value(&mut next.color_theme, theme, theme.label());
                    }
                });
            self.set_preferences(next);
        });
    }

    fn navigation(&mut self, ui: &mut egui::Ui) {
        ui.heading("Unidades");
        ui.separator();

        if self.browser.units().is_empty() {
            ui.label("No se encontraron unidades en el directorio del curso.");
            return;
        }

        let current = self.browser.selected().map(|e| e.class_number.clone());
        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for unit in self.browser.units() {
                egui::CollapsingHeader::new(&unit.name)
                    .default_open(true)
                    .show(ui, |ui| {
                        if unit.entries.is_empty() {
                            ui.weak("(sin clases)");
                        }
                        for entry in &unit.entries {
                            let selected = current.as_deref() == Some(entry.class_number.as_str());
                            let marks = format!(
                                "{}{}",
                                if entry.has_slides() { "📄" } else { "  " },
                                if entry.has_script() { "🐍" } else { "  " }
                            );
                            let text = format!("{} {}", marks, entry.display_name);
                            if ui.selectable_label(selected, text).clicked() {
                                clicked = Some(entry.clone());
                            }
                        }
                    });
            }
        });

        if let Some(entry) = clicked {
            self.browser.select(&entry);
        }
    }

    fn notices(&mut self, ui: &mut egui::Ui) {
        let mut dismiss = false;
        ui.horizontal_wrapped(|ui| {
            for notice in self.browser.notices() {
                let color = match notice.level {
                    NoticeLevel::Info => ui.visuals().text_color(),
                    NoticeLevel::Warning => egui::Color32::from_rgb(230, 160, 30),
                    NoticeLevel::Error => egui::Color32::RED,
                };
                ui.colored_label(color, &notice.message);
                ui.separator();
            }
            dismiss = ui.button("✖").clicked();
        });
        if dismiss {
            self.browser.dismiss_notices();
        }
    }

    fn slides_tab(&mut self, ui: &mut egui::Ui) {
        let slide = self.browser.selected().and_then(|e| e.slide_path.clone());
        match slide {
            Some(path) => {
                ui.label(format!("Archivo: {}", path.display()));
                if ui.button("Abrir diapositivas").clicked() {
                    let _ = self.browser.open_slides();
                }
            }
            None => {
                ui.add_enabled(false, egui::Button::new("Abrir diapositivas"));
                ui.label("Esta clase no tiene diapositivas.");
            }
        }
    }

    fn code_tab(&mut self, ui: &mut egui::Ui) {
        let has_script = self.browser.selected().map_or(false, |e| e.has_script());
        ui.horizontal(|ui| {
            let can_save = has_script && self.browser.has_unsaved_changes();
            if ui.add_enabled(can_save, egui::Button::new("💾 Guardar")).clicked() {
                if let Err(e) = self.browser.save_code() {
                    self.browser.notify(NoticeLevel::Error, e);
                }
            }
            if self.browser.has_unsaved_changes() {
                ui.weak("cambios sin guardar");
            }
        });
        if !has_script {
            ui.label("Esta clase no tiene código.");
            return;
        }
        if !self.browser.is_code_loaded() {
            ui.colored_label(egui::Color32::RED, "No se pudo cargar el código de esta clase.");
            return;
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(self.browser.code_mut())
                    .code_editor()
                    .desired_rows(30)
                    .desired_width(f32::INFINITY),
            );
        });
    }

    fn run_tab(&mut self, ui: &mut egui::Ui) {
        let has_script = self.browser.selected().map_or(false, |e| e.has_script());
        let running = self.browser.is_running();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(has_script && !running, egui::Button::new("▶ Ejecutar"))
                .clicked()
            {
                let _ = self.browser.run_current(None);
            }
            if ui.add_enabled(running, egui::Button::new("⏹ Detener")).clicked() {
                self.browser.stop_run();
            }
            if ui.add_enabled(!running, egui::Button::new("🧹 Limpiar")).clicked() {
                self.browser.clear_output();
            }
            if running {
                ui.spinner();
                ui.label("Ejecutando...");
            }
        });
        ui.separator();

        let result = match self.browser.result() {
            Some(result) => result.clone(),
            None => return,
        };

        ui.label(egui::RichText::new(result.summary()).strong());
        ui.label(format!("Duración: {:.2} s", result.duration.as_secs_f64()));

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.label(egui::RichText::new("stdout").strong());
            ui.label(egui::RichText::new(&result.stdout).monospace());
            if !result.stderr.is_empty() {
                ui.label(egui::RichText::new("stderr").strong());
                ui.colored_label(
                    egui::Color32::from_rgb(220, 80, 80),
                    egui::RichText::new(&result.stderr).monospace(),
                );
            }
            if !result.figures.is_empty() {
                ui.label(egui::RichText::new(format!("Figuras ({})", result.figures.len())).strong());
                for figure in &result.figures {
                    let name = figure
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    if ui.link(name).clicked() {
                        if let Err(e) = system::open_with_default_app(figure) {
                            self.browser.notify(NoticeLevel::Warning, e);
                        }
                    }
                }
            }
        });
    }

    fn interactive_tab(&mut self, ui: &mut egui::Ui) {
        let plot_height = self.config.plot_height;
        match self.browser.session_mut() {
            Some(session) => self.plotter.show(ui, session, plot_height),
            None => {
                ui.label("No hay una sesión interactiva para esta clase.");
            }
        }
    }
}

impl eframe::App for CourseWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);
        self.browser.poll();
        if self.browser.is_running() {
            ctx.request_repaint_after(RUN_REPAINT);
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| self.top_bar(ui));

        if !self.browser.notices().is_empty() {
            egui::TopBottomPanel::bottom("notices").show(ctx, |ui| self.notices(ui));
        }

        egui::SidePanel::left("navigation")
            .resizable(true)
            .default_width(self.config.nav_panel_width)
            .show(ctx, |ui| self.navigation(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let title = match self.browser.selected() {
                Some(entry) => entry.display_name.clone(),
                None => {
                    ui.label("Selecciona una clase en el panel izquierdo.");
                    return;
                }
            };
            ui.heading(title);
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, tab.label());
                }
            });
            ui.separator();

            match self.tab {
                Tab::Slides => self.slides_tab(ui),
                Tab::Code => self.code_tab(ui),
                Tab::Run => self.run_tab(ui),
                Tab::Interactive => self.interactive_tab(ui),
            }
        });
    }
}
