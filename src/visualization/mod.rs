// src/visualization/mod.rs

pub mod plotter;
pub mod window;

pub use crate::config::VisualizationConfig;
pub use plotter::SessionPlotter;
pub use window::CourseWindow;

/// Tabs of the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    Slides,
    #[default]
    Code,
    Run,
    Interactive,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Slides, Tab::Code, Tab::Run, Tab::Interactive];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Slides => "📄 Diapositivas",
            Tab::Code => "🐍 Código",
            Tab::Run => "▶ Ejecución",
            Tab::Interactive => "📈 Interactivo",
        }
    }
}
