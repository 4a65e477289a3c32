use std::path::Path;
use std::process::{Command, Stdio};

/// Command that opens `path` with the desktop's default application.
pub fn default_app_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Opens `path` without waiting for the viewer to exit.
pub fn open_with_default_app(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }
    default_app_command(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_refused_before_spawning() {
        let err = open_with_default_app(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(err.starts_with("File not found"));
    }

    #[test]
    fn command_targets_the_path() {
        let command = default_app_command(Path::new("slides.pdf"));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args.last().and_then(|a| a.to_str()), Some("slides.pdf"));
    }
}
