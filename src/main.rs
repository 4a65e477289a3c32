use biomedical_dsp::config::{self, DEFAULT_CONFIG_FILE};
use biomedical_dsp::runner;
use biomedical_dsp::utils::log::{print_status, Status};
use biomedical_dsp::visualization::CourseWindow;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CONFIG_FILE);

    let config = match config::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            print_status(Status::Error, &format!("{}: {}", config_path, e));
            std::process::exit(1);
        }
    };

    match runner::check_interpreter(&config.runner.interpreter) {
        Ok(version) => print_status(Status::Ok, &format!("Interpreter: {}", version)),
        Err(e) => print_status(Status::Warn, &format!("{} (scripts will not run)", e)),
    }
    print_status(
        Status::Info,
        &format!("Course directory: {}", config.catalog.root_dir.display()),
    );

    if let Err(e) = CourseWindow::run(config) {
        print_status(Status::Error, &format!("Window error: {}", e));
        std::process::exit(1);
    }
}
