use std::process::ExitCode;

use ls_having::app;
use ls_having::app::formatter::OutputGenerator;

fn main() -> ExitCode {
    env_logger::init();

    match app::run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprint!("{}", OutputGenerator::format_error(format!("{:#}", err)));
            ExitCode::from(app::EXIT_FAILURE)
        }
    }
}
