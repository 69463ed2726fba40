use std::process::ExitCode;

fn main() -> ExitCode {
    match klondike_engine::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("klondike: {err}");
            ExitCode::FAILURE
        }
    }
}
