use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI and dispatch.
    match cli::run_from_args().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("uloady: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
