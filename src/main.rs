use std::process::ExitCode;

fn main() -> ExitCode {
    match market_feeds::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mkt: {} error: {err}", err.kind().label());
            ExitCode::from(err.exit_code())
        }
    }
}
