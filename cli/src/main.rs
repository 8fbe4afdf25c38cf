mod commands;
mod prompt;
mod terminal;

use commands::{CommandLine, run};
use exposr_common::error::ScanError;
use terminal::{print, spinner};
use tracing::{error, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    spinner::init_logging(commands.quiet);
    print::banner(commands.quiet);

    let cfg = commands.into_config()?;

    if let Err(e) = run::run(&cfg).await {
        if ends_run(&e) {
            error!("{e:#}");
            print::end_of_program(cfg.quiet);
            std::process::exit(1);
        }
        warn!("{e:#}");
    }

    print::end_of_program(cfg.quiet);
    Ok(())
}

/// Fatal scan errors and errors from outside the scan taxonomy exit with status 1.
fn ends_run(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ScanError>().is_none_or(ScanError::is_fatal)
}
