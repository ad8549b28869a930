use std::str::FromStr;

use anyhow::Result;
use log::LevelFilter;

/// Sets up the driver's logger. The engine crate itself never logs -- this
/// is the only place in the repository that does.
pub fn init_logging(level: &str) -> Result<()> {
    let dispatch_stdout = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] - {} - [{}] {}",
                chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::from_str(level)?)
        .chain(std::io::stdout());

    let dispatch_stderr = fern::Dispatch::new()
        .level(LevelFilter::Warn)
        .filter(|metadata| metadata.target() == "cli_warnings")
        .format(|out, message, _| {
            out.finish(format_args!(
                "\x1B[{}m{}\x1B[0m",
                fern::colors::Color::Yellow.to_fg_str(),
                message
            ))
        })
        .chain(std::io::stderr());

    if fern::Dispatch::new().chain(dispatch_stdout).chain(dispatch_stderr).apply().is_err() {
        eprintln!("logger has already been set");
    }

    Ok(())
}
