use std::io::{stdin, IsTerminal};

use anyhow::Result;
use clap::Parser;
use kvcli::config::ConfigLoad;
use kvcli::session::Session;
use kvcli::trace;
use log::info;

#[derive(Debug, Parser, PartialEq)]
#[command(author, version, about)]
pub struct Args {
    #[clap(short, long, help = "debug mode")]
    debug: bool,

    /// Configuration file path, default 'config/kvdb.toml'
    #[clap(short = 'c', long = "config", help = "Configuration file path", default_value = "config/kvdb.toml")]
    config: String,

    #[clap(short = 'l', long, default_value = "info")]
    log_level: String,

    #[clap(short = 'n', long, help = "Force non-interactive mode", default_value = "false")]
    non_interactive: bool,

    #[clap(long, require_equals = true, help = "Line to execute, e.g. \"c1 begin\"")]
    query: Option<String>,
}

pub fn main() -> Result<()> {
    setup_panic_hook();

    eprintln!();
    eprintln!("██  ██  █        █");
    eprintln!("██ ██   ██      ██");
    eprintln!("███      ██    ██");
    eprintln!("██ ██     ██  ██");
    eprintln!("██  ██     ████  KV Storage CLI");
    eprintln!();

    let args = Args::parse();

    trace::init_logging(&args.log_level)?;
    info!("kvcli start args: {:?}", &args);

    let mut cfg = ConfigLoad::load(&args.config);
    if args.debug {
        cfg.debug = Some(true);
        println!("{:?}", &cfg);
        eprintln!();
    }
    info!("kvcli start config: {:?}", &cfg);

    ctrlc::set_handler(|| println!("received Ctrl+C!")).expect("Error setting Ctrl-C handler");

    let is_terminal = stdin().is_terminal();
    let is_repl = is_terminal && !args.non_interactive && args.query.is_none();
    if is_repl {
        cfg.terminal_update();
    }

    let mut session = Session::new(cfg);

    info!("kvcli starting, is_repl={}", is_repl);

    if is_repl {
        session.handle_repl();
        return Ok(());
    }

    match args.query {
        None => session.handle_reader(stdin().lock()),
        Some(query) => session.handle_reader(std::io::Cursor::new(query)),
    }
}

fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log::error!(target: "cli_warnings", "{info}");
        default_hook(info);
    }));
}
