use std::collections::HashMap;
use std::io::BufRead;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use colored::Colorize;
use kv_rs::mvcc::{Command, CommandResult, Connection, Database};
use rustyline::config::Builder;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Editor};

use crate::config::{ConfigLoad, DEFAULT_PROMPT};
use crate::rusty::CliHelper;

/// Drives one shared [`Database`] and a table of named [`Connection`]s,
/// turning lines of the form `<conn> <verb> [args...]` into
/// `Connection::exec_command` calls.
pub struct Session {
    settings: ConfigLoad,
    db: Arc<Mutex<Database>>,
    connections: HashMap<String, Connection>,
    running: bool,
}

impl Session {
    pub fn new(settings: ConfigLoad) -> Self {
        let db = Arc::new(Mutex::new(Database::new(settings.isolation_level())));
        Session { settings, db, connections: HashMap::new(), running: true }
    }

    fn prompt(&self) -> String {
        let base = self.settings.prompt.as_deref().unwrap_or(DEFAULT_PROMPT);
        format!("{} > ", base.trim_end())
    }

    pub fn handle_repl(&mut self) {
        let editor_config = Builder::new().completion_prompt_limit(5).completion_type(CompletionType::Circular).build();
        let mut rl =
            Editor::<CliHelper, DefaultHistory>::with_config(editor_config).expect("failed to build line editor");
        rl.set_helper(Some(CliHelper::new()));
        rl.load_history(&history_path()).ok();

        println!("Welcome to kvcli.");
        println!();

        while self.running {
            match rl.readline(&self.prompt()) {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    self.handle_line(&line);
                }
                Err(ReadlineError::Interrupted) => println!("^C"),
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("{}", format!("io error: {e}").red());
                    break;
                }
            }
        }

        println!("Bye~");
        let _ = rl.save_history(&history_path());
    }

    pub fn handle_reader<R: BufRead>(&mut self, r: R) -> Result<()> {
        for line in r.lines() {
            self.handle_line(&line?);
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if line == "exit" || line == "quit" {
            self.running = false;
            return;
        }
        if let Some(rest) = line.strip_prefix('.') {
            self.handle_control(rest);
            return;
        }

        match self.dispatch(line) {
            Ok(message) => println!("{}", message.green()),
            Err(e) => eprintln!("{}", format!("error: {e}").red()),
        }
    }

    fn handle_control(&mut self, cmd: &str) {
        let mut parts = cmd.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("debug"), Some("on")) => {
                self.settings.terminal_update();
                log::set_max_level(log::LevelFilter::Debug);
            }
            (Some("debug"), Some("off")) => log::set_max_level(log::LevelFilter::Info),
            (Some("exit"), _) | (Some("quit"), _) => self.running = false,
            _ => eprintln!("{}", format!("error: unknown control command `.{cmd}`").red()),
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<String> {
        let mut parts = line.split_whitespace();
        let conn_name = parts.next().ok_or_else(|| anyhow!("missing connection name"))?;
        let verb = parts.next().ok_or_else(|| anyhow!("missing verb"))?;
        let args: Vec<&str> = parts.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "begin" => Command::Begin,
            "commit" => Command::Commit,
            "abort" => Command::Abort,
            "set" => match args.as_slice() {
                [key, value] => Command::Set(key.as_bytes().to_vec(), value.as_bytes().to_vec()),
                _ => return Err(anyhow!("usage: <conn> set <key> <value>")),
            },
            "delete" => match args.as_slice() {
                [key] => Command::Delete(key.as_bytes().to_vec()),
                _ => return Err(anyhow!("usage: <conn> delete <key>")),
            },
            "get" => match args.as_slice() {
                [key] => Command::Get(key.as_bytes().to_vec()),
                _ => return Err(anyhow!("usage: <conn> get <key>")),
            },
            "status" => match args.as_slice() {
                [] => Command::Status,
                _ => return Err(anyhow!("usage: <conn> status")),
            },
            other => return Err(anyhow!("unknown verb `{other}`")),
        };

        log::info!("{conn_name}: {command:?}");
        let db = self.db.clone();
        let conn = self.connections.entry(conn_name.to_string()).or_insert_with(|| Connection::new(db));
        let result = conn.exec_command(command).map_err(|e| anyhow!(e.to_string()))?;
        Ok(format_result(result))
    }
}

fn format_result(result: CommandResult) -> String {
    match result {
        CommandResult::TxId(id) => format!("OK, tx {id}"),
        CommandResult::Ok => "OK".to_string(),
        CommandResult::Value(v) => String::from_utf8_lossy(&v).into_owned(),
        CommandResult::Status(None) => "no active transaction".to_string(),
        CommandResult::Status(Some(state)) => format!("{state}"),
    }
}

fn history_path() -> String {
    format!("{}/.kvcli_history", std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}
