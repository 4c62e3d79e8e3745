use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use app_logging::{app_info, app_warn};
use clap::Parser;
use recognizer_core::{update, AppState, AppViewModel, Msg, PickedFile};

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::files::picked_file;
use super::logging;
use super::ui::commands::{self, Command};
use super::ui::{constants, render};

/// Everything the main loop reacts to, in arrival order.
pub enum AppEvent {
    Input(String),
    Msg(Msg),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    config.apply_cli(&cli);
    let level = config.level_filter()?;
    logging::initialize(config.log, level, &config.log_path)
        .with_context(|| format!("cannot open log file {:?}", config.log_path))?;
    app_info!("Starting action-recognizer with {:?}", config);

    let settings = config.client_settings()?;
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(settings, config.launch_player, event_tx.clone())
        .context("cannot start recognizer client")?;
    spawn_input_reader(event_tx)?;

    let mut shell = Shell::new(runner);
    println!("Action recognizer. Type `help` for commands.");
    shell.dispatch(Msg::Started);
    if cli.files.is_empty() || !shell.pick(&cli.files) {
        shell.render();
    }

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Input(line) => {
                if !shell.handle_line(&line) {
                    break;
                }
            }
            AppEvent::Msg(msg) => {
                shell.dispatch(msg);
            }
            AppEvent::InputClosed => break,
        }
    }

    app_info!("Shutting down");
    Ok(())
}

fn spawn_input_reader(events: mpsc::Sender<AppEvent>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if events.send(AppEvent::Input(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        app_warn!("stdin read failed: {}", err);
                        break;
                    }
                }
            }
            let _ = events.send(AppEvent::InputClosed);
        })
        .context("cannot start input thread")?;
    Ok(())
}

struct Shell {
    state: AppState,
    view: AppViewModel,
    effects: EffectRunner,
}

impl Shell {
    fn new(effects: EffectRunner) -> Self {
        let state = AppState::default();
        let view = state.view();
        Self {
            state,
            view,
            effects,
        }
    }

    /// Returns `false` once the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let rendered = match commands::parse(line, &self.view) {
            Ok(Some(Command::Dispatch(msgs))) => msgs
                .into_iter()
                .fold(false, |rendered, msg| self.dispatch(msg) || rendered),
            Ok(Some(Command::Pick(paths))) => self.pick(&paths),
            Ok(Some(Command::Help)) => {
                println!("{}", constants::HELP);
                false
            }
            Ok(Some(Command::Quit)) => return false,
            Ok(None) => false,
            Err(hint) => {
                println!("{hint}");
                false
            }
        };
        if !rendered {
            prompt();
        }
        true
    }

    fn pick(&mut self, paths: &[PathBuf]) -> bool {
        let files: Vec<PickedFile> = paths
            .iter()
            .filter_map(|path| match picked_file(path) {
                Ok(file) => Some(file),
                Err(err) => {
                    println!("Skipping {}: {err}", path.display());
                    None
                }
            })
            .collect();
        if files.is_empty() {
            println!("No readable files to pick.");
            return false;
        }
        self.dispatch(Msg::FilesPicked(files))
    }

    /// Runs one message through the reducer; re-renders and returns `true` when state changed.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.effects.enqueue(effects);

        if was_dirty {
            self.view = self.state.view();
            self.render();
        }
        was_dirty
    }

    fn render(&self) {
        for line in render::render(&self.view) {
            println!("{line}");
        }
        prompt();
    }
}

fn prompt() {
    print!("{}", constants::PROMPT);
    let _ = io::stdout().flush();
}
