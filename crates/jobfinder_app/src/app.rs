use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context, Result};
use jobfinder_core::{update, AppState, Msg, Phase, SelectedFile};
use jobfinder_engine::{read_document, DocumentError, SystemClipboard};
use jobfinder_logging::{jf_debug, jf_info};

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::ui::input::{parse_command, Command, HELP};
use crate::ui::render;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Core(Msg),
    Input(Command),
    InputClosed,
}

/// Owns the session state and applies messages to it one at a time.
pub struct App {
    state: AppState,
    runner: EffectRunner,
    last_phase: Phase,
}

impl App {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            last_phase: Phase::Idle,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies `msg`, runs its effects and returns text to print, if any.
    pub fn dispatch(&mut self, msg: Msg) -> Option<String> {
        jf_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);

        if !was_dirty {
            return None;
        }
        let view = self.state.view();
        if view.phase != self.last_phase {
            self.last_phase = view.phase;
            Some(render::render(&view))
        } else {
            Some(render::status_line(&view))
        }
    }

    /// Reads `path` and selects it. Selection itself cannot fail; only the read can.
    pub fn open(&mut self, path: &Path) -> Result<Option<String>, DocumentError> {
        let upload = read_document(path)?;
        jf_info!("Selected {} ({} bytes)", upload.file_name, upload.bytes.len());
        Ok(self.dispatch(Msg::FileSelected(SelectedFile::new(
            upload.file_name,
            upload.bytes,
        ))))
    }

    pub fn full_view(&self) -> String {
        render::render(&self.state.view())
    }
}

fn build_app(config: &AppConfig, events: mpsc::Sender<AppEvent>) -> Result<App> {
    let runner = EffectRunner::new(
        config.analysis_settings(),
        Box::new(SystemClipboard::new()),
        events,
    )
    .context("starting analysis engine")?;
    Ok(App::new(runner))
}

/// Analyzes one file and prints the outcome. Fails when the analysis fails.
pub fn run_batch(config: &AppConfig, path: &Path, copy: bool) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut app = build_app(config, tx)?;

    app.open(path)
        .with_context(|| format!("reading {}", path.display()))?;
    app.dispatch(Msg::AnalyzeClicked);
    eprintln!("Analyzing {}...", path.display());

    while app.state().phase() == Phase::Submitting {
        match rx.recv() {
            Ok(AppEvent::Core(msg)) => {
                app.dispatch(msg);
            }
            Ok(_) => {}
            Err(_) => bail!("analysis engine stopped"),
        }
    }

    if copy && app.state().phase() == Phase::Succeeded {
        app.dispatch(Msg::CopyCoverLetterClicked);
    }
    print!("{}", app.full_view());

    let session = app.state().session();
    if session.phase() == Phase::Failed {
        bail!("{}", session.error_message());
    }
    Ok(())
}

/// Line-driven session: reads commands from stdin until `quit` or EOF.
pub fn run_interactive(config: &AppConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut app = build_app(config, tx.clone())?;

    thread::Builder::new()
        .name("jobfinder-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if let Some(command) = parse_command(&line) {
                    if tx.send(AppEvent::Input(command)).is_err() {
                        return;
                    }
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        })
        .context("starting input thread")?;

    println!("{HELP}");
    print!("{}", app.full_view());
    flush();

    while let Ok(event) = rx.recv() {
        let output = match event {
            AppEvent::Core(msg) => app.dispatch(msg),
            AppEvent::Input(Command::Quit) | AppEvent::InputClosed => break,
            AppEvent::Input(command) => handle_command(&mut app, command),
        };
        if let Some(text) = output {
            println!("{}", text.trim_end());
            flush();
        }
    }

    jf_info!("Session ended");
    Ok(())
}

fn handle_command(app: &mut App, command: Command) -> Option<String> {
    match command {
        Command::Open(path) => match app.open(&path) {
            Ok(output) => output,
            Err(err) => Some(format!("Could not open {}: {err}", path.display())),
        },
        Command::Analyze => {
            let output = app.dispatch(Msg::AnalyzeClicked);
            output.or_else(|| Some(not_now(app.state().phase())))
        }
        Command::Copy => {
            if app.state().phase() != Phase::Succeeded {
                return Some("Nothing to copy yet.".to_string());
            }
            app.dispatch(Msg::CopyCoverLetterClicked)
                .or_else(|| Some("Copied!".to_string()))
        }
        Command::Show => Some(app.full_view()),
        Command::Help => Some(HELP.to_string()),
        Command::Unknown(line) => Some(format!("Unknown command: {line} (try `help`)")),
        Command::Quit => None,
    }
}

fn not_now(phase: Phase) -> String {
    match phase {
        Phase::Idle => "Choose a resume first with `open <path>`.".to_string(),
        Phase::Submitting => "Already analyzing; please wait.".to_string(),
        Phase::Succeeded | Phase::Failed => {
            "Open a resume again to start a new analysis.".to_string()
        }
        Phase::FileSelected => String::new(),
    }
}

fn flush() {
    let _ = io::stdout().flush();
}
