use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use alerts_core::{
    update, AppState, DetailProps, LoadOutcome, Msg, SearchParams, SearchProps,
};
use alerts_logging::{alert_debug, alert_info, alert_warn};
use anyhow::Context;

use super::cli::{Action, Args};
use super::config::AppConfig;
use super::effects::{EffectRunner, Outcome};
use super::logging;
use super::ui::input::{parse_command, Command, HELP};
use super::ui::render::render;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppInput {
    /// From the engine.
    Msg(Msg),
    /// A parsed line of stdin.
    Command(Command),
    /// A line of stdin that did not parse.
    Rejected(String),
    InputClosed,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_overrides(&args);
    logging::initialize(config.log.destination, config.log_level());
    alert_info!(
        "alerts starting: api_base={} resource_base={}",
        config.api_base,
        config.resource_base
    );

    let state = AppState::with_resource_base(config.resource_base_url()?);
    let (input_tx, input_rx) = mpsc::channel();
    let runner = EffectRunner::new(&config, input_tx.clone())?;

    let mut session = Session::new(state, runner, args.interactive, io::stdout().lock());
    if args.interactive {
        spawn_input_reader(input_tx).context("starting the input reader")?;
    } else {
        drop(input_tx);
    }

    match args.action.unwrap_or_default() {
        Action::Search { params, no_loader } => {
            let params = SearchParams::from_pairs(&params)?;
            session.start_search(params, !no_loader)?;
        }
        Action::Show { id, export } => {
            session.export_on_ready = export;
            session.show(id)?;
        }
    }

    while !session.finished() {
        let Ok(input) = input_rx.recv() else {
            break;
        };
        session.handle(input)?;
    }
    alert_info!("alerts exiting");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<AppInput>) -> io::Result<()> {
    thread::Builder::new()
        .name("alerts-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let input = match line {
                    Ok(line) => match parse_command(&line) {
                        Ok(command) => AppInput::Command(command),
                        Err(err) => AppInput::Rejected(err.to_string()),
                    },
                    Err(err) => {
                        alert_warn!("stdin read failed: {}", err);
                        break;
                    }
                };
                if tx.send(input).is_err() {
                    return;
                }
            }
            let _ = tx.send(AppInput::InputClosed);
        })?;
    Ok(())
}

struct Session<W: Write> {
    /// Only `None` while `update` owns it.
    state: Option<AppState>,
    runner: EffectRunner,
    interactive: bool,
    /// Export the detail card as soon as its lookup settles.
    export_on_ready: bool,
    next_search_id: u64,
    quit: bool,
    out: W,
}

impl<W: Write> Session<W> {
    fn new(state: AppState, runner: EffectRunner, interactive: bool, out: W) -> Self {
        Self {
            state: Some(state),
            runner,
            interactive,
            export_on_ready: false,
            next_search_id: 0,
            quit: false,
            out,
        }
    }

    /// Without an input source, exit once nothing is in flight.
    fn finished(&self) -> bool {
        let busy = self.state.as_ref().is_some_and(AppState::is_busy);
        self.quit || (!self.interactive && !busy && !self.export_on_ready)
    }

    fn handle(&mut self, input: AppInput) -> anyhow::Result<()> {
        match input {
            AppInput::Msg(msg) => self.dispatch(msg),
            AppInput::Command(Command::Msg(msg)) => self.dispatch(msg),
            AppInput::Command(Command::Search(params)) => self.start_search(params, true),
            AppInput::Command(Command::Show(id)) => self.show(id),
            AppInput::Command(Command::Help) => {
                writeln!(self.out, "{HELP}")?;
                Ok(())
            }
            AppInput::Rejected(reason) => {
                writeln!(self.out, "? {reason}")?;
                Ok(())
            }
            AppInput::Command(Command::Quit) => {
                self.quit = true;
                Ok(())
            }
            AppInput::InputClosed => {
                alert_debug!("stdin closed, finishing pending work");
                self.interactive = false;
                Ok(())
            }
        }
    }

    /// Mounts the list on first use; afterwards a fresh search id re-fetches.
    fn start_search(&mut self, params: SearchParams, show_loader: bool) -> anyhow::Result<()> {
        self.next_search_id += 1;
        let search_id = self.next_search_id;
        let mounted = self.state.as_ref().and_then(AppState::search).is_some();
        let msg = if mounted {
            Msg::SearchPropsChanged { search_id, params }
        } else {
            Msg::SearchMounted(SearchProps {
                params,
                search_id,
                notify_loaded: true,
                show_loader,
            })
        };
        self.dispatch(msg)
    }

    fn show(&mut self, identifier: String) -> anyhow::Result<()> {
        self.dispatch(Msg::DetailMounted(DetailProps {
            identifier: Some(identifier),
            ..DetailProps::default()
        }))
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        alert_debug!("dispatch {:?}", msg);
        let state = self
            .state
            .take()
            .context("dispatch while a previous update is still running")?;
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let mut redraw = state.consume_dirty();
        self.state = Some(state);

        let mut notices = Vec::new();
        for outcome in self.runner.run(effects) {
            match outcome {
                Outcome::NavigatedBack => redraw = true,
                Outcome::Loaded(LoadOutcome::Loaded(result)) => {
                    alert_info!("search loaded {} of {} alerts", result.hits.len(), result.total);
                }
                Outcome::Loaded(LoadOutcome::Failed(reason)) => {
                    alert_warn!("search failed: {}", reason);
                }
                Outcome::Exported(path) => notices.push(format!("saved {}", path.display())),
                Outcome::ExportFailed(reason) => notices.push(format!("export failed: {reason}")),
            }
        }

        if redraw {
            write!(self.out, "{}", render(&view))?;
        }
        for notice in notices {
            writeln!(self.out, "{notice}")?;
        }
        self.out.flush()?;

        self.export_when_settled()
    }

    fn export_when_settled(&mut self) -> anyhow::Result<()> {
        if !self.export_on_ready {
            return Ok(());
        }
        let Some(detail) = self.state.as_ref().and_then(AppState::detail) else {
            return Ok(());
        };
        if detail.is_loading() {
            return Ok(());
        }
        self.export_on_ready = false;
        if detail.record().is_some() {
            self.dispatch(Msg::ExportRequested)?;
        }
        Ok(())
    }
}
