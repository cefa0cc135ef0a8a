use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use alertfeed_core::{update, AppState, DashboardSettings, DashboardViewModel, Msg, UserId};
use alertfeed_engine::{ensure_state_dir, ApiClient, EngineHandle, LocalStore, ReqwestGateway};
use anyhow::Context;
use chrono::Utc;
use feed_logging::{feed_debug, feed_info};

use super::config::{AppConfig, Args};
use super::console::{parse_command, ConsoleCommand, ConsolePresenter, HELP};
use super::effects::EffectRunner;
use super::logging;
use super::persistence::{resolve_user_id, IdentityKeeper};
use super::ui::events::{to_msg, EventContext, UiEvent};
use super::ui::render::{render, RenderCommand};

const PUMP_INTERVAL: Duration = Duration::from_millis(50);

/// Receives render output after each state change that touched the view.
pub trait Presenter {
    fn present(&mut self, commands: Vec<RenderCommand>);
}

pub struct Runtime<P: Presenter> {
    state: AppState,
    runner: EffectRunner,
    identity: IdentityKeeper,
    presenter: P,
    user_id: UserId,
}

impl<P: Presenter> Runtime<P> {
    pub fn new(
        config: &AppConfig,
        user_id: UserId,
        store: LocalStore,
        presenter: P,
    ) -> anyhow::Result<Self> {
        let gateway =
            ReqwestGateway::new(config.gateway_settings()).context("building HTTP client")?;
        let client = ApiClient::new(Arc::new(gateway), user_id);
        Self::with_client(config.dashboard_settings(), client, store, presenter)
    }

    pub fn with_client(
        settings: DashboardSettings,
        client: ApiClient,
        store: LocalStore,
        presenter: P,
    ) -> anyhow::Result<Self> {
        let user_id = client.user_id();
        let engine = EngineHandle::new(client).context("starting engine")?;
        Ok(Self {
            state: AppState::with_settings(settings),
            runner: EffectRunner::new(engine, store.clone()),
            identity: IdentityKeeper::new(store),
            presenter,
            user_id,
        })
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let mut state = std::mem::take(&mut self.state);
        state.set_now(Utc::now().naive_utc());
        let (next, effects) = update(state, msg);
        self.state = next;
        self.runner.run(effects);
        self.identity.observe(
            self.state
                .summary()
                .summary()
                .and_then(|summary| summary.user.as_ref()),
        );
        if self.state.consume_dirty() {
            let view = self.state.view();
            self.presenter
                .present(render(&view, Utc::now().naive_utc()));
        }
    }

    pub fn handle_ui(&mut self, event: UiEvent) {
        let ctx = EventContext {
            user_id: self.user_id,
            onboarding_seen: self.runner.onboarding_seen(),
        };
        if let Some(msg) = to_msg(event, &ctx) {
            self.dispatch(msg);
        }
    }

    /// Handles at most one pending message, waiting up to `timeout` for one.
    pub fn pump(&mut self, timeout: Duration) -> bool {
        match self.runner.next_msg(timeout) {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Pumps until nothing arrives for `quiet`.
    pub fn run_until_idle(&mut self, quiet: Duration) {
        while self.pump(quiet) {}
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> DashboardViewModel {
        self.state.view()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn shutdown(mut self) {
        self.dispatch(Msg::Unmounted);
        self.runner.shutdown();
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let config = AppConfig::resolve(&args)?;
    logging::initialize(
        config.log_destination,
        feed_logging::parse_level(&config.log_level),
        &config.log_file,
    );
    ensure_state_dir(&config.state_dir)
        .with_context(|| format!("preparing state dir {}", config.state_dir.display()))?;
    let store = LocalStore::new(&config.state_dir);
    let Some(user_id) = resolve_user_id(config.user_id, &store) else {
        anyhow::bail!("no user id known; pass --user-id once to sign in");
    };
    feed_info!("Starting dashboard for user {} against {}", user_id, config.api_base_url);

    let mut runtime = Runtime::new(&config, user_id, store, ConsolePresenter::default())?;
    runtime.handle_ui(UiEvent::WindowShown);
    println!("{HELP}");

    let lines = spawn_stdin_reader();
    loop {
        match lines.try_recv() {
            Ok(line) => match parse_command(&line) {
                Some(ConsoleCommand::Quit) => break,
                Some(ConsoleCommand::Help) => println!("{HELP}"),
                Some(ConsoleCommand::Event(event)) => runtime.handle_ui(event),
                None => {
                    feed_debug!("Unrecognized command: {}", line);
                    println!("Unknown command. Type 'help' for the list.");
                }
            },
            Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {}
        }
        runtime.pump(PUMP_INTERVAL);
    }

    runtime.shutdown();
    feed_info!("Dashboard closed");
    Ok(())
}
