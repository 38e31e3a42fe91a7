//! Flow runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Handlers and timers send `UiEvent`s to `inbox_tx`; the runtime drains
//! `inbox_rx` each frame and feeds the events through the reducer.
//!
//! Structure:
//! - `mod.rs`: `FlowDriver` (state + effect execution) and `TuiRuntime`
//!   (terminal event loop around a driver)
//! - `inbox.rs`: Inbox channel types
//! - `handlers.rs`: Backend and storage handlers
//! - `timers.rs`: Countdown ticker and resend hold timer

mod handlers;
mod inbox;
mod timers;

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use crib_core::api::BackendClient;
use crib_core::session::VerificationSession;
use crib_core::store::CredentialStore;
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, FlowSettings};
use crate::terminal::{self, CribTerminal};
use crate::{render, update};

/// Frame cadence while something is animating.
pub const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(200);

/// State plus the services effects need. Knows nothing about the terminal.
pub struct FlowDriver {
    pub state: AppState,
    client: BackendClient,
    store: CredentialStore,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    countdown_cancel: Option<CancellationToken>,
    hold_cancel: Option<CancellationToken>,
}

impl FlowDriver {
    pub fn new(
        session: VerificationSession,
        settings: FlowSettings,
        client: BackendClient,
        store: CredentialStore,
    ) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(session, settings),
            client,
            store,
            inbox_tx,
            inbox_rx,
            countdown_cancel: None,
            hold_cancel: None,
        }
    }

    /// Enters the session, starting the first countdown.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.dispatch(UiEvent::SessionEntered { at: Instant::now() });
    }

    pub fn should_quit(&self) -> bool {
        self.state.tui.should_quit
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    /// Moves everything waiting in the inbox into `events`.
    fn drain_inbox(&mut self, events: &mut Vec<UiEvent>) {
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }
    }

    /// Cancels both timers. In-flight requests are left to finish; their
    /// results are dropped by the reducer.
    pub fn shutdown(&mut self) {
        cancel(&mut self.countdown_cancel);
        cancel(&mut self.hold_cancel);
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler whose result is wrapped in `TaskCompleted`.
    fn spawn_task<Fut>(&self, kind: TaskKind, id: TaskId, fut: Fut)
    where
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let inner = fut.await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            // Timers
            UiEffect::StartCountdown {
                generation,
                deadline,
            } => {
                cancel(&mut self.countdown_cancel);
                let token = CancellationToken::new();
                self.countdown_cancel = Some(token.clone());
                tokio::spawn(timers::run_countdown(
                    generation,
                    deadline,
                    self.state.tui.settings.tick_period,
                    self.inbox_tx.clone(),
                    token,
                ));
            }
            UiEffect::StopCountdown => cancel(&mut self.countdown_cancel),
            UiEffect::ScheduleResendReset { generation, delay } => {
                cancel(&mut self.hold_cancel);
                let token = CancellationToken::new();
                self.hold_cancel = Some(token.clone());
                tokio::spawn(timers::run_resend_hold(
                    generation,
                    delay,
                    self.inbox_tx.clone(),
                    token,
                ));
            }
            UiEffect::CancelResendReset => cancel(&mut self.hold_cancel),

            // Backend
            UiEffect::SubmitVerification { task, user_id, otp } => {
                let client = self.client.clone();
                self.spawn_task(
                    TaskKind::Verify,
                    task,
                    handlers::verify_code(client, user_id, otp),
                );
            }
            UiEffect::RequestResend {
                task,
                email,
                user_id,
            } => {
                let client = self.client.clone();
                self.spawn_task(
                    TaskKind::Resend,
                    task,
                    handlers::resend_code(client, email, user_id),
                );
            }

            // Storage
            UiEffect::PersistCredentials { task } => {
                let store = self.store.clone();
                let session = self.state.tui.session.clone();
                self.spawn_task(
                    TaskKind::Persist,
                    task,
                    handlers::persist_credentials(store, session),
                );
            }
        }
    }

    /// Feeds inbox events through the reducer until `done` holds.
    #[cfg(test)]
    async fn run_until(&mut self, done: impl Fn(&AppState) -> bool) {
        while !done(&self.state) {
            let event = self
                .inbox_rx
                .recv()
                .await
                .expect("inbox closed while waiting");
            self.dispatch(event);
        }
    }
}

impl Drop for FlowDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn cancel(token: &mut Option<CancellationToken>) {
    if let Some(token) = token.take() {
        token.cancel();
    }
}

/// Full-screen runtime around a `FlowDriver`.
///
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: CribTerminal,
    pub driver: FlowDriver,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
}

impl TuiRuntime {
    pub fn new(driver: FlowDriver) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        Ok(Self {
            terminal,
            driver,
            last_tick: std::time::Instant::now(),
        })
    }

    /// Runs the main event loop until the flow quits.
    pub fn run(&mut self) -> Result<()> {
        self.driver.start();
        let result = self.event_loop();
        self.driver.shutdown();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.driver.should_quit() {
            let events = self.collect_events()?;
            for event in events {
                if !matches!(event, UiEvent::Tick) {
                    dirty = true;
                }
                self.driver.dispatch(event);
                if self.driver.should_quit() {
                    break;
                }
            }

            if dirty && !self.driver.should_quit() {
                self.terminal.draw(|frame| {
                    render::render(&self.driver.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects inbox events, terminal input and the frame tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.driver.state.tui.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        self.driver.drain_inbox(&mut events);

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
