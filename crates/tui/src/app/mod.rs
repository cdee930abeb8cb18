pub mod dashboard;
pub mod form;
pub mod submission;
pub mod view;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

use dashboard::DashboardController;
use form::{ApplicationFormController, SubmitRejected};
use submission::SubmitError;
use view::{View, ViewCoordinator};

/// Messages from background tasks to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// The startup fetch finished; `true` when the snapshot was replaced.
    Refreshed(bool),
    SubmissionFinished(std::result::Result<(), SubmitError>),
}

/// Selection cursor over the dashboard list.
#[derive(Debug, Default)]
pub struct RecordSelection {
    pub selected: usize,
}

impl RecordSelection {
    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Index to highlight for a list of `len` records.
    pub fn clamped(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.selected.min(len - 1))
    }
}

#[derive(Debug)]
pub struct AppState {
    pub view: ViewCoordinator,
    pub dashboard: DashboardController,
    pub form: ApplicationFormController,
    pub selection: RecordSelection,
    pub base_url: String,
}

pub struct App {
    client: Client,
    pub state: AppState,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let state = AppState {
            view: ViewCoordinator::default(),
            dashboard: DashboardController::new(client.clone()),
            form: ApplicationFormController::default(),
            selection: RecordSelection::default(),
            base_url: client.base_url().to_string(),
        };

        Ok(Self {
            client,
            state,
            events_tx,
            events_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.start();
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    /// Kicks off the initial fetch of the loan list. The fetch runs on a
    /// background task so a slow backend never holds up the first frame.
    fn start(&mut self) {
        tracing::info!(base_url = %self.state.base_url, "starting loan intake");
        let dashboard = self.state.dashboard.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let updated = dashboard.refresh().await;
            let _ = events.send(AppEvent::Refreshed(updated));
        });
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            self.drain_events();

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Refreshed(updated) => {
                tracing::debug!(updated, "startup fetch finished");
            }
            AppEvent::SubmissionFinished(result) => {
                if result.is_ok() {
                    self.state.view.switch_to(View::Dashboard);
                }
                self.state.form.finish_submit(&result);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match map_key(key) {
            AppAction::Quit => self.should_quit = true,
            AppAction::ShowDashboard => self.show(View::Dashboard),
            AppAction::ShowApply => self.show(View::Apply),
            action => match self.state.view.current() {
                View::Dashboard => self.handle_dashboard_action(action),
                View::Apply => self.handle_apply_action(action),
            },
        }
    }

    fn show(&mut self, view: View) {
        if view == View::Apply && self.state.view.current() != View::Apply {
            self.state.form.enter();
        }
        self.state.view.switch_to(view);
    }

    fn handle_dashboard_action(&mut self, action: AppAction) {
        let len = self.state.dashboard.records().len();
        match action {
            AppAction::Up | AppAction::Input('k') => self.state.selection.select_prev(),
            AppAction::Down | AppAction::Input('j') => self.state.selection.select_next(len),
            AppAction::Input('a') => self.show(View::Apply),
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_apply_action(&mut self, action: AppAction) {
        let form = &mut self.state.form;
        match action {
            AppAction::NextField | AppAction::Down => form.focus_next(),
            AppAction::PrevField | AppAction::Up => form.focus_prev(),
            AppAction::Left => form.cycle_choice(false),
            AppAction::Right => form.cycle_choice(true),
            AppAction::Backspace => form.pop_char(),
            AppAction::Input(ch) => form.push_char(ch),
            AppAction::Submit => self.submit(),
            AppAction::Cancel => self.show(View::Dashboard),
            _ => {}
        }
    }

    /// Starts a submission on a background task. The result comes back as
    /// [`AppEvent::SubmissionFinished`].
    fn submit(&mut self) {
        let payload = match self.state.form.begin_submit() {
            Ok(payload) => payload,
            Err(SubmitRejected::InFlight) => return,
            Err(SubmitRejected::Invalid(err)) => {
                tracing::debug!(%err, "draft not submitted");
                return;
            }
        };

        let client = self.client.clone();
        let dashboard = self.state.dashboard.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = submission::submit_application(&client, &dashboard, &payload).await;
            // The receiver is gone only when the app is shutting down.
            let _ = events.send(AppEvent::SubmissionFinished(result));
        });
    }
}
