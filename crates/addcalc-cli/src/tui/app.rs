//! Terminal keypad application state

use std::sync::Arc;
use std::time::Instant;

use addcalc::core::{CalcResult, Key};
use addcalc::presenter::ResultValue;
use addcalc::request::{Method, RandomIds};
use addcalc::service::ArithmeticService;
use addcalc::session::{PendingRequest, Session};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::input::TuiAction;

type Response = (u64, CalcResult<ResultValue>);

/// Keypad application: a session plus the request running in the background
pub struct App {
    session: Session,
    service: Arc<dyn ArithmeticService>,
    runtime: Handle,
    ids: RandomIds,
    pending: Option<PendingRequest>,
    tx: UnboundedSender<Response>,
    rx: UnboundedReceiver<Response>,
    notice: Option<String>,
    should_quit: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("pending", &self.pending)
            .field("notice", &self.notice)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates an app sending requests through `service` on `runtime`
    pub fn new(session: Session, service: Arc<dyn ArithmeticService>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            service,
            runtime,
            ids: RandomIds::new(),
            pending: None,
            tx,
            rx,
            notice: None,
            should_quit: false,
        }
    }

    /// The calculator session
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Short status message from the last rejected action
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the method menu is open
    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.session.menu().is_some()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies one input action
    pub fn handle(&mut self, action: TuiAction, now: Instant) {
        if action != TuiAction::None {
            self.notice = None;
        }
        match action {
            TuiAction::Key(key) => {
                self.session.press(key);
                if key == Key::Clear {
                    self.pending = None;
                }
            }
            TuiAction::BackspaceDown => self.session.backspace_down(now),
            TuiAction::BackspaceUp => self.session.backspace_up(now),
            TuiAction::ChooseMethod(index) => {
                match self.session.menu().map(|menu| menu.choose(index)) {
                    Some(Some(method)) => self.start(method),
                    Some(None) => self.notice = Some("not available for this equation".into()),
                    None => {}
                }
            }
            TuiAction::CloseMenu => self.session.close_menu(),
            TuiAction::Quit => self.should_quit = true,
            TuiAction::None => {}
        }
    }

    /// Advances the backspace hold timer
    pub fn tick(&mut self, now: Instant) {
        if self.session.tick(now) {
            self.pending = None;
        }
    }

    /// Applies every response that has arrived; returns how many
    pub fn poll_responses(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(response) = self.rx.try_recv() {
            self.apply(response);
            applied += 1;
        }
        applied
    }

    /// Waits for the next response and applies it
    pub async fn next_response(&mut self) {
        if let Some(response) = self.rx.recv().await {
            self.apply(response);
        }
    }

    fn start(&mut self, method: Method) {
        let pending = match self.session.begin(method, &mut self.ids) {
            Ok(pending) => pending,
            Err(err) => {
                self.notice = Some(err.to_string());
                return;
            }
        };
        let service = Arc::clone(&self.service);
        let request = pending.request().clone();
        let ticket = pending.ticket();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = service.add(&request).await;
            let _ = tx.send((ticket, outcome));
        });
        self.pending = Some(pending);
    }

    fn apply(&mut self, (ticket, outcome): Response) {
        match self.pending.take() {
            Some(pending) if pending.ticket() == ticket => {
                self.session.finish(&pending, outcome);
            }
            other => {
                tracing::debug!(ticket, "ignoring response for a request no longer shown");
                self.pending = other;
            }
        }
    }
}
