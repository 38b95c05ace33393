//! Calculator session: keypad state plus the single outstanding request.
//!
//! The session is the one owner of [`CalcState`]. Frontends feed it key
//! events, ask it to [`Session::begin`] a request, run that request however
//! they like, and hand the outcome back to [`Session::finish`]. At most one
//! request is in flight; a long-press clear abandons it and its response is
//! dropped when it arrives.

use serde::Serialize;
use std::time::Instant;

use crate::config::CalcConfig;
use crate::core::{CalcError, CalcResult, CalcState, Finalized, Key, Step};
use crate::hold::{BackspaceHold, HoldRelease};
use crate::keypad::MethodMenu;
use crate::presenter::{on_failure, on_success, ResultValue};
use crate::request::{shape, AddRequest, IdSource, Method};
use crate::service::ArithmeticService;

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pressed {
    /// The state was edited
    Edited,
    /// `=` showed a single term as the result
    Shown,
    /// `=` on a shown result started over
    Reset,
    /// `=` opened the method menu
    MenuOpened,
}

/// A request that has been sent and not yet answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    ticket: u64,
    equation: String,
    request: AddRequest,
}

impl PendingRequest {
    /// Identifies this request within its session
    #[must_use]
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// The equation being summed
    #[must_use]
    pub fn equation(&self) -> &str {
        &self.equation
    }

    /// The shaped request to send
    #[must_use]
    pub fn request(&self) -> &AddRequest {
        &self.request
    }
}

/// Serializable view of a session
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    /// Keypad state
    #[serde(flatten)]
    pub state: &'a CalcState,
    /// Whether a request is outstanding
    pub loading: bool,
}

/// A calculator session
#[derive(Debug)]
pub struct Session {
    config: CalcConfig,
    state: CalcState,
    menu: Option<MethodMenu>,
    hold: BackspaceHold,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CalcConfig::default())
    }
}

impl Session {
    /// Creates a session with the given configuration
    #[must_use]
    pub fn new(config: CalcConfig) -> Self {
        let hold = BackspaceHold::new(config.long_press);
        Self {
            config,
            state: CalcState::new(),
            menu: None,
            hold,
            in_flight: None,
            next_ticket: 0,
        }
    }

    /// The session configuration
    #[must_use]
    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Current keypad state
    #[must_use]
    pub fn state(&self) -> &CalcState {
        &self.state
    }

    /// Whether a request is outstanding
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The open method menu, if any
    #[must_use]
    pub fn menu(&self) -> Option<&MethodMenu> {
        self.menu.as_ref()
    }

    /// The input line: the buffer with its sign
    #[must_use]
    pub fn input_display(&self) -> String {
        let sign = if self.state.is_negative() { "-" } else { "" };
        format!("{sign}{}", self.state.input())
    }

    /// Serializable view of the session
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: &self.state,
            loading: self.is_loading(),
        }
    }

    /// Feeds one key event
    pub fn press(&mut self, key: Key) -> Pressed {
        if key == Key::Clear {
            self.clear_all();
            return Pressed::Edited;
        }
        self.menu = None;
        let state = std::mem::take(&mut self.state);
        let (next, pressed) = match state.apply(key) {
            Step::Edited(next) => (next, Pressed::Edited),
            Step::Finalized(Finalized::Shown(next)) => (next, Pressed::Shown),
            Step::Finalized(Finalized::Reset(next)) => (next, Pressed::Reset),
            Step::Finalized(Finalized::Remote { state, .. }) => {
                self.menu = Some(MethodMenu::for_state(&state));
                (state, Pressed::MenuOpened)
            }
        };
        self.state = next;
        pressed
    }

    /// Closes the method menu without sending anything
    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// Wipes the keypad and abandons any outstanding request
    pub fn clear_all(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            tracing::debug!(ticket, "clear abandons outstanding request");
        }
        self.state = CalcState::new();
        self.menu = None;
    }

    /// Backspace went down
    pub fn backspace_down(&mut self, now: Instant) {
        self.hold.press(now);
    }

    /// Backspace came up; a short press deletes one character
    pub fn backspace_up(&mut self, now: Instant) {
        match self.hold.release(now) {
            HoldRelease::Short => {
                self.press(Key::Backspace);
            }
            HoldRelease::Long => self.clear_all(),
            HoldRelease::Consumed | HoldRelease::Idle => {}
        }
    }

    /// Advances the long-press timer; returns true if it just cleared
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.hold.poll(now) {
            self.clear_all();
            true
        } else {
            false
        }
    }

    /// Shapes the pending equation and marks it in flight.
    pub fn begin<S>(&mut self, method: Method, ids: &mut S) -> CalcResult<PendingRequest>
    where
        S: IdSource + ?Sized,
    {
        if self.in_flight.is_some() {
            return Err(CalcError::RequestInFlight);
        }
        let equation = self
            .state
            .candidate_equation()
            .ok_or(CalcError::NothingToCompute)?;
        let request = shape(&equation, method, ids)?;

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.menu = None;
        tracing::debug!(ticket, %equation, %method, "request in flight");

        Ok(PendingRequest {
            ticket,
            equation,
            request,
        })
    }

    /// Applies the outcome of `pending`. Returns false if the request was
    /// abandoned in the meantime and the outcome was dropped.
    pub fn finish(&mut self, pending: &PendingRequest, outcome: CalcResult<ResultValue>) -> bool {
        if self.in_flight != Some(pending.ticket) {
            tracing::debug!(ticket = pending.ticket, "dropping response for abandoned request");
            return false;
        }
        self.in_flight = None;
        let state = std::mem::take(&mut self.state);
        self.state = match outcome {
            Ok(value) => on_success(state, &pending.equation, &value),
            Err(err) => {
                tracing::info!(error = %err, equation = %pending.equation, "showing failure");
                on_failure(state, &pending.equation)
            }
        };
        true
    }

    /// Sends the pending equation through `service` and shows the outcome.
    ///
    /// A remote failure is not an error here: it ends up on display. Only
    /// problems starting the request are returned.
    pub async fn compute<A, S>(
        &mut self,
        method: Method,
        service: &A,
        ids: &mut S,
    ) -> CalcResult<()>
    where
        A: ArithmeticService + ?Sized,
        S: IdSource + ?Sized,
    {
        let pending = self.begin(method, ids)?;
        let outcome = service.add(pending.request()).await;
        self.finish(&pending, outcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::FAILURE_MESSAGE;
    use crate::request::RandomIds;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records requests and answers with a fixed outcome
    struct FakeService {
        outcome: CalcResult<ResultValue>,
        seen: Mutex<Vec<AddRequest>>,
    }

    impl FakeService {
        fn answering(outcome: CalcResult<ResultValue>) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<AddRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ArithmeticService for FakeService {
        async fn add(&self, request: &AddRequest) -> CalcResult<ResultValue> {
            self.seen.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    fn typed(keys: &[Key]) -> Session {
        let mut session = Session::default();
        for key in keys {
            session.press(*key);
        }
        session
    }

    fn two_plus_three() -> Session {
        typed(&[Key::Digit(2), Key::Plus, Key::Digit(3)])
    }

    // ===== Key handling tests =====

    #[test]
    fn test_equals_single_term_is_local() {
        let mut session = typed(&[Key::Digit(7)]);
        assert_eq!(session.press(Key::Equals), Pressed::Shown);
        assert_eq!(session.state().equation(), "7");
        assert!(session.state().showing_result());
        assert!(session.menu().is_none());
    }

    #[test]
    fn test_equals_with_terms_opens_menu() {
        let mut session = two_plus_three();
        assert_eq!(session.press(Key::Equals), Pressed::MenuOpened);
        let menu = session.menu().unwrap();
        assert!(menu.is_enabled(Method::PathParams));
        assert_eq!(session.state().equation(), "2+");
    }

    #[test]
    fn test_equals_on_result_resets() {
        let mut session = typed(&[Key::Digit(7), Key::Equals]);
        assert_eq!(session.press(Key::Equals), Pressed::Reset);
        assert_eq!(session.state(), &CalcState::new());
    }

    #[test]
    fn test_close_menu() {
        let mut session = two_plus_three();
        session.press(Key::Equals);
        session.close_menu();
        assert!(session.menu().is_none());
    }

    #[test]
    fn test_key_after_equals_closes_menu() {
        let mut session = typed(&[Key::Digit(1), Key::Plus, Key::Digit(2)]);
        session.press(Key::Equals);
        assert!(session.menu().unwrap().is_enabled(Method::PathParams));
        assert_eq!(session.press(Key::Plus), Pressed::Edited);
        assert!(session.menu().is_none());
        assert_eq!(session.state().equation(), "1+2+");
    }

    #[test]
    fn test_reopened_menu_reflects_new_terms() {
        let mut session = typed(&[Key::Digit(1), Key::Plus, Key::Digit(2)]);
        session.press(Key::Equals);
        session.press(Key::Plus);
        session.press(Key::Digit(3));
        assert_eq!(session.press(Key::Equals), Pressed::MenuOpened);
        let menu = session.menu().unwrap();
        assert!(!menu.is_enabled(Method::PathParams));
        assert_eq!(menu.choose(0), None);
        let pending = session
            .begin(Method::QueryParams, &mut RandomIds::seeded(4))
            .unwrap();
        assert_eq!(pending.equation(), "1+2+3");
    }

    #[test]
    fn test_input_display_shows_sign() {
        let session = typed(&[Key::Digit(4), Key::ToggleSign]);
        assert_eq!(session.input_display(), "-4");
    }

    // ===== Long press tests =====

    #[test]
    fn test_short_backspace() {
        let t0 = Instant::now();
        let mut session = typed(&[Key::Digit(1), Key::Digit(2)]);
        session.backspace_down(t0);
        session.backspace_up(t0 + Duration::from_millis(100));
        assert_eq!(session.state().input().as_str(), "1");
    }

    #[test]
    fn test_long_backspace_clears_and_suppresses_short() {
        let t0 = Instant::now();
        let mut session = typed(&[Key::Digit(1), Key::Plus, Key::Digit(2)]);
        session.backspace_down(t0);
        assert!(!session.tick(t0 + Duration::from_millis(999)));
        assert!(session.tick(t0 + Duration::from_millis(1000)));
        assert_eq!(session.state(), &CalcState::new());
        session.press(Key::Digit(5));
        session.backspace_up(t0 + Duration::from_millis(1200));
        assert_eq!(session.state().input().as_str(), "5");
    }

    #[test]
    fn test_long_backspace_without_tick() {
        let t0 = Instant::now();
        let mut session = typed(&[Key::Digit(1), Key::Plus, Key::Digit(2)]);
        session.backspace_down(t0);
        session.backspace_up(t0 + Duration::from_secs(2));
        assert_eq!(session.state(), &CalcState::new());
    }

    #[test]
    fn test_configured_long_press() {
        let t0 = Instant::now();
        let config = CalcConfig::new().with_long_press(Duration::from_millis(200));
        let mut session = Session::new(config);
        session.press(Key::Digit(9));
        session.backspace_down(t0);
        assert!(session.tick(t0 + Duration::from_millis(200)));
    }

    // ===== Request lifecycle tests =====

    #[test]
    fn test_begin_without_terms() {
        let mut session = typed(&[Key::Digit(7)]);
        assert_eq!(
            session.begin(Method::QueryParams, &mut RandomIds::seeded(1)),
            Err(CalcError::NothingToCompute)
        );
        assert!(!session.is_loading());
    }

    #[test]
    fn test_begin_sets_loading_and_closes_menu() {
        let mut session = two_plus_three();
        session.press(Key::Equals);
        let pending = session
            .begin(Method::PathParams, &mut RandomIds::seeded(1))
            .unwrap();
        assert!(session.is_loading());
        assert!(session.menu().is_none());
        assert_eq!(pending.equation(), "2+3");
        assert_eq!(
            pending.request(),
            &AddRequest::Path {
                first: "2".into(),
                second: "3".into()
            }
        );
    }

    #[test]
    fn test_second_request_rejected_while_in_flight() {
        let mut session = two_plus_three();
        let _pending = session
            .begin(Method::QueryParams, &mut RandomIds::seeded(1))
            .unwrap();
        assert_eq!(
            session.begin(Method::FormPost, &mut RandomIds::seeded(2)),
            Err(CalcError::RequestInFlight)
        );
    }

    #[test]
    fn test_path_params_rejected_for_three_terms() {
        let mut session = typed(&[Key::Digit(1), Key::Plus, Key::Digit(2), Key::Plus]);
        assert_eq!(
            session.begin(Method::PathParams, &mut RandomIds::seeded(1)),
            Err(CalcError::PathParamsArity { found: 3 })
        );
        assert!(!session.is_loading());
    }

    #[test]
    fn test_finish_success() {
        let mut session = two_plus_three();
        let pending = session
            .begin(Method::PathParams, &mut RandomIds::seeded(1))
            .unwrap();
        assert!(session.finish(&pending, Ok(ResultValue::from(5_i64))));
        assert_eq!(session.state().equation(), "2+3=5");
        assert!(session.state().showing_result());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_finish_failure() {
        let mut session = two_plus_three();
        let pending = session
            .begin(Method::PathParams, &mut RandomIds::seeded(1))
            .unwrap();
        assert!(session.finish(&pending, Err(CalcError::RemoteComputationFailed)));
        assert_eq!(session.state().equation(), "2+3");
        assert_eq!(session.state().error(), Some(FAILURE_MESSAGE));
        assert!(session.state().showing_result());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_clear_drops_late_response() {
        let mut session = two_plus_three();
        let pending = session
            .begin(Method::QueryParams, &mut RandomIds::seeded(1))
            .unwrap();
        session.press(Key::Clear);
        assert!(!session.is_loading());
        session.press(Key::Digit(8));
        assert!(!session.finish(&pending, Ok(ResultValue::from(5_i64))));
        assert_eq!(session.state().input().as_str(), "8");
        assert_eq!(session.state().equation(), "0");
    }

    #[test]
    fn test_keypad_stays_live_while_loading() {
        let mut session = two_plus_three();
        let pending = session
            .begin(Method::FormPost, &mut RandomIds::seeded(1))
            .unwrap();
        session.press(Key::Digit(9));
        assert_eq!(session.state().input().as_str(), "39");
        session.finish(&pending, Ok(ResultValue::from(5_i64)));
        assert_eq!(session.state().equation(), "2+3=5");
        assert_eq!(session.state().input().as_str(), "0");
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = two_plus_three();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["equation"], "2+");
        assert_eq!(json["input"], "3");
        assert_eq!(json["loading"], false);
    }

    // ===== compute tests =====

    #[tokio::test]
    async fn test_compute_path_params_success() {
        let service = FakeService::answering(Ok(ResultValue::from(5_i64)));
        let mut session = two_plus_three();
        session
            .compute(Method::PathParams, &service, &mut RandomIds::seeded(1))
            .await
            .unwrap();
        assert_eq!(
            service.seen(),
            vec![AddRequest::Path {
                first: "2".into(),
                second: "3".into()
            }]
        );
        assert_eq!(session.state().equation(), "2+3=5");
    }

    #[tokio::test]
    async fn test_compute_failure_is_displayed() {
        let service = FakeService::answering(Err(CalcError::RemoteComputationFailed));
        let mut session = two_plus_three();
        session
            .compute(Method::QueryParams, &service, &mut RandomIds::seeded(1))
            .await
            .unwrap();
        assert_eq!(session.state().equation(), "2+3");
        assert_eq!(session.state().error(), Some(FAILURE_MESSAGE));
        assert!(session.state().showing_result());
    }

    #[tokio::test]
    async fn test_compute_negative_result() {
        let service = FakeService::answering(Ok(ResultValue::from(-1.5_f64)));
        let mut session = typed(&[Key::Digit(2), Key::Plus, Key::Digit(3), Key::Decimal, Key::Digit(5), Key::ToggleSign]);
        session
            .compute(Method::FormPost, &service, &mut RandomIds::seeded(9))
            .await
            .unwrap();
        assert_eq!(session.state().equation(), "2+(-3.5)=(-1.5)");
        let seen = service.seen();
        let values: Vec<_> = seen[0].params().iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, vec!["2", "-3.5"]);
    }

    #[tokio::test]
    async fn test_compute_nothing_to_send() {
        let service = FakeService::answering(Ok(ResultValue::from(1_i64)));
        let mut session = typed(&[Key::Digit(1)]);
        let err = session
            .compute(Method::QueryParams, &service, &mut RandomIds::seeded(1))
            .await
            .unwrap_err();
        assert_eq!(err, CalcError::NothingToCompute);
        assert!(service.seen().is_empty());
    }
}
