//! Client-side state machine for one detection session:
//! `Idle -> ImageSelected -> Submitting -> ResultReady | Failed -> (reset) -> Idle`.
//!
//! The session owns the selected image handle. Handles are released by
//! dropping them, so a handle type that frees a browser resource on `Drop`
//! (an object URL, for instance) is released on replacement, rejection and
//! reset without any extra bookkeeping.

use crate::detection::{DetectionError, DetectionResult};
use strum_macros::Display;

pub const INVALID_IMAGE_MESSAGE: &str = "Please select a valid image file.";
pub const NO_IMAGE_MESSAGE: &str = "Please select an image before submitting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionState {
    Idle,
    ImageSelected,
    Submitting,
    ResultReady,
    Failed,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Not an image media type: {0:?}")]
    InvalidMediaType(String),
    #[error("No image selected")]
    NoImage,
    #[error("A detection request is already in progress")]
    Busy,
}

/// Identifies one submission. Completions carrying an outdated ticket are
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// What the caller needs to issue the single outbound request.
pub struct PendingSubmission<'a, H> {
    pub ticket: SubmissionTicket,
    pub image: &'a H,
}

// Result and error share one slot so they can never be set together.
#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Empty,
    Ready(DetectionResult),
    Error(String),
}

pub struct DetectionSession<H> {
    state: SessionState,
    image: Option<H>,
    outcome: Outcome,
    in_flight: Option<SubmissionTicket>,
    submissions: u64,
}

impl<H> Default for DetectionSession<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> DetectionSession<H> {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            image: None,
            outcome: Outcome::Empty,
            in_flight: None,
            submissions: 0,
        }
    }

    /// Accepts the file when `media_type` is an image type; `open` is only
    /// called for accepted files. A rejected file also releases whatever was
    /// held before.
    pub fn select_image<F>(&mut self, media_type: &str, open: F) -> Result<(), SessionError>
    where
        F: FnOnce() -> H,
    {
        self.in_flight = None;
        self.image = None;

        if !is_image_media_type(media_type) {
            log::warn!("Rejected non-image file with media type {:?}", media_type);
            self.outcome = Outcome::Error(INVALID_IMAGE_MESSAGE.to_string());
            self.transition(SessionState::Idle);
            return Err(SessionError::InvalidMediaType(media_type.to_string()));
        }

        self.image = Some(open());
        self.outcome = Outcome::Empty;
        self.transition(SessionState::ImageSelected);
        Ok(())
    }

    pub fn submit(&mut self) -> Result<PendingSubmission<'_, H>, SessionError> {
        if self.state == SessionState::Submitting {
            log::warn!("Ignoring submit while a detection request is in flight");
            return Err(SessionError::Busy);
        }

        let image = match self.image.as_ref() {
            Some(image) => image,
            None => {
                self.outcome = Outcome::Error(NO_IMAGE_MESSAGE.to_string());
                return Err(SessionError::NoImage);
            }
        };

        self.submissions += 1;
        let ticket = SubmissionTicket(self.submissions);
        self.in_flight = Some(ticket);
        self.outcome = Outcome::Empty;
        log::debug!("Session {} -> {}", self.state, SessionState::Submitting);
        self.state = SessionState::Submitting;

        Ok(PendingSubmission { ticket, image })
    }

    /// Applies the outcome of the request issued for `ticket`. Returns `false`
    /// when the ticket is stale and nothing changed.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<DetectionResult, DetectionError>,
    ) -> bool {
        if self.state != SessionState::Submitting || self.in_flight != Some(ticket) {
            log::warn!("Discarding stale detection outcome for {:?}", ticket);
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                self.outcome = Outcome::Ready(result);
                self.transition(SessionState::ResultReady);
            }
            Err(error) => {
                log::warn!("Detection failed: {}", error);
                self.outcome = Outcome::Error(error.user_message());
                self.transition(SessionState::Failed);
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.image = None;
        self.outcome = Outcome::Empty;
        self.in_flight = None;
        self.transition(SessionState::Idle);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == SessionState::Submitting
    }

    pub fn image(&self) -> Option<&H> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&DetectionResult> {
        match &self.outcome {
            Outcome::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Error(message) => Some(message),
            _ => None,
        }
    }

    fn transition(&mut self, next: SessionState) {
        log::debug!("Session {} -> {}", self.state, next);
        self.state = next;
    }
}

pub fn is_image_media_type(media_type: &str) -> bool {
    let media_type = media_type.trim();
    media_type.len() > "image/".len()
        && media_type
            .get(.."image/".len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{DETECTION_FAILED_MESSAGE, Threshold, interpret_response};
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Stands in for an object URL: counts how many handles were released.
    struct TrackedHandle {
        name: &'static str,
        released: Rc<Cell<usize>>,
    }

    impl Drop for TrackedHandle {
        fn drop(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn opener(
        name: &'static str,
        released: &Rc<Cell<usize>>,
    ) -> impl FnOnce() -> TrackedHandle {
        let released = Rc::clone(released);
        move || TrackedHandle { name, released }
    }

    fn ok_result() -> Result<DetectionResult, DetectionError> {
        interpret_response(200, r#"{"prediction":"YW5ub3RhdGVk","threshold":"0.82"}"#)
    }

    fn session_in(state: SessionState) -> DetectionSession<TrackedHandle> {
        let released = Rc::new(Cell::new(0));
        let mut session = DetectionSession::new();
        match state {
            SessionState::Idle => {}
            SessionState::ImageSelected => {
                session.select_image("image/png", opener("a.png", &released)).unwrap();
            }
            SessionState::Submitting => {
                session.select_image("image/png", opener("a.png", &released)).unwrap();
                session.submit().unwrap();
            }
            SessionState::ResultReady | SessionState::Failed => {
                session.select_image("image/png", opener("a.png", &released)).unwrap();
                let ticket = session.submit().unwrap().ticket;
                let outcome = if state == SessionState::ResultReady {
                    ok_result()
                } else {
                    Err(DetectionError::Network("offline".into()))
                };
                session.complete(ticket, outcome);
            }
        }
        assert_eq!(session.state(), state);
        session
    }

    #[test]
    fn starts_idle_and_empty() {
        let session: DetectionSession<TrackedHandle> = DetectionSession::default();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.image().is_none());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(!session.is_busy());
    }

    #[rstest]
    #[case("image/png", true)]
    #[case("image/jpeg", true)]
    #[case(" IMAGE/GIF ", true)]
    #[case("image/", false)]
    #[case("text/plain", false)]
    #[case("", false)]
    #[case("application/image", false)]
    fn recognises_image_media_types(#[case] media_type: &str, #[case] expected: bool) {
        assert_eq!(is_image_media_type(media_type), expected);
    }

    #[test]
    fn full_success_scenario() {
        let released = Rc::new(Cell::new(0));
        let mut session = DetectionSession::new();

        session.select_image("image/png", opener("cat.png", &released)).unwrap();
        assert_eq!(session.state(), SessionState::ImageSelected);
        assert!(session.error().is_none());

        let pending = session.submit().unwrap();
        assert_eq!(pending.image.name, "cat.png");
        let ticket = pending.ticket;
        assert!(session.is_busy());

        assert!(session.complete(ticket, ok_result()));
        assert_eq!(session.state(), SessionState::ResultReady);
        let result = session.result().unwrap();
        assert_eq!(result.renderable_image, "data:image/jpeg;base64,YW5ub3RhdGVk");
        assert_eq!(result.threshold, Some(Threshold::Text("0.82".into())));
        assert!(session.error().is_none());
        assert_eq!(session.image().map(|h| h.name), Some("cat.png"));
        assert_eq!(released.get(), 0);

        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.image().is_none());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn non_image_file_is_rejected_without_opening_a_handle() {
        let released = Rc::new(Cell::new(0));
        let mut session: DetectionSession<TrackedHandle> = DetectionSession::new();

        let err = session
            .select_image("text/plain", || panic!("handle must not be opened"))
            .unwrap_err();

        assert_eq!(err, SessionError::InvalidMediaType("text/plain".into()));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.image().is_none());
        assert_eq!(session.error(), Some(INVALID_IMAGE_MESSAGE));
        assert_eq!(released.get(), 0);
    }

    #[test]
    fn rejected_file_releases_previous_image_and_result() {
        let mut session = session_in(SessionState::ResultReady);
        session.select_image("application/pdf", || unreachable!()).unwrap_err();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.image().is_none());
        assert!(session.result().is_none());
        assert_eq!(session.error(), Some(INVALID_IMAGE_MESSAGE));
    }

    #[rstest]
    #[case(SessionState::Idle)]
    #[case(SessionState::ImageSelected)]
    #[case(SessionState::ResultReady)]
    #[case(SessionState::Failed)]
    fn selecting_an_image_clears_prior_outcome(#[case] state: SessionState) {
        let released = Rc::new(Cell::new(0));
        let mut session = session_in(state);
        session.select_image("image/jpeg", opener("dog.jpg", &released)).unwrap();

        assert_eq!(session.state(), SessionState::ImageSelected);
        assert!(session.error().is_none());
        assert!(session.result().is_none());
        assert_eq!(session.image().map(|h| h.name), Some("dog.jpg"));
    }

    #[test]
    fn replacing_an_image_releases_the_previous_one() {
        let released = Rc::new(Cell::new(0));
        let mut session = DetectionSession::new();
        session.select_image("image/png", opener("first.png", &released)).unwrap();
        session.select_image("image/png", opener("second.png", &released)).unwrap();

        assert_eq!(released.get(), 1);
        assert_eq!(session.image().map(|h| h.name), Some("second.png"));
    }

    #[test]
    fn submit_without_image_sets_validation_error() {
        let mut session: DetectionSession<TrackedHandle> = DetectionSession::new();
        let err = session.submit().err();

        assert_eq!(err, Some(SessionError::NoImage));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.error(), Some(NO_IMAGE_MESSAGE));
        assert!(!session.is_busy());
    }

    #[test]
    fn submit_while_busy_is_rejected() {
        let mut session = session_in(SessionState::Submitting);
        let err = session.submit().err();

        assert_eq!(err, Some(SessionError::Busy));
        assert_eq!(session.state(), SessionState::Submitting);
        assert!(session.error().is_none());
    }

    #[rstest]
    #[case(SessionState::ResultReady)]
    #[case(SessionState::Failed)]
    fn same_image_can_be_resubmitted(#[case] state: SessionState) {
        let mut session = session_in(state);
        let ticket = session.submit().unwrap().ticket;

        assert_eq!(session.state(), SessionState::Submitting);
        assert!(session.result().is_none());
        assert!(session.error().is_none());

        assert!(session.complete(ticket, ok_result()));
        assert_eq!(session.state(), SessionState::ResultReady);
    }

    #[test]
    fn network_failure_uses_fallback_message() {
        let released = Rc::new(Cell::new(0));
        let mut session = DetectionSession::new();
        session.select_image("image/jpeg", opener("dog.jpg", &released)).unwrap();
        let ticket = session.submit().unwrap().ticket;

        session.complete(ticket, Err(DetectionError::Network("connection refused".into())));

        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.result().is_none());
        assert_eq!(session.error(), Some(DETECTION_FAILED_MESSAGE));
        assert!(session.image().is_some());
    }

    #[rstest]
    #[case(r#"{"prediction":"Error","threshold":"0","error":"Model offline"}"#, 200, "Model offline")]
    #[case(r#"{"prediction":"Error","threshold":"0"}"#, 200, DETECTION_FAILED_MESSAGE)]
    #[case(r#"{"error":"Image too large"}"#, 413, "Image too large")]
    #[case("Internal Server Error", 500, DETECTION_FAILED_MESSAGE)]
    fn service_failures_surface_a_non_empty_error(
        #[case] body: &str,
        #[case] status: u16,
        #[case] expected: &str,
    ) {
        let mut session = session_in(SessionState::ImageSelected);
        let ticket = session.submit().unwrap().ticket;

        session.complete(ticket, interpret_response(status, body));

        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.result().is_none());
        assert_eq!(session.error(), Some(expected));
    }

    #[rstest]
    #[case(SessionState::Idle)]
    #[case(SessionState::ImageSelected)]
    #[case(SessionState::Submitting)]
    #[case(SessionState::ResultReady)]
    #[case(SessionState::Failed)]
    fn reset_returns_to_idle_from_any_state(#[case] state: SessionState) {
        let mut session = session_in(state);
        session.reset();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.image().is_none());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn outcome_after_reset_is_discarded() {
        let mut session = session_in(SessionState::Submitting);
        let ticket = SubmissionTicket(session.submissions);
        session.reset();

        assert!(!session.complete(ticket, ok_result()));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn outcome_for_replaced_image_is_discarded() {
        let released = Rc::new(Cell::new(0));
        let mut session = DetectionSession::new();
        session.select_image("image/png", opener("old.png", &released)).unwrap();
        let old_ticket = session.submit().unwrap().ticket;

        session.select_image("image/png", opener("new.png", &released)).unwrap();
        assert!(!session.complete(old_ticket, ok_result()));
        assert_eq!(session.state(), SessionState::ImageSelected);

        let new_ticket = session.submit().unwrap().ticket;
        assert_ne!(old_ticket, new_ticket);
        assert!(session.complete(new_ticket, ok_result()));
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut session = session_in(SessionState::ImageSelected);
        let ticket = session.submit().unwrap().ticket;

        assert!(session.complete(ticket, ok_result()));
        assert!(!session.complete(ticket, Err(DetectionError::Network("late".into()))));
        assert_eq!(session.state(), SessionState::ResultReady);
        assert!(session.error().is_none());
    }

    #[test]
    fn session_stays_usable_after_failure() {
        let released = Rc::new(Cell::new(0));
        let mut session = session_in(SessionState::Failed);

        session.select_image("image/webp", opener("retry.webp", &released)).unwrap();
        let ticket = session.submit().unwrap().ticket;
        assert!(session.complete(ticket, ok_result()));
        assert_eq!(session.state(), SessionState::ResultReady);
    }
}
