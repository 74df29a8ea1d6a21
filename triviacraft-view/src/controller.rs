//! View controller - turns user triggers into view state transitions

use crate::state::{Phase, ViewState};
use triviacraft_gen::{ErrorKind, GenerationProvider, Result, TriviaItem, TriviaRequester};

/// Shown for every generation failure, whatever the cause.
pub const FAILURE_NOTICE: &str =
    "Failed to generate trivia. Please check your API key and try again.";

/// Keys delivered while the topic input has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Activation key, triggers generate
    Enter,
    Char(char),
    Backspace,
}

/// What a trigger did to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed as requested
    Applied,
    /// Trigger not available in the current state, nothing changed
    Ignored,
    /// A generation finished after a reset; its result was dropped
    Discarded,
    /// Generation failed, the failure notice is set
    Failed(ErrorKind),
}

/// Handed out when a generation starts; returned with its result.
#[derive(Debug)]
pub struct GenerationTicket {
    id: u64,
    epoch: u64,
    topic: String,
}

impl GenerationTicket {
    /// Trimmed topic captured when the generation started
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Clears the busy state if a generate future is dropped before finishing.
struct BusyRelease<'a> {
    state: &'a mut ViewState,
    id: u64,
    armed: bool,
}

impl BusyRelease<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for BusyRelease<'_> {
    fn drop(&mut self) {
        if self.armed && self.state.pending == Some(self.id) {
            self.state.pending = None;
            tracing::debug!(ticket = self.id, "generation abandoned, busy state released");
        }
    }
}

/// Owns the view state and the requester used to fill it
pub struct ViewController<P> {
    requester: TriviaRequester<P>,
    state: ViewState,
}

impl<P: GenerationProvider> ViewController<P> {
    pub fn new(requester: TriviaRequester<P>) -> Self {
        Self {
            requester,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn requester(&self) -> &TriviaRequester<P> {
        &self.requester
    }

    /// Replace the topic input text
    pub fn set_topic(&mut self, text: impl Into<String>) -> Outcome {
        if self.state.phase != Phase::Setup {
            return Outcome::Ignored;
        }
        self.state.topic_input = text.into();
        Outcome::Applied
    }

    /// Keypress on the topic input
    pub async fn key_press(&mut self, key: Key) -> Outcome {
        if self.state.phase != Phase::Setup {
            return Outcome::Ignored;
        }
        match key {
            Key::Enter => self.generate().await,
            Key::Char(c) => {
                self.state.topic_input.push(c);
                Outcome::Applied
            }
            Key::Backspace => match self.state.topic_input.pop() {
                Some(_) => Outcome::Applied,
                None => Outcome::Ignored,
            },
        }
    }

    /// Generate trigger: request a trivia item for the current topic input.
    pub async fn generate(&mut self) -> Outcome {
        let Some(ticket) = self.begin_generate() else {
            return Outcome::Ignored;
        };

        let release = BusyRelease {
            state: &mut self.state,
            id: ticket.id,
            armed: true,
        };
        let result = self.requester.generate_trivia(&ticket.topic).await;
        release.disarm();

        self.finish_generate(ticket, result)
    }

    /// Enter the busy sub-state.
    ///
    /// Returns `None` while another generation is pending or outside setup,
    /// which is what a disabled generate trigger amounts to.
    pub fn begin_generate(&mut self) -> Option<GenerationTicket> {
        if self.state.phase != Phase::Setup || !self.state.generate_enabled() {
            tracing::debug!(
                phase = ?self.state.phase,
                busy = self.state.is_busy(),
                "generate ignored"
            );
            return None;
        }

        let id = self.state.next_ticket;
        self.state.next_ticket += 1;
        self.state.pending = Some(id);
        self.state.notice = None;

        let topic = self.state.topic_input.trim().to_string();
        tracing::debug!(
            ticket = id,
            epoch = self.state.epoch,
            topic_len = topic.len(),
            "generation started"
        );

        Some(GenerationTicket {
            id,
            epoch: self.state.epoch,
            topic,
        })
    }

    /// Leave the busy sub-state and apply `result`.
    ///
    /// Busy is released first, on success and failure alike. Results from a
    /// ticket issued before the last reset are dropped.
    pub fn finish_generate(
        &mut self,
        ticket: GenerationTicket,
        result: Result<TriviaItem>,
    ) -> Outcome {
        if self.state.pending != Some(ticket.id) {
            tracing::debug!(ticket = ticket.id, "unknown or already finished ticket");
            return Outcome::Ignored;
        }
        self.state.pending = None;

        if ticket.epoch != self.state.epoch {
            tracing::debug!(
                ticket = ticket.id,
                ticket_epoch = ticket.epoch,
                epoch = self.state.epoch,
                "discarding stale generation result"
            );
            return Outcome::Discarded;
        }

        match result {
            Ok(item) => {
                self.state.question_text = item.question;
                self.state.current_answer = Some(item.answer);
                self.state.answer_text.clear();
                self.state.notice = None;
                self.state.phase = Phase::QuestionShown;
                tracing::info!(ticket = ticket.id, "trivia question ready");
                Outcome::Applied
            }
            Err(err) => {
                tracing::error!(
                    ticket = ticket.id,
                    kind = %err.kind(),
                    error = %err,
                    "trivia generation failed"
                );
                self.state.notice = Some(FAILURE_NOTICE.to_string());
                Outcome::Failed(err.kind())
            }
        }
    }

    /// Reveal trigger: show the stored answer. No network call.
    pub fn reveal(&mut self) -> Outcome {
        if self.state.phase != Phase::QuestionShown {
            return Outcome::Ignored;
        }
        self.state.answer_text = self.state.current_answer.clone().unwrap_or_default();
        self.state.phase = Phase::AnswerRevealed;
        Outcome::Applied
    }

    /// Reset trigger: back to setup with input and answer cleared.
    ///
    /// A generation still in flight stays busy but its result will be
    /// discarded.
    pub fn reset(&mut self) -> Outcome {
        let before = self.state.clone();

        self.state.phase = Phase::Setup;
        self.state.topic_input.clear();
        self.state.question_text.clear();
        self.state.answer_text.clear();
        self.state.current_answer = None;
        self.state.notice = None;
        if self.state.pending.is_some() {
            self.state.epoch += 1;
        }

        if self.state == before {
            Outcome::Ignored
        } else {
            Outcome::Applied
        }
    }
}
