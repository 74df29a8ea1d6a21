//! View state and region visibility

/// Which screen the user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    QuestionShown,
    AnswerRevealed,
}

/// Named parts of the view a front end can show or hide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    SetupSection,
    TopicInput,
    GenerateTrigger,
    /// Text label of the generate trigger, swapped out while busy
    GenerateLabel,
    BusyIndicator,
    TriviaSection,
    QuestionDisplay,
    RevealTrigger,
    AnswerDisplay,
    ResetTrigger,
}

impl Region {
    pub const ALL: [Region; 10] = [
        Region::SetupSection,
        Region::TopicInput,
        Region::GenerateTrigger,
        Region::GenerateLabel,
        Region::BusyIndicator,
        Region::TriviaSection,
        Region::QuestionDisplay,
        Region::RevealTrigger,
        Region::AnswerDisplay,
        Region::ResetTrigger,
    ];
}

/// Everything the view shows, owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub(crate) phase: Phase,
    pub(crate) topic_input: String,
    pub(crate) question_text: String,
    pub(crate) answer_text: String,
    /// Answer of the current round, kept back until reveal
    pub(crate) current_answer: Option<String>,
    pub(crate) notice: Option<String>,
    /// Ticket id of the in-flight generation, if any
    pub(crate) pending: Option<u64>,
    /// Advanced by a reset that interrupts a pending generation
    pub(crate) epoch: u64,
    pub(crate) next_ticket: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: Phase::Setup,
            topic_input: String::new(),
            question_text: String::new(),
            answer_text: String::new(),
            current_answer: None,
            notice: None,
            pending: None,
            epoch: 0,
            next_ticket: 0,
        }
    }
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn topic_input(&self) -> &str {
        &self.topic_input
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    /// Empty until the answer is revealed
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    pub fn has_answer(&self) -> bool {
        self.current_answer.is_some()
    }

    /// User-visible failure message from the last generate attempt
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Disabled only while a generation is pending; visibility is separate
    pub fn generate_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn is_visible(&self, region: Region) -> bool {
        let setup = self.phase == Phase::Setup;
        match region {
            Region::SetupSection | Region::TopicInput | Region::GenerateTrigger => setup,
            Region::GenerateLabel => setup && !self.is_busy(),
            Region::BusyIndicator => self.is_busy(),
            Region::TriviaSection | Region::QuestionDisplay | Region::ResetTrigger => !setup,
            Region::RevealTrigger => self.phase == Phase::QuestionShown,
            Region::AnswerDisplay => self.phase == Phase::AnswerRevealed,
        }
    }

    pub fn visible_regions(&self) -> Vec<Region> {
        Region::ALL
            .into_iter()
            .filter(|r| self.is_visible(*r))
            .collect()
    }
}
