pub mod submitters;

use crate::error::ViewerError;
use crate::models::{ExamRecord, QueryPayload, QueryType, QuestionRef};
use std::time::Duration;
use tracing::{info, warn};

pub use submitters::{deliver, OutboxSubmitter, QuerySubmitter};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

const MAX_PAGE_DIGITS: usize = 4;
const MAX_SUBJECT_LINE: usize = 120;
const MAX_DESCRIPTION: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    QueryType,
    Question,
    PageNumber,
    SubjectLine,
    Description,
}

impl QueryField {
    pub const ALL: [QueryField; 5] = [
        QueryField::QueryType,
        QueryField::Question,
        QueryField::PageNumber,
        QueryField::SubjectLine,
        QueryField::Description,
    ];

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            QueryField::PageNumber | QueryField::SubjectLine | QueryField::Description
        )
    }
}

/// Identity of the paper a query is about, copied from the active record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryContext {
    pub student_name: String,
    pub roll_number: String,
    pub subject_code: String,
    pub subject_name: String,
    pub questions: Vec<(u32, String)>,
}

impl QueryContext {
    pub fn from_record(record: &ExamRecord) -> Self {
        Self {
            student_name: record.student_name.clone(),
            roll_number: record.roll_number.clone(),
            subject_code: record.subject_code.clone(),
            subject_name: record.subject_name.clone(),
            questions: record
                .question_marks
                .iter()
                .map(|q| (q.question_no, q.section_label().to_string()))
                .collect(),
        }
    }
}

/// The raise-query dialog: its fields and the lifecycle of one submission.
#[derive(Debug, Clone)]
pub struct QueryForm {
    pub query_type: Option<QueryType>,
    pub question: Option<QuestionRef>,
    pub page_number: String,
    pub subject_line: String,
    pub description: String,
    context: QueryContext,
    state: SubmissionState,
    open: bool,
}

impl Default for QueryForm {
    fn default() -> Self {
        Self {
            query_type: None,
            question: None,
            page_number: String::new(),
            subject_line: String::new(),
            description: String::new(),
            context: QueryContext::default(),
            state: SubmissionState::Idle,
            open: false,
        }
    }
}

impl QueryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an empty form for the given record.
    pub fn open(&mut self, record: &ExamRecord) {
        self.clear_fields();
        self.context = QueryContext::from_record(record);
        self.state = SubmissionState::Idle;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn can_submit(&self) -> bool {
        self.open && !self.is_submitting()
    }

    /// Close and clear the form. Not allowed while a submission is in flight.
    pub fn cancel(&mut self) -> Result<(), ViewerError> {
        if self.is_submitting() {
            return Err(ViewerError::SubmissionInFlight);
        }
        self.clear_fields();
        self.state = SubmissionState::Idle;
        self.open = false;
        Ok(())
    }

    pub fn set_query_type(&mut self, query_type: Option<QueryType>) {
        self.query_type = query_type;
    }

    /// Step through the query types; `None` sits before the first type.
    pub fn cycle_query_type(&mut self, forward: bool) {
        let all = QueryType::ALL;
        let current = self
            .query_type
            .and_then(|t| all.iter().position(|x| *x == t));
        self.query_type = match (current, forward) {
            (None, true) => Some(all[0]),
            (None, false) => Some(all[all.len() - 1]),
            (Some(i), true) if i + 1 < all.len() => Some(all[i + 1]),
            (Some(i), false) if i > 0 => Some(all[i - 1]),
            _ => None,
        };
    }

    /// Refer the query to one question of the record, or to all of them.
    /// Question numbers that are not on the paper are refused.
    pub fn set_question(&mut self, question: Option<QuestionRef>) -> bool {
        if let Some(QuestionRef::Question(no)) = question {
            if !self.context.questions.iter().any(|(q, _)| *q == no) {
                return false;
            }
        }
        self.question = question;
        true
    }

    /// Step through: unset, All, then each question of the paper.
    pub fn cycle_question(&mut self, forward: bool) {
        let mut choices: Vec<Option<QuestionRef>> = vec![None, Some(QuestionRef::All)];
        choices.extend(
            self.context
                .questions
                .iter()
                .map(|(no, _)| Some(QuestionRef::Question(*no))),
        );

        let idx = choices.iter().position(|c| *c == self.question).unwrap_or(0);
        let next = if forward {
            (idx + 1) % choices.len()
        } else {
            (idx + choices.len() - 1) % choices.len()
        };
        self.question = choices[next];
    }

    pub fn push_char(&mut self, field: QueryField, c: char) {
        match field {
            QueryField::PageNumber => {
                if c.is_ascii_digit() && self.page_number.len() < MAX_PAGE_DIGITS {
                    self.page_number.push(c);
                }
            }
            QueryField::SubjectLine => {
                if self.subject_line.chars().count() < MAX_SUBJECT_LINE {
                    self.subject_line.push(c);
                }
            }
            QueryField::Description => {
                if self.description.chars().count() < MAX_DESCRIPTION {
                    self.description.push(c);
                }
            }
            QueryField::QueryType | QueryField::Question => {}
        }
    }

    pub fn pop_char(&mut self, field: QueryField) {
        match field {
            QueryField::PageNumber => {
                self.page_number.pop();
            }
            QueryField::SubjectLine => {
                self.subject_line.pop();
            }
            QueryField::Description => {
                self.description.pop();
            }
            QueryField::QueryType | QueryField::Question => {}
        }
    }

    /// Check the form and build the payload without changing any state.
    pub fn validate(&self) -> Result<QueryPayload, ViewerError> {
        let query_type = match self.query_type {
            Some(t) if !self.description.trim().is_empty() => t,
            _ => return Err(ViewerError::validation(REQUIRED_FIELDS_MESSAGE)),
        };

        let page_number = match self.page_number.trim() {
            "" => None,
            raw => match raw.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(ViewerError::validation(
                        "Page number must be a positive integer",
                    ))
                }
            },
        };

        let subject_line = Some(self.subject_line.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(QueryPayload {
            student_name: self.context.student_name.clone(),
            roll_number: self.context.roll_number.clone(),
            subject_code: self.context.subject_code.clone(),
            subject_name: self.context.subject_name.clone(),
            query_type,
            question_no: self.question.map(|q| q.to_string()),
            page_number,
            subject_line,
            description: self.description.trim().to_string(),
        })
    }

    /// Start a submission: rejects duplicates and invalid input, otherwise
    /// moves to `Submitting` and returns the payload to deliver.
    pub fn begin_submission(&mut self) -> Result<QueryPayload, ViewerError> {
        if self.is_submitting() {
            return Err(ViewerError::SubmissionInFlight);
        }
        let payload = self.validate()?;
        self.state = SubmissionState::Submitting;
        info!(
            roll_number = %payload.roll_number,
            subject_code = %payload.subject_code,
            query_type = payload.query_type.value(),
            "submitting query"
        );
        Ok(payload)
    }

    /// Apply the outcome of the delivery started by `begin_submission`.
    pub fn complete_submission(&mut self, outcome: Result<(), ViewerError>) {
        if !self.is_submitting() {
            return;
        }
        match outcome {
            Ok(()) => {
                info!(roll_number = %self.context.roll_number, "query submitted");
                self.clear_fields();
                self.state = SubmissionState::Succeeded;
                self.open = false;
            }
            Err(e) => {
                warn!(error = %e, "query submission failed");
                self.state = SubmissionState::Failed(e.to_string());
            }
        }
    }

    /// Validate, deliver once with a deadline, and apply the outcome.
    pub async fn submit(
        &mut self,
        submitter: &dyn QuerySubmitter,
        timeout: Duration,
    ) -> Result<(), ViewerError> {
        let payload = self.begin_submission()?;
        let outcome = deliver(submitter, &payload, timeout).await;
        self.complete_submission(outcome.clone());
        outcome
    }

    fn clear_fields(&mut self) {
        self.query_type = None;
        self.question = None;
        self.page_number.clear();
        self.subject_line.clear();
        self.description.clear();
    }
}
