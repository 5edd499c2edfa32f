use crate::catalog::Catalog;
use crate::error::ViewerError;
use crate::filters::{FilterField, FilterOption, FilterSelection};
use crate::models::ExamRecord;
use crate::resolver::{ExamRecordResolver, Resolution};
use tracing::info;

/// What the main area of the portal is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    /// Nothing searched yet: welcome banner over the empty state.
    Welcome,
    /// A search happened, but the filters changed since; search again to see a paper.
    Stale,
    /// Filters were complete but no evaluated paper matches them.
    NoRecord {
        student_id: String,
        subject_code: String,
    },
    Showing(ExamRecord),
}

/// Visibility of the portal's panels for the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub welcome: bool,
    pub empty_state: bool,
    pub no_record: bool,
    pub result: bool,
}

pub struct ViewOrchestrator {
    filters: FilterSelection,
    resolver: ExamRecordResolver,
    phase: ViewPhase,
}

impl ViewOrchestrator {
    pub fn new(resolver: ExamRecordResolver) -> Self {
        Self {
            filters: FilterSelection::new(),
            resolver,
            phase: ViewPhase::Welcome,
        }
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn catalog(&self) -> &Catalog {
        self.resolver.catalog()
    }

    pub fn options(&self, field: FilterField) -> Vec<FilterOption> {
        self.catalog().options(field)
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn record(&self) -> Option<&ExamRecord> {
        match &self.phase {
            ViewPhase::Showing(record) => Some(record),
            _ => None,
        }
    }

    pub fn has_searched(&self) -> bool {
        self.phase != ViewPhase::Welcome
    }

    /// Change one filter. A displayed result is dropped until the next search.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
        if matches!(
            self.phase,
            ViewPhase::Showing(_) | ViewPhase::NoRecord { .. }
        ) {
            self.phase = ViewPhase::Stale;
        }
    }

    /// Resolve the record for the current filters. Incomplete filters are a
    /// validation error and nothing is looked up.
    pub fn search(&mut self) -> Result<Option<&ExamRecord>, ViewerError> {
        if !self.filters.is_complete() {
            let missing: Vec<&str> = self
                .filters
                .missing_fields()
                .iter()
                .map(|f| f.label())
                .collect();
            return Err(ViewerError::validation(format!(
                "Please select all filters to continue (missing: {})",
                missing.join(", ")
            )));
        }

        let FilterSelection {
            student_id,
            subject_code,
            ..
        } = self.filters.clone();

        self.resolve_into_phase(&student_id, &subject_code);
        Ok(self.record())
    }

    /// Show the paper for one result row picked outside the filter panel.
    /// The student and subject filters follow the row; the others are kept.
    pub fn open_result(&mut self, student_id: &str, subject_code: &str) -> Option<&ExamRecord> {
        self.filters.set(FilterField::Student, student_id);
        self.filters.set(FilterField::Subject, subject_code);
        self.resolve_into_phase(student_id, subject_code);
        self.record()
    }

    fn resolve_into_phase(&mut self, student_id: &str, subject_code: &str) {
        self.phase = match self.resolver.resolve(student_id, subject_code) {
            Resolution::Found(record) => {
                info!(
                    roll_number = %record.roll_number,
                    subject_code = %record.subject_code,
                    "answer paper found"
                );
                ViewPhase::Showing(record)
            }
            Resolution::NotFound {
                student_id,
                subject_code,
            } => {
                info!(student_id = %student_id, subject_code = %subject_code, "no answer paper");
                ViewPhase::NoRecord {
                    student_id,
                    subject_code,
                }
            }
        };
    }

    /// Clear every filter and any result, back to the welcome view.
    pub fn reset(&mut self) {
        self.filters.reset();
        self.phase = ViewPhase::Welcome;
    }

    pub fn panels(&self) -> Panels {
        Panels {
            welcome: self.phase == ViewPhase::Welcome,
            empty_state: matches!(self.phase, ViewPhase::Welcome | ViewPhase::Stale),
            no_record: matches!(self.phase, ViewPhase::NoRecord { .. }),
            result: matches!(self.phase, ViewPhase::Showing(_)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grade, ResultStatus};
    use std::sync::Arc;

    fn orchestrator() -> ViewOrchestrator {
        ViewOrchestrator::new(ExamRecordResolver::from_catalog(Arc::new(Catalog::sample())))
    }

    fn select_rahul(view: &mut ViewOrchestrator) {
        view.set_filter(FilterField::Student, "1");
        view.set_filter(FilterField::Semester, "sem6");
        view.set_filter(FilterField::ExamName, "end_sem");
        view.set_filter(FilterField::Subject, "CS601");
        view.set_filter(FilterField::FeeStatus, "with_fee");
    }

    #[test]
    fn test_initial_view_is_welcome() {
        let view = orchestrator();
        let panels = view.panels();
        assert!(panels.welcome);
        assert!(panels.empty_state);
        assert!(!panels.result);
        assert!(!view.has_searched());
    }

    #[test]
    fn test_incomplete_search_is_rejected() {
        let mut view = orchestrator();
        view.set_filter(FilterField::Student, "1");

        let err = view.search().unwrap_err();
        assert!(matches!(err, ViewerError::Validation(ref m) if m.contains("Semester")));
        assert_eq!(view.phase(), &ViewPhase::Welcome);
    }

    #[test]
    fn test_search_scenario() {
        let mut view = orchestrator();
        select_rahul(&mut view);

        let record = view.search().unwrap().unwrap().clone();
        assert_eq!(record.student_name, "Rahul Kumar");
        assert_eq!(record.roll_number, "CS2021045");
        assert_eq!((record.marks_obtained, record.total_marks), (78, 100));
        assert_eq!(record.grade, Grade::A);
        assert_eq!(record.status, ResultStatus::Pass);
        assert_eq!(record.question_marks.len(), 7);
        assert_eq!(
            record.question_marks.iter().map(|q| q.obtained_marks).sum::<u32>(),
            78
        );

        let panels = view.panels();
        assert!(panels.result);
        assert!(!panels.welcome);
        assert!(!panels.empty_state);
    }

    #[test]
    fn test_filter_change_invalidates_until_next_search() {
        let mut view = orchestrator();
        select_rahul(&mut view);
        view.search().unwrap();

        view.set_filter(FilterField::Subject, "CS602");
        assert!(view.record().is_none());
        assert_eq!(view.phase(), &ViewPhase::Stale);
        let panels = view.panels();
        assert!(panels.empty_state);
        assert!(!panels.welcome);

        let record = view.search().unwrap().unwrap();
        assert_eq!(record.subject_name, "Computer Networks");
    }

    #[test]
    fn test_unknown_pair_shows_no_record() {
        let mut view = orchestrator();
        select_rahul(&mut view);
        view.set_filter(FilterField::Subject, "ME101");

        assert!(view.search().unwrap().is_none());
        let panels = view.panels();
        assert!(panels.no_record);
        assert!(!panels.empty_state);
        assert!(!panels.result);
    }

    #[test]
    fn test_open_result_shows_row_without_full_filters() {
        let mut view = orchestrator();

        let record = view.open_result("4", "CS602").unwrap();
        assert_eq!(record.student_name, "Sneha Patel");
        assert_eq!(view.filters().get(FilterField::Student), "4");
        assert_eq!(view.filters().get(FilterField::Subject), "CS602");
        assert!(view.panels().result);

        view.set_filter(FilterField::Subject, "CS601");
        assert_eq!(view.phase(), &ViewPhase::Stale);
    }

    #[test]
    fn test_reset_after_search_returns_to_welcome() {
        let mut view = orchestrator();
        select_rahul(&mut view);
        view.search().unwrap();

        view.reset();
        assert!(view.record().is_none());
        assert_eq!(view.filters(), &FilterSelection::default());
        let panels = view.panels();
        assert!(panels.welcome);
        assert!(panels.empty_state);
    }
}
