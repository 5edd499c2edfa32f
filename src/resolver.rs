use crate::catalog::{Catalog, MarkingTemplate};
use crate::models::{ExamRecord, Student, Subject};
use std::sync::Arc;
use tracing::debug;

/// Outcome of looking up an exam record for a complete filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ExamRecord),
    NotFound {
        student_id: String,
        subject_code: String,
    },
}

/// Data-access seam for evaluated papers: given a known student and subject,
/// produce their record if one has been published.
pub trait RecordSource: Send + Sync {
    fn lookup(&self, student: &Student, subject: &Subject) -> Option<ExamRecord>;
}

/// Fills a fixed marking template with the requested student and subject.
pub struct TemplateRecordSource {
    marking: MarkingTemplate,
}

impl TemplateRecordSource {
    pub fn new(marking: MarkingTemplate) -> Self {
        Self { marking }
    }
}

impl RecordSource for TemplateRecordSource {
    fn lookup(&self, student: &Student, subject: &Subject) -> Option<ExamRecord> {
        let m = &self.marking;
        Some(ExamRecord {
            student_name: student.name.clone(),
            roll_number: student.roll_number.clone(),
            semester: m.semester.clone(),
            subject_code: subject.code.clone(),
            subject_name: subject.name.clone(),
            exam_date: m.exam_date.clone(),
            exam_time: m.exam_time.clone(),
            marks_obtained: m.marks_obtained,
            total_marks: m.total_marks,
            grade: m.grade,
            status: m.status,
            evaluated_by: m.evaluated_by.clone(),
            evaluated_date: m.evaluated_date.clone(),
            question_marks: m.question_marks.clone(),
        })
    }
}

/// Maps `(student_id, subject_code)` to an exam record using injected reference data.
pub struct ExamRecordResolver {
    catalog: Arc<Catalog>,
    source: Box<dyn RecordSource>,
}

impl ExamRecordResolver {
    pub fn new(catalog: Arc<Catalog>, source: Box<dyn RecordSource>) -> Self {
        Self { catalog, source }
    }

    /// Resolver backed by the catalog's own marking template.
    pub fn from_catalog(catalog: Arc<Catalog>) -> Self {
        let source = TemplateRecordSource::new(catalog.marking.clone());
        Self::new(catalog, Box::new(source))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn resolve(&self, student_id: &str, subject_code: &str) -> Resolution {
        let not_found = || Resolution::NotFound {
            student_id: student_id.to_string(),
            subject_code: subject_code.to_string(),
        };

        let (Some(student), Some(subject)) = (
            self.catalog.student(student_id),
            self.catalog.subject(subject_code),
        ) else {
            debug!(student_id, subject_code, "unknown student or subject");
            return not_found();
        };

        match self.source.lookup(student, subject) {
            Some(record) => Resolution::Found(record),
            None => {
                debug!(student_id, subject_code, "no published record");
                not_found()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grade, ResultStatus};

    struct EmptySource;

    impl RecordSource for EmptySource {
        fn lookup(&self, _student: &Student, _subject: &Subject) -> Option<ExamRecord> {
            None
        }
    }

    fn resolver() -> ExamRecordResolver {
        ExamRecordResolver::from_catalog(Arc::new(Catalog::sample()))
    }

    #[test]
    fn test_resolve_known_pair() {
        let Resolution::Found(record) = resolver().resolve("1", "CS601") else {
            panic!("expected a record");
        };

        assert_eq!(record.student_name, "Rahul Kumar");
        assert_eq!(record.roll_number, "CS2021045");
        assert_eq!(record.subject_name, "Database Management Systems");
        assert_eq!(record.marks_obtained, 78);
        assert_eq!(record.total_marks, 100);
        assert_eq!(record.grade, Grade::A);
        assert_eq!(record.status, ResultStatus::Pass);
        assert_eq!(record.question_marks.len(), 7);
        assert_eq!(
            record.question_marks.iter().map(|q| q.obtained_marks).sum::<u32>(),
            78
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let r = resolver();
        assert_eq!(r.resolve("3", "CS602"), r.resolve("3", "CS602"));
    }

    #[test]
    fn test_resolve_interpolates_identity() {
        let Resolution::Found(record) = resolver().resolve("4", "CS603") else {
            panic!("expected a record");
        };
        assert_eq!(record.student_name, "Sneha Patel");
        assert_eq!(record.subject_code, "CS603");
        assert_eq!(record.document_title(), "CS603_Sneha Patel_AnswerPaper.pdf");
    }

    #[test]
    fn test_resolve_unknown_pair() {
        let r = resolver();
        assert_eq!(
            r.resolve("99", "CS601"),
            Resolution::NotFound {
                student_id: "99".to_string(),
                subject_code: "CS601".to_string(),
            }
        );
        assert!(matches!(r.resolve("1", "XX000"), Resolution::NotFound { .. }));
    }

    #[test]
    fn test_resolve_when_source_has_nothing() {
        let r = ExamRecordResolver::new(Arc::new(Catalog::sample()), Box::new(EmptySource));
        assert!(matches!(r.resolve("1", "CS601"), Resolution::NotFound { .. }));
    }
}
