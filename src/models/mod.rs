use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Section label used for questions that carry none.
pub const UNSECTIONED: &str = "All Questions";

/// Minimum overall percentage for a pass, shown on the score bar.
pub const PASS_PERCENTAGE: u32 = 40;

// ============================================================================
// Reference Data Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Semester {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExamName {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subject {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeeStatusOption {
    pub value: String,
    pub label: String,
}

// ============================================================================
// Exam Result Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Pass,
    Fail,
}

impl ResultStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ResultStatus::Pass => "PASSED",
            ResultStatus::Fail => "FAILED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionMark {
    pub question_no: u32,
    #[serde(default)]
    pub section: Option<String>,
    pub max_marks: u32,
    pub obtained_marks: u32,
}

/// Colour band for a score, by percentage of the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkBand {
    High,
    Medium,
    Low,
}

impl MarkBand {
    pub fn for_percentage(pct: u32) -> Self {
        if pct >= 80 {
            MarkBand::High
        } else if pct >= 50 {
            MarkBand::Medium
        } else {
            MarkBand::Low
        }
    }
}

impl QuestionMark {
    pub fn percentage(&self) -> u32 {
        rounded_percentage(self.obtained_marks, self.max_marks)
    }

    pub fn band(&self) -> MarkBand {
        MarkBand::for_percentage(self.percentage())
    }

    pub fn section_label(&self) -> &str {
        self.section.as_deref().unwrap_or(UNSECTIONED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExamRecord {
    pub student_name: String,
    pub roll_number: String,
    pub semester: String,
    pub subject_code: String,
    pub subject_name: String,
    pub exam_date: String,
    pub exam_time: String,
    pub marks_obtained: u32,
    pub total_marks: u32,
    pub grade: Grade,
    pub status: ResultStatus,
    #[serde(default)]
    pub evaluated_by: Option<String>,
    #[serde(default)]
    pub evaluated_date: Option<String>,
    pub question_marks: Vec<QuestionMark>,
}

/// Questions of one section with their running totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub name: String,
    pub questions: Vec<QuestionMark>,
    pub obtained: u32,
    pub max: u32,
}

impl SectionSummary {
    pub fn percentage(&self) -> u32 {
        rounded_percentage(self.obtained, self.max)
    }
}

impl ExamRecord {
    pub fn percentage(&self) -> u32 {
        rounded_percentage(self.marks_obtained, self.total_marks)
    }

    /// Groups questions by section, keeping the order in which sections first appear.
    pub fn sections(&self) -> Vec<SectionSummary> {
        let mut grouped: IndexMap<&str, Vec<QuestionMark>> = IndexMap::new();
        for question in &self.question_marks {
            grouped
                .entry(question.section_label())
                .or_default()
                .push(question.clone());
        }

        grouped
            .into_iter()
            .map(|(name, questions)| SectionSummary {
                name: name.to_string(),
                obtained: questions.iter().map(|q| q.obtained_marks).sum(),
                max: questions.iter().map(|q| q.max_marks).sum(),
                questions,
            })
            .collect()
    }

    pub fn document_title(&self) -> String {
        format!("{}_{}_AnswerPaper.pdf", self.subject_code, self.student_name)
    }

    /// Checks the mark invariants: positive totals, obtained within bounds,
    /// unique positive question numbers.
    pub fn validate(&self) -> Result<(), String> {
        if self.total_marks == 0 {
            return Err("total marks must be positive".to_string());
        }
        if self.marks_obtained > self.total_marks {
            return Err(format!(
                "marks obtained {} exceed total {}",
                self.marks_obtained, self.total_marks
            ));
        }

        let mut seen = Vec::with_capacity(self.question_marks.len());
        for q in &self.question_marks {
            if q.question_no == 0 {
                return Err("question numbers start at 1".to_string());
            }
            if seen.contains(&q.question_no) {
                return Err(format!("duplicate question number {}", q.question_no));
            }
            seen.push(q.question_no);

            if q.max_marks == 0 {
                return Err(format!("Q{} has no maximum marks", q.question_no));
            }
            if q.obtained_marks > q.max_marks {
                return Err(format!(
                    "Q{} scored {} out of {}",
                    q.question_no, q.obtained_marks, q.max_marks
                ));
            }
        }

        Ok(())
    }
}

fn rounded_percentage(obtained: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        ((obtained as f64 / total as f64) * 100.0).round() as u32
    }
}

// ============================================================================
// Query / Objection Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    MarksDiscrepancy,
    AnswerNotEvaluated,
    WrongMarking,
    TotalingError,
    PageMissing,
    Other,
}

impl QueryType {
    pub const ALL: [QueryType; 6] = [
        QueryType::MarksDiscrepancy,
        QueryType::AnswerNotEvaluated,
        QueryType::WrongMarking,
        QueryType::TotalingError,
        QueryType::PageMissing,
        QueryType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QueryType::MarksDiscrepancy => "Marks Discrepancy",
            QueryType::AnswerNotEvaluated => "Answer Not Evaluated",
            QueryType::WrongMarking => "Wrong Marking",
            QueryType::TotalingError => "Totaling Error",
            QueryType::PageMissing => "Page Missing",
            QueryType::Other => "Other",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            QueryType::MarksDiscrepancy => "marks_discrepancy",
            QueryType::AnswerNotEvaluated => "answer_not_evaluated",
            QueryType::WrongMarking => "wrong_marking",
            QueryType::TotalingError => "totaling_error",
            QueryType::PageMissing => "page_missing",
            QueryType::Other => "other",
        }
    }
}

/// Which part of the paper a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionRef {
    All,
    Question(u32),
}

impl fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionRef::All => f.write_str("all"),
            QuestionRef::Question(no) => write!(f, "{}", no),
        }
    }
}

/// Body sent to the examination department for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPayload {
    pub student_name: String,
    pub roll_number: String,
    pub subject_code: String,
    pub subject_name: String,
    pub query_type: QueryType,
    pub question_no: Option<String>,
    pub page_number: Option<u32>,
    pub subject_line: Option<String>,
    pub description: String,
}

// ============================================================================
// Admin Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Pending,
    InReview,
    Resolved,
    Rejected,
}

impl QueryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            QueryStatus::Pending => "Pending",
            QueryStatus::InReview => "In Review",
            QueryStatus::Resolved => "Resolved",
            QueryStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewQuery {
    pub id: u32,
    pub student_name: String,
    pub roll_number: String,
    pub subject: String,
    pub subject_code: String,
    pub query_type: QueryType,
    pub question_no: String,
    pub page_number: String,
    pub description: String,
    pub status: QueryStatus,
    pub submitted_at: String,
    #[serde(default)]
    pub resolved_at: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultRow {
    pub student_id: String,
    pub name: String,
    pub roll_number: String,
    pub subject: String,
    pub subject_code: String,
    pub marks_obtained: u32,
    pub total_marks: u32,
    pub grade: Grade,
    pub status: ResultStatus,
    pub exam_type: String,
    #[serde(default)]
    pub has_query: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(no: u32, section: Option<&str>, max: u32, obtained: u32) -> QuestionMark {
        QuestionMark {
            question_no: no,
            section: section.map(str::to_string),
            max_marks: max,
            obtained_marks: obtained,
        }
    }

    fn record(obtained: u32, total: u32, questions: Vec<QuestionMark>) -> ExamRecord {
        ExamRecord {
            student_name: "Amit Singh".to_string(),
            roll_number: "CS2021018".to_string(),
            semester: "6th Semester - Spring 2024".to_string(),
            subject_code: "CS601".to_string(),
            subject_name: "Database Management Systems".to_string(),
            exam_date: "March 15, 2024".to_string(),
            exam_time: "10:00 AM - 1:00 PM".to_string(),
            marks_obtained: obtained,
            total_marks: total,
            grade: Grade::F,
            status: ResultStatus::Fail,
            evaluated_by: None,
            evaluated_date: None,
            question_marks: questions,
        }
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(record(78, 100, vec![]).percentage(), 78);
        assert_eq!(record(32, 100, vec![]).percentage(), 32);
        assert_eq!(record(2, 3, vec![]).percentage(), 67);
    }

    #[test]
    fn test_sections_keep_first_appearance_order() {
        let r = record(
            30,
            45,
            vec![
                question(1, Some("Section B"), 10, 8),
                question(2, Some("Section A"), 10, 5),
                question(3, Some("Section B"), 15, 12),
                question(4, None, 10, 5),
            ],
        );

        let sections = r.sections();
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Section B", "Section A", UNSECTIONED]);
        assert_eq!(sections[0].obtained, 20);
        assert_eq!(sections[0].max, 25);
        assert_eq!(sections[0].questions.len(), 2);
        assert_eq!(sections[0].percentage(), 80);
        assert_eq!(sections[1].percentage(), 50);
        assert_eq!(sections[2].percentage(), 50);
    }

    #[test]
    fn test_mark_bands() {
        assert_eq!(question(1, None, 10, 9).band(), MarkBand::High);
        assert_eq!(question(1, None, 10, 8).band(), MarkBand::High);
        assert_eq!(question(1, None, 20, 14).band(), MarkBand::Medium);
        assert_eq!(question(1, None, 10, 4).band(), MarkBand::Low);
    }

    #[test]
    fn test_validate_rejects_bad_marks() {
        assert!(record(10, 0, vec![]).validate().is_err());
        assert!(record(101, 100, vec![]).validate().is_err());
        assert!(record(10, 100, vec![question(1, None, 5, 6)]).validate().is_err());
        assert!(record(
            10,
            100,
            vec![question(2, None, 10, 5), question(2, None, 10, 5)]
        )
        .validate()
        .is_err());
        assert!(record(5, 100, vec![question(1, None, 10, 5)]).validate().is_ok());
    }

    #[test]
    fn test_grade_serde_labels() {
        let grade: Grade = serde_yaml::from_str("\"A+\"").unwrap();
        assert_eq!(grade, Grade::APlus);
        assert_eq!(grade.to_string(), "A+");
    }

    #[test]
    fn test_payload_uses_camel_case() {
        let payload = QueryPayload {
            student_name: "Rahul Kumar".to_string(),
            roll_number: "CS2021045".to_string(),
            subject_code: "CS601".to_string(),
            subject_name: "Database Management Systems".to_string(),
            query_type: QueryType::WrongMarking,
            question_no: Some("5".to_string()),
            page_number: Some(3),
            subject_line: None,
            description: "Q5 normalization answer".to_string(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["rollNumber"], "CS2021045");
        assert_eq!(json["queryType"], "wrong_marking");
        assert_eq!(json["pageNumber"], 3);
    }
}
