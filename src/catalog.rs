use crate::filters::{FilterField, FilterOption};
use crate::models::{
    ExamName, FeeStatusOption, Grade, QueryStatus, QueryType, QuestionMark, ResultRow,
    ResultStatus, ReviewQuery, Semester, Student, Subject,
};
use serde::{Deserialize, Serialize};

/// Reference data handed to the filter panel, the resolver, and the admin screen.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Catalog {
    pub students: Vec<Student>,
    pub semesters: Vec<Semester>,
    pub exam_names: Vec<ExamName>,
    pub subjects: Vec<Subject>,
    #[serde(default = "default_fee_statuses")]
    pub fee_statuses: Vec<FeeStatusOption>,
    pub marking: MarkingTemplate,
    #[serde(default)]
    pub results: Vec<ResultRow>,
    #[serde(default)]
    pub queries: Vec<ReviewQuery>,
}

/// The evaluated-paper shape the sample record source fills in with
/// student and subject identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkingTemplate {
    pub semester: String,
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

fn default_fee_statuses() -> Vec<FeeStatusOption> {
    vec![
        FeeStatusOption {
            value: "with_fee".to_string(),
            label: "With Fee".to_string(),
        },
        FeeStatusOption {
            value: "without_fee".to_string(),
            label: "Without Fee".to_string(),
        },
    ]
}

impl Catalog {
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn subject(&self, code: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.code == code)
    }

    pub fn options(&self, field: FilterField) -> Vec<FilterOption> {
        match field {
            FilterField::Student => self
                .students
                .iter()
                .map(|s| FilterOption {
                    value: s.id.clone(),
                    label: s.roll_number.clone(),
                    detail: Some(s.name.clone()),
                })
                .collect(),
            FilterField::Semester => self
                .semesters
                .iter()
                .map(|s| FilterOption {
                    value: s.id.clone(),
                    label: s.name.clone(),
                    detail: None,
                })
                .collect(),
            FilterField::ExamName => self
                .exam_names
                .iter()
                .map(|e| FilterOption {
                    value: e.id.clone(),
                    label: e.name.clone(),
                    detail: None,
                })
                .collect(),
            FilterField::Subject => self
                .subjects
                .iter()
                .map(|s| FilterOption {
                    value: s.code.clone(),
                    label: s.code.clone(),
                    detail: Some(s.name.clone()),
                })
                .collect(),
            FilterField::FeeStatus => self
                .fee_statuses
                .iter()
                .map(|f| FilterOption {
                    value: f.value.clone(),
                    label: f.label.clone(),
                    detail: None,
                })
                .collect(),
        }
    }

    /// Display label for a selected value, if it is one of the field's options.
    pub fn label_for(&self, field: FilterField, value: &str) -> Option<String> {
        self.options(field)
            .into_iter()
            .find(|o| o.value == value)
            .map(|o| o.label)
    }

    /// Built-in sample data for the National Institute of Technology portal.
    pub fn sample() -> Self {
        let student = |id: &str, name: &str, roll: &str| Student {
            id: id.to_string(),
            name: name.to_string(),
            roll_number: roll.to_string(),
        };
        let subject = |code: &str, name: &str| Subject {
            code: code.to_string(),
            name: name.to_string(),
        };
        let question = |no: u32, section: &str, max: u32, obtained: u32| QuestionMark {
            question_no: no,
            section: Some(section.to_string()),
            max_marks: max,
            obtained_marks: obtained,
        };

        Self {
            students: vec![
                student("1", "Rahul Kumar", "CS2021045"),
                student("2", "Priya Sharma", "CS2021032"),
                student("3", "Amit Singh", "CS2021018"),
                student("4", "Sneha Patel", "CS2021055"),
            ],
            semesters: vec![
                Semester {
                    id: "sem5".to_string(),
                    name: "5th Semester - Fall 2023".to_string(),
                },
                Semester {
                    id: "sem6".to_string(),
                    name: "6th Semester - Spring 2024".to_string(),
                },
            ],
            exam_names: vec![
                ExamName {
                    id: "mid_sem".to_string(),
                    name: "Mid Semester".to_string(),
                },
                ExamName {
                    id: "end_sem".to_string(),
                    name: "End Semester".to_string(),
                },
            ],
            subjects: vec![
                subject("CS601", "Database Management Systems"),
                subject("CS602", "Computer Networks"),
                subject("CS603", "Operating Systems"),
            ],
            fee_statuses: default_fee_statuses(),
            marking: MarkingTemplate {
                semester: "6th Semester - Spring 2024".to_string(),
                exam_date: "March 15, 2024".to_string(),
                exam_time: "10:00 AM - 1:00 PM".to_string(),
                marks_obtained: 78,
                total_marks: 100,
                grade: Grade::A,
                status: ResultStatus::Pass,
                evaluated_by: Some("Dr. Sharma".to_string()),
                evaluated_date: Some("March 28, 2024".to_string()),
                question_marks: vec![
                    question(1, "Section A", 10, 9),
                    question(2, "Section A", 10, 8),
                    question(3, "Section A", 10, 7),
                    question(4, "Section B", 15, 13),
                    question(5, "Section B", 15, 12),
                    question(6, "Section C", 20, 15),
                    question(7, "Section C", 20, 14),
                ],
            },
            results: sample_results(),
            queries: sample_queries(),
        }
    }
}

fn sample_results() -> Vec<ResultRow> {
    let row = |id: &str,
               name: &str,
               roll: &str,
               (code, subject): (&str, &str),
               marks: u32,
               grade: Grade,
               status: ResultStatus,
               exam_type: &str,
               has_query: bool| ResultRow {
        student_id: id.to_string(),
        name: name.to_string(),
        roll_number: roll.to_string(),
        subject: subject.to_string(),
        subject_code: code.to_string(),
        marks_obtained: marks,
        total_marks: 100,
        grade,
        status,
        exam_type: exam_type.to_string(),
        has_query,
    };
    let dbms = ("CS601", "Database Management Systems");

    vec![
        row(
            "1",
            "Rahul Kumar",
            "CS2021045",
            dbms,
            78,
            Grade::A,
            ResultStatus::Pass,
            "End Semester",
            true,
        ),
        row(
            "2",
            "Priya Sharma",
            "CS2021032",
            dbms,
            85,
            Grade::APlus,
            ResultStatus::Pass,
            "End Semester",
            false,
        ),
        row(
            "3",
            "Amit Singh",
            "CS2021018",
            dbms,
            32,
            Grade::F,
            ResultStatus::Fail,
            "End Semester",
            true,
        ),
        row(
            "4",
            "Sneha Patel",
            "CS2021055",
            ("CS602", "Computer Networks"),
            72,
            Grade::BPlus,
            ResultStatus::Pass,
            "Mid Semester",
            false,
        ),
    ]
}

fn sample_queries() -> Vec<ReviewQuery> {
    vec![
        ReviewQuery {
            id: 1,
            student_name: "Rahul Kumar".to_string(),
            roll_number: "CS2021045".to_string(),
            subject: "Database Management Systems".to_string(),
            subject_code: "CS601".to_string(),
            query_type: QueryType::MarksDiscrepancy,
            question_no: "Q5".to_string(),
            page_number: "3".to_string(),
            description: "I believe my answer for Question 5 about normalization was correct. \
                          The solution I provided matches with the textbook definition and examples."
                .to_string(),
            status: QueryStatus::Pending,
            submitted_at: "2024-03-25 10:30 AM".to_string(),
            resolved_at: None,
            resolution: None,
        },
        ReviewQuery {
            id: 2,
            student_name: "Amit Singh".to_string(),
            roll_number: "CS2021018".to_string(),
            subject: "Database Management Systems".to_string(),
            subject_code: "CS601".to_string(),
            query_type: QueryType::AnswerNotEvaluated,
            question_no: "Q7".to_string(),
            page_number: "5".to_string(),
            description: "The last part of Question 7 regarding SQL joins seems to have been \
                          missed during evaluation. Please review page 5."
                .to_string(),
            status: QueryStatus::InReview,
            submitted_at: "2024-03-24 02:15 PM".to_string(),
            resolved_at: None,
            resolution: None,
        },
        ReviewQuery {
            id: 3,
            student_name: "Neha Verma".to_string(),
            roll_number: "CS2021029".to_string(),
            subject: "Computer Networks".to_string(),
            subject_code: "CS602".to_string(),
            query_type: QueryType::TotalingError,
            question_no: "All".to_string(),
            page_number: "-".to_string(),
            description: "There seems to be an error in the total marks calculation. \
                          Individual question marks sum up to 75 but total shows 70."
                .to_string(),
            status: QueryStatus::Resolved,
            submitted_at: "2024-03-23 11:00 AM".to_string(),
            resolved_at: Some("2024-03-24 09:00 AM".to_string()),
            resolution: Some(
                "Total marks corrected from 70 to 75. Updated result has been published."
                    .to_string(),
            ),
        },
    ]
}
