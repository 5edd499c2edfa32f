use std::fmt;

/// One of the five selectors on the search panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Student,
    Semester,
    ExamName,
    Subject,
    FeeStatus,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Student,
        FilterField::Semester,
        FilterField::ExamName,
        FilterField::Subject,
        FilterField::FeeStatus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Student => "Student ID",
            FilterField::Semester => "Semester",
            FilterField::ExamName => "Exam Name",
            FilterField::Subject => "Subject",
            FilterField::FeeStatus => "Fee Status",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FilterField::Student => "Select Student",
            FilterField::Semester => "Select Semester",
            FilterField::ExamName => "Select Exam",
            FilterField::Subject => "Select Subject",
            FilterField::FeeStatus => "Select Fee Status",
        }
    }

    pub fn next(&self) -> Self {
        let idx = FilterField::ALL.iter().position(|f| f == self).unwrap_or(0);
        FilterField::ALL[(idx + 1) % FilterField::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = FilterField::ALL.iter().position(|f| f == self).unwrap_or(0);
        FilterField::ALL[(idx + FilterField::ALL.len() - 1) % FilterField::ALL.len()]
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A selectable value for a filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub detail: Option<String>,
}

/// The five-field tuple identifying which answer paper to show.
/// An unset field is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub student_id: String,
    pub semester_id: String,
    pub exam_name_id: String,
    pub subject_code: String,
    pub fee_status: String,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_student(&mut self, value: impl Into<String>) {
        self.student_id = value.into();
    }

    pub fn set_semester(&mut self, value: impl Into<String>) {
        self.semester_id = value.into();
    }

    pub fn set_exam_name(&mut self, value: impl Into<String>) {
        self.exam_name_id = value.into();
    }

    pub fn set_subject(&mut self, value: impl Into<String>) {
        self.subject_code = value.into();
    }

    pub fn set_fee_status(&mut self, value: impl Into<String>) {
        self.fee_status = value.into();
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        match field {
            FilterField::Student => self.set_student(value),
            FilterField::Semester => self.set_semester(value),
            FilterField::ExamName => self.set_exam_name(value),
            FilterField::Subject => self.set_subject(value),
            FilterField::FeeStatus => self.set_fee_status(value),
        }
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Student => &self.student_id,
            FilterField::Semester => &self.semester_id,
            FilterField::ExamName => &self.exam_name_id,
            FilterField::Subject => &self.subject_code,
            FilterField::FeeStatus => &self.fee_status,
        }
    }

    pub fn is_complete(&self) -> bool {
        FilterField::ALL.iter().all(|f| !self.get(*f).is_empty())
    }

    pub fn missing_fields(&self) -> Vec<FilterField> {
        FilterField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
