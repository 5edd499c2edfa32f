pub mod pdf;

use crate::catalog::Catalog;
use crate::error::{self, ViewerError};
use crate::models::{ExamRecord, Grade, ResultStatus};
use anyhow::{Context, Result};

pub use pdf::count_pdf_pages;

/// Parse catalog YAML content and check its invariants
pub fn parse_catalog(yaml_content: &str) -> Result<Catalog> {
    let catalog: Catalog =
        serde_yaml::from_str(yaml_content).context("Failed to parse catalog YAML")?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

/// Load and parse a catalog file from disk
pub fn load_catalog(path: &std::path::Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("Invalid catalog {}", path.display()))
}

fn validate_catalog(catalog: &Catalog) -> error::Result<()> {
    if catalog.students.is_empty() {
        return Err(ViewerError::catalog("Catalog has no students"));
    }
    if catalog.subjects.is_empty() {
        return Err(ViewerError::catalog("Catalog has no subjects"));
    }
    if catalog.semesters.is_empty() || catalog.exam_names.is_empty() {
        return Err(ViewerError::catalog(
            "Catalog needs at least one semester and one exam name",
        ));
    }
    if catalog.fee_statuses.is_empty() {
        return Err(ViewerError::catalog("Catalog has no fee status options"));
    }

    let mut ids: Vec<&str> = catalog.students.iter().map(|s| s.id.as_str()).collect();
    ids.sort_unstable();
    if ids.windows(2).any(|w| w[0] == w[1]) || ids.contains(&"") {
        return Err(ViewerError::catalog("Student ids must be unique and non-empty"));
    }

    // Shape-check the marking template through the same rules a resolved record obeys.
    let marking = &catalog.marking;
    let template_record = ExamRecord {
        student_name: String::new(),
        roll_number: String::new(),
        semester: marking.semester.clone(),
        subject_code: String::new(),
        subject_name: String::new(),
        exam_date: marking.exam_date.clone(),
        exam_time: marking.exam_time.clone(),
        marks_obtained: marking.marks_obtained,
        total_marks: marking.total_marks,
        grade: marking.grade,
        status: marking.status,
        evaluated_by: marking.evaluated_by.clone(),
        evaluated_date: marking.evaluated_date.clone(),
        question_marks: marking.question_marks.clone(),
    };
    template_record
        .validate()
        .map_err(|e| ViewerError::catalog(format!("Invalid marking template: {}", e)))?;

    for row in &catalog.results {
        if row.total_marks == 0 || row.marks_obtained > row.total_marks {
            return Err(ViewerError::catalog(format!(
                "Result row for {} has marks {}/{}",
                row.roll_number, row.marks_obtained, row.total_marks
            )));
        }
        if row.grade == Grade::F && row.status == ResultStatus::Pass {
            return Err(ViewerError::catalog(format!(
                "Result row for {} passes with grade F",
                row.roll_number
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_YAML: &str = r#"
students:
  - id: "1"
    name: "Rahul Kumar"
    roll_number: "CS2021045"
  - id: "7"
    name: "Kavya Rao"
    roll_number: "EE2021007"
semesters:
  - id: "sem6"
    name: "6th Semester - Spring 2024"
exam_names:
  - id: "end_sem"
    name: "End Semester"
subjects:
  - code: "EE601"
    name: "Power Systems"
marking:
  semester: "6th Semester - Spring 2024"
  exam_date: "March 18, 2024"
  exam_time: "2:00 PM - 5:00 PM"
  marks_obtained: 35
  total_marks: 50
  grade: "B+"
  status: pass
  question_marks:
    - question_no: 1
      section: "Part I"
      max_marks: 25
      obtained_marks: 20
    - question_no: 2
      max_marks: 25
      obtained_marks: 15
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(CATALOG_YAML).unwrap();
        assert_eq!(catalog.students.len(), 2);
        assert_eq!(catalog.subject("EE601").unwrap().name, "Power Systems");
        assert_eq!(catalog.marking.grade, Grade::BPlus);
        assert_eq!(catalog.marking.status, ResultStatus::Pass);
        assert_eq!(catalog.marking.question_marks[1].section, None);
        // Fee statuses default when omitted.
        assert_eq!(catalog.fee_statuses.len(), 2);
        assert!(catalog.results.is_empty());
    }

    #[test]
    fn test_parse_catalog_rejects_overscored_question() {
        let yaml = CATALOG_YAML.replace("obtained_marks: 20", "obtained_marks: 26");
        let err = parse_catalog(&yaml).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid marking template"));
    }

    #[test]
    fn test_parse_catalog_rejects_duplicate_students() {
        let yaml = CATALOG_YAML.replace("id: \"7\"", "id: \"1\"");
        assert!(parse_catalog(&yaml).is_err());
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_yaml() {
        assert!(parse_catalog("students: [").is_err());
    }
}
