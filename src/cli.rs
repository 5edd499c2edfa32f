use crate::models::ExamRecord;
use crate::resolver::{ExamRecordResolver, Resolution};
use anyhow::Result;
use clap::Parser;

/// View evaluated answer papers. Without a lookup the interactive portal starts.
#[derive(Debug, Parser)]
#[command(name = "answer_paper_viewer", version)]
pub struct Args {
    /// Student ID to look up (requires --subject)
    #[arg(long, requires = "subject")]
    pub student: Option<String>,

    /// Subject code to look up (requires --student)
    #[arg(long, requires = "student")]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub student_id: String,
    pub subject_code: String,
}

impl Args {
    pub fn lookup(&self) -> Option<Lookup> {
        match (&self.student, &self.subject) {
            (Some(student), Some(subject)) => Some(Lookup {
                student_id: student.clone(),
                subject_code: subject.clone(),
            }),
            _ => None,
        }
    }
}

/// Print a one-shot result summary instead of starting the portal.
pub fn print_lookup(resolver: &ExamRecordResolver, lookup: &Lookup) -> Result<()> {
    match resolver.resolve(&lookup.student_id, &lookup.subject_code) {
        Resolution::Found(record) => {
            println!("{}", summary(&record));
            Ok(())
        }
        Resolution::NotFound {
            student_id,
            subject_code,
        } => anyhow::bail!(
            "No evaluated answer paper for student {} in {}",
            student_id,
            subject_code
        ),
    }
}

fn summary(record: &ExamRecord) -> String {
    let mut out = format!(
        "{} ({})\n{} - {}\nMarks: {}/{} ({}%)  Grade: {}  {}\n",
        record.student_name,
        record.roll_number,
        record.subject_code,
        record.subject_name,
        record.marks_obtained,
        record.total_marks,
        record.percentage(),
        record.grade,
        record.status.label()
    );
    for section in record.sections() {
        out.push_str(&format!(
            "\n{} ({}/{})\n",
            section.name, section.obtained, section.max
        ));
        for q in &section.questions {
            out.push_str(&format!(
                "  Q{:<3} {:>3}/{:<3} {:>3}%\n",
                q.question_no,
                q.obtained_marks,
                q.max_marks,
                q.percentage()
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::sync::Arc;

    #[test]
    fn test_lookup_needs_both_arguments() {
        let args = Args::parse_from(["answer_paper_viewer"]);
        assert_eq!(args.lookup(), None);

        let args =
            Args::parse_from(["answer_paper_viewer", "--student", "1", "--subject", "CS601"]);
        assert_eq!(
            args.lookup(),
            Some(Lookup {
                student_id: "1".to_string(),
                subject_code: "CS601".to_string(),
            })
        );

        assert!(Args::try_parse_from(["answer_paper_viewer", "--student", "1"]).is_err());
    }

    #[test]
    fn test_summary_lists_sections() {
        let resolver = ExamRecordResolver::from_catalog(Arc::new(Catalog::sample()));
        let Resolution::Found(record) = resolver.resolve("1", "CS601") else {
            panic!("sample record missing");
        };
        let text = summary(&record);
        assert!(text.starts_with("Rahul Kumar (CS2021045)"));
        assert!(text.contains("Marks: 78/100 (78%)  Grade: A  PASSED"));
        assert!(text.contains("Section A"));
    }

    #[test]
    fn test_unknown_lookup_is_an_error() {
        let resolver = ExamRecordResolver::from_catalog(Arc::new(Catalog::sample()));
        let lookup = Lookup {
            student_id: "99".to_string(),
            subject_code: "CS601".to_string(),
        };
        assert!(print_lookup(&resolver, &lookup).is_err());
    }
}
