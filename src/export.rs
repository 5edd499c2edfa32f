use crate::models::ExamRecord;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Export question-wise marks of a record to a CSV file in `dir`
pub fn export_marks_csv(record: &ExamRecord, dir: &Path) -> Result<PathBuf> {
    if record.question_marks.is_empty() {
        anyhow::bail!("No question-wise marks to export");
    }

    // Generate filename with timestamp
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!(
        "marks_{}_{}_{}.csv",
        record.subject_code, record.roll_number, timestamp
    );
    let filepath = dir.join(filename);

    let mut wtr = csv::Writer::from_path(&filepath).context("Failed to create CSV file")?;

    wtr.write_record(["question", "section", "max_marks", "obtained_marks", "percentage"])
        .context("Failed to write CSV headers")?;

    for q in &record.question_marks {
        wtr.write_record([
            format!("Q{}", q.question_no),
            q.section_label().to_string(),
            q.max_marks.to_string(),
            q.obtained_marks.to_string(),
            q.percentage().to_string(),
        ])
        .context("Failed to write CSV record")?;
    }

    wtr.write_record([
        "Total".to_string(),
        String::new(),
        record.total_marks.to_string(),
        record.marks_obtained.to_string(),
        record.percentage().to_string(),
    ])
    .context("Failed to write CSV total")?;

    wtr.flush().context("Failed to flush CSV writer")?;

    Ok(filepath)
}

/// Save the fetched answer paper under its display title in `dir`
pub fn save_document(bytes: &[u8], title: &str, dir: &Path) -> Result<PathBuf> {
    let safe_title: String = title
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let filepath = dir.join(safe_title);
    std::fs::write(&filepath, bytes)
        .with_context(|| format!("Failed to write {}", filepath.display()))?;
    Ok(filepath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::resolver::{ExamRecordResolver, Resolution};
    use std::sync::Arc;

    fn sample_record() -> ExamRecord {
        let resolver = ExamRecordResolver::from_catalog(Arc::new(Catalog::sample()));
        match resolver.resolve("2", "CS601") {
            Resolution::Found(record) => record,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_export_marks_csv() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = export_marks_csv(&sample_record(), dir.path()).unwrap();
        assert!(filepath.exists());

        let mut rdr = csv::Reader::from_path(&filepath).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(&rows[0][0], "Q1");
        assert_eq!(&rows[0][1], "Section A");
        assert_eq!(&rows[0][4], "90");
        assert_eq!(&rows[7][0], "Total");
        assert_eq!(&rows[7][3], "78");
    }

    #[test]
    fn test_export_rejects_empty_marks() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = sample_record();
        record.question_marks.clear();
        assert!(export_marks_csv(&record, dir.path()).is_err());
    }

    #[test]
    fn test_save_document_sanitizes_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_document(b"%PDF-1.4", "CS601/../x.pdf", dir.path()).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }
}
