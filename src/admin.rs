use crate::models::{QueryStatus, ResultRow, ResultStatus, ReviewQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentStatusFilter {
    #[default]
    All,
    Passed,
    Failed,
}

impl StudentStatusFilter {
    pub const ALL: [StudentStatusFilter; 3] = [
        StudentStatusFilter::All,
        StudentStatusFilter::Passed,
        StudentStatusFilter::Failed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StudentStatusFilter::All => "All Students",
            StudentStatusFilter::Passed => "Passed",
            StudentStatusFilter::Failed => "Failed",
        }
    }

    fn matches(&self, status: ResultStatus) -> bool {
        match self {
            StudentStatusFilter::All => true,
            StudentStatusFilter::Passed => status == ResultStatus::Pass,
            StudentStatusFilter::Failed => status == ResultStatus::Fail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatusFilter {
    #[default]
    All,
    Only(QueryStatus),
}

impl QueryStatusFilter {
    pub const ALL: [QueryStatusFilter; 5] = [
        QueryStatusFilter::All,
        QueryStatusFilter::Only(QueryStatus::Pending),
        QueryStatusFilter::Only(QueryStatus::InReview),
        QueryStatusFilter::Only(QueryStatus::Resolved),
        QueryStatusFilter::Only(QueryStatus::Rejected),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QueryStatusFilter::All => "All Queries",
            QueryStatusFilter::Only(status) => status.label(),
        }
    }
}

/// Step to the next (or previous) value of a fixed option list, wrapping around.
pub fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let len = options.len();
    if forward {
        options[(idx + 1) % len]
    } else {
        options[(idx + len - 1) % len]
    }
}

fn matches_search(search: &str, name: &str, roll_number: &str) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || name.to_lowercase().contains(&needle)
        || roll_number.to_lowercase().contains(&needle)
}

pub fn filter_results<'a>(
    rows: &'a [ResultRow],
    search: &str,
    status: StudentStatusFilter,
) -> Vec<&'a ResultRow> {
    rows.iter()
        .filter(|r| matches_search(search, &r.name, &r.roll_number) && status.matches(r.status))
        .collect()
}

pub fn filter_queries<'a>(
    queries: &'a [ReviewQuery],
    search: &str,
    status: QueryStatusFilter,
) -> Vec<&'a ReviewQuery> {
    queries
        .iter()
        .filter(|q| {
            let status_ok = match status {
                QueryStatusFilter::All => true,
                QueryStatusFilter::Only(s) => q.status == s,
            };
            status_ok && matches_search(search, &q.student_name, &q.roll_number)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminStats {
    pub total_students: usize,
    pub total_queries: usize,
    pub pending_queries: usize,
    pub resolved_queries: usize,
}

impl AdminStats {
    pub fn calculate(rows: &[ResultRow], queries: &[ReviewQuery]) -> Self {
        let count = |status: QueryStatus| queries.iter().filter(|q| q.status == status).count();
        Self {
            total_students: rows.len(),
            total_queries: queries.len(),
            pending_queries: count(QueryStatus::Pending),
            resolved_queries: count(QueryStatus::Resolved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_filter_results_by_search_and_status() {
        let catalog = Catalog::sample();

        let all = filter_results(&catalog.results, "", StudentStatusFilter::All);
        assert_eq!(all.len(), 4);

        let by_name = filter_results(&catalog.results, "  PRIYA ", StudentStatusFilter::All);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].roll_number, "CS2021032");

        let by_roll = filter_results(&catalog.results, "cs20210", StudentStatusFilter::Failed);
        assert_eq!(by_roll.len(), 1);
        assert_eq!(by_roll[0].name, "Amit Singh");

        let passed = filter_results(&catalog.results, "", StudentStatusFilter::Passed);
        assert_eq!(passed.len(), 3);
    }

    #[test]
    fn test_filter_queries() {
        let catalog = Catalog::sample();
        let pending = filter_queries(
            &catalog.queries,
            "",
            QueryStatusFilter::Only(QueryStatus::Pending),
        );
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].student_name, "Rahul Kumar");

        let pending_only = QueryStatusFilter::Only(QueryStatus::Pending);
        assert!(filter_queries(&catalog.queries, "neha", pending_only).is_empty());
        assert_eq!(
            filter_queries(&catalog.queries, "CS2021029", QueryStatusFilter::All).len(),
            1
        );
    }

    #[test]
    fn test_stats() {
        let catalog = Catalog::sample();
        let stats = AdminStats::calculate(&catalog.results, &catalog.queries);
        assert_eq!(
            stats,
            AdminStats {
                total_students: 4,
                total_queries: 3,
                pending_queries: 1,
                resolved_queries: 1,
            }
        );
    }

    #[test]
    fn test_cycle_wraps() {
        let opts = StudentStatusFilter::ALL;
        assert_eq!(cycle(&opts, StudentStatusFilter::Failed, true), StudentStatusFilter::All);
        assert_eq!(cycle(&opts, StudentStatusFilter::All, false), StudentStatusFilter::Failed);
    }
}
