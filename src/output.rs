//! Report rendering for the two binaries.

use std::io::{self, Write};

use crate::count::CountOutcome;
use crate::github::error::HeadcountError;
use crate::unique::{AggregateReport, HarvestOutcome};

/// Writes per-repository fast-count results to the given writer.
///
/// # Errors
///
/// Returns [`HeadcountError::Io`] when the writer fails.
pub fn write_count_report<W: Write>(
    writer: &mut W,
    outcomes: &[CountOutcome],
) -> Result<(), HeadcountError> {
    for outcome in outcomes {
        match outcome {
            CountOutcome::Counted { repo, contributors } => {
                writeln!(writer, "{repo}: {contributors} contributors")
            }
            CountOutcome::Failed { input, error } => writeln!(writer, "{input}: {error}"),
        }
        .map_err(|error| io_error(&error))?;
    }
    Ok(())
}

/// Writes the aggregation summary and the sorted unique login list.
///
/// A run where nothing was collected reports zero distinctly rather than
/// failing.
///
/// # Errors
///
/// Returns [`HeadcountError::Io`] when the writer fails.
pub fn write_unique_report<W: Write>(
    writer: &mut W,
    report: &AggregateReport,
) -> Result<(), HeadcountError> {
    for outcome in &report.outcomes {
        match outcome {
            HarvestOutcome::Harvested { repo, pages, logins } => {
                writeln!(writer, "{repo}: {logins} logins from {pages} pages")
            }
            HarvestOutcome::Partial {
                repo,
                pages,
                logins,
                error,
            } => writeln!(
                writer,
                "{repo}: kept {logins} logins from {pages} pages before failure: {error}"
            ),
            HarvestOutcome::Invalid { input, error } => writeln!(writer, "{input}: {error}"),
        }
        .map_err(|error| io_error(&error))?;
    }

    writeln!(writer).map_err(|error| io_error(&error))?;

    if report.unique_logins.is_empty() {
        writeln!(writer, "No contributors found across the requested repositories.")
            .map_err(|error| io_error(&error))?;
        return Ok(());
    }

    for login in &report.unique_logins {
        writeln!(writer, "{login}").map_err(|error| io_error(&error))?;
    }
    writeln!(writer).map_err(|error| io_error(&error))?;
    writeln!(
        writer,
        "{count} unique contributors",
        count = report.unique_logins.len()
    )
    .map_err(|error| io_error(&error))
}

fn io_error(error: &io::Error) -> HeadcountError {
    HeadcountError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{write_count_report, write_unique_report};
    use crate::count::CountOutcome;
    use crate::github::error::HeadcountError;
    use crate::github::locator::RepoRef;
    use crate::unique::{AggregateReport, HarvestOutcome};

    fn rendered(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).expect("output should be valid UTF-8")
    }

    #[test]
    fn count_report_lists_counts_and_failures() {
        let outcomes = vec![
            CountOutcome::Counted {
                repo: RepoRef::parse("octo/repo").expect("should parse"),
                contributors: 42,
            },
            CountOutcome::Failed {
                input: "octo/missing".to_owned(),
                error: HeadcountError::Api {
                    status: 404,
                    message: "Not Found".to_owned(),
                },
            },
        ];

        let mut buffer = Vec::new();
        write_count_report(&mut buffer, &outcomes).expect("should write");

        let output = rendered(buffer);
        assert!(
            output.contains("octo/repo: 42 contributors"),
            "missing count line: {output}"
        );
        assert!(
            output.contains("octo/missing") && output.contains("Not Found"),
            "missing failure line: {output}"
        );
    }

    #[test]
    fn unique_report_lists_sorted_logins_and_total() {
        let report = AggregateReport {
            outcomes: vec![HarvestOutcome::Harvested {
                repo: RepoRef::parse("octo/repo").expect("should parse"),
                pages: 2,
                logins: 3,
            }],
            unique_logins: vec!["alice".to_owned(), "bob".to_owned(), "carol".to_owned()],
        };

        let mut buffer = Vec::new();
        write_unique_report(&mut buffer, &report).expect("should write");

        let output = rendered(buffer);
        assert!(
            output.contains("octo/repo: 3 logins from 2 pages"),
            "missing harvest line: {output}"
        );
        assert!(
            output.contains("alice\nbob\ncarol"),
            "logins should be listed in order: {output}"
        );
        assert!(
            output.contains("3 unique contributors"),
            "missing total line: {output}"
        );
    }

    #[test]
    fn unique_report_distinguishes_the_zero_result() {
        let report = AggregateReport {
            outcomes: vec![],
            unique_logins: vec![],
        };

        let mut buffer = Vec::new();
        write_unique_report(&mut buffer, &report).expect("should write");

        let output = rendered(buffer);
        assert!(
            output.contains("No contributors found"),
            "missing zero-result line: {output}"
        );
    }
}
