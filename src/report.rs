//! Report rendering.
//!
//! Recommendations are flattened into [`ReportRow`]s, then written as a CSV
//! spreadsheet, a paginated plain-text summary, or a single-employee salary
//! slip.

use std::io::Write;

use rust_decimal::Decimal;

use crate::config::columns;
use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeRecommendation;

/// Header for the recommended salary.
pub const PREDICTED_SALARY: &str = "Predicted Salary";
/// Header for the low end of the range.
pub const LOW_RANGE: &str = "Low Range";
/// Header for the high end of the range.
pub const HIGH_RANGE: &str = "High Range";
/// Header for the budget used in bounding.
pub const DEPARTMENT_BUDGET: &str = "Department Budget";
/// Header for the parity score.
pub const PARITY_SCORE: &str = "Parity Score";
/// Header for the bias flag.
pub const BIAS_DETECTED: &str = "Bias Detected";

/// Columns every tabular report contains, in order.
pub const EXPECTED_COLUMNS: [&str; 9] = [
    columns::ID,
    columns::NAME,
    PREDICTED_SALARY,
    LOW_RANGE,
    HIGH_RANGE,
    DEPARTMENT_BUDGET,
    columns::MARKET_CTC,
    PARITY_SCORE,
    BIAS_DETECTED,
];

/// Placeholder for a column a row does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// One employee's report fields as an ordered column-to-value map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportRow {
    fields: Vec<(String, String)>,
}

impl ReportRow {
    /// Builds a row: record fields first, then the recommendation.
    pub fn from_recommendation(rec: &EmployeeRecommendation) -> Self {
        let employee = &rec.employee;
        let adjustment = &rec.adjustment;
        let mut row = Self::default();

        row.set(columns::ID, employee.id.to_string());
        row.set(columns::NAME, employee.name.clone());
        row.set(columns::EXPERIENCE, employee.experience.normalize().to_string());
        row.set(columns::PREVIOUS_SALARY, money(employee.previous_salary));
        row.set(columns::CURRENT_CTC, money(employee.current_ctc));
        row.set(columns::DEPARTMENT_BUDGET, money(employee.department_budget));
        row.set(columns::PERFORMANCE_RATING, employee.performance_rating.to_string());
        row.set(columns::TEAM_SIZE, employee.team_size.to_string());
        row.set(columns::AGE, employee.age.normalize().to_string());
        row.set(columns::PROMOTION, yes_no(employee.promotion).to_string());
        for attribute in &employee.attributes {
            row.set(&attribute.column, attribute.value.clone());
        }

        row.set(PREDICTED_SALARY, money(adjustment.optimal));
        row.set(LOW_RANGE, money(adjustment.low));
        row.set(HIGH_RANGE, money(adjustment.high));
        row.set(DEPARTMENT_BUDGET, money(adjustment.dept_budget));
        row.set(columns::MARKET_CTC, money(adjustment.market_ctc));
        row.set(PARITY_SCORE, rec.parity.score.to_string());
        row.set(BIAS_DETECTED, yes_no(rec.parity.bias_detected).to_string());
        row
    }

    /// Sets a field, replacing any existing value in place.
    pub fn set(&mut self, column: &str, value: String) {
        match self.fields.iter_mut().find(|(c, _)| c == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }

    /// Returns a field if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Returns a field, or "N/A" when the row does not carry it.
    pub fn get_or_na(&self, column: &str) -> &str {
        self.get(column).unwrap_or(NOT_AVAILABLE)
    }

    /// All fields in order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// Builds report rows for every recommendation, in order.
pub fn report_rows(recommendations: &[EmployeeRecommendation]) -> Vec<ReportRow> {
    recommendations.iter().map(ReportRow::from_recommendation).collect()
}

/// Writes the expected columns of every row as CSV.
///
/// # Examples
///
/// ```
/// use salary_advisor::report::{ReportRow, write_spreadsheet};
///
/// let mut row = ReportRow::default();
/// row.set("ID", "1".to_string());
///
/// let mut out = Vec::new();
/// write_spreadsheet(&[row], &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.lines().nth(1).unwrap().starts_with("1,N/A,N/A"));
/// ```
pub fn write_spreadsheet<W: Write>(rows: &[ReportRow], writer: W) -> EngineResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPECTED_COLUMNS).map_err(report_error)?;
    for row in rows {
        csv.write_record(EXPECTED_COLUMNS.iter().map(|column| row.get_or_na(column)))
            .map_err(report_error)?;
    }
    csv.flush().map_err(|e| EngineError::ReportError {
        message: e.to_string(),
    })
}

/// Renders the plain-text summary, `rows_per_page` employees per page,
/// pages separated by a form feed.
pub fn render_summary(rows: &[ReportRow], rows_per_page: usize) -> String {
    let per_page = rows_per_page.max(1);
    let pages: Vec<&[ReportRow]> = if rows.is_empty() {
        vec![rows]
    } else {
        rows.chunks(per_page).collect()
    };
    let page_count = pages.len();

    let rendered: Vec<String> = pages
        .iter()
        .enumerate()
        .map(|(page, chunk)| {
            let mut text = String::new();
            if page == 0 {
                text.push_str("Salary Prediction Summary Report\n\n");
            }
            if chunk.is_empty() {
                text.push_str("No employees.\n");
            }
            for (offset, row) in chunk.iter().enumerate() {
                text.push_str(&format!(
                    "{}. {} | Predicted: {} | Low: {} | High: {} | Parity: {} | Bias: {}\n",
                    page * per_page + offset + 1,
                    row.get_or_na(columns::NAME),
                    row.get_or_na(PREDICTED_SALARY),
                    row.get_or_na(LOW_RANGE),
                    row.get_or_na(HIGH_RANGE),
                    row.get_or_na(PARITY_SCORE),
                    row.get_or_na(BIAS_DETECTED),
                ));
            }
            text.push_str(&format!("\nPage {} of {}\n", page + 1, page_count));
            text
        })
        .collect();

    rendered.join("\u{000C}")
}

/// Renders a salary slip for one employee.
pub fn render_salary_slip(row: &ReportRow) -> String {
    let mut text = format!(
        "Salary Slip for {}\n\n",
        row.get(columns::NAME).unwrap_or("Employee")
    );
    for (column, value) in row.fields() {
        text.push_str(&format!("{}: {}\n", column, value));
    }
    text.push_str(&format!(
        "\nSalary Parity Score: {}\nBias Detected: {}\n",
        row.get_or_na(PARITY_SCORE),
        row.get_or_na(BIAS_DETECTED)
    ));
    text
}

fn money(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn report_error(error: csv::Error) -> EngineError {
    EngineError::ReportError {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{adjust_salary, analyze_parity};
    use crate::models::{Attribute, EmployeeRecord};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_recommendation(id: i64, name: &str) -> EmployeeRecommendation {
        let employee = EmployeeRecord {
            id,
            name: name.to_string(),
            experience: dec("5"),
            previous_salary: dec("750000"),
            current_ctc: dec("780000"),
            department_budget: dec("600000"),
            market_ctc: dec("900000"),
            performance_rating: 3,
            team_size: 2,
            promotion: true,
            age: dec("31"),
            attributes: vec![Attribute {
                column: "Job Role".to_string(),
                value: "Data Scientist".to_string(),
            }],
        };
        let adjustment = adjust_salary(dec("800000"), &employee.adjustment_input()).unwrap();
        let parity =
            analyze_parity(adjustment.optimal, adjustment.market_ctc, adjustment.dept_budget)
                .unwrap();
        EmployeeRecommendation {
            employee,
            adjustment,
            parity,
        }
    }

    #[test]
    fn test_row_carries_record_then_results() {
        let row = ReportRow::from_recommendation(&create_test_recommendation(1, "Asha"));

        assert_eq!(row.fields()[0], ("ID".to_string(), "1".to_string()));
        assert_eq!(row.get("Name"), Some("Asha"));
        assert_eq!(row.get("Job Role"), Some("Data Scientist"));
        assert_eq!(row.get("Predicted Salary"), Some("900000"));
        assert_eq!(row.get("Low Range"), Some("874000"));
        assert_eq!(row.get("High Range"), Some("900000"));
        assert_eq!(row.get("Department Budget"), Some("600000"));
        assert_eq!(row.get("Market CTC"), Some("900000"));
        assert_eq!(row.get("Parity Score"), Some("0.75"));
        assert_eq!(row.get("Bias Detected"), Some("Yes"));

        let last = row.fields().last().unwrap();
        assert_eq!(last.0, "Bias Detected");
    }

    #[test]
    fn test_missing_columns_render_as_na() {
        let row = ReportRow::default();
        assert_eq!(row.get_or_na("Parity Score"), "N/A");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut row = ReportRow::default();
        row.set("A", "1".to_string());
        row.set("B", "2".to_string());
        row.set("A", "3".to_string());

        assert_eq!(row.fields().len(), 2);
        assert_eq!(row.fields()[0], ("A".to_string(), "3".to_string()));
    }

    #[test]
    fn test_spreadsheet_has_expected_columns() {
        let rows = report_rows(&[create_test_recommendation(1, "Asha")]);
        let mut out = Vec::new();
        write_spreadsheet(&rows, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Name,Predicted Salary,Low Range,High Range,Department Budget,Market CTC,Parity Score,Bias Detected")
        );
        assert_eq!(
            lines.next(),
            Some("1,Asha,900000,874000,900000,600000,900000,0.75,Yes")
        );
    }

    #[test]
    fn test_summary_paginates_with_form_feeds() {
        let recs: Vec<EmployeeRecommendation> = (1..=5)
            .map(|i| create_test_recommendation(i, &format!("Employee {}", i)))
            .collect();
        let summary = render_summary(&report_rows(&recs), 2);

        let pages: Vec<&str> = summary.split('\u{000C}').collect();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].starts_with("Salary Prediction Summary Report"));
        assert!(pages[0].contains("1. Employee 1 | Predicted: 900000"));
        assert!(pages[2].contains("5. Employee 5"));
        assert!(pages[2].contains("Page 3 of 3"));
    }

    #[test]
    fn test_empty_summary_has_one_page() {
        let summary = render_summary(&[], 35);
        assert!(summary.contains("No employees."));
        assert!(summary.contains("Page 1 of 1"));
        assert!(!summary.contains('\u{000C}'));
    }

    #[test]
    fn test_slip_ends_with_parity_and_bias() {
        let row = ReportRow::from_recommendation(&create_test_recommendation(7, "Meera"));
        let slip = render_salary_slip(&row);

        assert!(slip.starts_with("Salary Slip for Meera"));
        assert!(slip.contains("Promotion: Yes\n"));
        assert!(slip.contains("Salary Parity Score: 0.75\n"));
        assert!(slip.trim_end().ends_with("Bias Detected: Yes"));
    }
}
