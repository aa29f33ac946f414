//! CSV rendering

use crate::error::{AppError, AppResult};

use super::ReportTable;

/// Render a table as CSV: one header record, then the rows in the order the
/// aggregation engine produced them. The header is present even when there
/// are no data rows.
pub fn render_csv(table: &ReportTable) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(&table.columns)
        .map_err(|e| AppError::RenderError(format!("CSV header: {}", e)))?;
    for row in &table.rows {
        wtr.write_record(row)
            .map_err(|e| AppError::RenderError(format!("CSV row: {}", e)))?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::RenderError(format!("CSV writer: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<String>>) -> ReportTable {
        ReportTable {
            title: "Sales & Profit Report".to_string(),
            caption: None,
            columns: ["Product Name", "Total Sold", "Revenue", "Cost", "Profit"]
                .into_iter()
                .map(String::from)
                .collect(),
            rows,
        }
    }

    #[test]
    fn header_present_with_zero_rows() {
        let bytes = render_csv(&table(vec![])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "Product Name,Total Sold,Revenue,Cost,Profit\n");
    }

    #[test]
    fn one_record_per_row_in_input_order() {
        let rows = vec![
            vec!["Mug".into(), "8".into(), "80.00".into(), "56.00".into(), "24.00".into()],
            vec!["Hat".into(), "2".into(), "50.00".into(), "36.00".into(), "14.00".into()],
        ];
        let bytes = render_csv(&table(rows)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Mug,8,80.00,56.00,24.00");
        assert_eq!(lines[2], "Hat,2,50.00,36.00,14.00");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let rows = vec![vec![
            "T-Shirt, Blue".into(),
            "3".into(),
            "60.00".into(),
            "42.00".into(),
            "18.00".into(),
        ]];
        let bytes = render_csv(&table(rows)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"T-Shirt, Blue\""));
    }
}
