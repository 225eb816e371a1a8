//! Monospace rendering of the tabular report for the document sink.

use kakeibo_core::report::TabularReport;

/// Render a title plus the columns-and-rows payload as padded monospace
/// text. Widths count chars, not display cells, so wide glyphs shift the
/// grid slightly; the document sink tolerates that.
pub fn render(title: &str, report: &TabularReport) -> String {
    let mut widths: Vec<usize> = report.columns.iter().map(|c| c.chars().count()).collect();
    for row in &report.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(0);
                format!("{:<width$}", cell)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![title.to_string(), String::new()];
    lines.push(render_row(&report.columns));
    lines.push(
        widths
            .iter()
            .map(|w| "=".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &report.rows {
        lines.push(render_row(row));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> TabularReport {
        TabularReport {
            columns: vec!["item".to_string(), "amount".to_string()],
            rows: vec![
                vec!["rent".to_string(), "-98000".to_string()],
                vec!["groceries".to_string(), "-4500".to_string()],
            ],
        }
    }

    #[test]
    fn test_render_pads_columns() {
        let text = render("2026年7月の収支", &report());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "2026年7月の収支");
        assert_eq!(lines[2], "item       amount");
        assert_eq!(lines[3], "=========  ======");
        assert_eq!(lines[4], "rent       -98000");
        assert_eq!(lines[5], "groceries  -4500");
    }

    #[test]
    fn test_render_empty_rows_keeps_header() {
        let empty = TabularReport {
            columns: report().columns,
            rows: vec![],
        };
        let text = render("empty", &empty);
        assert!(text.contains("item"));
        assert_eq!(text.lines().count(), 4); // title, blank, header, rule
    }
}
