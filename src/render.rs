use std::fmt::Write as _;

use crate::report::ReportTable;

const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 8px;";

/// Render a report as the email-friendly HTML the mailer expects:
/// one heading and one grid per park, costs linked to the booking page.
pub fn render_report(table: &ReportTable) -> String {
    let mut html = String::new();

    for park in &table.locations {
        let _ = write!(html, "<h2 style='color:#A8E1D4;'>{}</h2>", park.location);
        let _ = write!(
            html,
            "<table style='border-collapse: collapse; width: 100%;'><thead><tr>\
             <th style='{CELL_STYLE}'>Time Slot</th>"
        );
        for date in &park.dates {
            let _ = write!(
                html,
                "<th style='{CELL_STYLE}'>{}</th>",
                date.format("%a, %b %d")
            );
        }
        html.push_str("</tr></thead><tbody>");

        for (time, row) in park.times.iter().zip(&park.rows) {
            html.push_str("<tr>");
            let _ = write!(html, "<td style='{CELL_STYLE}'>{time}</td>");
            for cell in row {
                match cell {
                    Some(cell) => {
                        let _ = write!(
                            html,
                            "<td style='{CELL_STYLE}'>\
                             <a href=\"{}\" target=\"_blank\">{}</a></td>",
                            cell.url, cell.cost
                        );
                    }
                    None => {
                        let _ = write!(html, "<td style='{CELL_STYLE}'></td>");
                    }
                }
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody></table>");
    }

    html
}
