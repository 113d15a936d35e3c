use std::fmt::Write;

use super::grid::{GridCell, RotaGrid};
use crate::display::escape_html;

/// HTML table for the rota page. Week blocks are separated by a spacer row.
pub fn render_grid_html(grid: &RotaGrid) -> String {
    let columns = grid.users.len() + 1;
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<table class="rota-grid" data-rota-id="{}"><caption>{}</caption><thead><tr><th>Day</th>"#,
        grid.rota_id,
        escape_html(&grid.rota_name)
    );
    for user in &grid.users {
        let _ = write!(html, r#"<th data-user-id="{}">{}</th>"#, user.id, escape_html(&user.name));
    }
    html.push_str("</tr></thead><tbody>");

    for (index, week) in grid.weeks.iter().enumerate() {
        if index > 0 {
            let _ = write!(
                html,
                r#"<tr class="week-spacer"><td colspan="{}"></td></tr>"#,
                columns
            );
        }
        let _ = write!(
            html,
            r#"<tr class="week-label"><th colspan="{}">{}</th></tr>"#,
            columns,
            escape_html(&week.label)
        );

        for row in &week.rows {
            let _ = write!(html, r#"<tr data-date="{}"><th>{}</th>"#, row.date, escape_html(&row.label));
            for cell in &row.cells {
                html.push_str("<td>");
                render_cell(&mut html, cell);
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }
    }

    html.push_str("</tbody></table>");
    html
}

fn render_cell(html: &mut String, cell: &GridCell) {
    match cell {
        GridCell::Assigned { card } => {
            let _ = write!(
                html,
                r#"<div class="shift-card" style="background-color:{}"><span class="shift-name">{}</span><span class="shift-rate">{}</span><span class="shift-hours">{}</span><button class="shift-edit" data-cell-id="{}">Edit</button></div>"#,
                escape_html(&card.color),
                escape_html(&card.shift_name),
                escape_html(&card.rate),
                escape_html(&card.hours),
                card.cell_id
            );
        }
        GridCell::Empty {
            cell_id: Some(id), ..
        } => {
            let _ = write!(
                html,
                r#"<div class="shift-placeholder"><button class="shift-edit" data-cell-id="{}">Edit</button></div>"#,
                id
            );
        }
        GridCell::Empty { cell_id: None, .. } => {
            html.push_str(r#"<div class="shift-placeholder"></div>"#);
        }
    }
}
