//! Terminal rendering of query results and the schema list

use comfy_table::{
    Attribute, Cell, Color, ContentArrangement, Row, Table, presets::UTF8_FULL_CONDENSED,
};
use tabula_core::{QueryResult, TableDescriptor, settings::Striping};

const HEADER_FG: Color = Color::White;
const HEADER_BG: Color = Color::DarkBlue;
const ROW_FG: Color = Color::Black;
const ROW_BG_EVEN: Color = Color::Grey;
const ROW_BG_ODD: Color = Color::White;

/// Background of a body cell given its row and column index
fn cell_background(striping: Striping, row: usize, column: usize) -> Color {
    let index = match striping {
        Striping::Column => column,
        Striping::Row => row,
    };
    if index % 2 == 0 { ROW_BG_EVEN } else { ROW_BG_ODD }
}

/// Build the result grid. Column widths follow the content.
pub fn result_table(result: &QueryResult, striping: Striping) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if !result.headers.is_empty() {
        let header = Row::from(
            result
                .headers
                .iter()
                .map(|h| {
                    Cell::new(h)
                        .add_attribute(Attribute::Bold)
                        .fg(HEADER_FG)
                        .bg(HEADER_BG)
                })
                .collect::<Vec<_>>(),
        );
        table.set_header(header);
    }

    for (row_index, row) in result.rows.iter().enumerate() {
        let cells = row
            .iter()
            .enumerate()
            .map(|(column_index, value)| {
                Cell::new(value)
                    .fg(ROW_FG)
                    .bg(cell_background(striping, row_index, column_index))
            })
            .collect::<Vec<_>>();
        table.add_row(cells);
    }

    table
}

/// Render a result grid followed by its row count
pub fn render_result(result: &QueryResult, striping: Striping) -> String {
    let rows = result.row_count();
    format!(
        "{}\n({} row{})",
        result_table(result, striping),
        rows,
        if rows == 1 { "" } else { "s" }
    )
}

/// Render each table with one `- name (TYPE)` line per column
pub fn render_schema(tables: &[TableDescriptor]) -> String {
    if tables.is_empty() {
        return "No tables found.".to_string();
    }

    let mut out = String::new();
    for table in tables {
        out.push_str(&table.name);
        out.push('\n');
        if table.columns.is_empty() {
            out.push_str("  No columns defined.\n");
        }
        for column in &table.columns {
            out.push_str(&format!("  - {} ({})\n", column.name, column.data_type));
        }
    }
    out.pop();
    out
}
