use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

pub fn title(text: &str) -> String {
    style(text).bold().underlined().to_string()
}

pub fn subtle(text: &str) -> String {
    style(text).dim().to_string()
}

/// Rounded-corner table whose header row is the given column names in bold cyan.
pub fn table_with_columns(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(|name| {
            Cell::new(name)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        }));
    table
}

/// Right-aligned cell for a price, printed with the snapshot's 6 decimals.
pub fn rate_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.6}")).set_alignment(CellAlignment::Right)
}
