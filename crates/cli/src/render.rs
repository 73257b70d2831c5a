//! Plain-text sidebar output.

use navtree_engine::VisibleRow;

const INDENT: &str = "  ";

/// Formats one sidebar row: indentation, expand marker, optional depth badge and
/// the menu name, with `*` marking the active menu.
pub fn format_row(row: &VisibleRow<'_>, show_depth_indicator: bool) -> String {
    let marker = match (row.can_expand, row.node.is_expanded) {
        (true, true) => "▾",
        (true, false) => "▸",
        (false, _) => " ",
    };
    let active = if row.is_active { "*" } else { " " };
    let depth = if show_depth_indicator {
        format!("[{}] ", row.depth)
    } else {
        String::new()
    };
    format!(
        "{active} {indent}{marker} {depth}{name} ({id})",
        indent = INDENT.repeat(row.depth as usize),
        name = row.node.record.display_name(),
        id = row.node.menu_id(),
    )
}

pub fn format_rows(rows: &[VisibleRow<'_>], show_depth_indicator: bool) -> String {
    rows.iter()
        .map(|row| format_row(row, show_depth_indicator))
        .collect::<Vec<_>>()
        .join("\n")
}
