//! Header group widths.
//!
//! A group's spanning header covers its member columns, so its width is
//! derived from theirs: member widths plus each member header's own
//! padding and border, the gaps between members, and the group's own box.

use std::collections::BTreeMap;

use crate::grid::Grid;
use crate::style::StyleProvider;
use crate::trace::{debug_line, Trace};

/// Compute the width of every declared group with at least one member.
pub fn group_widths(
    grid: &Grid,
    widths: &[f64],
    styles: &dyn StyleProvider,
    trace: &mut Trace,
) -> BTreeMap<String, f64> {
    let mut result = BTreeMap::new();

    for group in grid.header_groups() {
        let members = grid.group_members(&group.name);
        if members.is_empty() {
            debug_line!(trace, "group \"{}\" has no member columns, skipped", group.name);
            continue;
        }

        let columns: f64 = members
            .iter()
            .map(|&i| widths.get(i).copied().unwrap_or(0.0))
            .sum();
        let member_boxes: f64 = members
            .iter()
            .map(|&i| styles.header_style(i).horizontal_extent())
            .sum();
        let own = styles.group_box(&group.name);
        let gaps = own.gap * (members.len() - 1) as f64;
        let width = columns + member_boxes + gaps + own.horizontal();

        debug_line!(
            trace,
            "group \"{}\": columns {:?}, width {}px",
            group.name,
            members,
            width
        );
        result.insert(group.name.clone(), width);
    }

    result
}
