//! Spare-space distribution.
//!
//! When the measured columns leave part of the container unused, flexible
//! columns grow toward their content ceiling: prioritized columns first,
//! then everyone else. Space no column's content can use is spread evenly
//! as a last resort.

use crate::calculate::ColumnPlan;
use crate::trace::{debug_line, Trace};
use crate::types::SizingConfig;

/// Remaining space at or below this is treated as exhausted.
pub const EPSILON: f64 = 1e-9;

/// Grows flexible columns into leftover container space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpaceDistributor {
    enabled: bool,
    max_width: f64,
}

impl SpaceDistributor {
    pub fn new(config: &SizingConfig) -> Self {
        SpaceDistributor {
            enabled: config.distribute_remaining_space,
            max_width: config.default_max_width,
        }
    }

    /// Distribute `available - sum(widths)` across the flexible columns.
    ///
    /// Fixed columns are never touched. Returns `widths` unchanged when
    /// distribution is disabled or there is no spare space.
    pub fn distribute(
        &self,
        mut widths: Vec<f64>,
        available: f64,
        columns: &[ColumnPlan],
        trace: &mut Trace,
    ) -> Vec<f64> {
        if !self.enabled {
            debug_line!(trace, "spare space distribution disabled");
            return widths;
        }

        let total: f64 = widths.iter().sum();
        let mut remaining = available - total;
        debug_line!(
            trace,
            "total width {}px, available {}px, remaining {}px",
            total,
            available,
            remaining
        );

        let mut prioritized = Vec::new();
        let mut others = Vec::new();
        let mut at_max_width = Vec::new();
        for (index, (plan, width)) in columns.iter().zip(&widths).enumerate() {
            if plan.fixed {
                continue;
            }
            if plan.prioritized {
                prioritized.push(index);
            } else {
                others.push(index);
            }
            if *width >= self.max_width {
                at_max_width.push(index);
            }
        }

        distribute_equally(&mut widths, &prioritized, columns, &mut remaining);
        distribute_equally(&mut widths, &others, columns, &mut remaining);

        debug_line!(trace, "widths after distribution: {}", join(&widths));
        debug_line!(trace, "remaining after distribution: {}px", remaining);

        if remaining > EPSILON {
            let targets = if at_max_width.is_empty() {
                prioritized.iter().chain(&others).copied().collect::<Vec<_>>()
            } else {
                at_max_width
            };
            if targets.is_empty() {
                debug_line!(trace, "no flexible column can take the remaining {}px", remaining);
            } else {
                let share = remaining / targets.len() as f64;
                for index in targets {
                    widths[index] += share;
                }
                debug_line!(
                    trace,
                    "spread remaining space evenly, {}px each: {}",
                    share,
                    join(&widths)
                );
            }
        }

        widths
    }
}

/// Grow `set` in equal shares, never past a column's content ceiling,
/// until `remaining` is spent or a full pass adds nothing.
fn distribute_equally(
    widths: &mut [f64],
    set: &[usize],
    columns: &[ColumnPlan],
    remaining: &mut f64,
) {
    if set.is_empty() {
        return;
    }

    while *remaining > EPSILON {
        let share = *remaining / set.len() as f64;
        let mut added = false;

        for &index in set {
            let ceiling = columns[index].content_ceiling;
            if widths[index] < ceiling {
                let grow = share.min(ceiling - widths[index]);
                widths[index] += grow;
                *remaining -= grow;
                if grow > 0.0 {
                    added = true;
                }
            }
        }

        if !added {
            break;
        }
    }
}

pub(crate) fn join(widths: &[f64]) -> String {
    widths
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
