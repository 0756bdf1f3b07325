use colored::{ColoredString, Colorize};
use itertools::Itertools;

use crate::tally::{RowKind, Tally};

/// Where a cell sits in the grid, which decides its color.
struct Position {
    row: usize,
    column: usize,
    last_row: usize,
    last_column: usize,
    submerchant: bool,
}

impl Position {
    fn paint(&self, text: &str) -> ColoredString {
        if self.row == self.last_row || self.column == self.last_column {
            if self.submerchant {
                return text.yellow();
            }
            return text.red();
        }

        if self.row == 0 {
            return text.blue();
        }

        if self.submerchant {
            text.yellow()
        } else {
            text.cyan()
        }
    }
}

/// Lays the tally out as a fixed-width table. The name column is left
/// aligned and every amount column right aligned.
pub fn render(tally: &Tally) -> String {
    let rows = tally.rows();
    let mut widths = vec![0; tally.columns()];
    for row in rows {
        for (i, cell) in row.cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let last_row = rows.len().saturating_sub(1);
    let last_column = tally.columns().saturating_sub(1);

    rows.iter()
        .enumerate()
        .map(|(r, row)| {
            if row.kind == RowKind::Divider {
                return widths
                    .iter()
                    .map(|w| "-".repeat(*w).green().to_string())
                    .join(&"-+-".green().to_string());
            }

            row.cells
                .iter()
                .enumerate()
                .map(|(c, cell)| {
                    let fill = " ".repeat(widths[c] - cell.chars().count());
                    let painted = Position {
                        row: r,
                        column: c,
                        last_row,
                        last_column,
                        submerchant: row.kind == RowKind::Submerchant,
                    }
                    .paint(cell);

                    if c == 0 {
                        format!("{}{}", painted, fill)
                    } else {
                        format!("{}{}", fill, painted)
                    }
                })
                .join(&" | ".green().to_string())
        })
        .join("\n")
}
