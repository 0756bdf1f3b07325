use std::collections::HashSet;

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::ledger::{LabelCosts, Ledger};

const IGNORED: &str = "ignore";

/// Report options supplied by the host before tallying.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub exclude: Vec<String>,
    pub include: Vec<String>,
    pub expand: bool,
}

impl Filters {
    /// Exclusions win over inclusions. Without an include list, a ledger
    /// named "ignore" is hidden.
    pub fn filtered(&self, name: &str) -> bool {
        if self.exclude.iter().any(|ex| eq_ignore_case(ex, name)) {
            return true;
        }

        if self.include.is_empty() {
            return eq_ignore_case(name, IGNORED);
        }

        !self.include.iter().any(|inc| eq_ignore_case(inc, name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Header,
    Divider,
    Merchant,
    Submerchant,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub kind: RowKind,
    pub cells: Vec<String>,
}

/// The finished report grid. Every row has `columns()` cells: the name, one
/// per label and the row total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tally {
    labels: Vec<String>,
    rows: Vec<Row>,
}

impl Tally {
    pub fn build(ledgers: &[Ledger], labels: &HashSet<String>, filters: &Filters) -> Self {
        let labels = labels
            .iter()
            .sorted_by(|a, b| case_insensitive(a, b))
            .cloned()
            .collect_vec();

        let visible = ledgers
            .iter()
            .sorted_by(|a, b| case_insensitive(a.name(), b.name()))
            .filter(|ledger| !filters.filtered(ledger.name()))
            .collect_vec();

        debug!(
            labels = labels.len(),
            ledgers = ledgers.len(),
            visible = visible.len(),
            "tallying"
        );

        let mut rows = Vec::new();
        rows.push(Row {
            kind: RowKind::Header,
            cells: std::iter::once("Merchant".to_owned())
                .chain(labels.iter().cloned())
                .chain(std::iter::once("Total".to_owned()))
                .collect(),
        });
        rows.push(divider(labels.len()));

        let mut label_totals = vec![0.0; labels.len()];

        for ledger in visible.iter() {
            let totals = ledger.totals();
            for (i, label) in labels.iter().enumerate() {
                label_totals[i] += totals.get(label).copied().unwrap_or_default();
            }

            rows.push(Row {
                kind: RowKind::Merchant,
                cells: cost_cells(ledger.name().to_owned(), &labels, &totals),
            });

            if !filters.expand {
                continue;
            }

            if let Some(subtotals) = ledger.subtotals() {
                for (name, costs) in subtotals
                    .iter()
                    .sorted_by(|(a, _), (b, _)| case_insensitive(a, b))
                {
                    rows.push(Row {
                        kind: RowKind::Submerchant,
                        cells: cost_cells(format!(" \\_ {}", name), &labels, costs),
                    });
                }
            }
        }

        rows.push(divider(labels.len()));

        // Sum of an empty f64 iterator is -0.0, which would print "-0.00".
        let grand_total = label_totals.iter().fold(0.0, |acc, v| acc + v);
        rows.push(Row {
            kind: RowKind::Total,
            cells: std::iter::once("Total".to_owned())
                .chain(label_totals.iter().map(|v| money(*v)))
                .chain(std::iter::once(money(grand_total)))
                .collect(),
        });

        Self { labels, rows }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> usize {
        self.labels.len() + 2
    }
}

fn divider(labels: usize) -> Row {
    Row {
        kind: RowKind::Divider,
        cells: vec![String::new(); labels + 2],
    }
}

/// A label without any purchases renders as "0" rather than "0.00" so that
/// no activity stands apart from purchases that cancel out.
fn cost_cells(name: String, labels: &[String], costs: &LabelCosts) -> Vec<String> {
    let mut cells = Vec::with_capacity(labels.len() + 2);
    cells.push(name);

    let mut total = 0.0;
    for label in labels {
        match costs.get(label) {
            Some(cost) => {
                total += cost;
                cells.push(money(*cost));
            }
            None => cells.push("0".to_owned()),
        }
    }

    cells.push(money(total));
    cells
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn case_insensitive(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
