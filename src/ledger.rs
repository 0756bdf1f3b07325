use std::collections::HashMap;

use crate::{error::Error, pattern::Pattern};

pub type LabelCosts = HashMap<String, f64>;

/// Spending for either a single merchant or a named group of merchants.
/// Costs are kept per sub-merchant so grouped ledgers can be expanded.
#[derive(Debug, Default)]
pub struct Ledger {
    name: String,
    patterns: Vec<Pattern>,
    costs: HashMap<String, LabelCosts>,
}

impl Ledger {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_group(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// Adds patterns used to fold other merchant names into this ledger.
    /// Nothing from this call is kept if any pattern fails to compile.
    pub fn group<S: AsRef<str>>(&mut self, raw: &[S]) -> Result<(), Error> {
        let parsed = raw
            .iter()
            .map(|r| Pattern::parse(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        self.patterns.extend(parsed.into_iter().flatten());

        Ok(())
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name)) || self.name == name
    }

    pub fn purchase(&mut self, label: &str, sub_merchant: &str, cost: f64) {
        *self
            .costs
            .entry(sub_merchant.to_owned())
            .or_default()
            .entry(label.to_owned())
            .or_default() += cost;
    }

    pub fn totals(&self) -> LabelCosts {
        let mut totals = LabelCosts::new();
        for costs in self.costs.values() {
            for (label, cost) in costs.iter() {
                *totals.entry(label.clone()).or_default() += cost;
            }
        }
        totals
    }

    /// Per sub-merchant costs, only for groups. An ungrouped ledger's single
    /// sub-merchant is itself, so its subtotals would repeat `totals`.
    pub fn subtotals(&self) -> Option<&HashMap<String, LabelCosts>> {
        if self.is_group() {
            Some(&self.costs)
        } else {
            None
        }
    }
}
