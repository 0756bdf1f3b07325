use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    error::Error,
    ledger::Ledger,
    normalize::normalize,
    tally::{Filters, Tally},
};

/// Routes purchases to ledgers and builds the report. Ledgers are kept in
/// routing order: configured groups first, then merchants as first seen.
#[derive(Debug, Default)]
pub struct Registry {
    ledgers: Vec<Ledger>,
    labels: HashSet<String>,
    filters: Filters,
    tallied: Option<Tally>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers groups from a JSON object of group name to pattern array,
    /// in document order. Nothing is registered if any group is malformed.
    pub fn create_groups(&mut self, json: &str) -> Result<(), Error> {
        let root: Value = serde_json::from_str(json).map_err(|source| Error::MalformedConfig {
            reason: source.to_string(),
            source: Some(source),
        })?;
        let object = match root {
            Value::Object(object) => object,
            other => {
                return Err(Error::malformed(format!(
                    "expected an object of groups, found {}",
                    kind_of(&other)
                )))
            }
        };

        self.create_groups_from(parse_groups(object)?)
    }

    pub fn create_groups_from<I, S>(&mut self, groups: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: AsRef<str>,
    {
        let mut created = Vec::new();
        for (name, patterns) in groups {
            let mut ledger = Ledger::new(name.as_ref());
            ledger.group(patterns.as_slice())?;
            debug!(
                group = ledger.name(),
                patterns = ledger.patterns().len(),
                "registered group"
            );
            created.push(ledger);
        }

        self.ledgers.extend(created);
        self.tallied = None;

        Ok(())
    }

    pub fn purchase(&mut self, label: &str, merchant: &str, cost: f64) {
        let merchant = normalize(merchant);

        self.tallied = None;
        if !self.labels.contains(label) {
            self.labels.insert(label.to_owned());
        }

        match self.ledgers.iter_mut().find(|l| l.matches(&merchant)) {
            Some(ledger) => ledger.purchase(label, &merchant, cost),
            None => {
                trace!(merchant = merchant.as_str(), "new merchant");
                let mut ledger = Ledger::new(&merchant);
                ledger.purchase(label, &merchant, cost);
                self.ledgers.push(ledger);
            }
        }
    }

    pub fn set_filters(&mut self, filters: Filters) {
        if self.filters != filters {
            self.filters = filters;
            self.tallied = None;
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn labels(&self) -> &HashSet<String> {
        &self.labels
    }

    pub fn ledgers(&self) -> &[Ledger] {
        &self.ledgers
    }

    /// The sorted and filtered report, rebuilt only after purchases, groups
    /// or filters have changed.
    pub fn tally(&mut self) -> &Tally {
        self.tallied
            .get_or_insert_with(|| Tally::build(&self.ledgers, &self.labels, &self.filters))
    }
}

fn parse_groups(object: Map<String, Value>) -> Result<Vec<(String, Vec<String>)>, Error> {
    object
        .into_iter()
        .map(|(name, value)| {
            let patterns = match value {
                Value::Array(values) => values
                    .into_iter()
                    .map(|v| match v {
                        Value::String(pattern) => Ok(pattern),
                        other => Err(Error::malformed(format!(
                            "group {:?} has a non-string pattern {}",
                            name, other
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                other => {
                    return Err(Error::malformed(format!(
                        "group {:?} should be an array of patterns, found {}",
                        name,
                        kind_of(&other)
                    )))
                }
            };
            Ok((name, patterns))
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
