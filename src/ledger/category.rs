use std::collections::HashMap;

use super::transaction::Transaction;

/// Cumulative spend recorded against a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
}

impl CategoryTotal {
    pub fn new(name: impl Into<String>, total: f64) -> Self {
        Self {
            name: name.into(),
            total,
        }
    }
}

/// Category totals kept in first-appearance order.
///
/// The index is a cache over the transaction log: every update goes through
/// [`CategoryIndex::record`], and [`CategoryIndex::from_transactions`] rebuilds it
/// from scratch.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    entries: Vec<CategoryTotal>,
    positions: HashMap<String, usize>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut index = Self::new();
        for txn in transactions {
            index.record(&txn.category, txn.amount);
        }
        index
    }

    pub(crate) fn record(&mut self, category: &str, amount: f64) {
        match self.positions.get(category) {
            Some(&position) => self.entries[position].total += amount,
            None => {
                self.positions
                    .insert(category.to_string(), self.entries.len());
                self.entries.push(CategoryTotal::new(category, amount));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.positions
            .get(category)
            .map(|&position| self.entries[position].total)
    }

    /// Iterates totals in the order each category was first spent on.
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.entries.iter()
    }

    /// Totals ordered lexicographically by category name.
    pub fn sorted_by_name(&self) -> Vec<CategoryTotal> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
