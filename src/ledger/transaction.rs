use chrono::{DateTime, Utc};

/// One recorded expenditure. Transactions are never edited once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub category: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(category: impl Into<String>, amount: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            category: category.into(),
            amount,
            timestamp,
        }
    }

    /// Unix timestamp in whole seconds, as written to ledger dumps.
    pub fn unix_timestamp(&self) -> i64 {
        self.timestamp.timestamp()
    }
}

/// Append-only transaction history in insertion (chronological) order.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    entries: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, transaction: Transaction) {
        self.entries.push(transaction);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Transactions stamped strictly after `cutoff`.
    pub fn since(&self, cutoff: DateTime<Utc>) -> impl Iterator<Item = &Transaction> + '_ {
        self.entries.iter().filter(move |txn| txn.timestamp > cutoff)
    }
}

impl<'a> IntoIterator for &'a TransactionStore {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Transaction> for TransactionStore {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    #[test]
    fn store_preserves_insertion_order() {
        let mut store = TransactionStore::new();
        store.push(Transaction::new("rent", 500.0, at(10)));
        store.push(Transaction::new("food", 20.0, at(5)));
        let categories: Vec<&str> = store.iter().map(|txn| txn.category.as_str()).collect();
        assert_eq!(categories, vec!["rent", "food"]);
    }

    #[test]
    fn since_excludes_cutoff_instant() {
        let store: TransactionStore = vec![
            Transaction::new("a", 1.0, at(100)),
            Transaction::new("b", 2.0, at(200)),
            Transaction::new("c", 3.0, at(300)),
        ]
        .into_iter()
        .collect();
        let recent: Vec<&str> = store.since(at(200)).map(|txn| txn.category.as_str()).collect();
        assert_eq!(recent, vec!["c"]);
    }
}
