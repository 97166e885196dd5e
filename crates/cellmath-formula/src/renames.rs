//! Variable rename table
//!
//! Maps canonical (upper-case) cell-reference names to the symbol shown in the
//! rendered notation. The engine only ever reads it; callers grow it as new
//! references show up in the formula being edited.

use crate::options::TokenizerOptions;
use crate::tokenizer::detect_variables;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cell reference → display symbol
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "BTreeMap<String, String>"))]
#[cfg_attr(feature = "serde", serde(into = "BTreeMap<String, String>"))]
pub struct RenameTable {
    symbols: BTreeMap<String, String>,
}

impl RenameTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the symbol for a reference, replacing any previous one
    pub fn insert(&mut self, reference: &str, symbol: impl Into<String>) -> Option<String> {
        self.symbols.insert(canonical(reference), symbol.into())
    }

    /// Remove the symbol for a reference
    pub fn remove(&mut self, reference: &str) -> Option<String> {
        self.symbols.remove(&canonical(reference))
    }

    /// Symbol for a reference; empty symbols count as absent
    pub fn get(&self, reference: &str) -> Option<&str> {
        self.symbols
            .get(&canonical(reference))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Symbol for a reference, or the canonical name itself
    pub fn resolve(&self, reference: &str) -> String {
        match self.get(reference) {
            Some(symbol) => symbol.to_string(),
            None => canonical(reference),
        }
    }

    /// Add an identity entry for every reference in `formula` not yet in the table.
    /// Returns the names that were added.
    pub fn seed_from_formula(&mut self, formula: &str, options: &TokenizerOptions) -> Vec<String> {
        let mut added = Vec::new();
        for name in detect_variables(formula, options) {
            if !self.symbols.contains_key(&name) {
                self.symbols.insert(name.clone(), name.clone());
                added.push(name);
            }
        }
        if !added.is_empty() {
            tracing::debug!("seeded rename table with {:?}", added);
        }
        added
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn canonical(reference: &str) -> String {
    reference.to_uppercase()
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RenameTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = RenameTable::new();
        for (reference, symbol) in iter {
            table.insert(reference.as_ref(), symbol);
        }
        table
    }
}

impl From<BTreeMap<String, String>> for RenameTable {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<std::collections::HashMap<String, String>> for RenameTable {
    fn from(map: std::collections::HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<RenameTable> for BTreeMap<String, String> {
    fn from(table: RenameTable) -> Self {
        table.symbols
    }
}
