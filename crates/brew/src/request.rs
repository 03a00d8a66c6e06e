//! The ingredients offered for a brew.

use std::collections::HashMap;

use catalog::Quantity;

/// Mapping from ingredient name to the quantity on hand.
///
/// Names are compared by exact string equality. When the same name is
/// inserted twice the later quantity replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requested {
    quantities: HashMap<String, Quantity>,
}

impl Requested {
    /// An empty request, meaning "require nothing".
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient (builder pattern).
    pub fn with(mut self, name: impl Into<String>, quantity: Quantity) -> Self {
        self.insert(name, quantity);
        self
    }

    /// Set the quantity for `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, quantity: Quantity) -> Option<Quantity> {
        self.quantities.insert(name.into(), quantity)
    }

    pub fn get(&self, name: &str) -> Option<Quantity> {
        self.quantities.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.quantities
            .iter()
            .map(|(name, quantity)| (name.as_str(), *quantity))
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Quantity)> for Requested {
    fn from_iter<I: IntoIterator<Item = (N, Quantity)>>(iter: I) -> Self {
        let mut requested = Requested::new();
        for (name, quantity) in iter {
            requested.insert(name, quantity);
        }
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value_wins() {
        let requested: Requested = vec![("flour", 100), ("sugar", 5), ("flour", 30)]
            .into_iter()
            .collect();

        assert_eq!(requested.len(), 2);
        assert_eq!(requested.get("flour"), Some(30));
        assert_eq!(requested.get("sugar"), Some(5));
    }

    #[test]
    fn test_names_are_exact() {
        let requested = Requested::new().with("Flour", 1);
        assert_eq!(requested.get("flour"), None);
        assert_eq!(requested.get("Flour"), Some(1));
    }

    #[test]
    fn test_empty_request() {
        let requested = Requested::new();
        assert!(requested.is_empty());
        assert_eq!(requested.iter().count(), 0);
    }
}
