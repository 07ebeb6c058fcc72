use serde::{Deserialize, Serialize};

/// The ingredients a user has at hand: lower-cased, trimmed, no duplicates,
/// in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pantry {
    items: Vec<String>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an ingredient. Returns false when it was blank or already present.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let cleaned = ingredient.trim().to_lowercase();
        if cleaned.is_empty() || self.items.contains(&cleaned) {
            return false;
        }
        self.items.push(cleaned);
        true
    }

    /// Removes an exact entry. Returns false when it was not there.
    pub fn remove(&mut self, ingredient: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != ingredient);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Pantry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut pantry = Pantry::new();
        for item in iter {
            pantry.add(item.as_ref());
        }
        pantry
    }
}
