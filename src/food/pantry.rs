use serde::{Deserialize, Serialize};

/// Shortcut ingredients offered for one-click adding.
pub const COMMON_INGREDIENTS: &[&str] = &[
    "Egg", "Tomato", "Potato", "Onion", "Garlic", "Chicken",
    "Beef", "Rice", "Pasta", "Milk", "Cheese", "Salt", "Oil",
];

/// Trims and lowercases an ingredient name. Returns `None` for blank input.
pub fn normalize(raw: &str) -> Option<String> {
    let clean = raw.trim().to_lowercase();
    if clean.is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// Insertion-ordered set of normalized ingredient names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pantry {
    items: Vec<String>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the normalized form of `raw`. Returns false when it was blank or already present.
    pub fn add(&mut self, raw: &str) -> bool {
        match normalize(raw) {
            Some(clean) if !self.contains(&clean) => {
                self.items.push(clean);
                true
            }
            _ => false,
        }
    }

    /// Removes an exact match. Returns false when nothing was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != name);
        self.items.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }
}
