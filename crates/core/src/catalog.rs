//! Fixed list of named destinations.
//!
//! The catalog is static demo data: display names only, no coordinates and no
//! identifiers beyond the name itself.

/// Where every demo session starts.
pub const ORIGIN: &str = "Main Entrance";

const DESTINATIONS: &[&str] = &[
    "Conference Room A",
    "Cafeteria",
    "Executive Office",
    "Meeting Room 101",
    "IT Department",
    "Lobby",
    "Restrooms",
    "Elevator",
    "Stairwell",
    "Parking Garage",
];

/// Lookup over the fixed destination list.
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    origin: String,
    destinations: Vec<String>,
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::sample()
    }
}

impl LocationCatalog {
    /// Build the built-in demo catalog.
    pub fn sample() -> Self {
        Self {
            origin: ORIGIN.to_string(),
            destinations: DESTINATIONS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// The fixed starting location.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// All destinations, in catalog order.
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    /// Case-insensitive substring filter. An empty query matches everything.
    pub fn filter<'a>(&'a self, query: &str) -> Vec<&'a str> {
        let needle = query.trim().to_lowercase();
        self.destinations
            .iter()
            .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
            .map(|name| name.as_str())
            .collect()
    }

    /// Whether `name` is a known destination (exact match).
    pub fn contains(&self, name: &str) -> bool {
        self.destinations.iter().any(|d| d == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_returns_every_destination() {
        let catalog = LocationCatalog::sample();
        assert_eq!(catalog.filter("").len(), catalog.destinations().len());
        assert_eq!(catalog.filter("   ").len(), catalog.destinations().len());
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let catalog = LocationCatalog::sample();
        assert_eq!(catalog.filter("cafe"), vec!["Cafeteria"]);
        assert_eq!(catalog.filter("ROOM"), vec!["Conference Room A", "Meeting Room 101", "Restrooms"]);
        assert!(catalog.filter("warp pad").is_empty());
    }

    #[test]
    fn contains_is_exact() {
        let catalog = LocationCatalog::sample();
        assert!(catalog.contains("IT Department"));
        assert!(!catalog.contains("it department"));
    }
}
