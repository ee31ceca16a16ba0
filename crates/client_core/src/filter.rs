use serde::{Deserialize, Serialize};
use shared::domain::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Active, FilterMode::Completed];

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Active => "Active",
            FilterMode::Completed => "Completed",
        }
    }

    pub fn matches(self, item: &Item) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !item.completed,
            FilterMode::Completed => item.completed,
        }
    }
}

impl std::str::FromStr for FilterMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "active" => Ok(FilterMode::Active),
            "completed" => Ok(FilterMode::Completed),
            other => Err(format!("unknown filter '{other}'")),
        }
    }
}

/// Returns the items visible under `mode`, in their original order.
pub fn select_visible(items: &[Item], mode: FilterMode) -> Vec<Item> {
    items
        .iter()
        .filter(|item| mode.matches(item))
        .cloned()
        .collect()
}
