use serde::{Deserialize, Serialize};

use super::ConnectionType;

/// Toolbar filter categories for the connection-types table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterType {
    Keyword,
    CreatedBy,
}

impl FilterType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Keyword => "Keyword",
            Self::CreatedBy => "Created by",
        }
    }

    pub fn cycle_next(self) -> Self {
        match self {
            Self::Keyword => Self::CreatedBy,
            Self::CreatedBy => Self::Keyword,
        }
    }
}

/// Client-side filter state. `None` or empty means "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterData {
    pub keyword: Option<String>,
    pub created_by: Option<String>,
}

impl FilterData {
    pub fn get(&self, filter_type: FilterType) -> Option<&str> {
        match filter_type {
            FilterType::Keyword => self.keyword.as_deref(),
            FilterType::CreatedBy => self.created_by.as_deref(),
        }
    }

    pub fn set(&mut self, filter_type: FilterType, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match filter_type {
            FilterType::Keyword => self.keyword = value,
            FilterType::CreatedBy => self.created_by = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        non_empty_lower(&self.keyword).is_none() && non_empty_lower(&self.created_by).is_none()
    }

    /// Keyword hits the display name (or name) or the description; creator
    /// filter hits the username annotation, which reads "unknown" when absent.
    pub fn matches(&self, ct: &ConnectionType) -> bool {
        if let Some(keyword) = non_empty_lower(&self.keyword) {
            let in_name = ct.display_name().to_lowercase().contains(&keyword);
            let in_description = ct
                .description()
                .is_some_and(|d| d.to_lowercase().contains(&keyword));
            if !in_name && !in_description {
                return false;
            }
        }

        match non_empty_lower(&self.created_by) {
            Some(creator) => ct.creator().to_lowercase().contains(&creator),
            None => true,
        }
    }

    /// Filtered rows sorted by display name, case-insensitive
    pub fn apply<'a>(&self, items: &'a [ConnectionType]) -> Vec<&'a ConnectionType> {
        let mut rows: Vec<&ConnectionType> = items.iter().filter(|ct| self.matches(ct)).collect();
        rows.sort_by_cached_key(|ct| ct.display_name().to_lowercase());
        rows
    }
}

fn non_empty_lower(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> Vec<ConnectionType> {
        vec![
            ConnectionType::new("test-2")
                .with_display_name("Test display name")
                .with_description("Test description")
                .with_creator("dashboard-admin"),
            ConnectionType::new("no-display-name")
                .with_display_name("")
                .with_description("description 2")
                .with_creator("Pre-installed"),
            ConnectionType::new("anon").with_display_name("Anonymous"),
        ]
    }

    fn names(rows: Vec<&ConnectionType>) -> Vec<&str> {
        rows.into_iter().map(|ct| ct.name()).collect()
    }

    #[test]
    fn test_empty_filter_sorts_by_display_name() {
        let items = fixtures();
        let rows = FilterData::default().apply(&items);
        assert_eq!(names(rows), vec!["anon", "no-display-name", "test-2"]);
    }

    #[test]
    fn test_keyword_matches_description_case_insensitive() {
        let items = fixtures();
        let filter = FilterData {
            keyword: Some("DESCRIPTION 2".to_string()),
            created_by: None,
        };
        assert_eq!(names(filter.apply(&items)), vec!["no-display-name"]);
    }

    #[test]
    fn test_keyword_matches_name_fallback() {
        let items = fixtures();
        let filter = FilterData {
            keyword: Some("display".to_string()),
            created_by: None,
        };
        assert_eq!(names(filter.apply(&items)), vec!["no-display-name", "test-2"]);
    }

    #[test]
    fn test_created_by_unknown_fallback() {
        let items = fixtures();
        let filter = FilterData {
            keyword: None,
            created_by: Some("unkn".to_string()),
        };
        assert_eq!(names(filter.apply(&items)), vec!["anon"]);
    }

    #[test]
    fn test_filters_combine() {
        let items = fixtures();
        let mut filter = FilterData::default();
        filter.set(FilterType::Keyword, Some("test".to_string()));
        filter.set(FilterType::CreatedBy, Some("pre-installed".to_string()));
        assert!(filter.apply(&items).is_empty());

        filter.clear();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&items).len(), 3);
    }

    #[test]
    fn test_set_empty_string_clears() {
        let mut filter = FilterData::default();
        filter.set(FilterType::Keyword, Some("x".to_string()));
        filter.set(FilterType::Keyword, Some(String::new()));
        assert_eq!(filter.get(FilterType::Keyword), None);
    }
}
