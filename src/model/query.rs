use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortTimestamp {
    CreatedTime,
    LastEditedTime,
}

/// One database query sort criterion, by property or by timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<SortTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

impl Sort {
    pub fn by_property(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: Some(property.into()),
            timestamp: None,
            direction: Some(direction),
        }
    }

    pub fn by_timestamp(timestamp: SortTimestamp, direction: SortDirection) -> Self {
        Self {
            property: None,
            timestamp: Some(timestamp),
            direction: Some(direction),
        }
    }
}

/// Search results can only be ordered by a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSort {
    pub direction: SortDirection,
    pub timestamp: SortTimestamp,
}

impl SearchSort {
    pub fn last_edited(direction: SortDirection) -> Self {
        Self {
            direction,
            timestamp: SortTimestamp::LastEditedTime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchObjectKind {
    Page,
    Database,
}

/// Restricts search results to one object kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub value: SearchObjectKind,
    pub property: String,
}

impl SearchFilter {
    pub fn object(value: SearchObjectKind) -> Self {
        Self {
            value,
            property: "object".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_omit_unset_fields() {
        let sort = Sort::by_property("Name", SortDirection::Ascending);
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({"property": "Name", "direction": "ascending"})
        );

        let sort = Sort::by_timestamp(SortTimestamp::CreatedTime, SortDirection::Descending);
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({"timestamp": "created_time", "direction": "descending"})
        );
    }

    #[test]
    fn search_parameters_use_wire_names() {
        assert_eq!(
            serde_json::to_value(SearchSort::last_edited(SortDirection::Descending)).unwrap(),
            json!({"direction": "descending", "timestamp": "last_edited_time"})
        );
        assert_eq!(
            serde_json::to_value(SearchFilter::object(SearchObjectKind::Database)).unwrap(),
            json!({"value": "database", "property": "object"})
        );
    }
}
