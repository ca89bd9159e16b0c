// src/services/query_builder.rs

use serde::Serialize;
use std::fmt;

use crate::models::query::AssetQuery;

// Nomes dos parâmetros esperados pelo endpoint de coleção
pub const PARAM_SEARCH: &str = "q";
pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_STATUS: &str = "status";
pub const PARAM_SORT: &str = "_sort";
pub const PARAM_ORDER: &str = "_order";
pub const PARAM_PAGE: &str = "_page";
pub const PARAM_LIMIT: &str = "_limit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Number(usize),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        Self::Number(value)
    }
}

/// Parâmetros de consulta na ordem em que foram inseridos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParamMap(Vec<(&'static str, ParamValue)>);

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    // Chave repetida substitui o valor anterior no mesmo lugar.
    pub fn insert(&mut self, key: &'static str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Traduz a consulta da interface para os parâmetros do endpoint.
///
/// Cada regra vale por si e a chave é omitida quando a condição é falsa.
/// Nenhuma normalização é feita aqui (nem trim, nem caixa).
pub fn build_query(query: &AssetQuery) -> ParamMap {
    let mut params = ParamMap::new();

    if let Some(filters) = &query.filters {
        if !filters.name.is_empty() {
            params.insert(PARAM_SEARCH, filters.name.as_str());
        }
        if let Some(category) = filters.category {
            params.insert(PARAM_CATEGORY, category.as_str());
        }
        if let Some(status) = filters.status {
            params.insert(PARAM_STATUS, status.as_str());
        }
    }

    if let Some(sort) = &query.sort {
        params.insert(PARAM_SORT, sort.key.as_str());
        params.insert(PARAM_ORDER, sort.direction.as_str());
    }

    // Página e limite andam juntos (ambos presentes e maiores que zero)
    if let (Some(page), Some(limit)) = (query.page, query.limit) {
        if page > 0 && limit > 0 {
            params.insert(PARAM_PAGE, page);
            params.insert(PARAM_LIMIT, limit);
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        asset::{AssetCategory, AssetField, AssetStatus},
        query::{AssetFilters, SortConfig, SortDirection},
    };

    #[test]
    fn empty_query_builds_no_params() {
        assert!(build_query(&AssetQuery::default()).is_empty());

        let query = AssetQuery { filters: Some(AssetFilters::default()), ..Default::default() };
        assert!(build_query(&query).is_empty());
    }

    #[test]
    fn full_query_keeps_insertion_order() {
        let query = AssetQuery {
            filters: Some(AssetFilters {
                name: "Note".into(),
                category: Some(AssetCategory::Vehicle),
                status: Some(AssetStatus::InMaintenance),
            }),
            sort: Some(SortConfig { key: AssetField::AcquisitionDate, direction: SortDirection::Desc }),
            page: Some(2),
            limit: Some(5),
        };

        let params = build_query(&query);
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec!["q", "category", "status", "_sort", "_order", "_page", "_limit"]
        );
        assert_eq!(params.get("q"), Some(&ParamValue::Text("Note".into())));
        assert_eq!(params.get("category").map(ToString::to_string).as_deref(), Some("Veículo"));
        assert_eq!(params.get("status").map(ToString::to_string).as_deref(), Some("Em manutenção"));
        assert_eq!(params.get("_sort").map(ToString::to_string).as_deref(), Some("acquisitionDate"));
        assert_eq!(params.get("_order").map(ToString::to_string).as_deref(), Some("desc"));
        assert_eq!(params.get("_page"), Some(&ParamValue::Number(2)));
        assert_eq!(params.get("_limit"), Some(&ParamValue::Number(5)));
    }

    #[test]
    fn name_is_sent_verbatim() {
        let query = AssetQuery {
            filters: Some(AssetFilters { name: "  NoteBook ".into(), ..Default::default() }),
            ..Default::default()
        };
        assert_eq!(build_query(&query).get("q").map(ToString::to_string).as_deref(), Some("  NoteBook "));
    }

    #[test]
    fn page_and_limit_are_all_or_nothing() {
        let only_page = AssetQuery { page: Some(3), ..Default::default() };
        assert!(build_query(&only_page).is_empty());

        let only_limit = AssetQuery { limit: Some(10), ..Default::default() };
        assert!(build_query(&only_limit).is_empty());

        let zero_page = AssetQuery { page: Some(0), limit: Some(10), ..Default::default() };
        assert!(build_query(&zero_page).is_empty());

        let both = AssetQuery { page: Some(1), limit: Some(10), ..Default::default() };
        let params = build_query(&both);
        assert!(params.contains_key("_page") && params.contains_key("_limit"));
    }

    #[test]
    fn sort_emits_key_and_direction_together() {
        let query = AssetQuery {
            sort: Some(SortConfig { key: AssetField::Name, direction: SortDirection::Asc }),
            ..Default::default()
        };
        let params = build_query(&query);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("_order").map(ToString::to_string).as_deref(), Some("asc"));
    }

    #[test]
    fn params_serialize_as_pairs() {
        let mut params = ParamMap::new();
        params.insert("q", "a");
        params.insert("_page", 2usize);
        params.insert("q", "b");

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!([["q", "b"], ["_page", 2]]));
    }
}
