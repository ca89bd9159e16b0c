// src/models/query.rs

use serde::{
    de::{value::StringDeserializer, IntoDeserializer},
    Deserialize, Deserializer, Serialize,
};
use utoipa::ToSchema;

use crate::models::asset::{Asset, AssetCategory, AssetField, AssetStatus};

/// Tamanho de página usado quando a consulta não informa `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

// Tamanho de página padrão do painel.
pub const DASHBOARD_PAGE_LIMIT: usize = 5;

// String vazia vinda do formulário/URL equivale a "sem filtro".
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => {
            let de: StringDeserializer<D::Error> = raw.into_deserializer();
            T::deserialize(de).map(Some)
        }
        _ => Ok(None),
    }
}

// --- FILTROS ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssetFilters {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<AssetCategory>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<AssetStatus>,
}

// Atualização parcial dos filtros: `None` mantém o valor atual.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    pub name: Option<String>,
    pub category: Option<Option<AssetCategory>>,
    pub status: Option<Option<AssetStatus>>,
}

impl AssetFilters {
    pub fn update(&mut self, changes: FilterUpdate) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.name.is_empty() || self.category.is_some() || self.status.is_some()
    }
}

// --- ORDENAÇÃO ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortConfig {
    pub key: AssetField,
    pub direction: SortDirection,
}

/// Coluna de ordenação ativa (no máximo uma).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    current: Option<SortConfig>,
}

impl SortState {
    pub fn new(initial: Option<SortConfig>) -> Self {
        Self { current: initial }
    }

    pub fn config(&self) -> Option<SortConfig> {
        self.current
    }

    // Clicar na mesma coluna inverte a direção; outra coluna começa em `asc`.
    pub fn handle_sort(&mut self, key: AssetField) {
        self.current = Some(match self.current {
            Some(prev) if prev.key == key => SortConfig { key, direction: prev.direction.toggled() },
            _ => SortConfig { key, direction: SortDirection::Asc },
        });
    }

    pub fn clear_sort(&mut self) {
        self.current = None;
    }
}

// --- CONSULTA ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetQuery {
    pub filters: Option<AssetFilters>,
    pub sort: Option<SortConfig>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl AssetQuery {
    /// Mesma consulta, sem a parte de paginação.
    pub fn without_paging(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            sort: self.sort,
            page: None,
            limit: None,
        }
    }
}

// --- PAGINAÇÃO ---

// `limit` zero é tratado como 1 para nunca dividir por zero.
pub fn total_pages(total: usize, limit: usize) -> usize {
    total.div_ceil(limit.max(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(DASHBOARD_PAGE_LIMIT)
    }
}

impl PaginationConfig {
    pub fn new(limit: usize) -> Self {
        Self { page: 1, limit: limit.max(1), total: 0, total_pages: 0 }
    }

    /// Atualiza o total e mantém `page` dentro de `[1, max(1, totalPages)]`.
    pub fn update_total(&mut self, total: usize) {
        self.total = total;
        self.total_pages = total_pages(total, self.limit);
        self.page = self.page.clamp(1, self.total_pages.max(1));
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.total_pages).max(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }
}

// --- RESPOSTA PAGINADA ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    pub assets: Vec<Asset>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Default for AssetResponse {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            total: 0,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            total_pages: 0,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}
