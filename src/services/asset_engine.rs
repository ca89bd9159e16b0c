// src/services/asset_engine.rs

use std::cmp::Ordering;

use crate::models::{
    asset::Asset,
    query::{
        total_pages, AssetFilters, AssetQuery, AssetResponse, PaginationConfig, SortConfig, SortDirection,
    },
};

// Funções puras: filtro -> ordenação -> janela de paginação, nessa ordem.

pub fn matches_filters(asset: &Asset, filters: &AssetFilters) -> bool {
    let matches_name = filters.name.is_empty()
        || asset.name.to_lowercase().contains(&filters.name.to_lowercase());
    let matches_category = filters.category.is_none_or(|c| asset.category() == c);
    let matches_status = filters.status.is_none_or(|s| asset.status == s);

    matches_name && matches_category && matches_status
}

pub fn apply_filters(assets: &[Asset], filters: &AssetFilters) -> Vec<Asset> {
    assets
        .iter()
        .filter(|asset| matches_filters(asset, filters))
        .cloned()
        .collect()
}

// Compara o campo como texto. Valor ausente fica antes de qualquer valor
// presente (na direção ascendente).
fn compare(a: &Asset, b: &Asset, sort: &SortConfig) -> Ordering {
    let ordering = a.field_value(sort.key).cmp(&b.field_value(sort.key));
    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Devolve uma cópia ordenada; a entrada não é alterada.
pub fn apply_sorting(assets: &[Asset], sort: &SortConfig) -> Vec<Asset> {
    let mut sorted = assets.to_vec();
    sorted.sort_by(|a, b| compare(a, b, sort));
    sorted
}

/// Recorta a página `page` (base 1). `page` não é ajustada aqui: uma página
/// fora do intervalo devolve janela vazia.
pub fn apply_pagination(assets: &[Asset], page: usize, limit: usize) -> AssetResponse {
    let limit = limit.max(1);
    let total = assets.len();
    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = page.saturating_mul(limit);

    AssetResponse {
        assets: assets.iter().skip(start).take(limit).cloned().collect(),
        total,
        page,
        limit,
        total_pages: total_pages(total, limit),
        has_next_page: end < total,
        has_prev_page: page > 1,
    }
}

/// Aplica a consulta inteira sobre uma lista em memória, ajustando a página
/// ao intervalo válido antes de recortar.
pub fn derive_page(assets: &[Asset], query: &AssetQuery, default_limit: usize) -> AssetResponse {
    let filtered = match &query.filters {
        Some(filters) => apply_filters(assets, filters),
        None => assets.to_vec(),
    };
    let sorted = match &query.sort {
        Some(sort) => apply_sorting(&filtered, sort),
        None => filtered,
    };

    // `limit` ausente ou zero usa o tamanho padrão.
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(default_limit);
    let mut pagination = PaginationConfig::new(limit);
    pagination.go_to_page(query.page.unwrap_or(1));
    pagination.update_total(sorted.len());

    apply_pagination(&sorted, pagination.page, pagination.limit)
}
