use chrono::{DateTime, Utc};
use ethernity_core::format::parse_instant;
use ethernity_core::types::NormalizedTransaction;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Campo de ordenação das listas de transações
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Timestamp,
    BlockNumber,
    Index,
}

/// Direção de ordenação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Aplica a direção a uma comparação ascendente
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Itens que podem ser ordenados por [`SortField`]
pub trait Sortable {
    /// Instante do item; `None` quando não interpretável
    fn sort_timestamp(&self) -> Option<DateTime<Utc>>;
    fn sort_block_number(&self) -> u64;
    fn sort_index(&self) -> u64;
}

impl Sortable for NormalizedTransaction {
    fn sort_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_instant(self.time()).ok()
    }

    fn sort_block_number(&self) -> u64 {
        self.block_number()
    }

    fn sort_index(&self) -> u64 {
        self.index()
    }
}

fn compare<T: Sortable>(a: &T, b: &T, field: SortField) -> Ordering {
    match field {
        // instantes inválidos ficam como os mais antigos
        SortField::Timestamp => a.sort_timestamp().cmp(&b.sort_timestamp()),
        SortField::BlockNumber => a.sort_block_number().cmp(&b.sort_block_number()),
        SortField::Index => a.sort_index().cmp(&b.sort_index()),
    }
}

/// Ordenação estável: empates mantêm a ordem original em ambas as direções
pub fn sort<T: Sortable + Clone>(items: &[T], field: SortField, direction: SortDirection) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| direction.apply(compare(a, b, field)));
    sorted
}

/// Estado de ordenação de uma tabela
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Timestamp,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Seleciona um campo: o mesmo campo inverte a direção, um campo novo
    /// começa em ordem decrescente.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    pub fn sort<T: Sortable + Clone>(&self, items: &[T]) -> Vec<T> {
        sort(items, self.field, self.direction)
    }
}

/// Fatia `[(page_number - 1) * page_size, page_number * page_size)` limitada ao tamanho.
///
/// Página 0, tamanho 0 ou página além do fim produzem fatia vazia.
pub fn page<T>(items: &[T], page_number: usize, page_size: usize) -> &[T] {
    if page_number == 0 || page_size == 0 {
        return &[];
    }
    let start = match (page_number - 1).checked_mul(page_size) {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Número de páginas necessárias para `len` itens
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}
