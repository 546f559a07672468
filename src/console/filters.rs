use crate::gateway::QueryParams;

/// Current filter values as typed by the operator. Empty strings mean "not
/// set"; values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub company_id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub published_only: bool,
}

/// A single filter edit. Each variant replaces exactly one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    CompanyId(String),
    Name(String),
    StartDate(String),
    EndDate(String),
    PublishedOnly(bool),
}

/// Owner of the listing filters. All edits go through `set_criterion` and
/// `clear`, so the omit-if-empty rule lives in `build_query` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    criteria: FilterCriteria,
    published_only_default: bool,
}

impl FilterState {
    pub fn new(published_only_default: bool) -> Self {
        Self {
            criteria: FilterCriteria {
                published_only: published_only_default,
                ..FilterCriteria::default()
            },
            published_only_default,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criterion(&mut self, criterion: Criterion) {
        let c = &mut self.criteria;
        match criterion {
            Criterion::CompanyId(v) => c.company_id = v,
            Criterion::Name(v) => c.name = v,
            Criterion::StartDate(v) => c.start_date = v,
            Criterion::EndDate(v) => c.end_date = v,
            Criterion::PublishedOnly(v) => c.published_only = v,
        }
    }

    /// Query for the listing endpoint. Empty text fields and an unset
    /// "published only" flag are left out; the API reads absence as no
    /// constraint.
    pub fn build_query(&self) -> QueryParams {
        let c = &self.criteria;
        let mut query = QueryParams::new();

        for (key, value) in [
            ("construtora_id", &c.company_id),
            ("nome", &c.name),
            ("dataInicio", &c.start_date),
            ("dataFim", &c.end_date),
        ] {
            if !value.is_empty() {
                query.insert(key, value.clone());
            }
        }
        if c.published_only {
            query.insert("somente_publicadas", "1".to_string());
        }

        query
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.published_only_default);
    }
}
