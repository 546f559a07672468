use crate::console::FilterState;
use crate::gateway::{Company, Development, GatewayError, QueryParams, Unit};
use tracing::{debug, warn};

pub const LOAD_FAILED: &str = "Erro ao buscar empreendimentos. Tente novamente.";
pub const PUBLISH_FAILED: &str = "Erro ao publicar empreendimento. Tente novamente.";
pub const COMPANIES_FAILED: &str = "Erro ao carregar construtoras.";
pub const UNITS_FAILED: &str = "Erro ao carregar unidades.";

/// Counters shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregates {
    pub total_developments: usize,
    pub published: usize,
    /// Counted over every unit, not only those of the filtered developments.
    pub total_units: usize,
}

pub fn published_count(developments: &[Development]) -> usize {
    developments.iter().filter(|d| d.is_published()).count()
}

/// Handed out by `begin_load`; the response is only applied if no newer
/// load was started in the meantime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub query: QueryParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingBusy {
    Publishing(i64),
}

/// Collections behind the listing page, plus the busy flags and the last
/// error. Only the functions here replace the collections.
#[derive(Debug, Clone, Default)]
pub struct ListingView {
    developments: Vec<Development>,
    companies: Vec<Company>,
    units: Vec<Unit>,
    error: Option<String>,
    loading: bool,
    publishing: Option<i64>,
    issued_generation: u64,
    hold_next_view: bool,
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set by the listing's own actions before they redirect back, so the
    /// page that follows shows their outcome instead of refetching.
    pub fn hold_next_view(&mut self) {
        self.hold_next_view = true;
    }

    /// Whether entering the page should refetch everything. Consumes a
    /// pending hold.
    pub fn take_view_refresh(&mut self) -> bool {
        let held = std::mem::take(&mut self.hold_next_view);
        !held && !self.loading
    }

    pub fn developments(&self) -> &[Development] {
        &self.developments
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn publishing(&self) -> Option<i64> {
        self.publishing
    }

    pub fn aggregates(&self) -> Aggregates {
        Aggregates {
            total_developments: self.developments.len(),
            published: published_count(&self.developments),
            total_units: self.units.len(),
        }
    }

    pub fn published_developments(&self) -> Vec<Development> {
        self.developments
            .iter()
            .filter(|d| d.is_published())
            .cloned()
            .collect()
    }

    /// Start a listing fetch with the filters as they are now.
    pub fn begin_load(&mut self, filters: &FilterState) -> LoadTicket {
        self.loading = true;
        self.error = None;
        self.issued_generation += 1;

        LoadTicket {
            generation: self.issued_generation,
            query: filters.build_query(),
        }
    }

    /// Apply a listing response. Returns false when the ticket was
    /// superseded and the response dropped. On failure the previous rows
    /// stay on screen next to the error.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Development>, GatewayError>,
    ) -> bool {
        if ticket.generation != self.issued_generation {
            debug!(
                stale = ticket.generation,
                newest = self.issued_generation,
                "dropping superseded listing response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(rows) => {
                debug!(count = rows.len(), "listing loaded");
                self.developments = rows;
            }
            Err(err) => {
                warn!(error = %err, "listing load failed");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        true
    }

    pub fn apply_companies(&mut self, result: Result<Vec<Company>, GatewayError>) {
        match result {
            Ok(rows) => self.companies = rows,
            Err(err) => {
                warn!(error = %err, "company list failed");
                self.error.get_or_insert_with(|| COMPANIES_FAILED.to_string());
            }
        }
    }

    pub fn apply_units(&mut self, result: Result<Vec<Unit>, GatewayError>) {
        match result {
            Ok(rows) => self.units = rows,
            Err(err) => {
                warn!(error = %err, "unit list failed");
                self.error.get_or_insert_with(|| UNITS_FAILED.to_string());
            }
        }
    }

    /// Mark a publish request as in flight. A second publish is refused
    /// until the first one finishes; loads are not blocked.
    pub fn begin_publish(&mut self, id: i64) -> Result<(), ListingBusy> {
        if let Some(current) = self.publishing {
            return Err(ListingBusy::Publishing(current));
        }
        self.publishing = Some(id);
        self.error = None;
        Ok(())
    }

    /// Returns true when the caller should reload the listing. A failure
    /// leaves the table untouched and only sets the message.
    pub fn finish_publish(&mut self, id: i64, result: Result<(), GatewayError>) -> bool {
        if self.publishing == Some(id) {
            self.publishing = None;
        }
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(id, error = %err, "publish failed");
                self.error = Some(err.user_message(PUBLISH_FAILED));
                false
            }
        }
    }
}
