use crate::console::ListingView;
use crate::gateway::{Development, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillKind {
    AllDevelopments,
    PublishedDevelopments,
    AllUnits,
}

impl DrillKind {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "total" => Some(DrillKind::AllDevelopments),
            "publicados" => Some(DrillKind::PublishedDevelopments),
            "unidades" => Some(DrillKind::AllUnits),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            DrillKind::AllDevelopments => "total",
            DrillKind::PublishedDevelopments => "publicados",
            DrillKind::AllUnits => "unidades",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DrillKind::AllDevelopments => "Todos os Empreendimentos",
            DrillKind::PublishedDevelopments => "Empreendimentos Publicados",
            DrillKind::AllUnits => "Todas as Unidades",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrillDataset {
    Developments(Vec<Development>),
    Units(Vec<Unit>),
}

impl DrillDataset {
    pub fn len(&self) -> usize {
        match self {
            DrillDataset::Developments(rows) => rows.len(),
            DrillDataset::Units(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Secondary view over data the listing already holds. Opening never
/// fetches; the rows are taken from the listing at the moment of opening.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrillDown {
    #[default]
    Closed,
    Open { kind: DrillKind, dataset: DrillDataset },
}

impl DrillDown {
    pub fn open(&mut self, kind: DrillKind, listing: &ListingView) {
        let dataset = match kind {
            DrillKind::AllDevelopments => DrillDataset::Developments(listing.developments().to_vec()),
            DrillKind::PublishedDevelopments => {
                DrillDataset::Developments(listing.published_developments())
            }
            DrillKind::AllUnits => DrillDataset::Units(listing.units().to_vec()),
        };
        *self = DrillDown::Open { kind, dataset };
    }

    pub fn close(&mut self) {
        *self = DrillDown::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DrillDown::Open { .. })
    }
}
