pub mod actions;
mod drilldown;
mod filters;
pub mod forms;
mod import;
mod listing;
mod session;
mod token;

pub use drilldown::{DrillDataset, DrillDown, DrillKind};
pub use filters::{Criterion, FilterCriteria, FilterState};
pub use import::{capped, ImportError, ImportState, ImportWorkflow, SelectedFile};
pub use listing::{ListingBusy, ListingView, COMPANIES_FAILED};
pub use session::{
    session_cookie, session_token_from_cookie, SessionHandle, SessionStore,
};
