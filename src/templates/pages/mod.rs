pub mod developments;
pub mod drilldown;
pub mod forms;
pub mod home;
pub mod import;

pub use developments::{developments_page, ListingVm};
pub use forms::{development_form_page, unit_form_page, FormVm, Notice};
pub use home::home_page;
pub use import::import_page;
