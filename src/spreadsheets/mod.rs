pub mod import_template;

pub use import_template::{import_template_xlsx, TEMPLATE_COLUMNS};
