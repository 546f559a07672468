mod import_tests;
mod listing_tests;
