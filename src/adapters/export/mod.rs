//! Export adapters.

mod csv;

pub use csv::CsvExportService;
