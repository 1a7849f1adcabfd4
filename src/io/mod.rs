//! Input and output plumbing: CSV tables in, a CSV table and textual reports
//! out. Kept separate from [`crate::model`] and [`crate::report`] so the
//! serde row shapes (flat, string-keyed, csv-crate-friendly) never leak into
//! the analysis types.

pub mod csv_input;
pub mod csv_output;

pub use csv_input::load_system;
pub use csv_output::write_solution_csv;
