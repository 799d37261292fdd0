//! Output generation for the consolidated dataset.
//!
//! One submodule per format:
//!
//! - [`csv`]: writes the consolidated table as a UTF-8 CSV file with one
//!   header row and no leading index column.

pub mod csv;
