//! Miscellaneous utilities.

pub mod data_formatters;

pub use data_formatters::format_lattice;
