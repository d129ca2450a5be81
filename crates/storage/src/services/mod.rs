pub mod bib;
pub mod ledger;
pub mod statistics;
