//! Outbound copies of the investor table: a flat CSV file and a hosted
//! remote table.

pub mod remote;
pub mod tabular;

pub use remote::{upsert_remote, RemoteInvestorRow, UploadFailure, UploadReport};
pub use tabular::{read_input_file, read_tabular_file, write_tabular_file};
