pub mod commit;
pub mod history;
pub mod row;

pub use commit::Commit;
pub use history::History;
pub use row::Row;
