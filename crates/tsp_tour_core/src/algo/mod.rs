pub mod exact;
pub mod mst;
pub mod two_opt;
