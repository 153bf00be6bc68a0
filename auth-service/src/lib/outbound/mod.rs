pub mod notify;
pub mod repositories;
