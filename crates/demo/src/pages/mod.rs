pub mod clients;
pub mod extinguishers;
