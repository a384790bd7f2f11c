pub mod prober;
pub mod registry;
