pub mod backend;
pub mod clip;
pub mod dispatch;
pub mod software;
pub mod vello;
