pub mod charts;
pub mod modal;
pub mod money;
