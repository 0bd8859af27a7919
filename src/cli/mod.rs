pub mod fetch;
pub mod serve;
pub mod setup;
pub mod ui;
