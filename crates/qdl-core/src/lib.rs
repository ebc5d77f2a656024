pub mod config;
pub mod logging;

pub mod aggregate;
pub mod canonical;
pub mod control;
pub mod naming;
pub mod plan;
pub mod quality;
pub mod retry;
pub mod search;
pub mod select;
pub mod sources;
