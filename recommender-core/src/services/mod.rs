pub mod composite;
pub mod grouping;
pub mod history;
pub mod notifier;
pub mod orchestrator;
