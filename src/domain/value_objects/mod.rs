pub mod outcome;
pub mod variant;

pub use outcome::NotifyOutcome;
pub use variant::MonitorVariant;
