pub mod notifications;
pub mod relay;
pub mod scanners;
