pub mod smtp;

pub use smtp::{SmtpNotifier, SmtpSettings};
