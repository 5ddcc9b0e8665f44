pub mod notifier;
pub mod relay;
pub mod scanner;

pub use notifier::{NotificationError, Notifier};
pub use relay::{RelayError, RelayStore};
pub use scanner::{ProcessScanner, ScanError};
