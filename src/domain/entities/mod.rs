pub mod alert;
pub mod process;
pub mod reading;

pub use alert::Alert;
pub use process::ProcessSample;
pub use reading::{Reading, ReadingScope};
