use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two monitoring policies: sum over a tagged process group, or the
/// invoking process alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorVariant {
    Aggregate,
    SingleProcess,
}

impl MonitorVariant {
    /// Stable identifier used in run ids and log fields.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::SingleProcess => "single-process",
        }
    }
}

impl std::fmt::Display for MonitorVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for MonitorVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aggregate" | "all" | "group" => Ok(Self::Aggregate),
            "self" | "single" | "single-process" => Ok(Self::SingleProcess),
            other => Err(format!(
                "unknown variant '{other}' (expected: aggregate, self)"
            )),
        }
    }
}
