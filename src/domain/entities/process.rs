use serde::{Deserialize, Serialize};

/// One matched process at measurement time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub cmdline: String,
    pub rss_mb: f64,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn process_sample_serde_roundtrip() {
        let sample = ProcessSample {
            pid: 4242,
            cmdline: "/usr/bin/worker --queue jobs".to_string(),
            rss_mb: 128.5,
        };
        let json = serde_json::to_string(&sample).expect("serialize");
        let deserialized: ProcessSample = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(deserialized, sample);
    }
}
