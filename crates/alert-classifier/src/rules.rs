//! Keyword Rules

use serde::{Serialize, Serializer};
use std::fmt;

/// Summary chosen for an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Summary {
    /// Processor saturation
    Cpu,
    /// Storage running out
    Disk,
    /// Memory pressure
    Memory,
    /// Connectivity problems
    Network,
    /// Nothing recognised
    Generic,
}

impl Summary {
    /// All summaries, in match priority order
    pub const ALL: [Summary; 5] = [
        Summary::Cpu,
        Summary::Disk,
        Summary::Memory,
        Summary::Network,
        Summary::Generic,
    ];

    /// Lowercase keyword that selects this summary. `Generic` has none.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Summary::Cpu => Some("cpu"),
            Summary::Disk => Some("disk"),
            Summary::Memory => Some("memory"),
            Summary::Network => Some("network"),
            Summary::Generic => None,
        }
    }

    /// Human-readable summary text
    pub fn as_str(self) -> &'static str {
        match self {
            Summary::Cpu => "High CPU usage detected. Immediate action recommended.",
            Summary::Disk => "Low disk space warning. Consider cleanup.",
            Summary::Memory => "Memory usage alert. Review resource allocation.",
            Summary::Network => {
                "Network connectivity issue detected. Check network configuration."
            }
            Summary::Generic => "Alert received. Review details for action.",
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Classify alert text. First keyword found wins: cpu, disk, memory, network.
pub fn classify(text: &str) -> Summary {
    let lowered = text.to_lowercase();

    Summary::ALL
        .into_iter()
        .find(|summary| {
            summary
                .keyword()
                .is_some_and(|keyword| lowered.contains(keyword))
        })
        .unwrap_or(Summary::Generic)
}

/// Classify alert text and return the summary literal
pub fn summarize(text: &str) -> &'static str {
    classify(text).as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KEYWORDS: [&str; 4] = ["cpu", "disk", "memory", "network"];

    fn has_keyword(text: &str) -> bool {
        let lowered = text.to_lowercase();
        KEYWORDS.iter().any(|k| lowered.contains(k))
    }

    #[test]
    fn test_cpu_alert() {
        assert_eq!(
            summarize("CPU usage exceeded 90% on VM web-01"),
            "High CPU usage detected. Immediate action recommended."
        );
    }

    #[test]
    fn test_disk_alert() {
        assert_eq!(
            summarize("Disk space below 10% on database server"),
            "Low disk space warning. Consider cleanup."
        );
    }

    #[test]
    fn test_memory_alert() {
        assert_eq!(
            summarize("Memory usage exceeded 85%"),
            "Memory usage alert. Review resource allocation."
        );
    }

    #[test]
    fn test_network_alert() {
        assert_eq!(
            summarize("Network connectivity issues detected"),
            "Network connectivity issue detected. Check network configuration."
        );
    }

    #[test]
    fn test_generic_alert() {
        assert_eq!(
            summarize("Unknown alert type"),
            "Alert received. Review details for action."
        );
        assert_eq!(classify(""), Summary::Generic);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("HIGH CPU USAGE"), Summary::Cpu);
        assert_eq!(classify("HIGH CPU USAGE"), classify("high cpu usage"));
        assert_eq!(classify("NeTwOrK down"), Summary::Network);
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(classify("cpu and disk both high"), Summary::Cpu);
        assert_eq!(classify("disk pressure causing memory swap"), Summary::Disk);
        assert_eq!(classify("network buffers exhausted memory"), Summary::Memory);
    }

    #[test]
    fn test_keyword_inside_word() {
        // Substring match, not word match
        assert_eq!(classify("harddisk0 failing"), Summary::Disk);
    }

    #[test]
    fn test_serializes_as_literal() {
        let json = serde_json::to_string(&Summary::Memory).unwrap();
        assert_eq!(json, "\"Memory usage alert. Review resource allocation.\"");
    }

    #[test]
    fn test_display_matches_literal() {
        for summary in Summary::ALL {
            assert_eq!(summary.to_string(), summary.as_str());
        }
    }

    proptest! {
        #[test]
        fn prop_total_and_literal(text in "\\PC{0,64}") {
            let summary = classify(&text);
            prop_assert!(Summary::ALL.contains(&summary));
        }

        #[test]
        fn prop_case_insensitive(text in "[ -~]{0,64}") {
            prop_assert_eq!(classify(&text.to_uppercase()), classify(&text.to_lowercase()));
        }

        #[test]
        fn prop_cpu_always_wins(prefix in "[ -~]{0,24}", suffix in "[ -~]{0,24}") {
            let text = format!("{prefix}CpU{suffix}");
            prop_assert_eq!(classify(&text), Summary::Cpu);
        }

        #[test]
        fn prop_each_keyword_below_higher_ones(
            index in 0usize..4,
            prefix in "[a-z0-9 %]{0,24}",
            suffix in "[a-z0-9 %]{0,24}",
        ) {
            prop_assume!(!has_keyword(&prefix) && !has_keyword(&suffix));
            let expected = Summary::ALL[index];
            let text = format!("{prefix}{}{suffix}", KEYWORDS[index].to_uppercase());
            // Joining may form a higher priority keyword across boundaries
            let lowered = text.to_lowercase();
            prop_assume!(!KEYWORDS[..index].iter().any(|k| lowered.contains(k)));
            prop_assert_eq!(classify(&text), expected);
        }

        #[test]
        fn prop_no_keyword_is_generic(text in "[ -~]{0,64}") {
            prop_assume!(!has_keyword(&text));
            prop_assert_eq!(classify(&text), Summary::Generic);
        }
    }
}
