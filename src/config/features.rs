//! Behavioral policy switches

use serde::Deserialize;

use crate::domain::cart::DanglingLinePolicy;
use crate::domain::order::StatusTransitionPolicy;

/// Store policies selectable per deployment
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Whether admins may set any status or only follow the lifecycle
    #[serde(default)]
    pub status_transition_policy: StatusTransitionPolicy,

    /// What a cart read does with lines whose product was deleted
    #[serde(default)]
    pub dangling_line_policy: DanglingLinePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert_eq!(flags.status_transition_policy, StatusTransitionPolicy::Permissive);
        assert_eq!(flags.dangling_line_policy, DanglingLinePolicy::Drop);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "status_transition_policy": "strict",
            "dangling_line_policy": "mark_unresolvable"
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert_eq!(flags.status_transition_policy, StatusTransitionPolicy::Strict);
        assert_eq!(flags.dangling_line_policy, DanglingLinePolicy::MarkUnresolvable);
    }
}
