//! Catalog of AI backends available to the relay.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which AI backend serves a user's messages.
///
/// `Disabled` is the dummy-mode sentinel: no backend is consulted while it
/// is active. Declaration order of the remaining variants is the order they
/// are listed in when rendering provider hints; it carries no precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Dummy mode sentinel. Never dispatches to a backend.
    Disabled,
    /// DeepSeek chat completions.
    DeepSeek,
    /// Eden AI text generation.
    Eden,
}

impl Provider {
    /// Provider assigned to freshly created sessions.
    pub const DEFAULT: Provider = Provider::DeepSeek;

    /// All user-selectable providers, in declaration order.
    ///
    /// The dummy sentinel is excluded; users enter dummy mode through the
    /// dedicated command, never by selecting it as a provider.
    pub fn selectable() -> &'static [Provider] {
        &[Provider::DeepSeek, Provider::Eden]
    }

    /// Fixed human-readable label for this variant.
    ///
    /// The source this relay replaces fell back to `"Unknown"` for
    /// unmapped variants; with a closed enum every variant is mapped, so
    /// that fallback is unrepresentable here.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Disabled => "Dummy Mode",
            Provider::DeepSeek => "DeepSeek",
            Provider::Eden => "Eden",
        }
    }

    /// Keyword users type to select this provider.
    pub fn keyword(&self) -> &'static str {
        match self {
            Provider::Disabled => "dummy",
            Provider::DeepSeek => "deepseek",
            Provider::Eden => "eden",
        }
    }

    /// Parses a user-supplied provider keyword, case-insensitively.
    ///
    /// Only selectable providers parse; `None` covers both unknown names
    /// and attempts to name the dummy sentinel directly.
    pub fn from_keyword(s: &str) -> Option<Provider> {
        let s = s.trim();
        Provider::selectable()
            .iter()
            .copied()
            .find(|p| p.keyword().eq_ignore_ascii_case(s))
    }

    /// True for the dummy-mode sentinel.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Provider::Disabled)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
