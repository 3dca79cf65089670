//! Rule-based chat assistant.
//!
//! Maps free-text questions about phishing, URLs, and the detection system
//! to canned explanations. Deterministic and total: every input produces a
//! reply, no call ever fails.

pub mod rules;

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::Serialize;
use tracing::{debug, warn};

use self::rules::Rule;

/// Reply for empty/whitespace-only input; returned without consulting the
/// rule table.
const EMPTY_INPUT_REPLY: &str = "Hi! I can help you understand URLs, phishing attacks, \
     HTTPS, machine learning detection, and how our project works.";

/// Reply when no rule matches.
const FALLBACK_REPLY: &str = "I'm a rule-based assistant for this project. Try asking me \
     about: phishing, URLs, HTTPS, zero-day attacks, lexical features, semantic intention \
     mapping, machine learning, datasets, or how our detection system works.";

/// Canned reply to one chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Evaluates an ordered rule table against one message.
///
/// The table is built once at startup and injected here; it is never
/// mutated, so one dispatcher is safely shared across concurrent requests.
pub struct Dispatcher {
    rules: Vec<Rule>,
}

impl Dispatcher {
    /// Dispatcher over an explicit rule table (tests substitute minimal
    /// tables here).
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Dispatcher over the full built-in topic table.
    pub fn with_default_rules() -> Self {
        Self::new(rules::default_rules())
    }

    /// Map one message to a reply. Total: never fails, never panics.
    ///
    /// Input is lowercased and trimmed before matching. Rules are tried in
    /// table order and the first match wins; later rules that would also
    /// match are never consulted.
    pub fn dispatch(&self, text: &str) -> ChatReply {
        let normalized = text.trim().to_lowercase();

        if normalized.is_empty() {
            return ChatReply {
                reply: EMPTY_INPUT_REPLY.to_string(),
            };
        }

        for rule in &self.rules {
            // A panicking predicate must not break the total-function
            // contract; treat it as a non-match and move on.
            let matched = catch_unwind(AssertUnwindSafe(|| rule.matches(&normalized)))
                .unwrap_or_else(|_| {
                    warn!(rule = rule.name, "Rule predicate panicked; skipping");
                    false
                });

            if matched {
                debug!(rule = rule.name, "Chat message matched rule");
                return ChatReply {
                    reply: rule.reply.to_string(),
                };
            }
        }

        debug!("Chat message matched no rule, using fallback");
        ChatReply {
            reply: FALLBACK_REPLY.to_string(),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::rules::{Match, Rule};
    use super::*;

    #[test]
    fn empty_input_gets_greeting_help() {
        let dispatcher = Dispatcher::with_default_rules();
        assert_eq!(dispatcher.dispatch("").reply, EMPTY_INPUT_REPLY);
        assert_eq!(dispatcher.dispatch("   ").reply, EMPTY_INPUT_REPLY);
        assert_eq!(dispatcher.dispatch("\n\t").reply, EMPTY_INPUT_REPLY);
    }

    #[test]
    fn greeting_is_detected() {
        let dispatcher = Dispatcher::with_default_rules();
        let reply = dispatcher.dispatch("hello").reply;
        assert!(reply.contains("Ask me anything"));
        // Bounded word match, not substring: "phishing" contains "hi".
        assert!(!dispatcher.dispatch("phishing").reply.contains("Ask me anything"));
    }

    #[test]
    fn greeting_matches_case_insensitively() {
        let dispatcher = Dispatcher::with_default_rules();
        let reply = dispatcher.dispatch("  Hey there!  ").reply;
        assert!(reply.contains("Ask me anything"));
    }

    #[test]
    fn phishing_definition() {
        let dispatcher = Dispatcher::with_default_rules();
        let reply = dispatcher.dispatch("what is phishing").reply;
        assert!(reply.contains("impersonate legitimate websites"));
    }

    #[test]
    fn pasted_url_redirects_to_detection_page() {
        let dispatcher = Dispatcher::with_default_rules();
        for input in [
            "https://example.com",
            "http://login-secure-update.net/verify",
            "check out suspicious-site.org please",
        ] {
            let reply = dispatcher.dispatch(input).reply;
            assert!(reply.contains("Detection Page"), "input: {}", input);
        }
    }

    #[test]
    fn unknown_input_gets_fallback() {
        let dispatcher = Dispatcher::with_default_rules();
        assert_eq!(dispatcher.dispatch("asdkjasd").reply, FALLBACK_REPLY);
    }

    #[test]
    fn first_matching_rule_wins() {
        // Both rules match "alpha beta"; the earlier one must win no matter
        // how broad the later one is.
        let rules = vec![
            Rule {
                name: "narrow",
                when: vec![Match::AllOf(vec!["alpha", "beta"])],
                reply: "narrow reply",
            },
            Rule {
                name: "broad",
                when: vec![Match::AnyOf(vec!["alpha"])],
                reply: "broad reply",
            },
        ];
        let dispatcher = Dispatcher::new(rules);
        assert_eq!(dispatcher.dispatch("alpha beta").reply, "narrow reply");
        assert_eq!(dispatcher.dispatch("alpha only").reply, "broad reply");
    }

    #[test]
    fn input_is_normalized_before_matching() {
        let dispatcher = Dispatcher::with_default_rules();
        let upper = dispatcher.dispatch("  WHAT IS PHISHING  ").reply;
        let lower = dispatcher.dispatch("what is phishing").reply;
        assert_eq!(upper, lower);
    }

    #[test]
    fn dispatch_is_total_over_arbitrary_text() {
        let dispatcher = Dispatcher::with_default_rules();
        let long = "a".repeat(10_000);
        for input in ["", "🦀🦀🦀", long.as_str(), "\0\0", "ホーム"] {
            assert!(!dispatcher.dispatch(input).reply.is_empty());
        }
    }
}
