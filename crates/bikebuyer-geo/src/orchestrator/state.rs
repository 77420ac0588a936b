//! Synchronous gating state for one suggestion stream.
//!
//! [`QueryState`] holds the last known value of every input (query text,
//! country scope, city context) and recomputes a [`Decision`] whenever one
//! of them changes. Each `Clear` or `Issue` advances the stream's request
//! sequence number; a lookup response is applied only if it carries the
//! current number.

use std::time::Duration;

use bikebuyer_core::CountryCode;

/// Gating parameters for one suggestion stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Quiet period the query text must hold before it is evaluated.
    pub debounce: Duration,
    /// Minimum trimmed length, in characters, before a lookup is issued.
    pub min_len: usize,
    /// Whether a non-empty context value (the city) is required.
    pub requires_context: bool,
    /// Scope value for which lookups are enabled.
    pub domestic: CountryCode,
}

impl QueryPolicy {
    /// Postal-code → locality suggestions.
    #[must_use]
    pub fn locality(domestic: CountryCode) -> Self {
        Self {
            debounce: Duration::from_millis(200),
            min_len: 3,
            requires_context: false,
            domestic,
        }
    }

    /// Street text (within a city) → address suggestions.
    #[must_use]
    pub fn address(domestic: CountryCode) -> Self {
        Self {
            debounce: Duration::from_millis(250),
            min_len: 2,
            requires_context: true,
            domestic,
        }
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// A lookup the orchestrator should run, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub seq: u64,
    pub text: String,
    pub context: String,
}

/// Outcome of applying one input update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Suggestions must be emptied; any in-flight lookup is now stale.
    Clear,
    /// Nothing changed; keep the current suggestions and in-flight lookup.
    Unchanged,
    /// Run this lookup; any earlier in-flight lookup is now stale.
    Issue(LookupRequest),
}

#[derive(Debug, Clone)]
pub struct QueryState {
    policy: QueryPolicy,
    last_text: Option<String>,
    scope: CountryCode,
    context: String,
    current_seq: u64,
}

impl QueryState {
    #[must_use]
    pub fn new(policy: QueryPolicy, scope: CountryCode) -> Self {
        Self {
            policy,
            last_text: None,
            scope,
            context: String::new(),
            current_seq: 0,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &QueryPolicy {
        &self.policy
    }

    /// Applies a (debounced) query text value.
    ///
    /// The value is trimmed first; a value equal to the previous one is
    /// suppressed.
    pub fn accept_text(&mut self, raw: &str) -> Decision {
        let text = raw.trim();
        if self.last_text.as_deref() == Some(text) {
            return Decision::Unchanged;
        }
        self.last_text = Some(text.to_owned());
        self.evaluate()
    }

    /// Applies a new scope (country) value.
    pub fn set_scope(&mut self, scope: CountryCode) -> Decision {
        if scope == self.scope {
            return Decision::Unchanged;
        }
        self.scope = scope;
        self.evaluate()
    }

    /// Applies a new context (city) value. Ignored by streams that do not
    /// require one.
    pub fn set_context(&mut self, raw: &str) -> Decision {
        let context = raw.trim();
        if context == self.context {
            return Decision::Unchanged;
        }
        context.clone_into(&mut self.context);
        if self.policy.requires_context {
            self.evaluate()
        } else {
            Decision::Unchanged
        }
    }

    /// Whether a response tagged with `seq` may still be delivered.
    #[must_use]
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.current_seq
    }

    fn evaluate(&mut self) -> Decision {
        self.current_seq += 1;

        let text = self.last_text.as_deref().unwrap_or_default();
        let qualifies = text.chars().count() >= self.policy.min_len
            && self.scope == self.policy.domestic
            && !(self.policy.requires_context && self.context.is_empty());

        if qualifies {
            Decision::Issue(LookupRequest {
                seq: self.current_seq,
                text: text.to_owned(),
                context: self.context.clone(),
            })
        } else {
            Decision::Clear
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locality_state() -> QueryState {
        QueryState::new(
            QueryPolicy::locality(CountryCode::domestic()),
            CountryCode::domestic(),
        )
    }

    fn address_state() -> QueryState {
        QueryState::new(
            QueryPolicy::address(CountryCode::domestic()),
            CountryCode::domestic(),
        )
    }

    fn issued(decision: Decision) -> LookupRequest {
        match decision {
            Decision::Issue(request) => request,
            other => panic!("expected Issue, got {other:?}"),
        }
    }

    #[test]
    fn short_text_clears() {
        let mut state = locality_state();
        assert_eq!(state.accept_text("19"), Decision::Clear);
        assert_eq!(state.accept_text("  19  "), Decision::Unchanged);
    }

    #[test]
    fn qualifying_text_is_trimmed_and_issued() {
        let mut state = locality_state();
        let request = issued(state.accept_text("  195 "));
        assert_eq!(request.text, "195");
        assert!(state.is_current(request.seq));
    }

    #[test]
    fn min_len_counts_characters_not_bytes() {
        let mut state = address_state();
        state.set_context("Zürich");
        assert!(matches!(state.accept_text("Ü"), Decision::Clear));
        assert!(matches!(state.accept_text("Üb"), Decision::Issue(_)));
    }

    #[test]
    fn repeated_text_is_suppressed() {
        let mut state = locality_state();
        issued(state.accept_text("1950"));
        assert_eq!(state.accept_text("1950 "), Decision::Unchanged);
    }

    #[test]
    fn text_returning_to_previous_value_after_change_is_reissued() {
        let mut state = locality_state();
        issued(state.accept_text("1950"));
        assert_eq!(state.accept_text("19"), Decision::Clear);
        let request = issued(state.accept_text("1950"));
        assert_eq!(request.text, "1950");
    }

    #[test]
    fn newer_request_supersedes_older() {
        let mut state = locality_state();
        let first = issued(state.accept_text("1950"));
        let second = issued(state.accept_text("1951"));
        assert!(!state.is_current(first.seq));
        assert!(state.is_current(second.seq));
    }

    #[test]
    fn clear_invalidates_in_flight_request() {
        let mut state = locality_state();
        let request = issued(state.accept_text("1950"));
        assert_eq!(state.accept_text("1"), Decision::Clear);
        assert!(!state.is_current(request.seq));
    }

    #[test]
    fn foreign_scope_clears_and_domestic_reissues() {
        let mut state = locality_state();
        let first = issued(state.accept_text("1950"));
        assert_eq!(state.set_scope(CountryCode::new("DE")), Decision::Clear);
        assert!(!state.is_current(first.seq));

        let again = issued(state.set_scope(CountryCode::domestic()));
        assert_eq!(again.text, "1950");
        assert!(again.seq > first.seq);
    }

    #[test]
    fn same_scope_is_unchanged() {
        let mut state = locality_state();
        issued(state.accept_text("1950"));
        assert_eq!(state.set_scope(CountryCode::new("ch")), Decision::Unchanged);
    }

    #[test]
    fn address_requires_city_context() {
        let mut state = address_state();
        assert_eq!(state.accept_text("Rue du Lac"), Decision::Clear);
        let request = issued(state.set_context(" Sion "));
        assert_eq!(request.text, "Rue du Lac");
        assert_eq!(request.context, "Sion");
        assert_eq!(state.set_context(""), Decision::Clear);
    }

    #[test]
    fn locality_ignores_context() {
        let mut state = locality_state();
        let request = issued(state.accept_text("1950"));
        assert_eq!(state.set_context("Sion"), Decision::Unchanged);
        assert!(state.is_current(request.seq));
    }

    #[test]
    fn scope_change_before_any_text_clears() {
        let mut state = locality_state();
        assert_eq!(state.set_scope(CountryCode::new("GB")), Decision::Clear);
    }
}
