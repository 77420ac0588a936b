//! Keystrokes in, suggestion lists out.
//!
//! A [`QueryOrchestrator`] owns one suggestion stream. It debounces query
//! text, gates it through [`QueryState`], and keeps every issued lookup in a
//! single `FuturesUnordered`. Superseded lookups are not aborted; their
//! responses are dropped on arrival because their sequence number is no
//! longer current. Only the most recently issued lookup can reach the
//! output channel, whatever order the responses complete in.

mod lookup;
mod state;

use std::future::Future;
use std::pin::Pin;

use bikebuyer_core::CountryCode;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{sleep_until, Instant};

pub use lookup::{AddressLookup, LocalityLookup, Lookup};
pub use state::{Decision, LookupRequest, QueryPolicy, QueryState};

use crate::error::GeoError;

/// One upstream update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    /// Raw query text as typed; debounced.
    Text(String),
    /// Selected country; applied immediately.
    Scope(CountryCode),
    /// City the address search is scoped to; applied immediately.
    Context(String),
}

type InFlight<'a, T> = Pin<Box<dyn Future<Output = (u64, Result<Vec<T>, GeoError>)> + Send + 'a>>;

pub struct QueryOrchestrator<L> {
    lookup: L,
    state: QueryState,
}

impl<L> QueryOrchestrator<L>
where
    L: Lookup + Send + Sync,
{
    #[must_use]
    pub fn new(lookup: L, policy: QueryPolicy, scope: CountryCode) -> Self {
        Self {
            lookup,
            state: QueryState::new(policy, scope),
        }
    }

    /// Drives the stream until `inputs` closes or `outputs` is dropped.
    ///
    /// Every `Clear` decision and every current lookup response sends one
    /// list on `outputs`; a failed lookup sends an empty list. On input
    /// close, pending debounced text is evaluated immediately and the
    /// current lookup, if any, is awaited and delivered before returning.
    pub async fn run(
        self,
        mut inputs: UnboundedReceiver<QueryInput>,
        outputs: UnboundedSender<Vec<L::Item>>,
    ) {
        let Self { lookup, mut state } = self;
        let debounce = state.policy().debounce;

        let mut in_flight: FuturesUnordered<InFlight<'_, L::Item>> = FuturesUnordered::new();
        let mut pending_text: Option<(String, Instant)> = None;
        let mut awaiting_current = false;
        let mut inputs_open = true;

        loop {
            if !inputs_open {
                if let Some((text, _)) = pending_text.take() {
                    let decision = state.accept_text(&text);
                    let listening = dispatch(
                        decision,
                        &lookup,
                        &mut in_flight,
                        &outputs,
                        &mut awaiting_current,
                    );
                    if !listening {
                        return;
                    }
                }
                if !awaiting_current {
                    return;
                }
            }

            let deadline = pending_text
                .as_ref()
                .map_or_else(Instant::now, |(_, deadline)| *deadline);

            let decision = tokio::select! {
                input = inputs.recv(), if inputs_open => match input {
                    Some(QueryInput::Text(text)) => {
                        pending_text = Some((text, Instant::now() + debounce));
                        continue;
                    }
                    Some(QueryInput::Scope(scope)) => state.set_scope(scope),
                    Some(QueryInput::Context(context)) => state.set_context(&context),
                    None => {
                        inputs_open = false;
                        continue;
                    }
                },
                () = sleep_until(deadline), if pending_text.is_some() => {
                    match pending_text.take() {
                        Some((text, _)) => state.accept_text(&text),
                        None => continue,
                    }
                }
                Some((seq, result)) = in_flight.next(), if !in_flight.is_empty() => {
                    if !state.is_current(seq) {
                        tracing::debug!(seq, "dropping superseded lookup response");
                        continue;
                    }
                    awaiting_current = false;
                    let items = result.unwrap_or_else(|e| {
                        tracing::warn!(seq, error = %e, "lookup failed; clearing suggestions");
                        Vec::new()
                    });
                    if outputs.send(items).is_err() {
                        return;
                    }
                    continue;
                }
                else => return,
            };

            let listening = dispatch(
                decision,
                &lookup,
                &mut in_flight,
                &outputs,
                &mut awaiting_current,
            );
            if !listening {
                return;
            }
        }
    }
}

/// Applies a decision, pushing any new lookup onto `in_flight`.
///
/// Returns `false` once nobody listens on `outputs`.
fn dispatch<'a, L>(
    decision: Decision,
    lookup: &'a L,
    in_flight: &mut FuturesUnordered<InFlight<'a, L::Item>>,
    outputs: &UnboundedSender<Vec<L::Item>>,
    awaiting_current: &mut bool,
) -> bool
where
    L: Lookup + Send + Sync,
{
    match decision {
        Decision::Unchanged => true,
        Decision::Clear => {
            *awaiting_current = false;
            outputs.send(Vec::new()).is_ok()
        }
        Decision::Issue(request) => {
            tracing::debug!(seq = request.seq, query = %request.text, "issuing lookup");
            *awaiting_current = true;
            in_flight.push(Box::pin(async move {
                let result = lookup.lookup(&request).await;
                (request.seq, result)
            }));
            true
        }
    }
}
