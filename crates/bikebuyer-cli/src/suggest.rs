//! `suggest` command: feeds stdin lines through a query orchestrator.
//!
//! Every line is one value of the field as it is being typed, so piping a
//! file of keystroke states reproduces a typing session. Each list the
//! orchestrator delivers is printed as one line of JSON.

use std::time::Duration;

use bikebuyer_core::{AppConfig, CountryCode};
use bikebuyer_geo::{
    AddressLookup, GeoAdminClient, LocalityLookup, Lookup, QueryInput, QueryOrchestrator,
    QueryPolicy,
};
use clap::Subcommand;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Sub-commands available under `suggest`.
#[derive(Debug, Subcommand)]
pub enum SuggestCommands {
    /// Suggest localities for postal code text
    Zip {
        /// Selected country (defaults to the domestic country)
        #[arg(long)]
        country: Option<String>,
    },
    /// Suggest street addresses within a city
    Address {
        /// City the street search is scoped to
        #[arg(long)]
        city: String,
        /// Selected country (defaults to the domestic country)
        #[arg(long)]
        country: Option<String>,
    },
}

pub(crate) async fn run_suggest(config: &AppConfig, command: SuggestCommands) -> anyhow::Result<()> {
    let client = GeoAdminClient::with_base_url(
        &config.geo_base_url,
        config.http_timeout_secs,
        &config.user_agent,
        config.search_limit,
    )?;
    let domestic = config.domestic_country.clone();

    match command {
        SuggestCommands::Zip { country } => {
            let scope = resolve_scope(country.as_deref(), &domestic)?;
            let policy = QueryPolicy::locality(domestic)
                .with_debounce(Duration::from_millis(config.locality_debounce_ms));
            stream_suggestions(LocalityLookup::new(client), policy, scope, Vec::new()).await
        }
        SuggestCommands::Address { city, country } => {
            let scope = resolve_scope(country.as_deref(), &domestic)?;
            let policy = QueryPolicy::address(domestic.clone())
                .with_debounce(Duration::from_millis(config.address_debounce_ms));
            let lookup = AddressLookup::new(client, domestic);
            stream_suggestions(lookup, policy, scope, vec![QueryInput::Context(city)]).await
        }
    }
}

fn resolve_scope(country: Option<&str>, domestic: &CountryCode) -> anyhow::Result<CountryCode> {
    match country {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(domestic.clone()),
    }
}

async fn stream_suggestions<L>(
    lookup: L,
    policy: QueryPolicy,
    scope: CountryCode,
    preamble: Vec<QueryInput>,
) -> anyhow::Result<()>
where
    L: Lookup + Send + Sync + 'static,
    L::Item: Serialize,
{
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (output_tx, mut output_rx) = mpsc::unbounded_channel();

    let orchestrator = QueryOrchestrator::new(lookup, policy, scope);
    let task = tokio::spawn(orchestrator.run(input_rx, output_tx));

    for input in preamble {
        input_tx.send(input)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => input_tx.send(QueryInput::Text(line))?,
                None => break,
            },
            Some(list) = output_rx.recv() => print_list(&list)?,
        }
    }

    // Closing the input flushes pending text; drain what is still coming.
    drop(input_tx);
    while let Some(list) = output_rx.recv().await {
        print_list(&list)?;
    }
    task.await?;

    Ok(())
}

fn print_list<T: Serialize>(list: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(list)?);
    Ok(())
}
