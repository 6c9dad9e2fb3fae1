pub mod competition;
pub mod identity;
pub mod merge;
pub mod normalize;
pub mod rank;
pub mod schema;
pub mod table;
pub mod tokenize;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::catalog::EventQuery;
use crate::domain::{ResultRecord, ResultSet};
use crate::fetch::TableSource;

/// Runs the full parse and normalize pipeline for one (gender, event) query.
/// `None` means no data: a variant page was missing or empty, or every row
/// fell out during normalization. Fetch errors are downgraded to the same
/// outcome so one broken page never aborts a catalogue run.
#[instrument(skip(source, current_year), fields(query = %query.describe()))]
pub async fn run_query(
    source: &dyn TableSource,
    query: EventQuery,
    current_year: i32,
) -> Option<ResultSet> {
    let legal_text = match source.fetch_table(&query.page_name(true)).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            info!("No table found for the legal variant");
            return None;
        }
        Err(err) => {
            warn!("Fetch failed for the legal variant: {}", err);
            return None;
        }
    };
    let legal = table::assemble(tokenize::tokenize(&legal_text));

    // Only wind-affected events publish a second, illegal-conditions page.
    let illegal = if legal.shape == table::TableShape::HasWind {
        match source.fetch_table(&query.page_name(false)).await {
            Ok(Some(text)) => Some(table::assemble(tokenize::tokenize(&text))),
            Ok(None) => None,
            Err(err) => {
                warn!("Fetch failed for the illegal variant: {}", err);
                None
            }
        }
    } else {
        None
    };

    let merged = merge::merge(legal, illegal)?;
    let normalized = normalize::normalize(merged, &query, current_year);
    if normalized.is_empty() {
        info!("Every row fell out during normalization");
        return None;
    }
    let reconciled = identity::reconcile_dobs(normalized);

    let times: Vec<Option<f64>> = reconciled.iter().map(|row| row.time).collect();
    let discipline = query.discipline();
    let ranks = rank::all_conditions_ranks(&times, discipline);

    let records: ResultSet = reconciled
        .into_iter()
        .zip(ranks)
        .map(|(row, all_conditions_rank)| {
            let age_at_race = identity::age_at_race(row.date, row.dob);
            let competition_id = row
                .date
                .map(|date| competition::competition_id(date, &row.city));
            ResultRecord {
                rank: rank::official_rank(row.rank, row.legal),
                time: row.time,
                wind: row.wind,
                name: row.name,
                country: row.country,
                dob: row.dob,
                position_in_race: row.position,
                city: row.city,
                date: row.date,
                legal: row.legal,
                note: row.note,
                sex: query.gender,
                event: query.event.to_string(),
                all_conditions_rank,
                age_at_race,
                competition_id,
                discipline,
            }
        })
        .collect();

    info!("Produced {} records", records.len());
    Some(records)
}

/// Runs many queries concurrently, one task each, and returns the outcomes
/// paired with their query in the order the queries were given. Queries are
/// fully independent, so no outcome can affect another.
pub async fn run_queries(
    source: Arc<dyn TableSource>,
    queries: Vec<EventQuery>,
    current_year: i32,
) -> Vec<(EventQuery, Option<ResultSet>)> {
    let mut handles = Vec::with_capacity(queries.len());
    for query in queries {
        let source = Arc::clone(&source);
        let handle =
            tokio::spawn(async move { run_query(source.as_ref(), query, current_year).await });
        handles.push((query, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (query, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Worker for {} died: {}", query.describe(), err);
                None
            }
        };
        if outcome.is_none() {
            info!("No data for {}", query.describe());
        }
        results.push((query, outcome));
    }
    results
}
