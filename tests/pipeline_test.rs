use std::sync::Arc;

use anyhow::Result;
use ata_scraper::catalog::{EventQuery, Gender};
use ata_scraper::domain::Legality;
use ata_scraper::export;
use ata_scraper::fetch::{StaticTableSource, TableSource};
use ata_scraper::pipeline;
use ata_scraper::pipeline::schema;
use tempfile::tempdir;

const MEN_100M_LEGAL: &str = "
   1   9.58   +0.9   Usain Bolt   JAM   21.08.86   1   Berlin   16.08.2009
   2   9.69   +2.0   Tyson Gay   USA   09.08.82   1   Shanghai   20.09.2009
   3   9.72   +0.2   Asafa Powell   JAM   23.11.82   1   Lausanne   02.09.2008";

const MEN_100M_ILLEGAL: &str = "
   1   9.68   +4.1   Tyson Gay   USA   -   1   Eugene   28.06.2008
   2   9.78   +5.2   Obadele Thompson   BAR   30.03.76   1   El Paso   13.04.1996";

const MEN_100M_LEGAL_TOKYO: &str = "
   1   9.86   +1.2   Carl Lewis   USA   01.07.61   1   Tokyo   25.08.1991
   2   9.88   +1.0   Leroy Burrell   USA   21.02.67   2   Tokyo   25.08.1991
   3   9.92   +0.3   Andre Cason   USA   20.01.69   1   Stuttgart   15.08.1993";

// Older wind-assisted lists carry no gauge readings at all, so the page has
// nine columns while its legal sibling has ten.
const MEN_100M_ILLEGAL_UNGAUGED: &str = "
   1   9.69   Obadele Thompson   BAR   30.03.76   1   El Paso   13.04.1996
   2   9.79   Andre Cason   USA   20.01.69   1   El Paso   16.04.1993";

const WOMEN_SHOT: &str = "
   1   22.63   Natalya Lisovskaya   URS   00.00.1962   1   Moscow   07.06.1987
   2   22.45   Ilona Slupianek   GDR   24.09.56   1   Potsdam   11.05.1980";

const MEN_1500: &str = "
   1   3:26.00   Hicham El Guerrouj   MAR   14.09.74   1   Roma   14.07.1998
   2   3:26.34   Bernard Lagat   KEN   12.12.74   2   Brussels   24.08.2001";

#[tokio::test]
async fn wind_event_merges_both_variants_into_one_ranked_set() -> Result<()> {
    let source = StaticTableSource::new()
        .with_page("m_100mok", MEN_100M_LEGAL)
        .with_page("m_100mno", MEN_100M_ILLEGAL);

    let records = pipeline::run_query(&source, EventQuery::new(Gender::Male, "100m"), 2024)
        .await
        .expect("both variants present, so the query must yield data");

    assert_eq!(records.len(), 5);

    // Legal rows come first, in source order; illegal rows follow.
    assert_eq!(records[0].name, "Usain Bolt");
    assert_eq!(records[3].name, "Tyson Gay");
    assert_eq!(records[3].legal, Legality::Illegal);

    // The all-conditions rank spans the merged set: the wind-aided 9.68
    // slots in between 9.58 and 9.69.
    assert_eq!(records[0].all_conditions_rank, 1);
    assert_eq!(records[3].all_conditions_rank, 2);
    assert_eq!(records[1].all_conditions_rank, 3);

    // Official rank survives only on legal marks.
    assert_eq!(records[0].rank, Some(1));
    assert!(records.iter().filter(|r| r.legal == Legality::Illegal).all(|r| r.rank.is_none()));

    // The illegal Tyson Gay row had no usable birth date; the mode vote
    // fills it from his legal row.
    assert_eq!(records[3].dob, records[1].dob);
    assert!(records[3].dob.is_some());

    // Every wind cell was present in these tables.
    assert!(records.iter().all(|r| r.wind.is_some()));
    Ok(())
}

#[tokio::test]
async fn wind_event_is_skipped_when_the_illegal_page_is_missing() -> Result<()> {
    let source = StaticTableSource::new().with_page("m_100mok", MEN_100M_LEGAL);
    let outcome = pipeline::run_query(&source, EventQuery::new(Gender::Male, "100m"), 2024).await;
    assert!(outcome.is_none());
    Ok(())
}

#[tokio::test]
async fn illegal_table_without_a_wind_column_merges_with_placeholder_wind() -> Result<()> {
    let source = StaticTableSource::new()
        .with_page("m_100mok", MEN_100M_LEGAL_TOKYO)
        .with_page("m_100mno", MEN_100M_ILLEGAL_UNGAUGED);

    let records = pipeline::run_query(&source, EventQuery::new(Gender::Male, "100m"), 2024)
        .await
        .expect("both variant pages are present");

    assert_eq!(records.len(), 5);

    // The nine-column variant has no wind cells: its rows merge with wind
    // empty while the legal rows keep their readings.
    assert!(records[..3].iter().all(|r| r.wind.is_some()));
    assert!(records[3..].iter().all(|r| r.wind.is_none()));
    assert!(records[3..].iter().all(|r| r.legal == Legality::Illegal));
    assert!(records[3..].iter().all(|r| r.rank.is_none()));

    // Union ranks: both ungauged marks outrank every legal one.
    assert_eq!(records[3].all_conditions_rank, 1);
    assert_eq!(records[4].all_conditions_rank, 2);
    assert_eq!(records[0].all_conditions_rank, 3);
    assert_eq!(records[2].all_conditions_rank, 5);

    // On export the absent readings render as the placeholder, never as an
    // empty cell, and every row keeps the full column set.
    let dir = tempdir()?;
    let path = dir.path().join("mixed.csv");
    export::write_csv(&path, &[records])?;
    let text = std::fs::read_to_string(&path)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines
        .iter()
        .all(|line| line.split(',').count() == schema::COLUMNS.len()));
    assert_eq!(lines[1].split(',').nth(2), Some("+1.2"));
    assert_eq!(lines[4].split(',').nth(2), Some("N/A"));
    assert_eq!(lines[5].split(',').nth(2), Some("N/A"));
    Ok(())
}

#[tokio::test]
async fn field_event_repairs_dates_and_corrects_centuries() -> Result<()> {
    let source = StaticTableSource::new().with_page("w_shotok", WOMEN_SHOT);

    let records = pipeline::run_query(&source, EventQuery::new(Gender::Female, "shot"), 2024)
        .await
        .expect("field event needs only the legal page");

    // The 00.00. placeholder becomes January 1st.
    assert_eq!(
        records[0].dob,
        chrono::NaiveDate::from_ymd_opt(1962, 1, 1)
    );
    // A two-digit year that lands in the future wraps back a century.
    assert_eq!(
        records[1].dob,
        chrono::NaiveDate::from_ymd_opt(1956, 9, 24)
    );

    // Field events rank descending: the longer put is first.
    assert_eq!(records[0].all_conditions_rank, 1);
    assert_eq!(records[1].all_conditions_rank, 2);

    assert_eq!(records[0].age_at_race, Some(25));
    Ok(())
}

#[tokio::test]
async fn clock_notation_times_convert_to_seconds() -> Result<()> {
    let source = StaticTableSource::new().with_page("m_1500ok", MEN_1500);

    let records = pipeline::run_query(&source, EventQuery::new(Gender::Male, "1500"), 2024)
        .await
        .expect("middle distance event should parse");

    let first = records[0].time.expect("time must parse");
    assert!((first - 206.00).abs() < 1e-9);
    let second = records[1].time.expect("time must parse");
    assert!((second - 206.34).abs() < 1e-9);
    assert_eq!(records[0].all_conditions_rank, 1);
    Ok(())
}

#[tokio::test]
async fn same_meet_hashes_identically_across_queries() -> Result<()> {
    // The women's shot put and the men's 1500 share no data, but records
    // from the same (date, city) must group under one competition id.
    let shot = "
   1   21.00   Thrower One   USA   01.01.70   1   Zurich   19.08.1998";
    let fifteen = "
   1   3:29.00   Runner One   KEN   02.02.72   1   Zurich   19.08.1998";
    let source = StaticTableSource::new()
        .with_page("w_shotok", shot)
        .with_page("m_1500ok", fifteen);

    let shot_records = pipeline::run_query(&source, EventQuery::new(Gender::Female, "shot"), 2024)
        .await
        .expect("shot data");
    let run_records = pipeline::run_query(&source, EventQuery::new(Gender::Male, "1500"), 2024)
        .await
        .expect("1500 data");

    let a = shot_records[0].competition_id.as_deref().expect("id");
    let b = run_records[0].competition_id.as_deref().expect("id");
    assert_eq!(a, b);
    assert_eq!(a.len(), 40);
    Ok(())
}

#[tokio::test]
async fn catalogue_run_reports_missing_events_without_aborting() -> Result<()> {
    let source: Arc<dyn TableSource> =
        Arc::new(StaticTableSource::new().with_page("w_shotok", WOMEN_SHOT));
    let queries = vec![
        EventQuery::new(Gender::Female, "shot"),
        EventQuery::new(Gender::Male, "400"),
    ];

    let outcomes = pipeline::run_queries(source, queries.clone(), 2024).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].0, queries[0]);
    assert!(outcomes[0].1.is_some());
    assert_eq!(outcomes[1].0, queries[1]);
    assert!(outcomes[1].1.is_none());
    Ok(())
}

#[tokio::test]
async fn combined_export_writes_one_header_and_all_sets() -> Result<()> {
    let source = StaticTableSource::new()
        .with_page("w_shotok", WOMEN_SHOT)
        .with_page("m_1500ok", MEN_1500);

    let shot = pipeline::run_query(&source, EventQuery::new(Gender::Female, "shot"), 2024)
        .await
        .expect("shot data");
    let fifteen = pipeline::run_query(&source, EventQuery::new(Gender::Male, "1500"), 2024)
        .await
        .expect("1500 data");

    let dir = tempdir()?;
    let path = dir.path().join("data.csv");
    export::write_csv(&path, &[shot, fifteen])?;

    let text = std::fs::read_to_string(&path)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], schema::COLUMNS.join(","));

    // Neither table had a wind column, so every record exports the
    // placeholder.
    assert!(lines[1..].iter().all(|line| line.contains("N/A")));
    // Sex and discipline columns reflect the query, not the table.
    assert!(lines[1].contains("Female") && lines[1].contains("Field"));
    assert!(lines[3].contains("Male") && lines[3].contains("Track"));
    Ok(())
}
