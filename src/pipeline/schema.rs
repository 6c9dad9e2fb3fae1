use crate::domain::ResultRecord;

/// Canonical export column order. Every result set serializes exactly these
/// columns in exactly this order, so tabular consumers can rely on
/// positional alignment across sets.
pub const COLUMNS: [&str; 17] = [
    "Rank",
    "Time",
    "Wind",
    "Name",
    "Country",
    "DOB",
    "Position_in_race",
    "City",
    "Date",
    "Legal",
    "Note",
    "Sex",
    "Event",
    "All_Conditions_Rank",
    "Age_at_Time_of_Race",
    "Competition_id",
    "Track_or_Field",
];

/// Marker for a wind cell with nothing behind it: field events and tables
/// published without a wind column.
pub const WIND_PLACEHOLDER: &str = "N/A";

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

/// Renders one record as its 17 export cells in [`COLUMNS`] order. Absent
/// values serialize as empty cells, except wind which gets the explicit
/// placeholder; dates render ISO-8601.
pub fn to_row(record: &ResultRecord) -> [String; 17] {
    [
        opt(&record.rank),
        opt(&record.time),
        record
            .wind
            .clone()
            .unwrap_or_else(|| WIND_PLACEHOLDER.to_string()),
        record.name.clone(),
        record.country.clone(),
        opt(&record.dob),
        opt(&record.position_in_race),
        record.city.clone(),
        opt(&record.date),
        record.legal.as_str().to_string(),
        opt(&record.note),
        record.sex.as_str().to_string(),
        record.event.clone(),
        record.all_conditions_rank.to_string(),
        opt(&record.age_at_race),
        opt(&record.competition_id),
        record.discipline.as_str().to_string(),
    ]
}
