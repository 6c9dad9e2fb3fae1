use std::cmp::Ordering;

use crate::domain::{Discipline, Legality};

/// Assigns an all-conditions rank to every position in `times`, spanning the
/// merged legal and illegal rows. Track events rank ascending (fastest is 1),
/// field events descending (longest or highest is 1). Ties share the minimum
/// rank of their group and the next distinct value skips past it, so times
/// `[10.0, 10.0, 10.2]` rank `[1, 1, 3]`. Rows with no parsed performance
/// cannot be compared; they form one trailing tied group ranked after every
/// comparable row.
pub fn all_conditions_ranks(times: &[Option<f64>], discipline: Discipline) -> Vec<u32> {
    let mut order: Vec<(usize, f64)> = times
        .iter()
        .enumerate()
        .filter_map(|(i, t)| t.map(|t| (i, t)))
        .collect();
    order.sort_by(|a, b| {
        let ord = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
        match discipline {
            Discipline::Track => ord,
            Discipline::Field => ord.reverse(),
        }
    });

    let unranked = order.len() as u32 + 1;
    let mut ranks = vec![unranked; times.len()];
    let mut prev: Option<(f64, u32)> = None;
    for (pos, &(idx, time)) in order.iter().enumerate() {
        let rank = match prev {
            Some((prev_time, prev_rank)) if prev_time == time => prev_rank,
            _ => pos as u32 + 1,
        };
        ranks[idx] = rank;
        prev = Some((time, rank));
    }

    ranks
}

/// The source's official rank survives only on legal marks; wind-aided rows
/// are excluded from the official ranking.
pub fn official_rank(parsed: Option<u32>, legal: Legality) -> Option<u32> {
    match legal {
        Legality::Legal => parsed,
        Legality::Illegal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_ranks_ascending_with_min_ties() {
        let ranks = all_conditions_ranks(&[Some(10.0), Some(10.0), Some(10.2)], Discipline::Track);
        assert_eq!(ranks, vec![1, 1, 3]);
    }

    #[test]
    fn field_ranks_descending() {
        let ranks = all_conditions_ranks(
            &[Some(74.08), Some(76.80), Some(74.08)],
            Discipline::Field,
        );
        assert_eq!(ranks, vec![2, 1, 2]);
    }

    #[test]
    fn four_way_skip_pattern() {
        let times = [Some(9.9), Some(10.0), Some(10.0), Some(10.1)];
        assert_eq!(all_conditions_ranks(&times, Discipline::Track), vec![1, 2, 2, 4]);
    }

    #[test]
    fn unparsed_times_trail_as_one_tied_group() {
        let ranks = all_conditions_ranks(&[Some(10.0), None, Some(9.9), None], Discipline::Track);
        assert_eq!(ranks, vec![2, 3, 1, 3]);
    }

    #[test]
    fn every_position_gets_a_rank() {
        let ranks = all_conditions_ranks(&[None, None], Discipline::Track);
        assert_eq!(ranks, vec![1, 1]);
    }

    #[test]
    fn illegal_marks_lose_their_official_rank() {
        assert_eq!(official_rank(Some(3), Legality::Legal), Some(3));
        assert_eq!(official_rank(Some(3), Legality::Illegal), None);
        assert_eq!(official_rank(None, Legality::Legal), None);
    }
}
