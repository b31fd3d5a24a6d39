//! Fixture scheduling - circle-method round robin plus extra rounds
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: generate_fixtures (orchestration)
//! - Level 2: repeat_cycles, cycle_with_extras (formats)
//! - Level 3: round_robin_cycle, extra_round (pairing steps)
//! - Level 4: round_date, rivalry resolution, validation

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::club::{Club, ClubId};
use crate::error::{LeagueError, Result};
use crate::fixture::ScheduledFixture;

/// Rivalries played first in extra rounds, by club name
pub const DEFAULT_RIVALRIES: &[(&str, &str)] = &[
    ("Collingwood Magpies", "Carlton Blues"),
    ("Adelaide Crows", "Port Adelaide Power"),
    ("West Coast Eagles", "Fremantle Dockers"),
    ("Sydney Swans", "GWS Giants"),
    ("Richmond Tigers", "Carlton Blues"),
    ("Essendon Bombers", "Hawthorn Hawks"),
];

/// Season start (month, day) and kickoff (hour, minute)
const SEASON_START: (u32, u32) = (3, 15);
const KICKOFF: (u32, u32) = (14, 30);

/// How rounds beyond one full cycle are produced
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleFormat {
    /// Repeat the cycle, truncating the last occurrence
    #[default]
    Cycles,
    /// One full cycle, then rivalry-first randomly filled rounds
    CycleWithExtras,
}

/// Inputs for one season's schedule
#[derive(Clone, Debug)]
pub struct ScheduleRequest<'a> {
    pub year: i32,
    pub total_rounds: u32,
    pub format: ScheduleFormat,
    /// Designated rival pairs (home, away), already resolved to ids
    pub rivalries: &'a [(ClubId, ClubId)],
}

type RoundPairings = Vec<(ClubId, ClubId)>;

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Generate an ordered, unsaved fixture list for a tier's clubs
///
/// The random source is only consumed by the extra-round fill step.
pub fn generate_fixtures<R: Rng + ?Sized>(
    clubs: &[Club],
    request: &ScheduleRequest<'_>,
    rng: &mut R,
) -> Result<Vec<ScheduledFixture>> {
    validate(clubs, request.total_rounds)?;

    let ids: Vec<ClubId> = clubs.iter().map(|c| c.id).collect();
    let cycle = round_robin_cycle(&ids);

    let rounds = match request.format {
        ScheduleFormat::Cycles => repeat_cycles(&cycle, request.total_rounds),
        ScheduleFormat::CycleWithExtras => {
            cycle_with_extras(&ids, &cycle, request.total_rounds, request.rivalries, rng)
        }
    };

    date_rounds(rounds, request.year)
}

// ============================================================================
// Level 2 - Formats
// ============================================================================

/// floor(total / len) full cycles followed by a truncated partial cycle
///
/// Every second occurrence of the cycle swaps home and away.
fn repeat_cycles(cycle: &[RoundPairings], total_rounds: u32) -> Vec<RoundPairings> {
    let len = cycle.len();
    (0..total_rounds as usize)
        .map(|r| {
            let flipped = (r / len) % 2 == 1;
            cycle[r % len]
                .iter()
                .map(|&(home, away)| if flipped { (away, home) } else { (home, away) })
                .collect()
        })
        .collect()
}

/// One cycle, then extra rounds seeded from rivalries and filled at random
fn cycle_with_extras<R: Rng + ?Sized>(
    ids: &[ClubId],
    cycle: &[RoundPairings],
    total_rounds: u32,
    rivalries: &[(ClubId, ClubId)],
    rng: &mut R,
) -> Vec<RoundPairings> {
    let total = total_rounds as usize;
    if total <= cycle.len() {
        return cycle[..total].to_vec();
    }

    let mut rounds = cycle.to_vec();
    for _ in cycle.len()..total {
        rounds.push(extra_round(ids, rivalries, rng));
    }
    rounds
}

// ============================================================================
// Level 3 - Pairing steps
// ============================================================================

/// One full circle-method cycle
///
/// An odd club count gets a bye slot; pairings against it are dropped.
/// Slot 0 stays fixed while the rest rotate one place toward the back after
/// every round. Home and away swap on even rounds.
fn round_robin_cycle(ids: &[ClubId]) -> Vec<RoundPairings> {
    let mut slots: Vec<Option<ClubId>> = ids.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();

    let mut rounds = Vec::with_capacity(n - 1);
    for round_num in 1..n {
        let mut pairings = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (slots[i], slots[n - 1 - i]) {
                if round_num % 2 == 0 {
                    pairings.push((b, a));
                } else {
                    pairings.push((a, b));
                }
            }
        }
        rounds.push(pairings);

        slots[1..].rotate_right(1);
    }
    rounds
}

/// A single extra round: rivalries first, then random pairs of unused clubs
fn extra_round<R: Rng + ?Sized>(
    ids: &[ClubId],
    rivalries: &[(ClubId, ClubId)],
    rng: &mut R,
) -> RoundPairings {
    let capacity = ids.len() / 2;
    let mut used: FxHashSet<ClubId> = FxHashSet::default();
    let mut pairings = Vec::with_capacity(capacity);

    for &(home, away) in rivalries {
        if pairings.len() >= capacity {
            break;
        }
        if home != away && !used.contains(&home) && !used.contains(&away) {
            pairings.push((home, away));
            used.insert(home);
            used.insert(away);
        }
    }

    let mut available: Vec<ClubId> = ids.iter().copied().filter(|id| !used.contains(id)).collect();
    available.shuffle(rng);

    for pair in available.chunks_exact(2) {
        if pairings.len() >= capacity {
            break;
        }
        pairings.push((pair[0], pair[1]));
    }
    pairings
}

// ============================================================================
// Level 4 - Utilities
// ============================================================================

/// Kickoff for a round: 15 March + (round - 1) weeks, moved to the next
/// Saturday on or after that date, at 14:30
pub fn round_date(year: i32, round: u32) -> Result<NaiveDateTime> {
    let start = NaiveDate::from_ymd_opt(year, SEASON_START.0, SEASON_START.1)
        .ok_or_else(|| LeagueError::validation(format!("no season start date for year {}", year)))?;

    let offset = round.saturating_sub(1) as u64 * 7;
    let date = start
        .checked_add_days(Days::new(offset))
        .ok_or_else(|| LeagueError::validation(format!("round {} of {} is out of range", round, year)))?;

    let saturday = Weekday::Sat.num_days_from_monday();
    let weekday = date.weekday().num_days_from_monday();
    let until_saturday = (saturday + 7 - weekday) % 7;

    date.checked_add_days(Days::new(until_saturday as u64))
        .and_then(|d| d.and_hms_opt(KICKOFF.0, KICKOFF.1, 0))
        .ok_or_else(|| LeagueError::validation(format!("round {} of {} is out of range", round, year)))
}

/// Resolve rivalry names to ids of clubs present in `clubs`
pub fn resolve_rivalries<S: AsRef<str>>(clubs: &[Club], names: &[(S, S)]) -> Vec<(ClubId, ClubId)> {
    let lookup = |name: &str| clubs.iter().find(|c| c.name == name).map(|c| c.id);
    names
        .iter()
        .filter_map(|(home, away)| Some((lookup(home.as_ref())?, lookup(away.as_ref())?)))
        .collect()
}

fn validate(clubs: &[Club], total_rounds: u32) -> Result<()> {
    if clubs.len() < 2 {
        return Err(LeagueError::validation(format!(
            "need at least 2 clubs to schedule, got {}",
            clubs.len()
        )));
    }
    if total_rounds == 0 {
        return Err(LeagueError::validation("total_rounds must be at least 1"));
    }
    let mut seen = FxHashSet::default();
    for club in clubs {
        if !seen.insert(club.id) {
            return Err(LeagueError::validation(format!("club {} listed twice", club.id)));
        }
    }
    Ok(())
}

fn date_rounds(rounds: Vec<RoundPairings>, year: i32) -> Result<Vec<ScheduledFixture>> {
    let mut fixtures = Vec::new();
    for (i, pairings) in rounds.into_iter().enumerate() {
        let round = i as u32 + 1;
        let scheduled_at = round_date(year, round)?;
        fixtures.extend(pairings.into_iter().map(|(home_id, away_id)| ScheduledFixture {
            round,
            home_id,
            away_id,
            scheduled_at,
        }));
    }
    Ok(fixtures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Tier;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{BTreeMap, HashSet};

    fn make_clubs(n: u32) -> Vec<Club> {
        (1..=n).map(|i| Club::new(i, &format!("Club {}", i), Tier::Upper)).collect()
    }

    fn request(total_rounds: u32, format: ScheduleFormat) -> ScheduleRequest<'static> {
        ScheduleRequest {
            year: 2025,
            total_rounds,
            format,
            rivalries: &[],
        }
    }

    fn by_round(fixtures: &[ScheduledFixture]) -> BTreeMap<u32, Vec<&ScheduledFixture>> {
        let mut map: BTreeMap<u32, Vec<&ScheduledFixture>> = BTreeMap::new();
        for f in fixtures {
            map.entry(f.round).or_default().push(f);
        }
        map
    }

    fn assert_no_repeats_within_rounds(fixtures: &[ScheduledFixture]) {
        for (round, games) in by_round(fixtures) {
            let mut seen = HashSet::new();
            for g in games {
                assert_ne!(g.home_id, g.away_id, "self fixture in round {}", round);
                assert!(seen.insert(g.home_id), "club {} twice in round {}", g.home_id, round);
                assert!(seen.insert(g.away_id), "club {} twice in round {}", g.away_id, round);
            }
        }
    }

    #[test]
    fn test_even_single_cycle_meets_everyone_once() {
        let clubs = make_clubs(8);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let fixtures = generate_fixtures(&clubs, &request(7, ScheduleFormat::Cycles), &mut rng).unwrap();

        let rounds = by_round(&fixtures);
        assert_eq!(rounds.len(), 7);
        for games in rounds.values() {
            assert_eq!(games.len(), 4);
        }
        assert_no_repeats_within_rounds(&fixtures);

        let mut pairs = HashSet::new();
        for f in &fixtures {
            let key = (f.home_id.min(f.away_id), f.home_id.max(f.away_id));
            assert!(pairs.insert(key), "pair {:?} met twice", key);
        }
        assert_eq!(pairs.len(), 8 * 7 / 2);
    }

    #[test]
    fn test_odd_clubs_drop_bye() {
        let clubs = make_clubs(7);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let fixtures = generate_fixtures(&clubs, &request(7, ScheduleFormat::Cycles), &mut rng).unwrap();

        let rounds = by_round(&fixtures);
        assert_eq!(rounds.len(), 7);
        for games in rounds.values() {
            assert_eq!(games.len(), 3);
        }
        assert_eq!(fixtures.len(), 21);
        assert_no_repeats_within_rounds(&fixtures);

        let pairs: HashSet<_> = fixtures
            .iter()
            .map(|f| (f.home_id.min(f.away_id), f.home_id.max(f.away_id)))
            .collect();
        assert_eq!(pairs.len(), 21);
    }

    #[test]
    fn test_fixed_slot_alternates_home_and_away() {
        let clubs = make_clubs(6);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let fixtures = generate_fixtures(&clubs, &request(5, ScheduleFormat::Cycles), &mut rng).unwrap();

        for f in fixtures.iter().filter(|f| f.home_id == 1 || f.away_id == 1) {
            let at_home = f.home_id == 1;
            assert_eq!(at_home, f.round % 2 == 1, "round {}", f.round);
        }
    }

    #[test]
    fn test_cycles_with_partial_cycle() {
        let clubs = make_clubs(18);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let fixtures = generate_fixtures(&clubs, &request(22, ScheduleFormat::Cycles), &mut rng).unwrap();

        assert_eq!(fixtures.len(), 22 * 9);
        assert_eq!(by_round(&fixtures).len(), 22);
        assert_no_repeats_within_rounds(&fixtures);

        // Round 18 repeats round 1's pairings with home and away swapped
        let r1: Vec<_> = fixtures.iter().filter(|f| f.round == 1).collect();
        let r18: Vec<_> = fixtures.iter().filter(|f| f.round == 18).collect();
        for (a, b) in r1.iter().zip(r18.iter()) {
            assert_eq!((a.home_id, a.away_id), (b.away_id, b.home_id));
        }
    }

    #[test]
    fn test_cycle_with_extras_eighteen_clubs() {
        let clubs = make_clubs(18);
        let rivalries = [(1, 2), (3, 4), (2, 5)];
        let req = ScheduleRequest {
            year: 2025,
            total_rounds: 22,
            format: ScheduleFormat::CycleWithExtras,
            rivalries: &rivalries,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let fixtures = generate_fixtures(&clubs, &req, &mut rng).unwrap();

        let rounds = by_round(&fixtures);
        assert_eq!(rounds.len(), 22);
        let base: usize = (1..=17).map(|r| rounds[&r].len()).sum();
        assert_eq!(base, 153);
        for r in 18..=22 {
            assert!(rounds[&r].len() <= 9);
            // Non-conflicting rivalries are always scheduled first
            assert!(rounds[&r].iter().any(|f| f.home_id == 1 && f.away_id == 2));
            assert!(rounds[&r].iter().any(|f| f.home_id == 3 && f.away_id == 4));
        }
        assert!(fixtures.len() >= 153 && fixtures.len() <= 198);
        assert_no_repeats_within_rounds(&fixtures);
    }

    #[test]
    fn test_extras_are_seed_deterministic() {
        let clubs = make_clubs(10);
        let req = request(14, ScheduleFormat::CycleWithExtras);
        let a = generate_fixtures(&clubs, &req, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let b = generate_fixtures(&clubs, &req, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_truncated_cycle() {
        let clubs = make_clubs(10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for format in [ScheduleFormat::Cycles, ScheduleFormat::CycleWithExtras] {
            let fixtures = generate_fixtures(&clubs, &request(4, format), &mut rng).unwrap();
            assert_eq!(fixtures.len(), 4 * 5);
            assert_eq!(by_round(&fixtures).len(), 4);
        }
    }

    #[test]
    fn test_validation_errors() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let one = make_clubs(1);
        assert!(matches!(
            generate_fixtures(&one, &request(5, ScheduleFormat::Cycles), &mut rng),
            Err(LeagueError::Validation(_))
        ));

        let two = make_clubs(2);
        assert!(generate_fixtures(&two, &request(0, ScheduleFormat::Cycles), &mut rng).is_err());

        let mut dupes = make_clubs(3);
        dupes[2].id = 1;
        assert!(generate_fixtures(&dupes, &request(2, ScheduleFormat::Cycles), &mut rng).is_err());
    }

    #[test]
    fn test_round_date_lands_on_saturday() {
        // 15 March 2025 is a Saturday
        let r1 = round_date(2025, 1).unwrap();
        assert_eq!(r1.date(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(r1.time().to_string(), "14:30:00");

        // 15 March 2024 is a Friday
        let r1 = round_date(2024, 1).unwrap();
        assert_eq!(r1.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());

        for round in 1..=22 {
            assert_eq!(round_date(2026, round).unwrap().weekday(), Weekday::Sat);
        }
        assert_eq!(round_date(2026, 5).unwrap(), round_date(2026, 5).unwrap());
    }

    #[test]
    fn test_resolve_rivalries_skips_unknown() {
        let clubs = vec![
            Club::new(1, "Collingwood Magpies", Tier::Upper),
            Club::new(2, "Carlton Blues", Tier::Upper),
            Club::new(3, "Richmond Tigers", Tier::Upper),
        ];
        let pairs = resolve_rivalries(&clubs, DEFAULT_RIVALRIES);
        assert_eq!(pairs, vec![(1, 2), (3, 2)]);
    }
}
