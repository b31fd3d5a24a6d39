//! Season lifecycle controller
//!
//! Level 1 - Orchestration and Level 2 - Phases
//!
//! Pure scheduling, simulation and ladder functions from `pennant-core` are
//! driven against season state held by a `LeagueStore`. One controller owns
//! one store; mutating calls for the same season must not overlap.

use chrono::Utc;
use pennant_core::ladder::position_of;
use pennant_core::{
    compute_ladder, finals_bracket, form_description, generate_fixtures, key_players,
    promotion_relegation, resolve_rivalries, select_lineup, simulate_match, Club, ClubId,
    Conditions, Fixture, FixtureId, FinalsBracket, LadderEntry, LeagueError, MatchReport,
    MatchStat, Player, Result, ScheduleRequest, ScheduledFixture, Season, SeasonId, TeamRatings,
    TeamSide, Tier,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::config::{fixture_seed, schedule_seed, LeagueConfig};
use crate::outcome::{
    AdvanceOutcome, ClubForm, FixtureResult, GameState, GameStatus, LeagueYear, MatchOutcome,
    NextAction, Progress, RecentResult, RolloverReport, RoundFixtures, RoundReport, RoundStatus,
    RoundSummary, SeasonCreated, SeasonReport, SeasonStatus, TierChange, TierMove, ZoneReport,
};
use crate::store::{FixtureFilter, LeagueStore, RecordedResult, RosterProvider};

/// Played fixtures shown in a club's form line
const FORM_RESULTS: usize = 5;

/// A fixture with everything needed to simulate it off the store
struct MatchJob {
    fixture_id: FixtureId,
    home_id: ClubId,
    away_id: ClubId,
    home_name: String,
    away_name: String,
    home_roster: Vec<Player>,
    away_roster: Vec<Player>,
}

pub struct SeasonController<S> {
    store: S,
    config: LeagueConfig,
    /// Resolved base seed
    seed: u64,
    /// Counter for matches played outside any fixture
    exhibition_counter: u64,
}

impl<S: LeagueStore + RosterProvider> SeasonController<S> {
    pub fn new(store: S, config: LeagueConfig) -> Self {
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                tracing::info!("No seed configured, using {}", seed);
                seed
            }
        };
        Self {
            store,
            config,
            seed,
            exhibition_counter: seed.rotate_right(17),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ========================================================================
    // SEASON CREATION AND FIXTURES
    // ========================================================================

    /// Create a season for one tier, optionally scheduling it straight away
    ///
    /// A scheduling failure does not undo the season; it is reported in the
    /// result instead.
    pub fn create_season(
        &mut self,
        year: i32,
        tier: Tier,
        total_rounds: Option<u32>,
        with_fixtures: bool,
    ) -> Result<SeasonCreated> {
        let rounds = total_rounds.unwrap_or_else(|| self.config.rounds_for(tier));
        let season = self.store.insert_season(year, tier, rounds)?;
        tracing::info!(
            "Created season {} ({} {:?} tier, {} rounds)",
            season.id,
            year,
            tier,
            rounds
        );

        let mut created = SeasonCreated {
            season,
            fixtures_generated: false,
            fixture_count: 0,
            fixture_error: None,
        };
        if with_fixtures {
            match self.generate_fixtures(created.season.id) {
                Ok(fixtures) => {
                    created.fixtures_generated = true;
                    created.fixture_count = fixtures.len();
                }
                Err(e) => {
                    tracing::warn!("Fixtures for season {} not generated: {}", created.season.id, e);
                    created.fixture_error = Some(e.to_string());
                }
            }
        }
        Ok(created)
    }

    /// Create both tier seasons of a year with the configured round counts
    pub fn create_league_year(&mut self, year: i32, with_fixtures: bool) -> Result<LeagueYear> {
        let upper = self.create_season(year, Tier::Upper, None, with_fixtures)?;
        let lower = self.create_season(year, Tier::Lower, None, with_fixtures)?;
        Ok(LeagueYear { year, upper, lower })
    }

    /// Schedule a season that has no fixtures yet
    pub fn generate_fixtures(&mut self, season_id: SeasonId) -> Result<Vec<Fixture>> {
        let season = self.store.season(season_id)?;
        let existing = self.store.fixtures(season_id, FixtureFilter::all())?;
        if !existing.is_empty() {
            return Err(LeagueError::validation(format!(
                "season {} already has {} fixtures; regenerate instead",
                season_id,
                existing.len()
            )));
        }
        let scheduled = self.schedule(&season)?;
        let stored = self.store.insert_fixtures(season_id, scheduled)?;
        tracing::info!("Generated {} fixtures for season {}", stored.len(), season_id);
        Ok(stored)
    }

    /// Replace every fixture of a season with a fresh schedule
    ///
    /// The new schedule is built before anything is removed, and the swap is a
    /// single store call.
    pub fn regenerate_fixtures(&mut self, season_id: SeasonId) -> Result<Vec<Fixture>> {
        let season = self.store.season(season_id)?;
        let scheduled = self.schedule(&season)?;
        let stored = self.store.replace_fixtures(season_id, scheduled)?;
        tracing::info!("Regenerated {} fixtures for season {}", stored.len(), season_id);
        Ok(stored)
    }

    pub fn clear_fixtures(&mut self, season_id: SeasonId) -> Result<usize> {
        let removed = self.store.clear_fixtures(season_id)?;
        tracing::info!("Cleared {} fixtures from season {}", removed, season_id);
        Ok(removed)
    }

    pub fn round_fixtures(&self, season_id: SeasonId, round: u32) -> Result<RoundFixtures> {
        let season = self.store.season(season_id)?;
        check_round(&season, round)?;
        Ok(RoundFixtures {
            season_id,
            round,
            fixtures: self.store.fixtures(season_id, FixtureFilter::round(round))?,
        })
    }

    fn schedule(&self, season: &Season) -> Result<Vec<ScheduledFixture>> {
        let clubs = self.store.clubs_in_tier(season.tier);
        let rivalries = resolve_rivalries(&clubs, &self.config.rivalries);
        let request = ScheduleRequest {
            year: season.year,
            total_rounds: season.total_rounds,
            format: self.config.format_for(season.tier),
            rivalries: &rivalries,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(schedule_seed(self.seed, season.id));
        generate_fixtures(&clubs, &request, &mut rng)
    }

    // ========================================================================
    // SIMULATION
    // ========================================================================

    /// Play a one-off match between two clubs; nothing is stored
    pub fn simulate_match(
        &mut self,
        home: ClubId,
        away: ClubId,
        conditions: Option<Conditions>,
    ) -> Result<MatchReport> {
        if home == away {
            return Err(LeagueError::validation("a club cannot play itself"));
        }
        let job = self.match_job(0, home, away)?;
        let seed = self.exhibition_counter;
        self.exhibition_counter = self.exhibition_counter.wrapping_add(1);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        simulate_match(
            &TeamSide::new(&job.home_name, &job.home_roster),
            &TeamSide::new(&job.away_name, &job.away_roster),
            conditions.unwrap_or(self.config.conditions),
            &mut rng,
        )
    }

    /// Simulate every unplayed fixture of a round and record the results
    ///
    /// When the round is left with nothing unplayed and it is at or past the
    /// season's current round, the current round moves to
    /// `min(round + 1, total_rounds)`; `round_advanced` reports whether it
    /// changed.
    pub fn simulate_round(&mut self, season_id: SeasonId, round: u32) -> Result<RoundReport> {
        let season = self.store.season(season_id)?;
        check_round(&season, round)?;

        let pending = self.store.fixtures(season_id, FixtureFilter::unplayed_in(round))?;
        if pending.is_empty() {
            tracing::warn!("Season {} round {} has no unplayed fixtures", season_id, round);
            return Ok(RoundReport {
                season_id,
                round,
                matches_played: 0,
                results: Vec::new(),
                round_advanced: false,
                current_round: season.current_round,
                ladder: self.ladder(season_id)?,
                message: Some(format!("No unplayed fixtures found for round {}", round)),
            });
        }

        let jobs = pending
            .iter()
            .map(|f| self.match_job(f.id, f.home_id, f.away_id))
            .collect::<Result<Vec<_>>>()?;
        let results = self.play_jobs(&jobs)?;

        let recorded: Vec<RecordedResult> = results
            .iter()
            .map(|r| RecordedResult {
                fixture_id: r.fixture_id,
                score: r.report.to_score(),
                stats: r.report.match_stats(r.fixture_id, r.home_id, r.away_id),
            })
            .collect();
        self.store.record_results(season_id, Utc::now().naive_utc(), &recorded)?;

        let mut round_advanced = false;
        let mut current_round = season.current_round;
        if round >= season.current_round
            && self
                .store
                .fixtures(season_id, FixtureFilter::unplayed_in(round))?
                .is_empty()
        {
            let next = (round + 1).min(season.total_rounds);
            if next != season.current_round {
                let mut updated = season.clone();
                updated.current_round = next;
                self.store.update_season(&updated)?;
                round_advanced = true;
                current_round = next;
            }
        }

        tracing::info!(
            "Season {} round {}: {} matches played{}",
            season_id,
            round,
            results.len(),
            if round_advanced { ", round advanced" } else { "" }
        );

        Ok(RoundReport {
            season_id,
            round,
            matches_played: results.len(),
            results,
            round_advanced,
            current_round,
            ladder: self.ladder(season_id)?,
            message: None,
        })
    }

    /// Simulate every round from the current one to the last
    pub fn simulate_full_season(&mut self, season_id: SeasonId) -> Result<SeasonReport> {
        self.simulate_full_season_with_callback(season_id, |_| {})
    }

    /// Like `simulate_full_season`, reporting each played round as it finishes
    ///
    /// Rounds already fully played are skipped, so an interrupted run can be
    /// resumed by calling this again.
    pub fn simulate_full_season_with_callback<F>(
        &mut self,
        season_id: SeasonId,
        mut on_round: F,
    ) -> Result<SeasonReport>
    where
        F: FnMut(&RoundSummary),
    {
        let season = self.store.season(season_id)?;
        tracing::info!(
            "Simulating season {} from round {} to {}",
            season_id,
            season.current_round,
            season.total_rounds
        );

        let mut rounds = Vec::new();
        for round in season.current_round..=season.total_rounds {
            let report = self.simulate_round(season_id, round)?;
            if report.matches_played == 0 {
                continue;
            }
            let summary = RoundSummary {
                round,
                matches_played: report.matches_played,
                round_advanced: report.round_advanced,
            };
            on_round(&summary);
            rounds.push(summary);
        }

        Ok(SeasonReport {
            season_id,
            rounds_simulated: rounds.len(),
            rounds,
            final_ladder: self.ladder(season_id)?,
        })
    }

    fn match_job(&self, fixture_id: FixtureId, home: ClubId, away: ClubId) -> Result<MatchJob> {
        let home_club = self.store.club(home)?;
        let away_club = self.store.club(away)?;
        Ok(MatchJob {
            fixture_id,
            home_id: home,
            away_id: away,
            home_roster: self.store.eligible_players(home)?,
            away_roster: self.store.eligible_players(away)?,
            home_name: home_club.name,
            away_name: away_club.name,
        })
    }

    /// Each fixture gets its own RNG, so results are independent of order
    fn play_jobs(&self, jobs: &[MatchJob]) -> Result<Vec<FixtureResult>> {
        let seed = self.seed;
        let conditions = self.config.conditions;
        let play = |job: &MatchJob| -> Result<FixtureResult> {
            tracing::debug!(
                "Simulating fixture {}: {} v {}",
                job.fixture_id,
                job.home_name,
                job.away_name
            );
            let mut rng = ChaCha8Rng::seed_from_u64(fixture_seed(seed, job.fixture_id));
            let report = simulate_match(
                &TeamSide::new(&job.home_name, &job.home_roster),
                &TeamSide::new(&job.away_name, &job.away_roster),
                conditions,
                &mut rng,
            )
            .map_err(|e| match e {
                LeagueError::Engine(msg) => {
                    LeagueError::engine(format!("fixture {}: {}", job.fixture_id, msg))
                }
                other => other,
            })?;
            Ok(FixtureResult {
                fixture_id: job.fixture_id,
                home_id: job.home_id,
                away_id: job.away_id,
                report,
            })
        };

        if self.config.parallel {
            jobs.par_iter().map(play).collect()
        } else {
            jobs.iter().map(play).collect()
        }
    }

    // ========================================================================
    // PROGRESSION
    // ========================================================================

    /// Move to the next round if the current one is fully played
    pub fn advance_round(&mut self, season_id: SeasonId) -> Result<AdvanceOutcome> {
        let mut season = self.store.season(season_id)?;
        let remaining = self
            .store
            .fixtures(season_id, FixtureFilter::unplayed_in(season.current_round))?
            .len();

        if remaining > 0 {
            return Ok(AdvanceOutcome {
                advanced: false,
                previous_round: None,
                current_round: season.current_round,
                reason: Some(format!(
                    "Round {} has {} unplayed fixtures",
                    season.current_round, remaining
                )),
                season_complete: false,
            });
        }

        if season.current_round >= season.total_rounds {
            return Ok(AdvanceOutcome {
                advanced: false,
                previous_round: None,
                current_round: season.current_round,
                reason: Some("Season is complete".to_string()),
                season_complete: true,
            });
        }

        let previous = season.current_round;
        season.current_round += 1;
        self.store.update_season(&season)?;
        tracing::info!(
            "Season {} advanced from round {} to {}",
            season_id,
            previous,
            season.current_round
        );

        Ok(AdvanceOutcome {
            advanced: true,
            previous_round: Some(previous),
            current_round: season.current_round,
            reason: None,
            season_complete: season.is_complete(),
        })
    }

    pub fn status(&self, season_id: SeasonId) -> Result<SeasonStatus> {
        let season = self.store.season(season_id)?;
        let fixtures = self.store.fixtures(season_id, FixtureFilter::all())?;
        Ok(season_status(&season, &fixtures))
    }

    pub fn active_seasons(&self) -> Result<Vec<SeasonStatus>> {
        self.store
            .seasons()
            .into_iter()
            .filter(|s| s.is_active)
            .map(|s| self.status(s.id))
            .collect()
    }

    /// Active seasons by tier with the actions available on each
    pub fn game_status(&self) -> Result<GameStatus> {
        let active = self.active_seasons()?;
        let next_actions = next_actions(&active);
        let total_active_seasons = active.len();
        let (upper_seasons, lower_seasons): (Vec<_>, Vec<_>) =
            active.into_iter().partition(|s| s.tier == Tier::Upper);

        Ok(GameStatus {
            state: if total_active_seasons > 0 {
                GameState::Active
            } else {
                GameState::NoActiveSeasons
            },
            total_active_seasons,
            upper_seasons,
            lower_seasons,
            next_actions,
        })
    }

    // ========================================================================
    // CLUBS
    // ========================================================================

    /// Current lineup strength, key players and recent results of a club
    pub fn club_form(&self, club_id: ClubId) -> Result<ClubForm> {
        let club = self.store.club(club_id)?;
        let squad = self.store.squad(club_id)?;
        let lineup = select_lineup(&squad);
        let ratings = TeamRatings::for_roster(&squad, self.config.conditions);

        let played = self.store.club_fixtures(club_id, FixtureFilter::played());
        let recent = &played[played.len().saturating_sub(FORM_RESULTS)..];
        let recent_results = recent
            .iter()
            .map(|f| self.recent_result(club_id, f))
            .collect::<Result<Vec<_>>>()?;
        let recent_form = recent_results.iter().map(|r| r.outcome.letter()).collect();

        Ok(ClubForm {
            club_id,
            form_rating: form_description(ratings.overall).to_string(),
            key_players: key_players(&lineup),
            squad_size: squad.len(),
            unavailable: squad.iter().filter(|p| !p.is_eligible()).count(),
            ladder_position: self.current_position(&club)?,
            club_name: club.name,
            tier: club.tier,
            ratings,
            recent_results,
            recent_form,
        })
    }

    /// Player box scores recorded for a fixture
    pub fn match_stats(&self, fixture_id: FixtureId) -> Result<Vec<MatchStat>> {
        self.store.match_stats(fixture_id)
    }

    fn recent_result(&self, club_id: ClubId, fixture: &Fixture) -> Result<RecentResult> {
        let (points_for, points_against) = fixture.scores_for(club_id).ok_or_else(|| {
            LeagueError::validation(format!("fixture {} has no result", fixture.id))
        })?;
        let at_home = fixture.home_id == club_id;
        let opponent_id = if at_home { fixture.away_id } else { fixture.home_id };
        Ok(RecentResult {
            fixture_id: fixture.id,
            season_id: fixture.season_id,
            round: fixture.round,
            opponent_id,
            opponent_name: self.store.club(opponent_id)?.name,
            at_home,
            points_for,
            points_against,
            outcome: MatchOutcome::from_scores(points_for, points_against),
        })
    }

    /// Ladder position in the latest active season of the club's tier
    fn current_position(&self, club: &Club) -> Result<Option<usize>> {
        let season = self
            .store
            .seasons()
            .into_iter()
            .filter(|s| s.is_active && s.tier == club.tier)
            .max_by_key(|s| (s.year, s.id));
        match season {
            Some(season) => Ok(position_of(&self.ladder(season.id)?, club.id)),
            None => Ok(None),
        }
    }

    // ========================================================================
    // STANDINGS
    // ========================================================================

    /// Ladder over a season's played fixtures
    ///
    /// Covers the clubs that appear in the season's fixtures, or the clubs in
    /// the season's tier when it has none.
    pub fn ladder(&self, season_id: SeasonId) -> Result<Vec<LadderEntry>> {
        let season = self.store.season(season_id)?;
        let fixtures = self.store.fixtures(season_id, FixtureFilter::all())?;
        let clubs = self.season_clubs(&season, &fixtures)?;
        Ok(compute_ladder(&clubs, &fixtures))
    }

    pub fn finals(&self, season_id: SeasonId) -> Result<FinalsBracket> {
        finals_bracket(&self.ladder(season_id)?)
    }

    /// Zones for a season and the active counterpart-tier season of its year
    pub fn promotion_relegation(&self, season_id: SeasonId) -> Result<ZoneReport> {
        let season = self.store.season(season_id)?;
        let counterpart = self.counterpart_season(&season)?;
        let (upper, lower) = match season.tier {
            Tier::Upper => (season.id, counterpart.id),
            Tier::Lower => (counterpart.id, season.id),
        };
        Ok(ZoneReport {
            year: season.year,
            upper_season_id: upper,
            lower_season_id: lower,
            zones: promotion_relegation(&self.ladder(upper)?, &self.ladder(lower)?),
        })
    }

    fn counterpart_season(&self, season: &Season) -> Result<Season> {
        let tier = season.tier.counterpart();
        self.store
            .seasons()
            .into_iter()
            .find(|s| s.is_active && s.year == season.year && s.tier == tier && s.id != season.id)
            .ok_or_else(|| {
                LeagueError::validation(format!(
                    "no active {:?} tier season for {}",
                    tier, season.year
                ))
            })
    }

    fn season_clubs(&self, season: &Season, fixtures: &[Fixture]) -> Result<Vec<Club>> {
        if fixtures.is_empty() {
            return Ok(self.store.clubs_in_tier(season.tier));
        }
        let mut seen = FxHashSet::default();
        let mut clubs = Vec::new();
        for id in fixtures.iter().flat_map(|f| [f.home_id, f.away_id]) {
            if seen.insert(id) {
                clubs.push(self.store.club(id)?);
            }
        }
        clubs.sort_by_key(|c| c.id);
        Ok(clubs)
    }

    // ========================================================================
    // END OF SEASON
    // ========================================================================

    /// Relegate the upper ladder's bottom two, promote the lower ladder's top
    /// two and close both seasons in one store call
    pub fn end_of_season(
        &mut self,
        upper_season: SeasonId,
        lower_season: SeasonId,
    ) -> Result<RolloverReport> {
        let upper = self.store.season(upper_season)?;
        let lower = self.store.season(lower_season)?;
        if upper.tier != Tier::Upper || lower.tier != Tier::Lower {
            return Err(LeagueError::validation(format!(
                "season {} must be upper tier and season {} lower tier",
                upper_season, lower_season
            )));
        }

        let zones = promotion_relegation(&self.ladder(upper.id)?, &self.ladder(lower.id)?);

        let mut changes = Vec::new();
        let moves = [
            (&zones.relegation_zone, TierMove::Relegated, Tier::Upper),
            (&zones.promotion_zone, TierMove::Promoted, Tier::Lower),
        ];
        for (zone, change, from_tier) in moves {
            for entry in zone.iter() {
                let club = self.store.club(entry.club_id)?;
                if club.tier != from_tier {
                    tracing::warn!(
                        "{} is no longer in the {:?} tier, skipping",
                        club.name,
                        from_tier
                    );
                    continue;
                }
                changes.push(TierChange {
                    club_id: club.id,
                    club_name: club.name,
                    change,
                    from_tier,
                    to_tier: from_tier.counterpart(),
                    final_position: entry.position,
                });
            }
        }

        let tier_changes: Vec<(ClubId, Tier)> =
            changes.iter().map(|c| (c.club_id, c.to_tier)).collect();
        self.store
            .apply_rollover(&tier_changes, &[upper.id, lower.id])?;

        for change in &changes {
            tracing::info!(
                "{} {:?} (finished {})",
                change.club_name,
                change.change,
                change.final_position
            );
        }

        let clubs_relegated = changes
            .iter()
            .filter(|c| c.change == TierMove::Relegated)
            .count();
        Ok(RolloverReport {
            upper_season_id: upper.id,
            lower_season_id: lower.id,
            clubs_promoted: changes.len() - clubs_relegated,
            clubs_relegated,
            changes,
        })
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn check_round(season: &Season, round: u32) -> Result<()> {
    if season.contains_round(round) {
        Ok(())
    } else {
        Err(LeagueError::validation(format!(
            "round {} is outside season {} (1..={})",
            round, season.id, season.total_rounds
        )))
    }
}

fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Upper => "upper",
        Tier::Lower => "lower",
    }
}

/// A season with every fixture played, or past its last round
fn is_finished(status: &SeasonStatus) -> bool {
    status.season_complete || status.all_fixtures_played
}

/// One action per season, plus a rollover for each finished pair of a year
fn next_actions(seasons: &[SeasonStatus]) -> Vec<NextAction> {
    let mut actions: Vec<NextAction> = seasons
        .iter()
        .map(|s| {
            let name = format!("{} {} tier season", s.year, tier_label(s.tier));
            if s.progress.total_fixtures == 0 {
                NextAction::GenerateFixtures {
                    season_id: s.season_id,
                    description: format!("Generate fixtures for the {}", name),
                }
            } else if !s.current_round_status.complete {
                NextAction::SimulateRound {
                    season_id: s.season_id,
                    round: s.current_round,
                    description: format!("Simulate round {} of the {}", s.current_round, name),
                }
            } else if is_finished(s) {
                NextAction::EndSeason {
                    season_id: s.season_id,
                    description: format!(
                        "The {} is complete and ready for promotion and relegation",
                        name
                    ),
                }
            } else {
                NextAction::AdvanceRound {
                    season_id: s.season_id,
                    description: format!("Advance the {} to round {}", name, s.current_round + 1),
                }
            }
        })
        .collect();

    for upper in seasons.iter().filter(|s| s.tier == Tier::Upper && is_finished(s)) {
        let lower = seasons
            .iter()
            .find(|s| s.tier == Tier::Lower && s.year == upper.year && is_finished(s));
        if let Some(lower) = lower {
            actions.push(NextAction::ProcessPromotionRelegation {
                upper_season_id: upper.season_id,
                lower_season_id: lower.season_id,
                description: format!(
                    "Process {} promotion and relegation between seasons {} and {}",
                    upper.year, upper.season_id, lower.season_id
                ),
            });
        }
    }
    actions
}

fn season_status(season: &Season, fixtures: &[Fixture]) -> SeasonStatus {
    let total = fixtures.len();
    let played = fixtures.iter().filter(|f| f.is_played()).count();
    let percentage = if total > 0 {
        (played as f64 / total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    let in_round: Vec<&Fixture> = fixtures
        .iter()
        .filter(|f| f.round == season.current_round)
        .collect();
    let round_played = in_round.iter().filter(|f| f.is_played()).count();

    SeasonStatus {
        season_id: season.id,
        year: season.year,
        tier: season.tier,
        current_round: season.current_round,
        total_rounds: season.total_rounds,
        is_active: season.is_active,
        progress: Progress {
            fixtures_played: played,
            total_fixtures: total,
            percentage,
        },
        current_round_status: RoundStatus {
            round: season.current_round,
            fixtures_played: round_played,
            total_fixtures: in_round.len(),
            complete: round_played == in_round.len(),
        },
        all_fixtures_played: total > 0 && played == total,
        season_complete: season.is_complete(),
    }
}
