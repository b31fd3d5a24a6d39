//! Persistence and roster collaborators, plus an in-memory implementation
//!
//! Level 4 - Utilities
//!
//! The controller only talks to storage through `LeagueStore` and
//! `RosterProvider`. Every multi-record write is a single trait call so an
//! implementation can wrap it in one transaction.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use pennant_core::{
    Club, ClubId, Fixture, FixtureId, FixtureScore, LeagueError, MatchStat, Player, Result,
    ScheduledFixture, Season, SeasonId, Tier,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Fixture selection within a season
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixtureFilter {
    pub round: Option<u32>,
    pub played: Option<bool>,
}

impl FixtureFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn round(round: u32) -> Self {
        Self {
            round: Some(round),
            played: None,
        }
    }

    pub fn unplayed_in(round: u32) -> Self {
        Self {
            round: Some(round),
            played: Some(false),
        }
    }

    pub fn played() -> Self {
        Self {
            round: None,
            played: Some(true),
        }
    }

    pub fn matches(&self, fixture: &Fixture) -> bool {
        self.round.map_or(true, |r| fixture.round == r)
            && self.played.map_or(true, |p| fixture.is_played() == p)
    }
}

/// A result to record: the score plus the players' box scores
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedResult {
    pub fixture_id: FixtureId,
    pub score: FixtureScore,
    pub stats: Vec<MatchStat>,
}

impl RecordedResult {
    /// A score entered without player stats
    pub fn score_only(fixture_id: FixtureId, score: FixtureScore) -> Self {
        Self {
            fixture_id,
            score,
            stats: Vec::new(),
        }
    }
}

/// Read/write access to league entities
pub trait LeagueStore {
    fn season(&self, id: SeasonId) -> Result<Season>;
    fn seasons(&self) -> Vec<Season>;
    /// Create and store a fresh season, assigning its id
    fn insert_season(&mut self, year: i32, tier: Tier, total_rounds: u32) -> Result<Season>;
    fn update_season(&mut self, season: &Season) -> Result<()>;

    fn club(&self, id: ClubId) -> Result<Club>;
    fn clubs(&self) -> Vec<Club>;
    fn clubs_in_tier(&self, tier: Tier) -> Vec<Club> {
        self.clubs().into_iter().filter(|c| c.tier == tier).collect()
    }

    /// Fixtures of a season in (round, id) order
    fn fixtures(&self, season: SeasonId, filter: FixtureFilter) -> Result<Vec<Fixture>>;
    fn insert_fixtures(
        &mut self,
        season: SeasonId,
        fixtures: Vec<ScheduledFixture>,
    ) -> Result<Vec<Fixture>>;
    /// Drop every fixture of the season and store `fixtures` in one step
    fn replace_fixtures(
        &mut self,
        season: SeasonId,
        fixtures: Vec<ScheduledFixture>,
    ) -> Result<Vec<Fixture>>;
    /// Returns the number of fixtures removed
    fn clear_fixtures(&mut self, season: SeasonId) -> Result<usize>;
    /// Fixtures involving a club across every season, oldest kickoff first
    fn club_fixtures(&self, club: ClubId, filter: FixtureFilter) -> Vec<Fixture>;
    /// Record results for unplayed fixtures of one season, all or nothing
    ///
    /// Every fixture is stamped with `played_at` and its stats are stored
    /// alongside.
    fn record_results(
        &mut self,
        season: SeasonId,
        played_at: NaiveDateTime,
        results: &[RecordedResult],
    ) -> Result<()>;
    /// Player box scores recorded for a fixture
    fn match_stats(&self, fixture: FixtureId) -> Result<Vec<MatchStat>>;
    /// Apply tier changes and deactivate seasons, all or nothing
    fn apply_rollover(&mut self, tier_changes: &[(ClubId, Tier)], deactivate: &[SeasonId])
        -> Result<()>;
}

/// Supplies the players of a club
pub trait RosterProvider {
    /// Every player on the club's list, in roster order
    fn squad(&self, club: ClubId) -> Result<Vec<Player>>;

    /// Players that are neither injured nor suspended, in roster order
    fn eligible_players(&self, club: ClubId) -> Result<Vec<Player>> {
        Ok(self
            .squad(club)?
            .into_iter()
            .filter(|p| p.is_eligible())
            .collect())
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// League held in memory, saved to and loaded from a JSON file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    clubs: Vec<Club>,
    #[serde(default)]
    players: Vec<Player>,
    #[serde(default)]
    seasons: Vec<Season>,
    #[serde(default)]
    fixtures: Vec<Fixture>,
    #[serde(default)]
    match_stats: Vec<MatchStat>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_club(&mut self, club: Club) -> Result<()> {
        if self.clubs.iter().any(|c| c.id == club.id) {
            return Err(LeagueError::validation(format!("club {} already exists", club.id)));
        }
        self.clubs.push(club);
        Ok(())
    }

    pub fn add_player(&mut self, player: Player) -> Result<()> {
        if !self.clubs.iter().any(|c| c.id == player.club_id) {
            return Err(LeagueError::not_found("club", player.club_id));
        }
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(LeagueError::validation(format!(
                "player {} already exists",
                player.id
            )));
        }
        self.players.push(player);
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_mut(&mut self, id: u32) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LeagueError::not_found("player", id))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LeagueError::Store(format!("invalid league data: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LeagueError::Store(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| LeagueError::Store(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .map_err(|e| LeagueError::Store(format!("cannot write {}: {}", path.display(), e)))
    }

    fn next_fixture_id(&self) -> FixtureId {
        self.fixtures.iter().map(|f| f.id).max().unwrap_or(0) + 1
    }

    fn require_season(&self, id: SeasonId) -> Result<()> {
        if self.seasons.iter().any(|s| s.id == id) {
            Ok(())
        } else {
            Err(LeagueError::not_found("season", id))
        }
    }

    /// Remove a season's fixtures and their stats, returning how many fixtures went
    fn drop_season_fixtures(&mut self, season: SeasonId) -> usize {
        let removed: FxHashSet<FixtureId> = self
            .fixtures
            .iter()
            .filter(|f| f.season_id == season)
            .map(|f| f.id)
            .collect();
        self.fixtures.retain(|f| f.season_id != season);
        self.match_stats.retain(|s| !removed.contains(&s.fixture_id));
        removed.len()
    }

    fn stored(&self, season: SeasonId, fixtures: Vec<ScheduledFixture>) -> Vec<Fixture> {
        let first = self.next_fixture_id();
        fixtures
            .into_iter()
            .enumerate()
            .map(|(i, f)| f.into_fixture(first + i as FixtureId, season))
            .collect()
    }
}

impl LeagueStore for MemoryStore {
    fn season(&self, id: SeasonId) -> Result<Season> {
        self.seasons
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| LeagueError::not_found("season", id))
    }

    fn seasons(&self) -> Vec<Season> {
        self.seasons.clone()
    }

    fn insert_season(&mut self, year: i32, tier: Tier, total_rounds: u32) -> Result<Season> {
        if total_rounds == 0 {
            return Err(LeagueError::validation("a season needs at least one round"));
        }
        let id = self.seasons.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let season = Season::new(id, year, tier, total_rounds);
        self.seasons.push(season.clone());
        Ok(season)
    }

    fn update_season(&mut self, season: &Season) -> Result<()> {
        let slot = self
            .seasons
            .iter_mut()
            .find(|s| s.id == season.id)
            .ok_or_else(|| LeagueError::not_found("season", season.id))?;
        *slot = season.clone();
        Ok(())
    }

    fn club(&self, id: ClubId) -> Result<Club> {
        self.clubs
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| LeagueError::not_found("club", id))
    }

    fn clubs(&self) -> Vec<Club> {
        self.clubs.clone()
    }

    fn fixtures(&self, season: SeasonId, filter: FixtureFilter) -> Result<Vec<Fixture>> {
        self.require_season(season)?;
        let mut out: Vec<Fixture> = self
            .fixtures
            .iter()
            .filter(|f| f.season_id == season && filter.matches(f))
            .cloned()
            .collect();
        out.sort_by_key(|f| (f.round, f.id));
        Ok(out)
    }

    fn insert_fixtures(
        &mut self,
        season: SeasonId,
        fixtures: Vec<ScheduledFixture>,
    ) -> Result<Vec<Fixture>> {
        self.require_season(season)?;
        let stored = self.stored(season, fixtures);
        self.fixtures.extend(stored.iter().cloned());
        Ok(stored)
    }

    fn replace_fixtures(
        &mut self,
        season: SeasonId,
        fixtures: Vec<ScheduledFixture>,
    ) -> Result<Vec<Fixture>> {
        self.require_season(season)?;
        let stored = self.stored(season, fixtures);
        self.drop_season_fixtures(season);
        self.fixtures.extend(stored.iter().cloned());
        Ok(stored)
    }

    fn clear_fixtures(&mut self, season: SeasonId) -> Result<usize> {
        self.require_season(season)?;
        Ok(self.drop_season_fixtures(season))
    }

    fn club_fixtures(&self, club: ClubId, filter: FixtureFilter) -> Vec<Fixture> {
        let mut out: Vec<Fixture> = self
            .fixtures
            .iter()
            .filter(|f| f.involves(club) && filter.matches(f))
            .cloned()
            .collect();
        out.sort_by_key(|f| (f.scheduled_at, f.id));
        out
    }

    fn record_results(
        &mut self,
        season: SeasonId,
        played_at: NaiveDateTime,
        results: &[RecordedResult],
    ) -> Result<()> {
        self.require_season(season)?;
        let index: FxHashMap<FixtureId, usize> = self
            .fixtures
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id, i))
            .collect();

        // Check everything before touching anything
        let mut seen = FxHashSet::default();
        let mut slots = Vec::with_capacity(results.len());
        for result in results {
            let id = result.fixture_id;
            let &i = index.get(&id).ok_or_else(|| LeagueError::not_found("fixture", id))?;
            let fixture = &self.fixtures[i];
            if fixture.season_id != season {
                return Err(LeagueError::validation(format!(
                    "fixture {} belongs to season {}, not {}",
                    id, fixture.season_id, season
                )));
            }
            if fixture.is_played() || !seen.insert(id) {
                return Err(LeagueError::validation(format!(
                    "fixture {} already has a result",
                    id
                )));
            }
            if let Some(stray) = result
                .stats
                .iter()
                .find(|s| s.fixture_id != id || !fixture.involves(s.club_id))
            {
                return Err(LeagueError::validation(format!(
                    "stats for player {} do not belong to fixture {}",
                    stray.player_id, id
                )));
            }
            slots.push((i, result));
        }

        for (i, result) in slots {
            let fixture = &mut self.fixtures[i];
            fixture.result = Some(result.score);
            fixture.played_at = Some(played_at);
            self.match_stats.extend(result.stats.iter().cloned());
        }
        Ok(())
    }

    fn match_stats(&self, fixture: FixtureId) -> Result<Vec<MatchStat>> {
        if !self.fixtures.iter().any(|f| f.id == fixture) {
            return Err(LeagueError::not_found("fixture", fixture));
        }
        Ok(self
            .match_stats
            .iter()
            .filter(|s| s.fixture_id == fixture)
            .cloned()
            .collect())
    }

    fn apply_rollover(
        &mut self,
        tier_changes: &[(ClubId, Tier)],
        deactivate: &[SeasonId],
    ) -> Result<()> {
        for &(club, _) in tier_changes {
            if !self.clubs.iter().any(|c| c.id == club) {
                return Err(LeagueError::not_found("club", club));
            }
        }
        for &season in deactivate {
            self.require_season(season)?;
        }

        for &(id, tier) in tier_changes {
            if let Some(club) = self.clubs.iter_mut().find(|c| c.id == id) {
                club.tier = tier;
            }
        }
        for season in self.seasons.iter_mut().filter(|s| deactivate.contains(&s.id)) {
            season.is_active = false;
        }
        Ok(())
    }
}

impl RosterProvider for MemoryStore {
    fn squad(&self, club: ClubId) -> Result<Vec<Player>> {
        if !self.clubs.iter().any(|c| c.id == club) {
            return Err(LeagueError::not_found("club", club));
        }
        Ok(self
            .players
            .iter()
            .filter(|p| p.club_id == club)
            .cloned()
            .collect())
    }
}
