//! Starter league: two tiers of clubs with randomly rated squads
//!
//! Level 4 - Utilities

use pennant_core::player::{ATTRIBUTE_MAX, POTENTIAL_MAX, POTENTIAL_MIN};
use pennant_core::{Attributes, Club, Player, Position, Result, Tier};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::store::MemoryStore;

/// (name, nickname, primary colour, secondary colour)
type ClubSeed = (&'static str, &'static str, &'static str, &'static str);

const UPPER_CLUBS: &[ClubSeed] = &[
    ("Adelaide Crows", "Crows", "#002B5C", "#FFD100"),
    ("Brisbane Lions", "Lions", "#A30046", "#FFD100"),
    ("Carlton Blues", "Blues", "#002F5D", "#FFFFFF"),
    ("Collingwood Magpies", "Magpies", "#000000", "#FFFFFF"),
    ("Essendon Bombers", "Bombers", "#CC2229", "#000000"),
    ("Fremantle Dockers", "Dockers", "#2E0C58", "#FFFFFF"),
    ("Geelong Cats", "Cats", "#001F3B", "#FFFFFF"),
    ("Gold Coast Suns", "Suns", "#FFD100", "#CC2229"),
    ("GWS Giants", "Giants", "#FF6600", "#000000"),
    ("Hawthorn Hawks", "Hawks", "#492F1B", "#FFD100"),
    ("Melbourne Demons", "Demons", "#CC2229", "#002F5D"),
    ("North Melbourne Kangaroos", "Kangaroos", "#003F7F", "#FFFFFF"),
    ("Port Adelaide Power", "Power", "#00B5A0", "#000000"),
    ("Richmond Tigers", "Tigers", "#FFD100", "#000000"),
    ("St Kilda Saints", "Saints", "#CC2229", "#000000"),
    ("Sydney Swans", "Swans", "#CC2229", "#FFFFFF"),
    ("West Coast Eagles", "Eagles", "#002F5D", "#FFD100"),
    ("Western Bulldogs", "Bulldogs", "#003F7F", "#CC2229"),
];

const LOWER_CLUBS: &[ClubSeed] = &[
    ("Box Hill Hawks", "Hawks", "#492F1B", "#FFD100"),
    ("Casey Demons", "Demons", "#CC2229", "#002F5D"),
    ("Coburg Lions", "Lions", "#A30046", "#FFD100"),
    ("Footscray Bulldogs", "Bulldogs", "#003F7F", "#CC2229"),
    ("Frankston Dolphins", "Dolphins", "#002F5D", "#FFFFFF"),
    ("Port Melbourne Borough", "Borough", "#CC2229", "#002F5D"),
    ("Sandringham Zebras", "Zebras", "#000000", "#FFFFFF"),
    ("Werribee Tigers", "Tigers", "#FFD100", "#000000"),
    ("Williamstown Seagulls", "Seagulls", "#002F5D", "#FFD100"),
    ("Northern Bullants", "Bullants", "#CC2229", "#FFFFFF"),
];

const MIN_SQUAD: usize = 25;
const MAX_SQUAD: usize = 35;

/// Relative weights for ages 18..=34
const AGE_WEIGHTS: [u32; 17] = [1, 2, 3, 4, 5, 5, 4, 3, 3, 2, 2, 1, 1, 1, 1, 1, 1];
const MIN_AGE: u8 = 18;

const ATTRIBUTE_FLOOR: i32 = 20;

/// Build the starter league from a seed
pub fn demo_league(seed: u64) -> Result<MemoryStore> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut store = MemoryStore::new();
    let mut next_player = 1;

    let clubs = UPPER_CLUBS
        .iter()
        .map(|c| (c, Tier::Upper))
        .chain(LOWER_CLUBS.iter().map(|c| (c, Tier::Lower)));

    for (i, (&(name, nickname, primary, secondary), tier)) in clubs.enumerate() {
        let club_id = i as u32 + 1;
        store.add_club(Club {
            id: club_id,
            name: name.to_string(),
            nickname: nickname.to_string(),
            tier,
            primary_colour: primary.to_string(),
            secondary_colour: Some(secondary.to_string()),
        })?;

        let squad = rng.gen_range(MIN_SQUAD..=MAX_SQUAD);
        for n in 1..=squad {
            let player = random_player(next_player, club_id, format!("{} #{}", nickname, n), &mut rng);
            store.add_player(player)?;
            next_player += 1;
        }
    }
    Ok(store)
}

fn random_player<R: Rng + ?Sized>(id: u32, club_id: u32, name: String, rng: &mut R) -> Player {
    let age = match WeightedIndex::new(AGE_WEIGHTS) {
        Ok(dist) => MIN_AGE + dist.sample(rng) as u8,
        Err(_) => 24,
    };
    let base = rng.gen_range(40..=85);
    let age_factor = (1.0 - (age as f64 - 22.0) * 0.02).max(0.7);
    let physical_base = (base as f64 * age_factor) as i32;
    let seniority = (age - MIN_AGE) as i32;

    let mut attr = |centre: i32, low: i32, high: i32| -> u8 {
        (centre + rng.gen_range(low..=high)).clamp(ATTRIBUTE_FLOOR, ATTRIBUTE_MAX as i32) as u8
    };
    let attributes = Attributes {
        kicking: attr(base, -15, 15),
        handball: attr(base, -15, 15),
        marking: attr(base, -15, 15),
        spoiling: attr(base, -15, 15),
        ruck_work: attr(base, -20, 10),
        speed: attr(physical_base, -15, 15),
        endurance: attr(physical_base, -15, 15),
        strength: attr(base, -15, 15),
        decision_making: attr(base + seniority * 2, -10, 10),
        leadership: attr(base + seniority * 3, -15, 5),
        composure: attr(base + seniority * 2, -10, 10),
    };

    let potential_low = (base - 10).max(POTENTIAL_MIN as i32);
    let potential_high = (base + 20).min(POTENTIAL_MAX as i32);
    Player {
        id,
        club_id,
        name,
        position: Position::ALL[rng.gen_range(0..Position::ALL.len())],
        age,
        attributes,
        potential: rng.gen_range(potential_low..=potential_high) as u8,
        morale: rng.gen_range(-2..=3),
        injured: false,
        suspended: false,
    }
}
