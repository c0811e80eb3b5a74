use exvs_cost_core::{CostTier, RespawnLookup};

/// Overdraft respawn health for one (cost, health, remaining pool) checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RespawnEntry {
    cost: CostTier,
    health: u32,
    remaining: i32,
    respawn_health: u32,
}

impl RespawnEntry {
    /// Creates a table entry.
    #[must_use]
    pub const fn new(cost: CostTier, health: u32, remaining: i32, respawn_health: u32) -> Self {
        Self {
            cost,
            health,
            remaining,
            respawn_health,
        }
    }

    fn key(&self) -> (CostTier, u32, i32) {
        (self.cost, self.health, self.remaining)
    }
}

/// Respawn health table backed by a sorted slice of overdraft checkpoints.
///
/// Lookups with the pool at or above the unit's cost resolve to the nominal
/// health and lookups with an exhausted pool resolve to zero, so only the
/// overdraft band needs entries.
#[derive(Clone, Copy, Debug)]
pub struct RespawnTable<'a> {
    entries: &'a [RespawnEntry],
}

impl<'a> RespawnTable<'a> {
    /// Wraps entries sorted by cost, health and remaining pool.
    #[must_use]
    pub fn new(entries: &'a [RespawnEntry]) -> Self {
        debug_assert!(
            entries.windows(2).all(|pair| pair[0].key() < pair[1].key()),
            "respawn entries must be sorted and unique"
        );
        Self { entries }
    }
}

impl RespawnTable<'static> {
    /// Table holding the standard game data.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_RESPAWN_ENTRIES)
    }
}

impl RespawnLookup for RespawnTable<'_> {
    fn lookup(&self, cost: CostTier, health: u32, remaining: i32) -> Option<u32> {
        if remaining >= cost.value() {
            return Some(health);
        }
        if remaining <= 0 {
            return Some(0);
        }

        self.entries
            .binary_search_by_key(&(cost, health, remaining), RespawnEntry::key)
            .ok()
            .map(|index| self.entries[index].respawn_health)
    }
}

/// Overdraft checkpoints for every catalog unit.
pub static STANDARD_RESPAWN_ENTRIES: &[RespawnEntry] = &[
    RespawnEntry::new(CostTier::C1500, 440, 500, 146),
    RespawnEntry::new(CostTier::C1500, 440, 1000, 293),
    RespawnEntry::new(CostTier::C1500, 460, 500, 153),
    RespawnEntry::new(CostTier::C1500, 460, 1000, 306),
    RespawnEntry::new(CostTier::C1500, 480, 500, 160),
    RespawnEntry::new(CostTier::C1500, 480, 1000, 320),
    RespawnEntry::new(CostTier::C1500, 500, 500, 166),
    RespawnEntry::new(CostTier::C1500, 500, 1000, 333),
    RespawnEntry::new(CostTier::C1500, 520, 500, 173),
    RespawnEntry::new(CostTier::C1500, 520, 1000, 346),
    RespawnEntry::new(CostTier::C2000, 580, 500, 145),
    RespawnEntry::new(CostTier::C2000, 580, 1000, 290),
    RespawnEntry::new(CostTier::C2000, 580, 1500, 435),
    RespawnEntry::new(CostTier::C2000, 600, 500, 150),
    RespawnEntry::new(CostTier::C2000, 600, 1000, 300),
    RespawnEntry::new(CostTier::C2000, 600, 1500, 450),
    RespawnEntry::new(CostTier::C2000, 620, 500, 155),
    RespawnEntry::new(CostTier::C2000, 620, 1000, 310),
    RespawnEntry::new(CostTier::C2000, 620, 1500, 465),
    RespawnEntry::new(CostTier::C2000, 640, 500, 160),
    RespawnEntry::new(CostTier::C2000, 640, 1000, 320),
    RespawnEntry::new(CostTier::C2000, 640, 1500, 480),
    RespawnEntry::new(CostTier::C2000, 660, 500, 165),
    RespawnEntry::new(CostTier::C2000, 660, 1000, 330),
    RespawnEntry::new(CostTier::C2000, 660, 1500, 495),
    RespawnEntry::new(CostTier::C2000, 680, 500, 170),
    RespawnEntry::new(CostTier::C2000, 680, 1000, 340),
    RespawnEntry::new(CostTier::C2000, 680, 1500, 510),
    RespawnEntry::new(CostTier::C2500, 620, 500, 124),
    RespawnEntry::new(CostTier::C2500, 620, 1000, 248),
    RespawnEntry::new(CostTier::C2500, 620, 1500, 372),
    RespawnEntry::new(CostTier::C2500, 620, 2000, 496),
    RespawnEntry::new(CostTier::C2500, 640, 500, 128),
    RespawnEntry::new(CostTier::C2500, 640, 1000, 256),
    RespawnEntry::new(CostTier::C2500, 640, 1500, 384),
    RespawnEntry::new(CostTier::C2500, 640, 2000, 512),
    RespawnEntry::new(CostTier::C2500, 660, 500, 132),
    RespawnEntry::new(CostTier::C2500, 660, 1000, 264),
    RespawnEntry::new(CostTier::C2500, 660, 1500, 396),
    RespawnEntry::new(CostTier::C2500, 660, 2000, 528),
    RespawnEntry::new(CostTier::C2500, 680, 500, 136),
    RespawnEntry::new(CostTier::C2500, 680, 1000, 272),
    RespawnEntry::new(CostTier::C2500, 680, 1500, 408),
    RespawnEntry::new(CostTier::C2500, 680, 2000, 544),
    RespawnEntry::new(CostTier::C2500, 700, 500, 140),
    RespawnEntry::new(CostTier::C2500, 700, 1000, 280),
    RespawnEntry::new(CostTier::C2500, 700, 1500, 420),
    RespawnEntry::new(CostTier::C2500, 700, 2000, 560),
    RespawnEntry::new(CostTier::C2500, 720, 500, 144),
    RespawnEntry::new(CostTier::C2500, 720, 1000, 288),
    RespawnEntry::new(CostTier::C2500, 720, 1500, 432),
    RespawnEntry::new(CostTier::C2500, 720, 2000, 576),
    RespawnEntry::new(CostTier::C3000, 660, 500, 110),
    RespawnEntry::new(CostTier::C3000, 660, 1000, 220),
    RespawnEntry::new(CostTier::C3000, 660, 1500, 330),
    RespawnEntry::new(CostTier::C3000, 660, 2000, 440),
    RespawnEntry::new(CostTier::C3000, 660, 2500, 550),
    RespawnEntry::new(CostTier::C3000, 680, 500, 113),
    RespawnEntry::new(CostTier::C3000, 680, 1000, 226),
    RespawnEntry::new(CostTier::C3000, 680, 1500, 340),
    RespawnEntry::new(CostTier::C3000, 680, 2000, 453),
    RespawnEntry::new(CostTier::C3000, 680, 2500, 566),
    RespawnEntry::new(CostTier::C3000, 700, 500, 116),
    RespawnEntry::new(CostTier::C3000, 700, 1000, 233),
    RespawnEntry::new(CostTier::C3000, 700, 1500, 350),
    RespawnEntry::new(CostTier::C3000, 700, 2000, 466),
    RespawnEntry::new(CostTier::C3000, 700, 2500, 583),
    RespawnEntry::new(CostTier::C3000, 720, 500, 120),
    RespawnEntry::new(CostTier::C3000, 720, 1000, 240),
    RespawnEntry::new(CostTier::C3000, 720, 1500, 360),
    RespawnEntry::new(CostTier::C3000, 720, 2000, 480),
    RespawnEntry::new(CostTier::C3000, 720, 2500, 600),
    RespawnEntry::new(CostTier::C3000, 740, 500, 123),
    RespawnEntry::new(CostTier::C3000, 740, 1000, 246),
    RespawnEntry::new(CostTier::C3000, 740, 1500, 370),
    RespawnEntry::new(CostTier::C3000, 740, 2000, 493),
    RespawnEntry::new(CostTier::C3000, 740, 2500, 616),
    RespawnEntry::new(CostTier::C3000, 760, 500, 126),
    RespawnEntry::new(CostTier::C3000, 760, 1000, 253),
    RespawnEntry::new(CostTier::C3000, 760, 1500, 380),
    RespawnEntry::new(CostTier::C3000, 760, 2000, 506),
    RespawnEntry::new(CostTier::C3000, 760, 2500, 633),
    RespawnEntry::new(CostTier::C3000, 800, 500, 133),
    RespawnEntry::new(CostTier::C3000, 800, 1000, 266),
    RespawnEntry::new(CostTier::C3000, 800, 1500, 400),
    RespawnEntry::new(CostTier::C3000, 800, 2000, 533),
    RespawnEntry::new(CostTier::C3000, 800, 2500, 666),
];
