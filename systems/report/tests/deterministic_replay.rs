use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use exvs_cost_catalog::{combinations, RespawnTable};
use exvs_cost_core::{CostTier, Formation, UnitConfig};
use exvs_cost_system_report::{build_report, Report};

#[test]
fn reports_are_deterministic_for_fixed_formations() {
    let formations = sample_formations();
    let first = replay(&formations);
    let second = replay(&formations);

    assert_eq!(first, second, "report replay diverged");
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

#[test]
fn every_catalog_pairing_produces_a_report() {
    let table = RespawnTable::standard();
    let units: Vec<UnitConfig> = combinations()
        .map(|(cost, health)| UnitConfig::new(cost, health))
        .collect();

    for &unit_a in &units {
        for &unit_b in &units {
            let report = build_report(&Formation::pair(unit_a, unit_b), &table, None);
            assert_eq!(report.evaluated_count, 16);
            assert!(!report.is_empty());
            assert!(report.ranked.len() <= report.evaluated_count);
            assert!(report.statistics.is_some());
        }
    }
}

fn sample_formations() -> Vec<Formation> {
    vec![
        Formation::pair(
            UnitConfig::new(CostTier::C3000, 800),
            UnitConfig::new(CostTier::C3000, 800),
        ),
        Formation::pair(
            UnitConfig::new(CostTier::C3000, 800),
            UnitConfig::new(CostTier::C2500, 700),
        ),
        Formation::pair(
            UnitConfig::new(CostTier::C3000, 680).with_special_revival(true),
            UnitConfig::new(CostTier::C3000, 680),
        ),
        Formation::pair(
            UnitConfig::new(CostTier::C1500, 520).with_special_revival(true),
            UnitConfig::new(CostTier::C2000, 660).with_special_revival(true),
        ),
        Formation::new(Some(UnitConfig::new(CostTier::C2500, 640)), None),
    ]
}

fn replay(formations: &[Formation]) -> Vec<Report> {
    let table = RespawnTable::standard();
    formations
        .iter()
        .map(|formation| build_report(formation, &table, Some(8)))
        .collect()
}

fn fingerprint(reports: &[Report]) -> u64 {
    let mut hasher = DefaultHasher::new();
    reports.len().hash(&mut hasher);
    for report in reports {
        report.hash(&mut hasher);
    }
    hasher.finish()
}
