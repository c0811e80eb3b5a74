use exvs_cost_core::{CostTier, UnitConfig};

use crate::CatalogError;

const HEALTH_1500: &[u32] = &[440, 460, 480, 500, 520];
const HEALTH_2000: &[u32] = &[580, 600, 620, 640, 660, 680];
const HEALTH_2500: &[u32] = &[620, 640, 660, 680, 700, 720];
const HEALTH_3000: &[u32] = &[660, 680, 700, 720, 740, 760, 800];

/// Nominal health values offered for the tier, in ascending order.
#[must_use]
pub fn health_options(cost: CostTier) -> &'static [u32] {
    match cost {
        CostTier::C1500 => HEALTH_1500,
        CostTier::C2000 => HEALTH_2000,
        CostTier::C2500 => HEALTH_2500,
        CostTier::C3000 => HEALTH_3000,
    }
}

/// Whether the catalog offers a unit with this cost and health.
#[must_use]
pub fn is_valid_combination(cost: CostTier, health: u32) -> bool {
    health_options(cost).binary_search(&health).is_ok()
}

/// Iterates every valid (cost, health) pair, ordered by cost then health.
pub fn combinations() -> impl Iterator<Item = (CostTier, u32)> {
    CostTier::ALL.into_iter().flat_map(|cost| {
        health_options(cost)
            .iter()
            .map(move |&health| (cost, health))
    })
}

/// Builds a validated unit from raw caller input.
pub fn unit(cost: u32, health: u32, special_revival: bool) -> Result<UnitConfig, CatalogError> {
    let cost = CostTier::try_from(cost)?;
    if !is_valid_combination(cost, health) {
        return Err(CatalogError::InvalidHealth { cost, health });
    }
    Ok(UnitConfig::new(cost, health).with_special_revival(special_revival))
}

#[cfg(test)]
mod tests {
    use super::*;
    use exvs_cost_core::UnknownCostTier;

    #[test]
    fn health_options_are_sorted() {
        for cost in CostTier::ALL {
            let options = health_options(cost);
            assert!(options.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn combinations_cover_every_tier() {
        assert_eq!(combinations().count(), 24);
        assert!(combinations().any(|(cost, health)| cost == CostTier::C1500 && health == 440));
        assert!(combinations().any(|(cost, health)| cost == CostTier::C3000 && health == 800));
    }

    #[test]
    fn unit_validates_cost_and_health() {
        let built = unit(2_500, 700, true).expect("valid unit");
        assert_eq!(built.cost(), CostTier::C2500);
        assert_eq!(built.health(), 700);
        assert!(built.special_revival());

        assert_eq!(
            unit(1_000, 700, false),
            Err(CatalogError::UnknownCost(UnknownCostTier(1_000)))
        );
        assert_eq!(
            unit(1_500, 800, false),
            Err(CatalogError::InvalidHealth {
                cost: CostTier::C1500,
                health: 800
            })
        );
    }
}
