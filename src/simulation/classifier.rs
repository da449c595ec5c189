//! Voltage band classifier for the ED stack controller.
//!
//! Bands are held in an ordered table and evaluated top-down; the first band whose
//! floor the voltage reaches wins, so each boundary belongs to the upper band.

use rand::Rng;

use crate::domain::OperatingStatus;

/// Idle draw of the controller when the stack is stopped, in W
pub const IDLE_DRAW_W: f64 = 5.0;

/// Upper bound on reported separation quality, in percent
pub const MAX_SEPARATION_PCT: f64 = 99.9;

/// How a band sizes the ED load
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadRule {
    /// Fixed draw regardless of generation
    Fixed(f64),
    /// Fraction of generated power
    Fraction(f64),
}

/// How a band derives separation quality
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeparationRule {
    /// Stack not running
    None,
    /// `base + (voltage - from) * per_volt`
    Linear { base: f64, from: f64, per_volt: f64 },
    /// `base + uniform[0, spread)`
    Jitter { base: f64, spread: f64 },
}

/// One row of the band table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageBand {
    /// Inclusive lower voltage bound
    pub floor: f64,
    pub status: OperatingStatus,
    pub load: LoadRule,
    pub separation: SeparationRule,
}

/// Bands from highest floor to lowest
pub const BANDS: [VoltageBand; 3] = [
    VoltageBand {
        floor: 22.0,
        status: OperatingStatus::Optimal,
        load: LoadRule::Fraction(0.85),
        separation: SeparationRule::Jitter {
            base: 98.0,
            spread: 1.5,
        },
    },
    VoltageBand {
        floor: 12.0,
        status: OperatingStatus::Normal,
        load: LoadRule::Fraction(0.6),
        separation: SeparationRule::Linear {
            base: 70.0,
            from: 12.0,
            per_volt: 2.5,
        },
    },
    VoltageBand {
        floor: f64::NEG_INFINITY,
        status: OperatingStatus::Stopped,
        load: LoadRule::Fixed(IDLE_DRAW_W),
        separation: SeparationRule::None,
    },
];

/// Result of classifying one operating point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub status: OperatingStatus,
    pub power_load: f64,
    pub separation_pct: f64,
}

pub fn band_for(voltage: f64) -> &'static VoltageBand {
    BANDS
        .iter()
        .find(|band| voltage >= band.floor)
        .unwrap_or(&BANDS[BANDS.len() - 1])
}

pub fn classify<R: Rng>(voltage: f64, power_generated: f64, rng: &mut R) -> Classification {
    let band = band_for(voltage);

    let power_load = match band.load {
        LoadRule::Fixed(watts) => watts,
        LoadRule::Fraction(share) => power_generated * share,
    };

    let separation_pct = match band.separation {
        SeparationRule::None => 0.0,
        SeparationRule::Linear {
            base,
            from,
            per_volt,
        } => base + (voltage - from) * per_volt,
        SeparationRule::Jitter { base, spread } => base + rng.gen_range(0.0..spread),
    };

    Classification {
        status: band.status,
        power_load,
        separation_pct: separation_pct.min(MAX_SEPARATION_PCT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_band_boundaries_belong_to_upper_band() {
        assert_eq!(band_for(11.999).status, OperatingStatus::Stopped);
        assert_eq!(band_for(12.0).status, OperatingStatus::Normal);
        assert_eq!(band_for(21.999).status, OperatingStatus::Normal);
        assert_eq!(band_for(22.0).status, OperatingStatus::Optimal);
        assert_eq!(band_for(0.0).status, OperatingStatus::Stopped);
    }

    #[test]
    fn test_stopped_band() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = classify(10.0, 0.0, &mut rng);
        assert_eq!(c.status, OperatingStatus::Stopped);
        assert_eq!(c.power_load, IDLE_DRAW_W);
        assert_eq!(c.separation_pct, 0.0);
    }

    #[test]
    fn test_normal_band() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = classify(16.0, 330.0, &mut rng);
        assert_eq!(c.status, OperatingStatus::Normal);
        assert!((c.power_load - 198.0).abs() < 1e-9);
        assert!((c.separation_pct - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_optimal_band_jitter_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let c = classify(30.0, 1100.0, &mut rng);
            assert_eq!(c.status, OperatingStatus::Optimal);
            assert!((c.power_load - 935.0).abs() < 1e-9);
            assert!(c.separation_pct >= 98.0 && c.separation_pct < 99.5);
        }
    }

    #[test]
    fn test_zero_power_in_running_band_has_zero_load() {
        let mut rng = StdRng::seed_from_u64(3);
        let c = classify(12.0, 0.0, &mut rng);
        assert_eq!(c.power_load, 0.0);
    }
}
