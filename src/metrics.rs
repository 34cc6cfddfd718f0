//! Shooting percentages and effective field-goal percentage.
//!
//! Both the text parser and manual entry run every stat line through
//! [`fill_derived`], so the two ingestion paths agree on derived values.

use crate::model::PlayerStats;

/// `makes / attempts * 100`, or 0 when there were no attempts
pub fn pct(makes: f64, attempts: f64) -> f64 {
    if attempts > 0.0 {
        makes / attempts * 100.0
    } else {
        0.0
    }
}

/// `(fgm + 0.5 * 3pm) / fga * 100`, or 0 when there were no attempts
pub fn efg_pct(fg_made: f64, three_made: f64, fg_attempts: f64) -> f64 {
    if fg_attempts > 0.0 {
        (fg_made + 0.5 * three_made) / fg_attempts * 100.0
    } else {
        0.0
    }
}

/// Raw makes and attempts for one stat line
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShootingLine {
    pub fg: f64,
    pub fga: f64,
    pub three_pt: f64,
    pub three_pt_a: f64,
    pub ft: f64,
    pub fta: f64,
    /// Two-point makes when the source reports them directly
    pub two_pt: Option<f64>,
    pub two_pt_a: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShootingSplits {
    pub two_pt: f64,
    pub two_pt_a: f64,
    pub two_pt_pct: f64,
    pub three_pt_pct: f64,
    pub fg_pct: f64,
    pub efg_pct: f64,
    pub ft_pct: f64,
}

impl ShootingLine {
    pub fn derive(&self) -> ShootingSplits {
        let two_pt = self
            .two_pt
            .unwrap_or_else(|| (self.fg - self.three_pt).max(0.0));
        let two_pt_a = self
            .two_pt_a
            .unwrap_or_else(|| (self.fga - self.three_pt_a).max(0.0));

        ShootingSplits {
            two_pt,
            two_pt_a,
            two_pt_pct: pct(two_pt, two_pt_a),
            three_pt_pct: pct(self.three_pt, self.three_pt_a),
            fg_pct: pct(self.fg, self.fga),
            efg_pct: efg_pct(self.fg, self.three_pt, self.fga),
            ft_pct: pct(self.ft, self.fta),
        }
    }
}

/// Fill derived fields that the source left at zero.
///
/// Values the source supplied are kept as-is. Field-goal totals fall back to
/// two-point + three-point, total rebounds to offensive + defensive.
pub fn fill_derived(stats: &mut PlayerStats) {
    if stats.fg == 0.0 && stats.fga == 0.0 {
        stats.fg = stats.two_pt + stats.three_pt;
        stats.fga = stats.two_pt_a + stats.three_pt_a;
    }

    let has_two_pt = stats.two_pt != 0.0 || stats.two_pt_a != 0.0;
    let line = ShootingLine {
        fg: stats.fg,
        fga: stats.fga,
        three_pt: stats.three_pt,
        three_pt_a: stats.three_pt_a,
        ft: stats.ft,
        fta: stats.fta,
        two_pt: has_two_pt.then_some(stats.two_pt),
        two_pt_a: has_two_pt.then_some(stats.two_pt_a),
    };
    let splits = line.derive();

    stats.two_pt = splits.two_pt;
    stats.two_pt_a = splits.two_pt_a;
    fill_zero(&mut stats.two_pt_pct, splits.two_pt_pct);
    fill_zero(&mut stats.three_pt_pct, splits.three_pt_pct);
    fill_zero(&mut stats.fg_pct, splits.fg_pct);
    fill_zero(&mut stats.efg_pct, splits.efg_pct);
    fill_zero(&mut stats.ft_pct, splits.ft_pct);
    fill_zero(&mut stats.layup_pct, pct(stats.layup, stats.layup_a));
    fill_zero(&mut stats.rebs, stats.o_reb + stats.d_reb);
}

fn fill_zero(slot: &mut f64, value: f64) {
    if *slot == 0.0 {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_attempts_are_zero() {
        assert_eq!(pct(0.0, 0.0), 0.0);
        assert_eq!(pct(5.0, 0.0), 0.0);
        assert_eq!(efg_pct(3.0, 1.0, 0.0), 0.0);

        let splits = ShootingLine::default().derive();
        for value in [
            splits.two_pt_pct,
            splits.three_pt_pct,
            splits.fg_pct,
            splits.efg_pct,
            splits.ft_pct,
        ] {
            assert!(value.is_finite());
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn test_efg_weights_threes() {
        // 7/15 with 2 threes: (7 + 1) / 15
        let efg = efg_pct(7.0, 2.0, 15.0);
        assert!((efg - 53.333_333).abs() < 1e-4);
    }

    #[test]
    fn test_two_point_split_derived_from_totals() {
        let splits = ShootingLine {
            fg: 7.0,
            fga: 15.0,
            three_pt: 2.0,
            three_pt_a: 5.0,
            ..Default::default()
        }
        .derive();
        assert_eq!(splits.two_pt, 5.0);
        assert_eq!(splits.two_pt_a, 10.0);
        assert_eq!(splits.two_pt_pct, 50.0);
        assert_eq!(splits.three_pt_pct, 40.0);
    }

    #[test]
    fn test_two_point_split_supplied_directly_wins() {
        let splits = ShootingLine {
            fg: 7.0,
            fga: 15.0,
            three_pt: 2.0,
            three_pt_a: 5.0,
            two_pt: Some(4.0),
            two_pt_a: Some(9.0),
            ..Default::default()
        }
        .derive();
        assert_eq!(splits.two_pt, 4.0);
        assert_eq!(splits.two_pt_a, 9.0);
    }

    #[test]
    fn test_fill_derived_keeps_supplied_values() {
        let mut stats = PlayerStats {
            fg: 7.0,
            fga: 15.0,
            fg_pct: 47.0,
            three_pt: 2.0,
            three_pt_a: 5.0,
            o_reb: 1.0,
            d_reb: 4.0,
            ..Default::default()
        };
        fill_derived(&mut stats);

        assert_eq!(stats.fg_pct, 47.0);
        assert_eq!(stats.two_pt, 5.0);
        assert_eq!(stats.two_pt_pct, 50.0);
        assert_eq!(stats.rebs, 5.0);
        assert!((stats.efg_pct - 53.333_333).abs() < 1e-4);
    }

    #[test]
    fn test_fill_derived_builds_field_goals_from_splits() {
        let mut stats = PlayerStats {
            two_pt: 5.0,
            two_pt_a: 10.0,
            three_pt: 2.0,
            three_pt_a: 5.0,
            ..Default::default()
        };
        fill_derived(&mut stats);

        assert_eq!(stats.fg, 7.0);
        assert_eq!(stats.fga, 15.0);
        assert_eq!(stats.two_pt_pct, 50.0);
    }
}
