//! Chip Stack Index: a stack measured in rounds of forced bets.

use serde::{Deserialize, Serialize};

/// Number of orbits `chips` survives paying blinds and antes.
///
/// ```
/// use coach_engine::csi::calculate_csi;
///
/// assert_eq!(calculate_csi(1500, 25, 50, 0), 20.0);
/// assert!((calculate_csi(1500, 25, 50, 10) - 17.647).abs() < 0.001);
/// ```
pub fn calculate_csi(chips: u32, small_blind: u32, big_blind: u32, antes: u32) -> f64 {
    let forced = f64::from(small_blind) + f64::from(big_blind) + f64::from(antes);
    if forced == 0.0 {
        return f64::INFINITY;
    }
    f64::from(chips) / forced
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsiZone {
    PushFoldOnly,
    PrimarilyPushFold,
    Mixed,
    Standard,
}

impl CsiZone {
    pub fn from_csi(csi: f64) -> CsiZone {
        if csi <= 2.0 {
            CsiZone::PushFoldOnly
        } else if csi <= 7.0 {
            CsiZone::PrimarilyPushFold
        } else if csi <= 12.0 {
            CsiZone::Mixed
        } else {
            CsiZone::Standard
        }
    }

    pub fn strategy(self) -> &'static str {
        match self {
            CsiZone::PushFoldOnly => "Push/Fold Only",
            CsiZone::PrimarilyPushFold => "Primarily Push/Fold",
            CsiZone::Mixed => "Mixed Strategy",
            CsiZone::Standard => "Standard Play",
        }
    }

    /// Short-stack zones where push/fold charts drive the decision.
    pub fn is_push_fold(self) -> bool {
        matches!(self, CsiZone::PushFoldOnly | CsiZone::PrimarilyPushFold)
    }
}

/// Coaching summary for a CSI value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsiInfo {
    pub csi: f64,
    pub zone: CsiZone,
    pub strategy: &'static str,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

pub fn csi_info(csi: f64) -> CsiInfo {
    let zone = CsiZone::from_csi(csi);
    let (description, recommended_action) = match zone {
        CsiZone::PushFoldOnly => (
            "Very short stack - push any two cards in most situations",
            "Look for any spot to get chips in the middle",
        ),
        CsiZone::PrimarilyPushFold => (
            "Short stack - use specific push/fold ranges",
            "Follow push/fold charts strictly",
        ),
        CsiZone::Mixed => (
            "Can start playing some post-flop poker",
            "Mix between pushing and standard play",
        ),
        CsiZone::Standard => (
            "Deep enough for normal tournament poker",
            "Use position and post-flop skills",
        ),
    };
    CsiInfo {
        csi,
        zone,
        strategy: zone.strategy(),
        description,
        recommended_action,
    }
}

pub fn csi_strategy_tips(csi: f64) -> &'static [&'static str] {
    if csi <= 2.0 {
        &[
            "Push any two cards from small blind vs big blind",
            "Look for any reasonable spot to get chips in",
            "Don't fold in small blind unless facing a call",
            "Survival mode - need to double up quickly",
        ]
    } else if csi <= 5.0 {
        &[
            "Push/fold is still primary strategy",
            "Widen pushing ranges from late position",
            "Avoid calling raises without very strong hands",
            "Use detailed push/fold charts",
        ]
    } else if csi <= 10.0 {
        &[
            "Can occasionally call raises with strong hands",
            "Still primarily push/fold but with tighter ranges",
            "Look for spots to 3-bet shove",
            "Position becomes more important",
        ]
    } else if csi <= 15.0 {
        &[
            "Can start playing some post-flop poker",
            "Still avoid marginal spots without good odds",
            "Mix between pushing and raising",
            "Use position more aggressively",
        ]
    } else {
        &[
            "Can play more standard poker",
            "Use position and post-flop skills",
            "Still be aware of CSI for key decisions",
            "Look for accumulation opportunities",
        ]
    }
}
