use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub is_main: bool,
}

impl Team {
    /// Bundle stub: no logo, never main until reconciled
    pub fn stub(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_url: None,
            is_main: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Jersey number, kept as text ("00" and "0" are different slots)
    pub number: String,
    pub team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

/// Quarter and overtime scores of one side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodScores {
    #[serde(default)]
    pub quarters: Vec<f64>,
    #[serde(default)]
    pub overtimes: Vec<f64>,
}

impl PeriodScores {
    pub fn total(&self) -> f64 {
        self.quarters.iter().chain(self.overtimes.iter()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub championship_id: String,
    pub team1_id: String,
    pub team2_id: String,
    pub team1_name: String,
    pub team2_name: String,
    pub team1_score: f64,
    pub team2_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1_periods: Option<PeriodScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2_periods: Option<PeriodScores>,
}

/// One player's line in one match.
///
/// Every counting and percentage field is an `f64` because the exports mix
/// integers, decimals and percentages in the same columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub id: String,
    pub match_id: String,
    pub player_id: String,
    pub team_id: String,
    pub player_name: String,
    pub player_number: String,

    pub two_pt: f64,
    pub two_pt_a: f64,
    pub two_pt_pct: f64,
    pub three_pt: f64,
    pub three_pt_a: f64,
    pub three_pt_pct: f64,
    pub fg: f64,
    pub fga: f64,
    pub fg_pct: f64,
    pub efg_pct: f64,
    pub ft: f64,
    pub fta: f64,
    pub ft_pct: f64,
    pub pts: f64,
    pub layup: f64,
    pub layup_a: f64,
    pub layup_pct: f64,
    pub paint_pt: f64,
    pub paint_att: f64,
    pub to_pts: f64,
    pub o_reb: f64,
    pub d_reb: f64,
    pub rebs: f64,
    pub ast: f64,
    #[serde(rename = "to")]
    pub turnovers: f64,
    pub stl: f64,
    pub blk: f64,
    pub blka: f64,
    pub foul: f64,
    pub fouled: f64,
    pub minutes: f64,
    pub vps: f64,
    pub plus_minus: f64,
    pub effic: f64,
}

/// Numeric columns of [`PlayerStats`], addressable by the header table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    TwoPt,
    TwoPtA,
    TwoPtPct,
    ThreePt,
    ThreePtA,
    ThreePtPct,
    Fg,
    Fga,
    FgPct,
    EfgPct,
    Ft,
    Fta,
    FtPct,
    Pts,
    Layup,
    LayupA,
    LayupPct,
    PaintPt,
    PaintAtt,
    ToPts,
    OReb,
    DReb,
    Rebs,
    Ast,
    Turnovers,
    Stl,
    Blk,
    Blka,
    Foul,
    Fouled,
    Minutes,
    Vps,
    PlusMinus,
    Effic,
}

impl StatField {
    /// Every numeric field, in storage column order
    pub const ALL: [StatField; 34] = [
        StatField::TwoPt,
        StatField::TwoPtA,
        StatField::TwoPtPct,
        StatField::ThreePt,
        StatField::ThreePtA,
        StatField::ThreePtPct,
        StatField::Fg,
        StatField::Fga,
        StatField::FgPct,
        StatField::EfgPct,
        StatField::Ft,
        StatField::Fta,
        StatField::FtPct,
        StatField::Pts,
        StatField::Layup,
        StatField::LayupA,
        StatField::LayupPct,
        StatField::PaintPt,
        StatField::PaintAtt,
        StatField::ToPts,
        StatField::OReb,
        StatField::DReb,
        StatField::Rebs,
        StatField::Ast,
        StatField::Turnovers,
        StatField::Stl,
        StatField::Blk,
        StatField::Blka,
        StatField::Foul,
        StatField::Fouled,
        StatField::Minutes,
        StatField::Vps,
        StatField::PlusMinus,
        StatField::Effic,
    ];

    /// Column name used by the SQLite store
    pub const fn column(self) -> &'static str {
        match self {
            StatField::TwoPt => "two_pt",
            StatField::TwoPtA => "two_pt_a",
            StatField::TwoPtPct => "two_pt_pct",
            StatField::ThreePt => "three_pt",
            StatField::ThreePtA => "three_pt_a",
            StatField::ThreePtPct => "three_pt_pct",
            StatField::Fg => "fg",
            StatField::Fga => "fga",
            StatField::FgPct => "fg_pct",
            StatField::EfgPct => "efg_pct",
            StatField::Ft => "ft",
            StatField::Fta => "fta",
            StatField::FtPct => "ft_pct",
            StatField::Pts => "pts",
            StatField::Layup => "layup",
            StatField::LayupA => "layup_a",
            StatField::LayupPct => "layup_pct",
            StatField::PaintPt => "paint_pt",
            StatField::PaintAtt => "paint_att",
            StatField::ToPts => "to_pts",
            StatField::OReb => "o_reb",
            StatField::DReb => "d_reb",
            StatField::Rebs => "rebs",
            StatField::Ast => "ast",
            StatField::Turnovers => "turnovers",
            StatField::Stl => "stl",
            StatField::Blk => "blk",
            StatField::Blka => "blka",
            StatField::Foul => "foul",
            StatField::Fouled => "fouled",
            StatField::Minutes => "minutes",
            StatField::Vps => "vps",
            StatField::PlusMinus => "plus_minus",
            StatField::Effic => "effic",
        }
    }
}

impl PlayerStats {
    pub fn get(&self, field: StatField) -> f64 {
        match field {
            StatField::TwoPt => self.two_pt,
            StatField::TwoPtA => self.two_pt_a,
            StatField::TwoPtPct => self.two_pt_pct,
            StatField::ThreePt => self.three_pt,
            StatField::ThreePtA => self.three_pt_a,
            StatField::ThreePtPct => self.three_pt_pct,
            StatField::Fg => self.fg,
            StatField::Fga => self.fga,
            StatField::FgPct => self.fg_pct,
            StatField::EfgPct => self.efg_pct,
            StatField::Ft => self.ft,
            StatField::Fta => self.fta,
            StatField::FtPct => self.ft_pct,
            StatField::Pts => self.pts,
            StatField::Layup => self.layup,
            StatField::LayupA => self.layup_a,
            StatField::LayupPct => self.layup_pct,
            StatField::PaintPt => self.paint_pt,
            StatField::PaintAtt => self.paint_att,
            StatField::ToPts => self.to_pts,
            StatField::OReb => self.o_reb,
            StatField::DReb => self.d_reb,
            StatField::Rebs => self.rebs,
            StatField::Ast => self.ast,
            StatField::Turnovers => self.turnovers,
            StatField::Stl => self.stl,
            StatField::Blk => self.blk,
            StatField::Blka => self.blka,
            StatField::Foul => self.foul,
            StatField::Fouled => self.fouled,
            StatField::Minutes => self.minutes,
            StatField::Vps => self.vps,
            StatField::PlusMinus => self.plus_minus,
            StatField::Effic => self.effic,
        }
    }

    pub fn set(&mut self, field: StatField, value: f64) {
        let slot = match field {
            StatField::TwoPt => &mut self.two_pt,
            StatField::TwoPtA => &mut self.two_pt_a,
            StatField::TwoPtPct => &mut self.two_pt_pct,
            StatField::ThreePt => &mut self.three_pt,
            StatField::ThreePtA => &mut self.three_pt_a,
            StatField::ThreePtPct => &mut self.three_pt_pct,
            StatField::Fg => &mut self.fg,
            StatField::Fga => &mut self.fga,
            StatField::FgPct => &mut self.fg_pct,
            StatField::EfgPct => &mut self.efg_pct,
            StatField::Ft => &mut self.ft,
            StatField::Fta => &mut self.fta,
            StatField::FtPct => &mut self.ft_pct,
            StatField::Pts => &mut self.pts,
            StatField::Layup => &mut self.layup,
            StatField::LayupA => &mut self.layup_a,
            StatField::LayupPct => &mut self.layup_pct,
            StatField::PaintPt => &mut self.paint_pt,
            StatField::PaintAtt => &mut self.paint_att,
            StatField::ToPts => &mut self.to_pts,
            StatField::OReb => &mut self.o_reb,
            StatField::DReb => &mut self.d_reb,
            StatField::Rebs => &mut self.rebs,
            StatField::Ast => &mut self.ast,
            StatField::Turnovers => &mut self.turnovers,
            StatField::Stl => &mut self.stl,
            StatField::Blk => &mut self.blk,
            StatField::Blka => &mut self.blka,
            StatField::Foul => &mut self.foul,
            StatField::Fouled => &mut self.fouled,
            StatField::Minutes => &mut self.minutes,
            StatField::Vps => &mut self.vps,
            StatField::PlusMinus => &mut self.plus_minus,
            StatField::Effic => &mut self.effic,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Championship {
    pub id: String,
    pub name: String,
}

/// Membership of a team in a championship
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionshipTeam {
    pub championship_id: String,
    pub team_id: String,
}
