//! Header vocabulary of the semicolon-separated box-score exports.
//!
//! Different statistics tools spell the same column differently (`Pts`,
//! `-Pt`, `PTS`). Each spelling is one row of [`HEADER_ALIASES`]; adding a
//! new dialect means adding rows here, not touching the parser.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::model::StatField;

/// Where a header's values end up in a stat line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    PlayerName,
    PlayerNumber,
    Stat(StatField),
}

/// One known spelling of a column header
#[derive(Debug, Clone, Copy)]
pub struct HeaderAlias {
    pub header: &'static str,
    pub column: Column,
}

impl HeaderAlias {
    const fn stat(header: &'static str, field: StatField) -> Self {
        Self {
            header,
            column: Column::Stat(field),
        }
    }

    const fn column(header: &'static str, column: Column) -> Self {
        Self { header, column }
    }
}

pub static HEADER_ALIASES: &[HeaderAlias] = &[
    // Identity
    HeaderAlias::column("Player", Column::PlayerName),
    HeaderAlias::column("Name", Column::PlayerName),
    HeaderAlias::column("No.", Column::PlayerNumber),
    HeaderAlias::column("N.", Column::PlayerNumber),
    HeaderAlias::column("N,", Column::PlayerNumber),
    HeaderAlias::column("#", Column::PlayerNumber),
    // Playing time
    HeaderAlias::stat("Mins", StatField::Minutes),
    HeaderAlias::stat("-Mins", StatField::Minutes),
    HeaderAlias::stat("Minutes", StatField::Minutes),
    HeaderAlias::stat("MIN", StatField::Minutes),
    // Two-point shooting
    HeaderAlias::stat("2Pt", StatField::TwoPt),
    HeaderAlias::stat("-2P", StatField::TwoPt),
    HeaderAlias::stat("2P", StatField::TwoPt),
    HeaderAlias::stat("2PtA", StatField::TwoPtA),
    HeaderAlias::stat("-2PA", StatField::TwoPtA),
    HeaderAlias::stat("2PA", StatField::TwoPtA),
    HeaderAlias::stat("2Pt%", StatField::TwoPtPct),
    HeaderAlias::stat("-2P%", StatField::TwoPtPct),
    HeaderAlias::stat("2P%", StatField::TwoPtPct),
    // Three-point shooting
    HeaderAlias::stat("3Pt", StatField::ThreePt),
    HeaderAlias::stat("-3P", StatField::ThreePt),
    HeaderAlias::stat("3P", StatField::ThreePt),
    HeaderAlias::stat("3PtA", StatField::ThreePtA),
    HeaderAlias::stat("-3PA", StatField::ThreePtA),
    HeaderAlias::stat("3PA", StatField::ThreePtA),
    HeaderAlias::stat("3Pt%", StatField::ThreePtPct),
    HeaderAlias::stat("-3P%", StatField::ThreePtPct),
    HeaderAlias::stat("3P%", StatField::ThreePtPct),
    // Field goals
    HeaderAlias::stat("FG", StatField::Fg),
    HeaderAlias::stat("FGM", StatField::Fg),
    HeaderAlias::stat("FGA", StatField::Fga),
    HeaderAlias::stat("FG%", StatField::FgPct),
    HeaderAlias::stat("FG %", StatField::FgPct),
    HeaderAlias::stat("EFG%", StatField::EfgPct),
    // Free throws
    HeaderAlias::stat("FT", StatField::Ft),
    HeaderAlias::stat("-FT", StatField::Ft),
    HeaderAlias::stat("FTA", StatField::Fta),
    HeaderAlias::stat("-FTA", StatField::Fta),
    HeaderAlias::stat("FT %", StatField::FtPct),
    HeaderAlias::stat("-FT%", StatField::FtPct),
    // Scoring
    HeaderAlias::stat("Pts", StatField::Pts),
    HeaderAlias::stat("-Pt", StatField::Pts),
    HeaderAlias::stat("Layup", StatField::Layup),
    HeaderAlias::stat("LayupA", StatField::LayupA),
    HeaderAlias::stat("Layup%", StatField::LayupPct),
    HeaderAlias::stat("Paint Pt", StatField::PaintPt),
    HeaderAlias::stat("Paint Att", StatField::PaintAtt),
    HeaderAlias::stat("TO Pts", StatField::ToPts),
    // Rebounds
    HeaderAlias::stat("OReb", StatField::OReb),
    HeaderAlias::stat("-OR", StatField::OReb),
    HeaderAlias::stat("DReb", StatField::DReb),
    HeaderAlias::stat("-DR", StatField::DReb),
    HeaderAlias::stat("Rebs", StatField::Rebs),
    HeaderAlias::stat("REB", StatField::Rebs),
    // Playmaking and defense
    HeaderAlias::stat("Ast", StatField::Ast),
    HeaderAlias::stat("-AST", StatField::Ast),
    HeaderAlias::stat("TO", StatField::Turnovers),
    HeaderAlias::stat("-TO", StatField::Turnovers),
    HeaderAlias::stat("Stl", StatField::Stl),
    HeaderAlias::stat("-ST", StatField::Stl),
    HeaderAlias::stat("Blk", StatField::Blk),
    HeaderAlias::stat("-BLK", StatField::Blk),
    HeaderAlias::stat("Blk Against", StatField::Blka),
    HeaderAlias::stat("-BLKA", StatField::Blka),
    HeaderAlias::stat("Foul", StatField::Foul),
    HeaderAlias::stat("-PF", StatField::Foul),
    HeaderAlias::stat("Fouled", StatField::Fouled),
    HeaderAlias::stat("-DF", StatField::Fouled),
    // Composite
    HeaderAlias::stat("VPS", StatField::Vps),
    HeaderAlias::stat("+/-", StatField::PlusMinus),
    HeaderAlias::stat("Effic", StatField::Effic),
];

static LOOKUP: Lazy<HashMap<String, Column>> = Lazy::new(|| {
    HEADER_ALIASES
        .iter()
        .map(|alias| (normalize_header(alias.header), alias.column))
        .collect()
});

/// Lowercase and drop whitespace, dots, commas and underscores.
///
/// `%`, `+`, `/`, `-` and digits are kept: they tell `2P` from `-2P%`.
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '.' | ',' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Map a raw header cell to its column, if the spelling is known
pub fn lookup_header(header: &str) -> Option<Column> {
    LOOKUP.get(&normalize_header(header)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_never_collide() {
        let mut seen: HashMap<String, Column> = HashMap::new();
        for alias in HEADER_ALIASES {
            let key = normalize_header(alias.header);
            if let Some(previous) = seen.insert(key.clone(), alias.column) {
                assert_eq!(previous, alias.column, "alias {:?} is ambiguous", key);
            }
        }
    }

    #[test]
    fn test_jersey_number_spellings() {
        for header in ["No.", "N.", "N,", "no", " NO. "] {
            assert_eq!(lookup_header(header), Some(Column::PlayerNumber), "{}", header);
        }
    }

    #[test]
    fn test_case_and_punctuation_tolerance() {
        assert_eq!(lookup_header("pts"), Some(Column::Stat(StatField::Pts)));
        assert_eq!(lookup_header("FG%"), lookup_header("fg %"));
        assert_eq!(lookup_header("paint pt"), Some(Column::Stat(StatField::PaintPt)));
        assert_eq!(lookup_header("-2p%"), Some(Column::Stat(StatField::TwoPtPct)));
        assert_ne!(lookup_header("-2P"), lookup_header("-2P%"));
    }

    #[test]
    fn test_unknown_header() {
        assert_eq!(lookup_header("Shoe size"), None);
        assert_eq!(lookup_header(""), None);
    }
}
