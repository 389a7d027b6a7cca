//! Static preflop strength table and the action it suggests.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::classify::HandClass;
use crate::cards::Card;
use crate::error::Result;

/// Ranking given to hands outside the table.
pub const UNRANKED: u16 = 100;

/// Strongest starting hands, best first.
const RANKINGS: [(&str, u16); 50] = [
    ("AA", 1), ("KK", 2), ("QQ", 3), ("JJ", 4), ("AKs", 5),
    ("AKo", 6), ("AQs", 7), ("TT", 8), ("AJs", 9), ("KQs", 10),
    ("99", 11), ("ATs", 12), ("AQo", 13), ("KJs", 14), ("QJs", 15),
    ("88", 16), ("KTs", 17), ("AJo", 18), ("QTs", 19), ("JTs", 20),
    ("77", 21), ("A9s", 22), ("ATo", 23), ("KQo", 24), ("K9s", 25),
    ("66", 26), ("T9s", 27), ("Q9s", 28), ("J9s", 29), ("A8s", 30),
    ("55", 31), ("KJo", 32), ("A5s", 33), ("A7s", 34), ("A4s", 35),
    ("44", 36), ("A6s", 37), ("A3s", 38), ("K8s", 39), ("98s", 40),
    ("33", 41), ("QJo", 42), ("A2s", 43), ("T8s", 44), ("Q8s", 45),
    ("22", 46), ("K7s", 47), ("KTo", 48), ("87s", 49), ("J8s", 50),
];

static GTO_RANKINGS: Lazy<FxHashMap<&'static str, u16>> =
    Lazy::new(|| RANKINGS.iter().copied().collect());

/// Ranking of a category label, or [`UNRANKED`].
pub fn ranking(category: &str) -> u16 {
    GTO_RANKINGS.get(category).copied().unwrap_or(UNRANKED)
}

/// Suggested preflop action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Rankings 1-10.
    #[serde(rename = "Strong Raise")]
    StrongRaise,
    /// Rankings 11-25.
    #[serde(rename = "Open Raise")]
    OpenRaise,
    /// Rankings 26-50.
    Call,
    /// Everything else.
    Fold,
}

impl Action {
    /// Action for a table ranking.
    pub fn for_ranking(ranking: u16) -> Self {
        match ranking {
            0..=10 => Action::StrongRaise,
            11..=25 => Action::OpenRaise,
            26..=50 => Action::Call,
            _ => Action::Fold,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Action::StrongRaise => "Strong Raise",
            Action::OpenRaise => "Open Raise",
            Action::Call => "Call",
            Action::Fold => "Fold",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category, table ranking and suggested action for a starting hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtoAdvice {
    /// Category label such as "AKs".
    pub category: String,
    /// Table ranking, [`UNRANKED`] when absent.
    pub ranking: u16,
    /// Suggested action.
    pub action: Action,
}

impl GtoAdvice {
    /// Advice for a hand class.
    pub fn for_class(class: HandClass) -> Self {
        let category = class.to_string();
        let ranking = ranking(&category);
        Self {
            category,
            ranking,
            action: Action::for_ranking(ranking),
        }
    }
}

impl fmt::Display for GtoAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ranking == UNRANKED {
            write!(f, "{} (unranked): {}", self.category, self.action)
        } else {
            write!(f, "{} (#{}): {}", self.category, self.ranking, self.action)
        }
    }
}

/// Advice for two hole cards.
pub fn gto_advice(hero: &[Card]) -> Result<GtoAdvice> {
    HandClass::from_cards(hero).map(GtoAdvice::for_class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::error::EquityError;

    fn advice(s: &str) -> GtoAdvice {
        gto_advice(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn test_table_is_consistent() {
        assert_eq!(GTO_RANKINGS.len(), 50);
        let mut ranks: Vec<u16> = RANKINGS.iter().map(|&(_, r)| r).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=50).collect::<Vec<u16>>());

        // Every label is what `classify` produces for some pair of cards.
        for (label, _) in RANKINGS {
            let ranks: Vec<char> = label.chars().take(2).collect();
            let second_suit = if label.ends_with('s') { 's' } else { 'h' };
            let codes = format!("{}s{}{}", ranks[0], ranks[1], second_suit);
            let cards = parse_cards(&codes).unwrap();
            assert_eq!(
                HandClass::from_cards(&cards).unwrap().to_string(),
                label,
                "{} is not a hand class label",
                label
            );
        }
    }

    #[test]
    fn test_known_hands() {
        let aa = advice("AsAh");
        assert_eq!(aa.category, "AA");
        assert_eq!(aa.ranking, 1);
        assert_eq!(aa.action, Action::StrongRaise);

        let ako = advice("KdAc");
        assert_eq!(ako.category, "AKo");
        assert_eq!(ako.ranking, 6);

        assert_eq!(advice("9c9d").action, Action::OpenRaise);
        assert_eq!(advice("Jh8h").ranking, 50);
        assert_eq!(advice("Jh8h").action, Action::Call);
    }

    #[test]
    fn test_unranked_hand_folds() {
        let trash = advice("7c2d");
        assert_eq!(trash.category, "72o");
        assert_eq!(trash.ranking, UNRANKED);
        assert_eq!(trash.action, Action::Fold);

        // Offsuit version of a ranked suited hand
        assert_eq!(advice("Jh8c").ranking, UNRANKED);
    }

    #[test]
    fn test_action_thresholds() {
        assert_eq!(Action::for_ranking(10), Action::StrongRaise);
        assert_eq!(Action::for_ranking(11), Action::OpenRaise);
        assert_eq!(Action::for_ranking(25), Action::OpenRaise);
        assert_eq!(Action::for_ranking(26), Action::Call);
        assert_eq!(Action::for_ranking(50), Action::Call);
        assert_eq!(Action::for_ranking(51), Action::Fold);
        assert_eq!(Action::for_ranking(UNRANKED), Action::Fold);
    }

    #[test]
    fn test_invalid_hand() {
        let cards = parse_cards("AsAh").unwrap();
        assert!(matches!(gto_advice(&cards[..1]), Err(EquityError::Validation(_))));
    }

    #[test]
    fn test_advice_json() {
        let json = serde_json::to_string(&advice("AhKh")).unwrap();
        assert_eq!(json, r#"{"category":"AKs","ranking":5,"action":"Strong Raise"}"#);
    }
}
