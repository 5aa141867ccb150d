//! Troop summary text
//!
//! Turns an encounter reference into the overlay's text:
//!
//! ```text
//! Slime (10)
//! Bat (8)
//! 18 exp / 8G
//! ```
//!
//! Member lines follow troop declaration order, one per member instance.
//! Totals always cover every member, even when member lines are hidden.

use crate::config::DisplayOptions;
use crate::data::{Database, EncounterReference, EnemyId, TroopId};

/// Lookup failures while resolving a troop
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown troop id {0}")]
    UnknownTroop(TroopId),

    #[error("troop {troop_id} references unknown enemy id {enemy_id}")]
    UnknownEnemy { troop_id: TroopId, enemy_id: EnemyId },
}

/// Stats of one enemy instance in a troop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TroopMember {
    pub battler_name: String,
    pub exp: u32,
    pub gold: u32,
}

/// A troop's members and reward totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TroopSummary {
    pub members: Vec<TroopMember>,
    pub total_exp: u64,
    pub total_gold: u64,
}

impl TroopSummary {
    pub fn from_members(members: Vec<TroopMember>) -> Self {
        let total_exp = members.iter().map(|m| u64::from(m.exp)).sum();
        let total_gold = members.iter().map(|m| u64::from(m.gold)).sum();
        TroopSummary {
            members,
            total_exp,
            total_gold,
        }
    }

    /// Collects the members of a troop from the database
    pub fn collect(troop_id: TroopId, db: &Database) -> Result<Self, ResolveError> {
        let troop = db.troop(troop_id).ok_or(ResolveError::UnknownTroop(troop_id))?;

        let members = troop
            .members
            .iter()
            .map(|member| {
                db.enemy(member.enemy_id)
                    .map(|enemy| TroopMember {
                        battler_name: enemy.battler_name.clone(),
                        exp: enemy.exp,
                        gold: enemy.gold,
                    })
                    .ok_or(ResolveError::UnknownEnemy {
                        troop_id,
                        enemy_id: member.enemy_id,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_members(members))
    }

    /// Formats the summary. Names and the currency unit pass through verbatim.
    pub fn render(&self, options: &DisplayOptions, currency_unit: &str) -> String {
        if options.shows_nothing() {
            return String::new();
        }

        let mut lines: Vec<String> = Vec::new();

        if options.show_enemies {
            lines.extend(self.members.iter().map(|member| {
                if options.show_exp {
                    format!("{} ({})", member.battler_name, member.exp)
                } else {
                    member.battler_name.clone()
                }
            }));
        }

        let totals = match (options.show_exp, options.show_gold) {
            (true, true) => Some(format!(
                "{} exp / {}{}",
                self.total_exp, self.total_gold, currency_unit
            )),
            (true, false) => Some(format!("{} exp", self.total_exp)),
            (false, true) => Some(format!("{}{}", self.total_gold, currency_unit)),
            (false, false) => None,
        };
        lines.extend(totals);

        lines.join("\n")
    }
}

/// Resolves an encounter into overlay text
pub fn resolve(
    reference: &EncounterReference,
    db: &Database,
    options: &DisplayOptions,
) -> Result<String, ResolveError> {
    let summary = TroopSummary::collect(reference.troop_id, db)?;
    Ok(summary.render(options, db.currency_unit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Enemy, Troop};

    fn test_db() -> Database {
        let mut db = Database::new("G");
        db.insert_enemy(Enemy::new(1, "Slime", 10, 5));
        db.insert_enemy(Enemy::new(2, "Bat", 8, 3));
        db.insert_troop(Troop::new(3, "Slime & Bat", &[1, 2]));
        db.insert_troop(Troop::new(4, "Slimes", &[1, 1, 1]));
        db.insert_troop(Troop::new(5, "Nobody", &[]));
        db.insert_troop(Troop::new(6, "Ghost", &[1, 42]));
        db
    }

    fn options(show_enemies: bool, show_exp: bool, show_gold: bool) -> DisplayOptions {
        DisplayOptions {
            always_displayed: false,
            show_enemies,
            show_exp,
            show_gold,
        }
    }

    #[test]
    fn test_all_flags_on() {
        let text = resolve(&EncounterReference::new(3), &test_db(), &options(true, true, true));
        assert_eq!(text.unwrap(), "Slime (10)\nBat (8)\n18 exp / 8G");
    }

    #[test]
    fn test_gold_only() {
        let text = resolve(&EncounterReference::new(3), &test_db(), &options(false, false, true));
        assert_eq!(text.unwrap(), "8G");
    }

    #[test]
    fn test_exp_only() {
        let text = resolve(&EncounterReference::new(3), &test_db(), &options(false, true, false));
        assert_eq!(text.unwrap(), "18 exp");
    }

    #[test]
    fn test_enemies_without_exp_suffix() {
        let text = resolve(&EncounterReference::new(3), &test_db(), &options(true, false, true));
        assert_eq!(text.unwrap(), "Slime\nBat\n8G");
    }

    #[test]
    fn test_enemies_only_has_no_summary_line() {
        let text = resolve(&EncounterReference::new(3), &test_db(), &options(true, false, false));
        assert_eq!(text.unwrap(), "Slime\nBat");
    }

    #[test]
    fn test_enemies_hidden_keeps_both_totals() {
        let text = resolve(&EncounterReference::new(3), &test_db(), &options(false, true, true));
        assert_eq!(text.unwrap(), "18 exp / 8G");
    }

    #[test]
    fn test_all_flags_off_is_empty() {
        let db = test_db();
        for troop_id in [3, 4, 5] {
            let text = resolve(&EncounterReference::new(troop_id), &db, &options(false, false, false));
            assert_eq!(text.unwrap(), "");
        }
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let text = resolve(&EncounterReference::new(4), &test_db(), &options(true, true, true));
        assert_eq!(text.unwrap(), "Slime (10)\nSlime (10)\nSlime (10)\n30 exp / 15G");
    }

    #[test]
    fn test_line_count_is_members_plus_one() {
        let db = test_db();
        for (troop_id, members) in [(3, 2), (4, 3)] {
            let text = resolve(&EncounterReference::new(troop_id), &db, &options(true, true, true)).unwrap();
            let lines: Vec<_> = text.lines().collect();
            assert_eq!(lines.len(), members + 1);
            assert!(lines.iter().all(|line| !line.is_empty()));
        }
    }

    #[test]
    fn test_empty_troop_has_zero_totals() {
        let text = resolve(&EncounterReference::new(5), &test_db(), &options(true, true, true));
        assert_eq!(text.unwrap(), "0 exp / 0G");
    }

    #[test]
    fn test_unknown_troop() {
        let result = resolve(&EncounterReference::new(99), &test_db(), &DisplayOptions::default());
        assert_eq!(result, Err(ResolveError::UnknownTroop(99)));
    }

    #[test]
    fn test_unknown_enemy() {
        let result = resolve(&EncounterReference::new(6), &test_db(), &DisplayOptions::default());
        assert_eq!(
            result,
            Err(ResolveError::UnknownEnemy {
                troop_id: 6,
                enemy_id: 42
            })
        );
    }

    #[test]
    fn test_escape_codes_pass_through() {
        let summary = TroopSummary::from_members(vec![TroopMember {
            battler_name: "\\C[2]King".to_string(),
            exp: 1,
            gold: 2,
        }]);
        assert_eq!(
            summary.render(&options(true, true, true), "\\I[314]"),
            "\\C[2]King (1)\n1 exp / 2\\I[314]"
        );
    }
}
