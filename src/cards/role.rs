//! Secret roles.

use serde::{Deserialize, Serialize};

/// A player role.
///
/// Declaration order is the fixed role priority: when fewer than five
/// players start a game, only the first `n` roles are dealt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Supreme authority. Always revealed, and takes the first turn.
    TheCrown,
    /// Chief demonic antagonist. Must be the last one standing.
    DemonLord,
    /// Wins as soon as The Crown falls.
    Usurper,
    /// Loyalist. Shares The Crown's victory but has none of its own.
    Knight,
    /// Minor antagonist. Wins once The Crown and the Knight are gone.
    Cultist,
}

impl Role {
    /// All roles in priority order.
    pub const ALL: [Role; 5] = [
        Role::TheCrown,
        Role::DemonLord,
        Role::Usurper,
        Role::Knight,
        Role::Cultist,
    ];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::TheCrown => "The Crown",
            Role::DemonLord => "Demon Lord",
            Role::Usurper => "Usurper",
            Role::Knight => "Knight",
            Role::Cultist => "Cultist",
        };
        f.write_str(name)
    }
}
