//! Account lookup model.

use serde::{Deserialize, Serialize};

/// Player account as returned by `/valorant/v1/account/{name}/{tag}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    /// Immutable account identifier
    pub puuid: Option<String>,

    pub region: Option<String>,

    pub account_level: Option<i64>,

    pub name: Option<String>,

    pub tag: Option<String>,

    pub card: Option<PlayerCard>,

    pub last_update: Option<String>,
}

/// Player card artwork.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerCard {
    pub id: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
    pub wide: Option<String>,
}
