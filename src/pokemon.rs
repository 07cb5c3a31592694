// pokemon.rs
// Wire shapes of the PokeAPI `/pokemon/{id}` document and their mapping into domain models.

use crate::error::PokemonDetailsError;
use crate::models::{PokemonAbility, PokemonDetails, PokemonStat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonResponse {
    pub id: i32,
    pub weight: i32,
    pub base_experience: Option<i32>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub types: Vec<Type>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NamedAPIResource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Ability {
    pub ability: Option<NamedAPIResource>,
    pub is_hidden: bool,
    pub slot: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Stat {
    pub stat: Option<NamedAPIResource>,
    pub effort: i32,
    pub base_stat: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Type {
    pub slot: i32,
    pub r#type: Option<NamedAPIResource>,
}

impl PokemonResponse {
    /// Maps the response into [`PokemonDetails`], keeping the order the API returned.
    ///
    /// A list entry without its nested reference is treated as a malformed response.
    pub fn into_details(self) -> Result<PokemonDetails, PokemonDetailsError> {
        let mut details = PokemonDetails::new(self.id.to_string());
        details.weight = self.weight;
        details.base_xp = self.base_experience.unwrap_or_default();

        details.types = self
            .types
            .into_iter()
            .map(|t| {
                t.r#type.map(|detail| detail.name).ok_or_else(|| {
                    PokemonDetailsError::other(format!("type in slot {} has no detail", t.slot))
                })
            })
            .collect::<Result<_, _>>()?;

        details.abilities = self
            .abilities
            .into_iter()
            .map(|a| {
                let is_hidden = a.is_hidden;
                a.ability
                    .map(|detail| PokemonAbility {
                        name: detail.name,
                        hidden: is_hidden,
                    })
                    .ok_or_else(|| {
                        PokemonDetailsError::other(format!("ability in slot {} has no detail", a.slot))
                    })
            })
            .collect::<Result<_, _>>()?;

        details.stats = self
            .stats
            .into_iter()
            .map(|s| {
                s.stat
                    .map(|detail| PokemonStat {
                        name: detail.name,
                        effort: s.effort,
                        base: s.base_stat,
                    })
                    .ok_or_else(|| PokemonDetailsError::other("stat has no detail"))
            })
            .collect::<Result<_, _>>()?;

        Ok(details)
    }
}
