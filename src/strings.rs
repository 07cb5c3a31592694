// Keys of the display strings a details screen has to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKey {
    // Takes the formatted Pokémon name
    PokemonDetails,
    Kg,
    Xp,
    Hidden,
    Visible,
    Effort,
    BaseStat,
    LegWeight,
    LegBaseXp,
    LegTypes,
    LegAbilities,
    LegStats,
}

/// Default English strings.
pub fn english(key: StringKey) -> String {
    let text = match key {
        StringKey::PokemonDetails => "Details",
        StringKey::Kg => " kg",
        StringKey::Xp => " xp",
        StringKey::Hidden => "Hidden",
        StringKey::Visible => "Visible",
        StringKey::Effort => "Effort",
        StringKey::BaseStat => "Base",
        StringKey::LegWeight => "The weight of this Pokémon in kilograms.",
        StringKey::LegBaseXp => "The base experience gained for defeating this Pokémon.",
        StringKey::LegTypes => "The types this Pokémon has, in slot order.",
        StringKey::LegAbilities => {
            "The abilities this Pokémon may have. Hidden abilities are only found in special cases."
        }
        StringKey::LegStats => {
            "The base value of each stat and the effort points gained for defeating this Pokémon."
        }
    };
    text.to_string()
}

pub fn english_with(key: StringKey, arg: &str) -> String {
    match key {
        StringKey::PokemonDetails => format!("{} Details", arg),
        other => english(other),
    }
}
