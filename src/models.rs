// models.rs
// Domain models consumed by the use case and the presenter.

/// A Pokémon as it appears in a list, before its details are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    id: String,
    name: String,
    avatar_url: String,
}

impl Pokemon {
    pub fn new(id: impl Into<String>, name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar_url: avatar_url.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// The name with its first character upper-cased, e.g. `pikachu` -> `Pikachu`.
    pub fn name_formatted(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PokemonDetails {
    id: String,
    /// In tenths of a kilogram, as served by the API.
    pub weight: i32,
    pub base_xp: i32,
    pub types: Vec<String>,
    pub abilities: Vec<PokemonAbility>,
    pub stats: Vec<PokemonStat>,
}

impl PokemonDetails {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    // A missing id leaves the current one in place
    pub fn set_id(&mut self, id: Option<String>) {
        if let Some(id) = id {
            self.id = id;
        }
    }

    /// Weight in kilograms with at most one decimal digit and `.` as the separator.
    pub fn weight_kg(&self) -> String {
        format_weight_kg(self.weight)
    }
}

impl PartialEq for PokemonDetails {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PokemonDetails {}

pub fn format_weight_kg(weight: i32) -> String {
    let sign = if weight < 0 { "-" } else { "" };
    let abs = weight.unsigned_abs();
    let (whole, tenths) = (abs / 10, abs % 10);

    if tenths == 0 {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, tenths)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonAbility {
    pub name: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonStat {
    pub name: String,
    pub effort: i32,
    pub base: i32,
}

/// Keeps track of a pagination url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    url: Option<String>,
}

impl Link {
    pub fn transform(url: Option<&str>) -> Self {
        Self {
            url: url.map(str::to_string),
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty())
    }
}
