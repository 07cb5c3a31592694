use pokemon_details::{
    Config, EventBus, FilePreferences, HttpPokemonRepository, InMemoryDetailsCache, Pokemon,
    PokemonDetailsError, PokemonDetailsPresenter, PreferencesUseCase, Screen,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LEGEND_SEEN_PREF: &str = "legend_seen";

// Renders the details screen as plain text on stdout
struct ConsoleScreen;

impl Screen for ConsoleScreen {
    fn initialize_ui(&mut self) {
        println!("==============================");
    }

    fn set_toolbar_title(&mut self, text: &str) {
        println!("{}", text);
        println!("==============================");
    }

    fn set_avatar(&mut self, url: &str) {
        println!("Avatar: {}", url);
    }

    fn set_name(&mut self, text: &str) {
        println!("Name: {}", text);
    }

    fn show_loading(&mut self) {
        println!("Loading...");
    }

    fn hide_loading(&mut self) {}

    fn show_details_panel(&mut self) {
        println!("------------------------------");
    }

    fn show_name_and_avatar_panel(&mut self) {
        println!("------------------------------");
    }

    fn set_weight(&mut self, text: &str) {
        println!("Weight: {}", text);
    }

    fn set_base_xp(&mut self, text: &str) {
        println!("Base XP: {}", text);
    }

    fn set_types(&mut self, text: &str) {
        println!("Types:\n{}", text);
    }

    fn set_abilities(&mut self, text: &str) {
        println!("Abilities:\n{}", text);
    }

    fn set_stats(&mut self, text: &str) {
        println!("Stats:\n{}", text);
    }

    fn show_legend(&mut self, text: &str) {
        println!("({})", text);
    }

    fn show_no_internet_error(&mut self) {
        println!("No internet connection.");
    }

    fn show_error(&mut self, error: &PokemonDetailsError) {
        println!("Something went wrong: {}", error);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let id = match std::env::args().nth(1) {
        Some(id) => id,
        None => rand::random_range(1..=1025u32).to_string(),
    };
    let name = std::env::args().nth(2).unwrap_or_else(|| format!("pokemon #{}", id));

    let repository = match HttpPokemonRepository::new(&config.pokemon) {
        Ok(repository) => repository,
        Err(e) => {
            tracing::error!("Failed to create repository: {}", e);
            std::process::exit(1);
        }
    };
    let preferences = match FilePreferences::open(&config.preferences.path) {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::error!("Failed to open preferences: {}", e);
            std::process::exit(1);
        }
    };

    let mut presenter = PokemonDetailsPresenter::new(
        ConsoleScreen,
        Arc::new(repository),
        Arc::new(InMemoryDetailsCache::new()),
        EventBus::new(),
        PreferencesUseCase::new(Arc::new(preferences)),
    );

    let pokemon = Pokemon::new(id.as_str(), name, config.avatar_url(&id));
    presenter.initialize(&pokemon);
    presenter.pump().await;

    // The legends are shown once per preferences file
    if !presenter.shared_preference_bool(LEGEND_SEEN_PREF) {
        presenter.on_weight_interacted();
        presenter.on_base_xp_interacted();
        presenter.on_types_interacted();
        presenter.on_abilities_interacted();
        presenter.on_stats_interacted();
        presenter.store_shared_preference(LEGEND_SEEN_PREF, true);
    }

    tracing::info!("Presenter finished in state {:?}", presenter.state());
    presenter.destroy();
}
