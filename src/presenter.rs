use crate::bus::{DetailsEvent, EventBus, Subscription};
use crate::cache::DetailsCache;
use crate::error::PokemonDetailsError;
use crate::models::{Pokemon, PokemonAbility, PokemonDetails, PokemonStat};
use crate::preferences::PreferencesUseCase;
use crate::repository::PokemonRepository;
use crate::strings::{self, StringKey};
use crate::use_case::GetPokemonDetailsUseCase;
use std::sync::Arc;

/// Passive view driven by [`PokemonDetailsPresenter`].
pub trait Screen {
    fn initialize_ui(&mut self);
    fn set_toolbar_title(&mut self, text: &str);
    fn set_avatar(&mut self, url: &str);
    fn set_name(&mut self, text: &str);
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn show_details_panel(&mut self);
    fn show_name_and_avatar_panel(&mut self);
    fn set_weight(&mut self, text: &str);
    fn set_base_xp(&mut self, text: &str);
    fn set_types(&mut self, text: &str);
    fn set_abilities(&mut self, text: &str);
    fn set_stats(&mut self, text: &str);
    fn show_legend(&mut self, text: &str);
    fn show_no_internet_error(&mut self);
    fn show_error(&mut self, error: &PokemonDetailsError);

    fn string(&self, key: StringKey) -> String {
        strings::english(key)
    }

    fn string_with(&self, key: StringKey, arg: &str) -> String {
        strings::english_with(key, arg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    Created,
    Initialized,
    DetailsShown,
    ErrorShown,
    Destroyed,
}

pub struct PokemonDetailsPresenter<S: Screen> {
    screen: S,
    repository: Arc<dyn PokemonRepository>,
    cache: Arc<dyn DetailsCache>,
    bus: EventBus,
    preferences: PreferencesUseCase,
    subscription: Option<Subscription>,
    state: PresenterState,
}

impl<S: Screen> PokemonDetailsPresenter<S> {
    pub fn new(
        screen: S,
        repository: Arc<dyn PokemonRepository>,
        cache: Arc<dyn DetailsCache>,
        bus: EventBus,
        preferences: PreferencesUseCase,
    ) -> Self {
        Self {
            screen,
            repository,
            cache,
            bus,
            preferences,
            subscription: None,
            state: PresenterState::Created,
        }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn state(&self) -> PresenterState {
        self.state
    }

    /// Shows what is known about `pokemon` right away and starts fetching the rest.
    ///
    /// The fetch is spawned on the current tokio runtime; without one the screen gets an error.
    pub fn initialize(&mut self, pokemon: &Pokemon) {
        if self.state == PresenterState::Destroyed {
            tracing::warn!("Ignoring initialize for {} after destroy", pokemon.id());
            return;
        }

        self.screen.initialize_ui();
        let title = self
            .screen
            .string_with(StringKey::PokemonDetails, &pokemon.name_formatted());
        self.screen.set_toolbar_title(&title);

        self.register();
        self.state = PresenterState::Initialized;

        self.fill_pokemon(pokemon);
        self.get_details(pokemon);
    }

    pub fn destroy(&mut self) {
        self.unregister();
        self.state = PresenterState::Destroyed;
    }

    pub fn on_weight_interacted(&mut self) {
        self.show_legend(StringKey::LegWeight);
    }

    pub fn on_base_xp_interacted(&mut self) {
        self.show_legend(StringKey::LegBaseXp);
    }

    pub fn on_types_interacted(&mut self) {
        self.show_legend(StringKey::LegTypes);
    }

    pub fn on_abilities_interacted(&mut self) {
        self.show_legend(StringKey::LegAbilities);
    }

    pub fn on_stats_interacted(&mut self) {
        self.show_legend(StringKey::LegStats);
    }

    fn show_legend(&mut self, key: StringKey) {
        let legend = self.screen.string(key);
        self.screen.show_legend(&legend);
    }

    fn get_details(&mut self, pokemon: &Pokemon) {
        self.screen.show_loading();

        // A cached result comes back through the bus like a fetched one
        GetPokemonDetailsUseCase::new(
            pokemon.id(),
            self.repository.clone(),
            self.cache.clone(),
            self.bus.clone(),
        )
        .execute();
    }

    /// Waits for the next bus event and dispatches it.
    ///
    /// Returns `false` once the presenter is no longer subscribed.
    pub async fn pump(&mut self) -> bool {
        let event = match self.subscription.as_mut() {
            Some(subscription) => subscription.recv().await,
            None => return false,
        };
        match event {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Dispatches the events that are already queued, without waiting.
    pub fn drain(&mut self) -> usize {
        let mut dispatched = 0;
        while let Some(event) = self.subscription.as_mut().and_then(Subscription::try_recv) {
            self.dispatch(event);
            dispatched += 1;
        }
        dispatched
    }

    fn dispatch(&mut self, event: DetailsEvent) {
        match event {
            DetailsEvent::Received(details) => self.on_pokemon_details_received(&details),
            DetailsEvent::Error(error) => self.on_pokemon_details_error(&error),
        }
    }

    pub fn on_pokemon_details_received(&mut self, details: &PokemonDetails) {
        if !self.is_listening() {
            tracing::debug!("Ignoring details for {} in state {:?}", details.id(), self.state);
            return;
        }

        self.screen.hide_loading();
        self.screen.show_details_panel();
        self.fill_details(details);
        self.state = PresenterState::DetailsShown;
    }

    pub fn on_pokemon_details_error(&mut self, error: &PokemonDetailsError) {
        if !self.is_listening() {
            tracing::debug!("Ignoring error in state {:?}: {}", self.state, error);
            return;
        }

        self.screen.hide_loading();
        self.screen.show_name_and_avatar_panel();

        if error.is_network_error() {
            self.screen.show_no_internet_error();
        } else {
            self.screen.show_error(error);
        }
        self.state = PresenterState::ErrorShown;
    }

    // Only an initialized, not yet destroyed presenter reacts to fetch results
    fn is_listening(&self) -> bool {
        !matches!(
            self.state,
            PresenterState::Created | PresenterState::Destroyed
        )
    }

    fn fill_pokemon(&mut self, pokemon: &Pokemon) {
        self.screen.set_avatar(pokemon.avatar_url());
        self.screen.set_name(&pokemon.name_formatted());
    }

    fn fill_details(&mut self, details: &PokemonDetails) {
        let weight = format!("{}{}", details.weight_kg(), self.screen.string(StringKey::Kg));
        self.screen.set_weight(&weight);

        let base_xp = format!("{}{}", details.base_xp, self.screen.string(StringKey::Xp));
        self.screen.set_base_xp(&base_xp);

        self.screen.set_types(&format_types(&details.types));

        let abilities = format_abilities(
            &details.abilities,
            &self.screen.string(StringKey::Hidden),
            &self.screen.string(StringKey::Visible),
        );
        self.screen.set_abilities(&abilities);

        let stats = format_stats(
            &details.stats,
            &self.screen.string(StringKey::Effort),
            &self.screen.string(StringKey::BaseStat),
        );
        self.screen.set_stats(&stats);
    }

    pub fn store_shared_preference(&self, key: &str, value: bool) {
        self.preferences.save_pref(key, value);
    }

    pub fn shared_preference_bool(&self, key: &str) -> bool {
        self.preferences.get_boolean_pref(key)
    }

    // Registration problems are logged and never reach the caller
    fn register(&mut self) {
        if self.subscription.is_some() {
            tracing::warn!("Presenter already registered on the bus");
            return;
        }
        match self.bus.register() {
            Ok(subscription) => self.subscription = Some(subscription),
            Err(e) => tracing::warn!("Failed to register presenter on the bus: {}", e),
        }
    }

    fn unregister(&mut self) {
        match self.subscription.take() {
            Some(subscription) => {
                if let Err(e) = self.bus.unregister(subscription.id()) {
                    tracing::warn!("Failed to unregister presenter from the bus: {}", e);
                }
            }
            None => tracing::warn!("Presenter is not registered on the bus"),
        }
    }
}

/// One type per line.
pub fn format_types(types: &[String]) -> String {
    types.join("\n")
}

/// One `"{name} - {label}"` line per ability.
pub fn format_abilities(abilities: &[PokemonAbility], hidden: &str, visible: &str) -> String {
    abilities
        .iter()
        .map(|ability| {
            let visibility = if ability.hidden { hidden } else { visible };
            format!("{} - {}", ability.name, visibility)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_stats(stats: &[PokemonStat], effort: &str, base: &str) -> String {
    stats
        .iter()
        .map(|stat| {
            format!(
                "{}\n  • {}  {}\n  • {}  {}",
                stat.name, effort, stat.effort, base, stat.base
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryDetailsCache;
    use crate::preferences::InMemoryPreferences;
    use crate::use_case::tests::StubRepository;

    #[derive(Default)]
    struct RecordingScreen {
        calls: Vec<String>,
    }

    impl RecordingScreen {
        fn has(&self, call: &str) -> bool {
            self.calls.iter().any(|c| c == call)
        }
    }

    impl Screen for RecordingScreen {
        fn initialize_ui(&mut self) {
            self.calls.push("initialize_ui".to_string());
        }
        fn set_toolbar_title(&mut self, text: &str) {
            self.calls.push(format!("toolbar_title:{}", text));
        }
        fn set_avatar(&mut self, url: &str) {
            self.calls.push(format!("avatar:{}", url));
        }
        fn set_name(&mut self, text: &str) {
            self.calls.push(format!("name:{}", text));
        }
        fn show_loading(&mut self) {
            self.calls.push("show_loading".to_string());
        }
        fn hide_loading(&mut self) {
            self.calls.push("hide_loading".to_string());
        }
        fn show_details_panel(&mut self) {
            self.calls.push("show_details_panel".to_string());
        }
        fn show_name_and_avatar_panel(&mut self) {
            self.calls.push("show_name_and_avatar_panel".to_string());
        }
        fn set_weight(&mut self, text: &str) {
            self.calls.push(format!("weight:{}", text));
        }
        fn set_base_xp(&mut self, text: &str) {
            self.calls.push(format!("base_xp:{}", text));
        }
        fn set_types(&mut self, text: &str) {
            self.calls.push(format!("types:{}", text));
        }
        fn set_abilities(&mut self, text: &str) {
            self.calls.push(format!("abilities:{}", text));
        }
        fn set_stats(&mut self, text: &str) {
            self.calls.push(format!("stats:{}", text));
        }
        fn show_legend(&mut self, text: &str) {
            self.calls.push(format!("legend:{}", text));
        }
        fn show_no_internet_error(&mut self) {
            self.calls.push("no_internet".to_string());
        }
        fn show_error(&mut self, error: &PokemonDetailsError) {
            self.calls.push(format!("error:{}", error));
        }
    }

    fn charizard() -> PokemonDetails {
        let mut details = PokemonDetails::new("6");
        details.weight = 905;
        details.base_xp = 267;
        details.types = vec!["Fire".to_string(), "Flying".to_string()];
        details.abilities = vec![
            PokemonAbility {
                name: "Blaze".to_string(),
                hidden: false,
            },
            PokemonAbility {
                name: "Solar Power".to_string(),
                hidden: true,
            },
        ];
        details.stats = vec![PokemonStat {
            name: "Speed".to_string(),
            effort: 1,
            base: 70,
        }];
        details
    }

    fn presenter(
        repository: Arc<StubRepository>,
    ) -> PokemonDetailsPresenter<RecordingScreen> {
        PokemonDetailsPresenter::new(
            RecordingScreen::default(),
            repository,
            Arc::new(InMemoryDetailsCache::new()),
            EventBus::new(),
            PreferencesUseCase::new(Arc::new(InMemoryPreferences::new())),
        )
    }

    fn pokemon() -> Pokemon {
        Pokemon::new("6", "charizard", "https://sprites/6.png")
    }

    #[test]
    fn test_format_types() {
        let types = vec!["Fire".to_string(), "Flying".to_string()];
        assert_eq!(format_types(&types), "Fire\nFlying");
        assert_eq!(format_types(&[]), "");
    }

    #[test]
    fn test_format_abilities() {
        let abilities = vec![PokemonAbility {
            name: "Blaze".to_string(),
            hidden: false,
        }];
        assert_eq!(format_abilities(&abilities, "Hidden", "Visible"), "Blaze - Visible");
        assert_eq!(
            format_abilities(&charizard().abilities, "Hidden", "Visible"),
            "Blaze - Visible\nSolar Power - Hidden"
        );
    }

    #[test]
    fn test_format_stats() {
        let stats = vec![
            PokemonStat {
                name: "Speed".to_string(),
                effort: 1,
                base: 70,
            },
            PokemonStat {
                name: "HP".to_string(),
                effort: 0,
                base: 45,
            },
        ];
        assert_eq!(
            format_stats(&stats[..1], "Effort", "Base"),
            "Speed\n  • Effort  1\n  • Base  70"
        );
        assert_eq!(
            format_stats(&stats, "Effort", "Base"),
            "Speed\n  • Effort  1\n  • Base  70\nHP\n  • Effort  0\n  • Base  45"
        );
    }

    #[tokio::test]
    async fn test_initialize_then_details_received() {
        let mut presenter = presenter(StubRepository::returning(Ok(charizard())));
        presenter.initialize(&pokemon());

        assert_eq!(presenter.state(), PresenterState::Initialized);
        assert_eq!(
            presenter.screen().calls[..5],
            [
                "initialize_ui",
                "toolbar_title:Charizard Details",
                "avatar:https://sprites/6.png",
                "name:Charizard",
                "show_loading",
            ]
        );

        assert!(presenter.pump().await);
        assert_eq!(presenter.state(), PresenterState::DetailsShown);

        let screen = presenter.screen();
        assert!(screen.has("hide_loading"));
        assert!(screen.has("show_details_panel"));
        assert!(screen.has("weight:90.5 kg"));
        assert!(screen.has("base_xp:267 xp"));
        assert!(screen.has("types:Fire\nFlying"));
        assert!(screen.has("abilities:Blaze - Visible\nSolar Power - Hidden"));
        assert!(screen.has("stats:Speed\n  • Effort  1\n  • Base  70"));
    }

    #[tokio::test]
    async fn test_network_error_shows_no_internet() {
        let repository = StubRepository::returning(Err(PokemonDetailsError::network("offline")));
        let mut presenter = presenter(repository);
        presenter.initialize(&pokemon());

        assert!(presenter.pump().await);
        assert_eq!(presenter.state(), PresenterState::ErrorShown);
        let screen = presenter.screen();
        assert!(screen.has("show_name_and_avatar_panel"));
        assert!(screen.has("no_internet"));
        assert!(!screen.calls.iter().any(|c| c.starts_with("error:")));
    }

    #[tokio::test]
    async fn test_other_error_shows_generic_error() {
        let repository = StubRepository::returning(Err(PokemonDetailsError::other("status 500")));
        let mut presenter = presenter(repository);
        presenter.initialize(&pokemon());

        assert!(presenter.pump().await);
        let screen = presenter.screen();
        assert!(screen.has("error:Error: status 500"));
        assert!(!screen.has("no_internet"));
    }

    #[tokio::test]
    async fn test_cached_details_skip_repository() {
        let repository = StubRepository::returning(Ok(charizard()));
        let cache = Arc::new(InMemoryDetailsCache::new());
        cache.put("6".to_string(), charizard());
        let mut presenter = PokemonDetailsPresenter::new(
            RecordingScreen::default(),
            repository.clone(),
            cache,
            EventBus::new(),
            PreferencesUseCase::new(Arc::new(InMemoryPreferences::new())),
        );

        presenter.initialize(&pokemon());
        assert!(presenter.pump().await);

        assert_eq!(repository.calls(), 0);
        assert_eq!(presenter.state(), PresenterState::DetailsShown);
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent_and_silences_events() {
        let mut presenter = presenter(StubRepository::returning(Ok(charizard())));
        presenter.initialize(&pokemon());
        presenter.destroy();
        presenter.destroy();

        assert_eq!(presenter.state(), PresenterState::Destroyed);
        assert!(!presenter.pump().await);
        assert_eq!(presenter.drain(), 0);

        presenter.on_pokemon_details_received(&charizard());
        assert!(!presenter.screen().has("show_details_panel"));
        assert_eq!(presenter.state(), PresenterState::Destroyed);
    }

    #[tokio::test]
    async fn test_initialize_after_destroy_is_ignored() {
        let repository = StubRepository::returning(Ok(charizard()));
        let mut presenter = presenter(repository.clone());
        presenter.initialize(&pokemon());
        presenter.destroy();
        let calls_before = presenter.screen().calls.len();

        presenter.initialize(&pokemon());

        assert_eq!(presenter.state(), PresenterState::Destroyed);
        assert_eq!(presenter.screen().calls.len(), calls_before);
        assert!(!presenter.pump().await);
        assert!(!presenter.screen().has("show_details_panel"));
    }

    #[test]
    fn test_results_before_initialize_are_ignored() {
        let mut presenter = presenter(StubRepository::returning(Ok(charizard())));

        presenter.on_pokemon_details_received(&charizard());
        presenter.on_pokemon_details_error(&PokemonDetailsError::network("offline"));

        assert_eq!(presenter.state(), PresenterState::Created);
        assert!(presenter.screen().calls.is_empty());
    }

    #[test]
    fn test_initialize_without_runtime_shows_error() {
        let repository = StubRepository::returning(Ok(charizard()));
        let mut presenter = presenter(repository.clone());

        presenter.initialize(&pokemon());

        assert_eq!(presenter.drain(), 1);
        assert_eq!(presenter.state(), PresenterState::ErrorShown);
        assert_eq!(repository.calls(), 0);
        assert!(presenter.screen().has("show_name_and_avatar_panel"));
        assert!(presenter.screen().calls.iter().any(|c| c.starts_with("error:")));
    }

    #[test]
    fn test_legends() {
        let mut presenter = presenter(StubRepository::returning(Ok(charizard())));
        presenter.on_weight_interacted();
        presenter.on_base_xp_interacted();
        presenter.on_types_interacted();
        presenter.on_abilities_interacted();
        presenter.on_stats_interacted();

        let legends: Vec<_> = presenter
            .screen()
            .calls
            .iter()
            .filter(|c| c.starts_with("legend:"))
            .cloned()
            .collect();
        assert_eq!(legends.len(), 5);
        assert_eq!(
            legends[0],
            format!("legend:{}", strings::english(StringKey::LegWeight))
        );
        assert_eq!(presenter.state(), PresenterState::Created);
    }

    #[test]
    fn test_shared_preferences() {
        let presenter = presenter(StubRepository::returning(Ok(charizard())));
        assert!(!presenter.shared_preference_bool("legend_seen"));
        presenter.store_shared_preference("legend_seen", true);
        assert!(presenter.shared_preference_bool("legend_seen"));
    }
}
