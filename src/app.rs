//! Main application module.
//!
//! The `App` owns the event loop and every side effect: provider fetches,
//! the tick stream task, debounce and poll deadlines, and preference
//! persistence. The store stays a pure reducer; effectful actions are
//! intercepted here before they reach it.

use crate::aggregate;
use crate::api::{
    self, MarketClient, NewsClient, Provider, ReconnectingTickStream, SportsClient, SportsTeam,
    StreamUpdate, SymbolMatch, WsTickSource,
};
use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::refresh::{Domain, PollSchedule};
use crate::search::DebounceController;
use crate::state::{Action, InputMode, Notification, Store, View};
use crate::store::{CredentialStore, PreferenceStore, StoreDir, Team};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action sender handed to spawned fetch tasks.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Configuration.
    config: Config,
    /// Credential persistence.
    credential_store: CredentialStore,
    /// Preference persistence.
    preference_store: PreferenceStore,
    /// Market token held in memory; authoritative even when the
    /// credential persist was swallowed.
    market_token: Option<String>,
    /// Market client; present only when a token is on file.
    market_client: Option<MarketClient>,
    /// News client; shares the market token.
    news_client: Option<NewsClient>,
    /// Sports client; the provider ships a public demo key.
    sports_client: SportsClient,
    /// Debounced symbol search.
    symbol_search: DebounceController<SymbolMatch>,
    /// Debounced team search.
    team_search: DebounceController<SportsTeam>,
    /// Stock quote polling schedule.
    stocks_schedule: PollSchedule,
    /// Sports events polling schedule.
    sports_schedule: PollSchedule,
    /// News headlines polling schedule.
    news_schedule: PollSchedule,
    /// Running tick stream task, if any.
    stream_task: Option<JoinHandle<()>>,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store and load persisted preferences into it
        let mut store = Store::new(action_tx.clone());
        let blob_dir = StoreDir::open()?;
        let credential_store = CredentialStore::new(blob_dir.clone());
        let preference_store = PreferenceStore::new(blob_dir);
        store.stocks.watchlist = preference_store.load_watchlist();
        store.sports.teams = preference_store.load_teams();

        // Create event handler
        let event_handler = EventHandler::new(config.keybindings.clone());

        // Build provider clients; market and news are gated on the token
        let http = api::http_client(config.api.timeout())?;
        let credentials = credential_store.get();
        let market_token = credentials.token(Provider::Market).map(str::to_string);
        store.app.has_market_token = market_token.is_some();

        let market_client = market_token.as_ref().map(|token| {
            MarketClient::new(http.clone(), config.api.market_base_url.clone(), token)
        });
        let news_client = market_token
            .as_ref()
            .map(|token| NewsClient::new(http.clone(), config.api.market_base_url.clone(), token));
        let sports_client = SportsClient::new(
            http,
            config.api.sports_base_url.clone(),
            config.api.sports_api_key.clone(),
        );

        let symbol_search = DebounceController::new(
            Duration::from_millis(config.search.symbol_debounce_ms),
            config.search.symbol_min_len,
        );
        let team_search = DebounceController::new(
            Duration::from_millis(config.search.team_debounce_ms),
            config.search.team_min_len,
        );

        let stocks_schedule =
            PollSchedule::new(Duration::from_secs(config.refresh.stocks_interval_secs));
        let sports_schedule =
            PollSchedule::new(Duration::from_secs(config.refresh.sports_interval_secs));
        let news_schedule =
            PollSchedule::new(Duration::from_secs(config.refresh.news_interval_secs));

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_tx,
            action_rx,
            config,
            credential_store,
            preference_store,
            market_token,
            market_client,
            news_client,
            sports_client,
            symbol_search,
            team_search,
            stocks_schedule,
            sports_schedule,
            news_schedule,
            stream_task: None,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        if self.market_client.is_none() {
            self.store.reduce(Action::ShowNotification(Notification::info(
                "No market API token. Press 't' to set one.",
            )));
        }
        self.restart_stream();

        let mut driver = tokio::time::interval(Duration::from_millis(self.config.ui.tick_rate_ms));

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            self.terminal.draw(|frame| {
                Ui::render(frame, &self.store);
            })?;

            // Handle events, completed fetches, and deadlines
            tokio::select! {
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action)?;
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action)?;
                }

                _ = driver.tick() => {
                    self.drive(Instant::now());
                }
            }

            if self.store.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle an action, intercepting the effectful ones.
    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::InputChar(_) | Action::InputBackspace => {
                self.store.reduce(action);
                self.on_search_input(Instant::now());
            }
            Action::SetInputMode(mode) => {
                if mode == InputMode::Normal {
                    self.symbol_search.clear();
                    self.team_search.clear();
                }
                self.store.reduce(Action::SetInputMode(mode));
            }
            Action::Submit => self.handle_submit(),
            Action::SymbolSearchFinished { seq, matches } => {
                self.on_symbol_search_finished(seq, matches);
            }
            Action::TeamSearchFinished { seq, teams } => {
                self.on_team_search_finished(seq, teams);
            }
            Action::RefreshCurrent => self.retry_current(),
            Action::StocksFetched(quotes) => {
                let ok = !quotes.is_empty() || self.store.stocks.watchlist.is_empty();
                self.store.reduce(Action::StocksFetched(quotes));
                self.stocks_schedule
                    .finish(Instant::now(), ok, self.store.stocks.has_cache());
                self.sync_status(Domain::Stocks);
            }
            Action::SportsFetched(events) => {
                let ok = !events.is_empty() || self.store.sports.teams.is_empty();
                self.store.reduce(Action::SportsFetched(events));
                self.sports_schedule
                    .finish(Instant::now(), ok, self.store.sports.has_cache());
                self.sync_status(Domain::Sports);
            }
            Action::NewsFetched(articles) => {
                let ok = articles.is_some();
                self.store.reduce(Action::NewsFetched(articles));
                self.news_schedule
                    .finish(Instant::now(), ok, self.store.news.has_cache());
                self.sync_status(Domain::News);
            }
            Action::RemoveSelected => self.remove_selected(),
            Action::CycleNewsCategory => {
                self.store.news.cycle_category();
                self.news_schedule.retry();
                self.sync_status(Domain::News);
            }
            other => {
                self.store.reduce(other);
            }
        }

        Ok(())
    }

    /// Advance every deadline-driven state machine. Runs on the driver tick.
    fn drive(&mut self, now: Instant) {
        if let Some(request) = self.symbol_search.poll_fire(now) {
            self.spawn_symbol_search(request.seq, request.query);
        }
        if let Some(request) = self.team_search.poll_fire(now) {
            self.spawn_team_search(request.seq, request.query);
        }

        self.maybe_fetch_stocks(now);
        self.maybe_fetch_sports(now);
        self.maybe_fetch_news(now);
    }

    /// Feed the edited query into the controller for the current view.
    fn on_search_input(&mut self, now: Instant) {
        if self.store.app.input_mode != InputMode::Search {
            return;
        }
        let query = self.store.app.input_buffer.clone();
        match self.store.app.current_view {
            View::Stocks => {
                self.symbol_search.on_input(query, now);
                if self.symbol_search.results().is_empty() {
                    self.store.reduce(Action::SymbolResults(Vec::new()));
                }
            }
            View::Sports => {
                self.team_search.on_input(query, now);
                if self.team_search.results().is_empty() {
                    self.store.reduce(Action::TeamResults(Vec::new()));
                }
            }
            View::News => {}
        }
    }

    fn spawn_symbol_search(&mut self, seq: u64, query: String) {
        let Some(client) = self.market_client.clone() else {
            // No token: settle the request immediately or the controller
            // would wait forever for a completion that never comes.
            self.symbol_search.fail(seq);
            self.store.reduce(Action::ShowNotification(Notification::info(
                "Symbol search needs a market token. Press 't' to set one.",
            )));
            return;
        };
        let max_results = self.config.search.max_results;
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let matches = match client.search_symbols(&query).await {
                Ok(response) => {
                    let mut matches = response.matches;
                    matches.truncate(max_results);
                    Some(matches)
                }
                Err(e) => {
                    warn!(query, error = %e, "Symbol search failed");
                    None
                }
            };
            let _ = tx.send(Action::SymbolSearchFinished { seq, matches });
        });
    }

    fn spawn_team_search(&self, seq: u64, query: String) {
        let client = self.sports_client.clone();
        let max_results = self.config.search.max_results;
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let teams = match client.search_teams(&query).await {
                Ok(response) => {
                    let mut teams = response.teams.unwrap_or_default();
                    teams.truncate(max_results);
                    Some(teams)
                }
                Err(e) => {
                    warn!(query, error = %e, "Team search failed");
                    None
                }
            };
            let _ = tx.send(Action::TeamSearchFinished { seq, teams });
        });
    }

    fn on_symbol_search_finished(&mut self, seq: u64, matches: Option<Vec<SymbolMatch>>) {
        match matches {
            Some(matches) => {
                if self.symbol_search.accept(seq, matches.clone()) {
                    self.store.reduce(Action::SymbolResults(matches));
                }
            }
            None => {
                self.symbol_search.fail(seq);
                self.store.reduce(Action::SymbolResults(Vec::new()));
            }
        }
    }

    fn on_team_search_finished(&mut self, seq: u64, teams: Option<Vec<SportsTeam>>) {
        match teams {
            Some(teams) => {
                if self.team_search.accept(seq, teams.clone()) {
                    self.store.reduce(Action::TeamResults(teams));
                }
            }
            None => {
                self.team_search.fail(seq);
                self.store.reduce(Action::TeamResults(Vec::new()));
            }
        }
    }

    /// Enter on the search overlay or the token prompt.
    fn handle_submit(&mut self) {
        match self.store.app.input_mode {
            InputMode::Token => self.submit_token(),
            InputMode::Search => match self.store.app.current_view {
                View::Stocks => self.follow_selected_symbol(),
                View::Sports => self.follow_selected_team(),
                View::News => {}
            },
            InputMode::Normal => {}
        }
    }

    fn submit_token(&mut self) {
        let token = self.store.app.input_buffer.trim().to_string();
        self.store.reduce(Action::SetInputMode(InputMode::Normal));
        if token.is_empty() {
            return;
        }

        let mut credentials = self.credential_store.get();
        credentials.set_token(Provider::Market, token.clone());
        self.credential_store.set(&credentials);
        self.market_token = Some(token.clone());

        // Rebuild the gated clients with the new token, effective immediately.
        match api::http_client(self.config.api.timeout()) {
            Ok(http) => {
                self.market_client = Some(MarketClient::new(
                    http.clone(),
                    self.config.api.market_base_url.clone(),
                    token.clone(),
                ));
                self.news_client = Some(NewsClient::new(
                    http,
                    self.config.api.market_base_url.clone(),
                    token,
                ));
            }
            Err(e) => {
                warn!(error = %e, "Failed to rebuild HTTP client");
                return;
            }
        }
        self.store.app.has_market_token = true;
        self.store.reduce(Action::ShowNotification(Notification::success(
            "Market API token saved",
        )));
        info!("Market token updated, ungating market and news fetches");

        self.stocks_schedule.retry();
        self.news_schedule.retry();
        self.restart_stream();
    }

    fn follow_selected_symbol(&mut self) {
        let Some(selected) = self
            .store
            .stocks
            .search_results
            .get(self.store.app.search_selected)
            .cloned()
        else {
            return;
        };

        let added = self.store.stocks.watchlist.add(&selected.symbol);
        if added {
            self.preference_store
                .save_watchlist(&self.store.stocks.watchlist);
            self.stocks_schedule.retry();
            self.restart_stream();
            self.store.reduce(Action::ShowNotification(Notification::success(
                format!("Added {} to watchlist", selected.symbol),
            )));
        } else {
            self.store.reduce(Action::ShowNotification(Notification::info(
                format!("{} is already watched", selected.symbol),
            )));
        }
        self.symbol_search.clear();
        self.store.reduce(Action::SetInputMode(InputMode::Normal));
    }

    fn follow_selected_team(&mut self) {
        let Some(selected) = self
            .store
            .sports
            .search_results
            .get(self.store.app.search_selected)
            .cloned()
        else {
            return;
        };

        let team = to_followed_team(selected);
        let name = team.name.clone();
        let added = self.store.sports.teams.add(team);
        if added {
            self.preference_store.save_teams(&self.store.sports.teams);
            self.sports_schedule.retry();
            self.store.reduce(Action::ShowNotification(Notification::success(
                format!("Following {name}"),
            )));
        } else {
            self.store.reduce(Action::ShowNotification(Notification::info(
                format!("Already following {name}"),
            )));
        }
        self.team_search.clear();
        self.store.reduce(Action::SetInputMode(InputMode::Normal));
    }

    /// Remove the selected watchlist symbol or followed team and persist.
    fn remove_selected(&mut self) {
        match self.store.app.current_view {
            View::Stocks => {
                let Some(symbol) = self.store.stocks.selected_symbol().map(str::to_string) else {
                    return;
                };
                self.store.stocks.watchlist.remove(&symbol);
                self.store.stocks.evict(&symbol);
                self.preference_store
                    .save_watchlist(&self.store.stocks.watchlist);
                self.restart_stream();
                self.store.reduce(Action::ShowNotification(Notification::info(
                    format!("Removed {symbol} from watchlist"),
                )));
            }
            View::Sports => {
                let Some(id) = self.store.sports.selected_team_id().map(str::to_string) else {
                    return;
                };
                self.store.sports.teams.remove(&id);
                self.store.sports.evict(&id);
                self.preference_store.save_teams(&self.store.sports.teams);
                self.store.reduce(Action::ShowNotification(Notification::info(
                    "Unfollowed team",
                )));
            }
            View::News => {}
        }
    }

    /// Manual refresh for the current view's domain.
    fn retry_current(&mut self) {
        match self.store.app.current_view {
            View::Stocks => self.stocks_schedule.retry(),
            View::Sports => self.sports_schedule.retry(),
            View::News => self.news_schedule.retry(),
        }
    }

    fn maybe_fetch_stocks(&mut self, now: Instant) {
        let Some(client) = self.market_client.clone() else {
            return;
        };
        if !self
            .stocks_schedule
            .try_begin(now, self.store.stocks.has_cache())
        {
            return;
        }
        self.sync_status(Domain::Stocks);

        let symbols = self.store.stocks.watchlist.symbols().to_vec();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let quotes = aggregate::fetch_quotes(&client, &symbols).await;
            let _ = tx.send(Action::StocksFetched(quotes));
        });
    }

    fn maybe_fetch_sports(&mut self, now: Instant) {
        if !self
            .sports_schedule
            .try_begin(now, self.store.sports.has_cache())
        {
            return;
        }
        self.sync_status(Domain::Sports);

        let client = self.sports_client.clone();
        let teams = self.store.sports.teams.teams().to_vec();
        let cap = self.config.ui.events_per_team;
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let events = aggregate::fetch_team_events(&client, &teams, cap).await;
            let _ = tx.send(Action::SportsFetched(events));
        });
    }

    fn maybe_fetch_news(&mut self, now: Instant) {
        let Some(client) = self.news_client.clone() else {
            return;
        };
        if !self
            .news_schedule
            .try_begin(now, self.store.news.has_cache())
        {
            return;
        }
        self.sync_status(Domain::News);

        let category = self.store.news.category;
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let articles = match client.headlines(category).await {
                Ok(articles) => Some(articles),
                Err(e) => {
                    warn!(category = %category, error = %e, "Headlines fetch failed");
                    None
                }
            };
            let _ = tx.send(Action::NewsFetched(articles));
        });
    }

    /// Mirror a schedule's status into the store for rendering.
    fn sync_status(&mut self, domain: Domain) {
        let status = match domain {
            Domain::Stocks => self.stocks_schedule.status(),
            Domain::Sports => self.sports_schedule.status(),
            Domain::News => self.news_schedule.status(),
        };
        self.store.reduce(Action::SetStatus(domain, status));
    }

    /// Tear down and relaunch the tick stream task. Called whenever the
    /// token or the watchlist changes; the stream resubscribes from scratch.
    fn restart_stream(&mut self) {
        if let Some(task) = self.stream_task.take() {
            task.abort();
        }
        self.store.reduce(Action::StreamConnected(false));

        let Some(token) = self.market_token.clone() else {
            return;
        };
        let symbols = self.store.stocks.watchlist.symbols().to_vec();
        if symbols.is_empty() {
            return;
        }

        let url = self.config.api.market_ws_url.clone();
        let stream_config = self.config.stream.clone();
        let tx = self.action_tx.clone();
        self.stream_task = Some(tokio::spawn(async move {
            let source = WsTickSource::new(url, token);
            let mut stream = ReconnectingTickStream::new(source, stream_config);
            match stream.start(symbols).await {
                Ok(()) => {
                    let _ = tx.send(Action::StreamConnected(true));
                }
                Err(e) => {
                    // next_update reconnects with backoff from here.
                    warn!(error = %e, "Initial tick stream connect failed");
                }
            }
            loop {
                let action = match stream.next_update().await {
                    StreamUpdate::Ticks(ticks) => Action::TickBatch(ticks),
                    StreamUpdate::Connected => Action::StreamConnected(true),
                    StreamUpdate::Disconnected => Action::StreamConnected(false),
                };
                if tx.send(action).is_err() {
                    break;
                }
            }
        }));
    }
}

/// Convert a provider search result into a persisted followed team.
fn to_followed_team(team: SportsTeam) -> Team {
    let abbreviation = team
        .short_name
        .clone()
        .unwrap_or_else(|| team.name.chars().take(3).collect::<String>().to_uppercase());
    Team {
        id: team.id,
        name: team.name,
        abbreviation,
        league: team.league,
        color: team.colour.unwrap_or_else(|| "#FFFFFF".to_string()),
        badge_url: team.badge_url,
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(task) = self.stream_task.take() {
            task.abort();
        }
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_followed_team_abbreviation_falls_back_to_name() {
        let team = SportsTeam {
            id: "1".to_string(),
            name: "Brentford".to_string(),
            short_name: None,
            league: "English Premier League".to_string(),
            colour: None,
            badge_url: None,
        };
        let followed = to_followed_team(team);
        assert_eq!(followed.abbreviation, "BRE");
        assert_eq!(followed.color, "#FFFFFF");
    }

    #[test]
    fn test_followed_team_keeps_provider_short_name() {
        let team = SportsTeam {
            id: "133604".to_string(),
            name: "Arsenal".to_string(),
            short_name: Some("ARS".to_string()),
            league: "English Premier League".to_string(),
            colour: Some("#EF0107".to_string()),
            badge_url: None,
        };
        let followed = to_followed_team(team);
        assert_eq!(followed.abbreviation, "ARS");
        assert_eq!(followed.color, "#EF0107");
    }
}
