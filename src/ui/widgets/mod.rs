//! TUI widgets.

mod help;
mod news_feed;
mod notifications;
mod scoreboard;
mod search_overlay;
mod status_bar;
mod tab_bar;
mod token_prompt;
mod watchlist;

pub use help::HelpPanel;
pub use news_feed::NewsFeed;
pub use notifications::render_notification;
pub use scoreboard::Scoreboard;
pub use search_overlay::SearchOverlay;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
pub use token_prompt::TokenPrompt;
pub use watchlist::WatchlistTable;
