pub mod event;
pub mod help;
pub mod history;
pub mod settings;

pub use event::{HistoryEvent, ListenerId};
pub use help::{HelpBrowser, Toolbar};
pub use history::{History, HistoryError};
pub use settings::HelpSettings;
