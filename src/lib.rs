pub mod app;
pub mod input;
pub mod net;

pub use app::help::HelpBrowser;
pub use app::history::History;
