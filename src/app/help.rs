use super::event::HistoryEvent;
use super::history::History;
use super::settings::HelpSettings;
use crate::net::{LoadError, Loader};
use std::cell::Cell;
use std::rc::Rc;
use url::Url;

/// Enabled state of the back and forward buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toolbar {
    pub back_enabled: bool,
    pub forward_enabled: bool,
}

impl From<HistoryEvent> for Toolbar {
    fn from(evt: HistoryEvent) -> Self {
        Self {
            back_enabled: evt.back_available,
            forward_enabled: evt.forward_available,
        }
    }
}

/// Two-pane help viewer: a table of contents and the current topic, with
/// home, back and forward navigation.
pub struct HelpBrowser {
    settings: HelpSettings,
    history: History<Url>,
    toolbar: Rc<Cell<Toolbar>>,
    contents: String,
    topic: String,
    error: Option<String>,
}

impl HelpBrowser {
    /// Loads the contents and home pages. Fails if either cannot be
    /// located.
    pub fn open(settings: HelpSettings, loader: &mut Loader) -> Result<Self, LoadError> {
        let contents = loader.fetch(&settings.contents)?;
        let topic = loader.fetch(&settings.home)?;

        let mut history = History::new(settings.home.clone());
        let toolbar = Rc::new(Cell::new(Toolbar::default()));
        let buttons = toolbar.clone();
        history.add_listener(move |evt| buttons.set(Toolbar::from(evt)));

        Ok(Self {
            settings,
            history,
            toolbar,
            contents,
            topic,
            error: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.settings.title
    }

    pub fn current(&self) -> &Url {
        self.history.current()
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Message from the last navigation attempt, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toolbar(&self) -> Toolbar {
        self.toolbar.get()
    }

    pub fn history(&self) -> &History<Url> {
        &self.history
    }

    /// Shows the home page as a new visit. Returns whether it loaded.
    pub fn home(&mut self, loader: &mut Loader) -> bool {
        self.error = None;
        let home = self.settings.home.clone();
        self.visit(home, loader)
    }

    /// Follows a link in the topic pane, resolved against the current page.
    /// Returns whether the target loaded; history only changes if it did.
    pub fn follow_link(&mut self, href: &str, loader: &mut Loader) -> bool {
        let base = self.history.current().clone();
        self.follow(&base, href, loader)
    }

    /// Follows a link in the contents pane, resolved against the contents
    /// page rather than the current topic.
    pub fn follow_contents_link(&mut self, href: &str, loader: &mut Loader) -> bool {
        let base = self.settings.contents.clone();
        self.follow(&base, href, loader)
    }

    fn follow(&mut self, base: &Url, href: &str, loader: &mut Loader) -> bool {
        self.error = None;
        match base.join(href) {
            Ok(url) => self.visit(url, loader),
            Err(e) => {
                log::warn!("Invalid link {} from {}: {}", href, base, e);
                self.error = Some(format!("Invalid link {}: {}", href, e));
                false
            }
        }
    }

    /// Returns false when there is no back history. A page that fails to
    /// load still leaves the history moved.
    pub fn back(&mut self, loader: &mut Loader) -> bool {
        self.error = None;
        let url = match self.history.go_back() {
            Ok(url) => url.clone(),
            Err(_) => return false,
        };
        self.show(&url, loader);
        true
    }

    /// Counterpart of `back`.
    pub fn forward(&mut self, loader: &mut Loader) -> bool {
        self.error = None;
        let url = match self.history.go_forward() {
            Ok(url) => url.clone(),
            Err(_) => return false,
        };
        self.show(&url, loader);
        true
    }

    fn visit(&mut self, url: Url, loader: &mut Loader) -> bool {
        if self.show(&url, loader) {
            self.history.visit(url);
            true
        } else {
            false
        }
    }

    fn show(&mut self, url: &Url, loader: &mut Loader) -> bool {
        match loader.fetch(url) {
            Ok(page) => {
                self.topic = page;
                true
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}", url, e);
                self.error = Some(format!("Could not locate URL {}", url));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct HelpDir(PathBuf);

    impl HelpDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("helpnav-{}-{}", name, std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            for page in ["home", "contents", "page1", "page2"] {
                std::fs::write(dir.join(format!("{}.html", page)), format!("<p>{}</p>", page)).unwrap();
            }
            Self(dir)
        }

        fn url(&self, page: &str) -> Url {
            Url::from_file_path(self.0.join(page)).unwrap()
        }

        fn settings(&self) -> HelpSettings {
            HelpSettings {
                title: "Portable Help".to_string(),
                home: self.url("home.html"),
                contents: self.url("contents.html"),
            }
        }
    }

    impl Drop for HelpDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn buttons(back_enabled: bool, forward_enabled: bool) -> Toolbar {
        Toolbar {
            back_enabled,
            forward_enabled,
        }
    }

    #[test]
    fn test_open_shows_home_and_contents() {
        let dir = HelpDir::new("open");
        let mut loader = Loader::new();
        let help = HelpBrowser::open(dir.settings(), &mut loader).unwrap();

        assert_eq!(help.title(), "Portable Help");
        assert_eq!(help.topic(), "<p>home</p>");
        assert_eq!(help.contents(), "<p>contents</p>");
        assert_eq!(help.current(), &dir.url("home.html"));
        assert_eq!(help.toolbar(), buttons(false, false));
        assert_eq!(help.error(), None);
    }

    #[test]
    fn test_open_fails_without_contents() {
        let dir = HelpDir::new("no-contents");
        let mut settings = dir.settings();
        settings.contents = dir.url("missing.html");

        let mut loader = Loader::new();
        assert!(matches!(
            HelpBrowser::open(settings, &mut loader),
            Err(LoadError::Io(_))
        ));
    }

    #[test]
    fn test_toolbar_follows_navigation() {
        let dir = HelpDir::new("toolbar");
        let mut loader = Loader::new();
        let mut help = HelpBrowser::open(dir.settings(), &mut loader).unwrap();

        assert!(help.follow_link("page1.html", &mut loader));
        assert_eq!(help.toolbar(), buttons(true, false));
        assert!(help.follow_link("page2.html", &mut loader));
        assert_eq!(help.topic(), "<p>page2</p>");

        assert!(help.back(&mut loader));
        assert_eq!(help.topic(), "<p>page1</p>");
        assert_eq!(help.toolbar(), buttons(true, true));

        assert!(help.back(&mut loader));
        assert_eq!(help.current(), &dir.url("home.html"));
        assert_eq!(help.toolbar(), buttons(false, true));

        assert!(!help.back(&mut loader));
        assert_eq!(help.toolbar(), buttons(false, true));

        assert!(help.forward(&mut loader));
        assert_eq!(help.current(), &dir.url("page1.html"));
        assert_eq!(help.toolbar(), buttons(true, true));
    }

    #[test]
    fn test_home_discards_forward_pages() {
        let dir = HelpDir::new("home");
        let mut loader = Loader::new();
        let mut help = HelpBrowser::open(dir.settings(), &mut loader).unwrap();

        help.follow_link("page1.html", &mut loader);
        help.follow_link("page2.html", &mut loader);
        help.back(&mut loader);

        assert!(help.home(&mut loader));
        assert_eq!(help.toolbar(), buttons(true, false));
        assert_eq!(help.history().len(), 3);
        assert!(!help.forward(&mut loader));
    }

    #[test]
    fn test_missing_link_leaves_history_alone() {
        let dir = HelpDir::new("missing-link");
        let mut loader = Loader::new();
        let mut help = HelpBrowser::open(dir.settings(), &mut loader).unwrap();

        assert!(!help.follow_link("nowhere.html", &mut loader));

        assert_eq!(help.history().len(), 1);
        assert_eq!(help.topic(), "<p>home</p>");
        assert_eq!(help.toolbar(), buttons(false, false));
        assert!(help.error().unwrap().contains("nowhere.html"));

        assert!(!help.back(&mut loader));
        assert_eq!(help.error(), None);

        assert!(help.follow_link("page1.html", &mut loader));
        assert_eq!(help.error(), None);
    }

    #[test]
    fn test_back_moves_even_if_page_vanished() {
        let dir = HelpDir::new("vanished");
        let mut loader = Loader::new();
        let mut help = HelpBrowser::open(dir.settings(), &mut loader).unwrap();

        help.follow_link("page1.html", &mut loader);
        help.follow_link("page2.html", &mut loader);
        std::fs::remove_file(dir.0.join("page1.html")).unwrap();

        assert!(help.back(&mut loader));
        assert_eq!(help.current(), &dir.url("page1.html"));
        assert_eq!(help.topic(), "<p>page2</p>");
        assert!(help.error().is_some());
        assert_eq!(help.toolbar(), buttons(true, true));
    }

    #[test]
    fn test_absolute_link_from_file_page() {
        let dir = HelpDir::new("absolute");
        let mut loader = Loader::new();
        let mut help = HelpBrowser::open(dir.settings(), &mut loader).unwrap();

        assert!(help.follow_link("data:text/plain,external", &mut loader));
        assert_eq!(help.topic(), "external");
        assert_eq!(help.current().scheme(), "data");
    }

    #[test]
    fn test_relative_link_from_data_page_is_rejected() {
        let dir = HelpDir::new("data-base");
        let mut loader = Loader::new();
        let mut help = HelpBrowser::open(dir.settings(), &mut loader).unwrap();
        assert!(help.follow_link("data:text/plain,external", &mut loader));

        assert!(!help.follow_link("page1.html", &mut loader));

        assert!(help.error().unwrap().starts_with("Invalid link page1.html"));
        assert_eq!(help.history().len(), 2);
        assert_eq!(help.current().scheme(), "data");
        assert_eq!(help.topic(), "external");
        assert_eq!(help.toolbar(), buttons(true, false));
    }

    #[test]
    fn test_contents_links_resolve_against_contents_page() {
        let dir = HelpDir::new("toc-dir");
        std::fs::create_dir_all(dir.0.join("toc")).unwrap();
        std::fs::create_dir_all(dir.0.join("topics")).unwrap();
        std::fs::write(dir.0.join("toc/contents.html"), "<a href=\"../topics/intro.html\">").unwrap();
        std::fs::write(dir.0.join("toc/intro.html"), "<p>toc intro</p>").unwrap();
        std::fs::write(dir.0.join("topics/home.html"), "<p>home</p>").unwrap();
        std::fs::write(dir.0.join("topics/intro.html"), "<p>intro</p>").unwrap();

        let settings = HelpSettings {
            title: "Portable Help".to_string(),
            home: dir.url("topics/home.html"),
            contents: dir.url("toc/contents.html"),
        };
        let mut loader = Loader::new();
        let mut help = HelpBrowser::open(settings, &mut loader).unwrap();

        assert!(help.follow_contents_link("intro.html", &mut loader));
        assert_eq!(help.current(), &dir.url("toc/intro.html"));
        assert_eq!(help.topic(), "<p>toc intro</p>");

        assert!(help.follow_contents_link("../topics/intro.html", &mut loader));
        assert_eq!(help.current(), &dir.url("topics/intro.html"));
        assert_eq!(help.history().len(), 3);
        assert_eq!(help.toolbar(), buttons(true, false));

        assert!(help.back(&mut loader));
        assert_eq!(help.topic(), "<p>toc intro</p>");
    }

    #[test]
    fn test_missing_contents_link_leaves_history_alone() {
        let dir = HelpDir::new("toc-missing");
        let mut loader = Loader::new();
        let mut help = HelpBrowser::open(dir.settings(), &mut loader).unwrap();

        assert!(!help.follow_contents_link("nowhere.html", &mut loader));

        assert_eq!(help.history().len(), 1);
        assert!(help.error().unwrap().contains("nowhere.html"));
    }
}
