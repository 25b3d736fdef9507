use url::Url;

#[derive(Debug, Clone)]
pub struct HelpSettings {
    pub title: String,
    /// Page shown on open and by the home button.
    pub home: Url,
    /// Table of contents shown beside the topic.
    pub contents: Url,
}

impl HelpSettings {
    /// Uses the home page as its own contents page.
    pub fn new(home: Url) -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            contents: home.clone(),
            home,
        }
    }

    pub const DEFAULT_TITLE: &'static str = "Help";
}
