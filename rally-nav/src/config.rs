use crate::screen::RallyScreen;

/// Navigation host configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NavConfig {
    /// Scheme of the account deep link, `rally` gives
    /// `rally://Accounts/{name}`.
    pub deep_link_scheme: String,
    /// When `true`, navigating to the route already on top of the back-stack
    /// is a no-op instead of pushing a duplicate entry.
    pub launch_single_top: bool,
    /// Screen shown when the host starts.
    pub start_screen: RallyScreen,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            deep_link_scheme: "rally".to_string(),
            launch_single_top: true,
            start_screen: RallyScreen::Overview,
        }
    }
}
