//! The fixed set of top-level Rally screens shown as tabs.
//!
//! Every screen's [`name`](RallyScreen::name) doubles as its route, so the
//! registry is also the resolver that maps a route back to the tab that owns
//! it.

use std::{fmt, str::FromStr};

use tracing::debug;

/// Opaque reference to the icon asset drawn for a tab.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RallyIcon {
    PieChart,
    AttachMoney,
    MoneyOff,
}

impl RallyIcon {
    /// Asset identifier understood by the renderer.
    pub fn asset(self) -> &'static str {
        match self {
            Self::PieChart => "pie_chart",
            Self::AttachMoney => "attach_money",
            Self::MoneyOff => "money_off",
        }
    }
}

/// A top-level navigable destination.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RallyScreen {
    #[default]
    Overview,
    Accounts,
    Bills,
}

const ALL_SCREENS: [RallyScreen; 3] = [
    RallyScreen::Overview,
    RallyScreen::Accounts,
    RallyScreen::Bills,
];

impl RallyScreen {
    /// Screens in tab display order.
    pub fn all() -> &'static [RallyScreen] {
        &ALL_SCREENS
    }

    /// Stable identifier, also the screen's route.
    pub fn name(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Accounts => "Accounts",
            Self::Bills => "Bills",
        }
    }

    /// Text shown on the selected tab.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Accounts => "Accounts",
            Self::Bills => "Bills",
        }
    }

    /// Tab icon.
    pub fn icon(self) -> RallyIcon {
        match self {
            Self::Overview => RallyIcon::PieChart,
            Self::Accounts => RallyIcon::AttachMoney,
            Self::Bills => RallyIcon::MoneyOff,
        }
    }

    /// Resolve a route to the screen that owns it.
    ///
    /// Only the first path segment is compared, so sub-routes such as
    /// `Accounts/{name}` belong to their parent tab. A missing or unknown
    /// route falls back to [`RallyScreen::Overview`] so the tab row always
    /// has a selection.
    pub fn from_route(route: Option<&str>) -> RallyScreen {
        let Some(route) = route else {
            return RallyScreen::default();
        };
        let head = route.split('/').next().unwrap_or_default();
        match Self::all().iter().find(|screen| screen.name() == head) {
            Some(screen) => *screen,
            None => {
                debug!(route, "unrecognised route, falling back to default screen");
                RallyScreen::default()
            }
        }
    }
}

impl fmt::Display for RallyScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no screen.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownScreen(pub String);

impl fmt::Display for UnknownScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown screen `{}`", self.0)
    }
}

impl std::error::Error for UnknownScreen {}

impl FromStr for RallyScreen {
    type Err = UnknownScreen;

    /// Exact, case-insensitive screen name lookup. Unlike
    /// [`RallyScreen::from_route`] this never falls back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|screen| screen.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownScreen(s.to_owned()))
    }
}
