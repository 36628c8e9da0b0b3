//! Navigation core for the Rally finance sample.
//!
//! The crate maps Rally's tab screens and its account detail route to a
//! navigation graph, keeps the back-stack, and exposes the current route and
//! the selected tab as observable [`State`].
//!
//! ## Usage
//!
//! ```
//! use rally_nav::{NavConfig, NavigationCoordinator, RallyScreen};
//!
//! let mut nav = NavigationCoordinator::new(NavConfig::default())?;
//! nav.on_tab_selected(RallyScreen::Accounts)?;
//! nav.navigate_to_account_detail("Checking")?;
//! assert_eq!(nav.current_route().get(), "Accounts/Checking");
//! assert_eq!(nav.current_screen(), RallyScreen::Accounts);
//!
//! nav.resolve_deep_link("rally://Accounts/Home%20Savings");
//! assert_eq!(nav.current_account_name().as_deref(), Some("Home Savings"));
//! # Ok::<(), rally_nav::NavError>(())
//! ```

pub mod config;
pub mod controller;
pub mod coordinator;
pub mod data;
pub mod deep_link;
mod error;
pub mod graph;
pub mod route;
pub mod router;
pub mod screen;
pub mod state;

pub use crate::{
    config::NavConfig,
    controller::{DeepLinkMatch, NavController, NavOptions, NavOutcome},
    coordinator::{ACCOUNT_NAME_ARG, NavigationCoordinator, RallyDestination},
    data::{Account, AccountSource, Bill},
    error::NavError,
    route::{BackStackEntry, NavArguments},
    screen::{RallyIcon, RallyScreen},
    state::{State, SubscriptionId},
};
