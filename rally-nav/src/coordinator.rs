//! Rally's navigation host.
//!
//! [`NavigationCoordinator`] wires the three tab screens and the account
//! detail route into a [`NavGraph`], keeps the back-stack, and derives the
//! selected tab from the current route:
//!
//! ```text
//! tab tap / body click ──► navigate_to ──► push entry ──► current_route
//!                                                             │
//!                     tab row ◄── current_screen ◄── RallyScreen::from_route
//! ```
//!
//! Route table:
//!
//! | Route             | Target          | Deep link                    |
//! |-------------------|-----------------|------------------------------|
//! | `Overview`        | `Overview`      |                              |
//! | `Accounts`        | `Accounts`      |                              |
//! | `Bills`           | `Bills`         |                              |
//! | `Accounts/{name}` | `SingleAccount` | `<scheme>://Accounts/{name}` |

use tracing::{debug, instrument};

use crate::{
    NavConfig, NavError,
    controller::{DeepLinkMatch, NavController, NavOptions, NavOutcome},
    data::{Account, AccountSource},
    graph::NavGraph,
    route::{BackStackEntry, NavArgument},
    screen::RallyScreen,
    state::State,
};

/// Argument carried by the account detail route.
pub const ACCOUNT_NAME_ARG: &str = "name";

/// Body rendered for a route.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RallyDestination {
    Overview,
    Accounts,
    Bills,
    SingleAccount,
}

/// Pattern of the account detail route, `Accounts/{name}`.
pub fn account_detail_route() -> String {
    format!("{}/{{{ACCOUNT_NAME_ARG}}}", RallyScreen::Accounts.name())
}

/// Build Rally's navigation graph for a configuration.
pub fn rally_graph(config: &NavConfig) -> Result<NavGraph<RallyDestination>, NavError> {
    let deep_link = format!("{}://{}", config.deep_link_scheme, account_detail_route());
    NavGraph::builder(config.start_screen.name())
        .composable_with(
            account_detail_route(),
            vec![NavArgument::string(ACCOUNT_NAME_ARG)],
            [deep_link],
            RallyDestination::SingleAccount,
        )
        .composable(RallyScreen::Overview.name(), RallyDestination::Overview)
        .composable(RallyScreen::Accounts.name(), RallyDestination::Accounts)
        .composable(RallyScreen::Bills.name(), RallyDestination::Bills)
        .build()
}

/// Owns Rally's back-stack and exposes it as observable state.
pub struct NavigationCoordinator {
    controller: NavController<RallyDestination>,
    current_screen: State<RallyScreen>,
}

impl NavigationCoordinator {
    /// Build the Rally graph and start at `config.start_screen`.
    pub fn new(config: NavConfig) -> Result<Self, NavError> {
        let graph = rally_graph(&config)?;
        let controller = NavController::with_options(
            graph,
            NavOptions {
                launch_single_top: config.launch_single_top,
            },
        )?;

        let route = controller.current_route();
        let current_screen =
            State::new(route.with(|r| RallyScreen::from_route(Some(r.as_str()))));
        let screen = current_screen.clone();
        route.subscribe(move |route| {
            let next = RallyScreen::from_route(Some(route.as_str()));
            if screen.get() != next {
                screen.set(next);
            }
        });

        Ok(Self {
            controller,
            current_screen,
        })
    }

    /// Tabs in display order.
    pub fn all_screens(&self) -> &'static [RallyScreen] {
        RallyScreen::all()
    }

    /// Observable route of the current back-stack entry.
    pub fn current_route(&self) -> State<String> {
        self.controller.current_route()
    }

    /// Tab owning the current route.
    pub fn current_screen(&self) -> RallyScreen {
        self.current_screen.get()
    }

    /// Observable tab selection; notified only when the tab changes.
    pub fn current_screen_state(&self) -> State<RallyScreen> {
        self.current_screen.clone()
    }

    /// Top entry of the back-stack.
    pub fn current_entry(&self) -> Option<&BackStackEntry> {
        self.controller.current_entry()
    }

    /// Render target of the current entry.
    pub fn current_destination(&self) -> Option<RallyDestination> {
        self.controller
            .current_destination()
            .map(|destination| *destination.target())
    }

    /// Number of entries on the back-stack.
    pub fn depth(&self) -> usize {
        self.controller.depth()
    }

    /// Entries from the root to the top.
    pub fn back_stack(&self) -> impl Iterator<Item = &BackStackEntry> {
        self.controller.back_stack()
    }

    /// Underlying controller, for entry-scoped state and `pop_up_to`.
    pub fn controller(&self) -> &NavController<RallyDestination> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NavController<RallyDestination> {
        &mut self.controller
    }

    /// Navigate to a screen name or any route of the graph.
    #[instrument(level = "debug", skip(self))]
    pub fn navigate_to(&mut self, route_or_screen_name: &str) -> Result<NavOutcome, NavError> {
        self.controller.navigate(route_or_screen_name)
    }

    /// Tab row callback.
    pub fn on_tab_selected(&mut self, screen: RallyScreen) -> Result<NavOutcome, NavError> {
        self.navigate_to(screen.name())
    }

    /// Open the detail body of one account.
    ///
    /// An empty name fails with [`NavError::InvalidArgument`] and leaves the
    /// back-stack untouched.
    pub fn navigate_to_account_detail(
        &mut self,
        account_name: &str,
    ) -> Result<NavOutcome, NavError> {
        if account_name.is_empty() {
            return Err(NavError::invalid_argument(
                ACCOUNT_NAME_ARG,
                "account name must not be empty",
            ));
        }
        let route = format!(
            "{}/{}",
            RallyScreen::Accounts.name(),
            urlencoding::encode(account_name)
        );
        self.navigate_to(&route)
    }

    /// Navigate to the entry bound to an external URI.
    ///
    /// On a match the result is the same entry
    /// [`navigate_to_account_detail`](Self::navigate_to_account_detail) pushes
    /// for the decoded name, and the outcome reports whether it was pushed or
    /// already on top. `None` means no match; the caller picks the fallback.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_deep_link(&mut self, uri: &str) -> Option<DeepLinkMatch> {
        self.controller.handle_deep_link(uri)
    }

    /// Read a named argument of an entry.
    pub fn extract_argument(entry: &BackStackEntry, key: &str) -> Option<String> {
        entry.argument(key).map(str::to_owned)
    }

    /// Name of the account shown by the current entry, if any.
    pub fn current_account_name(&self) -> Option<String> {
        Self::extract_argument(self.current_entry()?, ACCOUNT_NAME_ARG)
    }

    /// Look up the current account through `source`, passing its answer on
    /// unchanged.
    pub fn current_account<'a, S>(&self, source: &'a S) -> Option<&'a Account>
    where
        S: AccountSource + ?Sized,
    {
        let name = self.current_account_name()?;
        let account = source.get_account(&name);
        if account.is_none() {
            debug!(%name, "account not found");
        }
        account
    }

    /// Back navigation. `false` when already at the root entry.
    pub fn pop_back(&mut self) -> bool {
        self.controller.pop_back_stack()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use rstest::rstest;

    use super::{ACCOUNT_NAME_ARG, NavigationCoordinator, RallyDestination};
    use crate::{
        NavConfig, NavError, NavOutcome, RallyScreen,
        data::{Account, AccountSource, Bill},
    };

    fn coordinator() -> NavigationCoordinator {
        NavigationCoordinator::new(NavConfig::default()).unwrap()
    }

    fn with_scheme(scheme: &str) -> NavigationCoordinator {
        NavigationCoordinator::new(NavConfig {
            deep_link_scheme: scheme.to_string(),
            ..NavConfig::default()
        })
        .unwrap()
    }

    struct Ledger {
        accounts: Vec<Account>,
    }

    impl AccountSource for Ledger {
        fn accounts(&self) -> &[Account] {
            &self.accounts
        }

        fn bills(&self) -> &[Bill] {
            &[]
        }
    }

    #[test]
    fn starts_on_overview() {
        let nav = coordinator();
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current_route().get(), "Overview");
        assert_eq!(nav.current_screen(), RallyScreen::Overview);
        assert_eq!(nav.current_destination(), Some(RallyDestination::Overview));
    }

    #[test]
    fn start_screen_is_configurable() {
        let nav = NavigationCoordinator::new(NavConfig {
            start_screen: RallyScreen::Bills,
            ..NavConfig::default()
        })
        .unwrap();
        assert_eq!(nav.current_screen(), RallyScreen::Bills);
    }

    #[test]
    fn tab_detail_back_scenario() {
        let mut nav = coordinator();

        nav.navigate_to("Accounts").unwrap();
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.current_route().get(), "Accounts");

        nav.navigate_to_account_detail("Bob").unwrap();
        assert_eq!(nav.depth(), 3);
        assert_eq!(nav.current_route().get(), "Accounts/Bob");
        assert_eq!(
            RallyScreen::from_route(Some(nav.current_route().get().as_str())),
            RallyScreen::Accounts
        );
        assert_eq!(nav.current_screen(), RallyScreen::Accounts);
        assert_eq!(
            nav.current_destination(),
            Some(RallyDestination::SingleAccount)
        );

        assert!(nav.pop_back());
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.current_route().get(), "Accounts");
        assert_eq!(nav.current_destination(), Some(RallyDestination::Accounts));
    }

    #[test]
    fn repeated_navigation_to_current_route_is_a_no_op() {
        let mut nav = coordinator();
        assert_eq!(
            nav.navigate_to("Overview").unwrap(),
            NavOutcome::AlreadyCurrent
        );
        assert_eq!(
            nav.navigate_to("Overview").unwrap(),
            NavOutcome::AlreadyCurrent
        );
        assert_eq!(nav.depth(), 1);

        nav.navigate_to_account_detail("Bob").unwrap();
        nav.navigate_to_account_detail("Bob").unwrap();
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn duplicates_are_pushed_when_single_top_is_off() {
        let mut nav = NavigationCoordinator::new(NavConfig {
            launch_single_top: false,
            ..NavConfig::default()
        })
        .unwrap();
        nav.navigate_to("Overview").unwrap();
        nav.navigate_to("Overview").unwrap();
        assert_eq!(nav.depth(), 3);
    }

    #[test]
    fn empty_account_name_is_rejected_without_mutation() {
        let mut nav = coordinator();
        let err = nav.navigate_to_account_detail("").unwrap_err();
        assert!(matches!(
            err,
            NavError::InvalidArgument { ref name, .. } if name == ACCOUNT_NAME_ARG
        ));
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current_route().get(), "Overview");
    }

    #[test]
    fn unknown_route_is_an_error() {
        let mut nav = coordinator();
        assert!(matches!(
            nav.navigate_to("Settings"),
            Err(NavError::UnknownRoute(_))
        ));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn deep_link_matches_in_app_navigation() {
        let mut linked = with_scheme("scheme");
        let matched = linked.resolve_deep_link("scheme://Accounts/Alice").unwrap();
        assert_eq!(matched.route, "Accounts/Alice");
        assert_eq!(matched.arguments.get(ACCOUNT_NAME_ARG), Some("Alice"));
        assert_eq!(matched.outcome, NavOutcome::Pushed);

        let mut direct = with_scheme("scheme");
        direct.navigate_to_account_detail("Alice").unwrap();

        let a = linked.current_entry().unwrap();
        let b = direct.current_entry().unwrap();
        assert!(a.same_destination(b));
        assert_eq!(linked.depth(), direct.depth());
    }

    #[test]
    fn deep_link_argument_is_decoded() {
        let mut nav = with_scheme("scheme");
        nav.resolve_deep_link("scheme://Accounts/%20").unwrap();
        let entry = nav.current_entry().unwrap();
        assert_eq!(
            NavigationCoordinator::extract_argument(entry, ACCOUNT_NAME_ARG),
            Some(" ".to_string())
        );

        let mut direct = with_scheme("scheme");
        direct.navigate_to_account_detail(" ").unwrap();
        assert!(entry.same_destination(direct.current_entry().unwrap()));
    }

    #[test]
    fn deep_link_onto_the_current_account_is_already_current() {
        let mut nav = coordinator();
        nav.navigate_to_account_detail("Alice").unwrap();
        assert_eq!(nav.depth(), 2);

        let matched = nav.resolve_deep_link("rally://Accounts/Alice").unwrap();
        assert_eq!(matched.outcome, NavOutcome::AlreadyCurrent);
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.current_route().get(), "Accounts/Alice");
    }

    #[rstest]
    #[case("rally://Accounts/Alice")]
    #[case("scheme://Bills/Alice")]
    #[case("scheme://Accounts/")]
    #[case("scheme://Accounts/Alice/extra")]
    #[case("Accounts/Alice")]
    fn mismatched_deep_links_leave_state_alone(#[case] uri: &str) {
        let mut nav = with_scheme("scheme");
        assert!(nav.resolve_deep_link(uri).is_none());
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current_screen(), RallyScreen::Overview);
    }

    #[test]
    fn default_scheme_is_rally() {
        let mut nav = coordinator();
        assert!(nav.resolve_deep_link("rally://Accounts/Checking").is_some());
        assert_eq!(nav.current_account_name().as_deref(), Some("Checking"));
    }

    #[test]
    fn argument_absent_on_plain_routes() {
        let mut nav = coordinator();
        nav.on_tab_selected(RallyScreen::Bills).unwrap();
        let entry = nav.current_entry().unwrap();
        assert_eq!(
            NavigationCoordinator::extract_argument(entry, ACCOUNT_NAME_ARG),
            None
        );
        assert_eq!(nav.current_account_name(), None);
    }

    #[test]
    fn screen_observers_fire_only_on_tab_change() {
        let mut nav = coordinator();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        nav.current_screen_state()
            .subscribe(move |screen| sink.lock().push(*screen));

        nav.navigate_to("Accounts").unwrap();
        nav.navigate_to_account_detail("Checking").unwrap();
        nav.on_tab_selected(RallyScreen::Bills).unwrap();
        nav.pop_back();

        assert_eq!(
            *seen.lock(),
            vec![
                RallyScreen::Accounts,
                RallyScreen::Bills,
                RallyScreen::Accounts
            ]
        );
    }

    #[test]
    fn route_and_screen_agree_inside_route_listeners() {
        let mut nav = coordinator();
        let screen = nav.current_screen_state();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        nav.current_route().subscribe(move |route| {
            sink.lock().push((route.clone(), screen.get()));
        });

        nav.navigate_to_account_detail("Vacation").unwrap();
        assert_eq!(
            *seen.lock(),
            vec![("Accounts/Vacation".to_string(), RallyScreen::Accounts)]
        );
    }

    #[test]
    fn account_lookup_propagates_the_source_answer() {
        let ledger = Ledger {
            accounts: vec![Account {
                name: "Home Savings".into(),
                number: 5678,
                balance: 8676.88,
                color: 0xFF005D57,
            }],
        };
        let mut nav = coordinator();
        assert!(nav.current_account(&ledger).is_none());

        nav.navigate_to_account_detail("Home Savings").unwrap();
        assert_eq!(nav.current_route().get(), "Accounts/Home%20Savings");
        assert_eq!(nav.current_account(&ledger).map(|a| a.number), Some(5678));

        nav.navigate_to_account_detail("Nope").unwrap();
        assert!(nav.current_account(&ledger).is_none());
    }
}
