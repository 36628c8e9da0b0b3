//! Imperative navigation over a [`NavGraph`].
//!
//! [`NavController`] owns the back-stack for one host. Every navigation call
//! resolves its target through the graph, updates the stack and publishes
//! the new top route to [`NavController::current_route`] before returning.

use tracing::{debug, info};

use crate::{
    NavError,
    graph::{Destination, NavGraph},
    route::{BackStackEntry, NavArguments},
    router::Router,
    state::State,
};

/// Per-call navigation options.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavOptions {
    /// Skip the push when the target route is already on top.
    pub launch_single_top: bool,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            launch_single_top: true,
        }
    }
}

/// What a navigation call did to the back-stack.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavOutcome {
    /// A new entry was pushed.
    Pushed,
    /// The target was already on top and single-top was requested.
    AlreadyCurrent,
}

/// A deep link that matched, and what following it did to the back-stack.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeepLinkMatch {
    /// Canonical route of the matched destination.
    pub route: String,
    /// Decoded arguments carried by the link.
    pub arguments: NavArguments,
    pub outcome: NavOutcome,
}

/// Back-stack owner for one navigation host.
pub struct NavController<D> {
    graph: NavGraph<D>,
    router: Router,
    current_route: State<String>,
    options: NavOptions,
}

impl<D> NavController<D> {
    /// Create a controller whose stack holds the graph's start destination.
    pub fn new(graph: NavGraph<D>) -> Result<Self, NavError> {
        Self::with_options(graph, NavOptions::default())
    }

    /// Like [`Self::new`], with options applied to every
    /// [`navigate`](Self::navigate) call.
    pub fn with_options(graph: NavGraph<D>, options: NavOptions) -> Result<Self, NavError> {
        let root = Self::entry_for(&graph, graph.start_route())?;
        let current_route = State::new(root.route().to_owned());
        info!(start = root.route(), "navigation host started");
        Ok(Self {
            graph,
            router: Router::with_root(root),
            current_route,
            options,
        })
    }

    pub fn graph(&self) -> &NavGraph<D> {
        &self.graph
    }

    pub fn options(&self) -> NavOptions {
        self.options
    }

    /// Observable route of the top entry.
    pub fn current_route(&self) -> State<String> {
        self.current_route.clone()
    }

    /// Top of the back-stack. Only `None` if the stack was emptied from
    /// outside the controller, which the public API does not allow.
    pub fn current_entry(&self) -> Option<&BackStackEntry> {
        self.router.last()
    }

    /// Graph node of the top entry.
    pub fn current_destination(&self) -> Option<&Destination<D>> {
        let entry = self.current_entry()?;
        self.graph
            .destinations()
            .find(|destination| destination.route() == entry.destination_route())
    }

    /// Entries from the root to the top.
    pub fn back_stack(
        &self,
    ) -> impl DoubleEndedIterator<Item = &BackStackEntry> + ExactSizeIterator {
        self.router.entries()
    }

    pub fn depth(&self) -> usize {
        self.router.len()
    }

    /// Monotonic counter bumped on every stack change.
    pub fn version(&self) -> u64 {
        self.router.version()
    }

    /// Navigate with the controller's default options.
    pub fn navigate(&mut self, route: &str) -> Result<NavOutcome, NavError> {
        self.navigate_with(route, self.options)
    }

    /// Resolve `route` and push it. The stack is untouched on error.
    pub fn navigate_with(
        &mut self,
        route: &str,
        options: NavOptions,
    ) -> Result<NavOutcome, NavError> {
        let entry = Self::entry_for(&self.graph, route)?;
        Ok(self.push_entry(entry, options))
    }

    /// Navigate to the destination bound to an external URI.
    ///
    /// Returns the canonical route, decoded arguments and push outcome, or
    /// `None` without touching the stack when no deep link matches.
    pub fn handle_deep_link(&mut self, uri: &str) -> Option<DeepLinkMatch> {
        let Some(resolved) = self.graph.resolve_deep_link(uri) else {
            debug!(uri, "no deep link matched");
            return None;
        };
        let entry = BackStackEntry::new(
            resolved.route,
            resolved.destination.route().to_owned(),
            resolved.arguments,
        );
        let route = entry.route().to_owned();
        let arguments = entry.arguments().clone();
        let outcome = self.push_entry(entry, self.options);
        Some(DeepLinkMatch {
            route,
            arguments,
            outcome,
        })
    }

    /// Pop the top entry. The root entry is never popped; `false` tells the
    /// host there is nothing left to go back to.
    pub fn pop_back_stack(&mut self) -> bool {
        if self.router.len() <= 1 {
            debug!("back pressed on root entry");
            return false;
        }
        self.router.pop();
        self.publish();
        true
    }

    /// Pop entries until one whose route or destination route equals
    /// `route` is on top, also popping that entry when `inclusive`.
    ///
    /// Returns `false` and leaves the stack alone when no such entry exists
    /// or the root would have to be popped.
    pub fn pop_up_to(&mut self, route: &str, inclusive: bool) -> bool {
        let Some(position) = self
            .router
            .entries()
            .rposition(|entry| entry.route() == route || entry.destination_route() == route)
        else {
            return false;
        };
        let keep = if inclusive { position } else { position + 1 };
        if keep == 0 {
            return false;
        }
        if keep == self.router.len() {
            return true;
        }
        while self.router.len() > keep {
            self.router.pop();
        }
        self.publish();
        true
    }

    /// Get or initialise state scoped to the current entry.
    ///
    /// The value is dropped once the entry leaves the back-stack.
    pub fn with_entry_state<T, F, R>(&self, key: &str, f: F) -> Option<R>
    where
        T: Default + Send + Sync + 'static,
        F: FnOnce(&mut T) -> R,
    {
        self.router.with_entry_state(key, f)
    }

    fn entry_for(graph: &NavGraph<D>, route: &str) -> Result<BackStackEntry, NavError> {
        let resolved = graph.resolve(route)?;
        Ok(BackStackEntry::new(
            resolved.route,
            resolved.destination.route().to_owned(),
            resolved.arguments,
        ))
    }

    fn push_entry(&mut self, entry: BackStackEntry, options: NavOptions) -> NavOutcome {
        if options.launch_single_top
            && self
                .router
                .last()
                .is_some_and(|top| top.route() == entry.route())
        {
            debug!(route = entry.route(), "already on top, not pushing");
            return NavOutcome::AlreadyCurrent;
        }
        self.router.push(entry);
        self.publish();
        NavOutcome::Pushed
    }

    fn publish(&self) {
        if let Some(top) = self.router.last() {
            self.current_route.set(top.route().to_owned());
        }
    }
}
