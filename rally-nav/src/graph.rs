//! The navigation graph: route patterns mapped to render targets.
//!
//! A graph is declared once through [`NavGraphBuilder`] and validated in
//! [`NavGraphBuilder::build`]. Lookups try destinations in declaration order
//! and stop at the first match.

use tracing::trace;

use crate::{
    NavError,
    deep_link::DeepLinkPattern,
    route::{NavArgument, NavArguments, RoutePattern},
};

/// One node of the graph.
#[derive(Debug)]
pub struct Destination<D> {
    pattern: RoutePattern,
    arguments: Vec<NavArgument>,
    deep_links: Vec<DeepLinkPattern>,
    target: D,
}

impl<D> Destination<D> {
    pub fn route(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Declared arguments, including implicit string arguments for
    /// undeclared placeholders.
    pub fn arguments(&self) -> &[NavArgument] {
        &self.arguments
    }

    pub fn deep_links(&self) -> &[DeepLinkPattern] {
        &self.deep_links
    }

    /// The render target bound to this route.
    pub fn target(&self) -> &D {
        &self.target
    }

    fn canonical_route(&self, arguments: &NavArguments) -> Result<String, NavError> {
        let values: Vec<(&str, &str)> = arguments.iter().collect();
        self.pattern.build(&values)
    }

    fn check_arguments(&self, arguments: &NavArguments) -> Result<(), NavError> {
        for declared in &self.arguments {
            let Some(value) = arguments.get(&declared.name) else {
                return Err(NavError::invalid_argument(&declared.name, "missing value"));
            };
            if !declared.nav_type.accepts(value) {
                return Err(NavError::invalid_argument(
                    &declared.name,
                    format!("`{value}` is not a valid {:?}", declared.nav_type),
                ));
            }
        }
        Ok(())
    }
}

struct PendingDestination<D> {
    route: String,
    arguments: Vec<NavArgument>,
    deep_links: Vec<String>,
    target: D,
}

/// Declarative builder for a [`NavGraph`].
pub struct NavGraphBuilder<D> {
    start_route: String,
    pending: Vec<PendingDestination<D>>,
}

impl<D> NavGraphBuilder<D> {
    pub fn new(start_route: impl Into<String>) -> Self {
        Self {
            start_route: start_route.into(),
            pending: Vec::new(),
        }
    }

    /// Register a destination without declared arguments or deep links.
    pub fn composable(self, route: impl Into<String>, target: D) -> Self {
        self.composable_with(route, Vec::new(), Vec::<String>::new(), target)
    }

    /// Register a destination with typed arguments and deep-link patterns.
    pub fn composable_with<I, S>(
        mut self,
        route: impl Into<String>,
        arguments: Vec<NavArgument>,
        deep_links: I,
        target: D,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.push(PendingDestination {
            route: route.into(),
            arguments,
            deep_links: deep_links.into_iter().map(Into::into).collect(),
            target,
        });
        self
    }

    /// Validate every declaration and produce the graph.
    pub fn build(self) -> Result<NavGraph<D>, NavError> {
        let mut destinations: Vec<Destination<D>> = Vec::with_capacity(self.pending.len());
        for pending in self.pending {
            let pattern = RoutePattern::parse(&pending.route)?;
            if destinations.iter().any(|d| d.pattern == pattern) {
                return Err(NavError::InvalidGraph(format!(
                    "route `{}` is declared twice",
                    pending.route
                )));
            }

            let mut arguments = pending.arguments;
            if let Some(stray) = arguments
                .iter()
                .find(|arg| !pattern.params().any(|param| param == arg.name))
            {
                return Err(NavError::InvalidGraph(format!(
                    "argument `{}` is not a placeholder of `{}`",
                    stray.name, pending.route
                )));
            }
            for param in pattern.params() {
                if !arguments.iter().any(|arg| arg.name == param) {
                    arguments.push(NavArgument::string(param));
                }
            }

            let mut deep_links = Vec::with_capacity(pending.deep_links.len());
            for raw in &pending.deep_links {
                let link = DeepLinkPattern::parse(raw)?;
                if let Some(param) = link
                    .path()
                    .params()
                    .find(|param| !pattern.params().any(|p| p == *param))
                {
                    return Err(NavError::InvalidGraph(format!(
                        "deep link `{raw}` binds `{param}`, which `{}` does not declare",
                        pending.route
                    )));
                }
                deep_links.push(link);
            }

            destinations.push(Destination {
                pattern,
                arguments,
                deep_links,
                target: pending.target,
            });
        }

        let start_is_declared = destinations
            .iter()
            .any(|d| d.pattern.is_literal() && d.route() == self.start_route);
        if !start_is_declared {
            return Err(NavError::InvalidGraph(format!(
                "start destination `{}` is not a declared argument-free route",
                self.start_route
            )));
        }

        Ok(NavGraph {
            start_route: self.start_route,
            destinations,
        })
    }
}

/// A destination matched by a route or deep link.
#[derive(Debug)]
pub struct ResolvedRoute<'a, D> {
    pub destination: &'a Destination<D>,
    /// Canonical concrete route, arguments percent-encoded.
    pub route: String,
    pub arguments: NavArguments,
}

/// Validated mapping from route patterns to render targets.
#[derive(Debug)]
pub struct NavGraph<D> {
    start_route: String,
    destinations: Vec<Destination<D>>,
}

impl<D> NavGraph<D> {
    pub fn builder(start_route: impl Into<String>) -> NavGraphBuilder<D> {
        NavGraphBuilder::new(start_route)
    }

    pub fn start_route(&self) -> &str {
        &self.start_route
    }

    pub fn destinations(&self) -> impl Iterator<Item = &Destination<D>> {
        self.destinations.iter()
    }

    /// Resolve an in-app route.
    ///
    /// The resolved route is canonical: placeholder values are re-encoded,
    /// so `Detail/Ann Lee` and `Detail/Ann%20Lee` resolve to the same entry.
    ///
    /// Fails with [`NavError::UnknownRoute`] when nothing matches and with
    /// [`NavError::InvalidArgument`] when a value does not fit its declared
    /// type.
    pub fn resolve(&self, route: &str) -> Result<ResolvedRoute<'_, D>, NavError> {
        let (destination, arguments) = self
            .destinations
            .iter()
            .find_map(|d| d.pattern.match_route(route).map(|args| (d, args)))
            .ok_or_else(|| NavError::UnknownRoute(route.to_owned()))?;
        destination.check_arguments(&arguments)?;
        let canonical = destination.canonical_route(&arguments)?;
        trace!(route, destination = destination.route(), "resolved route");
        Ok(ResolvedRoute {
            destination,
            route: canonical,
            arguments,
        })
    }

    /// Resolve an external URI through the registered deep links.
    ///
    /// Returns `None` when no deep link matches or the extracted values do
    /// not fit their declared types.
    pub fn resolve_deep_link(&self, uri: &str) -> Option<ResolvedRoute<'_, D>> {
        let (destination, arguments) = self.destinations.iter().find_map(|d| {
            d.deep_links
                .iter()
                .find_map(|link| link.match_uri(uri))
                .map(|args| (d, args))
        })?;
        if let Err(err) = destination.check_arguments(&arguments) {
            trace!(uri, %err, "deep link arguments rejected");
            return None;
        }
        let route = destination.canonical_route(&arguments).ok()?;
        trace!(uri, route = %route, "resolved deep link");
        Some(ResolvedRoute {
            destination,
            route,
            arguments,
        })
    }
}
