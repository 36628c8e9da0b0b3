//! Line-oriented host shell.
//!
//! Each input line is one UI event: a tab tap, an in-body click, a back
//! press or an incoming deep link. The shell forwards it to the
//! [`NavigationCoordinator`] and re-renders the frame.

use std::str::FromStr;

use anyhow::{Context, Result, bail};
use rally_nav::{AccountSource, NavConfig, NavOutcome, NavigationCoordinator, RallyScreen};
use tracing::{info, warn};

use crate::render;

/// One UI event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Tab row tap.
    Tab(RallyScreen),
    /// Navigate to any route, as the body callbacks do.
    Go(String),
    /// Account row click.
    Account(String),
    /// Incoming deep link.
    Link(String),
    Back,
    Stack,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match verb {
            "tab" => Command::Tab(
                rest.parse()
                    .context("usage: tab <Overview|Accounts|Bills>")?,
            ),
            "go" if !rest.is_empty() => Command::Go(rest.to_string()),
            "account" => Command::Account(rest.to_string()),
            "link" if !rest.is_empty() => Command::Link(rest.to_string()),
            "back" => Command::Back,
            "stack" => Command::Stack,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "go" => bail!("usage: go <route>"),
            "link" => bail!("usage: link <uri>"),
            _ => bail!("unknown command `{verb}`, try `help`"),
        };
        Ok(command)
    }
}

/// What the host should do after a command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Flow {
    /// Keep running and print the text.
    Continue(String),
    /// Close the host.
    Exit,
}

const HELP: &str = "\
commands:
  tab <Overview|Accounts|Bills>   select a tab
  go <route>                      navigate to a route, e.g. go Accounts/Checking
  account <name>                  open an account
  link <uri>                      deliver a deep link, e.g. link rally://Accounts/Vacation
  back                            go back
  stack                           print the back-stack
  quit                            exit
";

/// The running host: navigation state plus the data it renders.
pub struct Shell<S> {
    nav: NavigationCoordinator,
    data: S,
}

impl<S: AccountSource> Shell<S> {
    /// Start a host at `config.start_screen` over `data`.
    pub fn new(config: NavConfig, data: S) -> Result<Self> {
        let nav =
            NavigationCoordinator::new(config).context("failed to build navigation graph")?;
        Ok(Self { nav, data })
    }

    pub fn navigation(&self) -> &NavigationCoordinator {
        &self.nav
    }

    /// Current tab row and body.
    pub fn frame(&self) -> String {
        render::frame(&self.nav, &self.data)
    }

    /// Deliver a deep link; unmatched links keep the current screen and
    /// return `None`.
    pub fn open_deep_link(&mut self, uri: &str) -> Option<NavOutcome> {
        match self.nav.resolve_deep_link(uri) {
            Some(matched) => {
                info!(uri, route = %matched.route, outcome = ?matched.outcome, "opened deep link");
                Some(matched.outcome)
            }
            None => {
                warn!(uri, "deep link did not match, staying on the current screen");
                None
            }
        }
    }

    /// Run one command. Navigation failures are returned as errors and leave
    /// the state unchanged.
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        let outcome = match command {
            Command::Tab(screen) => self.nav.on_tab_selected(screen)?,
            Command::Go(route) => self.nav.navigate_to(&route)?,
            Command::Account(name) => self.nav.navigate_to_account_detail(&name)?,
            Command::Link(uri) => match self.open_deep_link(&uri) {
                Some(outcome) => outcome,
                None => bail!("no destination handles `{uri}`"),
            },
            Command::Back => {
                if !self.nav.pop_back() {
                    return Ok(Flow::Exit);
                }
                return Ok(Flow::Continue(self.frame()));
            }
            Command::Stack => return Ok(Flow::Continue(self.describe_stack())),
            Command::Help => return Ok(Flow::Continue(HELP.to_string())),
            Command::Quit => return Ok(Flow::Exit),
        };
        if outcome == NavOutcome::AlreadyCurrent {
            return Ok(Flow::Continue(String::from("(already here)\n")));
        }
        Ok(Flow::Continue(self.frame()))
    }

    fn describe_stack(&self) -> String {
        self.nav
            .back_stack()
            .enumerate()
            .map(|(depth, entry)| format!("{:>2} {}\n", depth + 1, entry.route()))
            .collect()
    }
}
