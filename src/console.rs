//!
//! Interactive dashboard console
//! -----------------------------
//! Line-oriented stand-in for the browser shell: log in and out, open dashboard
//! paths through the access gate, and list the navigation menu. The console owns
//! the "return to the page you asked for" behaviour; the session store's login
//! knows nothing about destinations.

use crate::error::INVALID_CREDENTIALS_MESSAGE;
use crate::gate::{post_login_destination, AccessGate, NavOutcome, PublicPage, LANDING_PATH, LOGIN_PATH};
use crate::identity::Identity;

pub const HELP_TEXT: &str = "Commands:
  login <email> <password>   sign in; returns to the page that asked for a login
  logout                     sign out and go to /login
  goto <path>                open a path (a bare /path works too)
  menu                       list the views you can open
  whoami                     show the signed-in account and current path
  accounts                   list the demo accounts
  help                       show this help
  quit | exit                leave the console";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn line(s: impl Into<String>) -> Self {
        Self { lines: vec![s.into()], quit: false }
    }

    fn push(&mut self, s: impl Into<String>) {
        self.lines.push(s.into());
    }
}

pub struct Console {
    gate: AccessGate,
    location: String,
    return_to: Option<String>,
    demo_accounts: Vec<Identity>,
}

impl Console {
    pub fn new(gate: AccessGate) -> Self {
        Self { gate, location: LANDING_PATH.to_string(), return_to: None, demo_accounts: Vec::new() }
    }

    pub fn with_demo_accounts(mut self, accounts: Vec<Identity>) -> Self {
        self.demo_accounts = accounts;
        self
    }

    /// Path the console is currently showing.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Destination remembered from the last login redirect, if any.
    pub fn return_to(&self) -> Option<&str> {
        self.return_to.as_deref()
    }

    pub async fn execute(&mut self, line: &str) -> Reply {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else { return Reply::default() };
        let args: Vec<&str> = parts.collect();

        match cmd.to_ascii_lowercase().as_str() {
            "help" | "?" => Reply::line(HELP_TEXT),
            "quit" | "exit" => Reply { lines: Vec::new(), quit: true },
            "login" => match args.as_slice() {
                [email, password] => self.login(email, password).await,
                _ => Reply::line("usage: login <email> <password>"),
            },
            "logout" => self.logout(),
            "goto" | "open" | "cd" => match args.first() {
                Some(path) => self.goto(path),
                None => Reply::line("usage: goto <path>"),
            },
            "menu" | "nav" => self.menu(),
            "whoami" | "status" => self.whoami(),
            "accounts" => self.accounts(),
            _ if cmd.starts_with('/') => self.goto(cmd),
            _ => Reply::line(format!("unknown command '{}'; type 'help'", cmd)),
        }
    }

    /// Navigate and report the outcome. Follows plain redirects.
    pub fn goto(&mut self, path: &str) -> Reply {
        let mut reply = Reply::default();
        self.follow(path, &mut reply);
        reply
    }

    fn follow(&mut self, path: &str, reply: &mut Reply) {
        let outcome = self.gate.navigate(path);
        self.location = outcome.location(path);
        match outcome {
            NavOutcome::Render { view } => {
                reply.push(format!("{} ({})", view.title(), view.path()));
            }
            NavOutcome::RedirectLogin { from } => {
                reply.push(format!("login required: redirected to {} (will return to {})", LOGIN_PATH, from));
                self.return_to = Some(from);
            }
            NavOutcome::RedirectUnauthorized => {
                reply.push("Access Denied: you don't have permission to access this page.");
            }
            NavOutcome::Public { page } => {
                let text = match page {
                    PublicPage::Landing => "WEConnect: client management & communication platform. Type 'login' to begin.",
                    PublicPage::Login => "Login: enter 'login <email> <password>'.",
                    PublicPage::Unauthorized => "Access Denied.",
                };
                reply.push(text);
            }
            NavOutcome::Redirect { to } => {
                self.follow(&to, reply);
            }
            NavOutcome::NotFound { path } => {
                reply.push(format!("404: {} not found", path));
            }
        }
    }

    async fn login(&mut self, email: &str, password: &str) -> Reply {
        match self.gate.session().try_login(email, password).await {
            Ok(identity) => {
                let mut reply = Reply::line(format!(
                    "Login Successful. Welcome back to WEConnect, {} ({})!",
                    identity.display_name,
                    identity.role.label()
                ));
                let destination = post_login_destination(self.return_to.take().as_deref());
                self.follow(&destination, &mut reply);
                reply
            }
            Err(_) => Reply::line(format!("Login Failed. {}", INVALID_CREDENTIALS_MESSAGE)),
        }
    }

    fn logout(&mut self) -> Reply {
        self.gate.session().logout();
        self.return_to = None;
        self.location = LOGIN_PATH.to_string();
        Reply::line("logged out")
    }

    fn menu(&self) -> Reply {
        let views = self.gate.menu();
        if views.is_empty() {
            return Reply::line("not logged in");
        }
        let mut reply = Reply::default();
        for v in views {
            let marker = if v.path() == self.location { "*" } else { " " };
            reply.push(format!("{} {:<10} {}", marker, v.title(), v.path()));
        }
        reply
    }

    fn whoami(&self) -> Reply {
        let mut reply = match self.gate.session().current_identity() {
            Some(id) => Reply::line(format!(
                "[{}] {} <{}> role={} last_login={}",
                id.initials(),
                id.display_name,
                id.email,
                id.role.label(),
                id.last_login.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".into())
            )),
            None => Reply::line("not logged in"),
        };
        reply.push(format!("at {}", self.location));
        reply
    }

    fn accounts(&self) -> Reply {
        if self.demo_accounts.is_empty() {
            return Reply::line("no demo accounts configured");
        }
        let mut reply = Reply::line("Demo accounts:");
        for a in &self.demo_accounts {
            reply.push(format!("  {:<18} {}", a.role.label(), a.email));
        }
        reply
    }
}
