use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use weconnect::config::Config;
use weconnect::console::Console;
use weconnect::{AccessGate, FileStorage, MockDirectory, SessionStore};

fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid RUST_LOG filter")?;
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let cfg = Config::from_env().context("reading WECONNECT_* configuration")?;
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "startup",
        "WEConnect console starting: RUST_LOG='{}', session_dir={:?}, login_delay_ms={}, credentials={:?}",
        rust_log,
        cfg.session_dir,
        cfg.login_delay.as_millis(),
        cfg.credentials
    );

    let directory = MockDirectory::seeded();
    let demo_accounts = directory.identities().to_vec();
    let verifier = cfg.build_verifier().context("building credential verifier")?;
    let store = SessionStore::new(Arc::new(directory), verifier, Arc::new(FileStorage::new(&cfg.session_dir)))
        .with_login_delay(cfg.login_delay)
        .restore();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting tokio runtime")?;

    let mut console = Console::new(AccessGate::new(store)).with_demo_accounts(demo_accounts);
    run_repl(&rt, &mut console)
}

fn run_repl(rt: &tokio::runtime::Runtime, console: &mut Console) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();

    println!("WEConnect console. Type 'help' for commands.");
    for line in console.goto("/").lines {
        println!("{}", line);
    }

    loop {
        input.clear();
        print!("{}> ", console.location());
        stdout.flush()?;
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let reply = rt.block_on(console.execute(input.trim()));
        for line in &reply.lines {
            println!("{}", line);
        }
        if reply.quit {
            break;
        }
    }
    Ok(())
}
