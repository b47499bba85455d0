mod app;
mod config;
mod data;
mod error;
mod hover;
mod session;
mod state;
mod ui;

use config::SessionConfig;

fn main() {
    env_logger::init();

    if let Err(e) = session::run(SessionConfig::default()) {
        log::error!("Session aborted: {e:#}");
        println!("{}", e.console_message());
    }
}
