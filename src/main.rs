mod app;
mod audio;
mod config;
mod engine;
mod library;
mod logging;
mod lyrics;
mod mpris;
mod runtime;
mod state;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
