mod app;
mod audio;
mod config;
mod library;
mod nav;
mod paths;
mod runtime;
mod transport;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
