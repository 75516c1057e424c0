//! UCI binary: logs to stderr, speaks the protocol on stdin/stdout.

use quince_chess::search::zobrist;
use quince_chess::uci::uci_top::run_stdio_loop;

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    zobrist::init_tables();
    log::info!("quince_chess {} ready", env!("CARGO_PKG_VERSION"));

    run_stdio_loop()
}
