use std::io;

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let code = chipjack_cli::run(
        std::env::args(),
        &mut stdin.lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    );
    std::process::exit(code);
}
