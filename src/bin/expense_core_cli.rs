use expense_core::{cli::run_cli, init_tracing};

fn main() {
    init_tracing();

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
