use std::process;

fn main() {
    process::exit(goldrun::cli::run());
}
