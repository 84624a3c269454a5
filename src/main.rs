use std::process;

fn main() {
    if let Err(e) = gravel::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
