fn main() {
    if let Err(err) = beryd::run_entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
