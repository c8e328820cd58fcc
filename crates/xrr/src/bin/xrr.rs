fn main() {
    if let Err(err) = xrr::run() {
        eprintln!("{}", xrr::format_error(&err));
        std::process::exit(1);
    }
}
