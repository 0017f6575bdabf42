fn main() {
    env_logger::init();
    if let Err(err) = ortho_arrows::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
