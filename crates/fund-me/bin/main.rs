use yansi::Paint;

fn main() {
    if let Err(err) = fund_me::run() {
        eprintln!("{}: {err:?}", "Error".red().bold());
        std::process::exit(1);
    }
}
