fn main() {
    #[cfg(feature = "cli")]
    stega::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("stega: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
