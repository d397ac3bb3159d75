// Command-line front end for Stega.
//
// Subcommands map one-to-one onto the library: `hide` and `reveal` go
// through `io`, `capacity` and `header` read the carrier and ask the codec.
// Every command returns a process exit code; errors go to stderr.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand, ValueHint};

use crate::codec::{decoder, layout};
use crate::io::{self as stega_io, HideStats};

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Hide text in the least-significant bits of any file.
#[derive(Parser, Debug)]
#[command(
    name = "stega",
    version,
    about = "LSB text steganography for arbitrary files",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Hide text in a carrier file.
    Hide(HideArgs),
    /// Reveal text hidden in a carrier file.
    Reveal(CarrierArgs),
    /// Print how many characters a carrier file can hold.
    Capacity(CarrierArgs),
    /// Print the length header and capacity of a carrier file.
    Header(CarrierArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["text", "text_file"])))]
struct HideArgs {
    /// Text to hide.
    #[arg(long, short = 't')]
    text: Option<String>,

    /// Read the text to hide from a file (one trailing newline is dropped).
    #[arg(long = "text-file", value_hint = ValueHint::FilePath)]
    text_file: Option<PathBuf>,

    /// Carrier file to read.
    #[arg(value_hint = ValueHint::FilePath)]
    source: PathBuf,

    /// Where to write the modified carrier.
    #[arg(value_hint = ValueHint::FilePath)]
    destination: Option<PathBuf>,

    /// Write the modified carrier to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,
}

#[derive(Args, Debug)]
struct CarrierArgs {
    /// Carrier file to read.
    #[arg(value_hint = ValueHint::FilePath)]
    source: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Hide,
    Reveal,
    Capacity,
    Header,
    Config,
}

#[derive(Debug)]
struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    text: Option<String>,
    text_file: Option<PathBuf>,
    source_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        use_stdout: false,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        text: None,
        text_file: None,
        source_file: None,
        output_file: None,
    };

    match cli.command {
        Cmd::Hide(args) => {
            opts.command = Command::Hide;
            opts.use_stdout = args.stdout;
            opts.text = args.text;
            opts.text_file = args.text_file;
            opts.source_file = Some(args.source);
            opts.output_file = args.destination;
        }
        Cmd::Reveal(args) => {
            opts.command = Command::Reveal;
            opts.source_file = Some(args.source);
        }
        Cmd::Capacity(args) => {
            opts.command = Command::Capacity;
            opts.source_file = Some(args.source);
        }
        Cmd::Header(args) => {
            opts.command = Command::Header;
            opts.source_file = Some(args.source);
        }
        Cmd::Config => {}
    }
    opts
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("stega".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn emit_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => eprintln!("stega: json output error: {e}"),
    }
}

fn digest_hex(digest: Option<[u8; 32]>) -> Option<String> {
    digest.map(|d| stega_io::hex(&d))
}

/// Drop a single trailing `\n` or `\r\n`.
fn trim_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

fn load_text(opts: &Options) -> Result<String, String> {
    match (&opts.text, &opts.text_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(trim_trailing_newline)
            .map_err(|e| format!("text file: {}: {e}", path.display())),
        (None, None) => Err("no text given, use --text or --text-file".into()),
    }
}

fn source_path(opts: &Options) -> Result<&Path, String> {
    opts.source_file
        .as_deref()
        .ok_or_else(|| "no source file given".to_string())
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("stega version {version} (Rust), Copyright (C) stega contributors");
    eprintln!("Licensed under the MIT License");

    let file_io = cfg!(feature = "file-io") as u8;
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("FILE_IO={file_io}");
    eprintln!("HEADER_BITS={}", layout::HEADER_BITS);
    eprintln!("BITS_PER_CHAR={}", layout::BITS_PER_CHAR);
    eprintln!("MAX_PAYLOAD_CHARS={}", layout::MAX_PAYLOAD_CHARS);
    eprintln!("sizeof(usize)={ptr_size}");

    0
}

// ---------------------------------------------------------------------------
// Hide command
// ---------------------------------------------------------------------------

fn cmd_hide(opts: &Options) -> i32 {
    let text = match load_text(opts) {
        Ok(t) => t,
        Err(msg) => {
            eprintln!("stega: {msg}");
            return 1;
        }
    };
    let source = match source_path(opts) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("stega: {msg}");
            return 1;
        }
    };

    let result = match (opts.use_stdout, &opts.output_file) {
        (true, _) => {
            let mut writer = BufWriter::with_capacity(BUF_SIZE, io::stdout().lock());
            stega_io::hide_to(&text, source, &mut writer)
        }
        (false, None) => {
            eprintln!("stega: no destination given, pass one or use --stdout");
            return 1;
        }
        (false, Some(path)) => {
            if path.exists() && !opts.force {
                eprintln!(
                    "stega: output file exists, use -f to overwrite: {}",
                    path.display()
                );
                return 1;
            }
            stega_io::hide_file(&text, source, path)
        }
    };

    let stats: HideStats = match result {
        Ok(s) => s,
        Err(e) => {
            eprintln!("stega: hide: {}: {e}", source.display());
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "stega: hide: carrier size: {}, characters: {}, capacity: {}",
            stats.carrier_size, stats.payload_chars, stats.capacity
        );
    }

    if opts.json_output {
        emit_json(&serde_json::json!({
            "command": "hide",
            "carrier_size": stats.carrier_size,
            "payload_chars": stats.payload_chars,
            "capacity": stats.capacity,
            "source_sha256": digest_hex(stats.source_sha256),
            "output_sha256": digest_hex(stats.output_sha256),
        }));
    }

    0
}

// ---------------------------------------------------------------------------
// Reveal command
// ---------------------------------------------------------------------------

fn cmd_reveal(opts: &Options) -> i32 {
    let source = match source_path(opts) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("stega: {msg}");
            return 1;
        }
    };

    let revealed = match stega_io::reveal_file(source) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("stega: reveal: {}: {e}", source.display());
            return 1;
        }
    };

    match &revealed.text {
        Some(text) => {
            let mut out = io::stdout().lock();
            if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
                eprintln!("stega: write error: {e}");
                return 1;
            }
        }
        None => {
            if !opts.quiet {
                eprintln!("stega: no hidden text found");
            }
        }
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "stega: reveal: carrier size: {}, characters: {}, capacity: {}",
            revealed.stats.carrier_size, revealed.stats.payload_chars, revealed.stats.capacity
        );
    }

    if opts.json_output {
        emit_json(&serde_json::json!({
            "command": "reveal",
            "carrier_size": revealed.stats.carrier_size,
            "payload_chars": revealed.stats.payload_chars,
            "capacity": revealed.stats.capacity,
            "found": revealed.text.is_some(),
            "carrier_sha256": digest_hex(revealed.stats.carrier_sha256),
        }));
    }

    0
}

// ---------------------------------------------------------------------------
// Capacity / header commands
// ---------------------------------------------------------------------------

fn read_carrier(opts: &Options) -> Result<(PathBuf, Vec<u8>), i32> {
    let source = source_path(opts).map_err(|msg| {
        eprintln!("stega: {msg}");
        1
    })?;
    match std::fs::read(source) {
        Ok(data) => Ok((source.to_path_buf(), data)),
        Err(e) => {
            eprintln!("stega: source file: {}: {e}", source.display());
            Err(1)
        }
    }
}

fn cmd_capacity(opts: &Options) -> i32 {
    let (_, carrier) = match read_carrier(opts) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let capacity = layout::capacity(carrier.len());
    println!("{capacity}");

    if opts.json_output {
        emit_json(&serde_json::json!({
            "command": "capacity",
            "carrier_size": carrier.len(),
            "capacity": capacity,
        }));
    }
    0
}

fn cmd_header(opts: &Options) -> i32 {
    let (path, carrier) = match read_carrier(opts) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let info = decoder::inspect(&carrier);

    println!("Carrier: {}", path.display());
    println!("  size:            {} bytes", info.len);
    println!("  capacity:        {} characters", info.capacity);
    match info.header {
        Some(h) => println!("  header:          {h:#010x}"),
        None => println!("  header:          none (carrier shorter than 32 bytes)"),
    }
    match info.declared {
        Some(d) => println!("  declared length: {d} characters"),
        None => println!("  declared length: none"),
    }
    println!(
        "  payload fits:    {}",
        if info.payload_fits() { "yes" } else { "no" }
    );

    if opts.json_output {
        emit_json(&serde_json::json!({
            "command": "header",
            "carrier_size": info.len,
            "capacity": info.capacity,
            "header": info.header,
            "declared": info.declared,
            "payload_fits": info.payload_fits(),
        }));
    }
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    let filter = if opts.quiet {
        "error"
    } else {
        default_log_filter(opts.verbose)
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Warn if -c overrides output filename.
    if opts.use_stdout {
        if let Some(path) = opts.output_file.take() {
            if !opts.quiet {
                eprintln!(
                    "stega: warning: -c option overrides output filename: {}",
                    path.display()
                );
            }
        }
    }

    let exit_code = match opts.command {
        Command::Hide => cmd_hide(&opts),
        Command::Reveal => cmd_reveal(&opts),
        Command::Capacity => cmd_capacity(&opts),
        Command::Header => cmd_header(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
