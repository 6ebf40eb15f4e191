//! Colorcode Maze CLI
//!
//! Usage:
//!   colorcode-maze [OPTIONS]
//!
//! Options:
//!   -p, --paper <PAPER>          Paper size: A4, A3, Letter, Legal
//!   -d, --difficulty <TIER>      Difficulty tier, or "custom" with --symbol
//!   --symbol <NAME>              Code for the custom difficulty (repeatable)
//!   --max-total <N>              Instance cap for the custom difficulty
//!   -a, --activity <ACTIVITY>    maze, road-challenge, city-challenge
//!   -s, --seed <SEED>            Seed for reproducible sheets
//!   --json                       Emit the sheet as JSON instead of a preview
//!   --list-symbols               Show the color code catalog
//!   -h, --help                   Print help

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use colorcode_maze::export::{render_text, to_json};
use colorcode_maze::{
    generate, ActivityKind, ConfigError, Difficulty, GenerateConfig, GenerateRequest, GridSpec,
    Orientation, Palette, PaperSize, QuantityTable, Tier, CATALOG,
};

#[derive(Parser)]
#[command(name = "colorcode-maze")]
#[command(about = "Generate color-code activity sheets for line-following robots")]
struct Cli {
    /// Paper size: A4, A3, Letter or Legal
    #[arg(short, long, default_value = "A4")]
    paper: String,

    /// Lay the sheet out in portrait instead of landscape
    #[arg(long)]
    portrait: bool,

    /// Cell edge length in millimetres
    #[arg(long, default_value_t = 5.0)]
    cell_size: f64,

    /// Difficulty tier (easy-low .. hard-extreme) or "custom"
    #[arg(short, long, default_value = "easy")]
    difficulty: String,

    /// Color code to include with the custom difficulty (repeatable)
    #[arg(long = "symbol")]
    symbols: Vec<String>,

    /// Upper bound on placed instances with the custom difficulty
    #[arg(long)]
    max_total: Option<usize>,

    /// Activity: maze, road-challenge or city-challenge
    #[arg(short, long, default_value = "maze")]
    activity: String,

    /// Seed for reproducible output (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generation config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Palette file for output colors (TOML format)
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Print the sheet as JSON
    #[arg(long)]
    json: bool,

    /// Log placement and routing details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Show the color code catalog and exit
    #[arg(long)]
    list_symbols: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => match GenerateConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GenerateConfig::default(),
    };

    if cli.list_symbols {
        print_symbols(&config.quantities);
        return;
    }

    let palette = match &cli.palette {
        Some(path) => match Palette::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading palette '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Palette::default(),
    };

    let request = match build_request(&cli) {
        Ok(request) => request,
        Err(e) => exit_with(e),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match generate(&request, &config, &mut rng) {
        Ok(sheet) => {
            if cli.json {
                match serde_json::to_string_pretty(&to_json(&sheet, &palette)) {
                    Ok(doc) => println!("{}", doc),
                    Err(e) => {
                        eprintln!("Error serializing sheet: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print!("{}", render_text(&sheet.grid));
                for (name, quantity) in sheet.requested_quantities() {
                    println!("{:>2} x {}", quantity, name);
                }
            }
            if let Some(summary) = sheet.failure_summary() {
                eprintln!("{}", summary);
            }
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: ConfigError) -> ! {
    eprintln!("Error: {}", e);
    if let Some(suggestions) = e.suggestions().filter(|s| !s.is_empty()) {
        eprintln!("  did you mean: {}?", suggestions.join(", "));
    }
    std::process::exit(1);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_request(cli: &Cli) -> Result<GenerateRequest, ConfigError> {
    let paper: PaperSize = cli.paper.parse()?;
    let orientation = if cli.portrait {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    };
    let grid = GridSpec::new(paper)
        .with_orientation(orientation)
        .with_cell_size(cli.cell_size);

    let difficulty = Difficulty::from_parts(&cli.difficulty, &cli.symbols, cli.max_total)?;

    let activity: ActivityKind = cli.activity.parse()?;

    Ok(GenerateRequest::new(difficulty)
        .with_grid(grid)
        .with_activity(activity))
}

fn print_symbols(table: &QuantityTable) {
    print!("{}", symbol_listing(table));
}

/// Catalog and per-tier quantity ranges as printed by `--list-symbols`
fn symbol_listing(table: &QuantityTable) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "COLOR CODES");
    let _ = writeln!(out, "===========");
    for symbol in CATALOG {
        let colors: Vec<&str> = symbol.colors.iter().map(|c| c.abbreviation()).collect();
        let levels: Vec<&str> = symbol.levels.iter().map(|l| l.as_str()).collect();
        let _ = writeln!(
            out,
            "{:<26} {:<10} {}",
            symbol.name,
            colors.join("-"),
            levels.join(", ")
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "DIFFICULTIES");
    let _ = writeln!(out, "============");
    for tier in Tier::ALL {
        let range = table.range(tier);
        let _ = writeln!(out, "{:<14} {}..={} per code", tier.as_str(), range.min, range.max);
    }
    let _ = writeln!(
        out,
        "{:<14} {}..={} per named code",
        "custom", table.custom.min, table.custom.max
    );
    out
}
