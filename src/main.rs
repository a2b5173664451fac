mod compiler;
mod draft;
mod error;
mod gap;
mod importer;
mod markup;
mod parser;
mod serialiser;
mod srt;
mod timecode;

use crate::draft::Draft;
use crate::gap::Gap;

use std::io::{self, Read, Write};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser as ClapParser, Subcommand};
use log::{info, LevelFilter};

fn main() {
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Render and re-time the subtitles of a video editor draft")]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Log more details. Repeat for even more."
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the text tracks of a draft as SRT subtitles.
    Render(Io),
    /// Insert a growing gap between the text segments of a draft.
    ShiftDraft {
        #[command(flatten)]
        io: Io,
        #[command(flatten)]
        gap: GapArgs,
        #[arg(
            short,
            long,
            value_name = "FILE",
            help = "Write a backup of the original input to the specified file."
        )]
        backup: Option<String>,
    },
    /// Insert a growing gap between the cues of an SRT file.
    ShiftSrt {
        #[command(flatten)]
        io: Io,
        #[command(flatten)]
        gap: GapArgs,
    },
    /// Build a draft from an SRT file.
    Import(Io),
}

#[derive(Args)]
struct Io {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the input will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write to. If not supplied, the output will be written to standard output (shift-draft writes back to the input file)."
    )]
    output: Option<String>,
}

#[derive(Args)]
struct GapArgs {
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        env = "DRAFTSUB_GAP_SECONDS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=gap::MAX_GAP_SECS),
        help = "The gap to add per position, in seconds (at most one day)."
    )]
    gap: u64,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render(io) => {
            let draft = read_draft(&io.input)?;
            let cues = compiler::compile(&draft);
            write_output(&io.output_or_stdout(), serialiser::render(&cues).as_bytes())
        }
        Command::ShiftDraft { io, gap, backup } => {
            let output = io.output.clone().unwrap_or_else(|| io.input.clone());
            shift_draft_file(&io.input, &output, backup.as_deref(), Gap::from_secs(gap.gap))
        }
        Command::ShiftSrt { io, gap } => {
            let data = read_text(&io.input)?;
            let shifted = gap::shift_cues(&data, Gap::from_secs(gap.gap));
            write_output(&io.output_or_stdout(), shifted.as_bytes())
        }
        Command::Import(io) => {
            let data = read_text(&io.input)?;
            let cues = parser::parse(&data)
                .context(format!("Failed to parse SRT file: '{}'", io.input))?;
            if cues.is_empty() {
                return Err(anyhow!("You appear to have supplied an empty file."));
            }
            let draft = importer::import(&cues);
            info!("Imported {} cues", cues.len());
            write_output(&io.output_or_stdout(), &draft.to_vec()?)
        }
    }
}

/// Shifts a draft file. Nothing is written, not even the backup, unless the
/// input decodes and re-encodes cleanly.
fn shift_draft_file(input: &str, output: &str, backup: Option<&str>, gap: Gap) -> Result<()> {
    let data = read_input(input)?;
    let mut draft =
        Draft::from_slice(&data).context(format!("Failed to read draft: '{}'", input))?;
    let shifted = gap::shift_draft(&mut draft, gap);
    info!("Moved {} segments", shifted);
    let encoded = draft.to_vec()?;

    if let Some(backup_path) = backup {
        serialiser::commit(backup_path, &data)
            .context(format!("Failed to write backup file: '{}'", backup_path))?;
    }
    write_output(output, &encoded)
}

impl Io {
    fn output_or_stdout(&self) -> String {
        self.output.clone().unwrap_or_else(|| "-".to_string())
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read(path).context(format!("Failed to open input file: '{}'", path))
    }
}

fn read_text(path: &str) -> Result<String> {
    String::from_utf8(read_input(path)?).context(format!("Input is not valid UTF-8: '{}'", path))
}

fn read_draft(path: &str) -> Result<Draft> {
    let data = read_input(path)?;
    Draft::from_slice(&data).context(format!("Failed to read draft: '{}'", path))
}

fn write_output(path: &str, data: &[u8]) -> Result<()> {
    if path == "-" {
        let mut dst = io::stdout().lock();
        dst.write_all(data).context("Failed to write to stdout")?;
        dst.flush().context("Failed to write to stdout")?;
        Ok(())
    } else {
        serialiser::commit(path, data)
    }
}
