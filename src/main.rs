use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use svg_style_clean::{Options, clean_bytes};
use tracing_subscriber::EnvFilter;

const README: &str = "\
svg-style-clean removes properties from inline SVG `style` attributes that
do not change how the image renders, making the file smaller.

Only the `style` attribute of each element is read. Documents that rely on
<style> sheets or class selectors must not be cleaned with this tool. Files
written by Inkscape keep all their styling inline and work well.

1. Some properties only apply to some tags. Markers, for example, apply to
   paths and lines but not to rectangles or circles. Such properties can be
   removed.

   Option -a

2. A property that inherits and repeats the value its parent already set
   is redundant:

   <svg>
   <g style=\"stroke-width:2px\">
      <line style=\"stroke-width:2px\" x1=\"0\"/>
      <line style=\"stroke-width:3px\" x1=\"0\"/>
   </g>
   </svg>

   becomes

   <svg>
   <g style=\"stroke-width:2px\">
      <line x1=\"0\"/>
      <line style=\"stroke-width:3px\" x1=\"0\"/>
   </g>
   </svg>

   Option -i

3. Properties set to their default value are removed as well.

   Option -i

Without -a or -i the document is parsed and written back unchanged, which
together with -p makes the tool a pretty-printer.
";

#[derive(Parser)]
#[command(name = "svg-style-clean")]
#[command(about = "Strip redundant inline style properties from SVG files", long_about = None)]
struct Cli {
    /// SVG file name (use - for stdin)
    #[arg(short, long, value_name = "FILE", required_unless_present = "readme")]
    file: Option<PathBuf>,

    /// Output file (use - for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Do not print any messages on stderr
    #[arg(short, long)]
    quiet: bool,

    /// Pretty print the SVG
    #[arg(short, long = "pretty-print")]
    pretty: bool,

    /// Remove properties that do not apply to the element's tag
    #[arg(short = 'a')]
    inapplicable: bool,

    /// Remove properties with the same value as the parent's, or with default values
    #[arg(short = 'i')]
    redundant: bool,

    /// Print the README, with more details and examples
    #[arg(short, long)]
    readme: bool,

    /// Print size comparison and removal counts
    #[arg(short, long)]
    stats: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.readme {
        print!("{}", README);
        return Ok(());
    }

    let filter = if cli.quiet {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();

    let input_path = cli.file.ok_or("no input file given")?;

    // Read input
    let input = if input_path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(&input_path)?
    };

    let options = Options {
        remove_inapplicable: cli.inapplicable,
        remove_redundant: cli.redundant,
        pretty: cli.pretty,
    };

    let (output, report) = clean_bytes(&input, &options)?;

    // Write output
    if cli.output.as_os_str() == "-" {
        io::stdout().write_all(&output)?;
    } else {
        fs::write(&cli.output, &output)?;
    }

    if cli.stats {
        let saved = input.len().saturating_sub(output.len());
        let percent = if input.is_empty() {
            0.0
        } else {
            (saved as f64 / input.len() as f64) * 100.0
        };
        eprintln!(
            "{} -> {} bytes ({:.1}% smaller)",
            input.len(),
            output.len(),
            percent
        );
        eprintln!(
            "removed {} properties ({} inapplicable, {} inherited, {} default), {} malformed",
            report.removed(),
            report.inapplicable,
            report.inherited,
            report.default,
            report.malformed
        );
    }

    Ok(())
}
