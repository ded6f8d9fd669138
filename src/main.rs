//! Command line front end for the weasy generator.
//!
//! ```bash
//! # HTML file to PDF
//! weasy pdf page.html page.pdf --stylesheet print.css
//!
//! # Treat the input as raw HTML content, overwrite the target
//! weasy pdf snippet.html out.pdf --html --overwrite
//!
//! # Show the command without running it
//! weasy command page.html page.pdf --option media-type=print
//!
//! # Renderer version
//! WEASYPRINT_BINARY=/opt/weasyprint/bin/weasyprint weasy version
//! ```

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use weasy::{
    Generator, GeneratorConfig, GeneratorError, MediaKind, OptionValue, ShellRunner, Version,
};

#[derive(Parser)]
#[command(name = "weasy")]
#[command(about = "Render HTML to PDF or PNG with WeasyPrint")]
struct Cli {
    /// Renderer binary (overrides the config file)
    #[arg(long, env = "WEASYPRINT_BINARY", global = true)]
    binary: Option<String>,

    /// JSON generator configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Renderer timeout in seconds
    #[arg(long, global = true, conflicts_with = "no_timeout")]
    timeout: Option<u64>,

    /// Let the renderer run for as long as it takes
    #[arg(long, global = true)]
    no_timeout: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a PDF
    Pdf(RenderArgs),

    /// Render a PNG (renderers older than 53 only)
    Image(RenderArgs),

    /// Print the renderer version
    Version,

    /// Print the command line without running it
    Command {
        /// Build the image command instead of the PDF one
        #[arg(long)]
        image: bool,

        #[command(flatten)]
        args: RenderArgs,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Input path or URL
    input: String,

    /// Output file
    output: PathBuf,

    /// Stylesheet path, URL or inline CSS (repeatable)
    #[arg(long)]
    stylesheet: Vec<String>,

    /// Attachment path or URL (repeatable)
    #[arg(long)]
    attachment: Vec<String>,

    /// Any declared option as `key=value`; a bare `key` sets a flag
    #[arg(long = "option", value_name = "KEY[=VALUE]")]
    options: Vec<String>,

    /// Replace an existing output file
    #[arg(long)]
    overwrite: bool,

    /// Read `input` as a file of HTML content instead of passing its path
    #[arg(long)]
    html: bool,
}

impl RenderArgs {
    fn overrides(&self) -> Vec<(String, OptionValue)> {
        let mut overrides: Vec<(String, OptionValue)> =
            self.options.iter().map(|raw| parse_option(raw)).collect();
        if !self.stylesheet.is_empty() {
            overrides.push(("stylesheet".into(), OptionValue::List(self.stylesheet.clone())));
        }
        if !self.attachment.is_empty() {
            overrides.push(("attachment".into(), OptionValue::List(self.attachment.clone())));
        }
        overrides
    }
}

fn parse_option(raw: &str) -> (String, OptionValue) {
    match raw.split_once('=') {
        Some((key, value)) => (key.to_string(), OptionValue::from(value)),
        None => (raw.to_string(), OptionValue::Bool(true)),
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GeneratorError> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(binary) = &cli.binary {
        config.binary = binary.clone();
    }
    if cli.no_timeout {
        config.timeout_secs = None;
    } else if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }

    match cli.command {
        Commands::Pdf(args) => render(MediaKind::Pdf, &config, &args),
        Commands::Image(args) => render(MediaKind::Image, &config, &args),
        Commands::Version => {
            let version = Version::probe(
                &ShellRunner::new(),
                &config.binary,
                config.env().as_ref(),
                config.timeout(),
            )?;
            println!("{version}");
            Ok(())
        }
        Commands::Command { image, args } => {
            let kind = if image { MediaKind::Image } else { MediaKind::Pdf };
            let generator = Generator::from_config(kind, &config)?;
            let owned = args.overrides();
            let overrides = borrow_overrides(&owned);
            let output = args.output.to_string_lossy();
            println!("{}", generator.command(&args.input, &output, &overrides)?);
            Ok(())
        }
    }
}

fn render(kind: MediaKind, config: &GeneratorConfig, args: &RenderArgs) -> Result<(), GeneratorError> {
    let mut generator = Generator::from_config(kind, config)?;
    let owned = args.overrides();
    let overrides = borrow_overrides(&owned);

    if args.html {
        let html = fs::read_to_string(&args.input).map_err(|source| GeneratorError::FileRead {
            path: PathBuf::from(&args.input),
            source,
        })?;
        generator.generate_from_html(&html, &args.output, &overrides, args.overwrite)?;
    } else {
        generator.generate(&args.input, &args.output, &overrides, args.overwrite)?;
    }

    println!("Generated {}", args.output.display());
    Ok(())
}

fn borrow_overrides(owned: &[(String, OptionValue)]) -> Vec<(&str, OptionValue)> {
    owned.iter().map(|(k, v)| (k.as_str(), v.clone())).collect()
}
