use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use fortdeps::core::{Project, ProjectConfig};
use fortdeps::formatters::{DotFormatter, JsonCompactFormatter, MakefileFormatter, VerboseFormatter};
use fortdeps::parsers::MacroTable;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "fortdeps",
    version,
    about = "Generate Fortran module dependencies for make"
)]
struct Cli {
    /// Files to process (default: every matching file in --dir)
    #[arg(short, long, value_name = "FILE", num_args = 1..)]
    files: Option<Vec<PathBuf>>,

    /// Directory searched when no files are given
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Comma-separated source file extensions
    #[arg(long, value_name = "EXTS", value_delimiter = ',', default_value = "f90,F90")]
    extensions: Vec<String>,

    /// The macro NAME is replaced by VALUE in 'use' statements
    #[arg(short = 'D', value_name = "NAME=VALUE", num_args = 1.., action = clap::ArgAction::Append)]
    macros: Vec<String>,

    /// Build directory prepended to every object file in the output
    #[arg(short, long, value_name = "DIR")]
    build: Option<PathBuf>,

    /// Output file, '-' for stdout
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    output: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Makefile)]
    format: OutputFormat,

    /// Explain what is done
    #[arg(short, long)]
    verbose: bool,

    /// Overwrite the output file without asking
    #[arg(short = 'w', long)]
    overwrite: bool,

    /// Files to exclude
    #[arg(short, long, value_name = "FILE", num_args = 1..)]
    exclude_files: Vec<PathBuf>,

    /// Modules to ignore
    #[arg(short, long, value_name = "MODULE", num_args = 1..)]
    ignore_modules: Vec<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Makefile,
    Json,
    Dot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        files,
        dir,
        extensions,
        macros,
        build,
        output,
        format,
        verbose,
        overwrite,
        exclude_files,
        ignore_modules,
    } = cli;

    let macros = MacroTable::from_definitions(&macros)?;
    let mut config = ProjectConfig::new()
        .with_root(dir)
        .with_extensions(extensions)
        .with_exclude_files(exclude_files)
        .with_ignore_modules(ignore_modules)
        .with_macros(macros);
    if let Some(files) = files {
        config = config.with_files(files);
    }

    let project = Project::load(&config)?;

    if verbose {
        let listing = VerboseFormatter::new();
        eprint!("{}", listing.format_units(&project));
        eprint!("{}", listing.format_files(&project));
    }

    let confirm = |path: &Path| overwrite || confirm_overwrite(path);
    let written = match format {
        OutputFormat::Makefile => MakefileFormatter::new()
            .with_build_dir(build.unwrap_or_default())
            .format_to_file(&project, &output, confirm)?,
        OutputFormat::Json => JsonCompactFormatter::new()
            .with_pretty(true)
            .format_to_file(&project, &output, confirm)?,
        OutputFormat::Dot => DotFormatter::new().format_to_file(&project, &output, confirm)?,
    };

    if !written {
        eprintln!("Not overwriting {}", output.display());
    }

    Ok(())
}

fn confirm_overwrite(path: &Path) -> bool {
    eprintln!("Warning: file '{}' exists.", path.display());
    eprint!("Overwrite? Y... for yes. ");
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => answer.trim_start().to_lowercase().starts_with('y'),
        Err(_) => false,
    }
}
