use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xmldoc::{
    CommentBlock, CommentRules, ExpandConfig, Expander, FormatSettings,
    LanguageType, Layout, LineEnding, RawLine, classify,
};

#[derive(Parser, Debug)]
#[clap(
    name = "xmldoc",
    about = "A tool to generate XML documentation comments for C# code",
    version
)]
struct Cli {
    /// Print debug logs (RUST_LOG takes precedence)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand every lone `///` line in a file or directory
    Expand {
        input: PathBuf,

        /// JSON settings file (tab_size, translate_tabs_to_spaces, default_line_ending)
        #[clap(short, long)]
        settings: Option<PathBuf>,

        /// Indentation used when no settings file is given
        #[clap(long, value_enum, default_value_t = IndentStyle::Spaces)]
        indent: IndentStyle,

        /// File extensions to process
        #[clap(short, long = "ext", default_value = "cs")]
        extensions: Vec<String>,

        /// Print the expanded content instead of writing it back
        #[clap(long)]
        dry_run: bool,
    },

    /// Classify a declaration line
    Classify {
        line: String,

        /// Also print the comment block generated for the line
        #[clap(short, long)]
        block: bool,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum IndentStyle {
    Spaces,
    Tabs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Expand {
            input,
            settings,
            indent,
            extensions,
            dry_run,
        } => {
            let settings = match settings {
                Some(path) => FormatSettings::load(&path)?,
                None => FormatSettings {
                    translate_tabs_to_spaces: matches!(indent, IndentStyle::Spaces),
                    ..Default::default()
                },
            };

            let mut config = ExpandConfig::new(input, settings);
            config.extensions = extensions;
            config.dry_run = dry_run;

            let reports = Expander::new(config).run()?;
            for report in &reports {
                if dry_run {
                    println!("// {}\n{}", report.path.display(), report.content);
                } else {
                    println!("{}: {} comment(s) added", report.path.display(), report.blocks);
                }
            }
            if reports.is_empty() {
                println!("No comment triggers found");
            }
        }
        Command::Classify { line, block } => {
            let rules = CommentRules::for_language(LanguageType::CSharp);
            let result = classify(std::iter::once(RawLine::new(0, &line)), &rules);
            println!("{}", result.category);

            if block {
                let settings = FormatSettings {
                    translate_tabs_to_spaces: true,
                    default_line_ending: LineEnding::Unix,
                    ..Default::default()
                };
                let layout = Layout::new(&rules, &settings, 0, rules.sigil.len());
                let comment = CommentBlock::for_declaration(result.category, &line, &layout);
                println!("{}{}", rules.sigil, comment.text);
                println!("{}", line.trim());
            }
        }
    }

    Ok(())
}
