// ABOUTME: CLI argument definitions for the gallery application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::completions::Shell;
use crate::output::Format;

#[derive(Parser, Debug)]
#[command(name = "gallery")]
#[command(about = "Search and transform images hosted on Cloudinary", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find images carrying a tag
    Search {
        /// Tag to search for (e.g., sunset)
        tag: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Rewrite the links of image descriptors with a transformation
    Transform {
        /// Transformation kind: resize, optimize or crop
        kind: String,

        /// Parameters: `WIDTH CROP` for resize, `FORMAT` for optimize, `HEIGHT WIDTH CROP` for crop
        params: Vec<String>,

        /// Read descriptors from a JSON file instead of stdin
        #[arg(long, short = 'i', value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the delivery URL for one public id
    Url {
        /// Public id of the image (e.g., photos/p2)
        public_id: String,

        /// Optional transformation kind
        kind: Option<String>,

        /// Parameters for the transformation
        params: Vec<String>,
    },
    /// Generate shell completion scripts
    #[command(after_long_help = crate::completions::installation_instructions())]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output selection shared by commands that print image lists
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long, conflicts_with = "html")]
    pub json: bool,

    /// Pretty print JSON output
    #[arg(long, requires = "json")]
    pub pretty: bool,

    /// Output as an HTML gallery page
    #[arg(long)]
    pub html: bool,
}

impl OutputArgs {
    /// Explicit flags win over the configured format; table is the fallback
    pub fn format(&self, preferred: Option<Format>) -> Format {
        if self.json {
            Format::Json
        } else if self.html {
            Format::Html
        } else {
            preferred.unwrap_or(Format::Table)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure() {
        Cli::command().debug_assert();

        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "gallery");
        for name in ["search", "transform", "url", "completions"] {
            assert!(cmd.find_subcommand(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["gallery", "search", "sunset", "--json", "--pretty"])
            .expect("should parse");

        match cli.command {
            Commands::Search { tag, output } => {
                assert_eq!(tag, "sunset");
                assert!(output.json && output.pretty);
                assert_eq!(output.format(Some(Format::Html)), Format::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_transform_params() {
        let cli = Cli::try_parse_from([
            "gallery", "-v", "transform", "crop", "200", "300", "thumb", "--input", "images.json",
        ])
        .expect("should parse");

        assert!(cli.verbose);
        match cli.command {
            Commands::Transform {
                kind,
                params,
                input,
                output,
            } => {
                assert_eq!(kind, "crop");
                assert_eq!(params, vec!["200", "300", "thumb"]);
                assert_eq!(input, Some(PathBuf::from("images.json")));
                assert_eq!(output.format(None), Format::Table);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_url_without_transformation() {
        let cli = Cli::try_parse_from(["gallery", "url", "photos/p2"]).expect("should parse");
        match cli.command {
            Commands::Url {
                public_id,
                kind,
                params,
            } => {
                assert_eq!(public_id, "photos/p2");
                assert!(kind.is_none());
                assert!(params.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_flag_conflicts() {
        assert!(Cli::try_parse_from(["gallery", "search", "x", "--json", "--html"]).is_err());
        assert!(Cli::try_parse_from(["gallery", "search", "x", "--pretty"]).is_err());
    }

    #[test]
    fn test_preferred_format_fallback() {
        let args = OutputArgs::default();
        assert_eq!(args.format(Some(Format::Html)), Format::Html);

        let html = OutputArgs {
            html: true,
            ..Default::default()
        };
        assert_eq!(html.format(Some(Format::Json)), Format::Html);
    }
}
