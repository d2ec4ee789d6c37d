use clap::{Parser, ValueEnum};
use derive_builder::Builder;
use std::fmt::{Display, Formatter};

/// Command-line arguments for the `html-extract` binary.
#[derive(Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Parser)]
#[command(version, about, long_about = None)]
#[doc(hidden)]
pub struct CliOptions {
    /// Output format.
    #[arg(long, short, default_value_t = OutputFormat::Html)]
    pub(crate) output: OutputFormat,

    /// Quiet: do not print anything to stdout. The exit code will still be 0 if an element matches, and non-0 if none
    /// does.
    #[arg(long, short)]
    pub(crate) quiet: bool,

    /// The selector: an optional tag name, then any number of `#id` and `.class` segments, such as `a.bar` or
    /// `div#main.wide`. An empty selector matches the whole document.
    #[arg(value_name = "selector")]
    pub(crate) selector: String,

    /// An optional list of HTML files to parse, by path. If not provided, standard input will be used.
    ///
    /// If these are provided, they will be treated as if they were all concatenated into a single document.
    ///
    /// A path of "-" represents standard input. All but the first "-" are ignored.
    #[arg()]
    pub(crate) html_file_paths: Vec<String>,
}

/// Options analogous to the `html-extract` CLI's arguments.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Builder)]
#[builder(default)]
pub struct RunOptions {
    /// How to write the result.
    pub output: OutputFormat,

    /// Don't write anything; only report whether there was a match.
    pub quiet: bool,

    /// The selector string.
    #[builder(setter(into))]
    pub selector: String,

    /// Input files to read, or `-` for stdin. Empty means stdin.
    pub html_file_paths: Vec<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output: OutputFormat::Html,
            quiet: false,
            selector: String::new(),
            html_file_paths: Vec::new(),
        }
    }
}

impl From<CliOptions> for RunOptions {
    fn from(value: CliOptions) -> Self {
        Self {
            output: value.output,
            quiet: value.quiet,
            selector: value.selector,
            html_file_paths: value.html_file_paths,
        }
    }
}

/// Output formats, analogous to `--output` in the CLI.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum OutputFormat {
    /// Output the matched element's HTML, followed by a newline. Nothing is written if there's no match.
    #[default]
    Html,

    /// Output a JSON object with the selector, the query it compiled to, and the matched HTML (or `null`).
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let self_str = match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        };
        f.write_str(self_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::utils_for_test::*;
    use clap::Error;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        CliOptions::command().debug_assert();
    }

    #[test]
    fn empty_selector_equals_default() {
        let result = CliOptions::try_parse_from(["html-extract", ""]);
        unwrap!(result, Ok(cli));
        let from_cli: RunOptions = cli.into();
        assert_eq!(from_cli, RunOptions::default());
    }

    #[test]
    fn selector_is_required() {
        let result = CliOptions::try_parse_from(["html-extract"]);
        check_err(&result, "the following required arguments were not provided:");
    }

    #[test]
    fn selector_and_files() {
        let result = CliOptions::try_parse_from(["html-extract", "a.bar", "one.html", "-"]);
        unwrap!(result, Ok(cli));
        let run_opts: RunOptions = cli.into();
        assert_eq!(run_opts.selector, "a.bar");
        assert_eq!(run_opts.html_file_paths, ["one.html", "-"]);
    }

    #[test]
    fn json_and_quiet() {
        let result = CliOptions::try_parse_from(["html-extract", "--output", "json", "-q", "#b"]);
        unwrap!(result, Ok(cli));
        let run_opts: RunOptions = cli.into();
        assert_eq!(run_opts.output, OutputFormat::Json);
        assert!(run_opts.quiet);
        assert_eq!(run_opts.selector, "#b");
    }

    #[test]
    fn unknown_output_format() {
        let result = CliOptions::try_parse_from(["html-extract", "--output", "xml", "p"]);
        check_err(&result, "invalid value 'xml' for '--output <OUTPUT>'");
    }

    #[test]
    fn builder() {
        let built = RunOptionsBuilder::default()
            .selector("h1")
            .output(OutputFormat::Json)
            .build();
        unwrap!(built, Ok(opts));
        assert_eq!(opts.selector, "h1");
        assert_eq!(opts.output, OutputFormat::Json);
        assert!(!opts.quiet);
        assert!(opts.html_file_paths.is_empty());
    }

    fn check_err(result: &Result<CliOptions, Error>, expect: &str) {
        unwrap!(result, Err(e));
        let e_str = e.to_string();
        let first_line = e_str.split('\n').next().expect("no error string found");
        let mut expect_full = "error: ".to_string();
        expect_full.push_str(expect);
        assert_eq!(first_line, &expect_full);
    }
}
