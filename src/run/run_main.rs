use crate::html_doc::{HtmlDoc, ParseError};
use crate::output::SerializableMatch;
use crate::run::{OutputFormat, RunOptions};
use crate::{extract_doc, Query};
use log::debug;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::{env, io};

/// The run's overall possible error.
#[derive(Debug)]
pub enum Error {
    /// The HTML couldn't be parsed.
    ///
    /// This comes from [`HtmlDoc::read`].
    HtmlParse(ParseError),

    /// Couldn't read an input file.
    FileReadError(Input, io::Error),

    /// Couldn't write the result.
    WriteError(io::Error),
}

impl std::error::Error for Error {}

/// Stdin or an input file by path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input {
    Stdin,
    FilePath(String),
}

impl Error {
    pub(crate) fn from_io_error(error: io::Error, file: Input) -> Self {
        Error::FileReadError(file, error)
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Stdin => f.write_str("stdin"),
            Input::FilePath(file) => write!(f, "file {file:?}"),
        }
    }
}

fn portable_errors() -> bool {
    !env::var("HTML_EXTRACT_PORTABLE_ERRORS").unwrap_or_default().is_empty()
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::HtmlParse(err) => {
                writeln!(f, "HTML parse error:")?;
                if portable_errors() {
                    writeln!(f, "parse html error: {}", err.cause().kind())
                } else {
                    writeln!(f, "{err}")
                }
            }
            Error::FileReadError(file, err) => {
                if portable_errors() {
                    writeln!(f, "{} while reading {file}", err.kind())
                } else {
                    writeln!(f, "{err} while reading {file}")
                }
            }
            Error::WriteError(err) => writeln!(f, "{err} while writing output"),
        }
    }
}

/// A simple facade for handling I/O.
///
/// This trait lets you do "I/O-y stuff" like mocking out stdin or reading files. The [`run`] method uses it.
pub trait OsFacade {
    /// Read stdin (or your mock of it) to a `String`.
    fn read_stdin(&self) -> io::Result<String>;

    /// Read a file path (or your mock of one) to a `String`.
    fn read_file(&self, path: &str) -> io::Result<String>;

    /// Get a writer for stdout (or your mock of it).
    fn stdout(&mut self) -> impl Write;

    /// Handle an error.
    fn write_error(&mut self, err: Error);

    /// Read a slice of file paths into a single, concatenated `String`.
    ///
    /// The default implementation (which you should feel free to use) treats the file path `"-"` as stdin. The first
    /// `"-"` reads all of stdin (via [`Self::read_stdin`]), and subsequent `"-"`s get silently ignored.
    fn read_all(&self, html_file_paths: &[String]) -> Result<String, Error> {
        if html_file_paths.is_empty() {
            return self.read_stdin().map_err(|err| Error::from_io_error(err, Input::Stdin));
        }
        let mut contents = String::new();
        let mut have_read_stdin = false;
        for path in html_file_paths {
            if path == "-" {
                if !have_read_stdin {
                    contents.push_str(
                        &self
                            .read_stdin()
                            .map_err(|err| Error::from_io_error(err, Input::Stdin))?,
                    );
                    have_read_stdin = true
                }
            } else {
                let path_contents = self
                    .read_file(path)
                    .map_err(|err| Error::from_io_error(err, Input::FilePath(path.to_string())))?;
                contents.push_str(&path_contents);
            }
            contents.push('\n');
        }
        Ok(contents)
    }
}

/// Runs html-extract end to end.
///
/// This uses the provided [RunOptions] and [OsFacade] to read the input into an [`HtmlDoc`], finds the first match for
/// the selector in [`RunOptions::selector`], and writes it to the given [`OsFacade`] in the format specified by
/// [`RunOptions::output`].
///
/// Returns whether anything matched.
pub fn run(cli: &RunOptions, os: &mut impl OsFacade) -> bool {
    match run_or_error(cli, os) {
        Ok(ok) => ok,
        Err(err) => {
            os.write_error(err);
            false
        }
    }
}

fn run_or_error(cli: &RunOptions, os: &mut impl OsFacade) -> Result<bool, Error> {
    let contents_str = os.read_all(&cli.html_file_paths)?;
    let doc = HtmlDoc::read(contents_str.as_bytes()).map_err(Error::HtmlParse)?;

    let query = Query::compile(&cli.selector);
    debug!("compiled selector {:?} to {query:?}", cli.selector);

    let found = extract_doc(&doc, &query);
    let found_any = found.is_some();

    if !cli.quiet {
        let mut stdout = os.stdout();
        match cli.output {
            OutputFormat::Html => {
                if let Some(html) = &found {
                    writeln!(stdout, "{html}").map_err(Error::WriteError)?;
                }
            }
            OutputFormat::Json => {
                let serializable = SerializableMatch::new(&cli.selector, &query, found.as_deref());
                serde_json::to_writer(&mut stdout, &serializable).map_err(|err| Error::WriteError(err.into()))?;
            }
        }
        stdout.flush().map_err(Error::WriteError)?;
    }

    Ok(found_any)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::run::RunOptionsBuilder;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockIo {
        stdin: Option<String>,
        files: HashMap<String, String>,
        stdout: Vec<u8>,
        errors: Vec<String>,
    }

    impl OsFacade for MockIo {
        fn read_stdin(&self) -> io::Result<String> {
            self.stdin
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "no stdin"))
        }

        fn read_file(&self, path: &str) -> io::Result<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not found"))
        }

        fn stdout(&mut self) -> impl Write {
            &mut self.stdout
        }

        fn write_error(&mut self, err: Error) {
            self.errors.push(err.to_string())
        }
    }

    impl MockIo {
        fn with_stdin(stdin: &str) -> Self {
            Self {
                stdin: Some(stdin.to_string()),
                ..Self::default()
            }
        }

        fn out(&self) -> &str {
            std::str::from_utf8(&self.stdout).unwrap()
        }
    }

    fn options(selector: &str) -> RunOptionsBuilder {
        let mut builder = RunOptionsBuilder::default();
        builder.selector(selector);
        builder
    }

    #[test]
    fn html_output() {
        let mut os = MockIo::with_stdin(r#"<a class="foo">1</a><a class="bar">2</a>"#);
        let found = run(&options("a.bar").build().unwrap(), &mut os);
        assert!(found);
        assert_eq!(os.out(), "<a class=\"bar\">2</a>\n");
        assert!(os.errors.is_empty());
    }

    #[test]
    fn html_output_no_match() {
        let mut os = MockIo::with_stdin("<p>hi</p>");
        let found = run(&options("h1").build().unwrap(), &mut os);
        assert!(!found);
        assert_eq!(os.out(), "");
        assert!(os.errors.is_empty());
    }

    #[test]
    fn json_output() {
        let mut os = MockIo::with_stdin(r#"<a id="a">1</a><a id="b">2</a>"#);
        let opts = options("#b").output(OutputFormat::Json).build().unwrap();
        assert!(run(&opts, &mut os));
        let actual: serde_json::Value = serde_json::from_str(os.out()).unwrap();
        assert_eq!(
            actual,
            serde_json::json!({
                "selector": "#b",
                "query": {"name": null, "id": "b", "classes": []},
                "html": "<a id=\"b\">2</a>",
            })
        );
    }

    #[test]
    fn quiet() {
        let mut os = MockIo::with_stdin("<p>hi</p>");
        let opts = options("p").quiet(true).build().unwrap();
        assert!(run(&opts, &mut os));
        assert_eq!(os.out(), "");
    }

    #[test]
    fn files_concatenated() {
        let mut os = MockIo::with_stdin("<i>from stdin</i>");
        os.files.insert("one.html".to_string(), "<p>one</p>".to_string());
        os.files.insert("two.html".to_string(), "<p>two</p>".to_string());
        let opts = options("")
            .html_file_paths(vec![
                "one.html".to_string(),
                "-".to_string(),
                "two.html".to_string(),
                "-".to_string(),
            ])
            .build()
            .unwrap();
        assert!(run(&opts, &mut os));
        // each input is followed by a newline, including the ignored second "-"; then the output's own newline
        assert_eq!(os.out(), "<p>one</p>\n<i>from stdin</i>\n<p>two</p>\n\n\n");
    }

    #[test]
    fn missing_file() {
        let mut os = MockIo::with_stdin("");
        let opts = options("p").html_file_paths(vec!["nope.html".to_string()]).build().unwrap();
        assert!(!run(&opts, &mut os));
        assert_eq!(os.errors, ["not found while reading file \"nope.html\"\n"]);
    }

    #[test]
    fn stdin_failure() {
        let mut os = MockIo::default();
        assert!(!run(&options("p").build().unwrap(), &mut os));
        assert_eq!(os.errors, ["no stdin while reading stdin\n"]);
    }
}
