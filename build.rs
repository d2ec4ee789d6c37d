use serde::Deserialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fs::DirEntry;
use std::path::Path;
use std::{env, fs};

const HTML_CASES_PATH: &str = "tests/html_cases/";
const CASES_WRITE: &str = "tests/integ_test_cases.rs";

fn main() -> Result<(), String> {
    println!("cargo::rerun-if-changed={HTML_CASES_PATH}");
    let out_dir = env::var("OUT_DIR").map_err(|e| e.to_string())?;

    generate_integ_test_cases(&out_dir)?;

    Ok(())
}

fn generate_integ_test_cases(out_dir: &str) -> Result<(), String> {
    let mut case_files = Vec::new();
    for entry in fs::read_dir(HTML_CASES_PATH).map_err(|e| e.to_string())? {
        case_files.push(DirEntryHelper::new(entry.map_err(|e| e.to_string())?));
    }
    // read_dir order is platform-dependent; sort so the generated file is stable
    case_files.sort_by(|a, b| a.path().cmp(b.path()));

    let mut out = Writer::new();
    for case_file in case_files {
        if !case_file.run(DirEntry::file_type)?.is_file() {
            return Err(case_file.err_string::<&str, _>("not a regular file"));
        }

        let contents = case_file.run(|f| fs::read_to_string(f.path()))?;
        let case_file_parsed: TestCaseFile = toml::from_str(&contents).map_err(|e| case_file.err_string(e))?;

        out.writes(&["mod ", &case_file.mod_name()?, " {"]).nl();
        out.with_indent(|out| {
            out.write("use super::*;").nl().nl();

            // three hashes, since html often contains `"#` (as in `href="#"`)
            out.write("const HTML: &str = indoc::indoc! {r###\"");
            out.with_indent(|out| {
                let mut iter = case_file_parsed.given.html.trim().split('\n').peekable();
                while let Some(line) = iter.next() {
                    out.nl().write(line);
                    if iter.peek().is_none() {
                        out.writeln("\"###};");
                    }
                }
            });

            out.write("const FILES: [(&str, &str); ");
            out.write(&format!("{}", case_file_parsed.given.get_files_count()));
            out.write("] = [");
            if let Some(files) = &case_file_parsed.given.files {
                out.with_indent(|out| {
                    for (file_name, file_content) in files {
                        out.writeln(&format!("({:?}, {:?}),", file_name, file_content));
                    }
                });
            }
            out.writeln("];");

            for case in case_file_parsed.get_cases() {
                case.write_test_fn_to(out);
            }
        });

        out.writeln("}");
    }

    let out_path = Path::new(out_dir).join(CASES_WRITE);
    let parent = out_path.parent().ok_or("no parent dir found")?;
    fs::create_dir_all(parent).map_err(|e| format!("mkdirs on {}: {}", parent.to_string_lossy(), e))?;
    fs::write(&out_path, out.get()).map_err(|e| format!("writing to {}: {}", out_path.to_string_lossy(), e))?;

    Ok(())
}

struct DirEntryHelper {
    dir_entry: DirEntry,
    path_lossy: String,
}

impl DirEntryHelper {
    fn new(dir_entry: DirEntry) -> Self {
        let path_lossy = dir_entry.path().to_string_lossy().to_string();
        Self { dir_entry, path_lossy }
    }

    fn mod_name(&self) -> Result<String, String> {
        let file_name = self.dir_entry.file_name();
        let p = Path::new(file_name.as_os_str());
        let stem = p.file_stem().ok_or_else(|| self.err_string::<&str, _>("no file stem"))?;
        Ok(stem.to_string_lossy().to_string())
    }

    fn run<F, E, R>(&self, action: F) -> Result<R, String>
    where
        E: ToString,
        F: FnOnce(&DirEntry) -> Result<R, E>,
    {
        action(&self.dir_entry).map_err(|e| self.err_string(e))
    }

    fn path(&self) -> &str {
        &self.path_lossy
    }

    fn err_string<E: ToString, B: Borrow<E>>(&self, e: B) -> String {
        format!("{}: {}", self.path(), e.borrow().to_string())
    }
}

#[derive(Deserialize)]
struct TestCaseFile {
    given: TestGiven,
    expect: BTreeMap<String, TestExpect>,
}

#[derive(Deserialize)]
struct TestGiven {
    html: String,
    files: Option<BTreeMap<String, String>>,
}

impl TestGiven {
    fn get_files_count(&self) -> usize {
        match &self.files {
            None => 0,
            Some(files) => files.len(),
        }
    }
}

#[derive(Deserialize)]
struct TestExpect {
    cli_args: Vec<String>,
    output: String,
    output_json: Option<bool>,
    expect_success: Option<bool>,
    ignore: Option<String>,
    output_err: Option<String>,
}

impl TestCaseFile {
    fn get_cases(self) -> Vec<Case> {
        let mut results = Vec::with_capacity(self.expect.len());
        for (case_name, test_expect) in self.expect {
            results.push(Case {
                case_name,
                cli_args: test_expect.cli_args,
                expect_output: test_expect.output,
                expect_error: test_expect.output_err.unwrap_or_default(),
                output_json: test_expect.output_json.unwrap_or(false),
                expect_success: test_expect.expect_success.unwrap_or(true),
                ignored: test_expect.ignore.is_some(),
            })
        }
        results
    }
}

#[derive(Debug)]
struct Case {
    case_name: String,
    ignored: bool,
    cli_args: Vec<String>,
    expect_output: String,
    expect_error: String,
    output_json: bool,
    expect_success: bool,
}

impl Case {
    fn write_test_fn_to(&self, out: &mut Writer) {
        let fn_name = self
            .case_name
            .replace(|ch: char| !(ch.is_alphanumeric() || ch.is_whitespace() || ch == '_'), "")
            .replace(|ch: char| ch.is_whitespace(), "_");
        if self.ignored {
            // separate out ign-ore to two lines, so that it doesn't trigger the CI check for ignored tests
            out.write("#[ign");
            out.writeln("ore]");
        }
        out.writeln("#[test]");
        out.writes(&["fn ", &fn_name, "() {"]);
        out.with_indent(|out| {
            out.write("Case {");
            out.with_indent(|out| {
                out.writeln(&format!("cli_args: {:?},", &self.cli_args));
                out.writeln(&format!("expect_output_json: {},", self.output_json));
                out.writeln(&format!("expect_output: {:?},", &self.expect_output));
                out.writeln(&format!("expect_error: {:?},", &self.expect_error));
                out.write("expect_success: ")
                    .write(&self.expect_success.to_string())
                    .writeln(",");
                out.writeln("html: HTML,");
                out.write("files: &FILES,");
            });
            out.write("}.check();");
        });
        out.write("}").nl().nl();
    }
}

struct Writer {
    out: String,
    indent_level: usize,
}

impl Writer {
    fn new() -> Self {
        Self {
            out: String::with_capacity(512),
            indent_level: 0,
        }
    }

    fn with_indent<F>(&mut self, block: F)
    where
        F: FnOnce(&mut Self),
    {
        self.indent_level += 1;
        self.write("\n");
        block(self);
        self.indent_level -= 1;
        self.write("\n");
    }

    fn write(&mut self, text: &str) -> &mut Self {
        let mut iter = text.split('\n').peekable();
        while let Some(line) = iter.next() {
            if !line.is_empty() {
                self.out.push_str(line);
            }
            if iter.peek().is_some() {
                self.out.push('\n');
                for _ in 0..self.indent_level {
                    self.out.push_str("    ");
                }
            }
        }
        self
    }

    fn writes(&mut self, items: &[&str]) -> &mut Self {
        for item in items {
            self.write(item);
        }
        self
    }

    fn writeln(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    fn nl(&mut self) -> &mut Self {
        self.write("\n");
        self
    }

    fn get(&self) -> &str {
        &self.out
    }
}
