use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use lessondoc::{Config, Error, Lesson, LessonMeta, Page};

/// Looked up in the working directory when no --config is given.
const LOCAL_CONFIG: &str = "lessondoc.toml";

#[derive(Parser)]
#[command(name = "lessondoc")]
#[command(about = "Render lesson markup to PDF, Typst, HTML or JSON")]
struct Cli {
    /// Input file: lesson markup, or a .toml lesson with metadata and a `body`
    input: PathBuf,

    /// Output file (PDF defaults to the input name with .pdf, other formats to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
    format: Format,

    /// Config file (defaults to ./lessondoc.toml, then built-in defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lesson title, overrides the lesson file
    #[arg(long)]
    title: Option<String>,

    /// Lesson category, overrides the lesson file
    #[arg(long)]
    category: Option<String>,

    /// LeetCode problem number, overrides the lesson file
    #[arg(long)]
    leetcode_id: Option<u32>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pdf,
    Typst,
    Html,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> lessondoc::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(Path::new(LOCAL_CONFIG))?,
    };

    let lesson = read_lesson(&cli.input)?;
    let flags = LessonMeta {
        title: cli.title,
        category: cli.category,
        leetcode_id: cli.leetcode_id,
    };
    let page = build_page(lesson, flags);
    log::info!(
        "parsed {} into {} blocks",
        cli.input.display(),
        page.document.len()
    );

    let bytes = match cli.format {
        Format::Pdf => lessondoc::page_to_pdf(&page, &config)?,
        Format::Typst => lessondoc::page_to_typst(&page, &config).into_bytes(),
        Format::Html => lessondoc::page_to_html(&page, &config).into_bytes(),
        Format::Json => lessondoc::page_to_json(&page)?.into_bytes(),
    };

    match output_path(cli.output, cli.format, &cli.input) {
        Some(path) => {
            fs::write(&path, bytes).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            println!("Created {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|()| stdout.flush())
                .map_err(|source| Error::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }

    Ok(())
}

/// Flag metadata wins over whatever the lesson file set.
fn build_page(lesson: Lesson, flags: LessonMeta) -> Page {
    Lesson::new(lesson.meta.overlay(flags), lesson.body).into_page()
}

/// Where to write the output; `None` means stdout.
fn output_path(output: Option<PathBuf>, format: Format, input: &Path) -> Option<PathBuf> {
    match (output, format) {
        (Some(path), _) => Some(path),
        (None, Format::Pdf) => Some(input.with_extension("pdf")),
        (None, _) => None,
    }
}

/// Read a `.toml` lesson file, or treat any other file as bare markup.
fn read_lesson(path: &Path) -> lessondoc::Result<Lesson> {
    if path.extension().is_some_and(|ext| ext == "toml") {
        return Lesson::load(path);
    }

    let body = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Lesson::new(LessonMeta::default(), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessondoc::Block;
    use tempfile::TempDir;

    #[test]
    fn pdf_defaults_next_to_the_input() {
        let input = Path::new("lessons/two_sum.toml");
        assert_eq!(
            output_path(None, Format::Pdf, input),
            Some(PathBuf::from("lessons/two_sum.pdf"))
        );
    }

    #[test]
    fn text_formats_default_to_stdout() {
        let input = Path::new("two_sum.txt");
        for format in [Format::Typst, Format::Html, Format::Json] {
            assert_eq!(output_path(None, format, input), None);
        }
    }

    #[test]
    fn explicit_output_wins() {
        let out = PathBuf::from("out.html");
        assert_eq!(
            output_path(Some(out.clone()), Format::Html, Path::new("in.txt")),
            Some(out.clone())
        );
        assert_eq!(
            output_path(Some(out.clone()), Format::Pdf, Path::new("in.txt")),
            Some(out)
        );
    }

    #[test]
    fn toml_input_is_a_lesson_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("two_sum.toml");
        fs::write(&path, "title = \"Two Sum\"\nbody = \"- a\\n- b\"\n").unwrap();

        let lesson = read_lesson(&path).unwrap();
        assert_eq!(lesson.meta.title.as_deref(), Some("Two Sum"));
        assert_eq!(lesson.body, "- a\n- b");
    }

    #[test]
    fn other_input_is_bare_markup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("two_sum.txt");
        fs::write(&path, "title = \"not metadata\"").unwrap();

        let lesson = read_lesson(&path).unwrap();
        assert!(lesson.meta.is_empty());
        assert_eq!(lesson.body, "title = \"not metadata\"");
    }

    #[test]
    fn broken_lesson_file_reports_its_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "title = ").unwrap();

        let err = read_lesson(&path).unwrap_err();
        assert!(matches!(err, Error::Lesson { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_input_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = read_lesson(&dir.path().join("gone.txt")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn flags_override_file_metadata() {
        let file = Lesson::new(
            LessonMeta {
                title: Some("From file".into()),
                category: Some("Arrays".into()),
                leetcode_id: Some(1),
            },
            "Body.",
        );
        let flags = LessonMeta {
            title: Some("From flag".into()),
            ..Default::default()
        };

        let page = build_page(file, flags);
        assert_eq!(page.meta.title.as_deref(), Some("From flag"));
        assert_eq!(page.meta.category.as_deref(), Some("Arrays"));
        assert_eq!(page.meta.leetcode_id, Some(1));
        assert!(matches!(page.document.blocks[..], [Block::Paragraph { .. }]));
    }
}
