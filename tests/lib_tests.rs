use clap::Parser;
use ocrpdf::engine::{
    Cli, build_opts, extract_args, first_line, glob_match, trim_space, trim_space_end,
    validate_opts, write_output,
};
use ocrpdf::pipeline::PipelineTuning;
use ocrpdf::utils::{WorkDir, apply_file_to_opts, load_ocrpdf_toml, parse_ocrpdf_toml};
use ocrpdf::{OcrError, Opts};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// --- glob_match ---

#[test]
fn test_glob_match_suffix() {
    assert!(glob_match("*.tif", "page-000.tif"));
    assert!(glob_match("*.tif", ".tif"));
    assert!(!glob_match("*.tif", "page-000.tiff"));
    assert!(!glob_match("*.tif", "page-000.png"));
}

#[test]
fn test_glob_match_question_and_literal() {
    assert!(glob_match("page-??.tif", "page-01.tif"));
    assert!(!glob_match("page-??.tif", "page-1.tif"));
    assert!(glob_match("exact", "exact"));
    assert!(!glob_match("exact", "exactly"));
}

#[test]
fn test_glob_match_inner_star() {
    assert!(glob_match("p*-*.tif", "page-000.tif"));
    assert!(glob_match("*", ""));
    assert!(!glob_match("a*b", "acc"));
}

// --- first_line ---

#[test]
fn test_first_line_takes_first_only() {
    assert_eq!(first_line(b"Error: bad\nat line 2\n"), "Error: bad");
}

#[test]
fn test_first_line_skips_blank_and_trims() {
    assert_eq!(first_line(b"\n   \n  msg here \r\nnext"), "msg here");
    assert_eq!(first_line(b""), "");
}

#[test]
fn test_first_line_trims_unicode_space() {
    assert_eq!(
        first_line("\u{3000}\n\u{00A0}Tesseract failed\u{00A0}\n".as_bytes()),
        "Tesseract failed"
    );
}

#[test]
fn test_trim_space_helpers() {
    assert_eq!(trim_space_end("a b\u{2028}\t".as_bytes()), b"a b");
    assert_eq!(trim_space_end(b"   "), b"");
    assert_eq!(trim_space(" \u{85}x\u{A0} ".as_bytes()), b"x");
    assert_eq!(trim_space(b" \xff x "), b"\xff x");
}

// --- extraction arguments ---

fn args_of(opts: &Opts) -> Vec<OsString> {
    extract_args(opts, Path::new("/tmp/work"))
}

#[test]
fn test_extract_args_without_last() {
    let opts = Opts {
        input: PathBuf::from("doc.pdf"),
        first_page: 3,
        ..Default::default()
    };
    let expected: Vec<OsString> = ["-tiff", "-f", "3", "doc.pdf", "/tmp/work/page"]
        .iter()
        .map(OsString::from)
        .collect();
    assert_eq!(args_of(&opts), expected);
}

#[test]
fn test_extract_args_with_last() {
    let opts = Opts {
        input: PathBuf::from("doc.pdf"),
        first_page: 2,
        last_page: Some(5),
        ..Default::default()
    };
    let args = args_of(&opts);
    assert_eq!(&args[3..5], &[OsString::from("-l"), OsString::from("5")]);
}

#[test]
fn test_extract_args_last_before_first_ignored() {
    let opts = Opts {
        input: PathBuf::from("doc.pdf"),
        first_page: 5,
        last_page: Some(2),
        ..Default::default()
    };
    assert!(!args_of(&opts).contains(&OsString::from("-l")));
}

// --- tuning ---

#[test]
fn test_tuning_override_capped_by_items() {
    assert_eq!(PipelineTuning::for_items(3, Some(16)).num_threads, 3);
    assert_eq!(PipelineTuning::for_items(100, Some(4)).num_threads, 4);
}

#[test]
fn test_tuning_never_zero() {
    assert_eq!(PipelineTuning::for_items(10, Some(0)).num_threads, 1);
    assert!(PipelineTuning::for_items(10, None).num_threads >= 1);
}

// --- work directory ---

#[test]
fn test_workdir_release_is_idempotent() {
    let wd = WorkDir::acquire().unwrap();
    let path = wd.path().to_path_buf();
    std::fs::write(path.join("page-000.tif"), b"x").unwrap();
    assert!(path.is_dir());
    assert!(wd.is_held());

    wd.release().unwrap();
    assert!(!path.exists());
    assert!(!wd.is_held());
    wd.release().unwrap();
}

#[test]
fn test_workdir_removed_on_drop() {
    let path = {
        let wd = WorkDir::acquire().unwrap();
        wd.path().to_path_buf()
    };
    assert!(!path.exists());
}

#[test]
fn test_workdir_prefix() {
    let wd = WorkDir::acquire().unwrap();
    let name = wd.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("ocrpdf-"));
}

// --- settings file ---

#[test]
fn test_settings_file_applied() {
    let file = parse_ocrpdf_toml(
        "[settings]\nlanguage = \"rus\"\nfilters = [\"rus.rules\"]\nthreads = 3\nverbose = true\n",
    )
    .unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, Path::new("/cfg"), &mut opts);
    assert_eq!(opts.language, "rus");
    assert_eq!(opts.filters, vec![PathBuf::from("/cfg/rus.rules")]);
    assert_eq!(opts.num_threads, Some(3));
    assert!(opts.verbose);
}

#[test]
fn test_settings_file_partial_keeps_defaults() {
    let file = parse_ocrpdf_toml("[settings]\nthreads = 2\n").unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, Path::new("."), &mut opts);
    assert_eq!(opts.language, "eng");
    assert!(opts.filters.is_empty());
    assert_eq!(opts.num_threads, Some(2));
}

#[test]
fn test_load_settings_missing_and_malformed() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_ocrpdf_toml(dir.path()).unwrap().is_none());
    std::fs::write(dir.path().join(".ocrpdf.toml"), "[settings\n").unwrap();
    assert!(load_ocrpdf_toml(dir.path()).is_err());
}

// --- CLI options ---

#[test]
fn test_cli_defaults() {
    let cli = Cli::try_parse_from(["ocrpdf", "doc.pdf"]).unwrap();
    let opts = build_opts(&cli, None, Path::new("."));
    assert_eq!(opts.input, PathBuf::from("doc.pdf"));
    assert_eq!(opts.first_page, 1);
    assert_eq!(opts.last_page, None);
    assert_eq!(opts.language, "eng");
    assert!(opts.output.is_none());
    assert!(opts.handle_interrupts);
}

#[test]
fn test_cli_overrides_settings_file() {
    let file = parse_ocrpdf_toml("[settings]\nlanguage = \"rus\"\nfilters = [\"a.rules\"]\n").unwrap();
    let cli = Cli::try_parse_from([
        "ocrpdf", "-f", "2", "-l", "9", "-L", "deu", "-F", "b.rules", "-o", "out.txt", "-j",
        "4", "doc.pdf",
    ])
    .unwrap();
    let opts = build_opts(&cli, Some(&file), Path::new("cfg"));
    assert_eq!(opts.first_page, 2);
    assert_eq!(opts.last_page, Some(9));
    assert_eq!(opts.language, "deu");
    assert_eq!(
        opts.filters,
        vec![PathBuf::from("cfg/a.rules"), PathBuf::from("b.rules")]
    );
    assert_eq!(opts.output, Some(PathBuf::from("out.txt")));
    assert_eq!(opts.num_threads, Some(4));
}

#[test]
fn test_cli_rejects_out_of_range_pages() {
    assert!(Cli::try_parse_from(["ocrpdf", "-f", "0", "doc.pdf"]).is_err());
    assert!(Cli::try_parse_from(["ocrpdf", "-l", "3001", "doc.pdf"]).is_err());
    assert!(Cli::try_parse_from(["ocrpdf", "-j", "0", "doc.pdf"]).is_err());
}

#[test]
fn test_cli_requires_input() {
    assert!(Cli::try_parse_from(["ocrpdf"]).is_err());
    assert!(Cli::try_parse_from(["ocrpdf", "a.pdf", "b.pdf"]).is_err());
}

#[test]
fn test_validate_rejects_missing_filter_file() {
    let opts = Opts {
        filters: vec![PathBuf::from("/definitely/not/here.rules")],
        ..Default::default()
    };
    assert!(matches!(
        validate_opts(&opts),
        Err(OcrError::InvalidOption(_))
    ));
}

#[test]
fn test_validate_rejects_directory_filter() {
    let dir = tempfile::tempdir().unwrap();
    let opts = Opts {
        filters: vec![dir.path().to_path_buf()],
        ..Default::default()
    };
    let err = validate_opts(&opts).unwrap_err();
    assert_eq!(err.to_string(), format!("\"{}\" is not a file", dir.path().display()));
}

#[test]
fn test_validate_accepts_defaults() {
    assert!(validate_opts(&Opts::default()).is_ok());
}

// --- output sink ---

#[test]
fn test_write_output_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    std::fs::write(&path, "old content that is longer").unwrap();
    write_output(Some(&path), b"new\n").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"new\n");
}

#[test]
fn test_write_output_bad_path_names_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.txt");
    let err = write_output(Some(&path), b"x").unwrap_err();
    assert!(err.to_string().contains("out.txt"));
}
