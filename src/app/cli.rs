use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const REFERENCES: &str = "\
References:
  Glob syntax: https://docs.rs/globset/latest/globset/#syntax
  Regexp syntax: https://docs.rs/regex/latest/regex/#syntax";

#[derive(Parser, Debug, Default)]
#[command(
    name = "ls-having",
    author,
    version,
    about = "List directories having specified flag files",
    override_usage = "ls-having -f <GLOB> [OPTIONS] [ROOT_DIR]",
    after_help = REFERENCES
)]
pub struct Cli {
    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// How deep to look into subdirectories, 0 means only the root, -1 means no limit [default: 5]
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Name or glob of the flag file, can be repeated
    #[arg(short = 'f', long = "flag-file", value_name = "GLOB")]
    pub flag_files: Vec<String>,

    /// Name of the additional file whose content is checked
    #[arg(short = 'c', long, value_name = "NAME")]
    pub check_file: Option<String>,

    /// Regular expression for testing the content of the check file [default: .*]
    #[arg(short = 'e', long = "check-regexp", value_name = "EXPRESSION")]
    pub check_regexp: Option<String>,

    /// Regard the regular expression not matching as positive
    #[arg(short = 'i', long)]
    pub check_inverse: bool,

    /// Glob of the directories to exclude, can be repeated
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// Don't apply default excludes
    #[arg(short = 'n', long)]
    pub no_default_excludes: bool,

    /// Don't return the root directory even if it meets the conditions
    #[arg(short = 's', long)]
    pub subdirectories_only: bool,

    /// Separate output paths with null characters instead of newlines
    #[arg(short = '0', long)]
    pub print0: bool,

    /// How to handle errors such as a missing directory or no access permission
    #[arg(short = 'r', long, value_enum, default_value_t = ErrorMode::Ignore)]
    pub error: ErrorMode,

    /// Directory to start from
    #[arg(value_name = "ROOT_DIR", default_value = ".")]
    pub root_dir: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Drop errors and print whatever was found
    #[default]
    Ignore,
    /// Print errors, then whatever was found
    Print,
    /// Stop at the first error, print it and exit with failure
    Panic,
}
