use clap::Parser;
use std::ffi::OsString;

pub const OPERATION_FLAG: &str = "operation";
pub const FILE_NAME_FLAG: &str = "fileName";
pub const ITEM_FLAG: &str = "item";
pub const ID_FLAG: &str = "id";

const FLAGS: [&str; 4] = [OPERATION_FLAG, FILE_NAME_FLAG, ITEM_FLAG, ID_FLAG];

/// Maintain a list of user records stored as a JSON array in a file
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "userstore", version, about, long_about = None)]
#[command(args_override_self = true)]
pub struct Arguments {
    /// One of `add`, `list`, `findById`, `remove`
    #[arg(long = "operation", allow_hyphen_values = true)]
    pub operation: Option<String>,

    /// Path to the JSON store
    #[arg(long = "fileName", allow_hyphen_values = true)]
    pub file_name: Option<String>,

    /// Record to add, as a JSON object (`add` only)
    #[arg(long = "item", allow_hyphen_values = true)]
    pub item: Option<String>,

    /// Record id (`findById` and `remove` only)
    #[arg(long = "id", allow_hyphen_values = true)]
    pub id: Option<String>,
}

impl Arguments {
    /// Parse process arguments, accepting single-dash long flags.
    pub fn parse_args() -> Self {
        Arguments::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrites the known flags, given as `-fileName x`, `-fileName=x` or
/// `--fileName x`, into a single `--fileName=x` token, so a value is never
/// mistaken for a flag. Other flags pass through untouched. Parsing stops at
/// `--` or at the first positional argument, and everything after it is
/// dropped.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let text = arg.to_string_lossy();
        let rest = match text.strip_prefix("--").or_else(|| text.strip_prefix('-')) {
            Some(rest) if !rest.is_empty() => rest,
            _ => break,
        };
        let (name, inline) = match rest.split_once('=') {
            Some((name, _)) => (name, true),
            None => (rest, false),
        };
        if !FLAGS.contains(&name) {
            normalized.push(arg.clone());
            continue;
        }
        if inline {
            normalized.push(OsString::from(format!("--{rest}")));
            continue;
        }
        match args.next() {
            Some(value) => {
                let mut joined = OsString::from(format!("--{name}="));
                joined.push(value);
                normalized.push(joined);
            }
            None => normalized.push(OsString::from(format!("--{name}"))),
        }
    }
    normalized
}

#[test]
fn normalize_args_test() {
    let args = normalize_args([
        "userstore",
        "-operation",
        "add",
        "-fileName=users.json",
        "--item",
        r#"{"id":"1"}"#,
        "-x",
        "-identity",
    ]);
    assert_eq!(
        args,
        vec![
            "userstore",
            "--operation=add",
            "--fileName=users.json",
            r#"--item={"id":"1"}"#,
            "-x",
            "-identity",
        ]
    );
}

#[test]
fn normalize_args_stops_at_first_positional_test() {
    let args = normalize_args([
        "userstore",
        "-operation",
        "list",
        "extra",
        "-fileName",
        "users.json",
    ]);
    assert_eq!(args, vec!["userstore", "--operation=list"]);

    let args = normalize_args(["userstore", "-operation", "list", "--", "-fileName", "x"]);
    assert_eq!(args, vec!["userstore", "--operation=list"]);
}

#[test]
fn parse_single_dash_flags_test() {
    let arguments = Arguments::try_parse_from(normalize_args([
        "userstore",
        "-operation",
        "remove",
        "-fileName",
        "-users.json",
        "-id",
        "-5",
    ]))
    .unwrap();
    assert_eq!(arguments.operation.as_deref(), Some("remove"));
    assert_eq!(arguments.file_name.as_deref(), Some("-users.json"));
    assert_eq!(arguments.item, None);
    assert_eq!(arguments.id.as_deref(), Some("-5"));
}

#[test]
fn parse_repeated_flag_keeps_last_value_test() {
    let arguments = Arguments::try_parse_from(normalize_args([
        "userstore",
        "-operation",
        "list",
        "-fileName",
        "first.json",
        "--fileName=second.json",
        "-operation",
        "findById",
        "-id",
        "--",
    ]))
    .unwrap();
    assert_eq!(arguments.operation.as_deref(), Some("findById"));
    assert_eq!(arguments.file_name.as_deref(), Some("second.json"));
    assert_eq!(arguments.id.as_deref(), Some("--"));
}

#[test]
fn parse_stray_positional_is_ignored_test() {
    let arguments = Arguments::try_parse_from(normalize_args([
        "userstore",
        "-operation",
        "list",
        "-fileName",
        "users.json",
        "trailing",
        "words",
    ]))
    .unwrap();
    assert_eq!(arguments.file_name.as_deref(), Some("users.json"));
}
