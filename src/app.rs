use std::{
    io::{stdin, stdout, BufRead, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    common::{error::AppError, logging::ActivityLog, money::Money},
    domain::ledger::Ledger,
    io::{markdown, pretty},
};

pub const USAGE: &str = "\
usage: ledger-notebook (-l <notebook.lgr>... | -a [--force] [-d <dir>]) [-e] [-pp] [-pt [<out.md>]] [-pa]

  -l, --ledger <path>            notebook to load; repeatable, the first one is the primary notebook
  -a, --account                  create a new account and its notebook
  -d, --dir <dir>                directory for the new notebook (default: current directory)
      --force                    let -a replace an existing notebook
  -e, --entry                    add an entry to the primary notebook
  -pp, --print-pretty            print every loaded notebook
  -pt, --print-table [<out.md>]  export the primary notebook to a markdown table (default: <account number>.md)
  -pa, --print-all-tables        export every loaded notebook to <account number>.md
  -h, --help                     show this message";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub ledgers: Vec<PathBuf>,
    pub create_account: bool,
    pub dir: Option<PathBuf>,
    pub force: bool,
    pub add_entry: bool,
    pub print_pretty: bool,
    /// `Some(None)` exports under the default name.
    pub print_table: Option<Option<String>>,
    pub print_all_tables: bool,
    pub help: bool,
}

/// Parses arguments, `args[0]` being the program name.
pub fn parse_args<I, S>(args: I) -> Result<Options, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args
        .into_iter()
        .map(|s| -> String { s.into() })
        .skip(1)
        .peekable();
    let mut opts = Options::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-l" | "--ledger" => {
                let path = args
                    .next()
                    .ok_or_else(|| AppError::Usage(format!("{arg} needs a notebook path")))?;
                opts.ledgers.push(PathBuf::from(path));
            }
            "-a" | "--account" => opts.create_account = true,
            "-d" | "--dir" => {
                let dir = args
                    .next()
                    .ok_or_else(|| AppError::Usage(format!("{arg} needs a directory")))?;
                opts.dir = Some(PathBuf::from(dir));
            }
            "--force" => opts.force = true,
            "-e" | "--entry" => opts.add_entry = true,
            "-pp" | "--print-pretty" => opts.print_pretty = true,
            "-pt" | "--print-table" => {
                let name = args.next_if(|next| !next.starts_with('-'));
                opts.print_table = Some(name);
            }
            "-pa" | "--print-all-tables" => opts.print_all_tables = true,
            "-h" | "--help" => opts.help = true,
            other => return Err(AppError::Usage(format!("unknown argument `{other}`"))),
        }
    }

    if opts.help {
        return Ok(opts);
    }
    if !opts.ledgers.is_empty() && opts.create_account {
        return Err(AppError::Usage(
            "cannot read a ledger notebook and create an account; only one can be done at a time"
                .to_string(),
        ));
    }
    if opts.ledgers.is_empty() && !opts.create_account {
        return Err(AppError::Usage("missing ledger notebook".to_string()));
    }

    Ok(opts)
}

/// Notebook file name for a new account: `Jane Doe` becomes `jane-doe.lgr`.
pub fn notebook_name(full_name: &str) -> PathBuf {
    PathBuf::from(format!("{}.lgr", full_name.trim().replace(' ', "-").to_lowercase()))
}

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let stdin = stdin();
    let stdout = stdout();
    let mut out = BufWriter::new(stdout.lock());
    run_with(args, &mut stdin.lock(), &mut out)?;
    out.flush()?;
    Ok(())
}

/// Runs one command line against explicit input and output streams.
pub fn run_with<I, S, R, W>(args: I, input: &mut R, out: &mut W) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    R: BufRead,
    W: Write,
{
    let opts = parse_args(args)?;
    if opts.help {
        writeln!(out, "{USAGE}")?;
        return Ok(());
    }

    let mut ledger = Ledger::new(ActivityLog::new());

    let primary = if opts.create_account {
        create_account(&mut ledger, &opts, input, out)?
    } else {
        let reports = ledger.load(&opts.ledgers)?;
        for report in &reports {
            for skipped in &report.skipped {
                writeln!(
                    out,
                    "Malformed entry in {} line {}: {}",
                    report.path.display(),
                    skipped.line,
                    skipped.error
                )?;
            }
        }
        opts.ledgers[0].clone()
    };

    let id = ledger
        .account_by_path(&primary)
        .map(|account| account.id().to_string())
        .ok_or_else(|| crate::LedgerError::AccountNotFound(primary.display().to_string()))?;

    if opts.add_entry {
        let store = prompt(input, out, "Enter where the transaction took place", true)?;
        let address = prompt(input, out, "Enter address of the transaction (optional)", false)?;
        let detail = prompt(input, out, "Enter details of transaction", true)?;
        let cost = prompt_amount(input, out, "Enter cost of transaction")?;

        let entry = ledger.add_entry(&id, &store, &address, &detail, cost)?;
        writeln!(out, "Added new ledger entry:")?;
        pretty::write_entry(out, &entry)?;
        writeln!(out)?;
    }

    if opts.print_pretty {
        pretty::write_ledger(out, &ledger)?;
    }

    if let Some(name) = &opts.print_table {
        if let Some(account) = ledger.lookup(&id) {
            let path = match name {
                Some(name) => markdown::table_path(name),
                None => markdown::default_table_path(account),
            };
            markdown::export_table(&path, account)?;
            writeln!(out, "Wrote {}", path.display())?;
        }
    }

    if opts.print_all_tables {
        for path in markdown::export_all(&ledger, Path::new("."))? {
            writeln!(out, "Wrote {}", path.display())?;
        }
    }

    Ok(())
}

fn create_account<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    opts: &Options,
    input: &mut R,
    out: &mut W,
) -> Result<PathBuf, AppError> {
    let full_name = prompt(input, out, "Enter the full name of the new account", true)?;
    let balance = prompt_amount(
        input,
        out,
        &format!("Enter initial balance for {full_name} account"),
    )?;

    let name = notebook_name(&full_name);
    let path = match &opts.dir {
        Some(dir) => dir.join(name),
        None => name,
    };
    if path.exists() && !opts.force {
        return Err(AppError::Usage(format!(
            "{} already exists; pass --force to replace it",
            path.display()
        )));
    }

    let id = ledger.create_account(&full_name, &path, balance)?;
    writeln!(out, "Created account {id} in {}", path.display())?;
    Ok(path)
}

/// Asks `question` until a required answer is non-empty.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
    required: bool,
) -> Result<String, AppError> {
    loop {
        write!(out, "{question} > ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(AppError::Input(format!("no answer for `{question}`")));
        }

        let answer = line.trim_end_matches(['\n', '\r']).to_string();
        if required && answer.trim().is_empty() {
            writeln!(out, "Error: input required, none given")?;
            continue;
        }
        return Ok(answer);
    }
}

fn prompt_amount<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> Result<Money, AppError> {
    let answer = prompt(input, out, question, true)?;
    Money::from_str(&answer).map_err(|err| AppError::Input(format!("invalid amount `{answer}`: {err}")))
}
