//! `cildiff` CLI (`spec.md` §6.4): `cildiff [--json[=pretty]] LEFT RIGHT`.
//! Either path may be `-` for stdin. Exit code 0 on success, non-zero on
//! any failure — input errors and structural invariant violations are both
//! reported to stderr and never produce partial output (`spec.md` §7).

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use cildiff_compare::{build_comparison_root, compare_roots};
use cildiff_kernel::ast::CilTree;
use cildiff_report::{fixture, input, json, text};

/// Structural differ for SELinux CIL policies.
#[derive(Parser, Debug)]
#[command(name = "cildiff", version, about)]
struct Args {
    /// Emit JSON instead of plain text. Pass `--json=pretty` for indented
    /// output.
    #[arg(long, value_name = "MODE", num_args = 0..=1, default_missing_value = "compact")]
    json: Option<String>,

    /// Suppress informational tracing output (errors are always printed).
    #[arg(short, long)]
    quiet: bool,

    /// Left-hand policy input, or `-` for stdin.
    left: String,

    /// Right-hand policy input, or `-` for stdin.
    right: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cildiff: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), cildiff_report::CliError> {
    let left_source = input::read_input(&args.left)?;
    let right_source = input::read_input(&args.right)?;

    let left_ast = fixture::parse(&left_source)?;
    let right_ast = fixture::parse(&right_source)?;
    let left_tree = CilTree::new(left_ast);
    let right_tree = CilTree::new(right_ast);

    let left_root = build_comparison_root(left_tree.root());
    let right_root = build_comparison_root(right_tree.root());
    let diff_tree = compare_roots(&left_root, &right_root)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &args.json {
        Some(mode) => {
            let pretty = mode == "pretty";
            let rendered = json::render(
                &diff_tree,
                left_tree.root(),
                right_tree.root(),
                left_root.full_hash(),
                right_root.full_hash(),
                pretty,
            );
            writeln!(out, "{rendered}").map_err(cildiff_report::CliError::Output)?;
        }
        None => {
            text::print_text(&diff_tree, left_root.full_hash(), right_root.full_hash(), &mut out)
                .map_err(cildiff_report::CliError::Output)?;
        }
    }
    Ok(())
}

fn init_tracing(quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
