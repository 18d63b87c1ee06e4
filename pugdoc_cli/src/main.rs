use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use pugdoc_cli::PugdocCli;
use pugdoc_core::GenerateReport;
use pugdoc_core::Options;
use pugdoc_core::PartialOptions;
use pugdoc_core::PugdocResult;
use pugdoc_core::generate;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = PugdocCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	match run(&args) {
		Ok(report) => {
			print_report(&report);
			if !report.is_ok() {
				process::exit(1);
			}
		}
		Err(error) => {
			let report: miette::Report = error.into();
			eprintln!("{report:?}");
			process::exit(2);
		}
	}
}

/// Logs go to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn run(args: &PugdocCli) -> PugdocResult<GenerateReport> {
	let root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
	let config = match &args.config {
		Some(config_path) => Some(PartialOptions::load_file(&root.join(config_path))?),
		None => PartialOptions::load(&root)?,
	};

	let partial = config.unwrap_or_default().merge(args.partial_options());
	let mut options = Options::resolve(Options::default(), partial)?;
	if args.path.is_some() {
		options = options.relative_to(&root);
	}

	tracing::debug!(?options, "resolved options");
	generate(&options)
}

fn print_report(report: &GenerateReport) {
	if report.files.is_empty() {
		println!("{} No input files matched.", colored!("warning:", yellow));
		return;
	}

	println!(
		"Documented {} node(s) from {} file(s).",
		report.nodes,
		report.files.len()
	);

	for artifact in &report.artifacts {
		println!("{} {}", colored!("Wrote", green), display_path(artifact));
	}

	if !report.diagnostics.is_empty() {
		println!(
			"{} {} marker(s) skipped.",
			colored!("warning:", yellow),
			report.diagnostics.len()
		);
	}

	for failure in &report.failures {
		eprintln!(
			"{} {}: {}",
			colored!("error:", red),
			display_path(&failure.file),
			failure.error
		);
	}
}

fn display_path(path: &Path) -> String {
	path.display().to_string()
}
