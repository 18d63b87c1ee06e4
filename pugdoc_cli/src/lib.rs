use std::path::PathBuf;

use clap::Parser;
use pugdoc_core::InputSource;
use pugdoc_core::PartialFormatting;
use pugdoc_core::PartialOptions;
use pugdoc_core::TypesValue;

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about = "Generate reference documentation from annotated pug mixins.",
	long_about = "pugdoc reads pug templates, finds mixins and blocks introduced by a `//- \
	              @pugdoc` comment and turns their JSDoc-like annotations into documentation.\n\n\
	              Quick start:\n  pugdoc -i 'views/**/*.pug' -o docs\n\nSettings can also \
	              live in a pugdoc.toml file next to your templates. Command line flags take \
	              precedence over the file."
)]
pub struct PugdocCli {
	/// Input files, or a single path or glob pattern. Defaults to
	/// `./**/*.pug`.
	#[arg(long, short, num_args = 1..)]
	pub input: Vec<String>,

	/// The documentation output directory. Defaults to `./docs`.
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// Comma separated list of output types: all, ast, markdown, html.
	#[arg(long, short)]
	pub types: Option<String>,

	/// Name of the output files, without extension. Defaults to `index`.
	#[arg(long, visible_alias = "on")]
	pub output_name: Option<String>,

	/// The documentation title. Defaults to `Documentation`.
	#[arg(long)]
	pub title: Option<String>,

	/// Directory that reported source locations are relative to. Defaults to
	/// each file's own directory.
	#[arg(long)]
	pub source_dir: Option<PathBuf>,

	/// Remove and recreate the output directory before writing.
	#[arg(long, default_value_t = false)]
	pub clear_output_dir: bool,

	/// Explicit config file. When omitted, pugdoc.toml is discovered in the
	/// project root.
	#[arg(long, short)]
	pub config: Option<PathBuf>,

	/// Path to the project root directory. Relative paths resolve against it.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

impl PugdocCli {
	/// The settings given on the command line. Flags that were not passed
	/// stay unset so they do not shadow the config file.
	pub fn partial_options(&self) -> PartialOptions {
		let input = match self.input.as_slice() {
			[] => None,
			[single] => Some(InputSource::Pattern(single.clone())),
			many => Some(InputSource::Files(many.iter().map(PathBuf::from).collect())),
		};

		let formatting = self.title.clone().map(|title| PartialFormatting {
			title: Some(title),
			..PartialFormatting::default()
		});

		PartialOptions {
			input,
			output: self.output.clone(),
			output_name: self.output_name.clone(),
			types: self.types.clone().map(TypesValue::One),
			source_dir: self.source_dir.clone(),
			clear_output_dir: self.clear_output_dir.then_some(true),
			formatting,
		}
	}
}
