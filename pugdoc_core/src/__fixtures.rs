use std::path::Path;
use std::path::PathBuf;

use crate::AnnotationTag;
use crate::DocumentNode;
use crate::DocumentTree;
use crate::InputSource;
use crate::Location;
use crate::NodeKind;
use crate::Options;
use crate::OutputType;
use crate::RecordField;
use crate::TypeExpression;

pub(crate) const GREET_SOURCE: &str = "//- @pugdoc\n//- Renders a greeting.\n//- @param {string} \
                                       name The person's name.\nmixin greet(name)\n  p Hello \
                                       #{name}\n";

pub(crate) const BUTTON_SOURCE: &str = "//- @pugdoc\n//- @param {{\n//-   label: string\n//- }} \
                                        opts Options.\nmixin button(opts)\n  button= \
                                        opts.label\n";

pub(crate) const UNSUPPORTED_SOURCE: &str = "//- @pugdoc\nif condition\n  p shown\n";

pub(crate) const UNTERMINATED_SOURCE: &str = "//- @pugdoc\n//- Broken.\n//- @param {{\n//-   \
                                              label: string\nmixin broken(opts)\n";

pub(crate) fn greet_node() -> DocumentNode {
	DocumentNode {
		kind: NodeKind::Mixin,
		name: Some("greet".to_string()),
		description: "Renders a greeting.".to_string(),
		tags: vec![AnnotationTag {
			title: "param".to_string(),
			name: Some("name".to_string()),
			r#type: Some(TypeExpression::named("string")),
			description: "The person's name.".to_string(),
			..AnnotationTag::default()
		}],
		location: Location {
			file: "greet.pug".to_string(),
			line: 1,
		},
	}
}

pub(crate) fn button_node() -> DocumentNode {
	DocumentNode {
		kind: NodeKind::Mixin,
		name: Some("button".to_string()),
		description: String::new(),
		tags: vec![AnnotationTag {
			title: "param".to_string(),
			name: Some("opts".to_string()),
			r#type: Some(TypeExpression::record(vec![RecordField::new(
				"label",
				TypeExpression::named("string"),
			)])),
			description: "Options.".to_string(),
			..AnnotationTag::default()
		}],
		location: Location {
			file: "button.pug".to_string(),
			line: 1,
		},
	}
}

pub(crate) fn block_node() -> DocumentNode {
	DocumentNode {
		kind: NodeKind::Block,
		name: Some("content".to_string()),
		description: "Main page content.".to_string(),
		tags: vec![],
		location: Location {
			file: "layout.pug".to_string(),
			line: 3,
		},
	}
}

pub(crate) fn sample_tree() -> DocumentTree {
	DocumentTree::new(vec![greet_node(), button_node(), block_node()])
}

/// Write `content` to `dir/name`, creating parent directories.
pub(crate) fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
	let path = dir.join(name);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write: {e}"));
	path
}

pub(crate) fn options_for(input: &Path, output: &Path, types: &[OutputType]) -> Options {
	Options {
		input: InputSource::Pattern(input.to_string_lossy().into_owned()),
		output: output.to_path_buf(),
		types: types.to_vec(),
		..Options::default()
	}
}
