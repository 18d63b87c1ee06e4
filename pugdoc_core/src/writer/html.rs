use std::collections::HashMap;

use minijinja::Environment;
use serde::Serialize;

use super::DocWriter;
use super::OutputType;
use crate::AnnotationTag;
use crate::DocumentNode;
use crate::DocumentTree;
use crate::Options;
use crate::PugdocError;
use crate::PugdocResult;

const TEMPLATE_NAME: &str = "index.html";
const TEMPLATE: &str = include_str!("templates/index.html");
const DEFAULT_LOCALE: &str = "en";

/// Writes a standalone html page with an index linking to every mixin.
pub struct HtmlWriter;

impl DocWriter for HtmlWriter {
	fn output_type(&self) -> OutputType {
		OutputType::Html
	}

	fn render(&self, tree: &DocumentTree, options: &Options) -> PugdocResult<String> {
		let mut env = Environment::new();
		env.set_keep_trailing_newline(true);
		env.add_template(TEMPLATE_NAME, TEMPLATE)
			.map_err(|e| PugdocError::TemplateRender(e.to_string()))?;

		let template = env
			.get_template(TEMPLATE_NAME)
			.map_err(|e| PugdocError::TemplateRender(e.to_string()))?;

		template
			.render(PageView::new(tree, options))
			.map_err(|e| PugdocError::TemplateRender(e.to_string()))
	}
}

#[derive(Debug, Serialize)]
struct PageView<'a> {
	title: &'a str,
	locale: &'a str,
	theme: Vec<ThemeVariable>,
	mixins: Vec<MixinView<'a>>,
}

#[derive(Debug, Serialize)]
struct ThemeVariable {
	name: String,
	value: String,
}

#[derive(Debug, Serialize)]
struct MixinView<'a> {
	name: &'a str,
	anchor: String,
	description: &'a str,
	location: String,
	params: Vec<TagView<'a>>,
	/// Every tag that is not a parameter.
	tags: Vec<TagView<'a>>,
}

#[derive(Debug, Serialize)]
struct TagView<'a> {
	title: &'a str,
	name: &'a str,
	optional: bool,
	default: Option<&'a str>,
	is_record: bool,
	verbatim: bool,
	type_text: Option<String>,
	description: &'a str,
}

impl<'a> PageView<'a> {
	fn new(tree: &'a DocumentTree, options: &'a Options) -> Self {
		let formatting = &options.formatting;
		let theme = formatting
			.theme
			.iter()
			.filter_map(|(name, value)| {
				let name = css_identifier(name)?;
				let value = match value {
					serde_json::Value::String(value) => value.clone(),
					other => other.to_string(),
				};
				Some(ThemeVariable { name, value })
			})
			.collect();

		let mut anchors = AnchorSet::default();
		let mixins = tree
			.mixins()
			.map(|mixin| MixinView::new(mixin, &mut anchors))
			.collect();

		Self {
			title: &formatting.title,
			locale: formatting.locale.as_deref().unwrap_or(DEFAULT_LOCALE),
			theme,
			mixins,
		}
	}
}

impl<'a> MixinView<'a> {
	fn new(mixin: &'a DocumentNode, anchors: &mut AnchorSet) -> Self {
		let name = mixin.name.as_deref().unwrap_or_default();
		let (params, tags) = mixin.tags.iter().partition::<Vec<_>, _>(|tag| tag.is_param());

		Self {
			name,
			anchor: anchors.unique(name),
			description: &mixin.description,
			location: mixin.location.to_string(),
			params: params.into_iter().map(TagView::new).collect(),
			tags: tags.into_iter().map(TagView::new).collect(),
		}
	}
}

impl<'a> TagView<'a> {
	fn new(tag: &'a AnnotationTag) -> Self {
		Self {
			title: &tag.title,
			name: tag.name.as_deref().unwrap_or_default(),
			optional: tag.optional,
			default: tag.default.as_deref(),
			is_record: tag.r#type.as_ref().is_some_and(crate::TypeExpression::is_record),
			verbatim: tag.is_verbatim(),
			type_text: tag.r#type.as_ref().map(crate::TypeExpression::pretty),
			description: &tag.description,
		}
	}
}

/// Hands out `mixin-<name>` anchors, suffixing repeated names so links stay
/// unambiguous when two files declare the same mixin.
#[derive(Debug, Default)]
struct AnchorSet {
	seen: HashMap<String, usize>,
}

impl AnchorSet {
	fn unique(&mut self, name: &str) -> String {
		let slug: String = name
			.chars()
			.map(|c| {
				if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
					c.to_ascii_lowercase()
				} else {
					'-'
				}
			})
			.collect();
		let base = format!("mixin-{slug}");
		let count = self.seen.entry(base.clone()).or_insert(0);
		*count += 1;

		if *count == 1 {
			base
		} else {
			format!("{base}-{count}")
		}
	}
}

/// Theme keys become CSS custom property names, so only keep keys made of
/// identifier characters.
fn css_identifier(name: &str) -> Option<String> {
	let valid = !name.is_empty()
		&& name
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

	valid.then(|| name.to_ascii_lowercase())
}
