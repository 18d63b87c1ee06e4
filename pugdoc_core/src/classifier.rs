use crate::NodeKind;
use crate::PugdocError;
use crate::PugdocResult;

/// The kind and declared name of the block that follows a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
	pub kind: NodeKind,
	pub name: Option<String>,
}

/// Decide whether `block_text` declares a mixin or a block and extract its
/// name.
///
/// The name is the token after the keyword, cut at the first `(` or space,
/// so `mixin button(label, size)` yields `button`. Blocks may be anonymous.
///
/// `line` is only used to locate errors.
pub fn classify(block_text: &str, line: usize) -> PugdocResult<Classified> {
	let declaration = block_text.lines().next().unwrap_or_default().trim();

	if declaration.is_empty() {
		return Err(PugdocError::MissingStructuralUnit { line });
	}

	let (keyword, rest) = declaration
		.split_once(' ')
		.unwrap_or((declaration, ""));
	let name = declared_name(rest);

	match keyword {
		"mixin" => {
			let Some(name) = name else {
				return Err(PugdocError::MissingMixinName { line });
			};
			Ok(Classified {
				kind: NodeKind::Mixin,
				name: Some(name),
			})
		}
		"block" => Ok(Classified {
			kind: NodeKind::Block,
			name,
		}),
		other => Err(PugdocError::UnsupportedBlockKind(other.to_string())),
	}
}

fn declared_name(rest: &str) -> Option<String> {
	let name = rest
		.trim_start()
		.split(['(', ' '])
		.next()
		.unwrap_or_default();

	(!name.is_empty()).then(|| name.to_string())
}
