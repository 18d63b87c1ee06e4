mod common;

use common::GREET_SOURCE;
use predicates::prelude::PredicateBooleanExt;
use pugdoc_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn generate_all_types_by_default() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("views"))?;
	std::fs::write(tmp.path().join("views/greet.pug"), GREET_SOURCE)?;

	common::pugdoc_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Documented 1 node(s) from 1 file(s)."));

	let docs = tmp.path().join("docs");
	assert!(docs.join("index.json").is_file());
	assert!(docs.join("index.md").is_file());
	assert!(docs.join("index.html").is_file());

	let json: Value = serde_json::from_str(&std::fs::read_to_string(docs.join("index.json"))?)?;
	assert_eq!(json["nodes"][0]["name"], "greet");
	assert_eq!(json["nodes"][0]["location"]["file"], "greet.pug");

	Ok(())
}

#[test]
fn generate_markdown_only() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("greet.pug"), GREET_SOURCE)?;

	common::pugdoc_cmd()
		.arg("--path")
		.arg(tmp.path())
		.args(["--types", "markdown", "--output", "out"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Wrote").and(predicates::str::contains("index.md")));

	let out = tmp.path().join("out");
	let markdown = std::fs::read_to_string(out.join("index.md"))?;
	assert!(markdown.contains("- **greet**"));
	assert!(markdown.contains("`string`"));
	assert!(!out.join("index.json").exists());
	assert!(!out.join("index.html").exists());

	Ok(())
}

#[test]
fn generate_without_inputs_succeeds() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::pugdoc_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No input files matched."));

	assert!(!tmp.path().join("docs").exists());

	Ok(())
}

#[test]
fn generate_reads_config_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("views"))?;
	std::fs::write(tmp.path().join("views/greet.pug"), GREET_SOURCE)?;
	std::fs::write(
		tmp.path().join("pugdoc.toml"),
		"input = \"views/**/*.pug\"\noutput = \"site\"\noutputName = \"reference\"\ntypes = \
		 [\"html\"]\n\n[formatting]\ntitle = \"UI Kit\"\n",
	)?;

	common::pugdoc_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let html = std::fs::read_to_string(tmp.path().join("site/reference.html"))?;
	assert!(html.contains("<title>UI Kit</title>"));
	assert!(!tmp.path().join("site/reference.md").exists());

	Ok(())
}

#[test]
fn cli_flags_override_config_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("greet.pug"), GREET_SOURCE)?;
	std::fs::write(
		tmp.path().join("custom.toml"),
		"outputName = \"from-file\"\ntypes = \"ast\"\n",
	)?;

	common::pugdoc_cmd()
		.arg("--path")
		.arg(tmp.path())
		.args(["--config", "custom.toml", "--output-name", "from-cli"])
		.assert()
		.success();

	assert!(tmp.path().join("docs/from-cli.json").is_file());
	assert!(!tmp.path().join("docs/from-file.json").exists());

	Ok(())
}

#[test]
fn unknown_output_type_is_fatal() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("greet.pug"), GREET_SOURCE)?;

	common::pugdoc_cmd()
		.arg("--path")
		.arg(tmp.path())
		.args(["--types", "pdf"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unknown output type"));

	Ok(())
}

#[test]
fn malformed_file_exits_with_failure() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("greet.pug"), GREET_SOURCE)?;
	std::fs::write(
		tmp.path().join("broken.pug"),
		"//- @pugdoc\n//- @param {{\n//-   label: string\nmixin broken(opts)\n",
	)?;

	common::pugdoc_cmd()
		.arg("--path")
		.arg(tmp.path())
		.args(["--types", "markdown"])
		.assert()
		.code(1)
		.stderr(predicates::str::contains("broken.pug"));

	assert!(tmp.path().join("docs/index.md").is_file());

	Ok(())
}

#[test]
fn unsupported_marker_is_not_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("page.pug"),
		"//- @pugdoc\nif condition\n  p shown\n",
	)?;

	common::pugdoc_cmd()
		.arg("--path")
		.arg(tmp.path())
		.args(["--types", "ast"])
		.assert()
		.success()
		.stdout(predicates::str::contains("1 marker(s) skipped."));

	let json: Value =
		serde_json::from_str(&std::fs::read_to_string(tmp.path().join("docs/index.json"))?)?;
	assert_eq!(json["nodes"], Value::Array(vec![]));

	Ok(())
}
