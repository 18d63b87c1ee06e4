use assert_cmd::Command;

pub fn pugdoc_cmd() -> Command {
	let mut cmd = Command::cargo_bin("pugdoc").unwrap_or_else(|e| panic!("binary: {e}"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

pub const GREET_SOURCE: &str = "//- @pugdoc\n//- Renders a greeting.\n//- @param {string} name \
                                The person's name.\nmixin greet(name)\n  p Hello #{name}\n";
