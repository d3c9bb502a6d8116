//! Command-line flags for a single solver run.

use std::ffi::OsString;
use std::path::Path;

/// Ordered solver flags, fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverInvocation {
	flags: Vec<String>,
	threads: Option<u32>,
	explore: Option<u32>,
}

impl SolverInvocation {
	/// Uses `flags` exactly as given.
	pub fn new(flags: Vec<String>) -> Self {
		Self {
			flags,
			threads: None,
			explore: None,
		}
	}

	/// Appends `-t <threads>` and `-x <explore>` to `flags`.
	pub fn with_resources(mut flags: Vec<String>, threads: u32, explore: u32) -> Self {
		flags.push("-t".to_string());
		flags.push(threads.to_string());
		flags.push("-x".to_string());
		flags.push(explore.to_string());
		Self {
			flags,
			threads: Some(threads),
			explore: Some(explore),
		}
	}

	pub fn flags(&self) -> &[String] {
		&self.flags
	}

	pub fn threads(&self) -> Option<u32> {
		self.threads
	}

	pub fn explore(&self) -> Option<u32> {
		self.explore
	}

	/// Full argument list, ending with `-i <input>`.
	pub fn args_with_input(&self, input: &Path) -> Vec<OsString> {
		let mut args: Vec<OsString> = self.flags.iter().map(OsString::from).collect();
		args.push(OsString::from("-i"));
		args.push(input.as_os_str().to_owned());
		args
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resources_are_appended_last() {
		let invocation =
			SolverInvocation::with_resources(vec!["-r".into(), "osrm".into()], 4, 5);
		assert_eq!(invocation.flags(), ["-r", "osrm", "-t", "4", "-x", "5"]);
		assert_eq!(invocation.threads(), Some(4));
		assert_eq!(invocation.explore(), Some(5));
	}

	#[test]
	fn test_input_is_last() {
		let invocation = SolverInvocation::new(vec!["-g".into()]);
		let args = invocation.args_with_input(Path::new("/tmp/req.json"));
		assert_eq!(
			args,
			vec![
				OsString::from("-g"),
				OsString::from("-i"),
				OsString::from("/tmp/req.json")
			]
		);
		assert_eq!(invocation.threads(), None);
	}
}
