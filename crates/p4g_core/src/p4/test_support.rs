use crate::marshal::Dict;
use crate::p4::{Result, Runner};

/// Build a record of text keys and text values.
pub(crate) fn record(pairs: &[(&str, &str)]) -> Dict {
	pairs.iter().copied().collect()
}

/// Runner that checks the requested arguments and replays canned records.
pub(crate) struct FakeRunner {
	expected_args: Vec<String>,
	records: Vec<Dict>,
}

impl FakeRunner {
	pub(crate) fn new(expected_args: &[&str], records: Vec<Dict>) -> Self {
		Self {
			expected_args: expected_args.iter().map(|arg| (*arg).to_owned()).collect(),
			records,
		}
	}
}

impl Runner for FakeRunner {
	fn run(&self, args: &[String]) -> Result<Vec<Dict>> {
		assert_eq!(args, self.expected_args.as_slice(), "unexpected p4 arguments");
		Ok(self.records.clone())
	}
}

/// Convert borrowed arguments to the owned form runners take.
pub(crate) fn args(items: &[&str]) -> Vec<String> {
	items.iter().map(|item| (*item).to_owned()).collect()
}
