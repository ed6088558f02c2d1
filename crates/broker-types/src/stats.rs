use crate::config::Config;

/// Running totals of currently-held (granted, not yet released) load against
/// one resource. Lazily created on first mention of a resource name and never
/// torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceStats {
	pub read_reqs: u64,
	pub read_data: u64,
	pub write_reqs: u64,
	pub write_data: u64,
}

impl ResourceStats {
	/// Stats as they would read after adding `(numopts, datasize)` to the
	/// `read`/`write` pair, without mutating `self`.
	#[must_use]
	pub fn projected(&self, read: bool, numopts: u64, datasize: u64) -> Self {
		let mut projected = *self;
		if read {
			projected.read_reqs += numopts;
			projected.read_data += datasize;
		} else {
			projected.write_reqs += numopts;
			projected.write_data += datasize;
		}
		projected
	}

	/// True iff every one of the four counters is within its config ceiling.
	#[must_use]
	pub fn within(&self, config: &Config) -> bool {
		self.read_reqs <= config.read_reqs && self.read_data <= config.read_data && self.write_reqs <= config.write_reqs && self.write_data <= config.write_data
	}

	/// Commit `(numopts, datasize)` against the read or write pair.
	pub fn add(&mut self, read: bool, numopts: u64, datasize: u64) {
		if read {
			self.read_reqs += numopts;
			self.read_data += datasize;
		} else {
			self.write_reqs += numopts;
			self.write_data += datasize;
		}
	}

	/// Reverse a prior `add`. Saturates at zero rather than panicking — a
	/// release always undoes an add recorded under the same id, so this
	/// should never actually saturate in practice.
	pub fn subtract(&mut self, read: bool, numopts: u64, datasize: u64) {
		if read {
			self.read_reqs = self.read_reqs.saturating_sub(numopts);
			self.read_data = self.read_data.saturating_sub(datasize);
		} else {
			self.write_reqs = self.write_reqs.saturating_sub(numopts);
			self.write_data = self.write_data.saturating_sub(datasize);
		}
	}
}
