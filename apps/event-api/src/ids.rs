use uuid::Uuid;

/// Generates an opaque event identifier: a random (v4) UUID in hyphenated form.
pub fn new_event_id() -> String {
	Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_ids_are_v4_uuids() {
		let id = new_event_id();
		let parsed = Uuid::parse_str(&id).unwrap();

		assert_eq!(parsed.get_version_num(), 4);
		assert_eq!(id.len(), 36);
	}

	#[test]
	fn test_ten_thousand_ids_are_unique() {
		let ids: HashSet<String> = (0..10_000).map(|_| new_event_id()).collect();
		assert_eq!(ids.len(), 10_000);
	}
}
