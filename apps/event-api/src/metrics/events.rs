use lazy_static::lazy_static;
use prometheus::{register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter, IntCounterVec};

lazy_static! {
	static ref EVENTS_ACCEPTED_TOTAL: IntCounter = register_int_counter!("events_accepted_total", "Total number of events accepted for delivery").expect("Failed to register EVENTS_ACCEPTED_TOTAL");
	static ref EVENTS_REJECTED_TOTAL: IntCounterVec =
		register_int_counter_vec!("events_rejected_total", "Total number of events rejected", &["reason"]).expect("Failed to register EVENTS_REJECTED_TOTAL");
	pub static ref EVENT_PUBLISH_DURATION: Histogram =
		register_histogram!("event_publish_duration_seconds", "Time spent enqueuing a single event").expect("Failed to register EVENT_PUBLISH_DURATION");
}

pub fn record_accepted() {
	EVENTS_ACCEPTED_TOTAL.inc();
}

pub fn record_rejected(reason: &str) {
	EVENTS_REJECTED_TOTAL.with_label_values(&[reason]).inc();
}
