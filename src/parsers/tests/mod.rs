mod content_extractor_tests;
mod link_collector_tests;
