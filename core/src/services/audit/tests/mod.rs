mod mocks;
mod scoring_tests;
mod service_tests;
