mod metrics_tests;
mod report_tests;
mod volume_tests;
