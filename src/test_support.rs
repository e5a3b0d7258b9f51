use chrono::NaiveDate;

use crate::domain::project::{Complexity, ProjectDescriptor};
use crate::services::duration_sampler::DurationSampler;

// A mock DurationSampler that always returns the central value and never fires risks
pub struct MockSampler;
impl DurationSampler for MockSampler {
    fn triangular(&mut self, _min: f64, mode: f64, _max: f64) -> f64 {
        mode
    }

    fn normal(&mut self, mean: f64, _std_dev: f64) -> f64 {
        mean
    }

    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        (min + max) / 2.0
    }

    fn occurs(&mut self, _probability: f64) -> bool {
        false
    }
}

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn build_project(project_type: &str, length_km: f64, country_code: &str) -> ProjectDescriptor {
    ProjectDescriptor::new(
        project_type,
        length_km,
        country_code,
        Complexity::Medium,
        on_date(2026, 1, 1),
    )
}
