pub mod annotations;
pub mod duration_sampler;
pub mod gantt_diagram;
pub mod histogram;
pub mod monte_carlo;
pub mod percentiles;
pub mod phase_schedule;
pub mod project_yaml;
pub mod simulation_types;
pub mod timeline_prediction;
pub mod timeline_tables_yaml;
