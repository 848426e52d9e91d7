pub mod points_calculator;

pub use points_calculator::calculate_points;
