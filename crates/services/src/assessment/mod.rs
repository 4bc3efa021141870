mod controller;

pub use controller::AssessmentController;
