/// Module containing the Sphere test function.
pub mod sphere;
pub use sphere::Sphere;

/// Module containing the Rosenbrock test function.
pub mod rosenbrock;
pub use rosenbrock::Rosenbrock;

/// Module containing the Rastrigin test function.
pub mod rastrigin;
pub use rastrigin::Rastrigin;

/// Module containing the pressure vessel design problem.
pub mod pressure_vessel;
pub use pressure_vessel::PressureVessel;
