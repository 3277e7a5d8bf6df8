use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Float;

use super::{Bound, Bounds};

/// A struct that holds the results of a particle swarm run.
///
/// Everything in here is a value copy; it does not refer back into the swarm.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SwarmSummary {
    /// The best position found by any particle.
    pub best_position: Vec<Float>,
    /// The value of the cost function at [`SwarmSummary::best_position`].
    pub best_score: Float,
    /// The global best value after initialization and after every completed iteration.
    pub history: Vec<Float>,
    /// The number of completed iterations.
    pub iterations: usize,
    /// The number of function evaluations.
    pub cost_evals: usize,
    /// A message describing why the run ended.
    pub message: String,
    /// The names of the parameters. This is `None` if no names were set.
    pub parameter_names: Option<Vec<String>>,
    /// The position box the swarm was confined to.
    pub position_bounds: Bounds,
}

impl SwarmSummary {
    /// Set the names associated with each parameter.
    pub fn with_parameter_names(mut self, parameter_names: &[String]) -> Self {
        self.parameter_names = Some(parameter_names.to_vec());
        self
    }
    /// Sample the history at (at most) `n` roughly evenly spaced iterations, always including
    /// the first and last entries. Returns `(iteration, best_score)` pairs.
    pub fn convergence(&self, n: usize) -> Vec<(usize, Float)> {
        let len = self.history.len();
        if len == 0 || n == 0 {
            return Vec::new();
        }
        let stride = (len - 1).div_ceil(n.max(2) - 1).max(1);
        let mut samples: Vec<(usize, Float)> = (0..len)
            .step_by(stride)
            .map(|i| (i, self.history[i]))
            .collect();
        if samples.last().map(|(i, _)| *i) != Some(len - 1) {
            samples.push((len - 1, self.history[len - 1]));
        }
        samples
    }
}

impl Display for SwarmSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use tabled::{builder::Builder, settings::Style};

        let mut header = Builder::default();
        header.push_record(["SWARM RESULTS", ""]);
        header.push_record(["Best f(x)", &format!("{:.5}", self.best_score)]);
        header.push_record(["Iterations", &self.iterations.to_string()]);
        header.push_record(["#f(x)", &self.cost_evals.to_string()]);
        header.push_record(["Message", &self.message]);
        let mut header = header.build();
        header.with(Style::rounded());
        writeln!(f, "{header}")?;

        let names = self.parameter_names.clone().unwrap_or_else(|| {
            (0..self.best_position.len())
                .map(|i| format!("x_{i}"))
                .collect()
        });
        let mut builder = Builder::default();
        builder.push_record(["Parameter", "=", "-", "+", "At Limit?"]);
        for (i, (value, name)) in self.best_position.iter().zip(names).enumerate() {
            let bound = self
                .position_bounds
                .get(i)
                .copied()
                .unwrap_or_else(|| Bound::new(Float::NAN, Float::NAN));
            builder.push_record([
                name,
                format!("{value:.5}"),
                format!("{:.5}", bound.lower()),
                format!("{:.5}", bound.upper()),
                if bound.at_bound(*value) { "Yes" } else { "No" }.to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> SwarmSummary {
        SwarmSummary {
            best_position: vec![0.0, 5.0],
            best_score: 25.0,
            history: (0..=20).rev().map(|i| i as Float).collect(),
            iterations: 20,
            cost_evals: 210,
            message: "Maximum number of iterations reached (20)".to_string(),
            parameter_names: None,
            position_bounds: vec![(-5.0, 5.0), (-5.0, 5.0)].into_iter().collect(),
        }
    }

    #[test]
    fn test_display() {
        let text = summary().to_string();
        assert!(text.contains("SWARM RESULTS"));
        assert!(text.contains("x_0"));
        assert!(text.contains("x_1"));
        assert!(text.contains("Yes"));
        assert!(text.contains("Maximum number of iterations reached (20)"));

        let named = summary().with_parameter_names(&["a".to_string(), "b".to_string()]);
        let text = named.to_string();
        assert!(text.contains(" a "));
        assert!(!text.contains("x_0"));
    }

    #[test]
    fn test_convergence_sampling() {
        let s = summary();
        let points = s.convergence(10);
        assert_eq!(points.first(), Some(&(0, 20.0)));
        assert_eq!(points.last(), Some(&(20, 0.0)));
        assert!(points.len() <= 11);
        assert!(points.windows(2).all(|w| w[0].0 < w[1].0));

        let short = SwarmSummary {
            history: vec![3.0],
            ..Default::default()
        };
        assert_eq!(short.convergence(10), vec![(0, 3.0)]);
        assert!(SwarmSummary::default().convergence(10).is_empty());
    }
}
