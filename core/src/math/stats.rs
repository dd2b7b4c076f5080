pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = values.iter().map(|&v| v * v).sum();
        (sum_sq / values.len() as f64).sqrt()
    }

    /// Euclidean length of a 3-axis vector.
    pub fn norm(axes: [f64; 3]) -> f64 {
        axes.iter().map(|&v| v * v).sum::<f64>().sqrt()
    }
}
