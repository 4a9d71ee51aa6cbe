//! Least-squares line of best fit over (year, value) points.

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Ordinary least squares. Non-finite points are ignored; `None` when
    /// fewer than two distinct x values remain.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        let finite: Vec<(f64, f64)> = points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        if finite.len() < 2 {
            return None;
        }

        let n = finite.len() as f64;
        let mean_x = finite.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = finite.iter().map(|(_, y)| y).sum::<f64>() / n;

        let sxx: f64 = finite.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
        if sxx == 0.0 {
            return None;
        }
        let sxy: f64 = finite
            .iter()
            .map(|(x, y)| (x - mean_x) * (y - mean_y))
            .sum();

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Legend text, e.g. `y = 1250.00x - 2480000.00`.
    pub fn equation(&self) -> String {
        let sign = if self.intercept < 0.0 { '-' } else { '+' };
        format!(
            "y = {:.2}x {} {:.2}",
            self.slope,
            sign,
            self.intercept.abs()
        )
    }
}
