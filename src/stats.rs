// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

/// A straight line `y = slope * x + intercept` fitted by OLS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; 1.0 when `y` is constant.
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `y` against `x`. Points with a non-finite coordinate are ignored.
///
/// Returns `None` when fewer than two distinct `x` values remain.
pub fn fit_ols(points: &[[f64; 2]]) -> Option<LinearFit> {
    let finite: Vec<[f64; 2]> = points
        .iter()
        .copied()
        .filter(|[x, y]| x.is_finite() && y.is_finite())
        .collect();
    if finite.len() < 2 {
        return None;
    }

    let n = finite.len() as f64;
    let mean_x = finite.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = finite.iter().map(|p| p[1]).sum::<f64>() / n;

    let (sxx, sxy, syy) = finite.iter().fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), [x, y]| {
        let dx = x - mean_x;
        let dy = y - mean_y;
        (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
    });
    if sxx <= f64::EPSILON * n {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn recovers_exact_line() {
        let points: Vec<[f64; 2]> = (1990..2000)
            .map(|year| [year as f64, 3.0 * year as f64 - 100.0])
            .collect();
        let fit = fit_ols(&points).unwrap();
        assert!(close(fit.slope, 3.0));
        assert!(close(fit.intercept, -100.0));
        assert!(close(fit.r_squared, 1.0));
        assert!(close(fit.predict(2000.0), 5900.0));
    }

    #[test]
    fn noisy_data_has_partial_fit() {
        let points = [[0.0, 1.0], [1.0, 3.0], [2.0, 2.0], [3.0, 5.0]];
        let fit = fit_ols(&points).unwrap();
        assert!(close(fit.slope, 1.1));
        assert!(close(fit.intercept, 1.1));
        assert!(fit.r_squared > 0.0 && fit.r_squared < 1.0);
    }

    #[test]
    fn single_point_has_no_fit() {
        assert_eq!(fit_ols(&[[2000.0, 10.0]]), None);
        assert_eq!(fit_ols(&[]), None);
    }

    #[test]
    fn repeated_x_has_no_fit() {
        assert_eq!(fit_ols(&[[2000.0, 10.0], [2000.0, 12.0]]), None);
    }

    #[test]
    fn constant_y_gives_flat_line() {
        let fit = fit_ols(&[[1.0, 4.0], [2.0, 4.0], [3.0, 4.0]]).unwrap();
        assert!(close(fit.slope, 0.0));
        assert!(close(fit.intercept, 4.0));
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn non_finite_points_are_dropped() {
        let fit = fit_ols(&[[0.0, 0.0], [1.0, f64::NAN], [2.0, 2.0]]).unwrap();
        assert!(close(fit.slope, 1.0));
    }
}
