//! Search for setting events: instants where a time function crosses zero downwards.
//!
//! The window is sampled on a regular grid, then every bracketed sign change
//! is refined with Brent's method from the `roots` crate.
use std::cell::RefCell;

use hifitime::{Duration, Epoch};
use roots::{find_root_brent, SimpleConvergency};
use tracing::debug;

use crate::constants::SECONDS_PER_DAY;
use crate::crescent_errors::CrescentError;

/// Grid spacing of the coarse scan. Shorter than any interval between two
/// consecutive risings and settings outside the polar circles.
pub const SEARCH_STEP_MINUTES: f64 = 10.0;

/// Tolerance of the refined root, in days (≈ 9 ms).
const ROOT_TOLERANCE_DAYS: f64 = 1e-7;

/// Find every downward zero crossing of `f` in `[start, end]`, in chronological order.
///
/// Arguments
/// -----------------
/// * `start`, `end`: closed search window; an empty list is returned if `end <= start`.
/// * `step`: coarse sampling step.
/// * `f`: function of time, e.g. `altitude(t) - h0`. Errors abort the search.
///
/// Return
/// ----------
/// * The instants where `f` goes from positive to zero or negative. A function that never
///   changes sign in the window yields an empty vector.
///
/// Errors
/// ----------
/// * Any error returned by `f`.
/// * [`CrescentError::RootFindingError`] if Brent's method fails to converge.
pub fn find_descending_crossings<F>(
    start: &Epoch,
    end: &Epoch,
    step: Duration,
    f: F,
) -> Result<Vec<Epoch>, CrescentError>
where
    F: Fn(&Epoch) -> Result<f64, CrescentError>,
{
    let span_days = (*end - *start).to_seconds() / SECONDS_PER_DAY;
    let step_days = step.to_seconds() / SECONDS_PER_DAY;
    if span_days <= 0.0 || step_days <= 0.0 {
        return Ok(Vec::new());
    }

    let at = |x: f64| *start + Duration::from_seconds(x * SECONDS_PER_DAY);
    let n_steps = (span_days / step_days).ceil() as usize;

    // Brent calls a plain f64 -> f64 closure, so errors are parked here
    let failure: RefCell<Option<CrescentError>> = RefCell::new(None);
    let g = |x: f64| match f(&at(x)) {
        Ok(value) => value,
        Err(err) => {
            failure.borrow_mut().get_or_insert(err);
            f64::NAN
        }
    };

    let mut crossings = Vec::new();
    let mut x0 = 0.0;
    let mut y0 = f(start)?;

    for i in 1..=n_steps {
        let x1 = (i as f64 * step_days).min(span_days);
        let y1 = f(&at(x1))?;

        if y0 > 0.0 && y1 <= 0.0 {
            let root = if y1 == 0.0 {
                x1
            } else {
                let mut convergency = SimpleConvergency {
                    eps: ROOT_TOLERANCE_DAYS,
                    max_iter: 100,
                };
                let root = find_root_brent(x0, x1, &g, &mut convergency);
                if let Some(err) = failure.borrow_mut().take() {
                    return Err(err);
                }
                root?
            };
            debug!(offset_days = root, "descending crossing refined");
            crossings.push(at(root));
        }

        x0 = x1;
        y0 = y1;
    }

    Ok(crossings)
}
