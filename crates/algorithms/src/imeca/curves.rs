//! IMECA piecewise-linear curves
//!
//! Breakpoints are in ppm for gases (O3, NO2, SO2, CO) and µg/m³ for
//! particulate matter. Each band of 50 index points maps onto one
//! concentration segment; the band above 200 extends without bound.

/// One linear segment of an IMECA curve: `slope * (c - origin) + base`,
/// valid for concentrations up to and including `upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub upper: f64,
    pub slope: f64,
    pub origin: f64,
    pub base: f64,
}

impl Segment {
    #[inline]
    pub fn eval(&self, c: f64) -> f64 {
        self.slope * (c - self.origin) + self.base
    }
}

/// Evaluate `curve` at `c` using the first segment whose `upper` bound
/// is not exceeded.
pub fn evaluate(curve: &[Segment], c: f64) -> f64 {
    curve
        .iter()
        .find(|s| c <= s.upper)
        .map(|s| s.eval(c))
        .unwrap_or(f64::NAN)
}

macro_rules! seg {
    ($upper:expr, $slope:expr, $origin:expr, $base:expr) => {
        Segment {
            upper: $upper,
            slope: $slope,
            origin: $origin,
            base: $base,
        }
    };
}

pub const O3: &[Segment] = &[
    seg!(0.070, 714.29, 0.0, 0.0),
    seg!(0.095, 2041.67, 0.071, 51.0),
    seg!(0.154, 844.83, 0.096, 101.0),
    seg!(0.204, 1000.0, 0.155, 151.0),
    seg!(f64::INFINITY, 497.49, 0.205, 201.0),
];

pub const NO2: &[Segment] = &[
    seg!(0.105, 476.19, 0.0, 0.0),
    seg!(0.210, 471.15, 0.106, 51.0),
    seg!(0.315, 471.15, 0.211, 101.0),
    seg!(0.420, 471.15, 0.316, 151.0),
    seg!(f64::INFINITY, 471.15, 0.421, 201.0),
];

pub const SO2: &[Segment] = &[seg!(f64::INFINITY, 100.0 / 0.13, 0.0, 0.0)];

pub const CO: &[Segment] = &[
    seg!(5.50, 9.09, 0.0, 0.0),
    seg!(11.00, 8.93, 5.51, 51.0),
    seg!(16.50, 8.93, 11.01, 101.0),
    seg!(22.00, 8.93, 16.51, 151.0),
    seg!(f64::INFINITY, 9.09, 22.01, 201.0),
];

/// PM10, 2014 revision of the index
pub const PM10: &[Segment] = &[
    seg!(40.0, 1.25, 0.0, 0.0),
    seg!(75.0, 1.44, 41.0, 51.0),
    seg!(214.0, 0.355, 76.0, 101.0),
    seg!(354.0, 0.353, 215.0, 151.0),
    seg!(f64::INFINITY, 0.343, 355.0, 201.0),
];

/// PM2.5, 2006 index
pub const PM25: &[Segment] = &[
    seg!(15.4, 3.2468, 0.0, 0.0),
    seg!(40.4, 1.9679, 15.5, 51.0),
    seg!(65.4, 1.9679, 40.5, 101.0),
    seg!(150.4, 0.5772, 65.5, 151.0),
    seg!(f64::INFINITY, 0.9910, 150.5, 201.0),
];
