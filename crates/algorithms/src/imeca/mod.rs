//! IMECA (Índice Metropolitano de la Calidad del Aire) conversion
//!
//! Maps raw pollutant concentrations to Mexico City's air-quality index
//! through fixed piecewise-linear curves.
//!
//! Expected input units:
//! - O3, NO2, SO2: ppb (divided by 1000 before evaluating the curve)
//! - CO: ppm
//! - PM10, PM2.5: µg/m³

pub mod curves;

use std::fmt;
use std::str::FromStr;

use crate::maybe_rayon::*;
use aire_core::{Error, Result};
use tracing::warn;

use curves::Segment;

/// Pollutants with an IMECA curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    /// Ozone
    O3,
    /// Particulate matter below 10 µm
    PM10,
    /// Particulate matter below 2.5 µm
    PM25,
    /// Nitrogen dioxide
    NO2,
    /// Sulfur dioxide
    SO2,
    /// Carbon monoxide
    CO,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::O3,
        Pollutant::PM10,
        Pollutant::PM25,
        Pollutant::NO2,
        Pollutant::SO2,
        Pollutant::CO,
    ];

    /// Canonical pollutant code
    pub fn code(&self) -> &'static str {
        match self {
            Pollutant::O3 => "O3",
            Pollutant::PM10 => "PM10",
            Pollutant::PM25 => "PM2",
            Pollutant::NO2 => "NO2",
            Pollutant::SO2 => "SO2",
            Pollutant::CO => "CO",
        }
    }

    /// Divisor bringing the input unit to the unit of the curve
    fn divisor(&self) -> f64 {
        match self {
            Pollutant::O3 | Pollutant::NO2 | Pollutant::SO2 => 1000.0,
            Pollutant::CO | Pollutant::PM10 | Pollutant::PM25 => 1.0,
        }
    }

    fn curve(&self) -> &'static [Segment] {
        match self {
            Pollutant::O3 => curves::O3,
            Pollutant::PM10 => curves::PM10,
            Pollutant::PM25 => curves::PM25,
            Pollutant::NO2 => curves::NO2,
            Pollutant::SO2 => curves::SO2,
            Pollutant::CO => curves::CO,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Pollutant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "O3" => Ok(Pollutant::O3),
            "PM10" => Ok(Pollutant::PM10),
            "PM2" | "PM25" | "PM2.5" => Ok(Pollutant::PM25),
            "NO2" => Ok(Pollutant::NO2),
            "SO2" => Ok(Pollutant::SO2),
            "CO" => Ok(Pollutant::CO),
            _ => Err(Error::UnknownPollutant(s.to_string())),
        }
    }
}

/// What to do with a pollutant code that has no IMECA curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPollutantPolicy {
    /// Report the value as missing and log a warning
    #[default]
    Missing,
    /// Fail with [`Error::UnknownPollutant`]
    Error,
}

/// Convert one concentration to its IMECA index.
///
/// Returns `None` when the concentration is missing, not finite or
/// negative: every curve starts at zero and the index has no negative
/// values. The curve value is rounded half to even.
///
/// # Example
/// ```
/// use aire_algorithms::imeca::{to_index, Pollutant};
///
/// assert_eq!(to_index(Pollutant::O3, Some(70.0)), Some(50));
/// assert_eq!(to_index(Pollutant::CO, Some(-1.0)), None);
/// assert_eq!(to_index(Pollutant::PM10, None), None);
/// ```
pub fn to_index(pollutant: Pollutant, concentration: Option<f64>) -> Option<i32> {
    let c = concentration.filter(|c| c.is_finite())?;

    if c < 0.0 {
        return None;
    }

    let value = curves::evaluate(pollutant.curve(), c / pollutant.divisor());
    Some(value.round_ties_even() as i32)
}

fn broadcast_len(pollutants: usize, concentrations: usize) -> Result<usize> {
    match (pollutants, concentrations) {
        (p, c) if p == c => Ok(p),
        (1, c) => Ok(c),
        (p, 1) => Ok(p),
        (p, c) => Err(Error::LengthMismatch {
            what: "concentrations vs pollutants",
            expected: p,
            actual: c,
        }),
    }
}

#[inline]
fn pick<T: Copy>(items: &[T], i: usize) -> T {
    if items.len() == 1 {
        items[0]
    } else {
        items[i]
    }
}

/// Convert many concentrations elementwise, preserving order.
///
/// Either side may have length 1, in which case it is reused for every
/// element of the other side.
pub fn convert_many(
    pollutants: &[Pollutant],
    concentrations: &[Option<f64>],
) -> Result<Vec<Option<i32>>> {
    let n = broadcast_len(pollutants.len(), concentrations.len())?;

    Ok((0..n)
        .into_par_iter()
        .map(|i| to_index(pick(pollutants, i), pick(concentrations, i)))
        .collect())
}

/// [`to_index`] keyed by pollutant code, e.g. as read from a station table.
pub fn to_index_code(
    code: &str,
    concentration: Option<f64>,
    policy: UnknownPollutantPolicy,
) -> Result<Option<i32>> {
    match code.parse::<Pollutant>() {
        Ok(pollutant) => Ok(to_index(pollutant, concentration)),
        Err(e) => match policy {
            UnknownPollutantPolicy::Missing => {
                warn!(code, "no IMECA conversion for pollutant, reporting missing");
                Ok(None)
            }
            UnknownPollutantPolicy::Error => Err(e),
        },
    }
}

/// [`convert_many`] keyed by pollutant codes.
pub fn convert_many_codes<S: AsRef<str>>(
    codes: &[S],
    concentrations: &[Option<f64>],
    policy: UnknownPollutantPolicy,
) -> Result<Vec<Option<i32>>> {
    let n = broadcast_len(codes.len(), concentrations.len())?;
    let code_at = |i: usize| if codes.len() == 1 { &codes[0] } else { &codes[i] };

    (0..n)
        .map(|i| to_index_code(code_at(i).as_ref(), pick(concentrations, i), policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("o3".parse::<Pollutant>().unwrap(), Pollutant::O3);
        assert_eq!("PM2".parse::<Pollutant>().unwrap(), Pollutant::PM25);
        assert_eq!("pm2.5".parse::<Pollutant>().unwrap(), Pollutant::PM25);
        assert_eq!(" CO ".parse::<Pollutant>().unwrap(), Pollutant::CO);
        assert!(matches!(
            "NOX".parse::<Pollutant>(),
            Err(Error::UnknownPollutant(code)) if code == "NOX"
        ));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for p in Pollutant::ALL {
            assert_eq!(p.to_string().parse::<Pollutant>().unwrap(), p);
        }
    }

    #[test]
    fn test_missing_propagates() {
        for p in Pollutant::ALL {
            assert_eq!(to_index(p, None), None);
            assert_eq!(to_index(p, Some(f64::NAN)), None);
        }
    }

    #[test]
    fn test_negative_co_is_missing() {
        assert_eq!(to_index(Pollutant::CO, Some(-1.0)), None);
        assert_eq!(to_index(Pollutant::CO, Some(-0.01)), None);
        assert_eq!(to_index(Pollutant::CO, Some(0.0)), Some(0));
    }

    #[test]
    fn test_negative_concentration_is_missing() {
        for p in Pollutant::ALL {
            assert_eq!(to_index(p, Some(-10.0)), None, "{}", p);
            assert_eq!(to_index(p, Some(-1e-9)), None, "{}", p);
            assert_eq!(to_index(p, Some(0.0)), Some(0), "{}", p);
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(to_index(Pollutant::O3, Some(70.0)), Some(50));
        assert_eq!(to_index(Pollutant::O3, Some(100.0)), Some(104));
        assert_eq!(to_index(Pollutant::PM10, Some(40.0)), Some(50));
        assert_eq!(to_index(Pollutant::PM10, Some(100.0)), Some(110));
        assert_eq!(to_index(Pollutant::PM25, Some(15.4)), Some(50));
        assert_eq!(to_index(Pollutant::NO2, Some(105.0)), Some(50));
        assert_eq!(to_index(Pollutant::SO2, Some(130.0)), Some(100));
        assert_eq!(to_index(Pollutant::CO, Some(11.0)), Some(100));
    }

    #[test]
    fn test_rounds_half_to_even() {
        // PM10 first segment is 1.25 * c: 2.0 -> 2.5, 6.0 -> 7.5
        assert_eq!(to_index(Pollutant::PM10, Some(2.0)), Some(2));
        assert_eq!(to_index(Pollutant::PM10, Some(6.0)), Some(8));
    }

    #[test]
    fn test_convert_many_broadcast() {
        let out = convert_many(&[Pollutant::PM10], &[Some(40.0), None, Some(0.0)]).unwrap();
        assert_eq!(out, vec![Some(50), None, Some(0)]);

        let out = convert_many(&[Pollutant::PM10, Pollutant::PM25], &[Some(40.0)]).unwrap();
        assert_eq!(out, vec![Some(50), Some(99)]);
    }

    #[test]
    fn test_convert_many_length_mismatch() {
        let err = convert_many(&[Pollutant::O3, Pollutant::CO], &[Some(1.0), Some(2.0), Some(3.0)])
            .unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_unknown_code_policy() {
        assert_eq!(
            to_index_code("BENZENE", Some(1.0), UnknownPollutantPolicy::Missing).unwrap(),
            None
        );
        assert!(matches!(
            to_index_code("BENZENE", Some(1.0), UnknownPollutantPolicy::Error),
            Err(Error::UnknownPollutant(_))
        ));
        assert_eq!(
            to_index_code("O3", Some(70.0), UnknownPollutantPolicy::Error).unwrap(),
            Some(50)
        );
    }
}
