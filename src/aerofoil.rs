/// A NACA 4-digit section, all quantities as fractions of the chord
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Naca4 {
    /// Maximum camber (first digit / 100)
    pub camber: f64,
    /// Chordwise position of maximum camber (second digit / 10)
    pub camber_position: f64,
    /// Maximum thickness (last two digits / 100)
    pub thickness: f64,
}

/// A point on the upper and lower surface at the same chord station
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Station {
    pub upper: [f64; 2],
    pub lower: [f64; 2],
}

impl Naca4 {
    pub const fn new(camber: f64, camber_position: f64, thickness: f64) -> Self {
        Naca4 {
            camber,
            camber_position,
            thickness,
        }
    }

    /// Half thickness at chord fraction `x`
    pub fn half_thickness(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        5.0 * self.thickness
            * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                - 0.1015 * x.powi(4))
    }

    /// Mean camber line height and slope at chord fraction `x`
    pub fn camber_line(&self, x: f64) -> (f64, f64) {
        let (m, p) = (self.camber, self.camber_position);
        if m == 0.0 || p <= 0.0 || p >= 1.0 {
            return (0.0, 0.0);
        }
        let x = x.clamp(0.0, 1.0);
        if x < p {
            (
                m / (p * p) * (2.0 * p * x - x * x),
                2.0 * m / (p * p) * (p - x),
            )
        } else {
            let q = (1.0 - p) * (1.0 - p);
            (
                m / q * ((1.0 - 2.0 * p) + 2.0 * p * x - x * x),
                2.0 * m / q * (p - x),
            )
        }
    }

    /// Upper and lower surface points at chord fraction `x`
    pub fn station(&self, x: f64) -> Station {
        let yt = self.half_thickness(x);
        let (yc, slope) = self.camber_line(x);
        let theta = slope.atan();
        let (sin_t, cos_t) = theta.sin_cos();
        Station {
            upper: [x - yt * sin_t, yc + yt * cos_t],
            lower: [x + yt * sin_t, yc - yt * cos_t],
        }
    }

    /// `samples + 1` stations from leading to trailing edge, cosine spaced to
    /// resolve the leading-edge curvature
    pub fn stations(&self, samples: usize) -> Vec<Station> {
        let samples = samples.max(1);
        (0..=samples)
            .map(|i| {
                let beta = std::f64::consts::PI * i as f64 / samples as f64;
                self.station(0.5 * (1.0 - beta.cos()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_section_peaks_near_thirty_percent() {
        let naca0012 = Naca4::new(0.0, 0.0, 0.12);
        let peak = naca0012.half_thickness(0.3);
        assert!((peak - 0.06).abs() < 1e-3);
        assert!(naca0012.half_thickness(0.1) < peak);
        assert!(naca0012.half_thickness(0.6) < peak);
    }

    #[test]
    fn trailing_edge_is_nearly_closed() {
        let naca0012 = Naca4::new(0.0, 0.0, 0.12);
        assert!(naca0012.half_thickness(1.0) < 0.002);
        assert_eq!(naca0012.half_thickness(0.0), 0.0);
    }

    #[test]
    fn camber_peaks_at_its_position() {
        let naca2412 = Naca4::new(0.02, 0.4, 0.12);
        let (yc, slope) = naca2412.camber_line(0.4);
        assert!((yc - 0.02).abs() < 1e-12);
        assert!(slope.abs() < 1e-12);
        let (front, _) = naca2412.camber_line(0.2);
        let (back, _) = naca2412.camber_line(0.8);
        assert!(front < yc && back < yc);
    }

    #[test]
    fn stations_run_leading_to_trailing_edge() {
        let stations = Naca4::new(0.04, 0.4, 0.1).stations(8);
        assert_eq!(stations.len(), 9);
        assert!(stations[0].upper[0].abs() < 1e-12);
        assert!((stations[8].upper[0] - 1.0).abs() < 1e-3);
        for station in &stations {
            assert!(station.upper[1] >= station.lower[1]);
        }
    }
}
