//! Frame force results returned by the host after analysis

use serde::{Deserialize, Serialize};

/// Internal forces at one output station of a frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StationForces {
    /// Distance from the i-end of the frame
    pub station: f64,
    /// Axial force
    pub p: f64,
    /// Shear in local 2 direction
    pub v2: f64,
    /// Shear in local 3 direction
    pub v3: f64,
    /// Torsion
    pub t: f64,
    /// Moment about local 2 axis
    pub m2: f64,
    /// Moment about local 3 axis
    pub m3: f64,
}

impl StationForces {
    /// Create from array [P, V2, V3, T, M2, M3]
    pub fn from_array(station: f64, arr: [f64; 6]) -> Self {
        Self {
            station,
            p: arr[0],
            v2: arr[1],
            v3: arr[2],
            t: arr[3],
            m2: arr[4],
            m3: arr[5],
        }
    }

    /// Get as array [P, V2, V3, T, M2, M3]
    pub fn as_array(&self) -> [f64; 6] {
        [self.p, self.v2, self.v3, self.t, self.m2, self.m3]
    }
}

/// Frame forces for one frame under one case or combination.
///
/// Stored column-wise, one entry per output station, in the order the host
/// returns them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameForces {
    pub object: Vec<String>,
    pub object_station: Vec<f64>,
    pub element: Vec<String>,
    pub element_station: Vec<f64>,
    pub load_case: Vec<String>,
    pub step_type: Vec<String>,
    pub step_number: Vec<f64>,
    pub p: Vec<f64>,
    pub v2: Vec<f64>,
    pub v3: Vec<f64>,
    pub t: Vec<f64>,
    pub m2: Vec<f64>,
    pub m3: Vec<f64>,
}

impl FrameForces {
    /// Number of output stations
    pub fn len(&self) -> usize {
        self.object_station.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_station.is_empty()
    }

    /// Append one station
    pub fn push(&mut self, object: &str, load_case: &str, forces: StationForces) {
        self.object.push(object.to_string());
        self.object_station.push(forces.station);
        self.element.push(object.to_string());
        self.element_station.push(forces.station);
        self.load_case.push(load_case.to_string());
        self.step_type.push(String::new());
        self.step_number.push(0.0);
        self.p.push(forces.p);
        self.v2.push(forces.v2);
        self.v3.push(forces.v3);
        self.t.push(forces.t);
        self.m2.push(forces.m2);
        self.m3.push(forces.m3);
    }

    /// Every column has one entry per station
    pub fn is_consistent(&self) -> bool {
        let n = self.len();
        [
            self.object.len(),
            self.element.len(),
            self.element_station.len(),
            self.load_case.len(),
            self.step_type.len(),
            self.step_number.len(),
            self.p.len(),
            self.v2.len(),
            self.v3.len(),
            self.t.len(),
            self.m2.len(),
            self.m3.len(),
        ]
        .iter()
        .all(|len| *len == n)
    }

    /// Forces at station `i`
    pub fn station(&self, i: usize) -> Option<StationForces> {
        if i >= self.len() || !self.is_consistent() {
            return None;
        }
        Some(StationForces {
            station: self.object_station[i],
            p: self.p[i],
            v2: self.v2[i],
            v3: self.v3[i],
            t: self.t[i],
            m2: self.m2[i],
            m3: self.m3[i],
        })
    }

    /// Iterate over all stations
    pub fn stations(&self) -> impl Iterator<Item = StationForces> + '_ {
        (0..self.len()).filter_map(move |i| self.station(i))
    }

    /// Largest absolute major-axis moment
    pub fn max_abs_m3(&self) -> f64 {
        self.m3.iter().fold(0.0, |acc: f64, m| acc.max(m.abs()))
    }

    /// Largest absolute major-axis shear
    pub fn max_abs_v2(&self) -> f64 {
        self.v2.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_columns_aligned() {
        let mut forces = FrameForces::default();
        forces.push("frame_2", "COMB1-ULS", StationForces::from_array(0.0, [0.0, 12.0, 0.0, 0.0, 0.0, -8.0]));
        forces.push("frame_2", "COMB1-ULS", StationForces::from_array(2.0, [0.0, -3.0, 0.0, 0.0, 0.0, 15.0]));
        assert_eq!(forces.len(), 2);
        assert!(forces.is_consistent());
        assert_eq!(forces.station(1).unwrap().m3, 15.0);
        assert!(forces.station(2).is_none());
        assert_eq!(forces.max_abs_m3(), 15.0);
        assert_eq!(forces.max_abs_v2(), 12.0);
    }

    #[test]
    fn test_ragged_columns_detected() {
        let mut forces = FrameForces::default();
        forces.push("frame_0", "LL", StationForces::default());
        forces.m3.pop();
        assert!(!forces.is_consistent());
        assert_eq!(forces.stations().count(), 0);
    }
}
