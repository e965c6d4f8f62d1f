//! Displacement sensor.
//!
//! The table's obstacle layout is not known up front. The only way to learn
//! about rockpoints is to ask the sensor how far the tool would have to be
//! nudged to sit at a requested center without overlapping anything.

use crate::cell::{Cell, Offset};
use crate::error::DisplacementError;
use crate::footprint::ToolFootprint;
use crate::grid::ObstacleMap;
use std::collections::HashSet;
use tracing::trace;

/// Outcome of a single sensor probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorReading {
    /// The footprint at the probed center touches no obstacle.
    Clear,
    /// The tool has to move by this (non-zero) vector to clear nearby obstacles.
    Relocate(Offset),
    /// No admissible placement exists inside the probed footprint.
    Blocked,
}

impl SensorReading {
    /// Whether the tool may be placed at the probed center as-is.
    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }

    /// Converts the reading into a displacement vector.
    pub fn into_displacement(self, center: Cell) -> Result<Offset, DisplacementError> {
        match self {
            Self::Clear => Ok(Offset::ZERO),
            Self::Relocate(offset) => Ok(offset),
            Self::Blocked => Err(DisplacementError { center }),
        }
    }
}

/// Parameters of one probe.
///
/// Borrowed for the duration of a single query only.
pub struct SensorQuery<'a, M: ?Sized> {
    pub center: Cell,
    pub map: &'a M,
}

impl<M: ?Sized> Clone for SensorQuery<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for SensorQuery<'_, M> {}

impl<'a, M: ObstacleMap + ?Sized> SensorQuery<'a, M> {
    pub fn new(center: Cell, map: &'a M) -> Self {
        Self { center, map }
    }
}

/// Sensor reporting the minimal relocation needed to avoid rockpoints.
#[derive(Debug, Clone)]
pub struct ObstacleSensor {
    footprint: ToolFootprint,
}

impl ObstacleSensor {
    pub fn new(footprint: ToolFootprint) -> Self {
        Self { footprint }
    }

    pub fn footprint(&self) -> &ToolFootprint {
        &self.footprint
    }

    /// Probes the tool footprint at `query.center`.
    ///
    /// When rockpoints are found inside the footprint, every placement within
    /// tool radius of any of them is forbidden. The remaining placements inside
    /// the footprint are admissible; the one nearest the center wins, with ties
    /// going to the smallest x and then the smallest y.
    pub fn probe<M: ObstacleMap + ?Sized>(&self, query: SensorQuery<'_, M>) -> SensorReading {
        let center = query.center;
        let rocks: Vec<Cell> = self
            .footprint
            .coverage(center)
            .filter(|&c| query.map.is_obstacle(c))
            .collect();

        if rocks.is_empty() {
            return SensorReading::Clear;
        }

        let forbidden: HashSet<Cell> = rocks
            .iter()
            .flat_map(|&rock| self.footprint.coverage(rock))
            .collect();

        let selected = self
            .footprint
            .coverage(center)
            .filter(|c| !forbidden.contains(c))
            .min_by_key(|&c| (c.distance_squared(center), c.x, c.y));

        let reading = match selected {
            None => SensorReading::Blocked,
            Some(cell) if cell == center => SensorReading::Clear,
            Some(cell) => SensorReading::Relocate(cell - center),
        };

        trace!(
            "Probe at {}: {} rockpoint(s) in footprint, reading {:?}",
            center,
            rocks.len(),
            reading
        );
        reading
    }

    /// Displacement vector required at `center`, or an error when no admissible
    /// placement exists nearby.
    pub fn displacement<M: ObstacleMap + ?Sized>(
        &self,
        center: Cell,
        map: &M,
    ) -> Result<Offset, DisplacementError> {
        self.probe(SensorQuery::new(center, map))
            .into_displacement(center)
    }
}
