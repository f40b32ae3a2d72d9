//! Spatial threat assessment over a discretized battle area.
//!
//! The [`ThreatField`] answers "how dangerous is it to stand here?" for every
//! grid cell around a point of interest. It is rebuilt wholesale on every
//! planning pass: units move in discrete turns, so incremental updates would
//! only add a way for threat to go stale.
//!
//! # Grid
//!
//! Cells are addressed by [`GridCoord`], obtained from world positions by
//! floor division of `x` and `z` by the cell size. The vertical axis is
//! ignored for addressing.
//!
//! # Threat
//!
//! Each living hostile contributes to a cell according to its distance:
//!
//! - within melee range: `melee_weight` (default 3), melee count +1
//! - within ranged range: `ranged_weight` (default 1), ranged count +1
//! - farther: nothing
//!
//! Threat therefore never decreases as hostiles are added or move closer.
//!
//! # Tactical value
//!
//! The field does not judge terrain. Collaborators that understand height or
//! cover push a per-cell value in through [`ThreatField::set_cell_value`], and
//! the cell's net score becomes `value - threat`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::ThreatFieldConfig;
use crate::state::{Combatant, Position};

/// Discrete cell address on the horizontal plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    pub x: i32,
    pub z: i32,
}

impl GridCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Everything known about one cell after a [`ThreatField::calculate`] pass.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreatInfo {
    /// World position of the cell (vertical coordinate of the pass center).
    pub position: Position,
    pub threat: f32,
    pub tactical_value: f32,
    /// `tactical_value - threat`.
    pub net_score: f32,
    pub melee_threats: u32,
    pub ranged_threats: u32,
    /// Distance to the closest living hostile, if any hostile was scanned.
    pub nearest_hostile: Option<f32>,
    pub in_melee_range: bool,
    pub reachable: bool,
    /// Distance from the pass center.
    pub movement_cost: f32,
}

impl ThreatInfo {
    fn empty(position: Position, movement_cost: f32) -> Self {
        Self {
            position,
            threat: 0.0,
            tactical_value: 0.0,
            net_score: 0.0,
            melee_threats: 0,
            ranged_threats: 0,
            nearest_hostile: None,
            in_melee_range: false,
            reachable: true,
            movement_cost,
        }
    }

    fn refresh_net(&mut self) {
        self.net_score = self.tactical_value - self.threat;
    }
}

/// Grid steps kept on each side of the center, whatever the radius.
pub const MAX_GRID_STEPS: i32 = 128;

/// Threat grid rebuilt per planning pass.
#[derive(Clone, Debug, Default)]
pub struct ThreatField {
    config: ThreatFieldConfig,
    cells: BTreeMap<GridCoord, ThreatInfo>,
}

impl ThreatField {
    pub fn new(config: ThreatFieldConfig) -> Self {
        Self {
            config,
            cells: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &ThreatFieldConfig {
        &self.config
    }

    /// Replaces the configuration and drops every computed cell.
    pub fn set_config(&mut self, config: ThreatFieldConfig) {
        self.config = config;
        self.cells.clear();
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = (GridCoord, &ThreatInfo)> {
        self.cells.iter().map(|(coord, info)| (*coord, info))
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Rebuilds the grid around `center`.
    ///
    /// # Arguments
    ///
    /// * `hostiles` - Combatants hostile to whoever will stand in the cells;
    ///   dead ones are skipped
    /// * `center` - World position the grid is centered on
    /// * `radius` - Cells farther than this from `center` are not kept
    pub fn calculate<'a, I>(&mut self, hostiles: I, center: Position, radius: f32)
    where
        I: IntoIterator<Item = &'a Combatant>,
    {
        self.cells.clear();

        let living: Vec<&Combatant> = hostiles.into_iter().filter(|h| h.is_alive()).collect();
        if !radius.is_finite() || radius < 0.0 {
            return;
        }

        let cell = self.cell_size();
        let steps = (radius / cell).ceil().min(MAX_GRID_STEPS as f32) as i32;
        let origin = self.coord_of(&center);

        for dx in -steps..=steps {
            for dz in -steps..=steps {
                let coord = GridCoord::new(origin.x.saturating_add(dx), origin.z.saturating_add(dz));
                let position = Position::new(coord.x as f32 * cell, center.y, coord.z as f32 * cell);
                let distance = position.distance(&center);
                if distance > radius {
                    continue;
                }

                let mut info = ThreatInfo::empty(position, distance);
                self.assess(&mut info, &living);
                self.cells.insert(coord, info);
            }
        }

        tracing::debug!(
            "threat field: {} cells around {} (radius {:.1}, {} hostiles)",
            self.cells.len(),
            center,
            radius,
            living.len()
        );
    }

    fn assess(&self, info: &mut ThreatInfo, hostiles: &[&Combatant]) {
        for hostile in hostiles {
            let distance = info.position.distance(&hostile.position);
            info.nearest_hostile = Some(info.nearest_hostile.map_or(distance, |d| d.min(distance)));

            if distance <= self.config.melee_range {
                info.threat += self.config.melee_weight;
                info.melee_threats += 1;
                info.in_melee_range = true;
            } else if distance <= self.config.ranged_range {
                info.threat += self.config.ranged_weight;
                info.ranged_threats += 1;
            }
        }
        info.refresh_net();
    }

    /// Sets a cell's tactical value and recomputes its net score.
    ///
    /// Returns `false` if no computed cell covers `position`.
    pub fn set_cell_value(&mut self, position: &Position, value: f32) -> bool {
        let coord = self.coord_of(position);
        match self.cells.get_mut(&coord) {
            Some(info) => {
                info.tactical_value = value;
                info.refresh_net();
                true
            }
            None => false,
        }
    }

    /// Marks a cell as blocked (or open) for movement queries.
    pub fn set_reachable(&mut self, position: &Position, reachable: bool) -> bool {
        let coord = self.coord_of(position);
        match self.cells.get_mut(&coord) {
            Some(info) => {
                info.reachable = reachable;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Cell address of a world position (vertical axis ignored).
    pub fn coord_of(&self, position: &Position) -> GridCoord {
        let cell = self.cell_size();
        GridCoord::new(
            (position.x / cell).floor() as i32,
            (position.z / cell).floor() as i32,
        )
    }

    /// Threat at a world position; zero outside the computed area.
    pub fn threat_at(&self, position: &Position) -> f32 {
        self.cell_at(position).map_or(0.0, |info| info.threat)
    }

    pub fn cell_at(&self, position: &Position) -> Option<&ThreatInfo> {
        self.cells.get(&self.coord_of(position))
    }

    /// Lowest-threat reachable cells within `max_movement` of `from`.
    ///
    /// # Returns
    ///
    /// Up to `count` cells sorted by ascending threat. Ties go to the cell
    /// closer to `from`, then to grid order.
    pub fn safest_cells(&self, from: &Position, max_movement: f32, count: usize) -> Vec<&ThreatInfo> {
        let mut candidates = self.reachable_from(from, max_movement);
        candidates.sort_by(|(ca, a), (cb, b)| {
            cmp_f32(a.threat, b.threat)
                .then_with(|| cmp_f32(a.position.distance(from), b.position.distance(from)))
                .then_with(|| ca.cmp(cb))
        });
        candidates.into_iter().take(count).map(|(_, info)| info).collect()
    }

    /// Highest net-score reachable cells within `max_movement` of `from`.
    ///
    /// # Returns
    ///
    /// Up to `count` cells sorted by descending `net_score`. Ties go to the
    /// cell closer to `from`, then to grid order.
    pub fn best_tactical_cells(
        &self,
        from: &Position,
        max_movement: f32,
        count: usize,
    ) -> Vec<&ThreatInfo> {
        let mut candidates = self.reachable_from(from, max_movement);
        candidates.sort_by(|(ca, a), (cb, b)| {
            cmp_f32(b.net_score, a.net_score)
                .then_with(|| cmp_f32(a.position.distance(from), b.position.distance(from)))
                .then_with(|| ca.cmp(cb))
        });
        candidates.into_iter().take(count).map(|(_, info)| info).collect()
    }

    fn reachable_from(&self, from: &Position, max_movement: f32) -> Vec<(GridCoord, &ThreatInfo)> {
        self.cells
            .iter()
            .filter(|(_, info)| info.reachable && info.position.distance(from) <= max_movement)
            .map(|(coord, info)| (*coord, info))
            .collect()
    }

    /// Threat `source` poses to the given combatants under this field's bands.
    pub fn threat_posed_by<'a, I>(&self, source: &Combatant, victims: I) -> f32
    where
        I: IntoIterator<Item = &'a Combatant>,
    {
        threat_posed_by(&self.config, source, victims)
    }

    fn cell_size(&self) -> f32 {
        if self.config.cell_size.is_finite() && self.config.cell_size > 0.0 {
            self.config.cell_size
        } else {
            ThreatFieldConfig::DEFAULT_CELL_SIZE
        }
    }
}

/// Threat a single combatant poses to `victims`, using the same range bands
/// as cell threat: melee weight per victim in melee range, ranged weight per
/// victim in ranged range.
pub fn threat_posed_by<'a, I>(config: &ThreatFieldConfig, source: &Combatant, victims: I) -> f32
where
    I: IntoIterator<Item = &'a Combatant>,
{
    if !source.is_alive() {
        return 0.0;
    }
    victims
        .into_iter()
        .filter(|victim| victim.is_alive())
        .map(|victim| {
            let distance = source.distance_to(victim);
            if distance <= config.melee_range {
                config.melee_weight
            } else if distance <= config.ranged_range {
                config.ranged_weight
            } else {
                0.0
            }
        })
        .sum()
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Faction, ResourceMeter};

    fn hostile(id: &str, x: f32, z: f32) -> Combatant {
        Combatant::new(id, Faction::Hostile, Position::flat(x, z), ResourceMeter::full(20))
    }

    #[test]
    fn test_melee_then_ranged_threat_accumulates() {
        let mut field = ThreatField::default();
        let near = hostile("near", 2.0, 0.0);
        field.calculate([&near], Position::ORIGIN, 3.0);

        let cell = field.cell_at(&Position::ORIGIN).expect("origin cell");
        assert_eq!(cell.threat, 3.0);
        assert_eq!(cell.melee_threats, 1);
        assert!(cell.in_melee_range);
        assert_eq!(cell.nearest_hostile, Some(2.0));

        let far = hostile("far", 20.0, 0.0);
        field.calculate([&near, &far], Position::ORIGIN, 3.0);
        let cell = field.cell_at(&Position::ORIGIN).expect("origin cell");
        assert_eq!(cell.threat, 4.0);
        assert_eq!(cell.melee_threats, 1);
        assert_eq!(cell.ranged_threats, 1);
        assert_eq!(field.threat_at(&Position::ORIGIN), 4.0);
    }

    #[test]
    fn test_dead_and_distant_hostiles_add_nothing() {
        let mut field = ThreatField::default();
        let mut dead = hostile("dead", 1.0, 0.0);
        dead.hp.current = 0;
        let distant = hostile("distant", 100.0, 0.0);
        field.calculate([&dead, &distant], Position::ORIGIN, 2.0);

        assert_eq!(field.threat_at(&Position::ORIGIN), 0.0);
        assert_eq!(
            field.cell_at(&Position::ORIGIN).and_then(|c| c.nearest_hostile),
            Some(100.0)
        );
    }

    #[test]
    fn test_threat_grows_with_more_hostiles() {
        let mut field = ThreatField::default();
        let a = hostile("a", 1.0, 1.0);
        let b = hostile("b", -1.0, 1.0);
        field.calculate([&a], Position::ORIGIN, 4.0);
        let one: Vec<f32> = field.cells().map(|(_, c)| c.threat).collect();
        field.calculate([&a, &b], Position::ORIGIN, 4.0);
        let two: Vec<f32> = field.cells().map(|(_, c)| c.threat).collect();

        assert_eq!(one.len(), two.len());
        assert!(one.iter().zip(&two).all(|(x, y)| y >= x));
    }

    #[test]
    fn test_cells_stay_inside_radius() {
        let mut field = ThreatField::default();
        let center = Position::flat(0.5, -0.5);
        field.calculate(std::iter::empty(), center, 3.0);
        assert!(!field.is_empty());
        assert!(field.cells().all(|(_, c)| c.position.distance(&center) <= 3.0));
    }

    #[test]
    fn test_lookup_ignores_height_and_floors() {
        let mut field = ThreatField::default();
        let near = hostile("near", 2.0, 0.0);
        field.calculate([&near], Position::ORIGIN, 3.0);
        let lifted = Position::new(0.4, 7.0, 0.9);
        assert_eq!(field.coord_of(&lifted), GridCoord::new(0, 0));
        assert_eq!(field.coord_of(&Position::flat(-0.1, 0.0)), GridCoord::new(-1, 0));
        assert_eq!(field.threat_at(&lifted), 3.0);
    }

    #[test]
    fn test_safest_cells_respect_movement_and_order() {
        let mut field = ThreatField::default();
        let a = hostile("a", 6.0, 0.0);
        let b = hostile("b", 0.0, 6.0);
        field.calculate([&a, &b], Position::ORIGIN, 8.0);

        let from = Position::ORIGIN;
        let safest = field.safest_cells(&from, 3.0, 10);
        assert_eq!(safest.len(), 10);
        assert!(safest.iter().all(|c| c.position.distance(&from) <= 3.0));
        assert!(safest.windows(2).all(|w| w[0].threat <= w[1].threat));
        assert!(safest[0].threat < field.threat_at(&Position::flat(3.0, 0.0)));
    }

    #[test]
    fn test_unreachable_cells_are_skipped() {
        let mut field = ThreatField::default();
        field.calculate(std::iter::empty(), Position::ORIGIN, 2.0);
        assert!(field.set_reachable(&Position::ORIGIN, false));
        let cells = field.safest_cells(&Position::ORIGIN, 2.0, usize::MAX);
        assert!(cells.iter().all(|c| c.position != Position::ORIGIN));
    }

    #[test]
    fn test_tactical_value_drives_best_cells() {
        let mut field = ThreatField::default();
        let a = hostile("a", 4.0, 0.0);
        field.calculate([&a], Position::ORIGIN, 3.0);

        let high_ground = Position::flat(-2.0, 0.0);
        assert!(field.set_cell_value(&high_ground, 10.0));
        assert!(!field.set_cell_value(&Position::flat(50.0, 50.0), 10.0));

        let best = field.best_tactical_cells(&Position::ORIGIN, 3.0, 3);
        assert_eq!(best[0].position, high_ground);
        assert_eq!(best[0].net_score, 10.0 - best[0].threat);
        assert!(best.windows(2).all(|w| w[0].net_score >= w[1].net_score));
    }

    #[test]
    fn test_threat_posed_uses_range_bands() {
        let field = ThreatField::default();
        let source = hostile("src", 0.0, 0.0);
        let close = Combatant::new("p1", Faction::Player, Position::flat(1.0, 0.0), ResourceMeter::full(10));
        let mid = Combatant::new("p2", Faction::Player, Position::flat(10.0, 0.0), ResourceMeter::full(10));
        let gone = Combatant::new("p3", Faction::Player, Position::flat(90.0, 0.0), ResourceMeter::full(10));
        assert_eq!(field.threat_posed_by(&source, [&close, &mid, &gone]), 4.0);
    }

    #[test]
    fn test_huge_radius_is_capped() {
        let mut field = ThreatField::default();
        field.calculate(std::iter::empty(), Position::ORIGIN, 1.0e12);
        let side = (2 * MAX_GRID_STEPS + 1) as usize;
        assert_eq!(field.len(), side * side);

        let far = Position::new(3.0e9, 0.0, -3.0e9);
        field.calculate(std::iter::empty(), far, 1.0e12);
        assert!(field.len() <= side * side);
    }
}
