//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;

use tracing::{info, warn};

use evc_agent::AgentFactory;
use evc_core::{AgentId, GridPos, ModelConfig, SimClock, SimRng};
use evc_grid::{GridWorld, Occupant, StationIndex, distinct_cells, station_positions};
use evc_station::StationStore;

use crate::stats::RetiredTotals;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`ModelConfig`] — grid, population, stations, agent parameters, seed.
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                         |
/// |--------------------------|-------------------------------------------------|
/// | `.station_positions(v)`  | Drawn with `config.layout`                      |
/// | `.homes(v)`              | Distinct random cells not holding a station     |
/// | `.works(v)`              | Distinct random cells not holding a station     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .station_positions(vec![GridPos::new(5, 5)])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:   ModelConfig,
    stations: Option<Vec<GridPos>>,
    homes:    Option<Vec<GridPos>>,
    works:    Option<Vec<GridPos>>,
}

impl SimBuilder {
    pub fn new(config: ModelConfig) -> Self {
        Self { config, stations: None, homes: None, works: None }
    }

    /// Place stations at exactly these cells instead of using the layout.
    /// Cells must be distinct and on the grid.
    pub fn station_positions(mut self, positions: Vec<GridPos>) -> Self {
        self.stations = Some(positions);
        self
    }

    /// Supply each agent's home (must be length `agent_count`).  Agents start
    /// at home.
    pub fn homes(mut self, homes: Vec<GridPos>) -> Self {
        self.homes = Some(homes);
        self
    }

    /// Supply each agent's workplace (must be length `agent_count`).
    pub fn works(mut self, works: Vec<GridPos>) -> Self {
        self.works = Some(works);
        self
    }

    /// Validate inputs, lay out the grid and population, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let config = self.config.sanitized();
        let agent_count = config.agent_count;

        // ── Validate optional inputs ──────────────────────────────────────
        for (what, v) in [("homes", &self.homes), ("works", &self.works)] {
            if let Some(v) = v
                && v.len() != agent_count
            {
                return Err(SimError::AgentCountMismatch { expected: agent_count, got: v.len(), what });
            }
        }

        let mut world = GridWorld::new(config.width, config.height, config.topology)?;
        let mut rng = SimRng::new(config.seed);

        // ── Stations ──────────────────────────────────────────────────────
        let station_cells = match self.stations {
            Some(cells) => {
                let unique: HashSet<GridPos> = cells.iter().copied().collect();
                if unique.len() != cells.len() {
                    return Err(SimError::Config("two stations share a cell".into()));
                }
                cells
            }
            None => station_positions(config.layout, config.station_count(), &world, &mut rng),
        };
        let stations = StationStore::new(&station_cells, config.station_capacity, config.usage_window);
        for s in stations.iter() {
            world.place(s.pos, Occupant::Station(s.id))?;
        }
        let index = StationIndex::new(stations.iter().map(|s| (s.id, s.pos)));

        // ── Homes and workplaces ──────────────────────────────────────────
        let (homes, works) = match (self.homes, self.works) {
            (Some(h), Some(w)) => (h, w),
            (homes, works) => {
                let exclude: HashSet<GridPos> = station_cells.iter().copied().collect();
                let mut cells = home_work_cells(&world, agent_count, &exclude, &mut rng)?;
                let drawn_works = cells.split_off(agent_count);
                (homes.unwrap_or(cells), works.unwrap_or(drawn_works))
            }
        };

        // ── Population ────────────────────────────────────────────────────
        let factory = AgentFactory::new(config.agent.clone(), config.seed);
        let mut agents = Vec::with_capacity(agent_count);
        for (i, (&home, &work)) in homes.iter().zip(&works).enumerate() {
            let id = AgentId::try_from(i)
                .map_err(|_| SimError::Config(format!("agent count {agent_count} exceeds the id space")))?;
            world.place(home, Occupant::Agent(id))?;
            agents.push(Some(factory.build(id, home, work, &world)));
        }

        info!(
            width = config.width,
            height = config.height,
            agents = agent_count,
            stations = stations.len(),
            seed = config.seed,
            "simulation built"
        );

        Ok(Sim {
            clock:    SimClock::new(),
            world,
            index,
            stations,
            live:     agents.len(),
            agents,
            factory,
            rng,
            retired:  RetiredTotals::default(),
            config,
        })
    }
}

/// `2 * n` cells for homes (first half) and workplaces (second half).
///
/// Distinct when the grid has room; otherwise drawn with replacement from
/// the cells without a station.
fn home_work_cells(
    world:   &GridWorld,
    n:       usize,
    exclude: &HashSet<GridPos>,
    rng:     &mut SimRng,
) -> SimResult<Vec<GridPos>> {
    let free = distinct_cells(world, world.cell_count(), exclude, rng);
    if free.len() >= 2 * n {
        return Ok(free[..2 * n].to_vec());
    }
    if free.is_empty() {
        return Err(SimError::Config("no cell left for homes and workplaces".into()));
    }
    warn!(
        agents = n,
        free_cells = free.len(),
        "grid too small for distinct homes and workplaces; cells will be shared"
    );
    Ok((0..2 * n).map(|_| free[rng.gen_range(0..free.len())]).collect())
}
