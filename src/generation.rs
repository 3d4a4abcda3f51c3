use crate::config::ELITE_COUNT;
use crate::error::{Result, SimError};
use crate::genome::Genome;
use crate::robot::{Robot, RobotId};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// One population of attackers sharing a mutation rate.
#[derive(Debug, Clone)]
pub struct Generation {
    robots: Vec<Robot>,
    mutation_rate: f64,
    number: u32,
    next_id: u64,
}

impl Generation {
    pub fn new_random<R: Rng + ?Sized>(size: usize, mutation_rate: f64, rng: &mut R) -> Result<Self> {
        validate(size, mutation_rate)?;
        let robots = (1..=size as u64)
            .map(|id| Robot::new(RobotId(id), Genome::random(rng)))
            .collect();
        Ok(Self {
            robots,
            mutation_rate,
            number: 1,
            next_id: size as u64 + 1,
        })
    }

    /// Wraps an existing population. Ids must be unique and must not be the
    /// defender's; ids handed out later start above the largest id present.
    pub fn from_robots(robots: Vec<Robot>, mutation_rate: f64) -> Result<Self> {
        validate(robots.len(), mutation_rate)?;
        let mut seen = HashSet::with_capacity(robots.len());
        for robot in &robots {
            if robot.is_defender() {
                return Err(SimError::DefenderInPopulation);
            }
            if !seen.insert(robot.id()) {
                return Err(SimError::DuplicateRobot(robot.id().0));
            }
        }
        let next_id = robots.iter().map(|r| r.id().0).max().unwrap_or(0) + 1;
        Ok(Self {
            robots,
            mutation_rate,
            number: 1,
            next_id,
        })
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn get(&self, index: usize) -> Option<&Robot> {
        self.robots.get(index)
    }

    /// Stores a robot back after its match. Out-of-range indices are ignored.
    pub fn record(&mut self, index: usize, robot: Robot) {
        if let Some(slot) = self.robots.get_mut(index) {
            *slot = robot;
        }
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// 1-based generation counter.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Indices ordered best first: fitness descending, then match duration
    /// ascending. Equal robots keep population order.
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.robots.len()).collect();
        order.sort_by(|&a, &b| rank(&self.robots[a], &self.robots[b]));
        order
    }

    pub fn best(&self) -> Option<&Robot> {
        self.ranking().first().map(|&i| &self.robots[i])
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.robots.is_empty() {
            return 0.0;
        }
        let total: i64 = self.robots.iter().map(|r| r.fitness() as i64).sum();
        total as f64 / self.robots.len() as f64
    }

    /// Produces the next population of the same size: the two best robots
    /// survive with reset state, the rest are mutated two-point crossover
    /// children of parents drawn from the top half.
    pub fn breed<R: Rng + ?Sized>(&self, rng: &mut R) -> Generation {
        let size = self.robots.len();
        let ranked: Vec<&Robot> = self.ranking().into_iter().map(|i| &self.robots[i]).collect();
        let mut next_id = self.next_id;
        let mut robots = Vec::with_capacity(size);

        for elite in ranked.iter().take(ELITE_COUNT.min(size)) {
            let mut survivor = (*elite).clone();
            survivor.reset_vitals();
            robots.push(survivor);
        }

        let top_half = size / 2;
        while robots.len() < size {
            let first = rng.gen_range(0..=top_half);
            let mut second = rng.gen_range(0..top_half);
            if second >= first {
                second += 1;
            }
            let left = ranked[first];
            let right = ranked[second];
            let parents = (left.id(), right.id());

            let (child_a, child_b) = left.genome().crossover(right.genome(), rng);
            let child_a = child_a.mutate(self.mutation_rate, rng);
            let child_b = child_b.mutate(self.mutation_rate, rng);

            robots.push(Robot::offspring(RobotId(next_id), child_a, parents));
            next_id += 1;
            if robots.len() < size {
                robots.push(Robot::offspring(RobotId(next_id), child_b, parents));
                next_id += 1;
            }
        }

        debug!(
            generation = self.number + 1,
            size,
            first_id = self.next_id,
            "bred generation"
        );

        Generation {
            robots,
            mutation_rate: self.mutation_rate,
            number: self.number + 1,
            next_id,
        }
    }
}

fn rank(a: &Robot, b: &Robot) -> Ordering {
    b.fitness()
        .cmp(&a.fitness())
        .then(a.match_duration().cmp(&b.match_duration()))
}

fn validate(size: usize, mutation_rate: f64) -> Result<()> {
    if size < 2 {
        return Err(SimError::PopulationTooSmall { size });
    }
    if !(0.0..=1.0).contains(&mutation_rate) {
        return Err(SimError::InvalidMutationRate(mutation_rate));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Gene;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn scored(id: u64, fitness: i32, duration: u32) -> Robot {
        let genome = Genome::sentry().with(Gene::ChestSize, 10 + id as i32).unwrap();
        let mut robot = Robot::new(RobotId(id), genome);
        robot.adjust_fitness(fitness);
        robot.finish_match(duration);
        robot
    }

    #[test]
    fn rejects_tiny_populations_and_bad_rates() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            Generation::new_random(1, 0.1, &mut rng),
            Err(SimError::PopulationTooSmall { size: 1 })
        ));
        assert!(matches!(
            Generation::new_random(4, -0.1, &mut rng),
            Err(SimError::InvalidMutationRate(_))
        ));
    }

    #[test]
    fn ids_stay_unique_across_generations() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut generation = Generation::new_random(10, 0.1, &mut rng).unwrap();
        assert!(generation.robots().iter().all(|r| r.parents().is_none()));

        let mut issued: HashSet<RobotId> = generation.robots().iter().map(|r| r.id()).collect();
        assert_eq!(issued.len(), 10);
        assert!(!issued.contains(&RobotId::DEFENDER));

        for _ in 0..5 {
            let previous: HashSet<RobotId> = generation.robots().iter().map(|r| r.id()).collect();
            generation = generation.breed(&mut rng);

            let current: HashSet<RobotId> = generation.robots().iter().map(|r| r.id()).collect();
            assert_eq!(current.len(), generation.len());

            let (elites, children) = generation.robots().split_at(ELITE_COUNT);
            assert!(elites.iter().all(|r| previous.contains(&r.id())));
            for child in children {
                assert!(child.parents().is_some());
                assert!(issued.insert(child.id()), "id {} reused", child.id());
            }
        }
        assert_eq!(issued.len(), 10 + 5 * (10 - ELITE_COUNT));
    }

    #[test]
    fn from_robots_rejects_duplicate_and_defender_ids() {
        assert!(matches!(
            Generation::from_robots(vec![scored(1, 0, 0), scored(2, 0, 0), scored(1, 5, 0)], 0.1),
            Err(SimError::DuplicateRobot(1))
        ));
        assert!(matches!(
            Generation::from_robots(vec![scored(0, 0, 0), scored(2, 0, 0)], 0.1),
            Err(SimError::DefenderInPopulation)
        ));
    }

    #[test]
    fn ranking_breaks_fitness_ties_by_duration() {
        let generation = Generation::from_robots(
            vec![
                scored(1, 10, 900),
                scored(2, 30, 3600),
                scored(3, 10, 400),
                scored(4, -5, 100),
            ],
            0.1,
        )
        .unwrap();
        assert_eq!(generation.ranking(), vec![1, 2, 0, 3]);
        assert_eq!(generation.best().map(|r| r.id()), Some(RobotId(2)));
        assert_eq!(generation.mean_fitness(), 11.25);
    }

    #[test]
    fn breeding_preserves_size_for_every_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for size in 2..=13 {
            let mut generation = Generation::new_random(size, 0.2, &mut rng).unwrap();
            for _ in 0..3 {
                generation = generation.breed(&mut rng);
                assert_eq!(generation.len(), size);
            }
            assert_eq!(generation.number(), 4);
        }
    }

    #[test]
    fn elites_survive_with_reset_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let generation = Generation::from_robots(
            vec![
                scored(1, 10, 900),
                scored(2, 30, 3600),
                scored(3, 10, 400),
                scored(4, -5, 100),
                scored(5, 0, 100),
            ],
            0.5,
        )
        .unwrap();
        let next = generation.breed(&mut rng);

        let elites = &next.robots()[..2];
        assert_eq!(elites[0].id(), RobotId(2));
        assert_eq!(elites[1].id(), RobotId(3));
        assert_eq!(elites[0].genome(), generation.robots()[1].genome());
        assert_eq!(elites[1].genome(), generation.robots()[2].genome());
        for elite in elites {
            assert_eq!(elite.fitness(), 0);
            assert_eq!(elite.match_duration(), 0);
            assert_eq!(elite.hp(), elite.max_hp());
            assert_eq!(elite.phase(), 0);
        }
    }

    #[test]
    fn children_have_fresh_ids_and_distinct_top_half_parents() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let robots: Vec<Robot> = (1..=8).map(|id| scored(id, id as i32, 100)).collect();
        let generation = Generation::from_robots(robots, 0.1).unwrap();
        let top_half: Vec<RobotId> = generation
            .ranking()
            .into_iter()
            .take(generation.len() / 2 + 1)
            .map(|i| generation.robots()[i].id())
            .collect();

        let next = generation.breed(&mut rng);
        for (offset, child) in next.robots()[2..].iter().enumerate() {
            assert_eq!(child.id(), RobotId(9 + offset as u64));
            let (left, right) = child.parents().unwrap();
            assert_ne!(left, right);
            assert!(top_half.contains(&left) && top_half.contains(&right));
        }
    }

    #[test]
    fn children_stay_in_domain_under_full_mutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut generation = Generation::new_random(12, 1.0, &mut rng).unwrap();
        for _ in 0..20 {
            generation = generation.breed(&mut rng);
            for robot in generation.robots() {
                for gene in Gene::ALL {
                    assert!(gene.kind().contains(robot.genome().get(gene)));
                }
            }
        }
    }

    #[test]
    fn breeding_is_reproducible_from_seed() {
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let generation = Generation::new_random(6, 0.3, &mut rng).unwrap();
            let next = generation.breed(&mut rng);
            next.robots().iter().map(|r| *r.genome()).collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
    }
}
