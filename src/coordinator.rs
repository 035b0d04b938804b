//! PokerAI Engine — Simulation Coordinator
//!
//! Runs one round: every worker of a fixed pool loops over playouts until
//! its time budget expires, then merges its private totals into the shared
//! aggregate under a single lock acquisition.
//!
//! ## Timing
//!
//! The clock is read only every `check_interval` playouts, so a worker can
//! overrun its deadline by up to `check_interval - 1` playouts. Each worker's
//! playout count is therefore a multiple of `check_interval`.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::logging::Journal;
use crate::playout::{Outcome, Simulator};

/// Playout totals of a worker or a whole round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub simulated: u64,
    pub won: u64,
}

impl Tally {
    fn merge(&mut self, other: Tally) {
        self.simulated += other.simulated;
        self.won += other.won;
    }

    /// `None` when nothing was simulated.
    pub fn win_probability(&self) -> Option<f64> {
        (self.simulated > 0).then(|| self.won as f64 / self.simulated as f64)
    }
}

/// Per-worker wall-clock stopwatch.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

pub struct Coordinator {
    pool: ThreadPool,
    workers: usize,
    time_budget: Duration,
    check_interval: u64,
    seed: Option<u64>,
    journal: Journal,
}

impl Coordinator {
    /// Build the worker pool. Zero workers, a zero time budget or a zero
    /// check interval is a configuration error.
    pub fn new(
        workers: usize,
        time_budget: Duration,
        check_interval: u64,
        seed: Option<u64>,
        journal: Journal,
    ) -> Result<Self> {
        if time_budget.is_zero() {
            return Err(EngineError::Config("time budget must be positive".into()));
        }
        Self::build(workers, time_budget, check_interval, seed, journal)
    }

    /// A coordinator whose rounds always end with zero playouts.
    #[cfg(test)]
    pub(crate) fn expired(workers: usize, journal: Journal) -> Result<Self> {
        Self::build(workers, Duration::ZERO, 1000, None, journal)
    }

    fn build(
        workers: usize,
        time_budget: Duration,
        check_interval: u64,
        seed: Option<u64>,
        journal: Journal,
    ) -> Result<Self> {
        if workers == 0 {
            return Err(EngineError::Config("workers must be at least 1".into()));
        }
        if check_interval == 0 {
            return Err(EngineError::Config("check_interval must be at least 1".into()));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pokerai-worker-{i}"))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

        Ok(Self { pool, workers, time_budget, check_interval, seed, journal })
    }

    pub fn from_config(config: &EngineConfig, journal: Journal) -> Result<Self> {
        Self::new(
            config.workers,
            config.time_budget(),
            config.check_interval,
            config.seed,
            journal,
        )
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run one round and return the merged totals.
    ///
    /// Blocks until every worker has finished and merged. The simulator is
    /// shared read-only; each worker gets its own random stream.
    pub fn run_round<S: Simulator>(&self, simulator: &S) -> Tally {
        let aggregate = Mutex::new(Tally::default());
        let streams = self.streams();

        self.journal.debug(format_args!("Spawning {} Monte Carlo workers", self.workers));

        self.pool.scope(|scope| {
            for (id, mut rng) in streams.into_iter().enumerate() {
                let aggregate = &aggregate;
                scope.spawn(move |_| {
                    let tally = self.simulate_games(id, simulator, &mut rng);
                    aggregate
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .merge(tally);
                });
            }
        });

        self.journal.debug(format_args!("All Monte Carlo workers finished"));

        aggregate.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// One worker's playout loop.
    fn simulate_games<S: Simulator>(
        &self,
        id: usize,
        simulator: &S,
        rng: &mut Xoshiro256PlusPlus,
    ) -> Tally {
        self.journal.debug(format_args!("[worker {id}] starting"));

        let stopwatch = Stopwatch::start();
        let mut tally = Tally::default();
        loop {
            if tally.simulated % self.check_interval == 0 && stopwatch.elapsed() >= self.time_budget {
                break;
            }
            if simulator.simulate(rng) == Outcome::Win {
                tally.won += 1;
            }
            tally.simulated += 1;
        }

        self.journal.debug(format_args!(
            "[worker {id}] done\t(simulated {} games)",
            tally.simulated
        ));
        tally
    }

    /// One independent generator per worker.
    ///
    /// Seeded rounds hand worker `i` the base stream advanced by `i` jumps
    /// (2^128 draws each), so streams never overlap.
    fn streams(&self) -> Vec<Xoshiro256PlusPlus> {
        match self.seed {
            Some(seed) => {
                let mut base = Xoshiro256PlusPlus::seed_from_u64(seed);
                (0..self.workers)
                    .map(|_| {
                        let stream = base.clone();
                        base.jump();
                        stream
                    })
                    .collect()
            }
            None => (0..self.workers).map(|_| Xoshiro256PlusPlus::from_entropy()).collect(),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
